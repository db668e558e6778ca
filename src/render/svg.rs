//! SVG markup for a single table image.

use super::TableLayout;
use crate::config::StyleConfig;
use crate::schema::Column;
use std::fmt::Write;

/// Emit the SVG for a table whose geometry has already been computed
pub fn to_svg(
    table_name: &str,
    columns: &[Column],
    layout: &TableLayout,
    style: &StyleConfig,
) -> String {
    let width = layout.total_width;
    let height = layout.total_height;
    let row = layout.row_height;
    let half_row = f64::from(row) / 2.0;

    let mut svg = String::with_capacity(1024 + columns.len() * 192);

    // write! into a String cannot fail
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    let _ = write!(
        svg,
        "<style>\
text {{ font-family: monospace; font-size: {font}px; fill: black; dominant-baseline: middle; }} \
.header {{ font-weight: bold; text-anchor: middle; }} \
.cell {{ text-anchor: start; }} \
line {{ stroke: black; stroke-width: 1; }} \
rect {{ fill: white; stroke: black; stroke-width: 1; }} \
.header-bg {{ fill: {fill}; }}\
</style>",
        font = style.font_size,
        fill = escape_xml(&style.header_fill),
    );

    // Frame, inset by half a pixel so the 1px stroke stays inside the image
    let _ = write!(
        svg,
        "<rect x=\"0.5\" y=\"0.5\" width=\"{}\" height=\"{}\"/>",
        width.saturating_sub(1),
        height.saturating_sub(1)
    );
    let _ = write!(
        svg,
        "<rect class=\"header-bg\" x=\"0.5\" y=\"0.5\" width=\"{}\" height=\"{}\"/>",
        width.saturating_sub(1),
        row.saturating_sub(1)
    );
    let _ = write!(
        svg,
        "<text class=\"header\" x=\"{}\" y=\"{}\">{}</text>",
        f64::from(width) / 2.0,
        half_row,
        escape_xml(table_name)
    );

    if columns.is_empty() {
        svg.push_str("</svg>");
        return svg;
    }

    let divider = layout.name_panel_width;
    let _ = write!(
        svg,
        "<line class=\"header-sep\" x1=\"0\" y1=\"{row}\" x2=\"{width}\" y2=\"{row}\"/>"
    );
    let _ = write!(
        svg,
        "<line class=\"divider\" x1=\"{divider}\" y1=\"{row}\" x2=\"{divider}\" y2=\"{height}\"/>"
    );

    let mut y = row;
    for (i, col) in columns.iter().enumerate() {
        let text_y = f64::from(y) + half_row;
        let _ = write!(
            svg,
            "<text class=\"cell\" x=\"{}\" y=\"{}\">{}</text>",
            style.padding,
            text_y,
            escape_xml(&col.name)
        );
        let _ = write!(
            svg,
            "<text class=\"cell\" x=\"{}\" y=\"{}\">{}</text>",
            divider.saturating_add(style.padding),
            text_y,
            escape_xml(&col.col_type)
        );

        y = y.saturating_add(row);
        if i + 1 < columns.len() {
            let _ = write!(
                svg,
                "<line class=\"row-sep\" x1=\"0\" y1=\"{y}\" x2=\"{width}\" y2=\"{y}\"/>"
            );
        }
    }

    svg.push_str("</svg>");
    svg
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
