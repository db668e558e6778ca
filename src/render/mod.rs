//! Table image rendering.
//!
//! Each table becomes a self-contained SVG drawn as a two-panel grid: a
//! shaded header row with the table name, then one row per column with the
//! column name on the left and its type on the right. Dimensions are a pure
//! function of the text lengths and the [`StyleConfig`], so the same table
//! always renders to the same bytes.

mod svg;

pub use svg::to_svg;

use crate::config::StyleConfig;
use crate::schema::Column;
use base64::{engine::general_purpose, Engine as _};

/// Prefix of every emitted image URI
pub const DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Pixel geometry of a rendered table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// Width needed to show the table name unclipped
    pub header_width: u32,
    /// Final width of the left (name) panel
    pub name_panel_width: u32,
    /// Final width of the right (type) panel
    pub type_panel_width: u32,
    pub total_width: u32,
    pub total_height: u32,
    pub row_height: u32,
    /// Number of column rows, excluding the header
    pub rows: usize,
}

impl TableLayout {
    pub fn compute(table_name: &str, columns: &[Column], style: &StyleConfig) -> Self {
        let header_width = text_width(char_len(table_name), style);

        let (max_name_len, max_type_len) =
            columns.iter().fold((0usize, 0usize), |(name, ty), col| {
                (
                    name.max(char_len(&col.name)),
                    ty.max(char_len(&col.col_type)),
                )
            });

        let mut name_panel_width = panel_width(max_name_len, style.min_name_chars, style);
        let mut type_panel_width = panel_width(max_type_len, style.min_type_chars, style);

        let content_width = name_panel_width.saturating_add(type_panel_width);
        let total_width = header_width.max(content_width);

        // Widen both panels so the divider stays put and the header is not clipped
        if total_width > content_width {
            let extra = total_width - content_width;
            name_panel_width += extra / 2;
            type_panel_width += extra - extra / 2;
        }

        let rows = columns.len();
        let total_height = style
            .row_height
            .saturating_mul(u32::try_from(rows).unwrap_or(u32::MAX).saturating_add(1));

        Self {
            header_width,
            name_panel_width,
            type_panel_width,
            total_width,
            total_height,
            row_height: style.row_height,
            rows,
        }
    }

    /// Horizontal lines drawn: one below every row except the last, the
    /// header included
    pub fn separator_count(&self) -> usize {
        self.rows
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn text_width(chars: usize, style: &StyleConfig) -> u32 {
    u32::try_from(chars)
        .unwrap_or(u32::MAX)
        .saturating_mul(style.char_width)
        .saturating_add(style.padding.saturating_mul(2))
}

/// Width of one panel, clamped to its character minimum and the pixel floor
pub fn panel_width(max_len: usize, min_chars: usize, style: &StyleConfig) -> u32 {
    text_width(max_len.max(min_chars), style).max(style.min_panel_width)
}

/// A rendered table: its geometry, SVG markup and inline data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableImage {
    pub layout: TableLayout,
    pub svg: String,
    pub data_uri: String,
}

impl TableImage {
    pub fn width(&self) -> u32 {
        self.layout.total_width
    }

    pub fn height(&self) -> u32 {
        self.layout.total_height
    }
}

/// Render a table into an inline SVG image
pub fn render(table_name: &str, columns: &[Column], style: &StyleConfig) -> TableImage {
    let layout = TableLayout::compute(table_name, columns, style);
    let svg = to_svg(table_name, columns, &layout, style);
    let data_uri = encode_data_uri(&svg);

    tracing::debug!(
        table = %table_name,
        width = layout.total_width,
        height = layout.total_height,
        "rendered table image"
    );

    TableImage {
        layout,
        svg,
        data_uri,
    }
}

/// Encode SVG markup as a base64 `data:` URI
pub fn encode_data_uri(svg: &str) -> String {
    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + svg.len() * 4 / 3 + 4);
    uri.push_str(DATA_URI_PREFIX);
    general_purpose::STANDARD.encode_string(svg.as_bytes(), &mut uri);
    uri
}

/// Decode a URI produced by [`encode_data_uri`] back into SVG markup
pub fn decode_data_uri(uri: &str) -> Option<String> {
    let payload = uri.strip_prefix(DATA_URI_PREFIX)?;
    let bytes = general_purpose::STANDARD.decode(payload).ok()?;
    String::from_utf8(bytes).ok()
}
