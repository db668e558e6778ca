//! Tests for table image rendering through the public API.

use sql_erd::config::StyleConfig;
use sql_erd::render::{decode_data_uri, panel_width, render, TableLayout, DATA_URI_PREFIX};
use sql_erd::schema::Column;

fn columns(pairs: &[(&str, &str)]) -> Vec<Column> {
    pairs.iter().map(|(n, t)| Column::new(*n, *t)).collect()
}

#[test]
fn test_zero_columns_is_header_only() {
    let style = StyleConfig::default();
    let image = render("empty", &[], &style);

    assert_eq!(image.height(), style.row_height);
    assert_eq!(image.layout.rows, 0);
    assert_eq!(image.layout.separator_count(), 0);
    assert!(image.svg.contains(">empty</text>"));
}

#[test]
fn test_height_grows_one_row_per_column() {
    let style = StyleConfig::default();
    for n in 0..6 {
        let cols: Vec<Column> = (0..n)
            .map(|i| Column::new(format!("c{}", i), "INT"))
            .collect();
        let layout = TableLayout::compute("t", &cols, &style);
        assert_eq!(layout.total_height, style.row_height * (n as u32 + 1));
        assert_eq!(layout.separator_count(), n);
    }
}

#[test]
fn test_width_covers_header_and_panels() {
    let style = StyleConfig::default();
    let cases = [
        ("t", columns(&[("id", "INT")])),
        (
            "a_table_name_that_is_far_longer_than_thirty_characters",
            columns(&[("id", "INT")]),
        ),
        (
            "t",
            columns(&[("a_column_name_well_beyond_the_thirty_minimum", "INT")]),
        ),
        ("t", columns(&[("id", "CHARACTER VARYING(1024)")])),
    ];

    for (name, cols) in &cases {
        let layout = TableLayout::compute(name, cols, &style);
        assert!(layout.total_width >= layout.header_width, "{}", name);
        assert_eq!(
            layout.total_width,
            layout.name_panel_width + layout.type_panel_width,
            "{}",
            name
        );
        assert!(layout.name_panel_width >= panel_width(0, style.min_name_chars, &style));
        assert!(layout.type_panel_width >= panel_width(0, style.min_type_chars, &style));
    }
}

#[test]
fn test_panel_width_is_monotonic() {
    let style = StyleConfig::default();
    let mut previous = 0;
    for len in 0..80 {
        let width = panel_width(len, style.min_name_chars, &style);
        assert!(width >= previous);
        assert!(width >= style.min_panel_width);
        previous = width;
    }
}

#[test]
fn test_column_lengthening_widens_only_its_panel() {
    let style = StyleConfig::default();
    let short = TableLayout::compute("t", &columns(&[("id", "INT")]), &style);
    let long_type = TableLayout::compute(
        "t",
        &columns(&[("id", "TIMESTAMP WITH TIME ZONE")]),
        &style,
    );

    assert_eq!(short.name_panel_width, long_type.name_panel_width);
    assert!(long_type.type_panel_width > short.type_panel_width);
}

#[test]
fn test_data_uri_decodes_to_matching_svg() {
    let style = StyleConfig::default();
    let image = render(
        "orders",
        &columns(&[("id", "INT"), ("customer_id", "INT"), ("total", "DECIMAL(10,2)")]),
        &style,
    );

    assert!(image.data_uri.starts_with(DATA_URI_PREFIX));
    let svg = decode_data_uri(&image.data_uri).unwrap();
    assert_eq!(svg, image.svg);
    assert!(svg.contains(&format!("width=\"{}\"", image.width())));
    assert!(svg.contains(&format!("height=\"{}\"", image.height())));
    assert!(svg.contains(">customer_id</text>"));
    assert!(svg.contains(">DECIMAL(10,2)</text>"));
}

#[test]
fn test_rendering_is_deterministic() {
    let style = StyleConfig::default();
    let cols = columns(&[("id", "INT"), ("name", "TEXT")]);
    assert_eq!(render("t", &cols, &style), render("t", &cols, &style));
}

#[test]
fn test_style_overrides_change_geometry() {
    let style = StyleConfig {
        row_height: 30,
        char_width: 8,
        min_name_chars: 10,
        ..StyleConfig::default()
    };
    let layout = TableLayout::compute("t", &columns(&[("id", "INT")]), &style);

    assert_eq!(layout.total_height, 60);
    // 10 * 8 + 20
    assert_eq!(layout.name_panel_width, 100);
}
