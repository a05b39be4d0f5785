//! Integration tests for rendering.
//!
//! Assertions run against the serialized PDF, not the in-memory plan, so they
//! cover the writer as well as the layout.

use stickers::error::{ErrorKind, StickerError};
use stickers::layout::{plan, render, LayoutConfig, OverflowPolicy, PageGeometry, Point};
use stickers::record::StickerRecord;

use crate::common::fixtures::{acme, jpeg_logo, png_logo, sample_records, translucent_png};
use crate::common::init_test_logging;
use crate::common::pdf::{self, TextRun};

fn geometry() -> PageGeometry {
    PageGeometry::from_config(&LayoutConfig::default())
}

/// Record index of the cell each label was drawn in.
fn label_cells(runs: &[TextRun], label: &str) -> Vec<Option<usize>> {
    let geometry = geometry();
    runs.iter()
        .filter(|r| r.is_label() && r.text == label)
        .map(|r| geometry.cell_at(Point::new(r.x, r.y)))
        .collect()
}

#[test]
fn test_every_count_up_to_ten_renders() {
    init_test_logging();
    let config = LayoutConfig::default();
    for count in 0..=10 {
        let bytes = render(&sample_records(count), &config).unwrap();
        pdf::assert_well_formed(&bytes);
        assert_eq!(pdf::line_count(&bytes), 9, "grid for {count} records");
        let runs = pdf::texts(&bytes);
        assert_eq!(
            runs.iter().filter(|r| r.text == "CUSTOMER:").count(),
            count
        );
    }
}

#[test]
fn test_eleven_records_fail() {
    let err = render(&sample_records(11), &LayoutConfig::default()).unwrap_err();
    assert!(matches!(err, StickerError::TooManyStickers { count: 11, max: 10 }));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_output_is_deterministic() {
    let mut records = sample_records(7);
    records[2] = records[2].clone().with_logo(png_logo(64, 32, [10, 120, 200]));
    let config = LayoutConfig::default();
    let first = render(&records, &config).unwrap();
    let second = render(&records, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_fill_order_starts_bottom_left() {
    let bytes = render(&sample_records(10), &LayoutConfig::default()).unwrap();
    let runs = pdf::texts(&bytes);
    let cells = label_cells(&runs, "CUSTOMER:");
    let expected: Vec<_> = (0..10).map(Some).collect();
    assert_eq!(cells, expected);

    // Customer values follow the same order
    let values: Vec<_> = runs
        .iter()
        .filter(|r| r.text.starts_with("CUSTOMER "))
        .map(|r| r.text.clone())
        .collect();
    assert_eq!(values[0], "CUSTOMER 0");
    assert_eq!(values[9], "CUSTOMER 9");
}

#[test]
fn test_last_record_uses_formula_cell() {
    let geometry = geometry();
    for count in 1..=10 {
        let bytes = render(&sample_records(count), &LayoutConfig::default()).unwrap();
        let runs = pdf::texts(&bytes);
        let last = runs.iter().rfind(|r| r.text == "CUSTOMER:").unwrap();
        let cell = PageGeometry::cell_for_index(count - 1).unwrap();
        assert!(geometry
            .cell_rect(cell)
            .contains(Point::new(last.x, last.y)));
    }
}

#[test]
fn test_three_record_scenario() {
    let records = vec![acme(); 3];
    let bytes = render(&records, &LayoutConfig::default()).unwrap();
    let runs = pdf::texts(&bytes);
    let geometry = geometry();

    let mut filled: Vec<usize> = runs
        .iter()
        .filter_map(|r| geometry.cell_at(Point::new(r.x, r.y)))
        .collect();
    filled.sort_unstable();
    filled.dedup();
    assert_eq!(filled, vec![0, 1, 2]);
    assert_eq!(pdf::line_count(&bytes), 9);

    let first_cell: Vec<_> = runs
        .iter()
        .filter(|r| geometry.cell_at(Point::new(r.x, r.y)) == Some(0))
        .map(|r| r.text.as_str())
        .collect();
    assert_eq!(
        first_cell,
        vec![
            "CUSTOMER:",
            "ACME",
            "PRODUCT:",
            "WIDGET",
            "DESCRIPTION:",
            "BLUE WIDGET",
            "LAB REF #:",
            "01-2026-0001",
            "QUANTITY:",
            "10",
        ]
    );
}

#[test]
fn test_first_baseline_and_value_offset() {
    let bytes = render(&[acme()], &LayoutConfig::default()).unwrap();
    let runs = pdf::texts(&bytes);
    // cell 0 spans y 20..180.38; first baseline sits 14pt below its top
    assert_eq!(runs[0].text, "CUSTOMER:");
    assert!((runs[0].x - 32.0).abs() < 0.01);
    assert!((runs[0].y - 166.38).abs() < 0.01);
    assert_eq!(runs[0].font, "F2");
    // Helvetica-Bold "CUSTOMER:" is 60.55pt at 10pt, plus the 4pt gap
    assert_eq!(runs[1].font, "F1");
    assert!((runs[1].x - 96.55).abs() < 0.01);
    assert!((runs[1].y - runs[0].y).abs() < 0.01);
}

#[test]
fn test_short_value_is_one_line() {
    let bytes = render(&[acme()], &LayoutConfig::default()).unwrap();
    let runs = pdf::texts(&bytes);
    let values: Vec<_> = runs.iter().filter(|r| !r.is_label()).collect();
    assert_eq!(values.len(), 5);
}

#[test]
fn test_long_description_wraps_to_label_origin() {
    let config = LayoutConfig::default();
    let mut record = acme();
    record.description = "Precision machined aluminium housing with anodised finish \
        for the outdoor sensor array, second revision"
        .to_string();
    let bytes = render(&[record], &config).unwrap();
    let runs = pdf::texts(&bytes);

    let label = runs.iter().position(|r| r.text == "DESCRIPTION:").unwrap();
    let next_label = runs.iter().position(|r| r.text == "LAB REF #:").unwrap();
    let lines = &runs[label + 1..next_label];
    assert!(lines.len() > 1, "expected wrapping, got {lines:?}");

    let label_run = &runs[label];
    assert!((lines[0].y - label_run.y).abs() < 0.01);
    for (n, line) in lines.iter().enumerate().skip(1) {
        assert!((line.x - label_run.x).abs() < 0.01, "continuation not at label x");
        let expected_y = label_run.y - config.line_height * n as f32;
        assert!((line.y - expected_y).abs() < 0.02);
    }

    // The following label moves down by the extra lines
    let expected = label_run.y - config.line_height * lines.len() as f32;
    assert!((runs[next_label].y - expected).abs() < 0.02);
}

#[test]
fn test_quantity_never_wraps() {
    let mut record = acme();
    record.quantity = "12 boxes of 24 vials each, sealed, refrigerated, handle with care please".into();
    let bytes = render(&[record], &LayoutConfig::default()).unwrap();
    let runs = pdf::texts(&bytes);
    let label = runs.iter().position(|r| r.text == "QUANTITY:").unwrap();
    assert_eq!(runs.len(), label + 2);
    assert!(runs[label + 1].text.starts_with("12 BOXES"));
}

#[test]
fn test_logo_shifts_text_down() {
    let config = LayoutConfig::default();
    let plain = pdf::texts(&render(&[acme()], &config).unwrap());
    let with_logo = acme().with_logo(png_logo(240, 100, [0, 0, 0]));
    let bytes = render(&[with_logo], &config).unwrap();
    let runs = pdf::texts(&bytes);

    let images = pdf::images(&bytes);
    assert_eq!(images.len(), 1);
    let logo = &images[0];
    assert!((logo.width - 120.0).abs() < 0.01);
    assert!((logo.height - 50.0).abs() < 0.01);
    assert!((logo.x - 32.0).abs() < 0.01);
    // top 180.38 - inset 5 - height 50
    assert!((logo.y - 125.38).abs() < 0.01);

    assert!((runs[0].y - (logo.y - config.logo_text_gap)).abs() < 0.01);
    assert!(runs[0].y < plain[0].y);
    let embedded = pdf::image_objects(&bytes);
    assert_eq!(embedded.len(), 1);
    assert_eq!(embedded[0].filter, "DCTDecode");
}

#[test]
fn test_identical_logos_embedded_once() {
    let logo = png_logo(32, 32, [1, 2, 3]);
    let records: Vec<StickerRecord> = (0..4).map(|_| acme().with_logo(logo.clone())).collect();
    let bytes = render(&records, &LayoutConfig::default()).unwrap();
    assert_eq!(pdf::images(&bytes).len(), 4);
    assert_eq!(pdf::image_xobjects(&bytes), 1);
}

#[test]
fn test_translucent_and_jpeg_logos_accepted() {
    let records = vec![
        acme().with_logo(translucent_png(40, 20)),
        acme().with_logo(jpeg_logo(40, 20)),
    ];
    let bytes = render(&records, &LayoutConfig::default()).unwrap();
    pdf::assert_well_formed(&bytes);
    assert_eq!(pdf::image_xobjects(&bytes), 2);
}

#[test]
fn test_undecodable_logo_fails_whole_render() {
    let records = vec![acme(), acme().with_logo(b"not an image".to_vec())];
    let err = render(&records, &LayoutConfig::default()).unwrap_err();
    assert!(matches!(err, StickerError::ImageDecode { index: 1, .. }));
    assert_eq!(err.kind(), ErrorKind::ImageDecode);
}

#[test]
fn test_note_field_is_configurable() {
    let record = acme().with_note("Keep cold");
    let without = pdf::texts(&render(&[record.clone()], &LayoutConfig::default()).unwrap());
    assert!(without.iter().all(|r| r.text != "NOTE:"));

    let config = LayoutConfig {
        include_note: true,
        ..LayoutConfig::default()
    };
    let with = pdf::texts(&render(&[record], &config).unwrap());
    let note = with.iter().position(|r| r.text == "NOTE:").unwrap();
    assert_eq!(with[note + 1].text, "KEEP COLD");
}

#[test]
fn test_clip_policy_writes_clip_paths() {
    let config = LayoutConfig {
        overflow: OverflowPolicy::Clip,
        ..LayoutConfig::default()
    };
    let bytes = render(&sample_records(3), &config).unwrap();
    assert_eq!(pdf::clip_count(&bytes), 3);
    let allow = render(&sample_records(3), &LayoutConfig::default()).unwrap();
    assert_eq!(pdf::clip_count(&allow), 0);
}

#[test]
fn test_parentheses_are_escaped() {
    let mut record = acme();
    record.product = "Widget (large)".into();
    let bytes = render(&[record], &LayoutConfig::default()).unwrap();
    let runs = pdf::texts(&bytes);
    assert!(runs.iter().any(|r| r.text == "WIDGET (LARGE)"));
}

#[test]
fn test_micro_sign_survives_upper_casing() {
    let mut record = acme();
    record.quantity = "500 µL".into();
    record.description = "Buffer, 2 µg/ml".into();
    let bytes = render(&[record], &LayoutConfig::default()).unwrap();
    let runs = pdf::texts(&bytes);
    let quantity = runs.iter().position(|r| r.text == "QUANTITY:").unwrap();
    assert_eq!(runs[quantity + 1].text, "500 µL");
    assert!(runs.iter().any(|r| r.text == "BUFFER, 2 µG/ML"));
    assert!(runs.iter().all(|r| !r.text.contains('?')));
}

#[test]
fn test_huge_value_renders_without_overflow() {
    let mut record = acme();
    record.description = "W".repeat(5_000_000);
    let plan = plan(&[record], &LayoutConfig::default()).unwrap();
    // one unbreakable word sits alone beside its label
    assert!(plan.texts().any(|(_, text)| text.len() == 5_000_000));
}

#[test]
fn test_concurrent_renders_agree() {
    let records = sample_records(10);
    let expected = render(&records, &LayoutConfig::default()).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let records = records.clone();
            std::thread::spawn(move || render(&records, &LayoutConfig::default()).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
