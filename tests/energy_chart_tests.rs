use std::f64::consts::TAU;

use approx::assert_relative_eq;
use rust_decimal::Decimal;
use solar_page::PageError;
use solar_page::api::{ChartKind, ChartOptions, EnergyChart, LegendPosition, build_pie_frame};
use solar_page::core::{EnergyMix, EnergyShare, Selector, Viewport};
use solar_page::host::{MemoryDocument, MemoryElement};
use solar_page::render::{Color, NullRenderer, TextHAlign};

fn attach_default() -> EnergyChart<NullRenderer> {
    let document = MemoryDocument::landing_page();
    EnergyChart::attach(
        &document,
        &Selector::id("energyChart"),
        NullRenderer::default(),
        EnergyMix::global_2025(),
        ChartOptions::default(),
    )
    .expect("chart attach")
}

#[test]
fn dataset_sums_to_one_hundred_in_declaration_order() {
    let dataset = EnergyMix::global_2025();
    assert_eq!(dataset.total(), Decimal::from(100));
    assert_eq!(
        dataset.categories().collect::<Vec<_>>(),
        ["Solar", "Wind", "Hydro", "Fossil", "Nuclear"]
    );
    assert_eq!(dataset.label(), "Global Energy Mix (%)");

    let solar = dataset.get("Solar").expect("solar share");
    assert_eq!(solar.value, Decimal::from(20));
    assert_eq!(solar.fill_color, "rgba(255, 206, 86, 0.5)");
    assert_eq!(solar.border_color, "rgba(255, 206, 86, 1)");
    assert_relative_eq!(solar.border_width, 1.0);
}

#[test]
fn chart_renders_exactly_once_at_attach() {
    let chart = attach_default();
    assert_eq!(chart.kind(), ChartKind::Pie);
    assert_eq!(chart.viewport(), Viewport::new(400, 400));

    let renderer = chart.into_renderer();
    assert_eq!(renderer.render_count, 1);
    assert_eq!(renderer.last_wedge_count, 5);
    // title + five legend labels
    assert_eq!(renderer.last_text_count, 6);
}

#[test]
fn wedge_sweeps_follow_dataset_shares() {
    let chart = attach_default();
    let frame = chart.frame();
    let expected = [0.20, 0.15, 0.10, 0.45, 0.10];

    let mut start = 0.0;
    for (wedge, share) in frame.wedges.iter().zip(expected) {
        assert_relative_eq!(wedge.start_angle, start, epsilon = 1e-9);
        assert_relative_eq!(wedge.sweep_angle, share * TAU, epsilon = 1e-9);
        start += wedge.sweep_angle;
    }
    assert_relative_eq!(start, TAU, epsilon = 1e-9);

    let fossil = frame.wedges[3];
    assert_eq!(fossil.fill_color, Color::from_rgba8(153, 102, 255, 0.5));
    assert_eq!(fossil.border_color, Color::from_rgba8(153, 102, 255, 1.0));
}

#[test]
fn title_and_legend_use_configured_text_and_color() {
    let chart = attach_default();
    let frame = chart.frame();
    let brown = Color::parse_css("#4a2c0b").expect("valid color");

    let title = &frame.texts[0];
    assert_eq!(title.text, "2025 Energy Consumption");
    assert_relative_eq!(title.font_size_px, 16.0);
    assert_eq!(title.color, brown);
    assert_eq!(title.h_align, TextHAlign::Center);

    let labels: Vec<&str> = frame.texts[1..].iter().map(|t| t.text.as_str()).collect();
    assert_eq!(labels, ["Solar", "Wind", "Hydro", "Fossil", "Nuclear"]);
    assert!(frame.texts[1..].iter().all(|t| t.color == brown));
    assert_eq!(frame.rects.len(), 5);

    // Legend sits between the title and the pie.
    let pie_top = frame.wedges[0].center_y - frame.wedges[0].radius;
    assert!(frame.rects.iter().all(|r| r.y > title.y && r.y + r.height <= pie_top));
}

#[test]
fn bottom_legend_and_hidden_title_change_layout() {
    let dataset = EnergyMix::global_2025();
    let mut options = ChartOptions::default();
    options.title.display = false;
    options.legend.position = LegendPosition::Bottom;

    let frame = build_pie_frame(Viewport::new(400, 400), &dataset, &options).expect("frame");
    assert_eq!(frame.texts.len(), 5);
    let pie_bottom = frame.wedges[0].center_y + frame.wedges[0].radius;
    assert!(frame.rects.iter().all(|r| r.y >= pie_bottom));
}

#[test]
fn zero_share_categories_draw_no_wedge() {
    let dataset = EnergyMix::new(
        "Test",
        [
            ("A".to_owned(), EnergyShare::new(Decimal::from(1), "#ff0000", "#ff0000", 1.0)),
            ("B".to_owned(), EnergyShare::new(Decimal::ZERO, "#00ff00", "#00ff00", 1.0)),
        ],
    )
    .expect("valid dataset");
    let frame = build_pie_frame(Viewport::new(300, 300), &dataset, &ChartOptions::default())
        .expect("frame");
    assert_eq!(frame.wedges.len(), 1);
    assert_relative_eq!(frame.wedges[0].sweep_angle, TAU, epsilon = 1e-9);
    assert_eq!(frame.rects.len(), 2, "legend still lists every category");
}

#[test]
fn invalid_datasets_are_rejected() {
    let duplicate = EnergyMix::new(
        "Dup",
        [
            ("A".to_owned(), EnergyShare::new(Decimal::from(1), "#000", "#000", 1.0)),
            ("A".to_owned(), EnergyShare::new(Decimal::from(2), "#000", "#000", 1.0)),
        ],
    );
    assert!(matches!(duplicate, Err(PageError::InvalidData(_))));

    let negative = EnergyMix::new(
        "Neg",
        [("A".to_owned(), EnergyShare::new(Decimal::from(-1), "#000", "#000", 1.0))],
    );
    assert!(negative.is_err());

    let empty = EnergyMix::new("Empty", Vec::<(String, EnergyShare)>::new());
    assert!(empty.is_err());
}

#[test]
fn missing_canvas_fails_setup_without_rendering() {
    let document = MemoryDocument::new();
    let err = EnergyChart::attach(
        &document,
        &Selector::id("energyChart"),
        NullRenderer::default(),
        EnergyMix::global_2025(),
        ChartOptions::default(),
    )
    .expect_err("no canvas");
    assert!(matches!(err, PageError::MissingElement { .. }));
}

#[test]
fn canvas_without_surface_fails_setup() {
    let mut document = MemoryDocument::new();
    document.push(MemoryElement::new().with_id("energyChart"));
    let err = EnergyChart::attach(
        &document,
        &Selector::id("energyChart"),
        NullRenderer::default(),
        EnergyMix::global_2025(),
        ChartOptions::default(),
    )
    .expect_err("no surface");
    assert!(matches!(err, PageError::SurfaceUnavailable { .. }));
}

#[test]
fn zero_sized_surface_is_an_invalid_viewport() {
    let mut document = MemoryDocument::new();
    document.push(
        MemoryElement::new()
            .with_id("energyChart")
            .with_surface(Viewport::new(0, 300)),
    );
    let err = EnergyChart::attach(
        &document,
        &Selector::id("energyChart"),
        NullRenderer::default(),
        EnergyMix::global_2025(),
        ChartOptions::default(),
    )
    .expect_err("zero width");
    assert!(matches!(err, PageError::InvalidViewport { width: 0, height: 300 }));
}
