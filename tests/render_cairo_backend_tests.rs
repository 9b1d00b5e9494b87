#![cfg(feature = "cairo-backend")]

use solar_page::PageError;
use solar_page::api::{ChartOptions, EnergyChart};
use solar_page::core::{EnergyMix, Selector};
use solar_page::host::MemoryDocument;
use solar_page::render::{Color, CairoRenderer};

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 400).expect_err("invalid width must fail");
    assert!(matches!(err, PageError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_energy_chart() {
    let document = MemoryDocument::landing_page();
    let renderer = CairoRenderer::new(400, 400).expect("renderer");
    let chart = EnergyChart::attach(
        &document,
        &Selector::id("energyChart"),
        renderer,
        EnergyMix::global_2025(),
        ChartOptions::default(),
    )
    .expect("chart attach");

    let stats = chart.renderer().last_stats();
    assert_eq!(stats.wedges_drawn, 5);
    assert_eq!(stats.rects_drawn, 5);
    assert_eq!(stats.texts_drawn, 6);

    let mut png = Vec::new();
    chart.renderer().write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn cairo_renderer_rejects_invalid_clear_color() {
    let mut renderer = CairoRenderer::new(10, 10).expect("renderer");
    let err = renderer
        .set_clear_color(Color::rgba(2.0, 0.0, 0.0, 1.0))
        .expect_err("out-of-range channel");
    assert!(matches!(err, PageError::InvalidData(_)));
}
