use std::f64::consts::TAU;

use smallvec::SmallVec;

use crate::core::{EnergyMix, Viewport};
use crate::error::{PageError, PageResult};
use crate::render::{
    Color, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive, WedgePrimitive,
};

use super::{ChartOptions, LegendPosition};

const PADDING_PX: f64 = 10.0;
const TITLE_GAP_PX: f64 = 10.0;
const LEGEND_SWATCH_WIDTH_PX: f64 = 40.0;
const LEGEND_SWATCH_GAP_PX: f64 = 6.0;
const LEGEND_ITEM_SPACING_PX: f64 = 10.0;
const LEGEND_ROW_GAP_PX: f64 = 8.0;
// Average glyph advance relative to font size for the sans fonts backends use.
const GLYPH_ADVANCE_RATIO: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
struct LegendItem {
    label: String,
    fill_color: Color,
    border_color: Color,
    border_width: f64,
    width: f64,
}

type LegendRow = SmallVec<[LegendItem; 8]>;

/// Builds the static pie frame: optional title, optional legend and one wedge
/// per non-zero category, clockwise from 12 o'clock in declaration order.
pub fn build_pie_frame(
    viewport: Viewport,
    dataset: &EnergyMix,
    options: &ChartOptions,
) -> PageResult<RenderFrame> {
    if !viewport.is_valid() {
        return Err(PageError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    let mut frame = RenderFrame::new(viewport);
    let mut top = PADDING_PX;
    let mut bottom = height - PADDING_PX;

    if options.title.display && !options.title.text.is_empty() {
        let color = Color::parse_css(&options.title.color)?;
        frame = frame.with_text(TextPrimitive::new(
            options.title.text.clone(),
            width / 2.0,
            top,
            options.title.font_size_px,
            color,
            TextHAlign::Center,
        ));
        top += options.title.font_size_px + TITLE_GAP_PX;
    }

    if options.legend.display {
        let rows = layout_legend_rows(dataset, options, width - 2.0 * PADDING_PX)?;
        let row_height = options.legend.font_size_px + LEGEND_ROW_GAP_PX;
        let legend_height = rows.len() as f64 * row_height;
        let legend_top = match options.legend.position {
            LegendPosition::Top => {
                let legend_top = top;
                top += legend_height;
                legend_top
            }
            LegendPosition::Bottom => {
                bottom -= legend_height;
                bottom
            }
        };
        let label_color = Color::parse_css(&options.legend.label_color)?;
        for (row_index, row) in rows.iter().enumerate() {
            let row_width: f64 = row.iter().map(|item| item.width).sum::<f64>()
                - LEGEND_ITEM_SPACING_PX;
            let y = legend_top + row_index as f64 * row_height;
            let mut x = (width - row_width) / 2.0;
            for item in row {
                frame = frame
                    .with_rect(
                        RectPrimitive::new(
                            x,
                            y,
                            LEGEND_SWATCH_WIDTH_PX,
                            options.legend.font_size_px,
                            item.fill_color,
                        )
                        .with_border(item.border_width, item.border_color),
                    )
                    .with_text(TextPrimitive::new(
                        item.label.clone(),
                        x + LEGEND_SWATCH_WIDTH_PX + LEGEND_SWATCH_GAP_PX,
                        y,
                        options.legend.font_size_px,
                        label_color,
                        TextHAlign::Left,
                    ));
                x += item.width;
            }
        }
    }

    let plot_height = bottom - top;
    let radius = (width - 2.0 * PADDING_PX).min(plot_height) / 2.0;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(PageError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let center_x = width / 2.0;
    let center_y = top + plot_height / 2.0;

    let fractions = dataset.fractions()?;
    let mut start_angle = 0.0;
    for ((_, share), fraction) in dataset.iter().zip(fractions) {
        let sweep_angle = fraction * TAU;
        if sweep_angle <= 0.0 {
            continue;
        }
        frame = frame.with_wedge(WedgePrimitive {
            center_x,
            center_y,
            radius,
            start_angle,
            sweep_angle,
            fill_color: Color::parse_css(&share.fill_color)?,
            border_color: Color::parse_css(&share.border_color)?,
            border_width: share.border_width,
        });
        start_angle += sweep_angle;
    }

    frame.validate()?;
    Ok(frame)
}

fn layout_legend_rows(
    dataset: &EnergyMix,
    options: &ChartOptions,
    max_row_width: f64,
) -> PageResult<Vec<LegendRow>> {
    let font_size = options.legend.font_size_px;
    let mut rows: Vec<LegendRow> = Vec::new();
    let mut current = LegendRow::new();
    let mut current_width = 0.0;

    for (category, share) in dataset.iter() {
        let label_width = category.chars().count() as f64 * font_size * GLYPH_ADVANCE_RATIO;
        let item_width =
            LEGEND_SWATCH_WIDTH_PX + LEGEND_SWATCH_GAP_PX + label_width + LEGEND_ITEM_SPACING_PX;
        if !current.is_empty() && current_width + item_width > max_row_width {
            rows.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        current.push(LegendItem {
            label: category.to_owned(),
            fill_color: Color::parse_css(&share.fill_color)?,
            border_color: Color::parse_css(&share.border_color)?,
            border_width: share.border_width,
            width: item_width,
        });
        current_width += item_width;
    }
    if !current.is_empty() {
        rows.push(current);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use super::build_pie_frame;
    use crate::api::ChartOptions;
    use crate::core::{EnergyMix, Viewport};

    #[test]
    fn wedges_cover_one_full_turn_in_order() {
        let dataset = EnergyMix::global_2025();
        let frame =
            build_pie_frame(Viewport::new(400, 400), &dataset, &ChartOptions::default()).unwrap();

        assert_eq!(frame.wedges.len(), 5);
        let mut expected_start = 0.0;
        for wedge in &frame.wedges {
            assert!((wedge.start_angle - expected_start).abs() < 1e-9);
            expected_start = wedge.end_angle();
        }
        assert!((expected_start - TAU).abs() < 1e-9);
    }

    #[test]
    fn tiny_viewport_cannot_fit_the_pie() {
        let dataset = EnergyMix::global_2025();
        let frame = build_pie_frame(Viewport::new(400, 40), &dataset, &ChartOptions::default());
        assert!(frame.is_err());
    }
}
