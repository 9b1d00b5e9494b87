use std::f64::consts::TAU;

use crate::core::Viewport;
use crate::error::{PageError, PageResult};
use crate::render::{RectPrimitive, TextPrimitive, WedgePrimitive};

const ANGLE_EPSILON: f64 = 1e-9;

/// Everything a backend draws for the energy chart.
///
/// Wedges form one pie: they share a centre and radius and follow each other
/// clockwise without gaps. Rects are legend swatches, texts are the title and
/// legend labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub wedges: Vec<WedgePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            wedges: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_wedge(mut self, wedge: WedgePrimitive) -> Self {
        self.wedges.push(wedge);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    /// Angle covered by all wedges together, in radians.
    #[must_use]
    pub fn total_sweep(&self) -> f64 {
        self.wedges.iter().map(|wedge| wedge.sweep_angle).sum()
    }

    /// Checks every primitive and the pie shape formed by the wedges.
    pub fn validate(&self) -> PageResult<()> {
        if !self.viewport.is_valid() {
            return Err(PageError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for wedge in &self.wedges {
            wedge.validate()?;
        }
        self.validate_pie_shape()?;
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    fn validate_pie_shape(&self) -> PageResult<()> {
        let Some(first) = self.wedges.first() else {
            return Ok(());
        };

        let mut expected_start = first.start_angle;
        for wedge in &self.wedges {
            if wedge.center_x != first.center_x
                || wedge.center_y != first.center_y
                || wedge.radius != first.radius
            {
                return Err(PageError::InvalidData(
                    "pie wedges must share one centre and radius".to_owned(),
                ));
            }
            if (wedge.start_angle - expected_start).abs() > ANGLE_EPSILON {
                return Err(PageError::InvalidData(format!(
                    "pie wedge starts at {} but the previous one ends at {expected_start}",
                    wedge.start_angle
                )));
            }
            expected_start = wedge.end_angle();
        }

        let total = self.total_sweep();
        if total > TAU + ANGLE_EPSILON {
            return Err(PageError::InvalidData(format!(
                "pie wedges cover {total} rad, more than one turn"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wedges.is_empty() && self.rects.is_empty() && self.texts.is_empty()
    }
}
