use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{EnergyMix, Selector, Viewport};
use crate::error::{PageError, PageResult};
use crate::host::{Document, ElementId, require_element};
use crate::render::{RenderFrame, Renderer};

use super::ChartOptions;
use super::pie_frame_builder::build_pie_frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
}

/// One-shot energy-mix pie chart.
///
/// The frame is built and handed to the renderer once, at attach time. There
/// is no update path afterwards.
#[derive(Debug)]
pub struct EnergyChart<R: Renderer> {
    canvas: ElementId,
    viewport: Viewport,
    dataset: EnergyMix,
    options: ChartOptions,
    frame: RenderFrame,
    renderer: R,
}

impl<R: Renderer> EnergyChart<R> {
    pub fn attach<D: Document + ?Sized>(
        document: &D,
        canvas_selector: &Selector,
        mut renderer: R,
        dataset: EnergyMix,
        options: ChartOptions,
    ) -> PageResult<Self> {
        let canvas = require_element(document, canvas_selector)?;
        let viewport =
            document
                .surface_size(canvas)
                .ok_or_else(|| PageError::SurfaceUnavailable {
                    selector: canvas_selector.to_string(),
                })?;

        let frame = build_pie_frame(viewport, &dataset, &options)?;
        renderer.render(&frame)?;
        debug!(
            width = viewport.width,
            height = viewport.height,
            categories = dataset.len(),
            wedges = frame.wedges.len(),
            "energy chart rendered"
        );

        Ok(Self {
            canvas,
            viewport,
            dataset,
            options,
            frame,
            renderer,
        })
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        ChartKind::Pie
    }

    #[must_use]
    pub fn canvas(&self) -> ElementId {
        self.canvas
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn dataset(&self) -> &EnergyMix {
        &self.dataset
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// The frame handed to the renderer.
    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
