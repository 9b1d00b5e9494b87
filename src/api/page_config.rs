use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::Selector;
use crate::error::{PageError, PageResult};
use crate::render::Color;

pub const PAGE_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Placeholder replaced by the computed panel count in result messages.
pub const PANELS_PLACEHOLDER: &str = "{panels}";

/// Element lookup keys of the page contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSelectors {
    pub nav_link: Selector,
    pub carousel_container: Selector,
    pub carousel_slide: Selector,
    pub carousel_prev: Selector,
    pub carousel_next: Selector,
    pub chart_canvas: Selector,
    pub calculator_form: Selector,
    pub energy_usage_field: Selector,
    pub sunlight_hours_field: Selector,
    pub panel_wattage_field: Selector,
    pub calculator_result: Selector,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            nav_link: Selector::class("nav-link"),
            carousel_container: Selector::class("carousel-container"),
            carousel_slide: Selector::class("carousel-slide"),
            carousel_prev: Selector::class("prev-btn"),
            carousel_next: Selector::class("next-btn"),
            chart_canvas: Selector::id("energyChart"),
            calculator_form: Selector::id("solarForm"),
            energy_usage_field: Selector::id("energyUsage"),
            sunlight_hours_field: Selector::id("sunlightHours"),
            panel_wattage_field: Selector::id("panelWattage"),
            calculator_result: Selector::id("result"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub auto_advance_interval_ms: u64,
    /// Minimum horizontal travel, exclusive, for a touch gesture to count as a swipe.
    pub swipe_threshold_px: f64,
    /// Horizontal offset of one slide, in percent of the container width.
    pub slide_offset_percent: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_advance_interval_ms: 6_000,
            swipe_threshold_px: 50.0,
            slide_offset_percent: 100.0,
        }
    }
}

impl CarouselConfig {
    #[must_use]
    pub fn auto_advance_interval(self) -> Duration {
        Duration::from_millis(self.auto_advance_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub days_per_month: f64,
    pub invalid_input_message: String,
    /// Shown when sunlight hours or panel wattage is not positive.
    pub degenerate_input_message: String,
    /// Shown when usage is negative or too large for a panel count.
    pub usage_out_of_range_message: String,
    /// Result sentence; `{panels}` is replaced by the panel count.
    pub result_template: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            days_per_month: 30.0,
            invalid_input_message: "Please enter valid numbers.".to_owned(),
            degenerate_input_message:
                "Sunlight hours and panel wattage must be greater than zero.".to_owned(),
            usage_out_of_range_message:
                "Monthly energy usage must be zero or more and within a realistic range."
                    .to_owned(),
            result_template: "You need approximately {panels} solar panels.".to_owned(),
        }
    }
}

impl CalculatorConfig {
    #[must_use]
    pub fn format_result(&self, panels: u64) -> String {
        self.result_template
            .replace(PANELS_PLACEHOLDER, &panels.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendOptions {
    pub display: bool,
    pub position: LegendPosition,
    pub label_color: String,
    pub font_size_px: f64,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            display: true,
            position: LegendPosition::Top,
            label_color: "#4a2c0b".to_owned(),
            font_size_px: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
    pub color: String,
    pub font_size_px: f64,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            display: true,
            text: "2025 Energy Consumption".to_owned(),
            color: "#4a2c0b".to_owned(),
            font_size_px: 16.0,
        }
    }
}

/// Entry animation hints. Recorded for hosts; frames themselves are static.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    pub animate_scale: bool,
    pub animate_rotate: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            animate_scale: true,
            animate_rotate: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub responsive: bool,
    pub legend: LegendOptions,
    pub title: TitleOptions,
    pub animation: AnimationOptions,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            legend: LegendOptions::default(),
            title: TitleOptions::default(),
            animation: AnimationOptions::default(),
        }
    }
}

/// Complete page bootstrap configuration.
///
/// Every field defaults to the shipped landing page, so a host only spells
/// out what it changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub selectors: PageSelectors,
    pub carousel: CarouselConfig,
    pub calculator: CalculatorConfig,
    pub chart: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: PageConfig,
}

impl PageConfig {
    pub fn validate(&self) -> PageResult<()> {
        let carousel = self.carousel;
        if carousel.auto_advance_interval_ms == 0 {
            return Err(PageError::InvalidConfig(
                "carousel auto-advance interval must be > 0".to_owned(),
            ));
        }
        if !carousel.swipe_threshold_px.is_finite() || carousel.swipe_threshold_px < 0.0 {
            return Err(PageError::InvalidConfig(
                "swipe threshold must be finite and >= 0".to_owned(),
            ));
        }
        if !carousel.slide_offset_percent.is_finite() || carousel.slide_offset_percent <= 0.0 {
            return Err(PageError::InvalidConfig(
                "slide offset must be finite and > 0".to_owned(),
            ));
        }

        let days = self.calculator.days_per_month;
        if !days.is_finite() || days <= 0.0 {
            return Err(PageError::InvalidConfig(
                "days per month must be finite and > 0".to_owned(),
            ));
        }
        if !self.calculator.result_template.contains(PANELS_PLACEHOLDER) {
            return Err(PageError::InvalidConfig(format!(
                "result template must contain `{PANELS_PLACEHOLDER}`"
            )));
        }

        for (name, size) in [
            ("title", self.chart.title.font_size_px),
            ("legend", self.chart.legend.font_size_px),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(PageError::InvalidConfig(format!(
                    "{name} font size must be finite and > 0"
                )));
            }
        }
        for color in [&self.chart.title.color, &self.chart.legend.label_color] {
            Color::parse_css(color)
                .map_err(|err| PageError::InvalidConfig(err.to_string()))?;
        }
        Ok(())
    }

    pub fn to_json_contract_v1_pretty(&self) -> PageResult<String> {
        let payload = PageConfigJsonContractV1 {
            schema_version: PAGE_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PageError::InvalidConfig(format!(
                "failed to serialize page config contract v1: {e}"
            ))
        })
    }

    /// Accepts either a bare config object or a versioned v1 contract.
    pub fn from_json_compat_str(input: &str) -> PageResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            PageError::InvalidConfig(format!("failed to parse page config json: {e}"))
        })?;

        let config = if value.get("schema_version").is_some() {
            let payload: PageConfigJsonContractV1 = serde_json::from_value(value).map_err(|e| {
                PageError::InvalidConfig(format!("failed to parse page config contract: {e}"))
            })?;
            if payload.schema_version != PAGE_CONFIG_JSON_SCHEMA_V1 {
                return Err(PageError::InvalidConfig(format!(
                    "unsupported page config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        } else {
            serde_json::from_value(value).map_err(|e| {
                PageError::InvalidConfig(format!("failed to parse page config: {e}"))
            })?
        };

        config.validate()?;
        Ok(config)
    }
}
