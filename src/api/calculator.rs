use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Selector, parse_leading_float};
use crate::error::{PageError, PageResult};
use crate::host::{Document, ElementId, require_element};

use super::{CalculatorConfig, PageSelectors};

pub const DAYS_PER_MONTH: f64 = 30.0;

/// Panels needed to cover a monthly consumption, unchecked.
///
/// Zero sunlight or wattage yields `inf` or `NaN`; use [`SolarInputs::panels`]
/// for a validated count.
#[must_use]
pub fn panels_needed(
    monthly_usage_kwh: f64,
    sunlight_hours_per_day: f64,
    panel_wattage: f64,
) -> f64 {
    raw_panel_count(
        monthly_usage_kwh,
        sunlight_hours_per_day,
        panel_wattage,
        DAYS_PER_MONTH,
    )
}

fn raw_panel_count(
    monthly_usage_kwh: f64,
    sunlight_hours_per_day: f64,
    panel_wattage: f64,
    days_per_month: f64,
) -> f64 {
    let daily_energy_kwh = monthly_usage_kwh / days_per_month;
    let panel_daily_output_kwh = panel_wattage * sunlight_hours_per_day / 1000.0;
    (daily_energy_kwh / panel_daily_output_kwh).ceil()
}

/// One calculator submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarInputs {
    pub monthly_usage_kwh: f64,
    pub sunlight_hours_per_day: f64,
    pub panel_wattage: f64,
}

impl SolarInputs {
    #[must_use]
    pub fn new(monthly_usage_kwh: f64, sunlight_hours_per_day: f64, panel_wattage: f64) -> Self {
        Self {
            monthly_usage_kwh,
            sunlight_hours_per_day,
            panel_wattage,
        }
    }

    /// Daily yield of one panel, in kWh.
    #[must_use]
    pub fn panel_daily_output_kwh(self) -> f64 {
        self.panel_wattage * self.sunlight_hours_per_day / 1000.0
    }

    /// Whether sunlight hours and wattage are both strictly positive.
    #[must_use]
    pub fn has_positive_divisors(self) -> bool {
        self.sunlight_hours_per_day > 0.0 && self.panel_wattage > 0.0
    }

    /// Panel count, rejecting inputs that have no meaningful answer.
    ///
    /// Non-positive sunlight or wattage, negative usage and counts beyond
    /// `u64` are reported as `DegenerateInput` instead of producing `inf`,
    /// `NaN`, a negative or a saturated count.
    pub fn panels(self, days_per_month: f64) -> PageResult<u64> {
        if self.sunlight_hours_per_day.is_nan() || self.sunlight_hours_per_day <= 0.0 {
            return Err(PageError::DegenerateInput {
                reason: "sunlight hours per day must be > 0".to_owned(),
            });
        }
        if self.panel_wattage.is_nan() || self.panel_wattage <= 0.0 {
            return Err(PageError::DegenerateInput {
                reason: "panel wattage must be > 0".to_owned(),
            });
        }
        if self.monthly_usage_kwh.is_nan() || self.monthly_usage_kwh < 0.0 {
            return Err(PageError::DegenerateInput {
                reason: "monthly usage must be >= 0".to_owned(),
            });
        }

        let count = raw_panel_count(
            self.monthly_usage_kwh,
            self.sunlight_hours_per_day,
            self.panel_wattage,
            days_per_month,
        );
        // u64::MAX rounds up to 2^64 as f64, which does not fit.
        if !count.is_finite() || count >= u64::MAX as f64 {
            return Err(PageError::DegenerateInput {
                reason: format!("panel count is not representable: {count}"),
            });
        }
        Ok(count as u64)
    }
}

/// What a submission wrote into the result element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CalculatorOutcome {
    Panels { count: u64, message: String },
    InvalidInput { field: String, message: String },
    DegenerateInput { reason: String, message: String },
}

impl CalculatorOutcome {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Panels { message, .. }
            | Self::InvalidInput { message, .. }
            | Self::DegenerateInput { message, .. } => message,
        }
    }
}

/// Solar panel calculator bound to the page form.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarCalculator {
    form: ElementId,
    energy_usage: (Selector, ElementId),
    sunlight_hours: (Selector, ElementId),
    panel_wattage: (Selector, ElementId),
    result: ElementId,
    config: CalculatorConfig,
}

impl SolarCalculator {
    pub fn attach<D: Document + ?Sized>(
        document: &D,
        selectors: &PageSelectors,
        config: CalculatorConfig,
    ) -> PageResult<Self> {
        let field = |selector: &Selector| -> PageResult<(Selector, ElementId)> {
            Ok((selector.clone(), require_element(document, selector)?))
        };

        let calculator = Self {
            form: require_element(document, &selectors.calculator_form)?,
            energy_usage: field(&selectors.energy_usage_field)?,
            sunlight_hours: field(&selectors.sunlight_hours_field)?,
            panel_wattage: field(&selectors.panel_wattage_field)?,
            result: require_element(document, &selectors.calculator_result)?,
            config,
        };
        debug!("solar calculator attached");
        Ok(calculator)
    }

    #[must_use]
    pub fn form(&self) -> ElementId {
        self.form
    }

    #[must_use]
    pub fn result_element(&self) -> ElementId {
        self.result
    }

    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Reads all three fields. Fails with `InvalidInput` on the first field
    /// without a numeric value.
    pub fn read_inputs<D: Document + ?Sized>(&self, document: &D) -> PageResult<SolarInputs> {
        let read = |(selector, element): &(Selector, ElementId)| {
            document
                .value(*element)
                .as_deref()
                .and_then(parse_leading_float)
                .ok_or_else(|| PageError::InvalidInput {
                    field: selector.to_string(),
                })
        };

        Ok(SolarInputs::new(
            read(&self.energy_usage)?,
            read(&self.sunlight_hours)?,
            read(&self.panel_wattage)?,
        ))
    }

    /// Handles a form submission and writes the outcome message.
    pub fn on_submit<D: Document + ?Sized>(&self, document: &mut D) -> CalculatorOutcome {
        let outcome = match self.read_inputs(&*document) {
            Err(PageError::InvalidInput { field }) => {
                warn!(field = %field, "calculator field is not a number");
                CalculatorOutcome::InvalidInput {
                    field,
                    message: self.config.invalid_input_message.clone(),
                }
            }
            Err(err) => CalculatorOutcome::InvalidInput {
                field: err.to_string(),
                message: self.config.invalid_input_message.clone(),
            },
            Ok(inputs) => match inputs.panels(self.config.days_per_month) {
                Ok(count) => {
                    debug!(count, ?inputs, "panels estimated");
                    CalculatorOutcome::Panels {
                        count,
                        message: self.config.format_result(count),
                    }
                }
                Err(err) => {
                    let reason = match err {
                        PageError::DegenerateInput { reason } => reason,
                        other => other.to_string(),
                    };
                    warn!(reason = %reason, ?inputs, "degenerate calculator input");
                    let message = if inputs.has_positive_divisors() {
                        &self.config.usage_out_of_range_message
                    } else {
                        &self.config.degenerate_input_message
                    };
                    CalculatorOutcome::DegenerateInput {
                        reason,
                        message: message.clone(),
                    }
                }
            },
        };

        document.set_text_content(self.result, outcome.message());
        outcome
    }
}
