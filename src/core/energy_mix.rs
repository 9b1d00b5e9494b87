use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::core::primitives::decimal_to_f64;
use crate::error::{PageError, PageResult};

/// One category of the energy-mix dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyShare {
    /// Share of total consumption, in percent.
    pub value: Decimal,
    /// CSS colour of the wedge fill.
    pub fill_color: String,
    /// CSS colour of the wedge outline.
    pub border_color: String,
    pub border_width: f64,
}

impl EnergyShare {
    #[must_use]
    pub fn new(
        value: Decimal,
        fill_color: impl Into<String>,
        border_color: impl Into<String>,
        border_width: f64,
    ) -> Self {
        Self {
            value,
            fill_color: fill_color.into(),
            border_color: border_color.into(),
            border_width,
        }
    }
}

/// Read-only category → share mapping rendered by the energy chart.
///
/// `IndexMap` keeps declaration order, which is also legend and wedge order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyMix {
    label: String,
    shares: IndexMap<String, EnergyShare>,
}

impl EnergyMix {
    pub fn new(
        label: impl Into<String>,
        shares: impl IntoIterator<Item = (String, EnergyShare)>,
    ) -> PageResult<Self> {
        let mut map = IndexMap::new();
        for (category, share) in shares {
            if share.value.is_sign_negative() {
                return Err(PageError::InvalidData(format!(
                    "share of `{category}` must be >= 0"
                )));
            }
            if !share.border_width.is_finite() || share.border_width < 0.0 {
                return Err(PageError::InvalidData(format!(
                    "border width of `{category}` must be finite and >= 0"
                )));
            }
            if map.insert(category.clone(), share).is_some() {
                return Err(PageError::InvalidData(format!(
                    "duplicate category `{category}`"
                )));
            }
        }
        if map.is_empty() {
            return Err(PageError::InvalidData(
                "energy mix must contain at least one category".to_owned(),
            ));
        }
        Ok(Self {
            label: label.into(),
            shares: map,
        })
    }

    /// The global energy mix shown on the landing page.
    #[must_use]
    pub fn global_2025() -> Self {
        let shares = [
            ("Solar", 20, (255, 206, 86)),
            ("Wind", 15, (75, 192, 192)),
            ("Hydro", 10, (54, 162, 235)),
            ("Fossil", 45, (153, 102, 255)),
            ("Nuclear", 10, (255, 99, 132)),
        ]
        .into_iter()
        .map(|(category, value, (r, g, b))| {
            (
                category.to_owned(),
                EnergyShare::new(
                    Decimal::from(value),
                    format!("rgba({r}, {g}, {b}, 0.5)"),
                    format!("rgba({r}, {g}, {b}, 1)"),
                    1.0,
                ),
            )
        })
        .collect::<IndexMap<_, _>>();

        Self {
            label: "Global Energy Mix (%)".to_owned(),
            shares,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.shares.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnergyShare)> {
        self.shares.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<&EnergyShare> {
        self.shares.get(category)
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.shares.values().map(|share| share.value).sum()
    }

    /// Fraction of the whole taken by each category, in declaration order.
    pub fn fractions(&self) -> PageResult<Vec<f64>> {
        let total = decimal_to_f64(self.total(), "energy mix total")?;
        if total <= 0.0 {
            return Err(PageError::InvalidData(
                "energy mix total must be > 0".to_owned(),
            ));
        }
        self.shares
            .iter()
            .map(|(category, share)| Ok(decimal_to_f64(share.value, category)? / total))
            .collect()
    }
}
