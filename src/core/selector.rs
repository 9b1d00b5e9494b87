use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PageError, PageResult};

/// Element lookup key of the page contract.
///
/// Only the two forms the page uses are supported: `#id` and `.class`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Selector {
    Id(String),
    Class(String),
}

impl Selector {
    pub fn parse(input: &str) -> PageResult<Self> {
        let input = input.trim();
        let mut chars = input.chars();
        let kind = chars.next();
        let name = chars.as_str();
        if name.is_empty() || !name.chars().all(is_name_char) {
            return Err(PageError::InvalidSelector(input.to_owned()));
        }
        match kind {
            Some('#') => Ok(Self::Id(name.to_owned())),
            Some('.') => Ok(Self::Class(name.to_owned())),
            _ => Err(PageError::InvalidSelector(input.to_owned())),
        }
    }

    #[must_use]
    pub fn id(name: impl Into<String>) -> Self {
        Self::Id(name.into())
    }

    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(name) => write!(f, "#{name}"),
            Self::Class(name) => write!(f, ".{name}"),
        }
    }
}

impl TryFrom<String> for Selector {
    type Error = PageError;

    fn try_from(value: String) -> PageResult<Self> {
        Self::parse(&value)
    }
}

impl From<Selector> for String {
    fn from(value: Selector) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::Selector;

    #[test]
    fn parses_id_and_class_forms() {
        assert_eq!(Selector::parse("#about").unwrap(), Selector::id("about"));
        assert_eq!(
            Selector::parse(".carousel-slide").unwrap(),
            Selector::class("carousel-slide")
        );
        assert_eq!(Selector::id("solarForm").to_string(), "#solarForm");
    }

    #[test]
    fn rejects_unsupported_forms() {
        for input in ["", "#", "about", "div > a", "#a b", "ä"] {
            assert!(Selector::parse(input).is_err(), "{input:?} must be rejected");
        }
    }
}
