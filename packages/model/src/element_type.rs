//! Structured element type.
//!
//! The wire form is a single token, either `"base"` or `"base:variant"`
//! (e.g. `"cyber-button:cb-3"`). It is parsed once into [`ElementType`] and
//! carried as a value from then on.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Base given to stored elements whose type token cannot be parsed
pub const UNKNOWN_BASE: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementType {
    pub base: String,
    pub variant: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementTypeError {
    #[error("Element type token is empty")]
    Empty,

    #[error("Element type token has an empty base: {0:?}")]
    EmptyBase(String),
}

impl ElementType {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            variant: None,
        }
    }

    pub fn with_variant(base: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            variant: Some(variant.into()),
        }
    }

    /// Same base, no preset
    pub fn without_variant(&self) -> Self {
        Self::new(self.base.clone())
    }
}

impl FromStr for ElementType {
    type Err = ElementTypeError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ElementTypeError::Empty);
        }

        let (base, variant) = match token.split_once(':') {
            Some((base, variant)) => (base.trim(), Some(variant.trim())),
            None => (token, None),
        };

        if base.is_empty() {
            return Err(ElementTypeError::EmptyBase(token.to_string()));
        }

        Ok(Self {
            base: base.to_string(),
            variant: variant.filter(|v| !v.is_empty()).map(str::to_string),
        })
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant {
            Some(variant) => write!(f, "{}:{}", self.base, variant),
            None => f.write_str(&self.base),
        }
    }
}

impl Serialize for ElementType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ElementType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        // A malformed token degrades the one element, not the whole document
        Ok(token.parse().unwrap_or_else(|error: ElementTypeError| {
            tracing::warn!(%error, "stored element type replaced with {}", UNKNOWN_BASE);
            ElementType::new(UNKNOWN_BASE)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_base() {
        let kind: ElementType = "heading".parse().unwrap();
        assert_eq!(kind, ElementType::new("heading"));
        assert_eq!(kind.to_string(), "heading");
    }

    #[test]
    fn test_parse_with_variant() {
        let kind: ElementType = "cyber-button:cb-3".parse().unwrap();
        assert_eq!(kind.base, "cyber-button");
        assert_eq!(kind.variant.as_deref(), Some("cb-3"));
        assert_eq!(kind.to_string(), "cyber-button:cb-3");
    }

    #[test]
    fn test_trailing_colon_means_no_variant() {
        let kind: ElementType = "button:".parse().unwrap();
        assert_eq!(kind, ElementType::new("button"));
    }

    #[test]
    fn test_rejects_empty_tokens() {
        assert_eq!("".parse::<ElementType>(), Err(ElementTypeError::Empty));
        assert!(matches!(
            ":cb-1".parse::<ElementType>(),
            Err(ElementTypeError::EmptyBase(_))
        ));
    }

    #[test]
    fn test_serde_uses_token_form() {
        let kind = ElementType::with_variant("card", "card-2");
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, "\"card:card-2\"");

        let back: ElementType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }

    #[test]
    fn test_malformed_stored_token_degrades_to_unknown() {
        for json in ["\"\"", "\":x\"", "\"  \""] {
            let kind: ElementType = serde_json::from_str(json).unwrap();
            assert_eq!(kind, ElementType::new(UNKNOWN_BASE), "{}", json);
        }
    }
}
