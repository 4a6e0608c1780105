use crate::error::{HelpdeskError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static MOBILE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9]\d{9}$").expect("mobile pattern is valid"));

/// A validated 10-digit mobile number whose first digit is 6-9
///
/// Mobile numbers identify users and submitters. The only way to obtain one
/// is through [`Mobile::parse`] (or deserialization, which goes through the
/// same check), so any `Mobile` held by the service is already valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Mobile(String);

impl Mobile {
    /// Validate and wrap a mobile number
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if MOBILE_PATTERN.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(HelpdeskError::InvalidMobile(value.to_string()))
        }
    }

    /// Known-valid number used by fixtures and the demo seed
    pub(crate) fn demo() -> Self {
        Self("9876543210".to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Mobile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Mobile {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Mobile {
    type Error = HelpdeskError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Mobile> for String {
    fn from(mobile: Mobile) -> Self {
        mobile.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_mobiles() {
        for value in ["9876543210", "6000000000", "7654321098", " 8765432109 "] {
            assert!(Mobile::parse(value).is_ok(), "{value} should be valid");
        }
    }

    #[test]
    fn test_invalid_mobiles() {
        for value in ["5876543210", "987654321", "98765432101", "98765abcde", ""] {
            assert!(
                matches!(Mobile::parse(value), Err(HelpdeskError::InvalidMobile(_))),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_deserialize_rejects_invalid_mobile() {
        let parsed: std::result::Result<Mobile, _> = serde_json::from_str("\"1234567890\"");
        assert!(parsed.is_err());

        let parsed: Mobile = serde_json::from_str("\"9876543210\"").unwrap();
        assert_eq!(parsed.as_str(), "9876543210");
    }
}
