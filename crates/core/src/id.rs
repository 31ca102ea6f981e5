//! Strongly-typed identifiers used across the domain.

use core::num::ParseIntError;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog entry.
///
/// Codes come straight from the catalog file and from typed commands, so the
/// inner value is whatever integer the user wrote, negative included.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(i64);

impl ProductCode {
    pub fn new(code: i64) -> Self {
        Self(code)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for ProductCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ProductCode {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for ProductCode {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_negative_integers() {
        assert_eq!("42".parse::<ProductCode>().unwrap(), ProductCode::new(42));
        assert_eq!("-7".parse::<ProductCode>().unwrap(), ProductCode::new(-7));
    }

    #[test]
    fn rejects_non_integer_text() {
        assert!("4.2".parse::<ProductCode>().is_err());
        assert!("12 34".parse::<ProductCode>().is_err());
        assert!("".parse::<ProductCode>().is_err());
    }

    #[test]
    fn orders_numerically() {
        assert!(ProductCode::new(9) < ProductCode::new(10));
    }
}
