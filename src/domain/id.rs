//! Domain identifier types with proper encapsulation.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Affiliate account identifier - newtype for type safety.
///
/// The exchange issues numeric ids, but rebate exports are treated as opaque
/// text. Ordering is numeric when both sides are digit strings and falls back
/// to lexical ordering otherwise, so `"9" < "10"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create a new `AccountId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse an id written as an integer or an integral float (`"123.0"`).
    ///
    /// Returns `None` for blank, signed, fractional or non-numeric input.
    /// Leading zeros are dropped so `"007"` and `"7"` name the same account.
    #[must_use]
    pub fn parse_numeric(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw, ""));

        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if !frac_part.bytes().all(|b| b == b'0') {
            return None;
        }

        let trimmed = int_part.trim_start_matches('0');
        Some(Self::new(if trimmed.is_empty() { "0" } else { trimmed }))
    }

    /// Get the account ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn digits(&self) -> Option<&str> {
        if !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit()) {
            Some(self.0.trim_start_matches('0'))
        } else {
            None
        }
    }
}

impl Ord for AccountId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.digits(), other.digits()) {
            (Some(a), Some(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| a.cmp(b))
                .then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for AccountId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numeric_accepts_integral_floats() {
        assert_eq!(AccountId::parse_numeric("123"), Some(AccountId::from("123")));
        assert_eq!(AccountId::parse_numeric("123.0"), Some(AccountId::from("123")));
        assert_eq!(AccountId::parse_numeric(" 0042 "), Some(AccountId::from("42")));
        assert_eq!(AccountId::parse_numeric("0"), Some(AccountId::from("0")));
    }

    #[test]
    fn parse_numeric_rejects_non_identifiers() {
        assert_eq!(AccountId::parse_numeric(""), None);
        assert_eq!(AccountId::parse_numeric("abc"), None);
        assert_eq!(AccountId::parse_numeric("12.5"), None);
        assert_eq!(AccountId::parse_numeric("-3"), None);
        assert_eq!(AccountId::parse_numeric(".0"), None);
    }

    #[test]
    fn numeric_ids_order_by_value() {
        let mut ids = vec![
            AccountId::from("100"),
            AccountId::from("9"),
            AccountId::from("alice"),
            AccountId::from("20"),
        ];
        ids.sort();

        let ordered: Vec<&str> = ids.iter().map(AccountId::as_str).collect();
        assert_eq!(ordered, vec!["9", "20", "100", "alice"]);
    }
}
