//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up identifiers from
//! different entity types at compile time. All ids are sequential integers
//! assigned by the owning repository.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate numeric ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $inner:ty, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Wrap a raw id value
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Get the raw id value
            pub const fn value(&self) -> $inner {
                self.0
            }

            /// The id following this one, `None` once the id space is spent
            pub fn checked_next(&self) -> Option<Self> {
                self.0.checked_add(1).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s
                    .strip_prefix($display_prefix)
                    .or_else(|| s.strip_prefix(&$display_prefix.to_lowercase()))
                    .unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(ClientId, u64, "");
define_id!(AccountNumber, u32, "");
define_id!(ServiceId, u32, "S");
define_id!(AtmId, u32, "ATM");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(ClientId::new(42).to_string(), "42");
        assert_eq!(ServiceId::new(1).to_string(), "S1");
        assert_eq!(AtmId::new(7).to_string(), "ATM7");
    }

    #[test]
    fn test_id_parse_with_and_without_prefix() {
        assert_eq!("S3".parse::<ServiceId>().unwrap(), ServiceId::new(3));
        assert_eq!("s3".parse::<ServiceId>().unwrap(), ServiceId::new(3));
        assert_eq!("3".parse::<ServiceId>().unwrap(), ServiceId::new(3));
        assert_eq!(" 12 ".parse::<ClientId>().unwrap(), ClientId::new(12));
        assert!("x1".parse::<AccountNumber>().is_err());
    }

    #[test]
    fn test_next_and_ordering() {
        let first = AccountNumber::new(1);
        assert_eq!(first.checked_next(), Some(AccountNumber::new(2)));
        assert!(Some(first) < first.checked_next());
        assert_eq!(AccountNumber::new(u32::MAX).checked_next(), None);
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let json = serde_json::to_string(&ServiceId::new(5)).unwrap();
        assert_eq!(json, "5");
        let id: ServiceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, ServiceId::new(5));
    }
}
