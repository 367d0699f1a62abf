//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a SupplierId where a CategoryId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(CategoryId);
define_id!(SupplierId);

/// Identifier of a toast within its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(u64);

impl ToastId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw sequence number.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("12");
        assert_eq!(id.as_str(), "12");
    }

    #[test]
    fn test_id_from_string() {
        let id: CategoryId = "bags".into();
        assert_eq!(id.as_str(), "bags");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = SupplierId::new("acme");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"acme\"");
        let back: SupplierId = serde_json::from_str("\"acme\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_equality() {
        assert_eq!(ProductId::new("same"), ProductId::new("same"));
        assert_ne!(ProductId::new("same"), ProductId::new("different"));
    }
}
