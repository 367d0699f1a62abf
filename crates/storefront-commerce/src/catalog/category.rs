//! Category and supplier lookup entries.

use crate::ids::{CategoryId, SupplierId};
use serde::{Deserialize, Serialize};

/// Selector value that matches every category or supplier.
pub const ALL: &str = "all";

/// A product category shown as a filter button.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique category identifier, referenced by products.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Optional icon name for the filter button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
        }
    }
}

/// A supplier shown in the supplier dropdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Supplier {
    /// Unique supplier identifier, referenced by products.
    pub id: SupplierId,
    /// Display name.
    pub name: String,
}

impl Supplier {
    pub fn new(id: impl Into<SupplierId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_deserializes_without_icon() {
        let cat: Category = serde_json::from_str(r#"{"id":"bags","name":"Bags"}"#).unwrap();
        assert_eq!(cat, Category::new("bags", "Bags"));
    }
}
