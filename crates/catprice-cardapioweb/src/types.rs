//! Wire types for the CardapioWeb partner `catalog` endpoint.
//!
//! ## Observed shape
//!
//! The document is a tree: `categories[] → items[] → option_groups[] →
//! options[]`. Every list may be absent or `null`. Scalar fields are loosely
//! typed: prices and stock usually arrive as JSON numbers but some merchants'
//! catalogs carry text such as `"12,50"`; `external_code` may be a number;
//! descriptions and images are frequently `null`.
//!
//! Scalars are therefore kept as raw [`serde_json::Value`]s and interpreted
//! with [`crate::coerce`] during flattening, so a wrongly typed field never
//! fails deserialization of the whole catalog.

use serde::Deserialize;
use serde_json::Value;

/// Top-level response from `GET /api/partner/v1/catalog`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCatalog {
    pub categories: Option<Vec<RawCategory>>,
}

impl RawCatalog {
    #[must_use]
    pub fn categories(&self) -> &[RawCategory] {
        self.categories.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCategory {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub items: Option<Vec<RawItem>>,
}

impl RawCategory {
    #[must_use]
    pub fn items(&self) -> &[RawItem] {
        self.items.as_deref().unwrap_or_default()
    }
}

/// A sellable catalog entry. When it carries options, each option is a
/// variant (flavor, size) that may override price, stock, code and image.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawItem {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub external_code: Option<Value>,
    pub price: Option<Value>,
    pub stock: Option<Value>,
    /// e.g. `"ACTIVE"`, `"INACTIVE"`. Not always sent.
    pub status: Option<Value>,
    pub image: Option<RawImage>,
    pub option_groups: Option<Vec<RawOptionGroup>>,
}

impl RawItem {
    #[must_use]
    pub fn option_groups(&self) -> &[RawOptionGroup] {
        self.option_groups.as_deref().unwrap_or_default()
    }

    /// All options across every group, in document order.
    pub fn options(&self) -> impl Iterator<Item = &RawOption> {
        self.option_groups().iter().flat_map(RawOptionGroup::options)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOptionGroup {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub options: Option<Vec<RawOption>>,
}

impl RawOptionGroup {
    #[must_use]
    pub fn options(&self) -> &[RawOption] {
        self.options.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOption {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub external_code: Option<Value>,
    pub price: Option<Value>,
    pub stock: Option<Value>,
    pub status: Option<Value>,
    pub image: Option<RawImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawImage {
    pub image_url: Option<Value>,
    pub thumbnail_url: Option<Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_and_missing_lists_read_as_empty() {
        let catalog: RawCatalog = serde_json::from_value(json!({"categories": null})).unwrap();
        assert!(catalog.categories().is_empty());

        let catalog: RawCatalog = serde_json::from_value(json!({})).unwrap();
        assert!(catalog.categories().is_empty());

        let category: RawCategory =
            serde_json::from_value(json!({"id": 1, "name": "Sorvetes"})).unwrap();
        assert!(category.items().is_empty());
    }

    #[test]
    fn wrongly_typed_scalars_do_not_fail() {
        let item: RawItem = serde_json::from_value(json!({
            "id": "abc",
            "name": 42,
            "price": "12,50",
            "stock": true,
            "external_code": 3_276_447,
            "description": null,
            "option_groups": [{"options": null}]
        }))
        .unwrap();
        assert_eq!(item.price, Some(json!("12,50")));
        assert_eq!(item.external_code, Some(json!(3_276_447)));
        assert!(item.description.is_none());
        assert_eq!(item.option_groups().len(), 1);
        assert_eq!(item.options().count(), 0);
    }

    #[test]
    fn options_iterate_across_groups_in_order() {
        let item: RawItem = serde_json::from_value(json!({
            "id": 1,
            "option_groups": [
                {"id": 10, "options": [{"id": 100}, {"id": 101}]},
                {"id": 11, "options": []},
                {"id": 12, "options": [{"id": 120}]}
            ]
        }))
        .unwrap();
        let ids: Vec<_> = item.options().map(|o| o.id.clone()).collect();
        assert_eq!(ids, vec![Some(json!(100)), Some(json!(101)), Some(json!(120))]);
    }
}
