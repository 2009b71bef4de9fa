use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// One independently sellable unit of the partner catalog, priced for every
/// channel.
///
/// A row is either a whole item or a single option of an item's option
/// groups. Rows are built once by the flattener and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub category_name: String,
    pub name: String,
    pub description: String,
    /// Row identity for the session. Synthesized as `"{item}:{option}"` when
    /// the partner omits the option's code.
    pub external_code: String,
    /// Base price the owner wants to net, in BRL.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub stock: Decimal,
    pub image_url: String,
    pub thumbnail_url: String,
    /// Partner status string, e.g. `"ACTIVE"`, `"INACTIVE"`, or `"UNKNOWN"`
    /// when the partner sent none.
    pub status: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_ifood: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_99food: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_keeta: Decimal,
}

/// How items that carry option groups are turned into rows.
///
/// The partner catalog has gone through two business rules for variant
/// products; both are supported and chosen through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionPolicy {
    /// Any item with at least one option is represented only by its options.
    /// Options without a price inherit the item's price.
    #[default]
    AlwaysExplode,
    /// Options are exploded only for items whose own price is exactly zero,
    /// and zero-priced options are skipped. Priced items are emitted as-is.
    ZeroPricedItems,
}

impl OptionPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OptionPolicy::AlwaysExplode => "always_explode",
            OptionPolicy::ZeroPricedItems => "zero_priced_items",
        }
    }
}

impl std::fmt::Display for OptionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "always_explode" => Ok(OptionPolicy::AlwaysExplode),
            "zero_priced_items" => Ok(OptionPolicy::ZeroPricedItems),
            other => Err(CoreError::UnknownOptionPolicy(other.to_owned())),
        }
    }
}
