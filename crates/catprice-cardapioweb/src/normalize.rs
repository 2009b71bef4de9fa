//! Flattening of the raw partner catalog tree into priced [`CatalogRow`]s.
//!
//! Every emitted row is priced for all channels; Keeta's fixed fee is the
//! delivery fee of the requested distance band. Rows keep document order.

use catprice_core::{fee_for_band, CatalogRow, ChannelPrices, DistanceBand, OptionPolicy};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::coerce::{coerce_number, coerce_text, first_present};
use crate::types::{RawCatalog, RawImage, RawItem, RawOption};

const UNKNOWN_STATUS: &str = "UNKNOWN";

/// Flattens `catalog` with the default [`OptionPolicy::AlwaysExplode`].
#[must_use]
pub fn flatten(catalog: &RawCatalog, band: DistanceBand) -> Vec<CatalogRow> {
    flatten_with_policy(catalog, band, OptionPolicy::default())
}

/// Flattens `catalog` into one priced row per sellable unit.
///
/// Malformed fields are coerced, never rejected; items that end up with no
/// sellable price are skipped.
#[must_use]
pub fn flatten_with_policy(
    catalog: &RawCatalog,
    band: DistanceBand,
    policy: OptionPolicy,
) -> Vec<CatalogRow> {
    let keeta_fee = fee_for_band(band);
    let mut rows = Vec::new();

    for category in catalog.categories() {
        let category_name = coerce_text(category.name.as_ref());
        for item in category.items() {
            let emitted = match policy {
                OptionPolicy::AlwaysExplode => explode_always(item),
                OptionPolicy::ZeroPricedItems => explode_zero_priced(item),
            };
            if emitted.is_empty() {
                tracing::debug!(
                    item_id = %coerce_text(item.id.as_ref()),
                    category = %category_name,
                    "skipping item with no sellable price"
                );
            }
            rows.extend(
                emitted
                    .into_iter()
                    .map(|fields| fields.into_row(&category_name, keeta_fee)),
            );
        }
    }

    tracing::debug!(band = %band, %policy, rows = rows.len(), "flattened catalog");
    rows
}

/// Options always replace their item. Items without options are emitted only
/// when priced.
fn explode_always(item: &RawItem) -> Vec<RowFields> {
    let options: Vec<RowFields> = item.options().map(|opt| option_fields(item, opt)).collect();
    if !options.is_empty() {
        return options;
    }
    plain_item(item).into_iter().collect()
}

/// Options are exploded only under a zero-priced item, and unpriced options
/// are dropped. Priced items are emitted as-is.
fn explode_zero_priced(item: &RawItem) -> Vec<RowFields> {
    if coerce_number(item.price.as_ref()).is_zero() {
        return item
            .options()
            .map(|opt| option_fields(item, opt))
            .filter(|fields| fields.price > Decimal::ZERO)
            .collect();
    }
    plain_item(item).into_iter().collect()
}

/// Row values before channel pricing.
struct RowFields {
    name: String,
    description: String,
    external_code: String,
    price: Decimal,
    stock: Decimal,
    image_url: String,
    thumbnail_url: String,
    status: String,
}

impl RowFields {
    fn into_row(self, category_name: &str, keeta_fee: Decimal) -> CatalogRow {
        let prices = ChannelPrices::for_base(self.price, keeta_fee);
        CatalogRow {
            category_name: category_name.to_owned(),
            name: self.name,
            description: self.description,
            external_code: self.external_code,
            price: self.price,
            stock: self.stock,
            image_url: self.image_url,
            thumbnail_url: self.thumbnail_url,
            status: self.status,
            price_ifood: prices.ifood,
            price_99food: prices.food99,
            price_keeta: prices.keeta,
        }
    }
}

/// The item itself, if its price is positive.
fn plain_item(item: &RawItem) -> Option<RowFields> {
    let price = coerce_number(item.price.as_ref());
    if price <= Decimal::ZERO {
        return None;
    }

    let image = item.image.as_ref();
    Some(RowFields {
        name: coerce_text(item.name.as_ref()),
        description: coerce_text(item.description.as_ref()),
        external_code: item_code(item),
        price,
        stock: coerce_number(item.stock.as_ref()),
        image_url: coerce_text(image.and_then(|i| i.image_url.as_ref())),
        thumbnail_url: coerce_text(image.and_then(|i| i.thumbnail_url.as_ref())),
        status: status_text(item.status.as_ref()),
    })
}

/// One option of `item`, inheriting whatever the option leaves blank.
fn option_fields(item: &RawItem, opt: &RawOption) -> RowFields {
    let parent_name = coerce_text(item.name.as_ref());
    let option_name = coerce_text(opt.name.as_ref());
    let name = match (parent_name.trim(), option_name.trim()) {
        ("", only) | (only, "") => only.to_owned(),
        (parent, option) => format!("{parent} — {option}"),
    };

    let description = match coerce_text(opt.description.as_ref()).trim() {
        "" => coerce_text(item.description.as_ref()).trim().to_owned(),
        own => own.to_owned(),
    };

    let external_code = match coerce_text(opt.external_code.as_ref()).trim() {
        "" => format!("{}:{}", item_code(item), coerce_text(opt.id.as_ref())),
        own => own.to_owned(),
    };

    let option_price = coerce_number(opt.price.as_ref());
    let price = if option_price > Decimal::ZERO {
        option_price
    } else {
        coerce_number(item.price.as_ref())
    };

    let (opt_image, item_image) = (opt.image.as_ref(), item.image.as_ref());
    RowFields {
        name,
        description,
        external_code,
        price,
        stock: coerce_number(opt.stock.as_ref()),
        image_url: coerce_text(image_field(opt_image, item_image, |i| &i.image_url)),
        thumbnail_url: coerce_text(image_field(opt_image, item_image, |i| &i.thumbnail_url)),
        status: status_text(first_present(opt.status.as_ref(), item.status.as_ref())),
    }
}

/// `item.external_code ?? item.id`, as text.
fn item_code(item: &RawItem) -> String {
    coerce_text(first_present(item.external_code.as_ref(), item.id.as_ref()))
}

fn status_text(status: Option<&Value>) -> String {
    match status {
        Some(value) if !value.is_null() => coerce_text(Some(value)),
        _ => UNKNOWN_STATUS.to_owned(),
    }
}

fn image_field<'a>(
    own: Option<&'a RawImage>,
    inherited: Option<&'a RawImage>,
    field: fn(&RawImage) -> &Option<Value>,
) -> Option<&'a Value> {
    first_present(
        own.and_then(|i| field(i).as_ref()),
        inherited.and_then(|i| field(i).as_ref()),
    )
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
