use rust_decimal_macros::dec;
use serde_json::{json, Value};

use super::*;

fn catalog(value: Value) -> RawCatalog {
    serde_json::from_value(value).unwrap()
}

fn single_item(item: Value) -> RawCatalog {
    catalog(json!({
        "categories": [{"id": 1, "name": "Sorvetes", "items": [item]}]
    }))
}

// -----------------------------------------------------------------------
// plain items
// -----------------------------------------------------------------------

#[test]
fn priced_item_without_options_is_one_row() {
    let rows = flatten(
        &single_item(json!({"id": 7, "name": "Picolé", "price": 10})),
        DistanceBand::UpTo2,
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].price, dec!(10));
    assert_eq!(rows[0].category_name, "Sorvetes");
    assert_eq!(rows[0].external_code, "7");
    assert_eq!(rows[0].status, "UNKNOWN");
}

#[test]
fn zero_priced_item_without_options_is_skipped() {
    let rows = flatten(
        &single_item(json!({"id": 7, "name": "Picolé", "price": 0})),
        DistanceBand::UpTo2,
    );
    assert!(rows.is_empty());

    let rows = flatten(
        &single_item(json!({"id": 7, "name": "Picolé"})),
        DistanceBand::UpTo2,
    );
    assert!(rows.is_empty());
}

#[test]
fn plain_item_keeps_untrimmed_fields_and_prefers_external_code() {
    let rows = flatten(
        &single_item(json!({
            "id": 7,
            "name": " Picolé ",
            "description": " Gelado ",
            "external_code": "PIC-7",
            "price": "8,50",
            "stock": "3",
            "status": "ACTIVE",
            "image": {"image_url": "https://cdn/p.png", "thumbnail_url": null}
        })),
        DistanceBand::UpTo2,
    );
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.name, " Picolé ");
    assert_eq!(row.description, " Gelado ");
    assert_eq!(row.external_code, "PIC-7");
    assert_eq!(row.price, dec!(8.50));
    assert_eq!(row.stock, dec!(3));
    assert_eq!(row.status, "ACTIVE");
    assert_eq!(row.image_url, "https://cdn/p.png");
    assert_eq!(row.thumbnail_url, "");
}

#[test]
fn sacole_keeta_price_in_middle_band() {
    let rows = flatten(
        &single_item(json!({"id": 1, "name": "Sacolé", "price": 3.00})),
        DistanceBand::From2To4,
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].price_keeta, dec!(5.90));
}

#[test]
fn rows_carry_all_channel_prices() {
    let rows = flatten(
        &single_item(json!({"id": 1, "name": "Açaí", "price": 10})),
        DistanceBand::UpTo2,
    );
    assert_eq!(rows[0].price_ifood, dec!(15.90));
    assert_eq!(rows[0].price_99food, dec!(13.90));
    assert_eq!(rows[0].price_keeta, dec!(13.90));
}

// -----------------------------------------------------------------------
// options, default policy
// -----------------------------------------------------------------------

#[test]
fn options_replace_item_and_inherit_price() {
    let rows = flatten(
        &single_item(json!({
            "id": 5,
            "name": "Sacolé",
            "price": 10,
            "option_groups": [{
                "id": 50,
                "name": "Sabores",
                "options": [
                    {"id": 501, "name": "Uva", "price": 0},
                    {"id": 502, "name": "Manga", "price": 5}
                ]
            }]
        })),
        DistanceBand::UpTo2,
    );
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].price, dec!(10));
    assert_eq!(rows[1].price, dec!(5));
    assert_eq!(rows[0].name, "Sacolé — Uva");
    assert_eq!(rows[1].name, "Sacolé — Manga");
}

#[test]
fn options_under_zero_priced_item_are_still_emitted() {
    let rows = flatten(
        &single_item(json!({
            "id": 5,
            "name": "Monte seu açaí",
            "price": 0,
            "option_groups": [{"options": [{"id": 1, "name": "300ml", "price": 0}]}]
        })),
        DistanceBand::UpTo2,
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].price, Decimal::ZERO);
    assert_eq!(rows[0].price_ifood, Decimal::ZERO);
}

#[test]
fn empty_option_groups_fall_back_to_item() {
    let rows = flatten(
        &single_item(json!({
            "id": 5,
            "name": "Sacolé",
            "price": 4,
            "option_groups": [{"id": 50, "options": []}, {"id": 51, "options": null}]
        })),
        DistanceBand::UpTo2,
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Sacolé");
}

#[test]
fn option_name_uses_whichever_part_is_present() {
    let rows = flatten(
        &single_item(json!({
            "id": 5,
            "name": "  ",
            "price": 4,
            "option_groups": [{"options": [
                {"id": 1, "name": " Uva "},
                {"id": 2, "name": null}
            ]}]
        })),
        DistanceBand::UpTo2,
    );
    assert_eq!(rows[0].name, "Uva");
    assert_eq!(rows[1].name, "");
}

#[test]
fn option_fields_inherit_from_item() {
    let rows = flatten(
        &single_item(json!({
            "id": 5,
            "name": "Sacolé",
            "description": " Feito com fruta ",
            "external_code": "SAC",
            "price": 4,
            "stock": 99,
            "status": "ACTIVE",
            "image": {"image_url": "https://cdn/item.png", "thumbnail_url": "https://cdn/item_t.png"},
            "option_groups": [{"options": [
                {"id": 1, "name": "Uva", "image": {"image_url": "https://cdn/uva.png"}},
                {"id": 2, "name": "Coco", "external_code": " COCO-1 ", "description": "Coco ralado",
                 "stock": "12", "status": "INACTIVE"}
            ]}]
        })),
        DistanceBand::UpTo2,
    );

    let uva = &rows[0];
    assert_eq!(uva.description, "Feito com fruta");
    assert_eq!(uva.external_code, "SAC:1");
    assert_eq!(uva.image_url, "https://cdn/uva.png");
    assert_eq!(uva.thumbnail_url, "https://cdn/item_t.png");
    assert_eq!(uva.status, "ACTIVE");
    // option stock is never inherited
    assert_eq!(uva.stock, Decimal::ZERO);

    let coco = &rows[1];
    assert_eq!(coco.description, "Coco ralado");
    assert_eq!(coco.external_code, "COCO-1");
    assert_eq!(coco.image_url, "https://cdn/item.png");
    assert_eq!(coco.stock, dec!(12));
    assert_eq!(coco.status, "INACTIVE");
}

#[test]
fn synthesized_code_falls_back_to_item_id() {
    let rows = flatten(
        &single_item(json!({
            "id": 5,
            "name": "Sacolé",
            "price": 4,
            "option_groups": [{"options": [{"id": 9, "name": "Uva"}, {"name": "Manga"}]}]
        })),
        DistanceBand::UpTo2,
    );
    assert_eq!(rows[0].external_code, "5:9");
    assert_eq!(rows[1].external_code, "5:");
}

#[test]
fn rows_keep_document_order_across_categories() {
    let rows = flatten(
        &catalog(json!({
            "categories": [
                {"id": 1, "name": "Sorvetes", "items": [
                    {"id": 1, "name": "A", "price": 1},
                    {"id": 2, "name": "B", "price": 0},
                    {"id": 3, "name": "C", "price": 2}
                ]},
                {"id": 2, "name": "Bebidas", "items": null},
                {"id": 3, "name": "Doces", "items": [{"id": 4, "name": "D", "price": 3}]}
            ]
        })),
        DistanceBand::Above4,
    );
    let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C", "D"]);
    assert_eq!(rows[2].category_name, "Doces");
}

#[test]
fn empty_catalog_yields_no_rows() {
    assert!(flatten(&catalog(json!({})), DistanceBand::UpTo2).is_empty());
    assert!(flatten(&catalog(json!({"categories": []})), DistanceBand::UpTo2).is_empty());
}

// -----------------------------------------------------------------------
// zero-priced-items policy
// -----------------------------------------------------------------------

#[test]
fn zero_priced_policy_emits_priced_item_as_is() {
    let rows = flatten_with_policy(
        &single_item(json!({
            "id": 5,
            "name": "Sacolé",
            "price": 10,
            "option_groups": [{"options": [{"id": 1, "name": "Uva", "price": 5}]}]
        })),
        DistanceBand::UpTo2,
        OptionPolicy::ZeroPricedItems,
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Sacolé");
    assert_eq!(rows[0].price, dec!(10));
}

#[test]
fn zero_priced_policy_explodes_priced_options_only() {
    let rows = flatten_with_policy(
        &single_item(json!({
            "id": 5,
            "name": "Açaí",
            "price": 0,
            "option_groups": [{"options": [
                {"id": 1, "name": "300ml", "price": 12},
                {"id": 2, "name": "Granola", "price": 0},
                {"id": 3, "name": "500ml", "price": "18,00"}
            ]}]
        })),
        DistanceBand::UpTo2,
        OptionPolicy::ZeroPricedItems,
    );
    let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Açaí — 300ml", "Açaí — 500ml"]);
    assert_eq!(rows[1].price, dec!(18));
}

#[test]
fn zero_priced_policy_skips_unpriced_item_without_options() {
    let rows = flatten_with_policy(
        &single_item(json!({"id": 5, "name": "Brinde", "price": 0})),
        DistanceBand::UpTo2,
        OptionPolicy::ZeroPricedItems,
    );
    assert!(rows.is_empty());
}
