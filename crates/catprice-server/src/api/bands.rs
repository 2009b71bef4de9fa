use axum::{
    extract::{Query, State},
    Extension, Json,
};
use catprice_core::{fee_for_band, ChannelPrices, DistanceBand};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct DeliveryBandItem {
    band: DistanceBand,
    label: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    avg_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    cost_per_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    fee: Decimal,
}

#[derive(Debug, Deserialize)]
pub(super) struct QuoteQuery {
    pub base_price: Option<String>,
    pub km_band: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct QuoteData {
    #[serde(with = "rust_decimal::serde::float")]
    base_price: Decimal,
    km_band: DistanceBand,
    #[serde(with = "rust_decimal::serde::float")]
    keeta_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    price_ifood: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    price_99food: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    price_keeta: Decimal,
}

pub(super) async fn list_delivery_bands(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<DeliveryBandItem>>> {
    let data = DistanceBand::ALL
        .into_iter()
        .map(|band| DeliveryBandItem {
            band,
            label: band.label(),
            avg_km: band.avg_km(),
            cost_per_km: band.cost_per_km(),
            fee: fee_for_band(band),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn quote(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<ApiResponse<QuoteData>>, ApiError> {
    let base_price = match parse_base_price(query.base_price.as_deref()) {
        Ok(price) => price,
        Err(message) => return Err(ApiError::new(req_id.0, "bad_request", message)),
    };
    let band = state.resolve_band(query.km_band.as_deref());
    let keeta_fee = fee_for_band(band);
    let prices = ChannelPrices::for_base(base_price, keeta_fee);

    Ok(Json(ApiResponse {
        data: QuoteData {
            base_price,
            km_band: band,
            keeta_fee,
            price_ifood: prices.ifood,
            price_99food: prices.food99,
            price_keeta: prices.keeta,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Accepts `12.50` or `12,50`; rejects missing, unparsable and negative input.
fn parse_base_price(raw: Option<&str>) -> Result<Decimal, String> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Err("base_price is required".to_string());
    };
    let price = raw
        .replacen(',', ".", 1)
        .parse::<Decimal>()
        .map_err(|_| format!("base_price must be a decimal number, got {raw:?}"))?;
    if price < Decimal::ZERO {
        return Err("base_price must not be negative".to_string());
    }
    Ok(price)
}
