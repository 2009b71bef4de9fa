use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use catprice_core::{
    export_file_name, fee_for_band, to_csv, to_json, CatalogRow, DistanceBand, ExportError,
    ExportFormat,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_client_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct BandQuery {
    pub km_band: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct CatalogData {
    items: Vec<CatalogRow>,
    km_band: DistanceBand,
    #[serde(with = "rust_decimal::serde::float")]
    keeta_fee: Decimal,
}

async fn fetch_rows(
    state: &AppState,
    req_id: &RequestId,
    band: DistanceBand,
) -> Result<Vec<CatalogRow>, ApiError> {
    state
        .client
        .fetch_rows(band, state.option_policy)
        .await
        .map_err(|e| map_client_error(req_id.0.clone(), &e))
}

fn map_export_error(request_id: String, error: &ExportError) -> ApiError {
    tracing::error!(request_id = %request_id, error = %error, "catalog export failed");
    ApiError::new(request_id, "internal_error", "failed to encode export")
}

pub(super) async fn get_catalog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<BandQuery>,
) -> Result<Json<ApiResponse<CatalogData>>, ApiError> {
    let band = state.resolve_band(query.km_band.as_deref());
    let items = fetch_rows(&state, &req_id, band).await?;
    tracing::info!(band = %band, rows = items.len(), "served catalog");

    Ok(Json(ApiResponse {
        data: CatalogData {
            items,
            km_band: band,
            keeta_fee: fee_for_band(band),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn export_json(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<BandQuery>,
) -> Result<Response, ApiError> {
    let band = state.resolve_band(query.km_band.as_deref());
    let rows = fetch_rows(&state, &req_id, band).await?;
    let now = Utc::now();
    let body = to_json(&rows, band, now).map_err(|e| map_export_error(req_id.0.clone(), &e))?;
    Ok(attachment(ExportFormat::Json, band, now, body))
}

pub(super) async fn export_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<BandQuery>,
) -> Result<Response, ApiError> {
    let band = state.resolve_band(query.km_band.as_deref());
    let rows = fetch_rows(&state, &req_id, band).await?;
    let body = to_csv(&rows, band).map_err(|e| map_export_error(req_id.0.clone(), &e))?;
    Ok(attachment(ExportFormat::Csv, band, Utc::now(), body))
}

fn attachment(
    format: ExportFormat,
    band: DistanceBand,
    at: chrono::DateTime<Utc>,
    body: String,
) -> Response {
    let file_name = export_file_name(band, format, at.date_naive());
    (
        [
            (header::CONTENT_TYPE, format.content_type().to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}
