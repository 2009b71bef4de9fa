//! Export encodings for flattened catalog rows.
//!
//! Two formats are produced: a pretty-printed JSON document carrying the
//! export context (timestamp, distance band, Keeta fee) and a spreadsheet
//! friendly delimited-text file with one fixed column set.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::catalog::CatalogRow;
use crate::delivery::{fee_for_band, DistanceBand};
use crate::CoreError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error while encoding export: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json; charset=utf-8",
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(CoreError::UnknownExportFormat(other.to_owned())),
        }
    }
}

/// Columns of the delimited-text export, in order.
pub const CSV_COLUMNS: [&str; 13] = [
    "category_name",
    "name",
    "description",
    "external_code",
    "stock",
    "price_base",
    "price_ifood",
    "price_99food",
    "price_keeta",
    "image_url",
    "thumbnail_url",
    "km_band",
    "keeta_fee",
];

/// JSON export document. `items` is always the full, unfiltered row list.
#[derive(Debug, Serialize)]
pub struct CatalogExport<'a> {
    #[serde(serialize_with = "serialize_iso_millis")]
    pub exported_at: DateTime<Utc>,
    pub km_band: DistanceBand,
    #[serde(with = "rust_decimal::serde::float")]
    pub keeta_fee: Decimal,
    pub items: &'a [CatalogRow],
}

impl<'a> CatalogExport<'a> {
    #[must_use]
    pub fn new(rows: &'a [CatalogRow], band: DistanceBand, exported_at: DateTime<Utc>) -> Self {
        Self {
            exported_at,
            km_band: band,
            keeta_fee: fee_for_band(band),
            items: rows,
        }
    }
}

fn serialize_iso_millis<S: Serializer>(at: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Encodes `rows` as the pretty-printed JSON export document.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if serialization fails.
pub fn to_json(
    rows: &[CatalogRow],
    band: DistanceBand,
    exported_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    let doc = CatalogExport::new(rows, band, exported_at);
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Encodes `rows` as delimited text.
///
/// Every field is double-quoted with embedded quotes doubled; line breaks
/// inside a field become a single space. Rows are joined by `\n` with no
/// trailing newline. An empty row list encodes to an empty string (no
/// header).
///
/// # Errors
///
/// Returns [`ExportError`] if the underlying CSV writer fails.
pub fn to_csv(rows: &[CatalogRow], band: DistanceBand) -> Result<String, ExportError> {
    if rows.is_empty() {
        return Ok(String::new());
    }

    let keeta_fee = format_number(fee_for_band(band));
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_COLUMNS)?;
    for row in rows {
        let record = [
            row.category_name.clone(),
            row.name.clone(),
            row.description.clone(),
            row.external_code.clone(),
            format_number(row.stock),
            format_number(row.price),
            format_number(row.price_ifood),
            format_number(row.price_99food),
            format_number(row.price_keeta),
            row.image_url.clone(),
            row.thumbnail_url.clone(),
            band.code().to_owned(),
            keeta_fee.clone(),
        ]
        .map(|field| flatten_line_breaks(&field));
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let mut out = String::from_utf8(bytes)?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

/// `catalogo_{band}_{YYYY-MM-DD}.{ext}`.
#[must_use]
pub fn export_file_name(band: DistanceBand, format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "catalogo_{}_{}.{}",
        band.code(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Shortest decimal rendering: `5.90` → `5.9`, `10.00` → `10`.
fn format_number(value: Decimal) -> String {
    value.normalize().to_string()
}

fn flatten_line_breaks(field: &str) -> String {
    field.replace("\r\n", " ").replace('\n', " ")
}
