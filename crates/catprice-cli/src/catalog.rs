//! Commands that fetch the partner catalog.

use std::path::PathBuf;

use anyhow::Context;
use catprice_cardapioweb::CardapioWebClient;
use catprice_core::{
    export_file_name, to_csv, to_json, AppConfig, CatalogRow, DistanceBand, ExportFormat,
};
use chrono::Utc;

use crate::resolve_band;

async fn fetch_rows(config: &AppConfig, band: DistanceBand) -> anyhow::Result<Vec<CatalogRow>> {
    let client = CardapioWebClient::from_config(config)?;
    let rows = client
        .fetch_rows(band, config.option_policy)
        .await
        .context("failed to fetch catalog")?;
    tracing::info!(band = %band, rows = rows.len(), "catalog flattened");
    Ok(rows)
}

/// Fetch, flatten and print the catalog for `band`.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or retrieval fails.
pub(crate) async fn run_catalog(band: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = catprice_core::load_app_config()?;
    let band = resolve_band(band, config.default_band);
    let rows = fetch_rows(&config, band).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("no sellable items in catalog");
        return Ok(());
    }

    print!("{}", render_rows_table(&rows));
    println!(
        "{} rows, band {} ({})",
        rows.len(),
        band.code(),
        band.label()
    );
    Ok(())
}

/// Fetch, flatten and write an export file for `band`.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, retrieval fails or the
/// file cannot be written.
pub(crate) async fn run_export(
    format: ExportFormat,
    band: Option<&str>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = catprice_core::load_app_config()?;
    let band = resolve_band(band, config.default_band);
    let rows = fetch_rows(&config, band).await?;

    let now = Utc::now();
    let body = match format {
        ExportFormat::Json => to_json(&rows, band, now)?,
        ExportFormat::Csv => to_csv(&rows, band)?,
    };
    let path =
        output.unwrap_or_else(|| PathBuf::from(export_file_name(band, format, now.date_naive())));

    std::fs::write(&path, body)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Fixed-width table: one line per row plus a header.
pub(crate) fn render_rows_table(rows: &[CatalogRow]) -> String {
    let mut out = format!(
        "{:<40}{:<20}{:>10}{:>10}{:>10}{:>10}  CODE\n",
        "NAME", "CATEGORY", "BASE", "IFOOD", "99FOOD", "KEETA"
    );
    for row in rows {
        out.push_str(&format!(
            "{:<40}{:<20}{:>10}{:>10}{:>10}{:>10}  {}\n",
            truncate(&row.name, 38),
            truncate(&row.category_name, 18),
            row.price.round_dp(2),
            row.price_ifood,
            row.price_99food,
            row.price_keeta,
            row.external_code,
        ));
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
