//! Offline commands: single-price quotes and the band table.

use anyhow::Context;
use catprice_core::{fee_for_band, Channel, ChannelPrices, DistanceBand};
use rust_decimal::Decimal;

use crate::resolve_band;

/// Print the channel prices for `base_price`, or only `channel`'s when given.
///
/// # Errors
///
/// Returns an error if `base_price` is not a non-negative decimal or
/// `CATPRICE_DEFAULT_KM_BAND` is set to an unknown band.
pub(crate) fn run_quote(
    base_price: &str,
    band: Option<&str>,
    channel: Option<Channel>,
) -> anyhow::Result<()> {
    let base = parse_base_price(base_price)?;
    let default_band =
        catprice_core::load_default_band().context("invalid default distance band")?;
    let band = resolve_band(band, default_band);
    let keeta_fee = fee_for_band(band);
    let prices = ChannelPrices::for_base(base, keeta_fee);

    println!("base price: {base}");
    println!("band:       {} ({}, keeta fee {keeta_fee})", band.code(), band.label());
    println!("{:<10}{:>10}", "CHANNEL", "PRICE");
    for channel in quoted_channels(channel) {
        println!(
            "{:<10}{:>10}",
            channel.fee_model().label,
            prices.get(channel)
        );
    }
    Ok(())
}

pub(crate) fn quoted_channels(only: Option<Channel>) -> Vec<Channel> {
    match only {
        Some(channel) => vec![channel],
        None => Channel::ALL.to_vec(),
    }
}

/// Print every distance band with its average distance, rate and fee.
pub(crate) fn run_bands() {
    println!(
        "{:<14}{:<16}{:>8}{:>10}{:>8}",
        "BAND", "LABEL", "AVG KM", "COST/KM", "FEE"
    );
    for band in DistanceBand::ALL {
        println!(
            "{:<14}{:<16}{:>8}{:>10}{:>8}",
            band.code(),
            band.label(),
            band.avg_km(),
            band.cost_per_km(),
            fee_for_band(band)
        );
    }
}

/// Accepts `12.50` or `12,50`.
pub(crate) fn parse_base_price(raw: &str) -> anyhow::Result<Decimal> {
    let normalised = raw.trim().replacen(',', ".", 1);
    let price: Decimal = normalised
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid base price '{raw}': {e}"))?;
    if price < Decimal::ZERO {
        anyhow::bail!("base price must not be negative, got {price}");
    }
    Ok(price)
}
