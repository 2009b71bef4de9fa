//! Per-channel fee models for the delivery marketplaces we sell on.
//!
//! Each marketplace takes a combined percentage (commission plus payment
//! processing, already summed by the marketplace) and optionally a fixed fee
//! per order. The table is compile-time data; there is no way to mutate it at
//! runtime. Request-scoped variants (Keeta's distance-dependent fixed fee) are
//! derived with [`FeeModel::with_fixed_fee`].

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A third-party sales channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Ifood,
    Food99,
    Keeta,
}

impl Channel {
    /// Every channel, in the column order used by exports.
    pub const ALL: [Channel; 3] = [Channel::Ifood, Channel::Food99, Channel::Keeta];

    /// Stable identifier used in URLs, CLI flags and config.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Channel::Ifood => "ifood",
            Channel::Food99 => "food99",
            Channel::Keeta => "keeta",
        }
    }

    /// Registry entry for this channel.
    #[must_use]
    pub const fn fee_model(self) -> FeeModel {
        lookup(self)
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ifood" => Ok(Channel::Ifood),
            "food99" | "99food" => Ok(Channel::Food99),
            "keeta" => Ok(Channel::Keeta),
            other => Err(CoreError::UnknownChannel(other.to_owned())),
        }
    }
}

/// How a grossed-up price is snapped to a displayable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundingMode {
    /// Nearest cent.
    None,
    /// Smallest `N.90` at or above the gross price.
    #[serde(rename = "END_90")]
    End90,
    /// Smallest `N.99` at or above the gross price.
    #[serde(rename = "END_99")]
    End99,
}

/// Commission and fee configuration for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeModel {
    /// Human-facing channel name, e.g. `"iFood"`.
    pub label: &'static str,
    /// Combined percentage as a fraction: `0.272` is 27.2%.
    #[serde(with = "rust_decimal::serde::float")]
    pub percent_total: Decimal,
    /// Fixed fee per sale, in BRL.
    #[serde(with = "rust_decimal::serde::float")]
    pub fixed_fee: Decimal,
    pub rounding: RoundingMode,
}

impl FeeModel {
    /// Returns a copy of this model with `fixed_fee` replaced.
    ///
    /// Used for Keeta, whose fixed fee depends on the delivery distance band
    /// of the current request.
    #[must_use]
    pub const fn with_fixed_fee(self, fixed_fee: Decimal) -> Self {
        Self { fixed_fee, ..self }
    }
}

// iFood: 24% commission + 3.2% payment processing, plus a R$0.99 service fee.
const IFOOD: FeeModel = FeeModel {
    label: "iFood",
    percent_total: dec!(0.272),
    fixed_fee: dec!(0.99),
    rounding: RoundingMode::End90,
};

// 99Food: 22.1% commission + 1.59% payment processing.
const FOOD99: FeeModel = FeeModel {
    label: "99Food",
    percent_total: dec!(0.2369),
    fixed_fee: dec!(0),
    rounding: RoundingMode::End90,
};

// Keeta: 12% commission + 3.2% payment processing. The fixed fee is the
// distance-band delivery fee, filled in per request.
const KEETA: FeeModel = FeeModel {
    label: "Keeta",
    percent_total: dec!(0.174),
    fixed_fee: dec!(0),
    rounding: RoundingMode::End90,
};

/// Looks up the registry entry for `channel`.
#[must_use]
pub const fn lookup(channel: Channel) -> FeeModel {
    match channel {
        Channel::Ifood => IFOOD,
        Channel::Food99 => FOOD99,
        Channel::Keeta => KEETA,
    }
}
