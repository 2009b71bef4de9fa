//! Distance-band delivery fees.
//!
//! Keeta charges a delivery fee that depends on distance. Instead of routing
//! every order we bucket the delivery area into three coarse bands, each with
//! a fixed average distance and cost per km.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Coarse delivery distance bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DistanceBand {
    #[default]
    #[serde(rename = "UP_TO_2")]
    UpTo2,
    #[serde(rename = "FROM_2_TO_4")]
    From2To4,
    #[serde(rename = "ABOVE_4")]
    Above4,
}

/// Static average distance and per-km cost for one band.
#[derive(Debug, Clone, Copy)]
struct BandRate {
    band: DistanceBand,
    avg_km: Decimal,
    cost_per_km: Decimal,
}

static BAND_RATES: [BandRate; 3] = [
    BandRate {
        band: DistanceBand::UpTo2,
        avg_km: dec!(1.5),
        cost_per_km: dec!(0.5),
    },
    BandRate {
        band: DistanceBand::From2To4,
        avg_km: dec!(3.0),
        cost_per_km: dec!(0.5),
    },
    BandRate {
        band: DistanceBand::Above4,
        avg_km: dec!(5.0),
        cost_per_km: dec!(0.5),
    },
];

impl DistanceBand {
    pub const ALL: [DistanceBand; 3] = [
        DistanceBand::UpTo2,
        DistanceBand::From2To4,
        DistanceBand::Above4,
    ];

    /// Wire code, e.g. `"FROM_2_TO_4"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            DistanceBand::UpTo2 => "UP_TO_2",
            DistanceBand::From2To4 => "FROM_2_TO_4",
            DistanceBand::Above4 => "ABOVE_4",
        }
    }

    /// Display label shown to operators.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            DistanceBand::UpTo2 => "Até 2km",
            DistanceBand::From2To4 => "De 2 a 4km",
            DistanceBand::Above4 => "Acima de 4km",
        }
    }

    /// Average delivery distance for the band, in km.
    #[must_use]
    pub fn avg_km(self) -> Decimal {
        rate_for(self).map_or(Decimal::ZERO, |r| r.avg_km)
    }

    /// Delivery cost per km for the band, in BRL.
    #[must_use]
    pub fn cost_per_km(self) -> Decimal {
        rate_for(self).map_or(Decimal::ZERO, |r| r.cost_per_km)
    }

    /// Parses an optional band code, falling back to `default` for missing or
    /// unrecognized input. Surrounding whitespace is ignored.
    #[must_use]
    pub fn parse_or_default(code: Option<&str>, default: DistanceBand) -> Self {
        code.and_then(|c| c.trim().parse().ok()).unwrap_or(default)
    }
}

impl std::fmt::Display for DistanceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DistanceBand {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DistanceBand::ALL
            .into_iter()
            .find(|band| band.code() == s)
            .ok_or_else(|| CoreError::UnknownDistanceBand(s.to_owned()))
    }
}

fn rate_for(band: DistanceBand) -> Option<&'static BandRate> {
    BAND_RATES.iter().find(|r| r.band == band)
}

/// Flat delivery fee for `band`: `avg_km * cost_per_km`, rounded to cents.
#[must_use]
pub fn fee_for_band(band: DistanceBand) -> Decimal {
    (band.avg_km() * band.cost_per_km())
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Same as [`fee_for_band`] but keyed by wire code.
///
/// Unrecognized codes yield a zero fee rather than an error; validating the
/// band is the caller's job.
#[must_use]
pub fn fee_for_band_code(code: &str) -> Decimal {
    code.parse::<DistanceBand>()
        .map_or(Decimal::ZERO, fee_for_band)
}
