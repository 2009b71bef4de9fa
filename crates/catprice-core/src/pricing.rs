//! Reverse-margin pricing.
//!
//! Given the price the catalog owner wants to *net* and a channel's fee
//! model, computes the price to list on that channel. The listed price `p`
//! satisfies `p * (1 - percent_total) - fixed_fee >= base`, with equality up
//! to the rounding policy, which only ever rounds up.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::fees::{Channel, FeeModel, RoundingMode};

/// Computes the channel-facing price that nets `base_price` after `fee`.
///
/// - A combined percentage of 100% or more passes `base_price` through
///   unchanged; there is no price that could recover the margin.
/// - A zero or negative `base_price` yields zero.
/// - Arithmetic overflow on absurd inputs yields zero.
#[must_use]
pub fn channel_price(base_price: Decimal, fee: &FeeModel) -> Decimal {
    if fee.percent_total >= Decimal::ONE {
        return base_price;
    }
    if base_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let rounded = gross_up(base_price, fee).and_then(|gross| match fee.rounding {
        RoundingMode::None => Some(round_cents(gross)),
        RoundingMode::End90 => round_up_to_ending(gross, dec!(0.90)),
        RoundingMode::End99 => round_up_to_ending(gross, dec!(0.99)),
    });

    rounded.map_or(Decimal::ZERO, round_cents)
}

/// `(base + fixed_fee) / (1 - percent_total)`.
fn gross_up(base_price: Decimal, fee: &FeeModel) -> Option<Decimal> {
    let net_share = Decimal::ONE.checked_sub(fee.percent_total)?;
    base_price.checked_add(fee.fixed_fee)?.checked_div(net_share)
}

/// Smallest `N + ending` that is `>= value`.
fn round_up_to_ending(value: Decimal, ending: Decimal) -> Option<Decimal> {
    let whole = value.floor();
    let same = whole.checked_add(ending)?;
    if same >= value {
        return Some(same);
    }
    whole.checked_add(Decimal::ONE)?.checked_add(ending)
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Listed prices for one base price across every channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelPrices {
    #[serde(with = "rust_decimal::serde::float")]
    pub ifood: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub food99: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub keeta: Decimal,
}

impl ChannelPrices {
    /// Prices `base_price` on every channel. Keeta's fixed fee is replaced by
    /// `keeta_fixed_fee` (the distance-band delivery fee).
    #[must_use]
    pub fn for_base(base_price: Decimal, keeta_fixed_fee: Decimal) -> Self {
        Self {
            ifood: channel_price(base_price, &Channel::Ifood.fee_model()),
            food99: channel_price(base_price, &Channel::Food99.fee_model()),
            keeta: channel_price(
                base_price,
                &Channel::Keeta.fee_model().with_fixed_fee(keeta_fixed_fee),
            ),
        }
    }

    #[must_use]
    pub fn get(&self, channel: Channel) -> Decimal {
        match channel {
            Channel::Ifood => self.ifood,
            Channel::Food99 => self.food99,
            Channel::Keeta => self.keeta,
        }
    }
}
