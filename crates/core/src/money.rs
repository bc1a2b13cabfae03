//! Monetary amounts in the smallest currency unit.

use num_format::{Locale, ToFormattedString as _};
use serde::{Deserialize, Serialize};

pub use iso_currency::Currency;

/// A monetary amount: minor units (e.g. cents) plus its currency.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the smallest unit of `currency` (e.g. cents for USD).
    minor_units: i64,
    currency: Currency,
}

impl Money {
    pub fn from_minor_units(minor_units: i64, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

/// Standard number of decimal places for the given currency
/// (ex. JPY = 0, USD = 2).
fn decimal_places(currency: Currency) -> usize {
    currency.exponent().unwrap_or(0) as usize
}

/// Format a minor-unit amount with thousands separators, the currency's
/// decimal places, and its symbol.
///
/// Uses en-locale grouping ('.' as decimal mark, i.e. 1,000.00) regardless of
/// the user's locale. Could be generalized in the future.
pub fn format_amount(minor_units: i64, currency: Currency) -> String {
    let places = decimal_places(currency);
    if places == 0 {
        return format!(
            "{} {}",
            minor_units.to_formatted_string(&Locale::en),
            currency.symbol()
        );
    }

    let scale = 10_i64.pow(places as u32);
    let integer_part = minor_units / scale;
    let fractional_part = (minor_units % scale).abs();
    // num-format only carries the sign when the integer part is nonzero.
    let sign = if minor_units < 0 && integer_part == 0 {
        "-"
    } else {
        ""
    };
    format!(
        "{}{}.{:0places$} {}",
        sign,
        integer_part.to_formatted_string(&Locale::en),
        fractional_part,
        currency.symbol()
    )
}
