// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Cent-precision arithmetic shared by every calculation.
//!
//! Nothing here fails: unusable input degrades to zero so that half-typed
//! form values never abort a computation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Largest amount accepted for a single value entered by a user.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Rounds to two decimal places, half away from zero on the cent boundary.
pub fn round2(x: Decimal) -> Decimal {
    x.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a float to a rounded amount; NaN and infinities become zero.
pub fn from_f64(x: f64) -> Decimal {
    if !x.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64_retain(x)
        .map(round2)
        .unwrap_or(Decimal::ZERO)
}

/// Missing values count as zero.
pub fn coerce(x: Option<Decimal>) -> Decimal {
    x.map(round2).unwrap_or(Decimal::ZERO)
}

/// Parses a user-typed amount, accepting `,` as decimal separator and
/// ignoring spaces and a trailing `€`. Anything unparsable is zero.
pub fn parse_lenient(s: &str) -> Decimal {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€' && *c != '\u{202f}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned
        .parse::<Decimal>()
        .map(round2)
        .unwrap_or(Decimal::ZERO)
}

/// Negative amounts are treated as zero.
pub fn non_negative(x: Decimal) -> Decimal {
    x.max(Decimal::ZERO)
}

/// Sums amounts, rounding the result. A sum that overflows is zero.
pub fn sum<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, a| acc.checked_add(a))
        .map(round2)
        .unwrap_or(Decimal::ZERO)
}

/// `part / whole * 100` rounded to the cent; zero when `whole` is zero or
/// the quotient overflows.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|q| q.checked_mul(Decimal::ONE_HUNDRED))
        .map(round2)
        .unwrap_or(Decimal::ZERO)
}
