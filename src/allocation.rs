// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Income-proportional sharing of common charges between the two parties.
//!
//! Each party contributes to the shared charges in proportion to their share
//! of the household income. Every function rounds its own result to the cent
//! and treats negative incomes as zero, so callers can feed raw form values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Party;
use crate::money::{non_negative, percent_of, round2};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub fn total_income(a: Decimal, b: Decimal) -> Decimal {
    non_negative(a)
        .checked_add(non_negative(b))
        .map(round2)
        .unwrap_or(Decimal::ZERO)
}

/// Percentage of the household income earned by `party`.
///
/// Returns zero for both parties when the total income is zero.
pub fn share_percent(party: Party, a: Decimal, b: Decimal) -> Decimal {
    let a = non_negative(a);
    let b = non_negative(b);
    let Some(total) = a.checked_add(b) else {
        return Decimal::ZERO;
    };
    let own = match party {
        Party::A => a,
        Party::B => b,
    };
    percent_of(own, total)
}

/// Portion of `total_charges` owed at `percent`. Percentages outside
/// `[0, 100]` are invalid and yield zero.
pub fn allocate(total_charges: Decimal, percent: Decimal) -> Decimal {
    if percent < Decimal::ZERO || percent > HUNDRED {
        return Decimal::ZERO;
    }
    total_charges
        .checked_mul(percent)
        .and_then(|v| v.checked_div(HUNDRED))
        .map(round2)
        .unwrap_or(Decimal::ZERO)
}

/// What is left of `income` once `allocated` is paid. Negative values mean
/// the party is over-committed.
pub fn remainder(income: Decimal, allocated: Decimal) -> Decimal {
    income
        .checked_sub(allocated)
        .map(round2)
        .unwrap_or(Decimal::ZERO)
}

/// The full split for one pair of incomes and a charge total.
///
/// Party B takes the complement of A's percentage and whatever is left of
/// the charges after A's cut, so `percent_a + percent_b == 100` and
/// `allocated_a + allocated_b == total_charges` whenever there is income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    pub income_a: Decimal,
    pub income_b: Decimal,
    pub total_income: Decimal,
    pub total_charges: Decimal,
    pub percent_a: Decimal,
    pub percent_b: Decimal,
    pub allocated_a: Decimal,
    pub allocated_b: Decimal,
    pub remainder_a: Decimal,
    pub remainder_b: Decimal,
}

impl Split {
    pub fn compute(income_a: Decimal, income_b: Decimal, total_charges: Decimal) -> Self {
        let income_a = round2(non_negative(income_a));
        let income_b = round2(non_negative(income_b));
        let total_charges = round2(total_charges);
        let total_income = total_income(income_a, income_b);
        let (percent_a, percent_b, allocated_a, allocated_b) = if total_income.is_zero() {
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
        } else {
            let percent_a = share_percent(Party::A, income_a, income_b);
            let allocated_a = allocate(total_charges, percent_a);
            (
                percent_a,
                HUNDRED - percent_a,
                allocated_a,
                remainder(total_charges, allocated_a),
            )
        };
        Split {
            income_a,
            income_b,
            total_income,
            total_charges,
            percent_a,
            percent_b,
            allocated_a,
            allocated_b,
            remainder_a: remainder(income_a, allocated_a),
            remainder_b: remainder(income_b, allocated_b),
        }
    }

    pub fn percent(&self, party: Party) -> Decimal {
        match party {
            Party::A => self.percent_a,
            Party::B => self.percent_b,
        }
    }

    pub fn allocated(&self, party: Party) -> Decimal {
        match party {
            Party::A => self.allocated_a,
            Party::B => self.allocated_b,
        }
    }

    pub fn remainder(&self, party: Party) -> Decimal {
        match party {
            Party::A => self.remainder_a,
            Party::B => self.remainder_b,
        }
    }

    /// Combined leftover of both parties.
    pub fn total_remainder(&self) -> Decimal {
        self.remainder_a
            .checked_add(self.remainder_b)
            .map(round2)
            .unwrap_or(Decimal::ZERO)
    }

    /// Share of the income consumed by charges, in percent.
    pub fn charge_ratio(&self) -> Decimal {
        percent_of(self.total_charges, self.total_income)
    }
}
