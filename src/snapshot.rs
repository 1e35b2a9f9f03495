// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocation::Split;
use crate::models::{Charge, Month};
use crate::money::{round2, sum};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    pub a: Decimal,
    pub b: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeLine {
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeBreakdown {
    pub total: Decimal,
    pub details: Vec<ChargeLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationBreakdown {
    pub percent_a: Decimal,
    pub percent_b: Decimal,
    pub allocated_a: Decimal,
    pub allocated_b: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remainders {
    pub a: Decimal,
    pub b: Decimal,
}

/// Frozen record of one month's incomes, charges and split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: String,
    pub month: Month,
    pub created_at: DateTime<Utc>,
    pub income: IncomeBreakdown,
    pub charges: ChargeBreakdown,
    pub allocation: AllocationBreakdown,
    pub remainders: Remainders,
}

impl Snapshot {
    pub fn split(&self) -> Split {
        Split {
            income_a: self.income.a,
            income_b: self.income.b,
            total_income: self.income.total,
            total_charges: self.charges.total,
            percent_a: self.allocation.percent_a,
            percent_b: self.allocation.percent_b,
            allocated_a: self.allocation.allocated_a,
            allocated_b: self.allocation.allocated_b,
            remainder_a: self.remainders.a,
            remainder_b: self.remainders.b,
        }
    }

    pub fn total_remainder(&self) -> Decimal {
        self.split().total_remainder()
    }
}

/// Builds a snapshot stamped with the current time.
pub fn build_snapshot(month: Month, income_a: Decimal, income_b: Decimal, charges: &[Charge]) -> Snapshot {
    build_snapshot_at(month, income_a, income_b, charges, Utc::now())
}

/// Builds a snapshot stamped with `created_at`. The id combines the month,
/// the creation instant and a random suffix, so two snapshots of the same
/// month never share an id.
pub fn build_snapshot_at(
    month: Month,
    income_a: Decimal,
    income_b: Decimal,
    charges: &[Charge],
    created_at: DateTime<Utc>,
) -> Snapshot {
    let total_charges = sum(charges.iter().map(|c| c.amount));
    let split = Split::compute(income_a, income_b, total_charges);
    let suffix = uuid::Uuid::new_v4().simple().to_string();

    Snapshot {
        id: format!(
            "snapshot-{}-{}-{}",
            month,
            created_at.timestamp_millis(),
            &suffix[..8]
        ),
        month,
        created_at,
        income: IncomeBreakdown {
            a: split.income_a,
            b: split.income_b,
            total: split.total_income,
        },
        charges: ChargeBreakdown {
            total: split.total_charges,
            details: charges
                .iter()
                .map(|c| ChargeLine {
                    name: c.name.clone(),
                    amount: round2(c.amount),
                })
                .collect(),
        },
        allocation: AllocationBreakdown {
            percent_a: split.percent_a,
            percent_b: split.percent_b,
            allocated_a: split.allocated_a,
            allocated_b: split.allocated_b,
        },
        remainders: Remainders {
            a: split.remainder_a,
            b: split.remainder_b,
        },
    }
}
