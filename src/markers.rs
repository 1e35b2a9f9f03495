// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use crate::models::Month;

/// Condition a notification fires for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertCondition {
    BudgetWarning,
    BudgetLimit,
    GoalDeadline,
}

impl AlertCondition {
    pub fn tag(&self) -> &'static str {
        match self {
            AlertCondition::BudgetWarning => "budget-warning",
            AlertCondition::BudgetLimit => "budget-limit",
            AlertCondition::GoalDeadline => "goal-deadline",
        }
    }
}

impl fmt::Display for AlertCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AlertCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "budget-warning" => Ok(AlertCondition::BudgetWarning),
            "budget-limit" => Ok(AlertCondition::BudgetLimit),
            "goal-deadline" => Ok(AlertCondition::GoalDeadline),
            other => Err(format!("Unknown alert condition '{}'", other)),
        }
    }
}

/// Identity of a notification that must fire at most once per period.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FiredMarker {
    pub entity_id: String,
    pub condition: AlertCondition,
    pub period: String,
}

impl FiredMarker {
    pub fn new(entity_id: impl Into<String>, condition: AlertCondition, period: impl Into<String>) -> Self {
        FiredMarker {
            entity_id: entity_id.into(),
            condition,
            period: period.into(),
        }
    }

    /// Marker keyed by calendar month.
    pub fn monthly(entity_id: impl Into<String>, condition: AlertCondition, month: Month) -> Self {
        FiredMarker::new(entity_id, condition, month.to_string())
    }
}
