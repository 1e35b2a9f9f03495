// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::money::{percent_of, round2, sum};
use crate::snapshot::Snapshot;

/// Bumped whenever the persisted layout changes; older blobs are discarded.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    A,
    B,
}

impl Party {
    pub const BOTH: [Party; 2] = [Party::A, Party::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Party::A => "a",
            Party::B => "b",
        }
    }
}

impl FromStr for Party {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" => Ok(Party::A),
            "b" => Ok(Party::B),
            other => Err(format!("Unknown party '{}', expected a|b", other)),
        }
    }
}

/// Who a recorded movement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payer {
    A,
    B,
    Shared,
}

// YYYY-MM
static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(0[1-9]|1[0-2])$").expect("static month pattern"));

/// A calendar month, always rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(Month { year, month })
        } else {
            None
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Month::of(Utc::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let caps = MONTH_RE
            .captures(s)
            .ok_or_else(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
        let year: i32 = caps[1]
            .parse()
            .map_err(|_| format!("Invalid year in '{}'", s))?;
        let month: u32 = caps[2]
            .parse()
            .map_err(|_| format!("Invalid month in '{}'", s))?;
        Month::new(year, month).ok_or_else(|| format!("Invalid month '{}'", s))
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeCategory {
    Housing,
    Energy,
    Food,
    Transport,
    Insurance,
    Internet,
    Phone,
    Entertainment,
    Other,
}

impl ChargeCategory {
    pub const ALL: [ChargeCategory; 9] = [
        ChargeCategory::Housing,
        ChargeCategory::Energy,
        ChargeCategory::Food,
        ChargeCategory::Transport,
        ChargeCategory::Insurance,
        ChargeCategory::Internet,
        ChargeCategory::Phone,
        ChargeCategory::Entertainment,
        ChargeCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeCategory::Housing => "housing",
            ChargeCategory::Energy => "energy",
            ChargeCategory::Food => "food",
            ChargeCategory::Transport => "transport",
            ChargeCategory::Insurance => "insurance",
            ChargeCategory::Internet => "internet",
            ChargeCategory::Phone => "phone",
            ChargeCategory::Entertainment => "entertainment",
            ChargeCategory::Other => "other",
        }
    }
}

impl FromStr for ChargeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ChargeCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("Unknown charge category '{}'", s.trim()))
    }
}

/// A recurring household charge shared by both parties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub category: ChargeCategory,
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCharge {
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub category: ChargeCategory,
    pub paid: bool,
    pub paid_date: Option<NaiveDate>,
}

impl NewCharge {
    pub fn new(name: impl Into<String>, amount: Decimal, due_date: NaiveDate) -> Self {
        NewCharge {
            name: name.into(),
            amount,
            due_date,
            category: ChargeCategory::Other,
            paid: false,
            paid_date: None,
        }
    }

    pub fn category(mut self, category: ChargeCategory) -> Self {
        self.category = category;
        self
    }

    pub fn paid_on(mut self, date: NaiveDate) -> Self {
        self.paid = true;
        self.paid_date = Some(date);
        self
    }
}

/// Partial update; `None` leaves the field untouched. `paid_date` uses a
/// nested option so that it can be cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChargePatch {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    pub category: Option<ChargeCategory>,
    pub paid: Option<bool>,
    pub paid_date: Option<Option<NaiveDate>>,
}

impl ChargePatch {
    pub fn is_empty(&self) -> bool {
        *self == ChargePatch::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Transport,
    Leisure,
    Food,
    Other,
}

impl FromStr for BudgetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transport" => Ok(BudgetCategory::Transport),
            "leisure" => Ok(BudgetCategory::Leisure),
            "food" => Ok(BudgetCategory::Food),
            "other" => Ok(BudgetCategory::Other),
            other => Err(format!("Unknown budget category '{}'", other)),
        }
    }
}

impl BudgetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetCategory::Transport => "transport",
            BudgetCategory::Leisure => "leisure",
            BudgetCategory::Food => "food",
            BudgetCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertLevel {
    Normal,
    Warning,
    Limit,
}

/// Sub-budget owned by one party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalBudget {
    pub id: String,
    pub owner: Party,
    pub name: String,
    pub allocated_amount: Decimal,
    pub spent_amount: Decimal,
    pub category: BudgetCategory,
    pub month: Month,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl PersonalBudget {
    pub fn remaining(&self) -> Decimal {
        round2(self.allocated_amount - self.spent_amount)
    }

    pub fn usage_percent(&self) -> Decimal {
        if self.allocated_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        percent_of(self.spent_amount, self.allocated_amount)
    }

    /// `Warning` from 80 % usage, `Limit` from 100 %.
    pub fn alert_level(&self) -> AlertLevel {
        let usage = self.usage_percent();
        if usage >= Decimal::ONE_HUNDRED {
            AlertLevel::Limit
        } else if usage >= Decimal::from(80) {
            AlertLevel::Warning
        } else {
            AlertLevel::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPersonalBudget {
    pub name: String,
    pub allocated_amount: Decimal,
    pub spent_amount: Decimal,
    pub category: BudgetCategory,
    pub month: Month,
    pub deadline: Option<NaiveDate>,
}

impl NewPersonalBudget {
    pub fn new(name: impl Into<String>, allocated_amount: Decimal, month: Month) -> Self {
        NewPersonalBudget {
            name: name.into(),
            allocated_amount,
            spent_amount: Decimal::ZERO,
            category: BudgetCategory::Other,
            month,
            deadline: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalBudgetPatch {
    pub name: Option<String>,
    pub allocated_amount: Option<Decimal>,
    pub spent_amount: Option<Decimal>,
    pub category: Option<BudgetCategory>,
    pub month: Option<Month>,
    pub deadline: Option<Option<NaiveDate>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for GoalPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(GoalPriority::Low),
            "medium" => Ok(GoalPriority::Medium),
            "high" => Ok(GoalPriority::High),
            other => Err(format!("Unknown priority '{}', expected low|medium|high", other)),
        }
    }
}

impl GoalPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPriority::Low => "low",
            GoalPriority::Medium => "medium",
            GoalPriority::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalContribution {
    pub timestamp: DateTime<Utc>,
    pub delta: Decimal,
}

/// A savings target. `saved_amount` is the clamped running sum of `history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub saved_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub priority: GoalPriority,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub history: Vec<GoalContribution>,
}

impl Goal {
    pub fn is_reached(&self) -> bool {
        self.saved_amount >= self.target_amount
    }

    /// Progress in percent, capped at 100.
    pub fn progress_percent(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        percent_of(self.saved_amount, self.target_amount).min(Decimal::ONE_HUNDRED)
    }

    pub fn left_to_save(&self) -> Decimal {
        round2(self.target_amount - self.saved_amount).max(Decimal::ZERO)
    }

    /// Days until the deadline; negative once it has passed.
    pub fn days_left(&self, today: NaiveDate) -> Option<i64> {
        self.deadline.map(|d| (d - today).num_days())
    }

    /// Amount to put aside per day to reach the target by the deadline.
    pub fn required_per_day(&self, today: NaiveDate) -> Option<Decimal> {
        let days = self.days_left(today)?;
        Some(round2(self.left_to_save() / Decimal::from(days.max(1))))
    }
}

/// Totals across all goals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStats {
    pub count: usize,
    pub reached: usize,
    pub total_target: Decimal,
    pub total_saved: Decimal,
    pub global_percent: Decimal,
    pub remaining: Decimal,
}

impl GoalStats {
    pub fn of(goals: &[Goal]) -> Self {
        let total_target = sum(goals.iter().map(|g| g.target_amount));
        let total_saved = sum(goals.iter().map(|g| g.saved_amount));
        GoalStats {
            count: goals.len(),
            reached: goals.iter().filter(|g| g.is_reached()).count(),
            total_target,
            total_saved,
            global_percent: percent_of(total_saved, total_target),
            remaining: round2(total_target - total_saved),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub priority: GoalPriority,
    pub description: String,
}

impl NewGoal {
    pub fn new(name: impl Into<String>, target_amount: Decimal) -> Self {
        NewGoal {
            name: name.into(),
            target_amount,
            deadline: None,
            priority: GoalPriority::default(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub target_amount: Option<Decimal>,
    pub deadline: Option<Option<NaiveDate>>,
    pub priority: Option<GoalPriority>,
    pub description: Option<String>,
}

/// An expense or income recorded outside the monthly charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: String,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub payer: Payer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub snapshot: Snapshot,
}

/// Append-only log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HistoryEntry {
    Expense(Movement),
    Income(Movement),
    Snapshot(SnapshotRecord),
}

impl HistoryEntry {
    pub fn id(&self) -> &str {
        match self {
            HistoryEntry::Expense(m) | HistoryEntry::Income(m) => &m.id,
            HistoryEntry::Snapshot(s) => &s.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            HistoryEntry::Expense(_) => "expense",
            HistoryEntry::Income(_) => "income",
            HistoryEntry::Snapshot(_) => "snapshot",
        }
    }

    pub fn as_snapshot(&self) -> Option<&Snapshot> {
        match self {
            HistoryEntry::Snapshot(s) => Some(&s.snapshot),
            _ => None,
        }
    }
}

/// The aggregate root, persisted as one blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub schema_version: u32,
    pub current_month: Month,
    pub income_a: Decimal,
    pub income_b: Decimal,
    pub charges: Vec<Charge>,
    pub personal_budgets_a: Vec<PersonalBudget>,
    pub personal_budgets_b: Vec<PersonalBudget>,
    pub goals: Vec<Goal>,
    pub history: Vec<HistoryEntry>,
    pub communal_savings: Decimal,
}

impl AppState {
    pub fn income(&self, party: Party) -> Decimal {
        match party {
            Party::A => self.income_a,
            Party::B => self.income_b,
        }
    }

    pub fn budgets(&self, owner: Party) -> &[PersonalBudget] {
        match owner {
            Party::A => &self.personal_budgets_a,
            Party::B => &self.personal_budgets_b,
        }
    }

    pub fn budgets_mut(&mut self, owner: Party) -> &mut Vec<PersonalBudget> {
        match owner {
            Party::A => &mut self.personal_budgets_a,
            Party::B => &mut self.personal_budgets_b,
        }
    }
}
