// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The state container: canonical collections, validated mutations, and
//! whole-state persistence after every change.
//!
//! Every mutation runs against a copy of the state; the copy replaces the
//! live state only once it has been written to storage, so a failed call
//! leaves nothing behind.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::allocation::Split;
use crate::error::{Error, Result};
use crate::markers::FiredMarker;
use crate::models::{
    AppState, Charge, ChargeCategory, ChargePatch, Goal, GoalContribution, GoalPatch,
    HistoryEntry, Month, Movement, NewCharge, NewGoal, NewPersonalBudget, Party, Payer,
    PersonalBudget, PersonalBudgetPatch, SCHEMA_VERSION, SnapshotRecord,
};
use crate::money::{MAX_AMOUNT, round2, sum};
use crate::seed;
use crate::snapshot::{Snapshot, build_snapshot};
use crate::storage::Storage;

/// Fixed key the state blob is stored under.
pub const STATE_KEY: &str = "duobudget:state";

fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn require_name(field: &'static str, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn require_bounded(field: &'static str, amount: Decimal) -> Result<Decimal> {
    if amount.abs() > MAX_AMOUNT {
        return Err(Error::validation(
            field,
            format!("must not exceed {MAX_AMOUNT}"),
        ));
    }
    Ok(round2(amount))
}

fn require_positive(field: &'static str, amount: Decimal) -> Result<Decimal> {
    let amount = require_bounded(field, amount)?;
    if amount <= Decimal::ZERO {
        return Err(Error::validation(field, "must be greater than zero"));
    }
    Ok(amount)
}

fn require_non_negative(field: &'static str, amount: Decimal) -> Result<Decimal> {
    let amount = require_bounded(field, amount)?;
    if amount < Decimal::ZERO {
        return Err(Error::validation(field, "must not be negative"));
    }
    Ok(amount)
}

/// Reads the persisted state, falling back to the seed baseline when the key
/// is missing, the schema version differs, or the blob cannot be decoded.
pub fn load_state<S: Storage>(storage: &S) -> Result<AppState> {
    let Some(raw) = storage.get(STATE_KEY)? else {
        info!("no stored state, starting from seed");
        return Ok(seed::baseline(Month::current()));
    };
    let value: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(err) => {
            warn!(%err, "stored state is not valid JSON, starting from seed");
            return Ok(seed::baseline(Month::current()));
        }
    };
    let version = value.get("schemaVersion").and_then(|v| v.as_u64());
    if version != Some(u64::from(SCHEMA_VERSION)) {
        warn!(?version, expected = SCHEMA_VERSION, "schema version mismatch, starting from seed");
        return Ok(seed::baseline(Month::current()));
    }
    match serde_json::from_value::<AppState>(value) {
        Ok(state) => Ok(state),
        Err(err) => {
            warn!(%err, "stored state does not match the schema, starting from seed");
            Ok(seed::baseline(Month::current()))
        }
    }
}

/// Serializes and writes the whole state under [`STATE_KEY`].
pub fn save_state<S: Storage>(storage: &S, state: &AppState) -> Result<()> {
    let json = serde_json::to_string(state)?;
    storage.put(STATE_KEY, &json)?;
    debug!(bytes = json.len(), "state persisted");
    Ok(())
}

pub struct Store<S: Storage> {
    storage: S,
    state: AppState,
}

impl<S: Storage> Store<S> {
    /// Rehydrates from `storage`.
    pub fn open(storage: S) -> Result<Self> {
        let state = load_state(&storage)?;
        Ok(Store { storage, state })
    }

    /// Wraps an explicit state without reading storage.
    pub fn with_state(storage: S, state: AppState) -> Self {
        Store { storage, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn commit<T, F>(&mut self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&mut AppState) -> Result<T>,
    {
        let mut next = self.state.clone();
        let out = f(&mut next)?;
        save_state(&self.storage, &next)?;
        self.state = next;
        info!(op, "state updated");
        Ok(out)
    }

    // ---- charges ----

    pub fn add_charge(&mut self, data: NewCharge) -> Result<String> {
        let name = require_name("name", &data.name)?;
        let amount = require_positive("amount", data.amount)?;
        let id = fresh_id();
        let charge = Charge {
            id: id.clone(),
            name,
            amount,
            due_date: data.due_date,
            category: data.category,
            paid: data.paid,
            paid_date: if data.paid { data.paid_date } else { None },
        };
        self.commit("add_charge", |s| {
            s.charges.push(charge);
            Ok(())
        })?;
        Ok(id)
    }

    /// Applies `patch` to an existing charge; `NotFound` when `id` is absent.
    pub fn update_charge(&mut self, id: &str, patch: ChargePatch) -> Result<()> {
        let name = patch
            .name
            .as_deref()
            .map(|n| require_name("name", n))
            .transpose()?;
        let amount = patch
            .amount
            .map(|a| require_positive("amount", a))
            .transpose()?;
        self.commit("update_charge", |s| {
            let charge = s
                .charges
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| Error::not_found("charge", id))?;
            if let Some(name) = name {
                charge.name = name;
            }
            if let Some(amount) = amount {
                charge.amount = amount;
            }
            if let Some(due) = patch.due_date {
                charge.due_date = due;
            }
            if let Some(category) = patch.category {
                charge.category = category;
            }
            if let Some(paid) = patch.paid {
                charge.paid = paid;
                if !paid {
                    charge.paid_date = None;
                }
            }
            if let Some(paid_date) = patch.paid_date {
                charge.paid_date = paid_date;
            }
            Ok(())
        })
    }

    /// Removes a charge; absent ids are ignored.
    pub fn remove_charge(&mut self, id: &str) -> Result<()> {
        self.commit("remove_charge", |s| {
            s.charges.retain(|c| c.id != id);
            Ok(())
        })
    }

    // ---- personal budgets ----

    pub fn add_personal_budget(&mut self, data: NewPersonalBudget, owner: Party) -> Result<String> {
        let name = require_name("name", &data.name)?;
        let allocated_amount = require_non_negative("allocatedAmount", data.allocated_amount)?;
        let spent_amount = require_non_negative("spentAmount", data.spent_amount)?;
        let id = fresh_id();
        let budget = PersonalBudget {
            id: id.clone(),
            owner,
            name,
            allocated_amount,
            spent_amount,
            category: data.category,
            month: data.month,
            deadline: data.deadline,
        };
        self.commit("add_personal_budget", |s| {
            s.budgets_mut(owner).push(budget);
            Ok(())
        })?;
        Ok(id)
    }

    /// Looks the budget up in both partitions; `NotFound` when absent.
    pub fn update_personal_budget(&mut self, id: &str, patch: PersonalBudgetPatch) -> Result<()> {
        let name = patch
            .name
            .as_deref()
            .map(|n| require_name("name", n))
            .transpose()?;
        let allocated = patch
            .allocated_amount
            .map(|a| require_non_negative("allocatedAmount", a))
            .transpose()?;
        let spent = patch
            .spent_amount
            .map(|a| require_non_negative("spentAmount", a))
            .transpose()?;
        self.commit("update_personal_budget", |s| {
            let budget = s
                .personal_budgets_a
                .iter_mut()
                .chain(s.personal_budgets_b.iter_mut())
                .find(|b| b.id == id)
                .ok_or_else(|| Error::not_found("personal budget", id))?;
            if let Some(name) = name {
                budget.name = name;
            }
            if let Some(allocated) = allocated {
                budget.allocated_amount = allocated;
            }
            if let Some(spent) = spent {
                budget.spent_amount = spent;
            }
            if let Some(category) = patch.category {
                budget.category = category;
            }
            if let Some(month) = patch.month {
                budget.month = month;
            }
            if let Some(deadline) = patch.deadline {
                budget.deadline = deadline;
            }
            Ok(())
        })
    }

    pub fn remove_personal_budget(&mut self, id: &str) -> Result<()> {
        self.commit("remove_personal_budget", |s| {
            s.personal_budgets_a.retain(|b| b.id != id);
            s.personal_budgets_b.retain(|b| b.id != id);
            Ok(())
        })
    }

    // ---- goals ----

    pub fn add_goal(&mut self, data: NewGoal) -> Result<String> {
        let name = require_name("name", &data.name)?;
        let target_amount = require_positive("targetAmount", data.target_amount)?;
        let id = fresh_id();
        let goal = Goal {
            id: id.clone(),
            name,
            target_amount,
            saved_amount: Decimal::ZERO,
            deadline: data.deadline,
            priority: data.priority,
            description: data.description.trim().to_string(),
            history: Vec::new(),
        };
        self.commit("add_goal", |s| {
            s.goals.push(goal);
            Ok(())
        })?;
        Ok(id)
    }

    /// Edits goal metadata. Savings only move through
    /// [`Store::adjust_goal_savings`].
    pub fn update_goal(&mut self, id: &str, patch: GoalPatch) -> Result<()> {
        let name = patch
            .name
            .as_deref()
            .map(|n| require_name("name", n))
            .transpose()?;
        let target = patch
            .target_amount
            .map(|a| require_positive("targetAmount", a))
            .transpose()?;
        self.commit("update_goal", |s| {
            let goal = find_goal(s, id)?;
            if let Some(name) = name {
                goal.name = name;
            }
            if let Some(target) = target {
                goal.target_amount = target;
            }
            if let Some(deadline) = patch.deadline {
                goal.deadline = deadline;
            }
            if let Some(priority) = patch.priority {
                goal.priority = priority;
            }
            if let Some(description) = patch.description {
                goal.description = description.trim().to_string();
            }
            Ok(())
        })
    }

    /// Records a contribution (positive) or withdrawal (negative) and returns
    /// the new saved amount. Withdrawing more than is saved is rejected.
    pub fn adjust_goal_savings(&mut self, id: &str, delta: Decimal) -> Result<Decimal> {
        let delta = require_bounded("delta", delta)?;
        if delta.is_zero() {
            return Err(Error::validation("delta", "must not be zero"));
        }
        self.commit("adjust_goal_savings", |s| {
            let goal = find_goal(s, id)?;
            let next = goal
                .saved_amount
                .checked_add(delta)
                .map(round2)
                .ok_or_else(|| Error::validation("delta", "saved amount would overflow"))?;
            if next < Decimal::ZERO {
                return Err(Error::validation(
                    "delta",
                    format!(
                        "cannot withdraw {} with only {} saved",
                        -delta, goal.saved_amount
                    ),
                ));
            }
            goal.history.push(GoalContribution {
                timestamp: Utc::now(),
                delta,
            });
            goal.saved_amount = next.max(Decimal::ZERO);
            Ok(goal.saved_amount)
        })
    }

    pub fn remove_goal(&mut self, id: &str) -> Result<()> {
        self.commit("remove_goal", |s| {
            s.goals.retain(|g| g.id != id);
            Ok(())
        })
    }

    // ---- history ----

    /// Appends to the history log. Entries are never edited or removed.
    pub fn append_history_entry(&mut self, entry: HistoryEntry) -> Result<()> {
        if let HistoryEntry::Expense(m) | HistoryEntry::Income(m) = &entry {
            validate_movement(m)?;
        }
        self.commit("append_history_entry", |s| {
            s.history.push(entry);
            Ok(())
        })
    }

    /// Snapshots the current month from the live salaries and charges and
    /// appends it to the history.
    pub fn record_snapshot(&mut self) -> Result<Snapshot> {
        let snapshot = build_snapshot(
            self.state.current_month,
            self.state.income_a,
            self.state.income_b,
            &self.state.charges,
        );
        let entry = HistoryEntry::Snapshot(SnapshotRecord {
            id: snapshot.id.clone(),
            date: snapshot.created_at,
            snapshot: snapshot.clone(),
        });
        self.append_history_entry(entry)?;
        Ok(snapshot)
    }

    // ---- scalars ----

    pub fn set_salaries(&mut self, a: Decimal, b: Decimal) -> Result<()> {
        let a = require_non_negative("incomeA", a)?;
        let b = require_non_negative("incomeB", b)?;
        self.commit("set_salaries", |s| {
            s.income_a = a;
            s.income_b = b;
            Ok(())
        })
    }

    pub fn set_current_month(&mut self, month: Month) -> Result<()> {
        self.commit("set_current_month", |s| {
            s.current_month = month;
            Ok(())
        })
    }

    pub fn set_communal_savings(&mut self, amount: Decimal) -> Result<()> {
        let amount = require_non_negative("communalSavings", amount)?;
        self.commit("set_communal_savings", |s| {
            s.communal_savings = amount;
            Ok(())
        })
    }

    /// Replaces everything with the seed baseline. Callers confirm first.
    pub fn reset_to_seed(&mut self) -> Result<()> {
        warn!("resetting state to seed baseline");
        self.commit("reset_to_seed", |s| {
            *s = seed::baseline(Month::current());
            Ok(())
        })
    }

    // ---- notification markers ----

    pub fn has_fired(&self, marker: &FiredMarker) -> Result<bool> {
        self.storage.has_marker(marker)
    }

    pub fn mark_fired(&self, marker: &FiredMarker) -> Result<()> {
        self.storage.insert_marker(marker)?;
        debug!(entity = %marker.entity_id, condition = %marker.condition, period = %marker.period, "marker recorded");
        Ok(())
    }

    // ---- selectors ----

    pub fn charges(&self) -> &[Charge] {
        &self.state.charges
    }

    pub fn charge(&self, id: &str) -> Option<&Charge> {
        self.state.charges.iter().find(|c| c.id == id)
    }

    pub fn personal_budgets(&self, owner: Party) -> &[PersonalBudget] {
        self.state.budgets(owner)
    }

    pub fn personal_budget(&self, id: &str) -> Option<&PersonalBudget> {
        self.state
            .personal_budgets_a
            .iter()
            .chain(self.state.personal_budgets_b.iter())
            .find(|b| b.id == id)
    }

    pub fn goals(&self) -> &[Goal] {
        &self.state.goals
    }

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.state.goals.iter().find(|g| g.id == id)
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.state.history
    }

    /// Snapshots in the order they were recorded.
    pub fn snapshots(&self) -> Vec<&Snapshot> {
        self.state
            .history
            .iter()
            .filter_map(HistoryEntry::as_snapshot)
            .collect()
    }

    pub fn charges_total(&self) -> Decimal {
        sum(self.state.charges.iter().map(|c| c.amount))
    }

    pub fn paid_total(&self) -> Decimal {
        sum(self.state.charges.iter().filter(|c| c.paid).map(|c| c.amount))
    }

    pub fn unpaid_total(&self) -> Decimal {
        sum(self.state.charges.iter().filter(|c| !c.paid).map(|c| c.amount))
    }

    /// Charge totals per category, largest first.
    pub fn charges_by_category(&self) -> Vec<(ChargeCategory, Decimal)> {
        let mut totals: Vec<(ChargeCategory, Decimal)> = ChargeCategory::ALL
            .into_iter()
            .map(|cat| {
                let total = sum(
                    self.state
                        .charges
                        .iter()
                        .filter(|c| c.category == cat)
                        .map(|c| c.amount),
                );
                (cat, total)
            })
            .filter(|(_, total)| !total.is_zero())
            .collect();
        totals.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        totals
    }

    /// Split for the live salaries and charges.
    pub fn current_split(&self) -> Split {
        Split::compute(self.state.income_a, self.state.income_b, self.charges_total())
    }

    /// Unpaid charges due on or before `date`.
    pub fn overdue_charges(&self, date: NaiveDate) -> Vec<&Charge> {
        self.state
            .charges
            .iter()
            .filter(|c| !c.paid && c.due_date <= date)
            .collect()
    }
}

fn find_goal<'a>(s: &'a mut AppState, id: &str) -> Result<&'a mut Goal> {
    s.goals
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or_else(|| Error::not_found("goal", id))
}

fn validate_movement(m: &Movement) -> Result<()> {
    require_positive("amount", m.amount)?;
    require_name("description", &m.description)?;
    Ok(())
}

/// Builds an expense or income movement with a fresh id.
pub fn new_movement(
    amount: Decimal,
    category: impl Into<String>,
    description: impl Into<String>,
    date: NaiveDate,
    payer: Payer,
) -> Movement {
    Movement {
        id: fresh_id(),
        amount: round2(amount),
        category: category.into(),
        description: description.into(),
        date,
        payer,
        budget_id: None,
    }
}
