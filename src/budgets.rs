// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly spending budgets. These sit beside the engine: they consume its
//! category totals and never feed back into aggregation.

use crate::models::CategorySummary;
use crate::period::Period;
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use rusqlite::{Connection, params};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_BUDGETS: [(&str, i64); 7] = [
    ("Food & Dining", 500),
    ("Transportation", 300),
    ("Shopping", 400),
    ("Entertainment", 200),
    ("Bills & Utilities", 600),
    ("Healthcare", 250),
    ("Other", 200),
];

/// Category -> monthly budget. Categories without an entry have a budget
/// of zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Budgets {
    amounts: BTreeMap<String, Decimal>,
}

impl Default for Budgets {
    fn default() -> Self {
        Budgets {
            amounts: DEFAULT_BUDGETS
                .iter()
                .map(|(c, a)| (c.to_string(), Decimal::from(*a)))
                .collect(),
        }
    }
}

impl Budgets {
    pub fn empty() -> Self {
        Budgets {
            amounts: BTreeMap::new(),
        }
    }

    pub fn get(&self, category: &str) -> Decimal {
        self.amounts.get(category).copied().unwrap_or(Decimal::ZERO)
    }

    /// Negative amounts are stored as zero.
    pub fn set(&mut self, category: &str, amount: Decimal) {
        self.amounts
            .insert(category.to_string(), amount.max(Decimal::ZERO));
    }

    pub fn total(&self) -> Decimal {
        self.amounts.values().copied().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.amounts.iter().map(|(c, a)| (c.as_str(), *a))
    }

    /// Defaults overlaid with whatever the store holds.
    pub fn load(conn: &Connection) -> Result<Budgets> {
        let mut budgets = Budgets::default();
        let mut stmt = conn.prepare("SELECT category, amount FROM budgets ORDER BY category")?;
        let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
        for row in rows {
            let (category, amount_s) = row?;
            let amount = amount_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid budget amount '{}' for {}", amount_s, category))?;
            budgets.set(&category, amount);
        }
        Ok(budgets)
    }

    pub fn save(conn: &Connection, category: &str, amount: Decimal) -> Result<Decimal> {
        let stored = amount.max(Decimal::ZERO);
        conn.execute(
            "INSERT INTO budgets(category, amount) VALUES (?1, ?2)
             ON CONFLICT(category) DO UPDATE SET amount=excluded.amount",
            params![category, stored.to_string()],
        )?;
        Ok(stored)
    }
}

/// Whole-number percentage of `part` over `whole`, 0 when there is no budget.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// How fast the month's budget is being used up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetPace {
    pub spent: Decimal,
    pub budget: Decimal,
    pub remaining: Decimal,
    pub pct: Decimal,
    pub days_elapsed: u32,
    pub days_in_month: u32,
    pub daily_rate: Decimal,
    pub projected: Decimal,
}

impl BudgetPace {
    /// `today` decides how much of the month has passed: its day-of-month
    /// inside the period, the whole month once it is over, nothing before it
    /// starts.
    pub fn compute(spent: Decimal, budget: Decimal, period: &Period, today: NaiveDate) -> Self {
        let days_in_month = period.days_in_month();
        let days_elapsed = if period.contains_date(today) {
            today.day()
        } else if today > period.last_day() {
            days_in_month
        } else {
            0
        };
        let daily_rate = if days_elapsed > 0 {
            (spent / Decimal::from(days_elapsed)).round_dp(2)
        } else {
            Decimal::ZERO
        };
        let projected = if days_elapsed > 0 {
            (spent * Decimal::from(days_in_month) / Decimal::from(days_elapsed)).round_dp(2)
        } else {
            Decimal::ZERO
        };
        BudgetPace {
            spent,
            budget,
            remaining: budget - spent,
            pct: percent_of(spent, budget),
            days_elapsed,
            days_in_month,
            daily_rate,
            projected,
        }
    }

    pub fn over_budget(&self) -> bool {
        self.spent > self.budget
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProgress {
    pub category: String,
    pub spent: Decimal,
    pub budget: Decimal,
    pub pct: Decimal,
}

/// Budgeted categories with spending, largest spend first.
pub fn category_progress(
    spending: &[CategorySummary],
    budgets: &Budgets,
    top: usize,
) -> Vec<CategoryProgress> {
    let mut rows: Vec<CategoryProgress> = spending
        .iter()
        .filter(|s| budgets.get(&s.category) > Decimal::ZERO)
        .map(|s| {
            let budget = budgets.get(&s.category);
            CategoryProgress {
                category: s.category.clone(),
                spent: s.total,
                budget,
                pct: percent_of(s.total, budget),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.spent.cmp(&a.spent));
    rows.truncate(top);
    rows
}
