// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over a transaction snapshot.
//!
//! Nothing here performs I/O or keeps state between calls. Functions that
//! need a transaction's date parse it and fail the whole call on the first
//! record that cannot be read; the totals only look at type and amount.

use crate::error::{EngineError, EngineResult};
use crate::models::{CategorySummary, DailyBalance, OTHER_CATEGORY, OverviewMetrics, Transaction};
use crate::period::Period;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use std::borrow::Borrow;
use std::collections::HashMap;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset-bearing forms that RFC 3339 rejects: missing seconds or a space
/// separator. A trailing `Z` is rewritten to `+00:00` before these are tried.
const OFFSET_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
];

fn records<T: Borrow<Transaction>>(transactions: &[T]) -> impl Iterator<Item = &Transaction> {
    transactions.iter().map(Borrow::<Transaction>::borrow)
}

/// Reads `tx.date` as a local, timezone-naive instant. Dates carrying an
/// explicit offset are moved onto the local calendar.
pub fn transaction_date(tx: &Transaction) -> EngineResult<NaiveDateTime> {
    let raw = tx.date.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day.and_time(NaiveTime::MIN));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(at);
        }
    }
    let err = match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => return Ok(at.with_timezone(&Local).naive_local()),
        Err(e) => e,
    };
    let zulu = match raw.strip_suffix(['Z', 'z']) {
        Some(head) => format!("{}+00:00", head),
        None => raw.to_string(),
    };
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(at) = DateTime::parse_from_str(&zulu, fmt) {
            return Ok(at.with_timezone(&Local).naive_local());
        }
    }
    Err(EngineError::MalformedTransaction {
        id: tx.id.clone(),
        date: tx.date.clone(),
        reason: err.to_string(),
    })
}

/// Transactions dated inside the given month (`month` is 0-11). Output keeps
/// input order.
pub fn filter_by_month<T: Borrow<Transaction>>(
    transactions: &[T],
    year: i32,
    month: u32,
) -> EngineResult<Vec<&Transaction>> {
    let period = Period::new(year, month)?;
    filter_by_period(transactions, &period)
}

pub fn filter_by_period<'a, T: Borrow<Transaction>>(
    transactions: &'a [T],
    period: &Period,
) -> EngineResult<Vec<&'a Transaction>> {
    let mut window = Vec::new();
    for tx in records(transactions) {
        if period.contains(transaction_date(tx)?) {
            window.push(tx);
        }
    }
    Ok(window)
}

/// Sum of income amounts, taken as stored (a negative income reduces it).
pub fn total_income<T: Borrow<Transaction>>(transactions: &[T]) -> Decimal {
    records(transactions)
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum()
}

/// Sum of expense magnitudes; the stored sign of an expense is ignored.
pub fn total_expense<T: Borrow<Transaction>>(transactions: &[T]) -> Decimal {
    records(transactions)
        .filter(|t| t.is_expense())
        .map(|t| t.amount.abs())
        .sum()
}

pub fn net_amount<T: Borrow<Transaction>>(transactions: &[T]) -> Decimal {
    total_income(transactions) - total_expense(transactions)
}

pub fn overview_metrics<T: Borrow<Transaction>>(transactions: &[T]) -> OverviewMetrics {
    let total_income = total_income(transactions);
    let total_expense = total_expense(transactions);
    OverviewMetrics {
        total_income,
        total_expense,
        net_amount: total_income - total_expense,
        transaction_count: transactions.len(),
    }
}

/// Expense bucket for a raw category label.
pub fn category_bucket(raw: &str) -> &str {
    if raw.trim().is_empty() {
        OTHER_CATEGORY
    } else {
        raw
    }
}

/// Expense totals per category, in order of first appearance. Categories
/// without expenses in the input are absent.
pub fn spending_by_category<T: Borrow<Transaction>>(transactions: &[T]) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for tx in records(transactions).filter(|t| t.is_expense()) {
        let category = category_bucket(&tx.category);
        let slot = *index.entry(category).or_insert_with(|| {
            summaries.push(CategorySummary {
                category: category.to_string(),
                total: Decimal::ZERO,
                count: 0,
            });
            summaries.len() - 1
        });
        summaries[slot].total += tx.amount.abs();
        summaries[slot].count += 1;
    }
    summaries
}

/// One entry per day of the month in chronological order. `balance` is the
/// running net since the first of the month and starts from zero.
pub fn daily_balances<T: Borrow<Transaction>>(
    transactions: &[T],
    year: i32,
    month: u32,
) -> EngineResult<Vec<DailyBalance>> {
    let period = Period::new(year, month)?;
    daily_balances_for(transactions, &period)
}

pub fn daily_balances_for<T: Borrow<Transaction>>(
    transactions: &[T],
    period: &Period,
) -> EngineResult<Vec<DailyBalance>> {
    let mut buckets = vec![(Decimal::ZERO, Decimal::ZERO); period.days_in_month() as usize];
    for tx in filter_by_period(transactions, period)? {
        // keyed on the full date, not the day-of-month number
        let Some(slot) = period.day_index(transaction_date(tx)?.date()) else {
            continue;
        };
        if tx.is_income() {
            buckets[slot].0 += tx.amount;
        } else {
            buckets[slot].1 += tx.amount.abs();
        }
    }

    let mut running = Decimal::ZERO;
    Ok(period
        .days()
        .zip(buckets)
        .map(|(day, (income, expense))| {
            running += income - expense;
            DailyBalance {
                date: day.format("%Y-%m-%d").to_string(),
                income,
                expense,
                balance: running,
            }
        })
        .collect())
}
