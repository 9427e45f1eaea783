// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{self, transaction_date};
use crate::error::EngineResult;
use crate::models::{CategorySummary, DailyBalance, OverviewMetrics, Transaction};
use crate::period::Period;
use crate::source::TransactionSource;
use anyhow::Result;
use std::cmp::Reverse;

/// The dashboard's query surface. Every call takes one snapshot from the
/// source and recomputes from it.
pub struct Dashboard<S> {
    source: S,
}

impl<S: TransactionSource> Dashboard<S> {
    pub fn new(source: S) -> Self {
        Dashboard { source }
    }

    /// Whole collection, newest first.
    pub fn transactions(&self, limit: Option<usize>) -> Result<Vec<Transaction>> {
        let snapshot = self.source.all_transactions()?;
        let mut list = newest_first(snapshot.iter().collect())?;
        if let Some(n) = limit {
            list.truncate(n);
        }
        tracing::debug!(returned = list.len(), total = snapshot.len(), "transactions");
        Ok(list.into_iter().cloned().collect())
    }

    pub fn transactions_by_month(&self, year: i32, month: u32) -> Result<Vec<Transaction>> {
        let period = Period::new(year, month)?;
        let snapshot = self.source.all_transactions()?;
        let window = newest_first(engine::filter_by_period(&snapshot[..], &period)?)?;
        tracing::debug!(%period, count = window.len(), "transactions by month");
        Ok(window.into_iter().cloned().collect())
    }

    pub fn overview_metrics(&self, year: i32, month: u32) -> Result<OverviewMetrics> {
        let period = Period::new(year, month)?;
        let snapshot = self.source.all_transactions()?;
        let window = engine::filter_by_period(&snapshot[..], &period)?;
        let metrics = engine::overview_metrics(&window);
        tracing::debug!(%period, count = metrics.transaction_count, "overview metrics");
        Ok(metrics)
    }

    pub fn spending_by_category(&self, year: i32, month: u32) -> Result<Vec<CategorySummary>> {
        let period = Period::new(year, month)?;
        let snapshot = self.source.all_transactions()?;
        let window = engine::filter_by_period(&snapshot[..], &period)?;
        let summaries = engine::spending_by_category(&window);
        tracing::debug!(%period, categories = summaries.len(), "spending by category");
        Ok(summaries)
    }

    pub fn daily_balances(&self, year: i32, month: u32) -> Result<Vec<DailyBalance>> {
        let period = Period::new(year, month)?;
        let snapshot = self.source.all_transactions()?;
        let days = engine::daily_balances_for(&snapshot[..], &period)?;
        tracing::debug!(%period, days = days.len(), "daily balances");
        Ok(days)
    }
}

/// Stable sort by date descending; equal dates keep their relative order.
fn newest_first(list: Vec<&Transaction>) -> EngineResult<Vec<&Transaction>> {
    let mut keyed = list
        .into_iter()
        .map(|t| transaction_date(t).map(|at| (at, t)))
        .collect::<EngineResult<Vec<_>>>()?;
    keyed.sort_by_key(|(at, _)| Reverse(*at));
    Ok(keyed.into_iter().map(|(_, t)| t).collect())
}
