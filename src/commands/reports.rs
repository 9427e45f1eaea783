// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::period_arg;
use crate::db::SqliteSource;
use crate::models::{CategorySummary, DailyBalance, OverviewMetrics};
use crate::query::Dashboard;
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("overview", sub)) => overview(conn, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(conn, sub)?,
        Some(("daily", sub)) => daily(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn overview_data(conn: &Connection, sub: &clap::ArgMatches) -> Result<OverviewMetrics> {
    let period = period_arg(sub)?;
    Dashboard::new(SqliteSource::new(conn)).overview_metrics(period.year(), period.month())
}

/// Largest spend first; the engine itself reports first-seen order.
pub fn category_data(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<CategorySummary>> {
    let period = period_arg(sub)?;
    let mut summaries = Dashboard::new(SqliteSource::new(conn))
        .spending_by_category(period.year(), period.month())?;
    summaries.sort_by(|a, b| b.total.cmp(&a.total));
    Ok(summaries)
}

pub fn daily_data(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<DailyBalance>> {
    let period = period_arg(sub)?;
    Dashboard::new(SqliteSource::new(conn)).daily_balances(period.year(), period.month())
}

fn overview(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_arg(sub)?;
    let metrics = overview_data(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &metrics)? {
        let ccy = get_currency(conn)?;
        let data = vec![
            vec!["Income".into(), fmt_money(&metrics.total_income, &ccy, false)],
            vec!["Expense".into(), fmt_money(&metrics.total_expense, &ccy, false)],
            vec!["Net".into(), fmt_money(&metrics.net_amount, &ccy, true)],
            vec!["Transactions".into(), metrics.transaction_count.to_string()],
        ];
        println!("{}", period.label());
        println!("{}", pretty_table(&["Metric", "Value"], data));
    }
    Ok(())
}

fn spend_by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let summaries = category_data(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summaries)? {
        let ccy = get_currency(conn)?;
        let data = summaries
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    fmt_money(&s.total, &ccy, false),
                    s.count.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Count"], data));
    }
    Ok(())
}

fn daily(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let days = daily_data(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &days)? {
        let ccy = get_currency(conn)?;
        let data = days
            .iter()
            .map(|d| {
                vec![
                    d.date.clone(),
                    fmt_money(&d.income, &ccy, false),
                    fmt_money(&d.expense, &ccy, false),
                    fmt_money(&d.balance, &ccy, true),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Income", "Expense", "Balance"], data)
        );
    }
    Ok(())
}
