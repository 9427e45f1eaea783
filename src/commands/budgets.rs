// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::period_arg;
use crate::budgets::{BudgetPace, Budgets, CategoryProgress, category_progress};
use crate::db::SqliteSource;
use crate::query::Dashboard;
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("pace", sub)) => pace(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cat = sub
        .get_one::<String>("category")
        .context("--category is required")?
        .trim();
    if cat.is_empty() {
        return Err(anyhow!("Category must not be empty"));
    }
    let amount = parse_decimal(sub.get_one::<String>("amount").context("--amount is required")?)?;
    let stored = Budgets::save(conn, cat, amount)?;
    println!("Budget set for {} = {}", cat, fmt_money(&stored, &get_currency(conn)?, false));
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let budgets = Budgets::load(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budgets)? {
        let ccy = get_currency(conn)?;
        let mut data: Vec<Vec<String>> = budgets
            .iter()
            .map(|(c, a)| vec![c.to_string(), fmt_money(&a, &ccy, false)])
            .collect();
        data.push(vec!["Total".into(), fmt_money(&budgets.total(), &ccy, false)]);
        println!("{}", pretty_table(&["Category", "Budget"], data));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct PaceReport {
    pub month: String,
    pub pace: BudgetPace,
    pub categories: Vec<CategoryProgress>,
}

/// `today` positions the pace inside the requested month.
pub fn pace_report(
    conn: &Connection,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<PaceReport> {
    let period = period_arg(sub)?;
    let top = *sub.get_one::<usize>("top").unwrap_or(&3);
    let dashboard = Dashboard::new(SqliteSource::new(conn));
    let budgets = Budgets::load(conn)?;
    let metrics = dashboard.overview_metrics(period.year(), period.month())?;
    let spending = dashboard.spending_by_category(period.year(), period.month())?;

    Ok(PaceReport {
        month: period.to_string(),
        pace: BudgetPace::compute(metrics.total_expense, budgets.total(), &period, today),
        categories: category_progress(&spending, &budgets, top),
    })
}

fn pace(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_arg(sub)?;
    let report = pace_report(conn, sub, chrono::Local::now().date_naive())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    let ccy = get_currency(conn)?;
    let p = &report.pace;
    println!(
        "{}: spent {} of {} ({}%)",
        period.label(),
        fmt_money(&p.spent, &ccy, false),
        fmt_money(&p.budget, &ccy, false),
        p.pct
    );
    println!(
        "{}/{} days, {} per day, projected {}{}",
        p.days_elapsed,
        p.days_in_month,
        fmt_money(&p.daily_rate, &ccy, false),
        fmt_money(&p.projected, &ccy, false),
        if p.over_budget() { " (over budget)" } else { "" }
    );
    let data = report
        .categories
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                fmt_money(&c.spent, &ccy, false),
                fmt_money(&c.budget, &ccy, false),
                format!("{}%", c.pct),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Budget", "Used"], data));
    Ok(())
}
