// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::period_arg;
use crate::db::SqliteSource;
use crate::models::Transaction;
use crate::query::Dashboard;
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table};
use anyhow::{Context, Result, anyhow};
use regex::RegexBuilder;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("export", sub)) => export(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = get_currency(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.r#type.clone(),
                    fmt_money(&r.amount, &ccy, true),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Type", "Amount"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub amount: Decimal,
}

impl From<Transaction> for TransactionRow {
    fn from(t: Transaction) -> Self {
        TransactionRow {
            id: t.id,
            date: t.date,
            description: t.description,
            category: t.category,
            r#type: t.r#type.to_string(),
            amount: t.amount,
        }
    }
}

/// Newest first; filters apply before `--limit`. `--search` matches the
/// description or the category.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let dashboard = Dashboard::new(SqliteSource::new(conn));
    let mut list = if sub.get_one::<String>("month").is_some() {
        let period = period_arg(sub)?;
        dashboard.transactions_by_month(period.year(), period.month())?
    } else {
        dashboard.transactions(None)?
    };

    if let Some(kind) = sub.get_one::<String>("type") {
        list.retain(|t| t.r#type.as_str() == kind.as_str());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        list.retain(|t| t.category == *cat);
    }
    if let Some(pat) = sub.get_one::<String>("search") {
        let re = RegexBuilder::new(pat)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("Invalid search pattern '{}'", pat))?;
        list.retain(|t| re.is_match(&t.description) || re.is_match(&t.category));
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        list.truncate(*limit);
    }
    Ok(list.into_iter().map(TransactionRow::from).collect())
}

fn export(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .context("--format is required")?
        .to_lowercase();
    let out = sub
        .get_one::<String>("out")
        .context("--out is required")?
        .trim();
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }

    let period = period_arg(sub)?;
    let dashboard = Dashboard::new(SqliteSource::new(conn));
    let rows: Vec<TransactionRow> = dashboard
        .transactions_by_month(period.year(), period.month())?
        .into_iter()
        .map(TransactionRow::from)
        .collect();

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
        for row in &rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&rows)?)
            .with_context(|| format!("Write {}", out))?;
    }
    tracing::info!(%period, count = rows.len(), path = out, "exported transactions");
    println!("Exported {} transactions for {} to {}", rows.len(), period.label(), out);
    Ok(())
}
