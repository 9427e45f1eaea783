// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::transaction_date;
use crate::models::{EXPENSE_CATEGORIES, INCOME_CATEGORY, Transaction, TransactionType};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub issue: &'static str,
    pub id: String,
    pub detail: String,
}

/// Scans raw rows, so one broken record does not hide the others.
pub fn findings(conn: &Connection) -> Result<Vec<Finding>> {
    let mut out = Vec::new();
    let mut stmt =
        conn.prepare("SELECT id, amount, type, category, date FROM transactions ORDER BY rowid")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: String = r.get(0)?;
        let amount_s: String = r.get(1)?;
        let type_s: String = r.get(2)?;
        let category: String = r.get(3)?;
        let date: String = r.get(4)?;

        let amount = match amount_s.parse::<Decimal>() {
            Ok(a) => a,
            Err(_) => {
                out.push(finding("bad_amount", &id, amount_s));
                continue;
            }
        };
        let r#type = match type_s.parse::<TransactionType>() {
            Ok(t) => t,
            Err(_) => {
                out.push(finding("bad_type", &id, type_s));
                continue;
            }
        };
        let tx = Transaction {
            id: id.clone(),
            description: String::new(),
            amount,
            r#type,
            category: category.clone(),
            date,
            created_at: String::new(),
        };
        if let Err(e) = transaction_date(&tx) {
            out.push(finding("malformed_date", &id, e.to_string()));
        }
        match r#type {
            TransactionType::Income if amount.is_sign_negative() && !amount.is_zero() => {
                out.push(finding("negative_income", &id, amount.to_string()));
            }
            TransactionType::Income if category != INCOME_CATEGORY => {
                out.push(finding("income_category", &id, category));
            }
            TransactionType::Expense
                if !category.trim().is_empty()
                    && !EXPENSE_CATEGORIES.contains(&category.as_str()) =>
            {
                out.push(finding("unknown_category", &id, category));
            }
            _ => {}
        }
    }
    Ok(out)
}

fn finding(issue: &'static str, id: &str, detail: String) -> Finding {
    Finding {
        issue,
        id: id.to_string(),
        detail,
    }
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = findings(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
        return Ok(());
    }
    for f in &rows {
        tracing::warn!(issue = f.issue, id = %f.id, detail = %f.detail, "doctor finding");
    }
    let data = rows
        .into_iter()
        .map(|f| vec![f.issue.to_string(), f.id, f.detail])
        .collect();
    println!("{}", pretty_table(&["Issue", "Transaction", "Detail"], data));
    Ok(())
}
