// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TransactionType};
use crate::source::{Snapshot, TransactionSource};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Moneylens", "moneylens"));

/// Overrides the platform data dir when set.
pub const DB_ENV: &str = "MONEYLENS_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("moneylens.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::info!(path = %path.display(), "opened transaction store");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT PRIMARY KEY,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        category TEXT NOT NULL DEFAULT '',
        date TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS budgets(
        category TEXT PRIMARY KEY,
        amount TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

/// Every stored transaction, in insertion order.
pub fn load_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, description, amount, type, category, date, created_at
         FROM transactions ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, description, amount_s, type_s, category, date, created_at) = row?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' on transaction {}", amount_s, id))?;
        let r#type = type_s
            .parse::<TransactionType>()
            .with_context(|| format!("Invalid type on transaction {}", id))?;
        data.push(Transaction {
            id,
            description,
            amount,
            r#type,
            category,
            date,
            created_at,
        });
    }
    Ok(data)
}

pub fn insert_transactions(conn: &mut Connection, txs: &[Transaction]) -> Result<usize> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO transactions(id, description, amount, type, category, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for t in txs {
            stmt.execute(params![
                t.id,
                t.description,
                t.amount.to_string(),
                t.r#type.as_str(),
                t.category,
                t.date,
                t.created_at
            ])
            .with_context(|| format!("Insert transaction {}", t.id))?;
        }
    }
    tx.commit()?;
    tracing::info!(count = txs.len(), "stored transactions");
    Ok(txs.len())
}

pub fn clear_transactions(conn: &Connection) -> Result<usize> {
    Ok(conn.execute("DELETE FROM transactions", [])?)
}

/// The SQLite store as a transaction source. Each call reads the table
/// fresh, so one query sees one consistent read.
pub struct SqliteSource<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteSource<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        SqliteSource { conn }
    }
}

impl TransactionSource for SqliteSource<'_> {
    fn all_transactions(&self) -> Result<Snapshot> {
        Ok(load_transactions(self.conn)?.into())
    }
}
