// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneylens::{cli, commands::transactions, db};
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO transactions(id,description,amount,type,category,date) VALUES \
        ('x1','Corner Shop','-12.34','expense','Food & Dining','2025-01-02'), \
        ('x2','Salary','3000','income','Income','2025-01-01'), \
        ('x3','Later','-1','expense','Other','2025-02-01')",
        [],
    )
    .unwrap();
    conn
}

fn run_export(conn: &Connection, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "moneylens", "tx", "export", "--month", "2025-01", "--format", format, "--out", out,
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(conn, tx_m)
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn export_month_as_pretty_json() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    run_export(&conn, "json", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": "x1",
                "date": "2025-01-02",
                "description": "Corner Shop",
                "category": "Food & Dining",
                "type": "expense",
                "amount": "-12.34"
            },
            {
                "id": "x2",
                "date": "2025-01-01",
                "description": "Salary",
                "category": "Income",
                "type": "income",
                "amount": "3000"
            }
        ])
    );
}

#[test]
fn export_month_as_csv() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    run_export(&conn, "CSV", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "id,date,description,category,type,amount");
    assert_eq!(lines[1], "x1,2025-01-02,Corner Shop,Food & Dining,expense,-12.34");
    assert_eq!(lines.len(), 3);
}

#[test]
fn export_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    assert!(run_export(&conn, "xml", &out_path.to_string_lossy()).is_err());
    assert!(!out_path.exists());
}
