// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneylens::commands::doctor;
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE transactions(
            id TEXT PRIMARY KEY,
            description TEXT,
            amount TEXT NOT NULL,
            type TEXT NOT NULL,
            category TEXT NOT NULL,
            date TEXT NOT NULL,
            created_at TEXT
        );
        INSERT INTO transactions(id,amount,type,category,date) VALUES
            ('ok','-10','expense','Shopping','2025-05-01'),
            ('blank','-3','expense','','2025-05-01'),
            ('late','-1','expense','Other','2025-05-02T18:30'),
            ('when','-4','expense','Other','05/04/2025'),
            ('refund','-50','income','Income','2025-05-04'),
            ('gift','50','income','Gifts','2025-05-04'),
            ('pets','-9','expense','Pets','2025-05-05'),
            ('nan','ten','expense','Other','2025-05-05'),
            ('kind','1','transfer','Other','2025-05-05');
        "#,
    )
    .unwrap();
    conn
}

#[test]
fn doctor_reports_each_problem_row() {
    let conn = setup();
    let found: Vec<(&str, String)> = doctor::findings(&conn)
        .unwrap()
        .into_iter()
        .map(|f| (f.issue, f.id))
        .collect();
    assert_eq!(
        found,
        vec![
            ("malformed_date", "when".to_string()),
            ("negative_income", "refund".to_string()),
            ("income_category", "gift".to_string()),
            ("unknown_category", "pets".to_string()),
            ("bad_amount", "nan".to_string()),
            ("bad_type", "kind".to_string()),
        ]
    );
}

#[test]
fn clean_store_has_no_findings() {
    let conn = setup();
    conn.execute(
        "DELETE FROM transactions WHERE id NOT IN ('ok','blank','late')",
        [],
    )
    .unwrap();
    assert!(doctor::findings(&conn).unwrap().is_empty());
}
