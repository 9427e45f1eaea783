// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneylens::commands::{budgets, reports};
use moneylens::{cli, db};
use rusqlite::Connection;
use rust_decimal_macros::dec;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO transactions(id,description,amount,type,category,date) VALUES \
        ('t1','Salary','2500','income','Income','2025-01-01'), \
        ('t2','Coffee','-4.50','expense','Food & Dining','2025-01-02'), \
        ('t3','Coffee beans','-18','expense','Food & Dining','2025-01-03'), \
        ('t4','Uber','-22.10','expense','Transportation','2025-01-03'), \
        ('t5','Rent','-1200','expense','Bills & Utilities','2025-02-01'), \
        ('t6','Refund','100','income','Income','2025-02-10T18:30')",
        [],
    )
    .unwrap();
    conn
}

fn report_matches(kind: &str, month: &str) -> clap::ArgMatches {
    let matches =
        cli::build_cli().get_matches_from(["moneylens", "report", kind, "--month", month]);
    match matches.subcommand() {
        Some(("report", report_m)) => match report_m.subcommand() {
            Some((_, sub)) => sub.clone(),
            None => panic!("no {} subcommand", kind),
        },
        _ => panic!("no report subcommand"),
    }
}

#[test]
fn overview_uses_the_calendar_month_given() {
    let conn = base_conn();

    let feb = reports::overview_data(&conn, &report_matches("overview", "2025-02")).unwrap();
    assert_eq!(feb.total_income, dec!(100));
    assert_eq!(feb.total_expense, dec!(1200));
    assert_eq!(feb.net_amount, dec!(-1100));
    assert_eq!(feb.transaction_count, 2);

    let jan = reports::overview_data(&conn, &report_matches("overview", "2025-01")).unwrap();
    assert_eq!(jan.total_income, dec!(2500));
    assert_eq!(jan.total_expense, dec!(44.60));
    assert_eq!(jan.transaction_count, 4);
}

#[test]
fn spend_by_category_is_sorted_largest_first() {
    let conn = base_conn();
    let rows =
        reports::category_data(&conn, &report_matches("spend-by-category", "2025-01")).unwrap();
    let view: Vec<(&str, usize)> = rows.iter().map(|s| (s.category.as_str(), s.count)).collect();
    assert_eq!(view, vec![("Food & Dining", 2), ("Transportation", 1)]);
    assert_eq!(rows[0].total, dec!(22.50));
}

#[test]
fn daily_report_covers_every_day_of_the_month() {
    let conn = base_conn();
    let days = reports::daily_data(&conn, &report_matches("daily", "2025-02")).unwrap();
    assert_eq!(days.len(), 28);
    assert_eq!(days[0].date, "2025-02-01");
    assert_eq!(days[0].balance, dec!(-1200));
    assert_eq!(days[9].income, dec!(100));
    assert_eq!(days[9].balance, dec!(-1100));
    assert_eq!(days[27].date, "2025-02-28");
    assert_eq!(days[27].balance, dec!(-1100));
}

#[test]
fn malformed_month_argument_is_rejected() {
    let conn = base_conn();
    assert!(reports::overview_data(&conn, &report_matches("overview", "2025-13")).is_err());
}

#[test]
fn budget_pace_reports_the_requested_month() {
    let conn = base_conn();
    let matches = cli::build_cli().get_matches_from([
        "moneylens", "budget", "pace", "--month", "2025-02", "--top", "1",
    ]);
    let Some(("budget", budget_m)) = matches.subcommand() else {
        panic!("no budget subcommand");
    };
    let Some(("pace", pace_m)) = budget_m.subcommand() else {
        panic!("no pace subcommand");
    };
    let today = NaiveDate::from_ymd_opt(2025, 2, 14).unwrap();
    let report = budgets::pace_report(&conn, pace_m, today).unwrap();

    assert_eq!(report.month, "2025-02");
    assert_eq!(report.pace.spent, dec!(1200));
    // default budgets add up to 2450
    assert_eq!(report.pace.budget, dec!(2450));
    assert_eq!(report.pace.pct, dec!(49));
    assert_eq!(report.pace.days_elapsed, 14);
    assert_eq!(report.pace.days_in_month, 28);
    assert_eq!(report.pace.daily_rate, dec!(85.71));
    assert_eq!(report.pace.projected, dec!(2400));
    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].category, "Bills & Utilities");
    assert_eq!(report.categories[0].pct, dec!(200));
}
