// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneylens::Period;
use moneylens::budgets::{BudgetPace, Budgets, category_progress, percent_of};
use moneylens::db;
use moneylens::models::CategorySummary;
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn defaults_cover_expense_categories() {
    let budgets = Budgets::default();
    assert_eq!(budgets.get("Food & Dining"), dec!(500));
    assert_eq!(budgets.get("Bills & Utilities"), dec!(600));
    assert_eq!(budgets.get("Income"), Decimal::ZERO);
    assert_eq!(budgets.get("Pets"), Decimal::ZERO);
    assert_eq!(budgets.total(), dec!(2450));
}

#[test]
fn stored_budgets_override_defaults_and_clamp() {
    let conn = setup();
    Budgets::save(&conn, "Shopping", dec!(150)).unwrap();
    let stored = Budgets::save(&conn, "Pets", dec!(-20)).unwrap();
    assert_eq!(stored, Decimal::ZERO);

    let budgets = Budgets::load(&conn).unwrap();
    assert_eq!(budgets.get("Shopping"), dec!(150));
    assert_eq!(budgets.get("Pets"), Decimal::ZERO);
    assert_eq!(budgets.get("Healthcare"), dec!(250));

    Budgets::save(&conn, "Shopping", dec!(175.50)).unwrap();
    assert_eq!(Budgets::load(&conn).unwrap().get("Shopping"), dec!(175.50));
}

#[test]
fn pace_projects_from_days_elapsed() {
    let march = Period::new(2025, 2).unwrap();

    let mid = BudgetPace::compute(dec!(310), dec!(1000), &march, day(2025, 3, 10));
    assert_eq!(mid.days_elapsed, 10);
    assert_eq!(mid.days_in_month, 31);
    assert_eq!(mid.daily_rate, dec!(31));
    assert_eq!(mid.projected, dec!(961));
    assert_eq!(mid.pct, dec!(31));
    assert_eq!(mid.remaining, dec!(690));
    assert!(!mid.over_budget());

    let past = BudgetPace::compute(dec!(310), dec!(300), &march, day(2025, 4, 2));
    assert_eq!(past.days_elapsed, 31);
    assert_eq!(past.projected, dec!(310));
    assert_eq!(past.pct, dec!(103));
    assert!(past.over_budget());

    let future = BudgetPace::compute(Decimal::ZERO, dec!(300), &march, day(2025, 2, 20));
    assert_eq!(future.days_elapsed, 0);
    assert_eq!(future.daily_rate, Decimal::ZERO);
    assert_eq!(future.projected, Decimal::ZERO);
}

#[test]
fn zero_budget_reads_as_zero_percent() {
    assert_eq!(percent_of(dec!(50), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(percent_of(dec!(1), dec!(3)), dec!(33));
    assert_eq!(percent_of(dec!(1), dec!(8)), dec!(13));
}

fn summary(category: &str, total: Decimal, count: usize) -> CategorySummary {
    CategorySummary {
        category: category.into(),
        total,
        count,
    }
}

#[test]
fn category_progress_keeps_budgeted_top_spenders() {
    let mut budgets = Budgets::empty();
    budgets.set("Food & Dining", dec!(200));
    budgets.set("Shopping", dec!(100));
    budgets.set("Transportation", dec!(50));

    let spending = vec![
        summary("Transportation", dec!(20), 1),
        summary("Pets", dec!(900), 3),
        summary("Food & Dining", dec!(150), 6),
        summary("Shopping", dec!(120), 2),
    ];
    let top = category_progress(&spending, &budgets, 2);
    let view: Vec<(&str, Decimal)> = top.iter().map(|c| (c.category.as_str(), c.pct)).collect();
    assert_eq!(view, vec![("Food & Dining", dec!(75)), ("Shopping", dec!(120))]);
}
