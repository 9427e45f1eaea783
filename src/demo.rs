// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Seeded sample ledger for trying the dashboard without real data.

use crate::models::{EXPENSE_CATEGORIES, INCOME_CATEGORY, Transaction, TransactionType};
use crate::period::Period;
use chrono::{Datelike, Local, Months, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use uuid::Builder;

pub const DEFAULT_COUNT: usize = 200;
pub const DEFAULT_SEED: u64 = 42;
/// Months before the current one that receive data.
pub const MONTHS_BACK: u32 = 6;

const INCOME_MERCHANTS: [&str; 6] = [
    "Salary",
    "Freelance",
    "Dividends",
    "Refund",
    "Side gig",
    "Bonus",
];

fn merchants(category: &str) -> &'static [&'static str] {
    match category {
        "Food & Dining" => &["Restaurant", "Grocery", "Coffee", "Uber Eats", "Supermarket"],
        "Transportation" => &["Gas", "Uber", "Parking", "Transit", "Car maintenance"],
        "Shopping" => &["Amazon", "Target", "Online", "Mall"],
        "Entertainment" => &["Netflix", "Spotify", "Games", "Concert", "Movies"],
        "Bills & Utilities" => &["Electric", "Internet", "Rent", "Phone", "Insurance"],
        "Healthcare" => &["Pharmacy", "Doctor", "Gym", "Dental"],
        _ => &["ATM", "Transfer", "Misc"],
    }
}

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// Whole cents between `min` and `max` units.
fn random_amount<R: Rng>(rng: &mut R, min: i64, max: i64) -> Decimal {
    Decimal::new(rng.random_range(min * 100..=max * 100), 2)
}

fn months_back(today: NaiveDate, back: u32) -> Option<Period> {
    let first = today.with_day(1)?.checked_sub_months(Months::new(back))?;
    Period::containing(first).ok()
}

fn record<R: Rng>(
    rng: &mut R,
    period: &Period,
    description: &str,
    amount: Decimal,
    r#type: TransactionType,
    category: &str,
) -> Transaction {
    let offset = rng.random_range(0..period.days_in_month()) as u64;
    let day = period.first_day() + chrono::Days::new(offset);
    let created = day
        .and_hms_opt(
            rng.random_range(0..24),
            rng.random_range(0..60),
            rng.random_range(0..60),
        )
        .unwrap_or_default();
    // stored like the schema default: UTC with a `Z`
    let created = created
        .and_local_timezone(Local)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
        .unwrap_or_else(|| created.and_utc());
    Transaction {
        id: Builder::from_random_bytes(rng.random::<[u8; 16]>())
            .into_uuid()
            .to_string(),
        description: description.to_string(),
        amount,
        r#type,
        category: category.to_string(),
        date: day.format("%Y-%m-%d").to_string(),
        created_at: created.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
    }
}

/// Two to four paychecks in each of the last `MONTHS_BACK + 1` months, then
/// expenses spread over the same months until `count` records exist. Newest
/// first. The same seed and `today` always give the same ledger.
pub fn generate(count: usize, today: NaiveDate, seed: u64) -> Vec<Transaction> {
    let mut rng = StdRng::seed_from_u64(seed);
    let periods: Vec<Period> = (0..=MONTHS_BACK)
        .filter_map(|back| months_back(today, back))
        .collect();
    if periods.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(count);
    for period in &periods {
        let paychecks = rng.random_range(2..=4);
        for _ in 0..paychecks {
            let description = pick(&mut rng, &INCOME_MERCHANTS);
            let amount = random_amount(&mut rng, 800, 4500);
            let tx = record(
                &mut rng,
                period,
                description,
                amount,
                TransactionType::Income,
                INCOME_CATEGORY,
            );
            out.push(tx);
        }
    }

    while out.len() < count {
        let period = periods[rng.random_range(0..periods.len())];
        let category = pick(&mut rng, &EXPENSE_CATEGORIES);
        let description = pick(&mut rng, merchants(category));
        let amount = -random_amount(&mut rng, 5, 350);
        let tx = record(
            &mut rng,
            &period,
            description,
            amount,
            TransactionType::Expense,
            category,
        );
        out.push(tx);
    }

    // YYYY-MM-DD sorts chronologically as text
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}
