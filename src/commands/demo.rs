// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{clear_transactions, insert_transactions};
use crate::demo::{DEFAULT_COUNT, DEFAULT_SEED, generate};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("seed", sub)) = m.subcommand() {
        seed(conn, sub)?;
    }
    Ok(())
}

fn seed(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let count = *sub.get_one::<usize>("count").unwrap_or(&DEFAULT_COUNT);
    let seed = *sub.get_one::<u64>("seed").unwrap_or(&DEFAULT_SEED);
    if sub.get_flag("replace") {
        let removed = clear_transactions(conn)?;
        tracing::info!(removed, "cleared transactions");
    }
    let today = chrono::Local::now().date_naive();
    let txs = generate(count, today, seed);
    let stored = insert_transactions(conn, &txs)?;
    println!("Seeded {} demo transactions (seed {})", stored, seed);
    Ok(())
}
