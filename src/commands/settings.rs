// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency, set_currency};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("currency", sub)) = m.subcommand() {
        match sub.get_one::<String>("code") {
            Some(code) => {
                set_currency(conn, code)?;
                println!("Display currency set to {}", get_currency(conn)?);
            }
            None => println!("{}", get_currency(conn)?),
        }
    }
    Ok(())
}
