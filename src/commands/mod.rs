// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod budgets;
pub mod reports;
pub mod demo;
pub mod settings;
pub mod doctor;

use crate::period::Period;
use anyhow::Result;

/// `--month YYYY-MM`, or the current local month when absent.
pub fn period_arg(sub: &clap::ArgMatches) -> Result<Period> {
    match sub.get_one::<String>("month") {
        Some(m) => m.parse(),
        None => Ok(Period::containing(chrono::Local::now().date_naive())?),
    }
}
