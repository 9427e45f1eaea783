// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures raised by the aggregation engine.
///
/// Both variants reject the whole call: a query never returns a partial
/// result that silently skipped a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid period {year}/{month}: month must be 0-11 and year 1000-9999")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("Malformed transaction '{id}': cannot read date '{date}' ({reason})")]
    MalformedTransaction {
        id: String,
        date: String,
        reason: String,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
