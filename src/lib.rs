// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod cli;
pub mod commands;
pub mod db;
pub mod demo;
pub mod engine;
pub mod error;
pub mod models;
pub mod period;
pub mod query;
pub mod source;
pub mod utils;

pub use error::{EngineError, EngineResult};
pub use period::Period;
