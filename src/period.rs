// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{EngineError, EngineResult};
use anyhow::Context;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::FromStr;

pub const MIN_YEAR: i32 = 1000;
pub const MAX_YEAR: i32 = 9999;

/// A validated calendar month. `month` is 0-indexed (0 = January) to match
/// the query contract; `YYYY-MM` strings are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    first: NaiveDate,
    last: NaiveDate,
}

impl Period {
    /// Rejects out-of-range values instead of rolling over into a
    /// neighbouring month.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPeriod { year, month };
        if month > 11 || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(invalid());
        }
        let first = NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or_else(invalid)?;
        let (ny, nm) = if month == 11 {
            (year + 1, 1)
        } else {
            (year, month + 2)
        };
        let last = NaiveDate::from_ymd_opt(ny, nm, 1)
            .and_then(|next| next.pred_opt())
            .ok_or_else(invalid)?;
        Ok(Period { first, last })
    }

    pub fn containing(date: NaiveDate) -> EngineResult<Self> {
        Period::new(date.year(), date.month0())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 0-indexed month.
    pub fn month(&self) -> u32 {
        self.first.month0()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    pub fn days_in_month(&self) -> u32 {
        self.last.day()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.first.iter_days().take(self.days_in_month() as usize)
    }

    /// First instant of the month.
    pub fn start(&self) -> NaiveDateTime {
        self.first.and_time(NaiveTime::MIN)
    }

    /// Last millisecond of the month (`23:59:59.999` on the last day).
    pub fn end(&self) -> NaiveDateTime {
        (self.last + Duration::days(1)).and_time(NaiveTime::MIN) - Duration::milliseconds(1)
    }

    /// Membership is decided on the calendar day, so every instant of the
    /// first and last day belongs to the month.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let day = at.date();
        day >= self.first && day <= self.last
    }

    pub fn contains_date(&self, day: NaiveDate) -> bool {
        day >= self.first && day <= self.last
    }

    /// Zero-based offset of `day` from the first of the month.
    pub(crate) fn day_index(&self, day: NaiveDate) -> Option<usize> {
        if self.contains_date(day) {
            Some((day - self.first).num_days() as usize)
        } else {
            None
        }
    }

    /// e.g. "January 2025"
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%Y-%m"))
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let first = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
        Ok(Period::new(first.year(), first.month0())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths_follow_calendar() {
        assert_eq!(Period::new(2024, 1).unwrap().days_in_month(), 29);
        assert_eq!(Period::new(2025, 1).unwrap().days_in_month(), 28);
        assert_eq!(Period::new(1900, 1).unwrap().days_in_month(), 28);
        assert_eq!(Period::new(2000, 1).unwrap().days_in_month(), 29);
        assert_eq!(Period::new(2025, 3).unwrap().days_in_month(), 30);
        assert_eq!(Period::new(2025, 11).unwrap().days_in_month(), 31);
    }

    #[test]
    fn out_of_range_month_is_rejected() {
        assert_eq!(
            Period::new(2025, 12),
            Err(EngineError::InvalidPeriod {
                year: 2025,
                month: 12
            })
        );
        assert!(Period::new(25, 0).is_err());
        assert!(Period::new(10_000, 0).is_err());
    }

    #[test]
    fn bounds_cover_whole_last_day() {
        let p = Period::new(2025, 11).unwrap();
        assert_eq!(p.start().to_string(), "2025-12-01 00:00:00");
        assert_eq!(p.end().to_string(), "2025-12-31 23:59:59.999");
        assert!(p.contains(p.end()));
        assert!(!p.contains(p.end() + Duration::milliseconds(1)));
    }

    #[test]
    fn parses_one_indexed_month_strings() {
        let p: Period = "2025-03".parse().unwrap();
        assert_eq!((p.year(), p.month()), (2025, 2));
        assert_eq!(p.to_string(), "2025-03");
        assert_eq!(p.label(), "March 2025");
        assert!("2025-13".parse::<Period>().is_err());
        assert!("March".parse::<Period>().is_err());
    }
}
