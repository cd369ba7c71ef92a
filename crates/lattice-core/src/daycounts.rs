//! Day count conventions for time to expiry.
//!
//! Pricing works on a single scalar time to expiry in years. These helpers
//! turn a day count (or a pair of dates) into that scalar once, at the edge
//! of the library.
//!
//! # Supported Conventions
//!
//! - [`DayCountConvention::Act360`]: Actual/360 - money market convention
//! - [`DayCountConvention::Act365Fixed`]: Actual/365 Fixed
//!
//! # Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use lattice_core::daycounts::DayCountConvention;
//!
//! let dc = DayCountConvention::Act360;
//! let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
//!
//! assert_eq!(dc.year_fraction(start, end), 0.25);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LatticeError;

/// Day count convention used to convert calendar days into years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360 - Money market instruments
    #[default]
    #[serde(rename = "ACT/360")]
    Act360,

    /// Actual/365 Fixed
    #[serde(rename = "ACT/365F")]
    Act365Fixed,
}

impl DayCountConvention {
    /// Returns the conventional name of the day count.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
        }
    }

    /// Returns the year basis (denominator).
    #[must_use]
    pub const fn basis(&self) -> u32 {
        match self {
            DayCountConvention::Act360 => 360,
            DayCountConvention::Act365Fixed => 365,
        }
    }

    /// Year fraction for a number of actual days.
    #[must_use]
    pub fn year_fraction_from_days(&self, days: i64) -> f64 {
        days as f64 / f64::from(self.basis())
    }

    /// Actual number of days between two dates. Negative if `end < start`.
    #[must_use]
    pub fn day_count(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        (end - start).num_days()
    }

    /// Year fraction between two dates.
    #[must_use]
    pub fn year_fraction(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        self.year_fraction_from_days(self.day_count(start, end))
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),
            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACTUAL/365 FIXED"
            | "ACT365FIXED" | "ACT365" => Ok(DayCountConvention::Act365Fixed),
            _ => Err(LatticeError::invalid_input(
                "day_count",
                format!("unknown day count convention '{s}'"),
            )),
        }
    }
}
