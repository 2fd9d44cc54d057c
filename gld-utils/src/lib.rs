//! Shared utility functions for GLD crates.

/// Period ("YYYY-MM") parsing and calendar boundary helpers.
pub mod dates {
    use crate::error::PeriodParseError;
    use chrono::{Datelike, Months, NaiveDate};

    /// Format of a canonical period key.
    pub const PERIOD_FORMAT: &str = "%Y-%m";

    /// Format a NaiveDate as "YYYY-MM"
    pub fn format_period(date: &NaiveDate) -> String {
        date.format(PERIOD_FORMAT).to_string()
    }

    /// Parse a "YYYY-MM" period into the first day of that month.
    ///
    /// Only the exact canonical shape is accepted: four year digits, a dash,
    /// two month digits. Anything else is rejected rather than guessed at.
    pub fn parse_period(s: &str) -> Result<NaiveDate, PeriodParseError> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(PeriodParseError(format!("expected YYYY-MM, got {s:?}")));
        }
        let year: i32 = s[..4]
            .parse()
            .map_err(|_| PeriodParseError(format!("bad year in {s:?}")))?;
        let month: u32 = s[5..]
            .parse()
            .map_err(|_| PeriodParseError(format!("bad month in {s:?}")))?;
        NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| PeriodParseError(format!("month out of range in {s:?}")))
    }

    /// First day of the month containing `date`.
    pub fn start_of_month(date: &NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap_or(*date)
    }

    /// Last day of the month containing `date`.
    pub fn end_of_month(date: &NaiveDate) -> NaiveDate {
        start_of_month(date)
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// January 1 of the year containing `date`.
    pub fn start_of_year(date: &NaiveDate) -> NaiveDate {
        date.with_ordinal(1).unwrap_or(*date)
    }

    /// December 31 of the year containing `date`.
    pub fn end_of_year(date: &NaiveDate) -> NaiveDate {
        NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(*date)
    }

    /// Shift a date by `n` calendar months (negative goes backwards).
    ///
    /// The day is clamped to the end of the target month, so Jan 31 + 1
    /// month is the last day of February. Returns None outside chrono's range.
    pub fn add_months(date: &NaiveDate, n: i32) -> Option<NaiveDate> {
        let months = Months::new(n.unsigned_abs());
        if n >= 0 {
            date.checked_add_months(months)
        } else {
            date.checked_sub_months(months)
        }
    }

}

/// Linear unit conversion for elevations.
pub mod units {
    use crate::error::UnitParseError;
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::str::FromStr;

    /// Feet in one meter.
    pub const FEET_PER_METER: f64 = 3.280_84;

    /// Vertical datum every stored elevation is expressed against.
    pub const DATUM_LABEL: &str = "IGLD-85";

    /// Unit system used at the presentation boundary. Stored data is always metric.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum UnitSystem {
        #[default]
        Metric,
        Imperial,
    }

    impl UnitSystem {
        /// Short axis label ("m" or "ft").
        pub fn label(&self) -> &'static str {
            match self {
                UnitSystem::Metric => "m",
                UnitSystem::Imperial => "ft",
            }
        }

        /// Convert a stored (metric) value into this unit system.
        pub fn from_meters(&self, value: f64) -> f64 {
            convert(value, UnitSystem::Metric, *self)
        }
    }

    impl fmt::Display for UnitSystem {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                UnitSystem::Metric => write!(f, "metric"),
                UnitSystem::Imperial => write!(f, "imperial"),
            }
        }
    }

    impl FromStr for UnitSystem {
        type Err = UnitParseError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.trim().to_ascii_lowercase().as_str() {
                "metric" | "m" | "meters" => Ok(UnitSystem::Metric),
                "imperial" | "ft" | "feet" => Ok(UnitSystem::Imperial),
                other => Err(UnitParseError(other.to_string())),
            }
        }
    }

    /// Convert a value between two unit systems.
    pub fn convert(value: f64, from: UnitSystem, to: UnitSystem) -> f64 {
        match (from, to) {
            (UnitSystem::Metric, UnitSystem::Imperial) => value * FEET_PER_METER,
            (UnitSystem::Imperial, UnitSystem::Metric) => value / FEET_PER_METER,
            _ => value,
        }
    }

}

/// Error types
pub mod error {
    use std::fmt;

    /// A period string that is not a canonical "YYYY-MM" key.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct PeriodParseError(pub String);

    impl fmt::Display for PeriodParseError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Period parse error: {}", self.0)
        }
    }

    impl std::error::Error for PeriodParseError {}

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct UnitParseError(pub String);

    impl fmt::Display for UnitParseError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Unknown unit system: {}", self.0)
        }
    }

    impl std::error::Error for UnitParseError {}
}
