use chrono::{Datelike, NaiveDate};
use gld_utils::dates::{add_months, end_of_month, format_period, parse_period, start_of_month};
use gld_utils::error::PeriodParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month, keyed canonically as "YYYY-MM".
///
/// Internally this is the first day of the month, so ordering and equality
/// follow the calendar. Serializes as the canonical period string.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// Create a YearMonth from a year and a 1-based month.
    pub fn new(year: i32, month: u32) -> Option<YearMonth> {
        NaiveDate::from_ymd_opt(year, month, 1).map(YearMonth)
    }

    /// The month containing `date`.
    pub fn from_date(date: &NaiveDate) -> YearMonth {
        YearMonth(start_of_month(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of year, 1-12.
    pub fn month_of_year(&self) -> u32 {
        self.0.month()
    }

    /// First day of this month.
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Last day of this month.
    pub fn last_day(&self) -> NaiveDate {
        end_of_month(&self.0)
    }

    /// The month `n` months away (negative goes backwards).
    pub fn add_months(&self, n: i32) -> Option<YearMonth> {
        add_months(&self.0, n).map(YearMonth)
    }

    /// The following month.
    pub fn succ(&self) -> Option<YearMonth> {
        self.add_months(1)
    }

    /// True when `other` is the month right after this one.
    pub fn is_followed_by(&self, other: &YearMonth) -> bool {
        self.succ().as_ref() == Some(other)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_period(&self.0))
    }
}

impl FromStr for YearMonth {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_period(s).map(YearMonth)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(value: NaiveDate) -> Self {
        YearMonth::from_date(&value)
    }
}

impl From<YearMonth> for NaiveDate {
    fn from(value: YearMonth) -> Self {
        value.first_day()
    }
}

#[cfg(test)]
mod tests {
    use super::YearMonth;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_and_display() {
        let ym: YearMonth = "2020-03".parse().unwrap();
        assert_eq!(ym.year(), 2020);
        assert_eq!(ym.month_of_year(), 3);
        assert_eq!(ym.to_string(), "2020-03");
        assert!("2020-3".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_boundaries() {
        let feb = YearMonth::new(2023, 2).unwrap();
        assert_eq!(feb.first_day(), NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn test_succ_wraps_year() {
        let dec = YearMonth::new(2019, 12).unwrap();
        assert_eq!(dec.succ(), YearMonth::new(2020, 1));
        assert!(dec.is_followed_by(&YearMonth::new(2020, 1).unwrap()));
        assert!(!dec.is_followed_by(&YearMonth::new(2020, 2).unwrap()));
    }

    #[test]
    fn test_ordering_follows_calendar() {
        let a = YearMonth::new(2019, 12).unwrap();
        let b = YearMonth::new(2020, 1).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_from_mid_month_date() {
        let d = NaiveDate::from_ymd_opt(2021, 8, 17).unwrap();
        assert_eq!(YearMonth::from(d), YearMonth::new(2021, 8).unwrap());
    }

    #[test]
    fn test_serde_as_period_string() {
        let ym = YearMonth::new(2024, 11).unwrap();
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, "\"2024-11\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);
        assert!(serde_json::from_str::<YearMonth>("\"Nov 2024\"").is_err());
    }
}
