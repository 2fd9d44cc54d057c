use chrono::NaiveDate;
use gld_lakes::{MonthRange, YearMonth};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors constructing a time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    StartAfterEnd { start: YearMonth, end: YearMonth },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::StartAfterEnd { start, end } => {
                write!(f, "window start {start} is after window end {end}")
            }
        }
    }
}

impl std::error::Error for WindowError {}

#[derive(Deserialize)]
struct RawWindow {
    start: YearMonth,
    end: YearMonth,
}

/// The visible time range, inclusive at month granularity.
///
/// Covers every day from the first day of `start` through the last day of `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct TimeWindow {
    start: YearMonth,
    end: YearMonth,
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = WindowError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        TimeWindow::new(raw.start, raw.end)
    }
}

impl TimeWindow {
    pub fn new(start: YearMonth, end: YearMonth) -> Result<TimeWindow, WindowError> {
        if start > end {
            return Err(WindowError::StartAfterEnd { start, end });
        }
        Ok(TimeWindow { start, end })
    }

    pub fn start(&self) -> YearMonth {
        self.start
    }

    pub fn end(&self) -> YearMonth {
        self.end
    }

    /// First day of the start month.
    pub fn start_date(&self) -> NaiveDate {
        self.start.first_day()
    }

    /// Last day of the end month.
    pub fn end_date(&self) -> NaiveDate {
        self.end.last_day()
    }

    pub fn contains_date(&self, date: &NaiveDate) -> bool {
        self.start_date() <= *date && *date <= self.end_date()
    }

    pub fn contains(&self, month: &YearMonth) -> bool {
        self.contains_date(&month.first_day())
    }

    /// Every month in the window, in order.
    pub fn months(&self) -> MonthRange {
        MonthRange::new(self.start, self.end)
    }

    /// True when `[start, end]` overlaps the window.
    pub fn intersects(&self, start: &NaiveDate, end: &NaiveDate) -> bool {
        *start <= self.end_date() && *end >= self.start_date()
    }

    /// Clip `[start, end]` to the window, or None when they do not overlap.
    pub fn clip(&self, start: &NaiveDate, end: &NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        if !self.intersects(start, end) {
            return None;
        }
        Some(((*start).max(self.start_date()), (*end).min(self.end_date())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn test_window_bounds() {
        let window = TimeWindow::new(ym("2019-07"), ym("2020-06")).unwrap();
        assert_eq!(window.start_date(), NaiveDate::from_ymd_opt(2019, 7, 1).unwrap());
        assert_eq!(window.end_date(), NaiveDate::from_ymd_opt(2020, 6, 30).unwrap());
        assert_eq!(window.months().count(), 12);
    }

    #[test]
    fn test_reversed_window_is_rejected() {
        let err = TimeWindow::new(ym("2020-02"), ym("2020-01")).unwrap_err();
        assert_eq!(
            err,
            WindowError::StartAfterEnd {
                start: ym("2020-02"),
                end: ym("2020-01")
            }
        );
    }

    #[test]
    fn test_single_month_window() {
        let window = TimeWindow::new(ym("2020-02"), ym("2020-02")).unwrap();
        assert!(window.contains(&ym("2020-02")));
        assert!(!window.contains(&ym("2020-03")));
        assert_eq!(window.end_date(), NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
    }

    #[test]
    fn test_clip_year_to_window() {
        let window = TimeWindow::new(ym("2019-07"), ym("2020-06")).unwrap();
        let jan1 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let dec31 = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
        assert_eq!(
            window.clip(&jan1, &dec31),
            Some((jan1, NaiveDate::from_ymd_opt(2020, 6, 30).unwrap()))
        );
        let y2021 = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let y2021_end = NaiveDate::from_ymd_opt(2021, 12, 31).unwrap();
        assert_eq!(window.clip(&y2021, &y2021_end), None);
    }

    #[test]
    fn test_deserialize_validates_order() {
        let ok: TimeWindow = serde_json::from_str(r#"{"start": "2020-01", "end": "2020-03"}"#).unwrap();
        assert_eq!(ok.end(), ym("2020-03"));
        assert!(serde_json::from_str::<TimeWindow>(r#"{"start": "2020-04", "end": "2020-03"}"#).is_err());
    }
}
