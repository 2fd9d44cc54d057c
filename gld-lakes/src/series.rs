//! Point and record types carried by a lake's data entries.
//!
//! Field names follow the lake JSON document: points are keyed by `date`
//! and forecast bounds are `forecast_low` / `forecast_high`.

use crate::year_month::YearMonth;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Anything positioned on a single calendar month.
pub trait Periodic {
    fn period(&self) -> YearMonth;
}

/// One lakewide average for a calendar month, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    #[serde(rename = "date")]
    pub period: YearMonth,
    pub value: f64,
}

/// One lakewide average for a calendar year, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualPoint {
    #[serde(rename = "date", with = "year_key")]
    pub year: i32,
    pub value: f64,
}

/// A forecast band for one month. `low <= high` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    #[serde(rename = "date")]
    pub period: YearMonth,
    #[serde(rename = "forecast_low")]
    pub low: f64,
    #[serde(rename = "forecast_high")]
    pub high: f64,
}

impl Periodic for MonthlyPoint {
    fn period(&self) -> YearMonth {
        self.period
    }
}

impl Periodic for ForecastPoint {
    fn period(&self) -> YearMonth {
        self.period
    }
}

/// A recorded value and, for extremes, the year it was set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordValue {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_set: Option<i32>,
}

/// Which statistic of a calendar-month record to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordStat {
    Max,
    Min,
    Mean,
}

/// Period-of-record statistics for one month of the year (e.g. "all Januaries").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonthRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<RecordValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<RecordValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<RecordValue>,
}

impl CalendarMonthRecord {
    pub fn stat(&self, stat: RecordStat) -> Option<f64> {
        let record = match stat {
            RecordStat::Max => self.max,
            RecordStat::Min => self.min,
            RecordStat::Mean => self.mean,
        };
        record.map(|r| r.value)
    }
}

/// An extreme over the whole monthly series and the month it occurred.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    pub value: f64,
    pub date: YearMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanValue {
    pub value: f64,
}

/// All-time max, min and average across the monthly series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllTimeRecords {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<DatedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<DatedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg: Option<MeanValue>,
}

/// The sub-series of a "lakewide average water level" entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterLevelSeries {
    #[serde(default)]
    pub monthly: Vec<MonthlyPoint>,
    #[serde(default)]
    pub annual: Vec<AnnualPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_time_records: Option<AllTimeRecords>,
    /// Keyed by month of year, 1-12.
    #[serde(default, deserialize_with = "month_key::deserialize")]
    pub calendar_month_records: BTreeMap<u32, CalendarMonthRecord>,
    #[serde(default)]
    pub period_of_record_mean: Option<f64>,
}

impl WaterLevelSeries {
    /// The record for a month of year (1-12), if the document has one.
    pub fn calendar_record(&self, month_of_year: u32) -> Option<&CalendarMonthRecord> {
        self.calendar_month_records.get(&month_of_year)
    }
}

/// The sub-series of a "coordinated forecast" entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    #[serde(default)]
    pub monthly_forecast: Vec<ForecastPoint>,
}

/// Annual points are keyed by a "YYYY" string in the document.
mod year_key {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(year: &i32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{year:04}"))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYear {
        Text(String),
        Number(i32),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        match RawYear::deserialize(deserializer)? {
            RawYear::Number(year) => Ok(year),
            RawYear::Text(text) => text
                .trim()
                .parse::<i32>()
                .map_err(|_| de::Error::custom(format!("invalid year key {text:?}"))),
        }
    }
}

/// Calendar-month records are keyed by "1".."12" in the document.
mod month_key {
    use super::CalendarMonthRecord;
    use serde::{de, Deserialize, Deserializer};
    use std::collections::BTreeMap;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<u32, CalendarMonthRecord>, D::Error> {
        BTreeMap::<String, CalendarMonthRecord>::deserialize(deserializer)?
            .into_iter()
            .map(|(key, record)| match key.trim().parse::<u32>() {
                Ok(month) if (1..=12).contains(&month) => Ok((month, record)),
                _ => Err(de::Error::custom(format!("invalid calendar month key {key:?}"))),
            })
            .collect()
    }
}
