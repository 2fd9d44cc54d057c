//! Period-keyed lookup for a synchronized tooltip across series.
//!
//! Flat series register their value on every month their segment covers,
//! so hovering anywhere inside a year shows that year's average.

use crate::config::{ChartConfig, SeriesKind};
use crate::filter::{annual_in_window, filter_to_window, forecast_continuing_window};
use gld_lakes::{Lake, YearMonth};
use serde::Serialize;
use std::collections::BTreeMap;

/// A hovered value: a level, or a forecast `(low, high)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HoverValue {
    Level(f64),
    Range(f64, f64),
}

/// Every series value known for one month. Absent series are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HoverRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_of_record_mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<(f64, f64)>,
}

impl HoverRecord {
    fn slot_mut(&mut self, kind: SeriesKind) -> &mut Option<f64> {
        match kind {
            SeriesKind::Monthly => &mut self.monthly,
            SeriesKind::Annual => &mut self.annual,
            SeriesKind::RecordMax => &mut self.record_max,
            SeriesKind::RecordMin => &mut self.record_min,
            SeriesKind::RecordMean => &mut self.record_mean,
            SeriesKind::PeriodOfRecordMean => &mut self.period_of_record_mean,
        }
    }

    pub fn get(&self, kind: SeriesKind) -> Option<f64> {
        match kind {
            SeriesKind::Monthly => self.monthly,
            SeriesKind::Annual => self.annual,
            SeriesKind::RecordMax => self.record_max,
            SeriesKind::RecordMin => self.record_min,
            SeriesKind::RecordMean => self.record_mean,
            SeriesKind::PeriodOfRecordMean => self.period_of_record_mean,
        }
    }

    /// Present series in legend order, forecast last.
    pub fn entries(&self) -> Vec<(&'static str, HoverValue)> {
        let mut entries: Vec<(&'static str, HoverValue)> = SeriesKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|v| (kind.as_str(), HoverValue::Level(v))))
            .collect();
        if let Some((low, high)) = self.forecast {
            entries.push(("forecast", HoverValue::Range(low, high)));
        }
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Hover records keyed by canonical "YYYY-MM".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HoverIndex(BTreeMap<String, HoverRecord>);

impl HoverIndex {
    fn record_mut(&mut self, month: &YearMonth) -> &mut HoverRecord {
        self.0.entry(month.to_string()).or_default()
    }

    fn set(&mut self, month: &YearMonth, kind: SeriesKind, value: f64) {
        *self.record_mut(month).slot_mut(kind) = Some(value);
    }

    /// Look up by period key, e.g. "2020-03".
    pub fn get(&self, period: &str) -> Option<&HoverRecord> {
        self.0.get(period)
    }

    pub fn get_month(&self, month: &YearMonth) -> Option<&HoverRecord> {
        self.0.get(&month.to_string())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &HoverRecord)> {
        self.0.iter()
    }
}

/// Build the hover index for one lake from the same filtered data the
/// segments are built from. Values are converted to the configured units.
pub fn build_hover_index(lake: &Lake, config: &ChartConfig) -> HoverIndex {
    let mut index = HoverIndex::default();
    let window = &config.window;
    let units = config.units;

    if let Some(series) = lake.water_level() {
        if config.is_enabled(SeriesKind::Monthly) {
            for point in filter_to_window(&series.monthly, window) {
                index.set(&point.period, SeriesKind::Monthly, units.from_meters(point.value));
            }
        }
        if config.is_enabled(SeriesKind::Annual) {
            for point in annual_in_window(&series.annual, window) {
                for month in window.months().filter(|m| m.year() == point.year) {
                    index.set(&month, SeriesKind::Annual, units.from_meters(point.value));
                }
            }
        }
        for kind in [SeriesKind::RecordMax, SeriesKind::RecordMin, SeriesKind::RecordMean] {
            let Some(stat) = kind.record_stat().filter(|_| config.is_enabled(kind)) else {
                continue;
            };
            for month in window.months() {
                if let Some(value) = series
                    .calendar_record(month.month_of_year())
                    .and_then(|record| record.stat(stat))
                {
                    index.set(&month, kind, units.from_meters(value));
                }
            }
        }
        if config.is_enabled(SeriesKind::PeriodOfRecordMean) {
            if let Some(value) = series.period_of_record_mean {
                for month in window.months() {
                    index.set(&month, SeriesKind::PeriodOfRecordMean, units.from_meters(value));
                }
            }
        }
    }

    if config.forecast {
        if let Some(forecast) = lake.forecast() {
            for point in forecast_continuing_window(&forecast.monthly_forecast, window) {
                index.record_mut(&point.period).forecast =
                    Some((units.from_meters(point.low), units.from_meters(point.high)));
            }
        }
    }

    log::debug!("Hover index for {} has {} months", lake.id, index.len());
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::TimeWindow;

    const SAMPLE: &str = include_str!("../../fixtures/great_lakes_sample.json");

    fn superior() -> Lake {
        Lake::parse_lakes_json(SAMPLE)
            .unwrap()
            .into_iter()
            .find(|l| l.id == "superior")
            .unwrap()
    }

    fn config(start: &str, end: &str) -> ChartConfig {
        ChartConfig::new(TimeWindow::new(start.parse().unwrap(), end.parse().unwrap()).unwrap())
    }

    #[test]
    fn test_monthly_and_forecast_keys() {
        let index = build_hover_index(&superior(), &config("2020-01", "2020-03"));
        assert_eq!(index.get("2020-02").unwrap().monthly, Some(183.62));
        assert_eq!(index.get("2020-05").unwrap().forecast, Some((183.55, 183.80)));
        assert!(index.get("2019-12").is_none());
        let keys: Vec<&String> = index.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["2020-01", "2020-02", "2020-03", "2020-04", "2020-05", "2020-06"]);
    }

    #[test]
    fn test_annual_registered_on_every_month_of_year_in_window() {
        let cfg = config("2019-10", "2020-02")
            .with_series([SeriesKind::Annual])
            .with_forecast(false);
        let index = build_hover_index(&superior(), &cfg);
        for period in ["2019-10", "2019-11", "2019-12"] {
            assert_eq!(index.get(period).unwrap().annual, Some(183.59), "{period}");
        }
        // no 2020 annual point in the sample
        assert!(index.get("2020-01").is_none());
    }

    #[test]
    fn test_records_and_constant_on_every_month() {
        let cfg = config("2019-11", "2020-02")
            .with_series([SeriesKind::RecordMax, SeriesKind::PeriodOfRecordMean])
            .with_forecast(false);
        let index = build_hover_index(&superior(), &cfg);
        assert_eq!(index.len(), 4);
        let jan = index.get("2020-01").unwrap();
        assert_eq!(jan.record_max, Some(183.71));
        assert_eq!(jan.period_of_record_mean, Some(183.41));
        assert_eq!(jan.monthly, None);
        assert_eq!(index.get("2019-11").unwrap().record_max, Some(183.89));
    }

    #[test]
    fn test_entries_enumerate_present_series() {
        let cfg = config("2020-01", "2020-03")
            .with_series([SeriesKind::Monthly, SeriesKind::RecordMin]);
        let mut index = build_hover_index(&superior(), &cfg);
        let jan = index.get("2020-01").unwrap();
        assert_eq!(
            jan.entries(),
            vec![
                ("monthly", HoverValue::Level(183.68)),
                ("record_min", HoverValue::Level(182.83)),
            ]
        );
        let april = index.record_mut(&"2020-04".parse().unwrap());
        assert_eq!(april.entries(), vec![("forecast", HoverValue::Range(183.50, 183.70))]);
    }

    #[test]
    fn test_disabled_everything_is_empty() {
        let cfg = config("2020-01", "2020-03").with_series(Vec::new()).with_forecast(false);
        assert!(build_hover_index(&superior(), &cfg).is_empty());
    }

    #[test]
    fn test_historical_window_has_no_forecast_keys() {
        let index = build_hover_index(&superior(), &config("2019-01", "2019-02"));
        let keys: Vec<&String> = index.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["2019-01", "2019-02"]);
    }

    #[test]
    fn test_serializes_forecast_as_pair() {
        let cfg = config("2020-03", "2020-04").with_series(Vec::new());
        let index = build_hover_index(&superior(), &cfg);
        let json = serde_json::to_value(&index).unwrap();
        assert_eq!(json["2020-04"]["forecast"], serde_json::json!([183.5, 183.7]));
    }
}
