//! The configuration surface the engine accepts: window, units, enabled
//! series, forecast flag and vertical span override.

use crate::window::TimeWindow;
use gld_lakes::RecordStat;
use gld_utils::units::UnitSystem;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A toggleable line series. Forecasts are toggled separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Monthly,
    Annual,
    RecordMax,
    RecordMin,
    RecordMean,
    PeriodOfRecordMean,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 6] = [
        SeriesKind::Monthly,
        SeriesKind::Annual,
        SeriesKind::RecordMax,
        SeriesKind::RecordMin,
        SeriesKind::RecordMean,
        SeriesKind::PeriodOfRecordMean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKind::Monthly => "monthly",
            SeriesKind::Annual => "annual",
            SeriesKind::RecordMax => "record_max",
            SeriesKind::RecordMin => "record_min",
            SeriesKind::RecordMean => "record_mean",
            SeriesKind::PeriodOfRecordMean => "period_of_record_mean",
        }
    }

    /// Legend title.
    pub fn title(&self) -> &'static str {
        match self {
            SeriesKind::Monthly => "Monthly Average",
            SeriesKind::Annual => "Annual Average",
            SeriesKind::RecordMax => "Record High",
            SeriesKind::RecordMin => "Record Low",
            SeriesKind::RecordMean => "Monthly Mean",
            SeriesKind::PeriodOfRecordMean => "Period of Record Mean",
        }
    }

    /// The calendar-month statistic this series reads, if it is one.
    pub fn record_stat(&self) -> Option<RecordStat> {
        match self {
            SeriesKind::RecordMax => Some(RecordStat::Max),
            SeriesKind::RecordMin => Some(RecordStat::Min),
            SeriesKind::RecordMean => Some(RecordStat::Mean),
            _ => None,
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeriesKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SeriesKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| format!("unknown series type {s:?}"))
    }
}

/// Explicit vertical span, or "auto" to use the largest observed range.
///
/// Only a finite, strictly positive span counts as an override; anything
/// else behaves as `Auto`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "RawSpan")]
pub enum SpanOverride {
    #[default]
    Auto,
    Fixed(f64),
}

impl SpanOverride {
    pub fn from_value(value: Option<f64>) -> SpanOverride {
        match value {
            Some(span) if span.is_finite() && span > 0.0 => SpanOverride::Fixed(span),
            _ => SpanOverride::Auto,
        }
    }

    /// The usable override span, if any.
    pub fn span(&self) -> Option<f64> {
        match *self {
            SpanOverride::Fixed(span) if span.is_finite() && span > 0.0 => Some(span),
            _ => None,
        }
    }
}

impl FromStr for SpanOverride {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SpanOverride::from_value(s.trim().parse::<f64>().ok()))
    }
}

impl fmt::Display for SpanOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span() {
            Some(span) => write!(f, "{span}"),
            None => f.write_str("auto"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSpan {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl From<RawSpan> for SpanOverride {
    fn from(raw: RawSpan) -> Self {
        match raw {
            RawSpan::Number(span) => SpanOverride::from_value(Some(span)),
            RawSpan::Text(text) => text.parse().unwrap_or_default(),
            RawSpan::Other(_) => SpanOverride::Auto,
        }
    }
}

impl Serialize for SpanOverride {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.span() {
            Some(span) => serializer.serialize_f64(span),
            None => serializer.serialize_str("auto"),
        }
    }
}

fn default_series() -> BTreeSet<SeriesKind> {
    BTreeSet::from([SeriesKind::Monthly])
}

fn default_forecast() -> bool {
    true
}

/// Everything a recomputation depends on besides the lakes themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub window: TimeWindow,
    #[serde(default)]
    pub units: UnitSystem,
    #[serde(default = "default_series")]
    pub series: BTreeSet<SeriesKind>,
    #[serde(default = "default_forecast")]
    pub forecast: bool,
    #[serde(default)]
    pub span_override: SpanOverride,
}

impl ChartConfig {
    /// Metric, monthly averages only, forecasts on, automatic span.
    pub fn new(window: TimeWindow) -> ChartConfig {
        ChartConfig {
            window,
            units: UnitSystem::default(),
            series: default_series(),
            forecast: default_forecast(),
            span_override: SpanOverride::Auto,
        }
    }

    pub fn with_series<I: IntoIterator<Item = SeriesKind>>(mut self, series: I) -> ChartConfig {
        self.series = series.into_iter().collect();
        self
    }

    pub fn with_units(mut self, units: UnitSystem) -> ChartConfig {
        self.units = units;
        self
    }

    pub fn with_forecast(mut self, forecast: bool) -> ChartConfig {
        self.forecast = forecast;
        self
    }

    pub fn with_span_override(mut self, span_override: SpanOverride) -> ChartConfig {
        self.span_override = span_override;
        self
    }

    pub fn is_enabled(&self, kind: SeriesKind) -> bool {
        self.series.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_kind_parse() {
        assert_eq!("record_max".parse::<SeriesKind>().unwrap(), SeriesKind::RecordMax);
        assert_eq!(" Annual ".parse::<SeriesKind>().unwrap(), SeriesKind::Annual);
        assert!("weekly".parse::<SeriesKind>().is_err());
        for kind in SeriesKind::ALL {
            assert_eq!(kind.as_str().parse::<SeriesKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_span_override_parse() {
        assert_eq!("auto".parse::<SpanOverride>().unwrap(), SpanOverride::Auto);
        assert_eq!("2.5".parse::<SpanOverride>().unwrap(), SpanOverride::Fixed(2.5));
        assert_eq!("0".parse::<SpanOverride>().unwrap(), SpanOverride::Auto);
        assert_eq!("-1".parse::<SpanOverride>().unwrap(), SpanOverride::Auto);
        assert_eq!("NaN".parse::<SpanOverride>().unwrap(), SpanOverride::Auto);
        assert_eq!("tall".parse::<SpanOverride>().unwrap(), SpanOverride::Auto);
    }

    #[test]
    fn test_span_override_ignores_bad_fixed_value() {
        assert_eq!(SpanOverride::Fixed(-3.0).span(), None);
        assert_eq!(SpanOverride::Fixed(1.5).span(), Some(1.5));
    }

    #[test]
    fn test_config_from_json_defaults() {
        let config: ChartConfig =
            serde_json::from_str(r#"{"window": {"start": "2020-01", "end": "2020-12"}}"#).unwrap();
        assert_eq!(config.units, UnitSystem::Metric);
        assert!(config.is_enabled(SeriesKind::Monthly));
        assert!(!config.is_enabled(SeriesKind::Annual));
        assert!(config.forecast);
        assert_eq!(config.span_override, SpanOverride::Auto);
    }

    #[test]
    fn test_config_from_json_full() {
        let config: ChartConfig = serde_json::from_str(
            r#"{"window": {"start": "2020-01", "end": "2020-12"},
                "units": "imperial",
                "series": ["annual", "period_of_record_mean"],
                "forecast": false,
                "span_override": 2.0}"#,
        )
        .unwrap();
        assert_eq!(config.units, UnitSystem::Imperial);
        assert_eq!(config.series.len(), 2);
        assert!(!config.forecast);
        assert_eq!(config.span_override.span(), Some(2.0));

        let auto: ChartConfig = serde_json::from_str(
            r#"{"window": {"start": "2020-01", "end": "2020-12"}, "span_override": "auto"}"#,
        )
        .unwrap();
        assert_eq!(auto.span_override, SpanOverride::Auto);
    }

    #[test]
    fn test_non_numeric_span_override_is_auto() {
        for raw in ["null", "true", "{}", "[1.0]", "-2"] {
            let json = format!(r#"{{"window": {{"start": "2020-01", "end": "2020-12"}}, "span_override": {raw}}}"#);
            let config: ChartConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(config.span_override, SpanOverride::Auto, "{raw}");
        }
    }
}
