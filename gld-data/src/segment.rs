//! Drawable segments for each series type.
//!
//! Every line series becomes a [`SegmentedLine`]: flat two-vertex segments
//! aligned to calendar boundaries, with an explicit [`LinePiece::Break`]
//! between consecutive segments so a renderer never interpolates between
//! periods. Forecasts become [`ForecastBand`] rectangles instead.

use crate::config::SeriesKind;
use crate::filter::{annual_in_window, filter_to_window, forecast_continuing_window, year_bounds};
use crate::window::TimeWindow;
use chrono::NaiveDate;
use gld_lakes::{AnnualPoint, ForecastPoint, MonthlyPoint, RecordStat, WaterLevelSeries};
use gld_utils::units::UnitSystem;
use serde::Serialize;

/// A horizontal segment from `start` through `end` at `value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlatSegment {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinePiece {
    Segment(FlatSegment),
    /// Do not connect the previous segment to the next one.
    Break,
}

/// An ordered run of segments separated by breaks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SegmentedLine {
    pub pieces: Vec<LinePiece>,
}

impl SegmentedLine {
    /// Append a segment, preceded by a break unless it is the first.
    fn push_segment(&mut self, segment: FlatSegment) {
        if !self.pieces.is_empty() {
            self.pieces.push(LinePiece::Break);
        }
        self.pieces.push(LinePiece::Segment(segment));
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &FlatSegment> + '_ {
        self.pieces.iter().filter_map(|piece| match piece {
            LinePiece::Segment(segment) => Some(segment),
            LinePiece::Break => None,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    /// Every drawn value, one per segment.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.segments().map(|segment| segment.value)
    }

    /// Flatten into renderer vertices; `None` marks a gap.
    pub fn vertices(&self) -> Vec<Option<(NaiveDate, f64)>> {
        let mut vertices = Vec::with_capacity(self.pieces.len() * 2);
        for piece in &self.pieces {
            match piece {
                LinePiece::Segment(segment) => {
                    vertices.push(Some((segment.start, segment.value)));
                    vertices.push(Some((segment.end, segment.value)));
                }
                LinePiece::Break => vertices.push(None),
            }
        }
        vertices
    }
}

/// One forecast rectangle spanning a whole month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastBand {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub low: f64,
    pub high: f64,
}

/// Forecast rectangles plus the latest day any of them reaches.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastBands {
    pub bands: Vec<ForecastBand>,
    pub max_end: Option<NaiveDate>,
}

impl ForecastBands {
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Every drawn bound, low and high.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.bands.iter().flat_map(|band| [band.low, band.high])
    }
}

/// Monthly averages: one flat segment per month, never joined to the next.
pub fn monthly_segments(points: &[MonthlyPoint], window: &TimeWindow, units: UnitSystem) -> SegmentedLine {
    let mut line = SegmentedLine::default();
    for point in filter_to_window(points, window) {
        line.push_segment(FlatSegment {
            start: point.period.first_day(),
            end: point.period.last_day(),
            value: units.from_meters(point.value),
        });
    }
    line
}

/// Annual averages: one segment per year, clipped to the window.
pub fn annual_segments(points: &[AnnualPoint], window: &TimeWindow, units: UnitSystem) -> SegmentedLine {
    let mut line = SegmentedLine::default();
    for point in annual_in_window(points, window) {
        let Some((year_start, year_end)) = year_bounds(point.year) else {
            continue;
        };
        let Some((start, end)) = window.clip(&year_start, &year_end) else {
            continue;
        };
        line.push_segment(FlatSegment {
            start,
            end,
            value: units.from_meters(point.value),
        });
    }
    line
}

/// A constant across the whole window.
pub fn constant_segment(value: f64, window: &TimeWindow, units: UnitSystem) -> SegmentedLine {
    let mut line = SegmentedLine::default();
    line.push_segment(FlatSegment {
        start: window.start_date(),
        end: window.end_date(),
        value: units.from_meters(value),
    });
    line
}

/// A calendar-month statistic repeated on every matching month of the window.
///
/// Months of year without a record, or without this statistic, are skipped.
pub fn calendar_record_segments(
    series: &WaterLevelSeries,
    stat: RecordStat,
    window: &TimeWindow,
    units: UnitSystem,
) -> SegmentedLine {
    let mut line = SegmentedLine::default();
    for month in window.months() {
        let Some(value) = series
            .calendar_record(month.month_of_year())
            .and_then(|record| record.stat(stat))
        else {
            continue;
        };
        line.push_segment(FlatSegment {
            start: month.first_day(),
            end: month.last_day(),
            value: units.from_meters(value),
        });
    }
    line
}

/// Forecast rectangles from the window start onwards, values passed through as-is.
pub fn forecast_bands(points: &[ForecastPoint], window: &TimeWindow, units: UnitSystem) -> ForecastBands {
    let mut bands = ForecastBands::default();
    for point in forecast_continuing_window(points, window) {
        let end = point.period.last_day();
        bands.bands.push(ForecastBand {
            start: point.period.first_day(),
            end,
            low: units.from_meters(point.low),
            high: units.from_meters(point.high),
        });
        bands.max_end = Some(bands.max_end.map_or(end, |latest| latest.max(end)));
    }
    bands
}

/// Build the line for one series type of a water level entry.
pub fn series_line(
    series: &WaterLevelSeries,
    kind: SeriesKind,
    window: &TimeWindow,
    units: UnitSystem,
) -> SegmentedLine {
    let line = match kind {
        SeriesKind::Monthly => monthly_segments(&series.monthly, window, units),
        SeriesKind::Annual => annual_segments(&series.annual, window, units),
        SeriesKind::PeriodOfRecordMean => series
            .period_of_record_mean
            .map(|value| constant_segment(value, window, units))
            .unwrap_or_default(),
        SeriesKind::RecordMax | SeriesKind::RecordMin | SeriesKind::RecordMean => kind
            .record_stat()
            .map(|stat| calendar_record_segments(series, stat, window, units))
            .unwrap_or_default(),
    };
    log::debug!(
        "Series {} produced {} segments",
        kind,
        line.segment_count()
    );
    line
}
