//! Window filtering of dated points. Order is preserved; nothing in range
//! means an empty result, never an error.

use crate::window::TimeWindow;
use chrono::NaiveDate;
use gld_lakes::{AnnualPoint, ForecastPoint, Periodic};

/// Points whose month lies inside the window.
pub fn filter_to_window<P: Periodic + Copy>(points: &[P], window: &TimeWindow) -> Vec<P> {
    points
        .iter()
        .filter(|point| window.contains_date(&point.period().first_day()))
        .copied()
        .collect()
}

/// First and last day of a calendar year.
pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// Annual points whose year overlaps the window at all.
pub fn annual_in_window(points: &[AnnualPoint], window: &TimeWindow) -> Vec<AnnualPoint> {
    points
        .iter()
        .filter(|point| {
            year_bounds(point.year).is_some_and(|(start, end)| window.intersects(&start, &end))
        })
        .copied()
        .collect()
}

/// Forecast points that continue the window.
///
/// A forecast run is kept only when it starts no later than the month after
/// the window end, so a historical window never picks up a present-day
/// forecast. Kept points are not cut at the window end; the caller widens
/// the horizontal axis instead. Points ending before the window start are
/// dropped.
pub fn forecast_continuing_window(points: &[ForecastPoint], window: &TimeWindow) -> Vec<ForecastPoint> {
    let horizon = window.end().succ().unwrap_or(window.end());
    let Some(run_start) = points.iter().map(|point| point.period).min() else {
        return Vec::new();
    };
    if run_start > horizon {
        return Vec::new();
    }
    points
        .iter()
        .filter(|point| point.period.last_day() >= window.start_date())
        .copied()
        .collect()
}
