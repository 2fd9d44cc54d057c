//! Per-lake observed range over everything that would be drawn.

use crate::config::{ChartConfig, SeriesKind};
use crate::segment::{forecast_bands, series_line};
use gld_lakes::Lake;
use serde::{Deserialize, Serialize};

/// Observed `{min, max}` of one lake for the current configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub fn new(min: f64, max: f64) -> Extent {
        Extent { min, max }
    }

    /// `max - min`.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Smallest extent covering every finite value, or None if there are none.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Extent> {
        values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(None, |extent: Option<Extent>, value| {
                Some(match extent {
                    Some(e) => Extent::new(e.min.min(value), e.max.max(value)),
                    None => Extent::new(value, value),
                })
            })
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Extent of one lake over its enabled series and, if on, its forecast.
///
/// Uses the same segments the renderer receives, so every drawn value is
/// counted and nothing else is. None when nothing is enabled or no data
/// falls in the window; such a lake is left out of the shared scale.
pub fn lake_extent(lake: &Lake, config: &ChartConfig) -> Option<Extent> {
    let mut values: Vec<f64> = Vec::new();
    if let Some(series) = lake.water_level() {
        for kind in SeriesKind::ALL.into_iter().filter(|kind| config.is_enabled(*kind)) {
            values.extend(series_line(series, kind, &config.window, config.units).values());
        }
    }
    if config.forecast {
        if let Some(forecast) = lake.forecast() {
            values.extend(
                forecast_bands(&forecast.monthly_forecast, &config.window, config.units).values(),
            );
        }
    }
    let extent = Extent::from_values(values);
    log::debug!("Extent for {}: {:?}", lake.id, extent);
    extent
}
