//! Statistics derived from a lake's monthly series.

use crate::series::{
    AllTimeRecords, AnnualPoint, DatedValue, MeanValue, MonthlyPoint, WaterLevelSeries,
};
use std::collections::BTreeMap;

/// Round to hundredths of a meter, the precision of the source tables.
pub fn round_centimeters(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl AllTimeRecords {
    /// Compute the all-time max, min and average over monthly points.
    ///
    /// Ties go to the earliest month. Returns None for an empty series.
    pub fn from_monthly(monthly: &[MonthlyPoint]) -> Option<AllTimeRecords> {
        let first = monthly.first()?;
        let mut highest = first;
        let mut lowest = first;
        let mut sum = 0.0;
        for point in monthly {
            if point.value > highest.value {
                highest = point;
            }
            if point.value < lowest.value {
                lowest = point;
            }
            sum += point.value;
        }
        Some(AllTimeRecords {
            max: Some(DatedValue {
                value: round_centimeters(highest.value),
                date: highest.period,
            }),
            min: Some(DatedValue {
                value: round_centimeters(lowest.value),
                date: lowest.period,
            }),
            avg: Some(MeanValue {
                value: round_centimeters(sum / monthly.len() as f64),
            }),
        })
    }
}

/// Average each calendar year that has all twelve months present.
///
/// Partial years produce no annual point.
pub fn annual_averages(monthly: &[MonthlyPoint]) -> Vec<AnnualPoint> {
    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for point in monthly {
        by_year.entry(point.period.year()).or_default().push(point.value);
    }
    by_year
        .into_iter()
        .filter(|(_, values)| values.len() == 12)
        .map(|(year, values)| AnnualPoint {
            year,
            value: round_centimeters(values.iter().sum::<f64>() / 12.0),
        })
        .collect()
}

impl AllTimeRecords {
    pub fn is_empty(&self) -> bool {
        self.max.is_none() && self.min.is_none() && self.avg.is_none()
    }
}

impl WaterLevelSeries {
    /// Derive all-time records and annual averages from the monthly series
    /// when the document leaves them out. Values present in the document win.
    pub fn fill_derived(&mut self) {
        if self.all_time_records.as_ref().map_or(true, AllTimeRecords::is_empty) {
            if let Some(records) = AllTimeRecords::from_monthly(&self.monthly) {
                self.all_time_records = Some(records);
            }
        }
        if self.annual.is_empty() {
            self.annual = annual_averages(&self.monthly);
        }
    }
}
