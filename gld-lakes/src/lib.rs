//! Typed Great Lakes water level records.
//!
//! A [`lake::Lake`] carries a list of tagged [`lake::DataEntry`] values; the
//! accessors on `Lake` return the water level or forecast series without
//! relying on which fields happen to be present.

pub mod lake;
pub mod month_range;
pub mod records;
pub mod series;
pub mod year_month;

pub use lake::{DataEntry, EntryKind, Lake};
pub use month_range::MonthRange;
pub use series::{
    AnnualPoint, CalendarMonthRecord, ForecastPoint, MonthlyPoint, Periodic, RecordStat,
    WaterLevelSeries,
};
pub use year_month::YearMonth;
