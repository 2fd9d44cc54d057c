use crate::series::{ForecastSeries, WaterLevelSeries};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The five Great Lakes panels in upstream-to-downstream order: (id, display name).
pub const KNOWN_LAKES: [(&str, &str); 5] = [
    ("superior", "Lake Superior"),
    ("michigan_huron", "Lakes Michigan-Huron"),
    ("st_clair", "Lake St. Clair"),
    ("erie", "Lake Erie"),
    ("ontario", "Lake Ontario"),
];

/// Discriminant of a lake data entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    WaterLevel,
    Forecast,
}

/// "Lakewide average water level" entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterLevelEntry {
    #[serde(default)]
    pub type_title: String,
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub series: WaterLevelSeries,
}

/// "Coordinated 6-month forecast" entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    #[serde(default)]
    pub type_title: String,
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub series: ForecastSeries,
}

/// One tagged entry of a lake's data list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DataEntry {
    #[serde(rename = "lakewide_average_water_level")]
    WaterLevel(WaterLevelEntry),
    #[serde(rename = "coordinated_forecast")]
    Forecast(ForecastEntry),
    /// An entry type this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl DataEntry {
    pub fn kind(&self) -> Option<EntryKind> {
        match self {
            DataEntry::WaterLevel(_) => Some(EntryKind::WaterLevel),
            DataEntry::Forecast(_) => Some(EntryKind::Forecast),
            DataEntry::Unknown => None,
        }
    }
}

/// A lake with its display metadata and data entries. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lake {
    #[serde(rename = "lake")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: Vec<DataEntry>,
}

impl Lake {
    /// Parse a lake document (a JSON array of lakes).
    ///
    /// All-time records and annual averages missing from a water level entry
    /// are derived from its monthly series.
    pub fn parse_lakes_json(json: &str) -> anyhow::Result<Vec<Lake>> {
        let mut lakes: Vec<Lake> = serde_json::from_str(json)?;
        for lake in &mut lakes {
            for entry in &mut lake.data {
                if let DataEntry::WaterLevel(entry) = entry {
                    entry.series.fill_derived();
                }
            }
        }
        log::info!("Parsed {} lakes", lakes.len());
        Ok(lakes)
    }

    /// The first entry with the given discriminant.
    pub fn entry(&self, kind: EntryKind) -> Option<&DataEntry> {
        self.data.iter().find(|entry| entry.kind() == Some(kind))
    }

    /// The lakewide average water level series, if this lake has one.
    pub fn water_level(&self) -> Option<&WaterLevelSeries> {
        match self.entry(EntryKind::WaterLevel)? {
            DataEntry::WaterLevel(entry) => Some(&entry.series),
            _ => None,
        }
    }

    /// The coordinated forecast series, if this lake has one.
    pub fn forecast(&self) -> Option<&ForecastSeries> {
        match self.entry(EntryKind::Forecast)? {
            DataEntry::Forecast(entry) => Some(&entry.series),
            _ => None,
        }
    }

    /// Position in the upstream-to-downstream panel order, or None for other lakes.
    pub fn known_position(&self) -> Option<usize> {
        KNOWN_LAKES.iter().position(|(id, _)| *id == self.id)
    }
}

/// Order lakes for display: known Great Lakes first in upstream-to-downstream
/// order, then any others in their original order.
pub fn sort_for_display(lakes: &mut [&Lake]) {
    lakes.sort_by_key(|lake| lake.known_position().unwrap_or(usize::MAX));
}
