//! League dataset model: seasons of drivers, schedule entries, race results and points tables.
//! One JSON document is loaded per run; everything downstream is recomputed from it in memory.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;

use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_DATA_PATH: &str = "data/league.json";

#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    pub active_season_index: usize,
    pub seasons: Vec<Season>,
}

impl Dataset {
    /// Active season, with a stored index past the end clamped to the last season.
    pub fn active_season(&self) -> Option<&Season> {
        if self.seasons.is_empty() {
            return None;
        }
        let index = self.active_season_index.min(self.seasons.len() - 1);
        self.seasons.get(index)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Season {
    pub name: String,
    /// Display number for cross-season charts; falls back to position in the dataset.
    pub season_no: Option<u32>,
    pub drivers: Vec<Driver>,
    pub schedule: Vec<ScheduleEntry>,
    pub results: Vec<ResultEntry>,
    pub points: PointsConfig,
    pub rules: String,
}

impl Season {
    /// Races with no schedule entry count as included; only an explicit
    /// `includeInStats: false` excludes a race from aggregation.
    pub fn race_included(&self, race_id: &str) -> bool {
        self.schedule
            .iter()
            .find(|entry| entry.id == race_id)
            .map_or(true, |entry| entry.include_in_stats)
    }

    pub fn result_for(&self, race_id: &str) -> Option<&ResultEntry> {
        self.results.iter().find(|entry| entry.race_id == race_id)
    }

    /// Chart label for this season: `season_no` when present, else 1-based dataset position.
    pub fn label(&self, index: usize) -> u32 {
        self.season_no.unwrap_or(index as u32 + 1)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub number: Option<String>,
    pub color: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleEntry {
    pub id: String,
    pub round: u32,
    pub track: String,
    /// Dates are kept as the raw document strings for display; ordering uses [`Self::race_day`].
    pub practice_date: String,
    pub race_date: String,
    pub include_in_stats: bool,
}

impl ScheduleEntry {
    pub fn race_day(&self) -> Option<NaiveDate> {
        parse_day(&self.race_date)
    }
}

/// Lenient date parse: RFC 3339 date-time, ISO date, or US `m/d/Y`. None otherwise.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(stamp) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultEntry {
    pub race_id: String,
    pub by_driver: BTreeMap<String, DriverOutcome>,
    pub adjustments: BTreeMap<String, Adjustment>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DriverOutcome {
    /// `Some` only when the document value coerced to a finite number.
    pub quali_pos: Option<f64>,
    pub quali_dnp: bool,
    pub race_pos: Option<f64>,
    pub dnf: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Adjustment {
    pub points: f64,
    pub note: String,
}

/// Position-indexed point values. Non-numeric document entries are stored as NaN so the
/// table keeps its positional indexing; lookups treat them as zero.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PointsConfig {
    pub quali: Vec<f64>,
    pub race: Vec<f64>,
}

/// The only user-visible failure in the system: the document could not be read or parsed.
/// Everything past this point degrades field-by-field instead of erroring.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Parse(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LoadError {}

pub fn load_dataset(path: &str) -> Result<Dataset, LoadError> {
    let raw = fs::read_to_string(path).map_err(LoadError::Io)?;
    let value: serde_json::Value = serde_json::from_str(&raw).map_err(LoadError::Parse)?;
    Ok(super::decode::decode_dataset(&value))
}
