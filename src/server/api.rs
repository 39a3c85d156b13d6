//! JSON payload builders for the viewer API. Every payload is recomputed from the
//! dataset on each call; nothing is cached between requests.

use chrono::Utc;
use serde_json::json;

use crate::data::dataset::{Dataset, Season};
use crate::standings::export::standings_csv_string;
use crate::standings::{
    aggregate, aggregate_lifetime, build_trend, next_event, position_matrix, race_sheets, rank,
    season_overview,
};

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "status": "ok",
        "service": "paddock-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Season directory for the season selector, plus which one the document marks active.
pub fn seasons_payload(dataset: &Dataset) -> Result<String, serde_json::Error> {
    let active = if dataset.seasons.is_empty() {
        0
    } else {
        dataset.active_season_index.min(dataset.seasons.len() - 1)
    };
    let seasons: Vec<_> = dataset
        .seasons
        .iter()
        .enumerate()
        .map(|(index, season)| {
            json!({
                "index": index,
                "name": season.name,
                "label": season.label(index),
                "drivers": season.drivers.len(),
                "races": season.schedule.len(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&json!({
        "active_season_index": active,
        "seasons": seasons
    }))
}

pub fn standings_payload(season: &Season) -> Result<String, serde_json::Error> {
    let standings = rank(&aggregate(season));
    serde_json::to_string_pretty(&json!({ "standings": standings }))
}

pub fn standings_csv_payload(season: &Season) -> Result<String, csv::Error> {
    standings_csv_string(&rank(&aggregate(season)))
}

pub fn trend_payload(season: &Season) -> Result<String, serde_json::Error> {
    let snapshots = build_trend(season);
    let drivers: Vec<_> = season
        .drivers
        .iter()
        .map(|driver| {
            json!({
                "id": driver.id,
                "name": driver.name,
                "color": driver.color,
            })
        })
        .collect();
    serde_json::to_string_pretty(&json!({
        "drivers": drivers,
        "snapshots": snapshots
    }))
}

/// Raw schedule listing: excluded races stay visible here, they are only dropped
/// from aggregation.
pub fn schedule_payload(season: &Season) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "schedule": season.schedule }))
}

pub fn results_payload(season: &Season) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "sheets": race_sheets(season) }))
}

pub fn summary_payload(season: &Season) -> Result<String, serde_json::Error> {
    let today = Utc::now().date_naive();
    serde_json::to_string_pretty(&json!({
        "overview": season_overview(season),
        "next_event": next_event(season, today),
    }))
}

pub fn points_payload(season: &Season) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "quali": season.points.quali,
        "race": season.points.race,
        "rules": season.rules,
    }))
}

pub fn lifetime_payload(dataset: &Dataset) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "careers": aggregate_lifetime(&dataset.seasons),
        "matrix": position_matrix(&dataset.seasons),
    }))
}
