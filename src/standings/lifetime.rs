//! Cross-season career aggregation. Keyed by driver name: ids are assigned per
//! season document and are not stable across seasons, names are how the portal
//! tracks a person's career.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::dataset::Season;
use crate::standings::aggregate::aggregate;
use crate::standings::rank::rank;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CareerTotals {
    pub seasons_played: u32,
    pub total_points: f64,
    pub wins: u32,
}

/// Career totals per driver name across every season. Seasons with no drivers or no
/// results contribute nothing.
pub fn aggregate_lifetime(seasons: &[Season]) -> BTreeMap<String, CareerTotals> {
    let mut careers: BTreeMap<String, CareerTotals> = BTreeMap::new();
    for season in seasons {
        for standing in rank(&aggregate(season)) {
            let career = careers.entry(standing.tally.name).or_default();
            career.seasons_played += 1;
            career.total_points += standing.tally.total;
            career.wins += standing.tally.wins;
        }
    }
    careers
}

/// Final-position-per-season series for the lifetime chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionMatrix {
    /// One chart label per season, from `seasonNo` or dataset position.
    pub labels: Vec<u32>,
    /// Driver name → final position in each season, None where the name did not race.
    pub rows: BTreeMap<String, Vec<Option<u32>>>,
    /// Display color per name: the last color any season assigned to it.
    pub colors: BTreeMap<String, String>,
}

pub fn position_matrix(seasons: &[Season]) -> PositionMatrix {
    let labels = seasons
        .iter()
        .enumerate()
        .map(|(index, season)| season.label(index))
        .collect();

    let mut rows: BTreeMap<String, Vec<Option<u32>>> = BTreeMap::new();
    let mut colors: BTreeMap<String, String> = BTreeMap::new();
    for (season_index, season) in seasons.iter().enumerate() {
        for standing in rank(&aggregate(season)) {
            let row = rows
                .entry(standing.tally.name.clone())
                .or_insert_with(|| vec![None; seasons.len()]);
            row[season_index] = Some(standing.position);
        }
        for driver in &season.drivers {
            if let Some(color) = &driver.color {
                colors.insert(driver.name.clone(), color.clone());
            }
        }
    }
    PositionMatrix {
        labels,
        rows,
        colors,
    }
}
