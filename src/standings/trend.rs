//! Progressive standings: replay the season race by race and record where every
//! driver sits after each round. Feeds the position-over-time chart, which plots
//! rank, not points.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::dataset::{ScheduleEntry, Season};
use crate::standings::aggregate::DriverTally;
use crate::standings::entry::{driver_index, fold_entry};
use crate::standings::rank::rank_by_total;

/// Full leaderboard snapshot after one race: driver id → position held at that point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSnapshot {
    pub race_id: String,
    pub round: u32,
    pub positions: BTreeMap<String, u32>,
}

/// One snapshot per included race, in race-date order. A race with no result entry
/// still produces a snapshot (nothing folds in, positions carry over). Races whose
/// dates do not parse sort after dated ones, keeping their schedule order.
pub fn build_trend(season: &Season) -> Vec<TrendSnapshot> {
    let mut races: Vec<&ScheduleEntry> = season
        .schedule
        .iter()
        .filter(|entry| entry.include_in_stats)
        .collect();
    races.sort_by_key(|entry| {
        let day = entry.race_day();
        (day.is_none(), day)
    });

    let index = driver_index(&season.drivers);
    let mut cumulative: Vec<DriverTally> = season.drivers.iter().map(DriverTally::zero).collect();

    let mut snapshots = Vec::with_capacity(races.len());
    for race in races {
        if let Some(entry) = season.result_for(&race.id) {
            fold_entry(entry, &season.points, &index, &mut cumulative);
            for tally in &mut cumulative {
                tally.recompute_total();
            }
        }
        let positions = rank_by_total(&cumulative)
            .into_iter()
            .map(|standing| (standing.tally.driver_id, standing.position))
            .collect();
        snapshots.push(TrendSnapshot {
            race_id: race.id.clone(),
            round: race.round,
            positions,
        });
    }
    snapshots
}
