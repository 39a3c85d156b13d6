//! Season aggregation: fold every included result entry into one cumulative tally per
//! driver. Rebuilt from scratch on every call — a full recomputation is the reference
//! for any view, so there is no cached or incremental state to go stale.

use serde::Serialize;

use crate::data::dataset::{Driver, Season};
use crate::standings::entry::{driver_index, fold_entry};

/// Cumulative season outcome for one driver. `total` is always recomputed as the sum
/// of the three point components, never stored independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverTally {
    pub driver_id: String,
    pub name: String,
    pub number: Option<String>,
    pub color: Option<String>,
    pub quali_points: f64,
    pub race_points: f64,
    pub adjustment_points: f64,
    pub total: f64,
    pub wins: u32,
    pub starts: u32,
}

impl DriverTally {
    pub(crate) fn zero(driver: &Driver) -> Self {
        DriverTally {
            driver_id: driver.id.clone(),
            name: driver.name.clone(),
            number: driver.number.clone(),
            color: driver.color.clone(),
            quali_points: 0.0,
            race_points: 0.0,
            adjustment_points: 0.0,
            total: 0.0,
            wins: 0,
            starts: 0,
        }
    }

    pub(crate) fn recompute_total(&mut self) {
        self.total = self.quali_points + self.race_points + self.adjustment_points;
    }
}

/// Season standings tallies, one per driver in driver-list order. Drivers with no
/// results appear with all-zero tallies; races flagged out of the stats contribute
/// nothing.
pub fn aggregate(season: &Season) -> Vec<DriverTally> {
    let mut tallies: Vec<DriverTally> = season.drivers.iter().map(DriverTally::zero).collect();
    let index = driver_index(&season.drivers);

    for entry in &season.results {
        if !season.race_included(&entry.race_id) {
            continue;
        }
        fold_entry(entry, &season.points, &index, &mut tallies);
    }
    for tally in &mut tallies {
        tally.recompute_total();
    }
    tallies
}
