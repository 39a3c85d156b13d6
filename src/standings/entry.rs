//! Per-race contribution fold. Both the season aggregator and the progressive trend
//! replay apply result entries through this one function so their award rules cannot
//! drift apart.

use std::collections::HashMap;

use crate::data::dataset::{PointsConfig, ResultEntry};
use crate::standings::aggregate::DriverTally;

/// Fold one result entry into the running tallies.
///
/// `index` maps driver id to a slot in `tallies`; ids the season's driver list does
/// not know are skipped silently, including in the adjustment map. Qualifying points
/// require a positive position and no DNP flag; race points require a positive
/// position and no DNF flag. Any finite race position counts as a start, and winning
/// means finishing first without a DNF. Adjustments apply independently of outcomes.
pub(crate) fn fold_entry(
    entry: &ResultEntry,
    points: &PointsConfig,
    index: &HashMap<&str, usize>,
    tallies: &mut [DriverTally],
) {
    for (driver_id, outcome) in &entry.by_driver {
        let Some(&slot) = index.get(driver_id.as_str()) else {
            continue;
        };
        let tally = &mut tallies[slot];
        if let Some(pos) = outcome.quali_pos {
            if pos > 0.0 && !outcome.quali_dnp {
                tally.quali_points += super::points_for(pos, &points.quali);
            }
        }
        if let Some(pos) = outcome.race_pos {
            tally.starts += 1;
            if pos > 0.0 && !outcome.dnf {
                tally.race_points += super::points_for(pos, &points.race);
                if pos == 1.0 {
                    tally.wins += 1;
                }
            }
        }
    }
    for (driver_id, adjustment) in &entry.adjustments {
        if let Some(&slot) = index.get(driver_id.as_str()) {
            tallies[slot].adjustment_points += adjustment.points;
        }
    }
}

/// Driver id → tally slot lookup for a season's driver list. A duplicated id keeps
/// its last slot.
pub(crate) fn driver_index(drivers: &[crate::data::dataset::Driver]) -> HashMap<&str, usize> {
    drivers
        .iter()
        .enumerate()
        .map(|(slot, driver)| (driver.id.as_str(), slot))
        .collect()
}
