//! Season views for the dashboard and results tabs: headline counts, the next
//! scheduled event, and per-round result sheets. Raw listings keep excluded races
//! visible; only the aggregation drops them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::dataset::{ScheduleEntry, Season};
use crate::standings::aggregate::aggregate;
use crate::standings::rank::rank;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonOverview {
    pub drivers: usize,
    pub active_drivers: usize,
    pub races: usize,
    pub included_races: usize,
    /// Included races that have at least one recorded outcome.
    pub events_recorded: usize,
    pub leader: Option<String>,
}

pub fn season_overview(season: &Season) -> SeasonOverview {
    let leader = rank(&aggregate(season))
        .into_iter()
        .next()
        .map(|standing| standing.tally.name);
    SeasonOverview {
        drivers: season.drivers.len(),
        active_drivers: season.drivers.iter().filter(|d| d.active).count(),
        races: season.schedule.len(),
        included_races: season
            .schedule
            .iter()
            .filter(|entry| entry.include_in_stats)
            .count(),
        events_recorded: season
            .results
            .iter()
            .filter(|entry| !entry.by_driver.is_empty() && season.race_included(&entry.race_id))
            .count(),
        leader,
    }
}

/// First schedule entry racing on or after `today`, in schedule order.
pub fn next_event<'a>(season: &'a Season, today: NaiveDate) -> Option<&'a ScheduleEntry> {
    season
        .schedule
        .iter()
        .find(|entry| entry.race_day().map_or(false, |day| day >= today))
}

/// One line of a qualifying or race sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetRow {
    /// Positive positions only; a flagged driver with no position shows None.
    pub position: Option<f64>,
    pub driver: String,
    pub flag: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentRow {
    pub driver: String,
    pub points: f64,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceSheet {
    pub race_id: String,
    pub round: u32,
    pub track: String,
    pub practice_date: String,
    pub race_date: String,
    pub included: bool,
    pub qualifying: Vec<SheetRow>,
    pub race: Vec<SheetRow>,
    pub adjustments: Vec<AdjustmentRow>,
}

/// Result sheets for every schedule entry, in schedule order. Rows appear when the
/// driver has a positive position or an exclusion flag for that segment; unknown
/// driver ids are dropped from sheets but adjustments echo the raw id.
pub fn race_sheets(season: &Season) -> Vec<RaceSheet> {
    season
        .schedule
        .iter()
        .map(|race| {
            let mut qualifying = Vec::new();
            let mut race_rows = Vec::new();
            let mut adjustments = Vec::new();

            if let Some(entry) = season.result_for(&race.id) {
                for (driver_id, outcome) in &entry.by_driver {
                    let Some(driver) = season.drivers.iter().find(|d| &d.id == driver_id) else {
                        continue;
                    };
                    let quali_pos = outcome.quali_pos.filter(|p| *p > 0.0);
                    if quali_pos.is_some() || outcome.quali_dnp {
                        qualifying.push(SheetRow {
                            position: quali_pos,
                            driver: driver.name.clone(),
                            flag: outcome.quali_dnp.then_some("DNP"),
                        });
                    }
                    let race_pos = outcome.race_pos.filter(|p| *p > 0.0);
                    if race_pos.is_some() || outcome.dnf {
                        race_rows.push(SheetRow {
                            position: race_pos,
                            driver: driver.name.clone(),
                            flag: outcome.dnf.then_some("DNF"),
                        });
                    }
                }
                for (driver_id, adjustment) in &entry.adjustments {
                    let name = season
                        .drivers
                        .iter()
                        .find(|d| &d.id == driver_id)
                        .map(|d| d.name.clone())
                        .unwrap_or_else(|| driver_id.clone());
                    adjustments.push(AdjustmentRow {
                        driver: name,
                        points: adjustment.points,
                        note: adjustment.note.clone(),
                    });
                }
            }

            sort_sheet(&mut qualifying);
            sort_sheet(&mut race_rows);

            RaceSheet {
                race_id: race.id.clone(),
                round: race.round,
                track: race.track.clone(),
                practice_date: race.practice_date.clone(),
                race_date: race.race_date.clone(),
                included: race.include_in_stats,
                qualifying,
                race: race_rows,
                adjustments,
            }
        })
        .collect()
}

/// Position ascending with positionless rows last, then name.
fn sort_sheet(rows: &mut [SheetRow]) {
    rows.sort_by(|a, b| {
        let a_pos = a.position.unwrap_or(f64::INFINITY);
        let b_pos = b.position.unwrap_or(f64::INFINITY);
        a_pos
            .total_cmp(&b_pos)
            .then_with(|| a.driver.cmp(&b.driver))
    });
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::data::dataset::{
        Adjustment, Driver, DriverOutcome, ResultEntry, ScheduleEntry, Season,
    };

    use super::*;

    fn season_with_one_round() -> Season {
        let mut by_driver = BTreeMap::new();
        by_driver.insert(
            "b".to_string(),
            DriverOutcome {
                quali_pos: Some(2.0),
                race_pos: None,
                dnf: true,
                ..DriverOutcome::default()
            },
        );
        by_driver.insert(
            "a".to_string(),
            DriverOutcome {
                quali_pos: Some(1.0),
                race_pos: Some(1.0),
                ..DriverOutcome::default()
            },
        );
        let mut adjustments = BTreeMap::new();
        adjustments.insert(
            "ghost".to_string(),
            Adjustment {
                points: -5.0,
                note: "jump start".to_string(),
            },
        );
        Season {
            drivers: vec![
                Driver {
                    id: "a".to_string(),
                    name: "Ada".to_string(),
                    active: true,
                    ..Driver::default()
                },
                Driver {
                    id: "b".to_string(),
                    name: "Bea".to_string(),
                    active: false,
                    ..Driver::default()
                },
            ],
            schedule: vec![ScheduleEntry {
                id: "r1".to_string(),
                round: 1,
                track: "Hilltop".to_string(),
                race_date: "2025-03-01".to_string(),
                include_in_stats: true,
                ..ScheduleEntry::default()
            }],
            results: vec![ResultEntry {
                race_id: "r1".to_string(),
                by_driver,
                adjustments,
            }],
            ..Season::default()
        }
    }

    #[test]
    fn overview_counts_and_leader() {
        let season = season_with_one_round();
        let overview = season_overview(&season);
        assert_eq!(overview.drivers, 2);
        assert_eq!(overview.active_drivers, 1);
        assert_eq!(overview.races, 1);
        assert_eq!(overview.included_races, 1);
        assert_eq!(overview.events_recorded, 1);
        assert_eq!(overview.leader.as_deref(), Some("Ada"));
    }

    #[test]
    fn next_event_skips_past_races() {
        let season = season_with_one_round();
        let before = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let after = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert_eq!(next_event(&season, before).map(|r| r.id.as_str()), Some("r1"));
        assert!(next_event(&season, after).is_none());
    }

    #[test]
    fn sheets_sort_by_position_and_echo_unknown_adjustment_ids() {
        let season = season_with_one_round();
        let sheets = race_sheets(&season);
        assert_eq!(sheets.len(), 1);
        let sheet = &sheets[0];

        assert_eq!(sheet.qualifying.len(), 2);
        assert_eq!(sheet.qualifying[0].driver, "Ada");
        assert_eq!(sheet.qualifying[1].driver, "Bea");

        // Bea has no race position but DNF'd, so she appears flagged and last.
        assert_eq!(sheet.race.len(), 2);
        assert_eq!(sheet.race[1].driver, "Bea");
        assert_eq!(sheet.race[1].flag, Some("DNF"));
        assert_eq!(sheet.race[1].position, None);

        assert_eq!(sheet.adjustments.len(), 1);
        assert_eq!(sheet.adjustments[0].driver, "ghost");
        assert_eq!(sheet.adjustments[0].points, -5.0);
    }
}
