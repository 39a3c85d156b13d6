//! Ranking: order tallies into a leaderboard with dense 1-based positions.
//!
//! Two comparators exist on purpose. Season tables break ties on win count before
//! name; the progressive trend chart ranks on totals and name only, so historical
//! chart lines keep the ordering they were drawn with. Both sorts are stable over
//! the driver-list order of their input, which makes the full ordering total.

use std::cmp::Ordering;

use serde::Serialize;

use crate::standings::aggregate::DriverTally;

/// A tally with its assigned leaderboard position (1-based, dense, no gaps).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub position: u32,
    #[serde(flatten)]
    pub tally: DriverTally,
}

/// Season leaderboard order: total points desc, wins desc, name asc.
pub fn rank(tallies: &[DriverTally]) -> Vec<Standing> {
    rank_with(tallies, |a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| b.wins.cmp(&a.wins))
            .then_with(|| a.name.cmp(&b.name))
    })
}

/// Trend snapshot order: total points desc, name asc.
pub fn rank_by_total(tallies: &[DriverTally]) -> Vec<Standing> {
    rank_with(tallies, |a, b| {
        b.total.total_cmp(&a.total).then_with(|| a.name.cmp(&b.name))
    })
}

fn rank_with<F>(tallies: &[DriverTally], compare: F) -> Vec<Standing>
where
    F: Fn(&DriverTally, &DriverTally) -> Ordering,
{
    let mut ordered = tallies.to_vec();
    ordered.sort_by(compare);
    ordered
        .into_iter()
        .enumerate()
        .map(|(slot, tally)| Standing {
            position: slot as u32 + 1,
            tally,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(name: &str, total: f64, wins: u32) -> DriverTally {
        DriverTally {
            driver_id: name.to_lowercase(),
            name: name.to_string(),
            number: None,
            color: None,
            quali_points: 0.0,
            race_points: total,
            adjustment_points: 0.0,
            total,
            wins,
            starts: 0,
        }
    }

    #[test]
    fn wins_break_point_ties_in_season_order() {
        let standings = rank(&[tally("Ada", 30.0, 1), tally("Bea", 30.0, 2)]);
        assert_eq!(standings[0].tally.name, "Bea");
        assert_eq!(standings[1].tally.name, "Ada");
    }

    #[test]
    fn name_breaks_ties_when_wins_match() {
        let standings = rank(&[tally("Bea", 30.0, 1), tally("Ada", 30.0, 1)]);
        assert_eq!(standings[0].tally.name, "Ada");
        assert_eq!(standings[1].tally.name, "Bea");
    }

    #[test]
    fn trend_order_ignores_wins() {
        let standings = rank_by_total(&[tally("Bea", 30.0, 0), tally("Ada", 30.0, 3)]);
        assert_eq!(standings[0].tally.name, "Ada");
    }

    #[test]
    fn positions_are_dense_from_one() {
        let standings = rank(&[
            tally("Ada", 10.0, 0),
            tally("Bea", 30.0, 1),
            tally("Cy", 20.0, 0),
        ]);
        let positions: Vec<u32> = standings.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert_eq!(standings[0].tally.name, "Bea");
    }
}
