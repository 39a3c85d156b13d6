//! CSV export of a ranked leaderboard, for download from the viewer or piping from
//! the CLI.

use std::io;

use crate::standings::rank::Standing;

/// Write standings as CSV with a header row. Numbers missing from the roster are
/// left blank.
pub fn write_standings_csv<W: io::Write>(
    standings: &[Standing],
    writer: W,
) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record([
        "position",
        "driver",
        "number",
        "quali_points",
        "race_points",
        "adjustment_points",
        "total",
        "wins",
        "starts",
    ])?;
    for standing in standings {
        let tally = &standing.tally;
        out.write_record([
            standing.position.to_string(),
            tally.name.clone(),
            tally.number.clone().unwrap_or_default(),
            tally.quali_points.to_string(),
            tally.race_points.to_string(),
            tally.adjustment_points.to_string(),
            tally.total.to_string(),
            tally.wins.to_string(),
            tally.starts.to_string(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Standings CSV as an in-memory string, for HTTP responses.
pub fn standings_csv_string(standings: &[Standing]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_standings_csv(standings, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
