//! Lenient decoding of the league JSON document into the typed model.
//!
//! The document is hand-maintained, so any field may be absent, null, or the wrong
//! shape. Decoding never fails: wrong shapes degrade to empty collections, zeroes, or
//! defaults. Shape is inspected exactly once, here; nothing downstream re-checks it.

use serde_json::Value;

use crate::data::dataset::{
    Adjustment, Dataset, Driver, DriverOutcome, PointsConfig, ResultEntry, ScheduleEntry, Season,
};

pub fn decode_dataset(raw: &Value) -> Dataset {
    let seasons = raw
        .get("seasons")
        .and_then(Value::as_array)
        .map(|list| list.iter().map(decode_season).collect())
        .unwrap_or_default();
    let active_season_index = coerce_f64(raw.get("activeSeasonIndex"))
        .filter(|n| *n >= 0.0)
        .map(|n| n as usize)
        .unwrap_or(0);
    Dataset {
        active_season_index,
        seasons,
    }
}

fn decode_season(raw: &Value) -> Season {
    Season {
        name: string_field(raw, "name"),
        season_no: coerce_f64(raw.get("seasonNo"))
            .filter(|n| *n >= 0.0)
            .map(|n| n as u32),
        drivers: array_field(raw, "drivers", decode_driver),
        schedule: array_field(raw, "schedule", decode_schedule_entry),
        results: array_field(raw, "results", decode_result_entry),
        points: decode_points(raw.get("points")),
        rules: string_field(raw, "rules"),
    }
}

fn decode_driver(raw: &Value) -> Driver {
    Driver {
        id: string_field(raw, "id"),
        name: string_field(raw, "name"),
        number: optional_string_field(raw, "number"),
        color: optional_string_field(raw, "color"),
        active: not_explicit_false(raw.get("active")),
    }
}

fn decode_schedule_entry(raw: &Value) -> ScheduleEntry {
    ScheduleEntry {
        id: string_field(raw, "id"),
        round: coerce_f64(raw.get("round"))
            .filter(|n| *n >= 0.0)
            .map(|n| n as u32)
            .unwrap_or(0),
        track: string_field(raw, "track"),
        practice_date: string_field(raw, "practiceDate"),
        race_date: string_field(raw, "raceDate"),
        include_in_stats: not_explicit_false(raw.get("includeInStats")),
    }
}

fn decode_result_entry(raw: &Value) -> ResultEntry {
    let by_driver = raw
        .get("byDriver")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(id, outcome)| (id.clone(), decode_outcome(outcome)))
                .collect()
        })
        .unwrap_or_default();
    let adjustments = raw
        .get("adjustments")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(id, adjustment)| (id.clone(), decode_adjustment(adjustment)))
                .collect()
        })
        .unwrap_or_default();
    ResultEntry {
        race_id: string_field(raw, "raceId"),
        by_driver,
        adjustments,
    }
}

fn decode_outcome(raw: &Value) -> DriverOutcome {
    DriverOutcome {
        quali_pos: coerce_f64(raw.get("qualiPos")),
        quali_dnp: truthy(raw.get("qDNP")),
        race_pos: coerce_f64(raw.get("racePos")),
        dnf: truthy(raw.get("dnf")),
    }
}

fn decode_adjustment(raw: &Value) -> Adjustment {
    // Empty string and null mean "no adjustment entered", not an error.
    let points = match raw.get("points") {
        None | Some(Value::Null) => 0.0,
        Some(Value::String(s)) if s.trim().is_empty() => 0.0,
        other => coerce_f64(other).unwrap_or(0.0),
    };
    Adjustment {
        points,
        note: string_field(raw, "note"),
    }
}

fn decode_points(raw: Option<&Value>) -> PointsConfig {
    PointsConfig {
        quali: points_table(raw.and_then(|p| p.get("quali"))),
        race: points_table(raw.and_then(|p| p.get("race"))),
    }
}

/// Keep positional indexing intact: non-numeric cells become NaN and score zero at lookup.
fn points_table(raw: Option<&Value>) -> Vec<f64> {
    raw.and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .map(|cell| cell.as_f64().unwrap_or(f64::NAN))
                .collect()
        })
        .unwrap_or_default()
}

fn array_field<T>(raw: &Value, key: &str, decode: fn(&Value) -> T) -> Vec<T> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|list| list.iter().map(decode).collect())
        .unwrap_or_default()
}

/// Numeric coercion: numbers pass through, numeric strings parse, anything else is None.
fn coerce_f64(raw: Option<&Value>) -> Option<f64> {
    match raw? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn string_field(raw: &Value, key: &str) -> String {
    match raw.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn optional_string_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Flags like `active` and `includeInStats` are on unless the document says `false`.
fn not_explicit_false(raw: Option<&Value>) -> bool {
    !matches!(raw, Some(Value::Bool(false)))
}

/// Truthiness for outcome flags: false, 0, null, "" and absence are off; anything else is on.
fn truthy(raw: Option<&Value>) -> bool {
    match raw {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn wrong_shape_fields_degrade_to_defaults() {
        let dataset = decode_dataset(&json!({
            "activeSeasonIndex": "not a number",
            "seasons": [{
                "name": 2025,
                "drivers": "nope",
                "schedule": null,
                "results": [{"raceId": "r1", "byDriver": [], "adjustments": 7}],
                "points": {"quali": {"a": 1}, "race": [10, "8", null]}
            }]
        }));

        assert_eq!(dataset.active_season_index, 0);
        let season = &dataset.seasons[0];
        assert_eq!(season.name, "2025");
        assert!(season.drivers.is_empty());
        assert!(season.schedule.is_empty());
        assert!(season.results[0].by_driver.is_empty());
        assert!(season.results[0].adjustments.is_empty());
        assert!(season.points.quali.is_empty());
        assert_eq!(season.points.race[0], 10.0);
        assert!(season.points.race[1].is_nan());
        assert!(season.points.race[2].is_nan());
    }

    #[test]
    fn positions_coerce_from_strings() {
        let entry = decode_result_entry(&json!({
            "raceId": "r1",
            "byDriver": {
                "a": {"qualiPos": "2", "racePos": 1},
                "b": {"qualiPos": "pole", "racePos": null, "dnf": 1}
            }
        }));
        assert_eq!(entry.by_driver["a"].quali_pos, Some(2.0));
        assert_eq!(entry.by_driver["a"].race_pos, Some(1.0));
        assert_eq!(entry.by_driver["b"].quali_pos, None);
        assert_eq!(entry.by_driver["b"].race_pos, None);
        assert!(entry.by_driver["b"].dnf);
    }

    #[test]
    fn adjustment_blank_points_are_zero() {
        assert_eq!(decode_adjustment(&json!({"points": ""})).points, 0.0);
        assert_eq!(decode_adjustment(&json!({"points": null})).points, 0.0);
        assert_eq!(decode_adjustment(&json!({})).points, 0.0);
        assert_eq!(decode_adjustment(&json!({"points": "-5"})).points, -5.0);
        assert_eq!(decode_adjustment(&json!({"points": 3})).points, 3.0);
        assert_eq!(decode_adjustment(&json!({"points": [1]})).points, 0.0);
    }

    #[test]
    fn inactive_only_on_explicit_false() {
        assert!(decode_driver(&json!({"id": "a"})).active);
        assert!(decode_driver(&json!({"id": "a", "active": null})).active);
        assert!(!decode_driver(&json!({"id": "a", "active": false})).active);
    }
}
