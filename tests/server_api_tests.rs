use paddock::data::dataset::Dataset;
use paddock::data::decode_dataset;
use paddock::server::routes::route_request;
use serde_json::json;

fn dataset() -> Dataset {
    decode_dataset(&json!({
        "activeSeasonIndex": 0,
        "seasons": [{
            "name": "Test Cup",
            "drivers": [
                { "id": "a", "name": "Ada", "number": "7", "color": "#f00" },
                { "id": "b", "name": "Bea" }
            ],
            "schedule": [
                { "id": "r1", "round": 1, "track": "Hilltop", "raceDate": "2025-03-01" },
                { "id": "r2", "round": 2, "track": "Lakeside", "raceDate": "2025-04-01",
                  "includeInStats": false }
            ],
            "results": [
                { "raceId": "r1", "byDriver": {
                    "a": { "qualiPos": 1, "racePos": 1 },
                    "b": { "racePos": 2 }
                } },
                { "raceId": "r2", "byDriver": { "b": { "racePos": 1 } } }
            ],
            "points": { "quali": [10], "race": [25, 18] }
        }]
    }))
}

#[test]
fn health_endpoint_returns_ok_json() {
    let response = route_request(&dataset(), "GET", "/api/health");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "application/json");
    assert!(response.body.contains("\"status\": \"ok\""));
}

#[test]
fn standings_endpoint_ranks_drivers() {
    let response = route_request(&dataset(), "GET", "/api/seasons/0/standings");
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    let standings = payload["standings"]
        .as_array()
        .expect("standings should be an array");
    assert_eq!(standings.len(), 2);
    assert_eq!(standings[0]["name"], "Ada");
    assert_eq!(standings[0]["position"], 1);
    assert_eq!(standings[0]["total"], 35.0);
    assert_eq!(standings[1]["name"], "Bea");
    // The excluded round 2 win never reaches Bea's tally.
    assert_eq!(standings[1]["total"], 18.0);
    assert_eq!(standings[1]["wins"], 0);
}

#[test]
fn excluded_race_still_appears_in_schedule_listing() {
    let response = route_request(&dataset(), "GET", "/api/seasons/0/schedule");
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    let schedule = payload["schedule"].as_array().expect("schedule array");
    assert_eq!(schedule.len(), 2);
    assert_eq!(schedule[1]["include_in_stats"], false);
}

#[test]
fn trend_endpoint_covers_only_included_races() {
    let response = route_request(&dataset(), "GET", "/api/seasons/0/trend");
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    let snapshots = payload["snapshots"].as_array().expect("snapshots array");
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0]["positions"]["a"], 1);
    assert_eq!(snapshots[0]["positions"]["b"], 2);
}

#[test]
fn standings_csv_has_csv_content_type_and_header() {
    let response = route_request(&dataset(), "GET", "/api/seasons/0/standings.csv");
    assert_eq!(response.status_code, 200);
    assert!(response.content_type.starts_with("text/csv"));
    let mut lines = response.body.lines();
    assert_eq!(
        lines.next(),
        Some("position,driver,number,quali_points,race_points,adjustment_points,total,wins,starts")
    );
    assert!(lines.next().expect("first data row").starts_with("1,Ada,7,"));
}

#[test]
fn lifetime_endpoint_returns_careers_and_matrix() {
    let response = route_request(&dataset(), "GET", "/api/lifetime");
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["careers"]["Ada"]["seasons_played"], 1);
    assert_eq!(payload["careers"]["Ada"]["wins"], 1);
    assert_eq!(payload["matrix"]["labels"][0], 1);
    assert_eq!(payload["matrix"]["rows"]["Ada"][0], 1);
}

#[test]
fn unknown_season_index_is_not_found() {
    let response = route_request(&dataset(), "GET", "/api/seasons/9/standings");
    assert_eq!(response.status_code, 404);
    assert!(response.body.contains("Season not found"));

    let response = route_request(&dataset(), "GET", "/api/seasons/x/standings");
    assert_eq!(response.status_code, 404);
}

#[test]
fn unknown_route_is_not_found() {
    let response = route_request(&dataset(), "GET", "/api/nope");
    assert_eq!(response.status_code, 404);
    let response = route_request(&dataset(), "POST", "/api/seasons");
    assert_eq!(response.status_code, 404);
}

#[test]
fn index_page_serves_the_viewer() {
    let response = route_request(&dataset(), "GET", "/");
    assert_eq!(response.status_code, 200);
    assert!(response.content_type.starts_with("text/html"));
    assert!(response.body.contains("Paddock"));
}
