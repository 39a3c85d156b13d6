use std::env;

use crate::data::dataset::{load_dataset, Dataset, Season, DEFAULT_DATA_PATH};
use crate::server;
use crate::standings::export::write_standings_csv;
use crate::standings::{aggregate, aggregate_lifetime, build_trend, position_matrix, rank,
    season_overview};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Standings,
    Trend,
    Lifetime,
    Schedule,
    Summary,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("standings") => Some(Command::Standings),
        Some("trend") => Some(Command::Trend),
        Some("lifetime") => Some(Command::Lifetime),
        Some("schedule") => Some(Command::Schedule),
        Some("summary") => Some(Command::Summary),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(args),
        Some(Command::Standings) => handle_standings(args),
        Some(Command::Trend) => handle_trend(args),
        Some(Command::Lifetime) => handle_lifetime(args),
        Some(Command::Schedule) => handle_schedule(args),
        Some(Command::Summary) => handle_summary(args),
        None => {
            eprintln!("usage: paddock <serve|standings|trend|lifetime|schedule|summary> [season] [--csv] [--data <path>]");
            2
        }
    }
}

fn handle_serve(args: &[String]) -> i32 {
    let dataset = match load(args) {
        Ok(dataset) => dataset,
        Err(code) => return code,
    };
    let bind_addr = env::var("PADDOCK_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr, &dataset) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_standings(args: &[String]) -> i32 {
    let dataset = match load(args) {
        Ok(dataset) => dataset,
        Err(code) => return code,
    };
    let Some(season) = select_season(&dataset, args) else {
        return 1;
    };
    let standings = rank(&aggregate(season));

    if args.iter().any(|arg| arg == "--csv") {
        if let Err(err) = write_standings_csv(&standings, std::io::stdout()) {
            eprintln!("failed to write csv: {err}");
            return 1;
        }
        return 0;
    }
    print_json(&serde_json::json!({ "season": season.name, "standings": standings }))
}

fn handle_trend(args: &[String]) -> i32 {
    let dataset = match load(args) {
        Ok(dataset) => dataset,
        Err(code) => return code,
    };
    let Some(season) = select_season(&dataset, args) else {
        return 1;
    };
    print_json(&serde_json::json!({
        "season": season.name,
        "snapshots": build_trend(season)
    }))
}

fn handle_lifetime(args: &[String]) -> i32 {
    let dataset = match load(args) {
        Ok(dataset) => dataset,
        Err(code) => return code,
    };
    print_json(&serde_json::json!({
        "careers": aggregate_lifetime(&dataset.seasons),
        "matrix": position_matrix(&dataset.seasons)
    }))
}

fn handle_schedule(args: &[String]) -> i32 {
    let dataset = match load(args) {
        Ok(dataset) => dataset,
        Err(code) => return code,
    };
    let Some(season) = select_season(&dataset, args) else {
        return 1;
    };
    print_json(&serde_json::json!({
        "season": season.name,
        "schedule": season.schedule
    }))
}

fn handle_summary(args: &[String]) -> i32 {
    let dataset = match load(args) {
        Ok(dataset) => dataset,
        Err(code) => return code,
    };
    let Some(season) = select_season(&dataset, args) else {
        return 1;
    };
    print_json(&serde_json::json!({
        "season": season.name,
        "overview": season_overview(season)
    }))
}

fn load(args: &[String]) -> Result<Dataset, i32> {
    let path = data_path(args);
    load_dataset(&path).map_err(|err| {
        eprintln!("failed to load {path}: {err}");
        1
    })
}

/// Dataset path: `--data <path>` beats `PADDOCK_DATA` beats the default.
fn data_path(args: &[String]) -> String {
    if let Some(flag) = args.iter().position(|arg| arg == "--data") {
        if let Some(path) = args.get(flag + 1) {
            return path.clone();
        }
    }
    env::var("PADDOCK_DATA").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string())
}

/// Season from the first positional argument after the command, else the active one.
fn select_season<'a>(dataset: &'a Dataset, args: &[String]) -> Option<&'a Season> {
    match args.get(2).filter(|arg| !arg.starts_with("--")) {
        Some(raw) => match raw.parse::<usize>().ok().and_then(|i| dataset.seasons.get(i)) {
            Some(season) => Some(season),
            None => {
                eprintln!("season '{raw}' not found (dataset has {})", dataset.seasons.len());
                None
            }
        },
        None => {
            let season = dataset.active_season();
            if season.is_none() {
                eprintln!("dataset has no seasons");
            }
            season
        }
    }
}

fn print_json(payload: &serde_json::Value) -> i32 {
    match serde_json::to_string_pretty(payload) {
        Ok(body) => {
            println!("{body}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize output: {err}");
            1
        }
    }
}
