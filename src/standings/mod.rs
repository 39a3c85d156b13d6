pub mod aggregate;
pub mod entry;
pub mod export;
pub mod lifetime;
pub mod points;
pub mod rank;
pub mod summary;
pub mod trend;

pub use aggregate::{aggregate, DriverTally};
pub use export::write_standings_csv;
pub use lifetime::{aggregate_lifetime, position_matrix, CareerTotals, PositionMatrix};
pub use points::points_for;
pub use rank::{rank, rank_by_total, Standing};
pub use summary::{next_event, race_sheets, season_overview, RaceSheet, SeasonOverview};
pub use trend::{build_trend, TrendSnapshot};
