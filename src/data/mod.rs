pub mod dataset;
pub mod decode;

pub use dataset::{
    load_dataset, Adjustment, Dataset, Driver, DriverOutcome, LoadError, PointsConfig,
    ResultEntry, ScheduleEntry, Season, DEFAULT_DATA_PATH,
};
pub use decode::decode_dataset;
