// Market Estimator: (job title, location) -> compensation range.
// Table-driven today; a live provider slots in behind `MarketDataSource`.

pub mod estimator;

pub use estimator::{MarketDataSource, TableEstimator};
