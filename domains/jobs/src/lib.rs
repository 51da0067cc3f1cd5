//! Jobs domain: paginated job aggregation, flattening, /jobs endpoint

pub mod api;
pub mod domain;

pub use api::{routes, JobsState};
pub use domain::aggregator::fetch_all_jobs;
pub use domain::dates::parse_date_range;
pub use domain::error::JobsError;
pub use domain::flatten::{flatten_jobs, CustomerType, FlatJobRow};
