//! Jobs domain logic

pub mod aggregator;
pub mod dates;
pub mod error;
pub mod flatten;
