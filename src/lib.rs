//! Explore US bike-share trip data: filter one city's trips by month and weekday and
//! report when, where and by whom the bikes were ridden.

pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod raw;
pub mod report;
pub mod shell;
pub mod source;
pub mod stats;

pub use error::{Error, Result};
