//! The four statistic blocks computed over a filtered set of trips.
//!
//! Every aggregator reports [`Error::NoData`] for an empty selection rather than
//! producing a meaningless value.

use std::hash::Hash;

use itertools::Itertools;
use tracing::debug;

use crate::{
    data::{Dataset, Trip},
    error::{Error, Result},
};

/// Most frequent value of `values`.
///
/// Ties are broken by taking the smallest of the tied values in ascending order, so the
/// result never depends on iteration order. Returns `None` for an empty input.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord + Hash,
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .counts()
        .into_iter()
        .max_by(|(a, a_count), (b, b_count)| a_count.cmp(b_count).then_with(|| b.cmp(a)))
        .map(|(value, _)| value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    pub month: u32,
    pub weekday: &'static str,
    pub hour: u32,
}

pub fn time_stats(trips: &[Trip]) -> Result<TimeStats> {
    let stats = TimeStats {
        month: mode(trips.iter().map(Trip::month)).ok_or(Error::NoData)?,
        weekday: mode(trips.iter().map(Trip::weekday_name)).ok_or(Error::NoData)?,
        hour: mode(trips.iter().map(Trip::hour)).ok_or(Error::NoData)?,
    };
    debug!(?stats, "Computed time stats");
    Ok(stats)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    pub route: String,
}

pub fn station_stats(trips: &[Trip]) -> Result<StationStats> {
    let stats = StationStats {
        start_station: mode(trips.iter().map(|t| t.start_station.as_str()))
            .ok_or(Error::NoData)?
            .to_owned(),
        end_station: mode(trips.iter().map(|t| t.end_station.as_str()))
            .ok_or(Error::NoData)?
            .to_owned(),
        route: mode(trips.iter().map(Trip::route)).ok_or(Error::NoData)?,
    };
    debug!(?stats, "Computed station stats");
    Ok(stats)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
}

pub fn duration_stats(trips: &[Trip]) -> Result<DurationStats> {
    if trips.is_empty() {
        return Err(Error::NoData);
    }

    let total: f64 = trips.iter().map(|trip| trip.duration).sum();
    let stats = DurationStats {
        count: trips.len(),
        total,
        mean: total / trips.len() as f64,
    };
    debug!(?stats, "Computed duration stats");
    Ok(stats)
}

/// Renders a number of seconds as `HH:MM:SS` on a 24-hour clock face.
///
/// Fractional seconds are dropped and the value wraps every 86400 seconds, so totals of
/// a day or more only show the remainder.
pub fn format_clock(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64 % 86_400
    } else {
        0
    };
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        seconds % 3600 / 60,
        seconds % 60
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

/// Group for trips whose user type cell is blank.
pub const UNKNOWN_USER_TYPE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    /// Every selected trip is counted, blank user types under [`UNKNOWN_USER_TYPE`].
    pub user_types: Vec<(String, usize)>,
    /// `None` when the source has no gender column.
    pub genders: Option<Vec<(String, usize)>>,
    /// Outer `None` when the source has no birth-year column, inner `None` when the
    /// column exists but no selected trip has a value.
    pub birth_years: Option<Option<BirthYearStats>>,
}

fn group_counts<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<(String, usize)> {
    values
        .flatten()
        .counts()
        .into_iter()
        .map(|(value, count)| (value.to_owned(), count))
        .sorted()
        .collect()
}

pub fn user_stats(dataset: &Dataset) -> Result<UserStats> {
    let trips = &dataset.trips;
    if trips.is_empty() {
        return Err(Error::NoData);
    }

    let genders = dataset
        .schema
        .has_gender
        .then(|| group_counts(trips.iter().map(|t| t.gender.as_deref())));

    let birth_years = dataset.schema.has_birth_year.then(|| {
        let years = trips.iter().filter_map(|t| t.birth_year).collect_vec();
        match years.iter().minmax().into_option() {
            Some((&earliest, &latest)) => Some(BirthYearStats {
                earliest,
                latest,
                most_common: mode(years.iter().copied())?,
            }),
            None => None,
        }
    });

    let stats = UserStats {
        user_types: group_counts(trips.iter().map(|t| {
            Some(t.user_type.as_deref().unwrap_or(UNKNOWN_USER_TYPE))
        })),
        genders,
        birth_years,
    };
    debug!(?stats, "Computed user stats");
    Ok(stats)
}
