use std::{fmt, str::FromStr};

use chrono::Weekday;
use tracing::debug;

use crate::{
    config::City,
    data::{weekday_name, Dataset, Trip},
};

pub const MONTH_CHOICES: [&str; 7] = [
    "all", "january", "february", "march", "april", "may", "june",
];

pub const DAY_CHOICES: [&str; 8] = [
    "all",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    /// Calendar month number, 1 (January) through 6 (June).
    Month(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Day(Weekday),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidChoice(pub String);

impl fmt::Display for InvalidChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MonthFilter {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice = s.trim().to_lowercase();
        match MONTH_CHOICES.iter().position(|&month| month == choice) {
            Some(0) => Ok(Self::All),
            Some(index) => Ok(Self::Month(index as u32)),
            None => Err(InvalidChoice(s.to_owned())),
        }
    }
}

impl FromStr for DayFilter {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice = s.trim().to_lowercase();
        match DAY_CHOICES.iter().position(|&day| day == choice) {
            Some(0) => Ok(Self::All),
            Some(index) => Ok(Self::Day(WEEKDAYS[index - 1])),
            None => Err(InvalidChoice(s.to_owned())),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Month(month) => write!(
                f,
                "{}",
                MONTH_CHOICES.get(*month as usize).copied().unwrap_or("?")
            ),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Day(weekday) => write!(f, "{}", weekday_name(*weekday).to_lowercase()),
        }
    }
}

/// A (city, month, day) selection. Built fresh for every pass through the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria<'a> {
    pub city: &'a City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl Criteria<'_> {
    pub fn matches(&self, trip: &Trip) -> bool {
        let month_ok = match self.month {
            MonthFilter::All => true,
            MonthFilter::Month(month) => trip.month() == month,
        };
        let day_ok = match self.day {
            DayFilter::All => true,
            DayFilter::Day(weekday) => trip.weekday() == weekday,
        };

        month_ok && day_ok
    }
}

/// Keeps the trips matching `criteria`. An empty result is not an error.
pub fn apply(dataset: Dataset, criteria: &Criteria) -> Dataset {
    if criteria.month == MonthFilter::All && criteria.day == DayFilter::All {
        return dataset;
    }

    let before = dataset.len();
    let Dataset { schema, trips } = dataset;
    let trips: Vec<Trip> = trips
        .into_iter()
        .filter(|trip| criteria.matches(trip))
        .collect();

    debug!(
        city = criteria.city.key,
        month = %criteria.month,
        day = %criteria.day,
        before,
        after = trips.len(),
        "Filtered trips"
    );
    Dataset { schema, trips }
}
