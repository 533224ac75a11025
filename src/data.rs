use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::raw;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single bike-share trip with its calendar fields derived from `start_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    month: u32,
    weekday: Weekday,
    hour: u32,
}

impl Trip {
    pub fn new(
        start_time: NaiveDateTime,
        duration: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn route(&self) -> String {
        format!("{} - {}", self.start_station, self.end_station)
    }
}

impl TryFrom<raw::Trip> for Trip {
    type Error = chrono::ParseError;

    fn try_from(val: raw::Trip) -> Result<Self, Self::Error> {
        let start_time = NaiveDateTime::parse_from_str(val.start_time.trim(), TIMESTAMP_FORMAT)?;

        Ok(Self {
            user_type: val.user_type,
            gender: val.gender,
            birth_year: val.birth_year.map(|year| year.trunc() as i32),
            ..Trip::new(start_time, val.trip_duration, val.start_station, val.end_station)
        })
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|month| chrono::Month::try_from(month).ok())
        .map(|month| month.name())
}

/// Which of the optional columns the source file carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub schema: Schema,
    pub trips: Vec<Trip>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
