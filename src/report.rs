use std::{io::Write, time::Instant};

use tabled::{builder::Builder, settings::Style};

use crate::{
    data::{month_name, Dataset, Trip, TIMESTAMP_FORMAT},
    error::{Error, Result},
    stats::{self, format_clock},
};

pub const RULE_WIDTH: usize = 40;
pub const NO_DATA: &str = "No data for this selection.";

pub fn rule<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    Ok(())
}

/// Writes one statistic block: heading, body, elapsed time and a closing rule.
///
/// A body failing with [`Error::NoData`] is reported inline; any other error is
/// returned.
fn block<W, F>(out: &mut W, heading: &str, body: F) -> Result<()>
where
    W: Write,
    F: FnOnce(&mut W) -> Result<()>,
{
    writeln!(out, "\n{heading}\n")?;
    let started = Instant::now();

    match body(out) {
        Ok(()) => {}
        Err(Error::NoData) => writeln!(out, "{NO_DATA}")?,
        Err(err) => return Err(err),
    }

    writeln!(
        out,
        "\nThis took {} seconds.",
        started.elapsed().as_secs_f64()
    )?;
    rule(out)
}

/// Capitalizes the first letter of every word and lowercases the rest.
pub fn title_case(s: &str) -> String {
    let mut previous_alphabetic = false;
    s.chars()
        .map(|c| {
            let mapped = if previous_alphabetic {
                c.to_lowercase().collect::<String>()
            } else {
                c.to_uppercase().collect::<String>()
            };
            previous_alphabetic = c.is_alphabetic();
            mapped
        })
        .collect()
}

pub fn time_report<W: Write>(out: &mut W, trips: &[Trip]) -> Result<()> {
    block(out, "Calculating The Most Frequent Times of Travel...", |out| {
        let stats = stats::time_stats(trips)?;
        let month = month_name(stats.month)
            .map(str::to_owned)
            .unwrap_or_else(|| stats.month.to_string());

        writeln!(out, "The most common month of travel is: {month}")?;
        writeln!(out, "The most common day of travel is: {}", stats.weekday)?;
        writeln!(out, "The most common start hour of travel is: {}", stats.hour)?;
        Ok(())
    })
}

pub fn station_report<W: Write>(out: &mut W, trips: &[Trip]) -> Result<()> {
    block(out, "Calculating The Most Popular Stations and Trip...", |out| {
        let stats = stats::station_stats(trips)?;

        writeln!(
            out,
            "The most common start station is: {}",
            title_case(&stats.start_station)
        )?;
        writeln!(
            out,
            "The most common end station is: {}",
            title_case(&stats.end_station)
        )?;
        writeln!(
            out,
            "The most common combination of start and end station is: {}",
            stats.route
        )?;
        Ok(())
    })
}

pub fn duration_report<W: Write>(out: &mut W, trips: &[Trip]) -> Result<()> {
    block(out, "Calculating Trip Duration...", |out| {
        let stats = stats::duration_stats(trips)?;

        writeln!(
            out,
            "The total travel time is (HH:MM:SS): {}",
            format_clock(stats.total)
        )?;
        writeln!(
            out,
            "The mean travel time is (HH:MM:SS): {}",
            format_clock(stats.mean)
        )?;
        Ok(())
    })
}

fn write_counts<W: Write>(out: &mut W, label: &str, counts: &[(String, usize)]) -> Result<()> {
    writeln!(out, "The counts of {label} are:")?;
    for (value, count) in counts {
        writeln!(out, "  {value}: {count}")?;
    }
    Ok(())
}

pub fn user_report<W: Write>(out: &mut W, dataset: &Dataset) -> Result<()> {
    block(out, "Calculating User Stats...", |out| {
        let stats = stats::user_stats(dataset)?;

        write_counts(out, "user types", &stats.user_types)?;

        if let Some(genders) = &stats.genders {
            writeln!(out)?;
            write_counts(out, "gender", genders)?;
        }

        match &stats.birth_years {
            Some(Some(years)) => {
                writeln!(out, "\nThe earliest year of birth is: {}", years.earliest)?;
                writeln!(out, "The most recent year of birth is: {}", years.latest)?;
                writeln!(out, "The most common year of birth is: {}", years.most_common)?;
            }
            Some(None) => writeln!(out, "\nNo year of birth recorded for this selection.")?,
            None => {}
        }
        Ok(())
    })
}

/// Renders `trips` as a table, including the optional columns the dataset carries.
pub fn raw_table(dataset: &Dataset, trips: &[Trip]) -> String {
    let schema = dataset.schema;
    let mut builder = Builder::default();

    let mut header = vec![
        "Start Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ];
    if schema.has_gender {
        header.push("Gender");
    }
    if schema.has_birth_year {
        header.push("Birth Year");
    }
    header.extend(["month", "day_of_week", "hour"]);
    builder.push_record(header.into_iter().map(str::to_owned));

    for trip in trips {
        let mut row = vec![
            trip.start_time.format(TIMESTAMP_FORMAT).to_string(),
            trip.duration.to_string(),
            trip.start_station.clone(),
            trip.end_station.clone(),
            trip.user_type.clone().unwrap_or_default(),
        ];
        if schema.has_gender {
            row.push(trip.gender.clone().unwrap_or_default());
        }
        if schema.has_birth_year {
            row.push(trip.birth_year.map(|y| y.to_string()).unwrap_or_default());
        }
        row.push(trip.month().to_string());
        row.push(trip.weekday_name().to_owned());
        row.push(trip.hour().to_string());
        builder.push_record(row);
    }

    builder.build().with(Style::psql()).to_string()
}
