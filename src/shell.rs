use std::io::{BufRead, Write};

use tracing::info;

use crate::{
    config::Catalog,
    data::Dataset,
    error::{Error, Result},
    filter::{self, Criteria, DayFilter, MonthFilter},
    report, source,
};

pub const PAGE_SIZE: usize = 5;

/// The interactive prompt loop, reading answers from `input` and writing to `output`.
pub struct Shell<'a, R, W> {
    catalog: &'a Catalog,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(catalog: &'a Catalog, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the user declines to restart or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let criteria = match self.get_filters() {
                Ok(criteria) => criteria,
                Err(Error::InputClosed { prompt }) => {
                    info!(prompt, "Input closed, leaving");
                    return Ok(());
                }
                Err(err) => return Err(err),
            };

            self.analyse(&criteria)?;

            if !self.confirm("\nWould you like to restart? Enter yes or no.")? {
                return Ok(());
            }
        }
    }

    /// Asks for city, month and day until each answer is valid.
    pub fn get_filters(&mut self) -> Result<Criteria<'a>> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        let catalog = self.catalog;
        let city = self.prompt(
            "city",
            &format!(
                "Please enter the name of the city you would like to analyse ({})",
                catalog.city_labels()
            ),
            |answer| catalog.city(answer),
            |answer| format!("{answer} is not a city currently available for analysis..."),
        )?;

        let month = self.prompt(
            "month",
            "Please enter the month you would like to analyse (all, january, february, ... , june)",
            |answer| answer.parse::<MonthFilter>().ok(),
            |answer| format!("{answer} is not a valid month to search on..."),
        )?;

        let day = self.prompt(
            "day",
            "Please enter the day you would like to analyse (all, monday, tuesday, ... sunday)",
            |answer| answer.parse::<DayFilter>().ok(),
            |answer| format!("{answer} is not a valid day of the week to search on..."),
        )?;

        report::rule(&mut self.output)?;
        Ok(Criteria { city, month, day })
    }

    /// Loads, filters and reports on one selection, then offers the raw rows.
    pub fn analyse(&mut self, criteria: &Criteria) -> Result<()> {
        let dataset = filter::apply(source::load(self.catalog, criteria.city)?, criteria);
        info!(
            city = criteria.city.key,
            month = %criteria.month,
            day = %criteria.day,
            trips = dataset.len(),
            "Analysing selection"
        );

        report::time_report(&mut self.output, &dataset.trips)?;
        report::station_report(&mut self.output, &dataset.trips)?;
        report::duration_report(&mut self.output, &dataset.trips)?;
        report::user_report(&mut self.output, &dataset)?;
        self.browse_raw(&dataset)
    }

    fn browse_raw(&mut self, dataset: &Dataset) -> Result<()> {
        writeln!(self.output, "\nDisplaying Raw Data...")?;

        let mut offset = 0;
        while self.confirm("\nWould you like to see 5 lines of raw data? Enter yes or no.")? {
            if offset >= dataset.len() {
                writeln!(self.output, "There is no more raw data to display.")?;
                break;
            }

            let end = (offset + PAGE_SIZE).min(dataset.len());
            writeln!(
                self.output,
                "{}",
                report::raw_table(dataset, &dataset.trips[offset..end])
            )?;
            offset = end;
        }

        report::rule(&mut self.output)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    fn prompt<T>(
        &mut self,
        name: &'static str,
        message: &str,
        parse: impl Fn(&str) -> Option<T>,
        invalid: impl Fn(&str) -> String,
    ) -> Result<T> {
        loop {
            write!(self.output, "{message}: ")?;
            self.output.flush()?;

            let answer = self
                .read_line()?
                .ok_or(Error::InputClosed { prompt: name })?;
            match parse(&answer) {
                Some(value) => return Ok(value),
                None => writeln!(self.output, "{}", invalid(&answer))?,
            }
        }
    }

    /// Anything other than "yes" (including end of input) counts as no.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;

        Ok(self
            .read_line()?
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("yes")))
    }
}
