//! End-to-end sessions through the interactive shell against small CSV fixtures.

use std::{fs, io::Cursor, path::Path};

use bikeshare::{
    config::Catalog,
    filter::{self, Criteria},
    report::NO_DATA,
    shell::Shell,
    source, stats, Error,
};
use tempfile::TempDir;

const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1,2017-06-19 08:05:00,2017-06-19 08:15:00,600,Clark St & Lake St,Wells St & Elm St,Subscriber,Male,1985.0
2,2017-06-19 08:30:00,2017-06-19 08:40:00,600,Clark St & Lake St,Wells St & Elm St,Subscriber,Female,1990.0
3,2017-06-20 17:00:00,2017-06-20 17:20:00,1200,Canal St & Adams St,Clark St & Lake St,Customer,,
4,2017-01-02 09:00:00,2017-01-02 09:05:00,300,Canal St & Adams St,Wells St & Elm St,Subscriber,Male,1985.0
5,2017-03-05 12:00:00,2017-03-05 12:30:00,1800,Streeter Dr & Grand Ave,Lake Shore Dr & Monroe St,Customer,,
6,2017-06-26 07:45:00,2017-06-26 07:55:00,600,Clark St & Lake St,Canal St & Adams St,Subscriber,Female,1972.0
7,2017-04-12 18:10:00,2017-04-12 18:20:00,601.5,Wells St & Elm St,Clark St & Lake St,Subscriber,Male,1990.0
";

const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
2,2017-03-11 10:14:32,2017-03-11 10:20:19,346.992,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
3,2017-05-30 01:02:59,2017-05-30 01:13:37,638.013,17th St & Massachusetts Ave NW,5th & K St NW,Customer
4,2017-02-14 19:20:01,2017-02-14 19:31:40,699.2,15th & K St NW,14th & Belmont St NW,
";

fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("chicago.csv"), CHICAGO).unwrap();
    fs::write(dir.path().join("washington.csv"), WASHINGTON).unwrap();
    dir
}

fn session(data_dir: &Path, input: &str) -> (Result<(), Error>, String) {
    let catalog = Catalog::default_in(data_dir);
    let mut shell = Shell::new(&catalog, Cursor::new(input.to_owned()), Vec::new());
    let result = shell.run();
    (result, String::from_utf8(shell.into_output()).unwrap())
}

#[test]
fn chicago_full_year_reports_every_block() {
    let dir = data_dir();
    let (result, output) = session(dir.path(), "Chicago\nall\nall\nno\nno\n");

    assert!(result.is_ok());
    assert!(output.contains("The most common month of travel is: June"));
    assert!(output.contains("The most common day of travel is: Monday"));
    assert!(output.contains("The most common start hour of travel is: 8"));
    assert!(output.contains("The most common start station is: Clark St & Lake St"));
    assert!(output.contains("The most common end station is: Wells St & Elm St"));
    assert!(output
        .contains("The most common combination of start and end station is: Clark St & Lake St - Wells St & Elm St"));
    // 5701.5 seconds in total, 814.5 on average.
    assert!(output.contains("The total travel time is (HH:MM:SS): 01:35:01"));
    assert!(output.contains("The mean travel time is (HH:MM:SS): 00:13:34"));
    assert!(output.contains("  Customer: 2\n  Subscriber: 5\n"));
    assert!(output.contains("  Female: 2\n  Male: 3\n"));
    assert!(output.contains("The earliest year of birth is: 1972"));
    assert!(output.contains("The most recent year of birth is: 1990"));
    assert!(output.contains("The most common year of birth is: 1985"));
    assert!(!output.contains(NO_DATA));
}

#[test]
fn washington_skips_demographics() {
    let dir = data_dir();
    let (result, output) = session(dir.path(), "washington\nall\nall\nno\nno\n");

    assert!(result.is_ok());
    assert!(output.contains("  Customer: 1\n  Subscriber: 2\n  Unknown: 1\n"));
    assert!(!output.contains("The counts of gender"));
    assert!(!output.contains("year of birth"));
}

#[test]
fn empty_selection_reports_no_data_in_every_block() {
    let dir = data_dir();
    let (result, output) = session(dir.path(), "chicago\nfebruary\nall\nyes\nno\n");

    assert!(result.is_ok());
    assert_eq!(output.matches(NO_DATA).count(), 4);
    assert!(output.contains("There is no more raw data to display."));
}

#[test]
fn raw_rows_are_paged_five_at_a_time() {
    let dir = data_dir();
    let (result, output) = session(dir.path(), "chicago\nall\nall\nyes\nyes\nyes\nno\n");

    assert!(result.is_ok());
    assert!(output.contains("2017-06-19 08:05:00"));
    assert!(output.contains("2017-04-12 18:10:00"));
    assert_eq!(output.matches("Start Time").count(), 2);
    assert!(output.contains("There is no more raw data to display."));
}

#[test]
fn restart_runs_a_second_selection() {
    let dir = data_dir();
    let (result, output) = session(
        dir.path(),
        "chicago\nall\nall\nno\nyes\nwashington\nmay\ntuesday\nno\nno\n",
    );

    assert!(result.is_ok());
    assert_eq!(output.matches("Hello! Let's explore").count(), 2);
    assert!(output.contains("The most common month of travel is: May"));
    assert!(output.contains("The most common day of travel is: Tuesday"));
}

#[test]
fn missing_dataset_is_fatal() {
    let dir = data_dir();
    let (result, _) = session(dir.path(), "new york city\nall\nall\n");

    assert!(matches!(result, Err(Error::DataUnavailable { .. })));
}

#[test]
fn filter_properties_hold_for_every_choice() {
    let dir = data_dir();
    let catalog = Catalog::default_in(dir.path());

    for key in ["chicago", "washington"] {
        let city = catalog.city(key).unwrap();
        let full = source::load(&catalog, city).unwrap();

        for month in filter::MONTH_CHOICES {
            for day in filter::DAY_CHOICES {
                let criteria = Criteria {
                    city,
                    month: month.parse().unwrap(),
                    day: day.parse().unwrap(),
                };
                let selected = filter::apply(full.clone(), &criteria);

                assert!(selected.trips.iter().all(|t| full.trips.contains(t)));
                assert!(selected.trips.iter().all(|t| criteria.matches(t)));

                match stats::duration_stats(&selected.trips) {
                    Ok(durations) => {
                        let expected: f64 = selected.trips.iter().map(|t| t.duration).sum();
                        assert_eq!(durations.total, expected);
                        assert!(durations.mean >= 0.0 && durations.mean <= durations.total);
                        assert!(
                            (durations.mean * durations.count as f64 - durations.total).abs()
                                < 1e-6
                        );

                        let users = stats::user_stats(&selected).unwrap();
                        let counted: usize = users.user_types.iter().map(|(_, n)| n).sum();
                        assert_eq!(counted, selected.len());
                    }
                    Err(Error::NoData) => assert!(selected.is_empty()),
                    Err(err) => panic!("unexpected error: {err}"),
                }
            }
        }
    }
}

#[test]
fn june_mondays_only_keep_june_mondays() {
    let dir = data_dir();
    let catalog = Catalog::default_in(dir.path());
    let city = catalog.city("chicago").unwrap();
    let criteria = Criteria {
        city,
        month: "june".parse().unwrap(),
        day: "Monday".parse().unwrap(),
    };

    let selected = filter::apply(source::load(&catalog, city).unwrap(), &criteria);

    assert_eq!(selected.len(), 3);
    assert!(selected
        .trips
        .iter()
        .all(|t| t.month() == 6 && t.weekday_name() == "Monday"));
}
