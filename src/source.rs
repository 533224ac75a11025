use std::{fs::File, io::Read};

use csv::Position;
use tracing::{debug, info};

use crate::{
    config::{Catalog, City},
    data::{Dataset, Schema, Trip},
    error::{Error, Result},
    raw,
};

/// Loads every trip recorded for `city`.
pub fn load(catalog: &Catalog, city: &City) -> Result<Dataset> {
    let path = catalog.path_for(city);
    info!(city = city.key, path = %path.display(), "Loading trip data");

    let file = File::open(&path).map_err(|source| Error::DataUnavailable {
        city: city.key.to_owned(),
        path: path.clone(),
        source,
    })?;
    let dataset = load_from_reader(file)?;

    info!(city = city.key, trips = dataset.len(), "Loaded trip data");
    Ok(dataset)
}

pub fn load_from_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers()?.clone();
    let schema = Schema {
        has_gender: headers.iter().any(|h| h == raw::GENDER_COLUMN),
        has_birth_year: headers.iter().any(|h| h == raw::BIRTH_YEAR_COLUMN),
    };
    debug!(?schema, "Read header row");

    let trips = reader
        .records()
        .map(|read_result| {
            let record = read_result.map_err(|err| Error::Malformed {
                line: err.position().map_or(0, Position::line),
                reason: err.to_string(),
            })?;
            let line = record.position().map_or(0, Position::line);

            let raw_trip: raw::Trip = record
                .deserialize(Some(&headers))
                .map_err(|err| Error::Malformed {
                    line,
                    reason: err.to_string(),
                })?;
            Trip::try_from(raw_trip).map_err(|err| Error::Malformed {
                line,
                reason: format!("invalid start time: {err}"),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Dataset { schema, trips })
}
