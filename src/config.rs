use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub key: &'static str,
    pub label: &'static str,
    pub file_name: &'static str,
}

const CITIES: [City; 3] = [
    City {
        key: "chicago",
        label: "Chicago",
        file_name: "chicago.csv",
    },
    City {
        key: "new york city",
        label: "New York City",
        file_name: "new_york_city.csv",
    },
    City {
        key: "washington",
        label: "Washington",
        file_name: "washington.csv",
    },
];

/// The fixed set of cities and where their trip files live.
#[derive(Debug, Clone)]
pub struct Catalog {
    data_dir: PathBuf,
    cities: Vec<City>,
}

impl Catalog {
    pub fn default_in(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cities: CITIES.to_vec(),
        }
    }

    pub fn city(&self, input: &str) -> Option<&City> {
        let key = input.trim();
        self.cities
            .iter()
            .find(|city| city.key.eq_ignore_ascii_case(key))
    }

    pub fn path_for(&self, city: &City) -> PathBuf {
        self.data_dir.join(city.file_name)
    }

    pub fn city_labels(&self) -> String {
        match self.cities.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!(
                "{} or {}",
                rest.iter().map(|city| city.label).collect::<Vec<_>>().join(", "),
                last.label
            ),
            Some((last, _)) => last.label.to_owned(),
            None => String::new(),
        }
    }
}
