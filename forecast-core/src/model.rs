use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Country block nested under a city record's `sys` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CitySys {
    #[serde(default)]
    pub country: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One city record as returned by the `find` endpoint.
///
/// Only `id`, `name` and `sys.country` are read. Everything else the API sends
/// (coordinates, current conditions, ...) is kept untouched in `extra`, so a
/// selected city can be handed on exactly as it was listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: u64,
    pub name: String,

    #[serde(default)]
    pub sys: CitySys,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl City {
    pub fn new(id: u64, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sys: CitySys {
                country: country.into(),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    pub fn country(&self) -> &str {
        &self.sys.country
    }

    /// Row text shown in the dropdown, e.g. "London, GB".
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.sys.country)
    }
}

/// Body of a `find` response. Only `list` is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct FindResponse {
    #[serde(default)]
    pub list: Option<Vec<City>>,
}
