use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::Deserialize;

macro_rules! country_table_source {
    () => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/assets/country-state.json"
        ))
    };
}

#[derive(Deserialize)]
struct RawTable {
    countries: Vec<RawCountry>,
}

#[derive(Deserialize)]
struct RawCountry {
    country: String,
    #[serde(default)]
    states: Vec<String>,
}

/// Immutable country → provinces/states reference table.
#[derive(Debug)]
pub struct CountryTable {
    names: Vec<String>,
    // keyed by lowercase country name
    provinces: IndexMap<String, Vec<String>>,
}

impl CountryTable {
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        let raw: RawTable = serde_json::from_str(source)?;
        let mut names = Vec::with_capacity(raw.countries.len());
        let mut provinces = IndexMap::with_capacity(raw.countries.len());
        for entry in raw.countries {
            provinces.insert(entry.country.to_lowercase(), entry.states);
            names.push(entry.country);
        }
        Ok(Self { names, provinces })
    }

    pub fn countries(&self) -> &[String] {
        &self.names
    }

    /// Provinces of `country` (case-insensitive); empty for unknown countries.
    pub fn provinces_for(&self, country: &str) -> Vec<String> {
        self.provinces
            .get(&country.trim().to_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    pub fn contains(&self, country: &str) -> bool {
        self.provinces.contains_key(&country.trim().to_lowercase())
    }
}

static TABLE: LazyLock<CountryTable> = LazyLock::new(|| {
    CountryTable::from_json(country_table_source!()).expect("invalid assets/country-state.json")
});

/// The embedded reference table.
pub fn country_table() -> &'static CountryTable {
    &TABLE
}

pub fn countries() -> &'static [String] {
    TABLE.countries()
}

pub fn provinces_for(country: &str) -> Vec<String> {
    TABLE.provinces_for(country)
}
