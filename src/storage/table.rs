// Table implementation
// A table holds the country records in dataset order plus code indexes.
// It is never mutated after construction, so it can be shared freely.

use super::index::CodeIndex;
use super::{regions, Country};
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::fs;
use std::path::Path;
use tracing::debug;

/// The dataset compiled into the crate
pub const EMBEDDED_DATASET: &str = include_str!("../../data/countries.json");

/// The embedded table, parsed on first use
static COUNTRIES: Lazy<CountryTable> = Lazy::new(|| {
    CountryTable::from_json(EMBEDDED_DATASET).expect("embedded country dataset is valid")
});

/// The process-wide table built from the embedded dataset
pub fn countries() -> &'static CountryTable {
    &COUNTRIES
}

/// An immutable, ordered collection of country records
#[derive(Debug, Clone)]
pub struct CountryTable {
    /// Records in dataset order
    countries: Vec<Country>,
    alpha2: CodeIndex,
    alpha3: CodeIndex,
    numeric: CodeIndex,
}

impl CountryTable {
    /// Build a table from records
    /// Fails if any record's subregion is not registered under its region
    pub fn new(countries: Vec<Country>) -> Result<Self> {
        if let Some(bad) = countries
            .iter()
            .find(|c| !regions::is_valid_pair(c.region, c.subregion))
        {
            return Err(Error::InvalidSubregion {
                country: bad.name.clone(),
                region: bad.region,
                subregion: bad.subregion,
            });
        }

        let alpha2 = index_by(&countries, |c| c.alpha2.as_str());
        let alpha3 = index_by(&countries, |c| c.alpha3.as_str());
        let numeric = index_by(&countries, |c| c.numeric.as_str());

        debug!(records = countries.len(), "country table built");

        Ok(Self {
            countries,
            alpha2,
            alpha3,
            numeric,
        })
    }

    /// Parse a JSON array of country records
    pub fn from_json(json: &str) -> Result<Self> {
        let countries: Vec<Country> = serde_json::from_str(json)?;
        Self::new(countries)
    }

    /// Read and parse a JSON dataset file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading country dataset");
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// All records in table order
    pub fn all(&self) -> &[Country] {
        &self.countries
    }

    /// Iterate over records in table order
    pub fn iter(&self) -> std::slice::Iter<'_, Country> {
        self.countries.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Check if the table has no records
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Record at a row position
    pub fn get(&self, row_id: usize) -> Option<&Country> {
        self.countries.get(row_id)
    }

    pub(crate) fn alpha2_index(&self) -> &CodeIndex {
        &self.alpha2
    }

    pub(crate) fn alpha3_index(&self) -> &CodeIndex {
        &self.alpha3
    }

    pub(crate) fn numeric_index(&self) -> &CodeIndex {
        &self.numeric
    }
}

/// Index one code column by row position
fn index_by(countries: &[Country], code: fn(&Country) -> &str) -> CodeIndex {
    CodeIndex::build(countries.iter().enumerate().map(|(i, c)| (code(c), i)))
}

impl<'a> IntoIterator for &'a CountryTable {
    type Item = &'a Country;
    type IntoIter = std::slice::Iter<'a, Country>;

    fn into_iter(self) -> Self::IntoIter {
        self.countries.iter()
    }
}
