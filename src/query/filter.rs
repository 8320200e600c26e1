// Filters
// Every filter scans the table and returns the matching records in table order.
// An unmatched filter is an empty Vec, never an error.

use crate::storage::regions;
use crate::storage::table::CountryTable;
use crate::storage::{Continent, Country, Region, Subregion};
use serde::{Deserialize, Serialize};

/// Criteria for `by_multiple_filters`
///
/// Every criterion that is set must match (logical AND); unset criteria are
/// ignored, so the default filter matches the whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryFilter {
    pub region: Option<Region>,
    pub subregion: Option<Subregion>,
    pub continent: Option<Continent>,
    /// Matches if the country's language list contains this value
    pub language: Option<String>,
    /// Currency code, e.g. "EUR"
    pub currency: Option<String>,
    /// Phone code with or without the leading '+'; the builder adds it
    pub phone_code: Option<String>,
}

impl CountryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    pub fn subregion(mut self, subregion: Subregion) -> Self {
        self.subregion = Some(subregion);
        self
    }

    pub fn continent(mut self, continent: Continent) -> Self {
        self.continent = Some(continent);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency = Some(code.into());
        self
    }

    pub fn phone_code(mut self, phone_code: impl AsRef<str>) -> Self {
        self.phone_code = Some(normalize_phone_code(phone_code.as_ref()));
        self
    }

    /// Check whether the filter sets no criteria at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Test one record against every criterion that is set
    pub fn matches(&self, country: &Country) -> bool {
        self.region.map_or(true, |r| country.region == r)
            && self.subregion.map_or(true, |s| country.subregion == s)
            && self.continent.map_or(true, |c| country.continent == c)
            && self
                .language
                .as_deref()
                .map_or(true, |l| country.speaks(l))
            && self
                .currency
                .as_deref()
                .map_or(true, |code| country.currency_code() == Some(code))
            && self.phone_code.as_deref().map_or(true, |p| {
                country
                    .phone_code
                    .as_deref()
                    .is_some_and(|actual| same_phone_code(p, actual))
            })
    }
}

/// Prefix a phone code with '+' unless it already has one
pub fn normalize_phone_code(phone_code: &str) -> String {
    if phone_code.starts_with('+') {
        phone_code.to_string()
    } else {
        format!("+{phone_code}")
    }
}

/// Compare phone codes ignoring a leading '+' on either side
fn same_phone_code(a: &str, b: &str) -> bool {
    a.strip_prefix('+').unwrap_or(a) == b.strip_prefix('+').unwrap_or(b)
}

impl CountryTable {
    /// Records whose currency code equals `code`; records without a currency never match
    pub fn by_currency(&self, code: &str) -> Vec<&Country> {
        self.iter()
            .filter(|c| c.currency_code() == Some(code))
            .collect()
    }

    /// Records on any of the given continents
    pub fn by_continent(&self, continents: &[Continent]) -> Vec<&Country> {
        self.iter()
            .filter(|c| continents.contains(&c.continent))
            .collect()
    }

    /// Records in a region, optionally narrowed to one subregion
    ///
    /// A subregion that does not belong to `region` yields an empty result.
    pub fn by_region(&self, region: Region, subregion: Option<Subregion>) -> Vec<&Country> {
        if let Some(subregion) = subregion {
            if !regions::is_valid_pair(region, subregion) {
                return Vec::new();
            }
        }

        self.iter()
            .filter(|c| c.region == region && subregion.map_or(true, |s| c.subregion == s))
            .collect()
    }

    /// Records whose language list contains `language`
    pub fn by_language(&self, language: &str) -> Vec<&Country> {
        self.iter().filter(|c| c.speaks(language)).collect()
    }

    /// Records with the given phone code; a missing '+' is added before comparing
    pub fn by_phone_code(&self, phone_code: &str) -> Vec<&Country> {
        let wanted = normalize_phone_code(phone_code);
        self.iter()
            .filter(|c| c.phone_code.as_deref() == Some(wanted.as_str()))
            .collect()
    }

    /// Records matching every criterion set on `filter`
    pub fn by_multiple_filters(&self, filter: &CountryFilter) -> Vec<&Country> {
        self.iter().filter(|c| filter.matches(c)).collect()
    }
}
