// Point lookups
// Each lookup returns the first matching record in table order, or None

use crate::storage::table::CountryTable;
use crate::storage::Country;

impl CountryTable {
    /// Exact match on the common name
    pub fn by_name(&self, name: &str) -> Option<&Country> {
        self.iter().find(|c| c.name == name)
    }

    /// Exact match on the two-letter code
    pub fn by_alpha2(&self, code: &str) -> Option<&Country> {
        self.alpha2_index().first(code).and_then(|row| self.get(row))
    }

    /// Exact match on the three-letter code
    pub fn by_alpha3(&self, code: &str) -> Option<&Country> {
        self.alpha3_index().first(code).and_then(|row| self.get(row))
    }

    /// Case-insensitive match against alpha2, alpha3 or the numeric code
    ///
    /// When several rows match (through different code columns) the one
    /// earliest in the table wins.
    pub fn by_any_code(&self, code: &str) -> Option<&Country> {
        let upper = code.to_uppercase();
        [
            self.alpha2_index().first(&upper),
            self.alpha3_index().first(&upper),
            self.numeric_index().first(code),
        ]
        .into_iter()
        .flatten()
        .min()
        .and_then(|row| self.get(row))
    }

    /// Case-insensitive match on the capital; countries without one never match
    pub fn by_capital(&self, capital: &str) -> Option<&Country> {
        let wanted = capital.to_lowercase();
        self.iter().find(|c| {
            c.capital
                .as_deref()
                .is_some_and(|cap| cap.to_lowercase() == wanted)
        })
    }

    /// Case-insensitive substring search over name, official name and native name
    /// An empty query matches every record.
    pub fn search(&self, query: &str) -> Vec<&Country> {
        let needle = query.to_lowercase();
        self.iter()
            .filter(|c| {
                std::iter::once(Some(c.name.as_str()))
                    .chain([c.official_name.as_deref(), c.native_name.as_deref()])
                    .flatten()
                    .any(|text| text.to_lowercase().contains(&needle))
            })
            .collect()
    }
}
