// Derived utilities
// Neighbor lookup and pairwise comparison, both keyed by alpha2

use crate::storage::table::CountryTable;
use crate::storage::Country;
use serde::Serialize;

/// Side-by-side comparison of two records
///
/// Either side may be absent when its code did not resolve. Every flag is
/// false unless both sides are present, and `same_currency` additionally
/// requires both records to carry a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryComparison<'a> {
    pub first: Option<&'a Country>,
    pub second: Option<&'a Country>,
    pub same_currency: bool,
    pub same_region: bool,
    pub same_continent: bool,
    /// Languages spoken in both, in the first record's order
    pub shared_languages: Vec<String>,
}

impl<'a> CountryComparison<'a> {
    fn new(first: Option<&'a Country>, second: Option<&'a Country>) -> Self {
        let (Some(a), Some(b)) = (first, second) else {
            return Self {
                first,
                second,
                same_currency: false,
                same_region: false,
                same_continent: false,
                shared_languages: Vec::new(),
            };
        };

        let same_currency = matches!(
            (a.currency_code(), b.currency_code()),
            (Some(x), Some(y)) if x == y
        );

        Self {
            first,
            second,
            same_currency,
            same_region: a.region == b.region,
            same_continent: a.continent == b.continent,
            shared_languages: a
                .languages
                .iter()
                .filter(|l| b.speaks(l))
                .cloned()
                .collect(),
        }
    }
}

impl CountryTable {
    /// Other records in the same subregion as the alpha2 code
    /// An unknown code gives an empty result.
    pub fn potential_neighbors(&self, code: &str) -> Vec<&Country> {
        let Some(country) = self.by_alpha2(code) else {
            return Vec::new();
        };

        self.iter()
            .filter(|c| c.subregion == country.subregion && c.alpha2 != country.alpha2)
            .collect()
    }

    /// Compare two records resolved by alpha2
    pub fn compare_countries(&self, code1: &str, code2: &str) -> CountryComparison<'_> {
        CountryComparison::new(self.by_alpha2(code1), self.by_alpha2(code2))
    }
}
