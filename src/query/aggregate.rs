// Aggregation and metadata
// Distinct-value listings, groupings and counts over the whole table.
// Every result is ordered by first occurrence in the table, except the
// region listings which follow the declared region map.

use crate::storage::regions;
use crate::storage::table::CountryTable;
use crate::storage::{Continent, Country, Currency, Region, Subregion};
use indexmap::{IndexMap, IndexSet};
use std::hash::Hash;

impl CountryTable {
    /// Region keys of the region map, in declared order
    /// Independent of the table contents.
    pub fn all_regions(&self) -> Vec<Region> {
        regions::regions()
    }

    /// Subregions registered for `region`, in declared order
    pub fn subregions_of(&self, region: Region) -> Vec<Subregion> {
        regions::subregions_of(region).to_vec()
    }

    /// Distinct continents seen in the table
    pub fn all_continents(&self) -> Vec<Continent> {
        distinct(self.iter().map(|c| c.continent))
    }

    /// Distinct currencies, deduplicated by code
    /// On a code collision the first record's representation is kept.
    pub fn all_currencies(&self) -> Vec<Currency> {
        let mut by_code: IndexMap<&str, &Currency> = IndexMap::new();
        for currency in self.iter().filter_map(|c| c.currency.as_ref()) {
            by_code.entry(currency.code.as_str()).or_insert(currency);
        }
        by_code.into_values().cloned().collect()
    }

    /// Distinct languages, flattening each record's list in order
    pub fn all_languages(&self) -> Vec<String> {
        distinct(self.iter().flat_map(|c| c.languages.iter().cloned()))
    }

    /// The name of every record, duplicates included
    pub fn all_country_names(&self) -> Vec<String> {
        self.iter().map(|c| c.name.clone()).collect()
    }

    /// The alpha2 code of every record, duplicates included
    pub fn all_alpha2_codes(&self) -> Vec<String> {
        self.iter().map(|c| c.alpha2.clone()).collect()
    }

    /// The alpha3 code of every record, duplicates included
    pub fn all_alpha3_codes(&self) -> Vec<String> {
        self.iter().map(|c| c.alpha3.clone()).collect()
    }

    /// Distinct, non-empty phone codes
    pub fn all_phone_codes(&self) -> Vec<String> {
        distinct(
            self.iter()
                .filter_map(|c| c.phone_code.as_deref())
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        )
    }

    pub fn group_by_continent(&self) -> IndexMap<Continent, Vec<&Country>> {
        group(self.iter().map(|c| (c.continent, c)))
    }

    pub fn group_by_region(&self) -> IndexMap<Region, Vec<&Country>> {
        group(self.iter().map(|c| (c.region, c)))
    }

    /// Group by currency code; records without a currency are left out
    pub fn group_by_currency(&self) -> IndexMap<String, Vec<&Country>> {
        group(
            self.iter()
                .filter_map(|c| c.currency_code().map(|code| (code.to_string(), c))),
        )
    }

    /// Group by language; a record appears under every language it lists
    pub fn group_by_language(&self) -> IndexMap<String, Vec<&Country>> {
        group(
            self.iter()
                .flat_map(|c| c.languages.iter().map(move |l| (l.clone(), c))),
        )
    }

    pub fn count_by_continent(&self) -> IndexMap<Continent, usize> {
        count(self.iter().map(|c| c.continent))
    }

    pub fn count_by_region(&self) -> IndexMap<Region, usize> {
        count(self.iter().map(|c| c.region))
    }

    /// Number of records in the table
    pub fn total_count(&self) -> usize {
        self.len()
    }
}

fn distinct<T: Hash + Eq>(items: impl Iterator<Item = T>) -> Vec<T> {
    items.collect::<IndexSet<T>>().into_iter().collect()
}

fn group<'a, K: Hash + Eq>(
    pairs: impl Iterator<Item = (K, &'a Country)>,
) -> IndexMap<K, Vec<&'a Country>> {
    let mut groups: IndexMap<K, Vec<&Country>> = IndexMap::new();
    for (key, country) in pairs {
        groups.entry(key).or_default().push(country);
    }
    groups
}

fn count<K: Hash + Eq>(keys: impl Iterator<Item = K>) -> IndexMap<K, usize> {
    let mut counts = IndexMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}
