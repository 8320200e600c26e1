// Properties of the query functions over the embedded dataset

use countrydb::{countries, Country, CountryFilter, Region, Subregion, REGION_SUBREGIONS};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn names(countries: &[&Country]) -> Vec<String> {
    countries.iter().map(|c| c.name.clone()).collect()
}

#[test]
fn test_alpha2_round_trip() {
    let table = countries();
    for country in table {
        let found = table.by_alpha2(&country.alpha2).unwrap();
        assert_eq!(found.alpha2, country.alpha2);
        assert!(table.is_valid_country_code(&country.alpha3));
    }
}

#[rstest]
#[case::alpha2_lower("us")]
#[case::alpha2_upper("US")]
#[case::alpha3_lower("usa")]
#[case::numeric("840")]
fn test_any_code_finds_united_states(#[case] code: &str) {
    assert_eq!(countries().by_any_code(code).unwrap().name, "United States");
}

#[test]
fn test_unknown_codes_are_absent() {
    let table = countries();
    assert!(table.by_alpha2("ZZ").is_none());
    assert!(table.by_alpha3("ZZZ").is_none());
    assert!(table.by_any_code("999").is_none());
    assert!(table.potential_neighbors("ZZ").is_empty());
}

#[test]
fn test_search_repub() {
    let found = names(&countries().search("repub"));
    assert!(found.contains(&"Czech Republic".to_string()));
    assert!(found.contains(&"Dominican Republic".to_string()));
}

#[test]
fn test_by_region_respects_subregion_pairs() {
    let table = countries();

    let northern = table.by_region(Region::Europe, Some(Subregion::NorthernEurope));
    assert!(!northern.is_empty());
    assert!(northern
        .iter()
        .all(|c| c.region == Region::Europe && c.subregion == Subregion::NorthernEurope));

    assert!(table
        .by_region(Region::Europe, Some(Subregion::Antarctica))
        .is_empty());
}

#[test]
fn test_all_regions_in_declared_order() {
    assert_eq!(
        countries().all_regions(),
        vec![
            Region::Americas,
            Region::Africa,
            Region::Asia,
            Region::Europe,
            Region::Oceania,
            Region::Antarctica,
        ]
    );
    let declared: Vec<Region> = REGION_SUBREGIONS.iter().map(|(r, _)| *r).collect();
    assert_eq!(countries().all_regions(), declared);
}

#[test]
fn test_every_record_has_a_registered_subregion() {
    for country in countries() {
        assert!(
            country.region.subregions().contains(&country.subregion),
            "{} is in {} / {}",
            country.name,
            country.region,
            country.subregion
        );
    }
}

#[test]
fn test_language_groups_fan_out() {
    let table = countries();
    let total: usize = table.group_by_language().values().map(Vec::len).sum();
    assert!(total >= table.total_count());

    let swiss = table.by_alpha2("CH").unwrap();
    for language in &swiss.languages {
        assert!(table.group_by_language()[language]
            .iter()
            .any(|c| c.alpha2 == "CH"));
    }
}

#[test]
fn test_continent_counts_sum_to_total() {
    let table = countries();
    assert_eq!(
        table.count_by_continent().values().sum::<usize>(),
        table.total_count()
    );
    assert_eq!(
        table.count_by_region().values().sum::<usize>(),
        table.total_count()
    );
}

#[test]
fn test_compare_with_self() {
    let table = countries();
    for country in table.iter().filter(|c| c.currency.is_some()) {
        let cmp = table.compare_countries(&country.alpha2, &country.alpha2);
        assert!(cmp.same_currency && cmp.same_region && cmp.same_continent);
        assert_eq!(cmp.shared_languages, country.languages);
    }
}

#[test]
fn test_neighbors_share_subregion() {
    let table = countries();
    for country in table {
        for neighbor in table.potential_neighbors(&country.alpha2) {
            assert_ne!(neighbor.alpha2, country.alpha2);
            assert_eq!(neighbor.subregion, country.subregion);
        }
    }
}

#[test]
fn test_phone_code_prefix_is_optional() {
    let table = countries();
    assert_eq!(
        names(&table.by_phone_code("44")),
        names(&table.by_phone_code("+44"))
    );
    assert!(!table.by_phone_code("44").is_empty());
}

#[test]
fn test_repeated_calls_are_identical() {
    let table = countries();
    let filter = CountryFilter::new()
        .continent(countrydb::Continent::Africa)
        .language("French");

    assert_eq!(
        table.by_multiple_filters(&filter),
        table.by_multiple_filters(&filter)
    );
    assert_eq!(table.group_by_currency(), table.group_by_currency());
    assert_eq!(table.count_by_region(), table.count_by_region());
    assert_eq!(table.all_currencies(), table.all_currencies());
}

/// Randomly upper- or lowercase each ASCII letter of `code`
fn scramble_case(code: &str, mask: u8) -> String {
    code.chars()
        .enumerate()
        .map(|(i, ch)| {
            if mask & (1 << (i % 8)) != 0 {
                ch.to_ascii_uppercase()
            } else {
                ch.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_codes_longer_than_three_are_unknown(code in "[A-Za-z0-9]{4,8}") {
        prop_assert!(countries().by_any_code(&code).is_none());
        prop_assert!(!countries().is_valid_country_code(&code));
    }

    #[test]
    fn prop_any_code_ignores_case(index in 0..countries().len(), mask in any::<u8>()) {
        let table = countries();
        let country = &table.all()[index];

        let alpha2 = scramble_case(&country.alpha2, mask);
        let alpha3 = scramble_case(&country.alpha3, mask);
        prop_assert_eq!(&table.by_any_code(&alpha2).unwrap().alpha2, &country.alpha2);
        prop_assert_eq!(&table.by_any_code(&alpha3).unwrap().alpha2, &country.alpha2);
    }

    #[test]
    fn prop_multiple_filters_intersect_single_filters(
        region_index in 0..Region::ALL.len(),
        language_index in 0..countries().all_languages().len(),
    ) {
        let table = countries();
        let region = Region::ALL[region_index];
        let language = table.all_languages()[language_index].clone();

        let combined = table.by_multiple_filters(
            &CountryFilter::new().region(region).language(language.clone()),
        );
        let by_language = table.by_language(&language);
        let expected: Vec<&Country> = table
            .by_region(region, None)
            .into_iter()
            .filter(|c| by_language.contains(c))
            .collect();

        prop_assert_eq!(combined, expected);
    }

    #[test]
    fn prop_search_results_contain_the_query(query in "[a-z]{1,4}") {
        for country in countries().search(&query) {
            let haystack = [
                Some(country.name.as_str()),
                country.official_name.as_deref(),
                country.native_name.as_deref(),
            ];
            prop_assert!(haystack
                .iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(&query)));
        }
    }
}
