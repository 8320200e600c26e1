// Validation predicates
// Membership checks against the loaded table, not format checks

use crate::storage::table::CountryTable;

impl CountryTable {
    /// True if `by_any_code` would find a record
    pub fn is_valid_country_code(&self, code: &str) -> bool {
        self.by_any_code(code).is_some()
    }

    /// True if some record carries this currency code (case-sensitive)
    pub fn is_valid_currency_code(&self, code: &str) -> bool {
        self.iter().any(|c| c.currency_code() == Some(code))
    }

    /// True if some record lists this language (exact match)
    pub fn is_valid_language(&self, language: &str) -> bool {
        self.iter().any(|c| c.speaks(language))
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::fixtures::sample_table;
    use rstest::rstest;

    #[rstest]
    #[case::alpha2("DE", true)]
    #[case::alpha3_lower("che", true)]
    #[case::numeric("010", true)]
    #[case::numeric_unpadded("10", false)]
    #[case::unknown("XX", false)]
    #[case::empty("", false)]
    fn test_is_valid_country_code(#[case] code: &str, #[case] expected: bool) {
        assert_eq!(sample_table().is_valid_country_code(code), expected);
    }

    #[rstest]
    #[case::present("EUR", true)]
    #[case::lowercase("eur", false)]
    #[case::unknown("GBP", false)]
    fn test_is_valid_currency_code(#[case] code: &str, #[case] expected: bool) {
        assert_eq!(sample_table().is_valid_currency_code(code), expected);
    }

    #[test]
    fn test_is_valid_language_is_exact() {
        let table = sample_table();
        assert!(table.is_valid_language("Romansh"));
        assert!(!table.is_valid_language("romansh"));
        assert!(!table.is_valid_language("Klingon"));
    }
}
