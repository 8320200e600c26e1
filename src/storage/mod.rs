// Storage module - the country record model and the immutable table
// A table is built once from a dataset and only ever read afterwards

pub mod index;
pub mod regions;
pub mod table;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single country record
/// Optional attributes are `None` when the dataset leaves them out
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_name: Option<String>,
    pub alpha2: String,
    pub alpha3: String,
    pub numeric: String,
    pub region: Region,
    pub subregion: Subregion,
    pub continent: Continent,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_code: Option<String>,
}

impl Country {
    /// Read a single attribute as a dynamically typed value
    /// This is what projections are built from
    pub fn field(&self, field: Field) -> FieldValue {
        match field {
            Field::Name => FieldValue::Text(self.name.clone()),
            Field::OfficialName => FieldValue::from(self.official_name.clone()),
            Field::NativeName => FieldValue::from(self.native_name.clone()),
            Field::Alpha2 => FieldValue::Text(self.alpha2.clone()),
            Field::Alpha3 => FieldValue::Text(self.alpha3.clone()),
            Field::Numeric => FieldValue::Text(self.numeric.clone()),
            Field::Region => FieldValue::Text(self.region.to_string()),
            Field::Subregion => FieldValue::Text(self.subregion.to_string()),
            Field::Continent => FieldValue::Text(self.continent.to_string()),
            Field::Currency => match &self.currency {
                Some(currency) => FieldValue::Currency(currency.clone()),
                None => FieldValue::Null,
            },
            Field::Languages => FieldValue::List(self.languages.clone()),
            Field::Capital => FieldValue::from(self.capital.clone()),
            Field::PhoneCode => FieldValue::from(self.phone_code.clone()),
        }
    }

    /// The currency code, if the country has a currency
    pub fn currency_code(&self) -> Option<&str> {
        self.currency.as_ref().map(|c| c.code.as_str())
    }

    /// Whether the country lists the given language
    pub fn speaks(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }
}

/// A currency as carried on a country record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub symbol: String,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.symbol)
    }
}

/// Top-level geographic region
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Americas,
    Africa,
    Asia,
    Europe,
    Oceania,
    Antarctica,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Americas,
        Region::Africa,
        Region::Asia,
        Region::Europe,
        Region::Oceania,
        Region::Antarctica,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Americas => "Americas",
            Region::Africa => "Africa",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
            Region::Antarctica => "Antarctica",
        }
    }

    /// Subregions registered for this region
    pub fn subregions(&self) -> &'static [Subregion] {
        regions::subregions_of(*self)
    }
}

/// Second-level region; only valid under its parent region
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subregion {
    Caribbean,
    #[serde(rename = "Central America")]
    CentralAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    #[serde(rename = "Northern America")]
    NorthernAmerica,
    #[serde(rename = "Northern Africa")]
    NorthernAfrica,
    #[serde(rename = "Western Africa")]
    WesternAfrica,
    #[serde(rename = "Middle Africa")]
    MiddleAfrica,
    #[serde(rename = "Eastern Africa")]
    EasternAfrica,
    #[serde(rename = "Southern Africa")]
    SouthernAfrica,
    #[serde(rename = "Central Asia")]
    CentralAsia,
    #[serde(rename = "Eastern Asia")]
    EasternAsia,
    #[serde(rename = "South-Eastern Asia")]
    SouthEasternAsia,
    #[serde(rename = "Southern Asia")]
    SouthernAsia,
    #[serde(rename = "Western Asia")]
    WesternAsia,
    #[serde(rename = "Northern Europe")]
    NorthernEurope,
    #[serde(rename = "Western Europe")]
    WesternEurope,
    #[serde(rename = "Eastern Europe")]
    EasternEurope,
    #[serde(rename = "Southern Europe")]
    SouthernEurope,
    #[serde(rename = "Australia and New Zealand")]
    AustraliaAndNewZealand,
    Melanesia,
    Micronesia,
    Polynesia,
    Antarctica,
}

impl Subregion {
    pub const ALL: [Subregion; 23] = [
        Subregion::Caribbean,
        Subregion::CentralAmerica,
        Subregion::SouthAmerica,
        Subregion::NorthernAmerica,
        Subregion::NorthernAfrica,
        Subregion::WesternAfrica,
        Subregion::MiddleAfrica,
        Subregion::EasternAfrica,
        Subregion::SouthernAfrica,
        Subregion::CentralAsia,
        Subregion::EasternAsia,
        Subregion::SouthEasternAsia,
        Subregion::SouthernAsia,
        Subregion::WesternAsia,
        Subregion::NorthernEurope,
        Subregion::WesternEurope,
        Subregion::EasternEurope,
        Subregion::SouthernEurope,
        Subregion::AustraliaAndNewZealand,
        Subregion::Melanesia,
        Subregion::Micronesia,
        Subregion::Polynesia,
        Subregion::Antarctica,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subregion::Caribbean => "Caribbean",
            Subregion::CentralAmerica => "Central America",
            Subregion::SouthAmerica => "South America",
            Subregion::NorthernAmerica => "Northern America",
            Subregion::NorthernAfrica => "Northern Africa",
            Subregion::WesternAfrica => "Western Africa",
            Subregion::MiddleAfrica => "Middle Africa",
            Subregion::EasternAfrica => "Eastern Africa",
            Subregion::SouthernAfrica => "Southern Africa",
            Subregion::CentralAsia => "Central Asia",
            Subregion::EasternAsia => "Eastern Asia",
            Subregion::SouthEasternAsia => "South-Eastern Asia",
            Subregion::SouthernAsia => "Southern Asia",
            Subregion::WesternAsia => "Western Asia",
            Subregion::NorthernEurope => "Northern Europe",
            Subregion::WesternEurope => "Western Europe",
            Subregion::EasternEurope => "Eastern Europe",
            Subregion::SouthernEurope => "Southern Europe",
            Subregion::AustraliaAndNewZealand => "Australia and New Zealand",
            Subregion::Melanesia => "Melanesia",
            Subregion::Micronesia => "Micronesia",
            Subregion::Polynesia => "Polynesia",
            Subregion::Antarctica => "Antarctica",
        }
    }
}

/// Continent, a coarser taxonomy than region
/// e.g. region "Americas" splits into "North America" and "South America"
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Continent {
    Africa,
    Antarctica,
    Asia,
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    Oceania,
    #[serde(rename = "South America")]
    SouthAmerica,
}

impl Continent {
    pub const ALL: [Continent; 7] = [
        Continent::Africa,
        Continent::Antarctica,
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::Oceania,
        Continent::SouthAmerica,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Antarctica => "Antarctica",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::Oceania => "Oceania",
            Continent::SouthAmerica => "South America",
        }
    }
}

/// The attributes of a country record that can be projected
/// Using an enum means a misspelled field is a compile error, not a silent null
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    OfficialName,
    NativeName,
    Alpha2,
    Alpha3,
    Numeric,
    Region,
    Subregion,
    Continent,
    Currency,
    Languages,
    Capital,
    PhoneCode,
}

impl Field {
    /// Every field in record order
    pub const ALL: [Field; 13] = [
        Field::Name,
        Field::OfficialName,
        Field::NativeName,
        Field::Alpha2,
        Field::Alpha3,
        Field::Numeric,
        Field::Region,
        Field::Subregion,
        Field::Continent,
        Field::Currency,
        Field::Languages,
        Field::Capital,
        Field::PhoneCode,
    ];

    /// The record key, as it appears in the dataset and in JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::OfficialName => "officialName",
            Field::NativeName => "nativeName",
            Field::Alpha2 => "alpha2",
            Field::Alpha3 => "alpha3",
            Field::Numeric => "numeric",
            Field::Region => "region",
            Field::Subregion => "subregion",
            Field::Continent => "continent",
            Field::Currency => "currency",
            Field::Languages => "languages",
            Field::Capital => "capital",
            Field::PhoneCode => "phoneCode",
        }
    }
}

/// A dynamically typed attribute value, produced by `Country::field`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    List(Vec<String>),
    Currency(Currency),
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map(FieldValue::Text).unwrap_or(FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "NULL"),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::List(items) => write!(f, "{}", items.join(", ")),
            FieldValue::Currency(currency) => write!(f, "{currency}"),
        }
    }
}

/// Lowercase and drop everything but letters and digits
/// so "South-Eastern Asia", "south eastern asia" and "SouthEasternAsia" compare equal
pub(crate) fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve a user-supplied name against a closed set of variants
pub(crate) fn parse_named<T: Copy>(
    all: &[T],
    as_str: fn(&T) -> &'static str,
    kind: &'static str,
    value: &str,
) -> Result<T> {
    let wanted = fold_name(value);
    all.iter()
        .find(|variant| fold_name(as_str(*variant)) == wanted)
        .copied()
        .ok_or_else(|| Error::UnknownValue {
            kind,
            value: value.to_string(),
        })
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_named(&Region::ALL, Region::as_str, "region", s)
    }
}

impl FromStr for Subregion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_named(&Subregion::ALL, Subregion::as_str, "subregion", s)
    }
}

impl FromStr for Continent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_named(&Continent::ALL, Continent::as_str, "continent", s)
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_named(&Field::ALL, Field::as_str, "field", s)
            .map_err(|_| Error::UnknownField(s.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Subregion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::exact("Europe", Region::Europe)]
    #[case::lowercase("americas", Region::Americas)]
    #[case::uppercase("ANTARCTICA", Region::Antarctica)]
    fn test_region_from_str(#[case] input: &str, #[case] expected: Region) {
        assert_eq!(input.parse::<Region>().unwrap(), expected);
    }

    #[rstest]
    #[case::display_form("South-Eastern Asia")]
    #[case::spaced("south eastern asia")]
    #[case::variant_form("SouthEasternAsia")]
    fn test_subregion_from_str_ignores_punctuation(#[case] input: &str) {
        assert_eq!(input.parse::<Subregion>().unwrap(), Subregion::SouthEasternAsia);
    }

    #[test]
    fn test_unknown_region_is_error() {
        let err = "Atlantis".parse::<Region>().unwrap_err();
        assert!(err.to_string().contains("Unknown region"));
    }

    #[rstest]
    #[case::camel("phoneCode", Field::PhoneCode)]
    #[case::snake("phone_code", Field::PhoneCode)]
    #[case::upper("ALPHA2", Field::Alpha2)]
    #[case::official("official_name", Field::OfficialName)]
    fn test_field_from_str(#[case] input: &str, #[case] expected: Field) {
        assert_eq!(input.parse::<Field>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_field_is_error() {
        assert!(matches!(
            "population".parse::<Field>(),
            Err(Error::UnknownField(name)) if name == "population"
        ));
    }

    #[test]
    fn test_enum_serde_names_match_as_str() {
        for subregion in Subregion::ALL {
            let json = serde_json::to_string(&subregion).unwrap();
            assert_eq!(json, format!("\"{}\"", subregion.as_str()));
        }
        for continent in Continent::ALL {
            let json = serde_json::to_string(&continent).unwrap();
            assert_eq!(json, format!("\"{}\"", continent.as_str()));
        }
        for field in Field::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn test_field_values_for_absent_attributes() {
        let table = fixtures::sample_table();
        let antarctica = table.by_alpha2("AQ").unwrap();

        assert_eq!(antarctica.field(Field::Capital), FieldValue::Null);
        assert_eq!(antarctica.field(Field::Currency), FieldValue::Null);
        assert_eq!(antarctica.field(Field::Languages), FieldValue::List(vec![]));
        assert_eq!(antarctica.currency_code(), None);
    }

    #[test]
    fn test_field_value_display() {
        let table = fixtures::sample_table();
        let swiss = table.by_alpha2("CH").unwrap();

        assert_eq!(swiss.field(Field::Currency).to_string(), "CHF (Fr)");
        assert_eq!(
            swiss.field(Field::Languages).to_string(),
            "German, French, Italian, Romansh"
        );
        assert_eq!(swiss.field(Field::Subregion).to_string(), "Western Europe");
        assert_eq!(FieldValue::Null.to_string(), "NULL");
    }
}
