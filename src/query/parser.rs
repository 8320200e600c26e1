// Query Parser
// Converts shell input into structured queries.
// SQL SELECT statements go through the sqlparser crate; dot commands are
// split on whitespace.

use super::filter::CountryFilter;
use crate::error::{Error, Result};
use crate::storage::{fold_name, parse_named, Field, Region};
use indexmap::IndexSet;
use sqlparser::ast::{
    BinaryOperator, Expr, Select, SelectItem, SetExpr, Statement, TableFactor,
    Value as SqlValue,
};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;
use std::fmt;
use std::str::FromStr;

/// The only table name SELECT accepts
pub const TABLE_NAME: &str = "countries";

/// Represents the different types of queries we support
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// SELECT <fields|*> FROM countries [WHERE k = 'v' AND ...]
    Select {
        filter: CountryFilter,
        fields: Vec<Field>,
    },
    /// .lookup <code> (alpha2, alpha3 or numeric)
    Lookup(String),
    /// .name <exact name>
    Name(String),
    /// .capital <capital>
    Capital(String),
    /// .search <text>
    Search(String),
    /// .neighbors <alpha2>
    Neighbors(String),
    /// .compare <alpha2> <alpha2>
    Compare(String, String),
    Regions,
    Subregions(Region),
    Continents,
    Currencies,
    Languages,
    PhoneCodes,
    /// .count [continent|region|currency|language]
    Count(Option<Grouping>),
    /// .group <continent|region|currency|language>
    Group(Grouping),
    /// .validate <country|currency|language> <value>
    Validate(Validation, String),
}

/// Attribute a grouping or count is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grouping {
    Continent,
    Region,
    Currency,
    Language,
}

impl Grouping {
    pub const ALL: [Grouping; 4] = [
        Grouping::Continent,
        Grouping::Region,
        Grouping::Currency,
        Grouping::Language,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grouping::Continent => "continent",
            Grouping::Region => "region",
            Grouping::Currency => "currency",
            Grouping::Language => "language",
        }
    }
}

/// What a `.validate` command checks a value against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validation {
    CountryCode,
    CurrencyCode,
    Language,
}

impl Validation {
    pub const ALL: [Validation; 3] = [
        Validation::CountryCode,
        Validation::CurrencyCode,
        Validation::Language,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Validation::CountryCode => "country",
            Validation::CurrencyCode => "currency",
            Validation::Language => "language",
        }
    }
}

impl FromStr for Grouping {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_named(&Grouping::ALL, Grouping::as_str, "grouping", s)
    }
}

impl FromStr for Validation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_named(&Validation::ALL, Validation::as_str, "validation", s)
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The query parser
pub struct QueryParser;

impl QueryParser {
    /// Parse one line of input into a Query
    /// Lines starting with '.' are commands, everything else is SQL
    pub fn parse(input: &str) -> Result<Query> {
        let input = input.trim();
        if input.starts_with('.') {
            Self::parse_command(input)
        } else {
            Self::parse_sql(input)
        }
    }

    fn parse_sql(sql: &str) -> Result<Query> {
        let dialect = GenericDialect {};
        let ast = Parser::parse_sql(&dialect, sql)?;

        // We only support single statements
        if ast.len() != 1 {
            return Err(Error::Unsupported(
                "Only single statements are supported".to_string(),
            ));
        }

        match &ast[0] {
            Statement::Query(query) => Self::parse_select(query),
            _ => Err(Error::Unsupported(
                "Only SELECT statements are supported".to_string(),
            )),
        }
    }

    /// Parse SELECT statement
    fn parse_select(query: &sqlparser::ast::Query) -> Result<Query> {
        let select = match query.body.as_ref() {
            SetExpr::Select(select) => select,
            _ => return Err(Error::Unsupported("Unsupported SELECT format".to_string())),
        };

        let table_name = Self::extract_table_name(select)?;
        if !table_name.eq_ignore_ascii_case(TABLE_NAME) {
            return Err(Error::Unsupported(format!(
                "Table '{table_name}' not found, the only table is '{TABLE_NAME}'"
            )));
        }

        let fields = Self::parse_projection(&select.projection)?;

        let mut filter = CountryFilter::new();
        if let Some(selection) = &select.selection {
            Self::parse_where_clause(selection, &mut filter)?;
        }

        Ok(Query::Select { filter, fields })
    }

    /// Helper: Resolve the select list to record fields
    /// A field selected twice keeps its first position
    fn parse_projection(items: &[SelectItem]) -> Result<Vec<Field>> {
        let mut fields = IndexSet::new();
        for item in items {
            match item {
                SelectItem::Wildcard(_) => fields.extend(Field::ALL),
                SelectItem::UnnamedExpr(Expr::Identifier(ident)) => {
                    fields.insert(ident.value.parse()?);
                }
                other => {
                    return Err(Error::Unsupported(format!(
                        "Unsupported select item: {other}"
                    )))
                }
            }
        }
        Ok(fields.into_iter().collect())
    }

    /// Helper: Extract table name from SELECT
    fn extract_table_name(select: &Select) -> Result<String> {
        let [from] = select.from.as_slice() else {
            return Err(Error::Unsupported(
                "SELECT needs exactly one table".to_string(),
            ));
        };
        if !from.joins.is_empty() {
            return Err(Error::Unsupported("Joins are not supported".to_string()));
        }

        match &from.relation {
            TableFactor::Table { name, .. } => Ok(name
                .0
                .iter()
                .map(|i| i.value.clone())
                .collect::<Vec<_>>()
                .join(".")),
            _ => Err(Error::Unsupported("Unsupported table reference".to_string())),
        }
    }

    /// Helper: Parse WHERE clause
    /// Accepts equality conditions on filter criteria, combined with AND
    fn parse_where_clause(expr: &Expr, filter: &mut CountryFilter) -> Result<()> {
        match expr {
            Expr::Nested(inner) => Self::parse_where_clause(inner, filter),
            Expr::BinaryOp {
                left,
                op: BinaryOperator::And,
                right,
            } => {
                Self::parse_where_clause(left, filter)?;
                Self::parse_where_clause(right, filter)
            }
            Expr::BinaryOp {
                left,
                op: BinaryOperator::Eq,
                right,
            } => {
                let column = match left.as_ref() {
                    Expr::Identifier(ident) => ident.value.as_str(),
                    _ => {
                        return Err(Error::Unsupported(
                            "Expected column name in WHERE clause".to_string(),
                        ))
                    }
                };
                let value = Self::parse_value(right)?;
                Self::apply_criterion(filter, column, value)
            }
            _ => Err(Error::Unsupported(
                "WHERE only supports column = value conditions joined by AND".to_string(),
            )),
        }
    }

    /// Helper: Parse a literal on the right of '='
    fn parse_value(expr: &Expr) -> Result<String> {
        match expr {
            Expr::Value(SqlValue::SingleQuotedString(s)) => Ok(s.clone()),
            // Bare numbers are accepted for phone codes: phone_code = 44
            Expr::Value(SqlValue::Number(n, _)) => Ok(n.clone()),
            _ => Err(Error::Unsupported(format!(
                "Unsupported value expression: {expr}"
            ))),
        }
    }

    fn apply_criterion(filter: &mut CountryFilter, column: &str, value: String) -> Result<()> {
        match fold_name(column).as_str() {
            "region" => set_once(&mut filter.region, value.parse()?, column),
            "subregion" => set_once(&mut filter.subregion, value.parse()?, column),
            "continent" => set_once(&mut filter.continent, value.parse()?, column),
            "language" => set_once(&mut filter.language, value, column),
            "currency" => set_once(&mut filter.currency, value, column),
            "phonecode" => set_once(&mut filter.phone_code, value, column),
            _ => Err(Error::Unsupported(format!(
                "Cannot filter on '{column}', use region, subregion, continent, language, currency or phone_code"
            ))),
        }
    }

    /// Parse a dot command and its arguments
    fn parse_command(input: &str) -> Result<Query> {
        let (command, rest) = input
            .split_once(char::is_whitespace)
            .unwrap_or((input, ""));
        let rest = rest.trim();

        let required = |usage: &'static str| -> Result<String> {
            if rest.is_empty() {
                Err(Error::Usage(usage))
            } else {
                Ok(rest.to_string())
            }
        };

        match command.to_lowercase().as_str() {
            ".lookup" => Ok(Query::Lookup(required(".lookup <code>")?)),
            ".name" => Ok(Query::Name(required(".name <name>")?)),
            ".capital" => Ok(Query::Capital(required(".capital <capital>")?)),
            ".search" => Ok(Query::Search(required(".search <text>")?)),
            ".neighbors" => Ok(Query::Neighbors(required(".neighbors <alpha2>")?)),
            ".compare" => {
                let mut codes = rest.split_whitespace();
                match (codes.next(), codes.next(), codes.next()) {
                    (Some(a), Some(b), None) => Ok(Query::Compare(a.to_string(), b.to_string())),
                    _ => Err(Error::Usage(".compare <alpha2> <alpha2>")),
                }
            }
            ".regions" => Ok(Query::Regions),
            ".subregions" => Ok(Query::Subregions(
                required(".subregions <region>")?.parse()?,
            )),
            ".continents" => Ok(Query::Continents),
            ".currencies" => Ok(Query::Currencies),
            ".languages" => Ok(Query::Languages),
            ".phonecodes" => Ok(Query::PhoneCodes),
            ".count" => match rest {
                "" => Ok(Query::Count(None)),
                key => Ok(Query::Count(Some(key.parse()?))),
            },
            ".group" => Ok(Query::Group(
                required(".group <continent|region|currency|language>")?.parse()?,
            )),
            ".validate" => {
                const USAGE: &str = ".validate <country|currency|language> <value>";
                let (kind, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(Error::Usage(USAGE))?;
                Ok(Query::Validate(kind.parse()?, value.trim().to_string()))
            }
            _ => Err(Error::Unsupported(format!(
                "Unknown command: {command}, type '.help' for help"
            ))),
        }
    }
}

/// Fill a filter criterion, rejecting a second condition on the same key
fn set_once<T>(slot: &mut Option<T>, value: T, column: &str) -> Result<()> {
    if slot.is_some() {
        return Err(Error::Unsupported(format!(
            "'{column}' appears more than once in WHERE clause"
        )));
    }
    *slot = Some(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Continent, Subregion};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_parse_select_star() {
        let query = QueryParser::parse("SELECT * FROM countries").unwrap();
        assert_eq!(
            query,
            Query::Select {
                filter: CountryFilter::new(),
                fields: Field::ALL.to_vec(),
            }
        );
    }

    #[test]
    fn test_parse_select_fields_with_where() {
        let query = QueryParser::parse(
            "select name, capital, phone_code from countries \
             where region = 'Europe' and (language = 'German' and subregion = 'western europe')",
        )
        .unwrap();

        assert_eq!(
            query,
            Query::Select {
                filter: CountryFilter::new()
                    .region(Region::Europe)
                    .subregion(Subregion::WesternEurope)
                    .language("German"),
                fields: vec![Field::Name, Field::Capital, Field::PhoneCode],
            }
        );
    }

    #[rstest]
    #[case::repeated_column("SELECT alpha2, name, alpha2 FROM countries", vec![Field::Alpha2, Field::Name])]
    #[case::star_then_column("SELECT *, name FROM countries", Field::ALL.to_vec())]
    fn test_select_drops_repeated_fields(#[case] sql: &str, #[case] expected: Vec<Field>) {
        let Query::Select { fields, .. } = QueryParser::parse(sql).unwrap() else {
            panic!("expected a SELECT");
        };
        assert_eq!(fields, expected);
    }

    #[test]
    fn test_parse_where_numeric_phone_code() {
        let query =
            QueryParser::parse("SELECT name FROM countries WHERE phoneCode = 44").unwrap();
        let Query::Select { filter, .. } = query else {
            panic!("expected a SELECT");
        };
        assert_eq!(filter.phone_code.as_deref(), Some("44"));
    }

    #[test]
    fn test_parse_where_continent() {
        let query = QueryParser::parse(
            "SELECT alpha2 FROM countries WHERE continent = 'North America'",
        )
        .unwrap();
        let Query::Select { filter, .. } = query else {
            panic!("expected a SELECT");
        };
        assert_eq!(filter.continent, Some(Continent::NorthAmerica));
    }

    #[test]
    fn test_unknown_select_field() {
        let err = QueryParser::parse("SELECT population FROM countries").unwrap_err();
        assert!(matches!(err, Error::UnknownField(name) if name == "population"));
    }

    #[test]
    fn test_unknown_region_value() {
        let err =
            QueryParser::parse("SELECT * FROM countries WHERE region = 'Atlantis'").unwrap_err();
        assert!(matches!(err, Error::UnknownValue { kind: "region", .. }));
    }

    #[rstest]
    #[case::wrong_table("SELECT * FROM cities")]
    #[case::or("SELECT * FROM countries WHERE region = 'Asia' OR region = 'Europe'")]
    #[case::not_a_criterion("SELECT * FROM countries WHERE name = 'France'")]
    #[case::repeated("SELECT * FROM countries WHERE currency = 'EUR' AND currency = 'USD'")]
    #[case::insert("INSERT INTO countries VALUES (1)")]
    #[case::join("SELECT * FROM countries JOIN regions ON a = b")]
    #[case::two_statements("SELECT * FROM countries; SELECT * FROM countries")]
    fn test_unsupported_sql(#[case] sql: &str) {
        assert!(matches!(QueryParser::parse(sql), Err(Error::Unsupported(_))));
    }

    #[test]
    fn test_malformed_sql() {
        assert!(matches!(
            QueryParser::parse("SELEKT * FROM countries"),
            Err(Error::Sql(_))
        ));
    }

    #[rstest]
    #[case::lookup(".lookup usa", Query::Lookup("usa".to_string()))]
    #[case::name_with_spaces(".name Czech Republic", Query::Name("Czech Republic".to_string()))]
    #[case::capital(".capital  Santo Domingo ", Query::Capital("Santo Domingo".to_string()))]
    #[case::search(".search repub", Query::Search("repub".to_string()))]
    #[case::neighbors(".neighbors DE", Query::Neighbors("DE".to_string()))]
    #[case::compare(".compare DE FR", Query::Compare("DE".to_string(), "FR".to_string()))]
    #[case::regions(".regions", Query::Regions)]
    #[case::subregions(".subregions oceania", Query::Subregions(Region::Oceania))]
    #[case::continents(".continents", Query::Continents)]
    #[case::currencies(".CURRENCIES", Query::Currencies)]
    #[case::languages(".languages", Query::Languages)]
    #[case::phone_codes(".phonecodes", Query::PhoneCodes)]
    #[case::count_total(".count", Query::Count(None))]
    #[case::count_region(".count region", Query::Count(Some(Grouping::Region)))]
    #[case::count_language(".count Language", Query::Count(Some(Grouping::Language)))]
    #[case::group(".group language", Query::Group(Grouping::Language))]
    #[case::validate(
        ".validate language Scottish Gaelic",
        Query::Validate(Validation::Language, "Scottish Gaelic".to_string())
    )]
    fn test_parse_command(#[case] input: &str, #[case] expected: Query) {
        assert_eq!(QueryParser::parse(input).unwrap(), expected);
    }

    #[rstest]
    #[case::lookup_without_code(".lookup")]
    #[case::compare_one_code(".compare DE")]
    #[case::compare_three_codes(".compare DE FR IT")]
    #[case::validate_without_value(".validate currency")]
    fn test_command_usage_errors(#[case] input: &str) {
        assert!(matches!(QueryParser::parse(input), Err(Error::Usage(_))));
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            QueryParser::parse(".frobnicate"),
            Err(Error::Unsupported(_))
        ));
        assert!(matches!(
            QueryParser::parse(".subregions Atlantis"),
            Err(Error::UnknownValue { kind: "region", .. })
        ));
    }
}
