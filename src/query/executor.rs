// Query Executor
// Runs parsed queries against a borrowed country table and renders the results

use super::compare::CountryComparison;
use super::parser::{Grouping, Query, QueryParser, Validation};
use super::projection::Projection;
use crate::error::Result;
use crate::storage::table::CountryTable;
use crate::storage::{Country, Currency, Field};
use indexmap::{IndexMap, IndexSet};
use serde_json::json;

/// Columns shown when a query returns several whole countries
pub const SUMMARY_FIELDS: [Field; 6] = [
    Field::Name,
    Field::Alpha2,
    Field::Alpha3,
    Field::Region,
    Field::Subregion,
    Field::Capital,
];

/// Executes queries against one table
/// The executor only reads, so any number of them can share a table
#[derive(Debug, Clone, Copy)]
pub struct QueryExecutor<'a> {
    table: &'a CountryTable,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(table: &'a CountryTable) -> Self {
        Self { table }
    }

    /// Parse and execute one line of input
    pub fn run(&self, input: &str) -> Result<QueryResult<'a>> {
        let query = QueryParser::parse(input)?;
        Ok(self.execute(query))
    }

    /// Execute a query and return the result
    /// Queries never fail: nothing found is an empty result
    pub fn execute(&self, query: Query) -> QueryResult<'a> {
        let table = self.table;
        match query {
            Query::Select { filter, fields } => {
                // Headers must line up with projections, which hold each field once
                let fields: Vec<Field> = fields
                    .into_iter()
                    .collect::<IndexSet<_>>()
                    .into_iter()
                    .collect();
                QueryResult::Rows {
                    rows: table.by_fields(&filter, &fields),
                    fields,
                }
            }
            Query::Lookup(code) => QueryResult::Record(table.by_any_code(&code)),
            Query::Name(name) => QueryResult::Record(table.by_name(&name)),
            Query::Capital(capital) => QueryResult::Record(table.by_capital(&capital)),
            Query::Search(text) => summary(table.search(&text)),
            Query::Neighbors(code) => summary(table.potential_neighbors(&code)),
            Query::Compare(a, b) => QueryResult::Comparison(table.compare_countries(&a, &b)),
            Query::Regions => list("region", table.all_regions()),
            Query::Subregions(region) => list("subregion", table.subregions_of(region)),
            Query::Continents => list("continent", table.all_continents()),
            Query::Currencies => QueryResult::Currencies(table.all_currencies()),
            Query::Languages => list("language", table.all_languages()),
            Query::PhoneCodes => list("phone code", table.all_phone_codes()),
            Query::Count(None) => QueryResult::Total(table.total_count()),
            Query::Count(Some(grouping)) => match grouping {
                Grouping::Continent => counts(grouping, table.count_by_continent()),
                Grouping::Region => counts(grouping, table.count_by_region()),
                Grouping::Currency => counts(grouping, group_sizes(table.group_by_currency())),
                Grouping::Language => counts(grouping, group_sizes(table.group_by_language())),
            },
            Query::Group(grouping) => {
                let groups = match grouping {
                    Grouping::Continent => stringify_keys(table.group_by_continent()),
                    Grouping::Region => stringify_keys(table.group_by_region()),
                    Grouping::Currency => table.group_by_currency(),
                    Grouping::Language => table.group_by_language(),
                };
                QueryResult::Groups { grouping, groups }
            }
            Query::Validate(kind, value) => {
                let valid = match kind {
                    Validation::CountryCode => table.is_valid_country_code(&value),
                    Validation::CurrencyCode => table.is_valid_currency_code(&value),
                    Validation::Language => table.is_valid_language(&value),
                };
                QueryResult::Validation { kind, value, valid }
            }
        }
    }
}

fn summary(countries: Vec<&Country>) -> QueryResult<'_> {
    QueryResult::Rows {
        fields: SUMMARY_FIELDS.to_vec(),
        rows: countries
            .into_iter()
            .map(|c| Projection::of(c, &SUMMARY_FIELDS))
            .collect(),
    }
}

fn list<'a, T: ToString>(heading: &'static str, items: Vec<T>) -> QueryResult<'a> {
    QueryResult::List {
        heading,
        items: items.iter().map(ToString::to_string).collect(),
    }
}

fn counts<'a, K: ToString>(grouping: Grouping, by_key: IndexMap<K, usize>) -> QueryResult<'a> {
    QueryResult::Counts {
        grouping,
        counts: stringify_keys(by_key),
    }
}

fn group_sizes(groups: IndexMap<String, Vec<&Country>>) -> IndexMap<String, usize> {
    groups.into_iter().map(|(k, v)| (k, v.len())).collect()
}

fn stringify_keys<K: ToString, V>(map: IndexMap<K, V>) -> IndexMap<String, V> {
    map.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// Represents the result of a query execution
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult<'a> {
    /// Projected rows from SELECT, search and neighbor queries
    Rows {
        fields: Vec<Field>,
        rows: Vec<Projection>,
    },
    /// A single-country lookup
    Record(Option<&'a Country>),
    /// Distinct values of one attribute
    List {
        heading: &'static str,
        items: Vec<String>,
    },
    Currencies(Vec<Currency>),
    Counts {
        grouping: Grouping,
        counts: IndexMap<String, usize>,
    },
    Groups {
        grouping: Grouping,
        groups: IndexMap<String, Vec<&'a Country>>,
    },
    Comparison(CountryComparison<'a>),
    Validation {
        kind: Validation,
        value: String,
        valid: bool,
    },
    Total(usize),
}

impl QueryResult<'_> {
    /// Format the result as a string for display
    /// Tabular results are drawn as a box table
    pub fn format(&self) -> String {
        match self {
            QueryResult::Rows { fields, rows } => {
                let headers: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
                let cells: Vec<Vec<String>> = rows
                    .iter()
                    .map(|row| row.values().map(|v| v.to_string()).collect())
                    .collect();
                render_table(&headers, &cells)
            }
            QueryResult::Record(None) => "No country found".to_string(),
            QueryResult::Record(Some(country)) => {
                let cells: Vec<Vec<String>> = Field::ALL
                    .iter()
                    .map(|&f| vec![f.to_string(), country.field(f).to_string()])
                    .collect();
                render_table(&["field".to_string(), "value".to_string()], &cells)
            }
            QueryResult::List { heading, items } => {
                let cells: Vec<Vec<String>> = items.iter().map(|i| vec![i.clone()]).collect();
                render_table(&[heading.to_string()], &cells)
            }
            QueryResult::Currencies(currencies) => {
                let cells: Vec<Vec<String>> = currencies
                    .iter()
                    .map(|c| vec![c.code.clone(), c.name.clone(), c.symbol.clone()])
                    .collect();
                let headers = ["code", "name", "symbol"].map(String::from);
                render_table(&headers, &cells)
            }
            QueryResult::Counts { grouping, counts } => {
                let cells: Vec<Vec<String>> = counts
                    .iter()
                    .map(|(k, n)| vec![k.clone(), n.to_string()])
                    .collect();
                render_table(&[grouping.to_string(), "count".to_string()], &cells)
            }
            QueryResult::Groups { grouping, groups } => {
                let cells: Vec<Vec<String>> = groups
                    .iter()
                    .map(|(k, members)| vec![k.clone(), names(members).join(", ")])
                    .collect();
                render_table(&[grouping.to_string(), "countries".to_string()], &cells)
            }
            QueryResult::Comparison(cmp) => format_comparison(cmp),
            QueryResult::Validation { kind, value, valid } => {
                let verdict = if *valid { "is" } else { "is not" };
                format!("'{value}' {verdict} a known {kind}")
            }
            QueryResult::Total(n) => format!("{n} countries"),
        }
    }

    /// Render the result as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        let value = match self {
            QueryResult::Rows { rows, .. } => serde_json::to_value(rows)?,
            QueryResult::Record(country) => serde_json::to_value(country)?,
            QueryResult::List { items, .. } => serde_json::to_value(items)?,
            QueryResult::Currencies(currencies) => serde_json::to_value(currencies)?,
            QueryResult::Counts { counts, .. } => serde_json::to_value(counts)?,
            QueryResult::Groups { groups, .. } => {
                let by_name: IndexMap<&String, Vec<&str>> =
                    groups.iter().map(|(k, members)| (k, names(members))).collect();
                serde_json::to_value(by_name)?
            }
            QueryResult::Comparison(cmp) => serde_json::to_value(cmp)?,
            QueryResult::Validation { kind, value, valid } => json!({
                "kind": kind.as_str(),
                "value": value,
                "valid": valid,
            }),
            QueryResult::Total(n) => json!({ "total": n }),
        };
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

fn names<'c>(countries: &[&'c Country]) -> Vec<&'c str> {
    countries.iter().map(|c| c.name.as_str()).collect()
}

fn format_comparison(cmp: &CountryComparison<'_>) -> String {
    let name = |c: Option<&Country>| c.map_or("(not found)".to_string(), |c| c.name.clone());
    let flag = |b: bool| (if b { "yes" } else { "no" }).to_string();

    let cells = vec![
        vec!["first".to_string(), name(cmp.first)],
        vec!["second".to_string(), name(cmp.second)],
        vec!["same currency".to_string(), flag(cmp.same_currency)],
        vec!["same region".to_string(), flag(cmp.same_region)],
        vec!["same continent".to_string(), flag(cmp.same_continent)],
        vec!["shared languages".to_string(), cmp.shared_languages.join(", ")],
    ];
    render_table(&["".to_string(), "comparison".to_string()], &cells)
}

/// Draw a box table; widths are measured in characters
fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "No rows found".to_string();
    }

    // Calculate column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, value) in row.iter().enumerate() {
            widths[i] = widths[i].max(value.chars().count());
        }
    }

    let mut result = String::new();

    result.push_str(&border(&widths, '┌', '┬', '┐'));

    result.push('│');
    for (name, &width) in headers.iter().zip(&widths) {
        result.push_str(&format!(" {name:<width$} │"));
    }
    result.push('\n');

    result.push_str(&border(&widths, '├', '┼', '┤'));

    for row in rows {
        result.push('│');
        for (value, &width) in row.iter().zip(&widths) {
            result.push_str(&format!(" {value:<width$} │"));
        }
        result.push('\n');
    }

    result.push_str(&border(&widths, '└', '┴', '┘'));

    result.push_str(&format!("\n{} row(s) returned", rows.len()));

    result
}

fn border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}\n", segments.join(&middle.to_string()))
}
