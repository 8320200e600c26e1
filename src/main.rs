// Main entry point for the countrydb CLI
// This provides an interactive shell over the country table

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use countrydb::{countries, CountryTable, QueryExecutor};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// countrydb - query a country reference table
#[derive(ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Load countries from this JSON file instead of the embedded dataset
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Execute a single query and exit
    #[arg(short, long)]
    execute: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so they never mix with query output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("countrydb=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let loaded;
    let table: &CountryTable = match &args.data {
        Some(path) => {
            loaded = CountryTable::from_path(path)
                .with_context(|| format!("failed to load dataset from {}", path.display()))?;
            &loaded
        }
        None => countries(),
    };
    info!(countries = table.len(), "country table ready");

    let executor = QueryExecutor::new(table);

    // If a query was provided, execute it and exit
    if let Some(input) = args.execute {
        return execute_query(&executor, &input, args.json);
    }

    // Interactive REPL (Read-Eval-Print Loop)
    println!("╔════════════════════════════════════════════╗");
    println!("║        countrydb Interactive Shell         ║");
    println!("╚════════════════════════════════════════════╝");
    println!();
    println!("{} countries loaded", table.len());
    println!("Type a query or '.help' for help");
    println!("Type '.exit' to quit");
    println!();

    repl(|input| execute_query(&executor, input, args.json))
}

/// REPL (Read-Eval-Print Loop) implementation
/// Errors from a single query are printed and the loop continues
fn repl<F>(mut execute_fn: F) -> Result<()>
where
    F: FnMut(&str) -> Result<()>,
{
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("countrydb> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            // EOF
            println!();
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            ".exit" | ".quit" => {
                println!("Goodbye!");
                break;
            }
            ".help" => {
                print_help();
                continue;
            }
            _ => {}
        }

        if let Err(e) = execute_fn(input) {
            eprintln!("Error: {e:#}");
        }
    }

    Ok(())
}

/// Execute one query and print the result
fn execute_query(executor: &QueryExecutor<'_>, input: &str, json: bool) -> Result<()> {
    debug!(query = input, "executing");
    let result = executor.run(input)?;
    if json {
        println!("{}", result.to_json()?);
    } else {
        println!("{}", result.format());
    }
    Ok(())
}

/// Print help information
fn print_help() {
    println!("╔════════════════════════════════════════════╗");
    println!("║              countrydb Help                ║");
    println!("╚════════════════════════════════════════════╝");
    println!();
    println!("Shell Commands:");
    println!("  .help                          Show this help message");
    println!("  .exit, .quit                   Exit the shell");
    println!();
    println!("Lookups:");
    println!("  .lookup <code>                 By alpha2, alpha3 or numeric code");
    println!("  .name <name>                   By exact common name");
    println!("  .capital <capital>             By capital (case-insensitive)");
    println!("  .search <text>                 Substring of any name");
    println!("  .neighbors <alpha2>            Others in the same subregion");
    println!("  .compare <alpha2> <alpha2>     Compare two countries");
    println!();
    println!("Listings:");
    println!("  .regions                       Regions in declared order");
    println!("  .subregions <region>           Subregions of a region");
    println!("  .continents, .currencies, .languages, .phonecodes");
    println!();
    println!("Aggregates:");
    println!("  .count [continent|region|currency|language]");
    println!("  .group <continent|region|currency|language>");
    println!("  .validate <country|currency|language> <value>");
    println!();
    println!("SELECT:");
    println!("    SELECT * FROM countries");
    println!("    SELECT name, capital FROM countries WHERE region = 'Europe'");
    println!("    SELECT alpha2 FROM countries WHERE language = 'French' AND continent = 'Africa'");
    println!();
    println!("Notes:");
    println!("  - WHERE accepts region, subregion, continent, language, currency, phone_code");
    println!("  - Conditions are combined with AND; string values use single quotes");
    println!("  - Field names are case-insensitive: phone_code and phoneCode both work");
    println!();
}
