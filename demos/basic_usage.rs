// Example: Basic countrydb usage
// Run with: cargo run --example basic_usage

use countrydb::{countries, CountryFilter, Field, QueryExecutor, Region, Subregion};

fn main() -> anyhow::Result<()> {
    println!("=== countrydb Basic Usage Example ===\n");

    let table = countries();

    // 1. Point lookups
    println!("1. Looking up by any code...");
    for code in ["us", "DEU", "392"] {
        match table.by_any_code(code) {
            Some(country) => println!("  {code:>4} -> {}", country.name),
            None => println!("  {code:>4} -> not found"),
        }
    }
    println!();

    // 2. Free-text search
    println!("2. Searching for 'republic'...");
    let names: Vec<&str> = table
        .search("republic")
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    println!("  {} matches, first few: {:?}\n", names.len(), &names[..names.len().min(5)]);

    // 3. Combined filters and projection
    println!("3. French-speaking countries in Western Europe...");
    let filter = CountryFilter::new()
        .region(Region::Europe)
        .subregion(Subregion::WesternEurope)
        .language("French");
    for row in table.by_fields(&filter, &[Field::Name, Field::Capital, Field::Currency]) {
        println!("  {}", serde_json::to_string(&row)?);
    }
    println!();

    // 4. Aggregates
    println!("4. Countries per continent...");
    for (continent, n) in table.count_by_continent() {
        println!("  {continent:<15} {n}");
    }
    println!("  total           {}\n", table.total_count());

    // 5. Derived utilities
    println!("5. Comparing Germany and Austria...");
    let cmp = table.compare_countries("DE", "AT");
    println!(
        "  same currency: {}, same region: {}, shared languages: {:?}\n",
        cmp.same_currency, cmp.same_region, cmp.shared_languages
    );

    // 6. The shell's query language
    println!("6. Running queries through the executor...");
    let executor = QueryExecutor::new(table);
    for input in [
        "SELECT name, phone_code FROM countries WHERE subregion = 'Northern Europe'",
        ".neighbors CH",
        ".validate currency EUR",
    ] {
        println!("countrydb> {input}");
        println!("{}\n", executor.run(input)?.format());
    }

    println!("=== Example Complete ===");
    Ok(())
}
