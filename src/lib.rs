// countrydb - an immutable country reference table with query helpers
// This is the library root that exposes the public API

pub mod error;
pub mod query;
pub mod storage;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use query::{
    CountryComparison, CountryFilter, Projection, Query, QueryExecutor, QueryParser, QueryResult,
};
pub use storage::regions::REGION_SUBREGIONS;
pub use storage::table::{countries, CountryTable};
pub use storage::{Continent, Country, Currency, Field, FieldValue, Region, Subregion};
