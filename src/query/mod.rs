// Query module - the operations over a country table, plus the shell's
// query language and executor
pub mod aggregate;
pub mod compare;
pub mod executor;
pub mod filter;
pub mod lookup;
pub mod parser;
pub mod projection;
pub mod validate;

pub use compare::CountryComparison;
pub use executor::{QueryExecutor, QueryResult};
pub use filter::CountryFilter;
pub use parser::{Grouping, Query, QueryParser, Validation};
pub use projection::Projection;
