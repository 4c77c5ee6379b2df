//! Report writers for crawled schema data

pub mod schema_csv;

pub use schema_csv::{DEFAULT_OUTPUT, SchemaCsvExporter};
