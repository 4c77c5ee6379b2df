//! # sncli
//!
//! Command line client for ServiceNow table APIs.
//!
//! Authenticates against an instance, crawls the table, field and
//! relationship metadata of an application scope into a CSV report, and
//! fetches raw records from any table.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sncli::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> sncli::Result<()> {
//!     let config = Config::load(None)?;
//!     let client = SnowClient::from_config(&config)?;
//!
//!     let service = SchemaService::new(&client);
//!     let tables = service.get_tables("global", false).await?;
//!     let relationships = service.get_relationships(&tables).await?;
//!
//!     SchemaCsvExporter::new(false).export_to_path(
//!         std::path::Path::new("tables.csv"),
//!         &tables,
//!         &relationships,
//!     )?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           CLI Layer                 │  clap commands, dispatcher, handlers
//! ├─────────────────────────────────────┤
//! │          Core Layer                 │  Crawl, connect and record services
//! ├─────────────────────────────────────┤
//! │     API / Export / Display          │  HTTP client, CSV report, tables
//! ├─────────────────────────────────────┤
//! │        Storage Layer                │  JSON credentials file
//! └─────────────────────────────────────┘
//! ```

pub use error::AppError;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use sncli::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Result;
    pub use crate::error::AppError;

    pub use crate::api::client::SnowClient;
    pub use crate::api::models::{Table, TableField, UserInfo};
    pub use crate::api::record::{Record, RecordValue};

    pub use crate::core::services::record_service::{RecordQuery, RecordService};
    pub use crate::core::services::schema_service::SchemaService;
    pub use crate::core::services::types::{CrawlParams, Relationship, RelationshipKind};

    pub use crate::export::SchemaCsvExporter;
    pub use crate::storage::config::Config;
}

/// Main architecture layers (dependency flow: CLI → Core → Storage)
pub mod cli; // Command-line interface
pub mod core; // Crawling and connect flows
pub mod storage; // Credentials persistence

/// Support modules (used across layers)
pub mod api; // ServiceNow HTTP client and models
pub mod display; // Terminal output
pub mod error; // Error handling
pub mod export; // CSV report
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;
