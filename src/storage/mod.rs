//! Storage layer for sncli
//!
//! Persists connection credentials as a JSON file in the user's home
//! directory. The file is plain text; there is no keyring integration.

use crate::error::StorageError;

pub mod config;

type Result<T> = std::result::Result<T, StorageError>;
