use crate::api::models::Table;
use serde::Serialize;
use std::fmt;

pub const REFERENCE_CARDINALITY: &str = "N:1";
pub const INHERITANCE_CARDINALITY: &str = "1:1";
pub const SUPER_CLASS_FIELD: &str = "super_class";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    Reference,
    Inheritance,
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipKind::Reference => write!(f, "reference"),
            RelationshipKind::Inheritance => write!(f, "inheritance"),
        }
    }
}

/// Derived link between two tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub source_table: String,
    pub target_table: String,
    pub field: String,
    pub kind: RelationshipKind,
    pub is_parent_child: bool,
    pub cardinality: String,
}

impl Relationship {
    /// `source.field` points at `target`
    pub fn reference(source: &str, target: &str, field: &str) -> Self {
        Self {
            source_table: source.to_string(),
            target_table: target.to_string(),
            field: field.to_string(),
            kind: RelationshipKind::Reference,
            is_parent_child: false,
            cardinality: REFERENCE_CARDINALITY.to_string(),
        }
    }

    /// `table` extends its super class; None when it has none
    pub fn inheritance(table: &Table) -> Option<Self> {
        if !table.has_super_class() {
            return None;
        }
        Some(Self {
            source_table: table.name.clone(),
            target_table: table.super_class.clone(),
            field: SUPER_CLASS_FIELD.to_string(),
            kind: RelationshipKind::Inheritance,
            is_parent_child: true,
            cardinality: INHERITANCE_CARDINALITY.to_string(),
        })
    }
}

/// Knobs for one schema crawl
#[derive(Debug, Clone)]
pub struct CrawlParams {
    pub scope: String,
    pub detailed: bool,
    /// Maximum per-table requests in flight; 1 keeps the crawl sequential
    pub concurrency: usize,
}

impl Default for CrawlParams {
    fn default() -> Self {
        Self {
            scope: String::new(),
            detailed: false,
            concurrency: 1,
        }
    }
}
