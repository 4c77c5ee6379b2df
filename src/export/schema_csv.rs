//! CSV schema report, one row per table.
//!
//! Multi-valued cells (properties, relationships, fields) are joined with
//! newlines and rely on CSV quoting to stay inside one cell.

use crate::api::models::{Table, TableField};
use crate::core::services::types::Relationship;
use crate::error::ExportError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const DEFAULT_OUTPUT: &str = "tables.csv";

const BASE_HEADER: [&str; 7] = [
    "Table Name",
    "Label",
    "Description",
    "Super Class",
    "Properties",
    "Parent Relationships",
    "Referenced Relationships",
];
const FIELDS_HEADER: &str = "Fields";

#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaCsvExporter {
    detailed: bool,
}

impl SchemaCsvExporter {
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }

    pub fn header(&self) -> Vec<&'static str> {
        let mut header = BASE_HEADER.to_vec();
        if self.detailed {
            header.push(FIELDS_HEADER);
        }
        header
    }

    /// Cells for one table. Relationship order within a cell follows the
    /// order of `relationships`.
    pub fn table_row(&self, table: &Table, relationships: &[Relationship]) -> Vec<String> {
        let parent_rels: Vec<String> = relationships
            .iter()
            .filter(|rel| rel.target_table == table.name)
            .map(|rel| format!("{} ({})", rel.source_table, rel.kind))
            .collect();
        let referenced_rels: Vec<String> = relationships
            .iter()
            .filter(|rel| rel.source_table == table.name)
            .map(|rel| format!("{}.{}", rel.source_table, rel.field))
            .collect();

        let properties = [
            format!("Access: {}", table.accessible_from),
            format!("Extendable: {}", table.extendable),
            format!("Number Prefix: {}", table.number_prefix),
        ];

        let mut row = vec![
            table.name.clone(),
            table.label.clone(),
            table.description.clone(),
            table.super_class.clone(),
            properties.join("\n"),
            parent_rels.join("\n"),
            referenced_rels.join("\n"),
        ];

        if self.detailed {
            let fields: Vec<String> = table.fields.iter().map(format_field).collect();
            row.push(fields.join("\n"));
        }

        row
    }

    /// Write the report to any sink
    pub fn write_to<W: Write>(
        &self,
        sink: W,
        tables: &[Table],
        relationships: &[Relationship],
    ) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_writer(sink);

        writer
            .write_record(self.header())
            .map_err(|e| write_error("CSV header", e))?;

        for table in tables {
            writer
                .write_record(self.table_row(table, relationships))
                .map_err(|e| write_error(&format!("table record {}", table.name), e))?;
        }

        writer.flush().map_err(|e| ExportError::Write {
            what: "CSV output".to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Create (or truncate) `path` and write the report into it
    pub fn export_to_path(
        &self,
        path: &Path,
        tables: &[Table],
        relationships: &[Relationship],
    ) -> Result<(), ExportError> {
        let file = File::create(path).map_err(|source| ExportError::Create {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        self.write_to(file, tables, relationships)?;
        log::debug!("wrote {} table rows to {}", tables.len(), path.display());
        Ok(())
    }
}

fn format_field(field: &TableField) -> String {
    format!(
        "{}\n  Type: {}, Length: {}, Reference: {}",
        field.name,
        field.field_type,
        field.max_length,
        field.reference.as_deref().unwrap_or_default()
    )
}

fn write_error(what: &str, error: csv::Error) -> ExportError {
    ExportError::Write {
        what: what.to_string(),
        message: error.to_string(),
    }
}
