use crate::api::record::{Record, RecordValue, discover_columns};
use crate::utils::text::{single_line, truncate_text};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};

const DEFAULT_MAX_CELL_WIDTH: usize = 40;

pub struct TableDisplay {
    max_cell_width: usize,
    use_colors: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    pub fn new() -> Self {
        Self {
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
            use_colors: true,
        }
    }

    pub fn with_max_cell_width(mut self, width: usize) -> Self {
        self.max_cell_width = width;
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn header_cell(&self, text: &str) -> Cell {
        if self.use_colors {
            Cell::new(text).add_attribute(Attribute::Bold).fg(Color::Cyan)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    fn value_cell(&self, value: Option<&RecordValue>) -> Cell {
        match value {
            Some(RecordValue::Null) | None if self.use_colors => Cell::new("")
                .fg(Color::DarkGrey)
                .add_attribute(Attribute::Italic),
            Some(value) => Cell::new(truncate_text(
                &single_line(&value.to_string()),
                self.max_cell_width,
            )),
            None => Cell::new(""),
        }
    }

    /// Render records as a table; columns appear in discovery order
    pub fn render_records(&self, records: &[Record]) -> String {
        if records.is_empty() {
            return "No records found.".to_string();
        }

        let columns = discover_columns(records);

        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(columns.iter().map(|c| self.header_cell(c)));

        for record in records {
            table.add_row(columns.iter().map(|c| self.value_cell(record.get(c))));
        }

        format!("{}\n{} record(s)", table, records.len())
    }
}
