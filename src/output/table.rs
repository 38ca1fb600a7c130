//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format rows as a rounded table with centered headers
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Two-column FIELD/VALUE table for a single record
pub fn format_record(fields: &[(&str, String)]) -> String {
    let rows: Vec<RecordRow> = fields
        .iter()
        .map(|(field, value)| RecordRow {
            field: field.to_string(),
            value: value.clone(),
        })
        .collect();
    format_table(&rows)
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "FIELD")]
    field: String,
    #[tabled(rename = "VALUE")]
    value: String,
}
