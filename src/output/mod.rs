//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod pretty;
pub mod table;

pub use pretty::Pretty;

/// Types that can be rendered in every output format
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

impl<D> Formattable for [D]
where
    D: Tabled + Serialize + Pretty,
{
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(pretty::format_list(self)),
            OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

impl<D> Formattable for Vec<D>
where
    D: Tabled + Serialize + Pretty,
{
    fn format(&self, format: OutputFormat) -> Result<String> {
        self.as_slice().format(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled, Serialize)]
    struct Row {
        #[tabled(rename = "ID")]
        id: u64,
        #[tabled(rename = "NAME")]
        name: String,
    }

    impl Pretty for Row {
        fn pretty(&self) -> String {
            format!("{} #{}", self.name, self.id)
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: 1009610,
                name: "Spider-Man".to_string(),
            },
            Row {
                id: 1009368,
                name: "Iron Man".to_string(),
            },
        ]
    }

    #[test]
    fn test_format_dispatch() {
        let rows = rows();

        let pretty = rows.format(OutputFormat::Pretty).unwrap();
        assert!(pretty.contains("Spider-Man #1009610"));

        let table = rows.format(OutputFormat::Table).unwrap();
        assert!(table.contains("NAME"));
        assert!(table.contains("Iron Man"));

        let json = rows.format(OutputFormat::Json).unwrap();
        assert!(json.contains("\"data\""));
        assert!(json.contains("\"id\": 1009368"));
    }
}
