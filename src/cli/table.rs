//! Tabular output shared by list-style commands
//!
//! Every list command collects its output into a [`RowTable`] and renders it
//! in the format selected with `--format`. Missing values stay distinct from
//! empty strings in JSON and YAML (null) and render as empty cells elsewhere.

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::truncate_str;
use crate::cli::OutputFormat;

/// Widest a TSV cell gets before truncation
const TSV_CELL_WIDTH: usize = 60;

/// Column headers plus rows of nullable text cells
#[derive(Debug, Clone, Default)]
pub struct RowTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RowTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; short rows are padded with nulls
    pub fn push(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render in the given format. `Auto` renders as TSV.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Auto | OutputFormat::Tsv => Ok(self.render_tsv()),
            OutputFormat::Csv => self.render_csv(),
            OutputFormat::Md => Ok(self.render_markdown()),
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(&self.records()).into_diagnostic()?;
                out.push('\n');
                Ok(out)
            }
            OutputFormat::Yaml => serde_yml::to_string(&self.records()).into_diagnostic(),
            OutputFormat::Id => Ok(self.render_ids()),
        }
    }

    /// Render and write to stdout
    pub fn print(&self, format: OutputFormat) -> Result<()> {
        print!("{}", self.render(format)?);
        Ok(())
    }

    fn records(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .zip(row)
                    .map(|(header, cell)| {
                        let value = cell
                            .clone()
                            .map_or(serde_json::Value::Null, serde_json::Value::String);
                        (header.clone(), value)
                    })
                    .collect()
            })
            .collect()
    }

    fn render_tsv(&self) -> String {
        let mut out = String::new();
        let header: Vec<String> = self
            .headers
            .iter()
            .map(|h| style(h.to_uppercase()).bold().to_string())
            .collect();
        out.push_str(&header.join("\t"));
        out.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| {
                    let text = cell.as_deref().unwrap_or("").replace(['\t', '\n'], " ");
                    truncate_str(&text, TSV_CELL_WIDTH)
                })
                .collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
        out
    }

    fn render_csv(&self) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(&self.headers).into_diagnostic()?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))
                .into_diagnostic()?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| miette::miette!("{}", e.error()))?;
        String::from_utf8(bytes).into_diagnostic()
    }

    fn render_markdown(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().map(String::as_str));
        for row in &self.rows {
            builder.push_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")));
        }
        let mut out = builder.build().with(Style::markdown()).to_string();
        out.push('\n');
        out
    }

    fn render_ids(&self) -> String {
        self.rows
            .iter()
            .filter_map(|row| row.first().cloned().flatten())
            .map(|id| id + "\n")
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RowTable {
        let mut table = RowTable::new(["ID", "MPN", "Footprints"]);
        table.push(vec![
            Some("2".to_string()),
            Some("RC1206".to_string()),
            Some("a:b;c:d".to_string()),
        ]);
        table.push(vec![Some("1".to_string()), Some("X, Y".to_string())]);
        table
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = sample();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].len(), 3);
        assert_eq!(table.rows[1][2], None);
    }

    #[test]
    fn test_csv_quotes_and_leaves_nulls_empty() {
        let csv = sample().render(OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "ID,MPN,Footprints");
        assert_eq!(lines[1], "2,RC1206,a:b;c:d");
        assert_eq!(lines[2], "1,\"X, Y\",");
    }

    #[test]
    fn test_json_keeps_nulls() {
        let json = sample().render(OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["Footprints"], "a:b;c:d");
        assert!(parsed[1]["Footprints"].is_null());
    }

    #[test]
    fn test_ids_use_first_column() {
        assert_eq!(sample().render(OutputFormat::Id).unwrap(), "2\n1\n");
    }

    #[test]
    fn test_markdown_has_header_rule() {
        let md = sample().render(OutputFormat::Md).unwrap();
        let lines: Vec<&str> = md.lines().collect();
        assert!(lines[0].contains("MPN"));
        assert!(lines[1].starts_with("|-"));
        assert!(md.contains("RC1206"));
    }

    #[test]
    fn test_empty_table_renders_header_only() {
        let table = RowTable::new(["ID"]);
        assert!(table.is_empty());
        assert_eq!(table.render(OutputFormat::Csv).unwrap(), "ID\n");
    }
}
