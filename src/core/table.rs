//! Spreadsheet loading
//!
//! Named-column mode turns a CSV file into a header plus [`Row`]s. Positional
//! mode returns the raw grid for formats whose header is not on the first line.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One spreadsheet row as an ordered column name → cell mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new<I, K, V>(cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: cells
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Cell value for `column`, if the row has that column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Cells in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Header row plus data rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table from a header and raw records.
    ///
    /// Short records are padded with blank cells; cells beyond the header are
    /// dropped.
    pub fn new<H, S>(headers: H, records: Vec<Vec<String>>) -> Self
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let rows = records
            .into_iter()
            .map(|record| {
                Row::new(headers.iter().enumerate().map(|(i, header)| {
                    (
                        header.clone(),
                        record.get(i).cloned().unwrap_or_default(),
                    )
                }))
            })
            .collect();
        Self { headers, rows }
    }

    /// Parse CSV with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            records.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self::new(headers, records))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, csv::Error> {
        Self::from_reader(File::open(path)?)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse CSV as a raw grid with no header interpretation
pub fn read_grid<R: Read>(reader: R) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect()
}

pub fn read_grid_path<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>, csv::Error> {
    read_grid(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_from_reader() {
        let csv = "SIS User ID,Quiz 1 (111)\nabc123,Nice work\ndef456,\n";
        let table = Table::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.headers(), &["SIS User ID", "Quiz 1 (111)"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("Quiz 1 (111)"), Some("Nice work"));
        assert_eq!(table.rows()[1].get("Quiz 1 (111)"), Some(""));
        assert_eq!(table.rows()[0].get("Missing"), None);
    }

    #[test]
    fn test_short_records_are_padded() {
        let csv = "a,b,c\n1\n";
        let table = Table::from_reader(csv.as_bytes()).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.len(), 3);
        assert_eq!(row.get("c"), Some(""));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let csv = "a,b\n1,2\n,\n3,4\n";
        let table = Table::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_quoted_cells_keep_commas() {
        let csv = "SIS User ID,Essay (7)\nabc,\"Good, but cite sources\"\n";
        let table = Table::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            table.rows()[0].get("Essay (7)"),
            Some("Good, but cite sources")
        );
    }

    #[test]
    fn test_read_grid_keeps_ragged_rows() {
        let csv = "Topic,Start Time\nWeekly,2024-03-05 10:00\n\nName,Email,Duration\n";
        let grid = read_grid(csv.as_bytes()).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[2], vec!["Name", "Email", "Duration"]);
    }
}
