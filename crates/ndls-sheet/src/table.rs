//! A CSV table that preserves column and row order.
//!
//! Kept deliberately positional (header vector + row vectors) so that
//! writing back reproduces the input layout exactly, with new columns
//! appended at the end.

use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::{Result, SheetError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Read a CSV file with a header row. Handles a UTF-8 BOM on the first
    /// header.
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|source| SheetError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|source| SheetError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .iter()
            .map(|header| header.trim_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| SheetError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            rows.push(record.iter().map(ToString::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Write the table, header row first.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut writer =
            WriterBuilder::new()
                .from_path(path)
                .map_err(|source| SheetError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
        writer
            .write_record(&self.headers)
            .map_err(|source| SheetError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|source| SheetError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Index of a column by exact header name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Index of `name`, appending the column (and padding every row) when
    /// absent.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(index) = self.column_index(name) {
            return index;
        }
        self.headers.push(name.to_string());
        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
        width - 1
    }
}
