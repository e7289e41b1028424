//! File format detection and dispatch.
//!
//! The two supported formats live in a tagged variant with a static codec
//! table (extension, MIME type, reader, writer), so every format decision is
//! one enum dispatch rather than scattered string comparisons.

pub(crate) mod csv;
pub(crate) mod xlsx;

use crate::error::DataSweeperError;
use crate::table::Table;
use std::ffi::OsStr;
use std::path::Path;
use thiserror::Error;

/// Errors raised by format detection.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The one recoverable pipeline error: an upload that is neither CSV nor Excel
    #[error("Unsupported file format for '{0}': expected a .csv or .xlsx file")]
    UnsupportedFormat(String),
}

/// A supported tabular file format.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
}

struct Codec {
    extension: &'static str,
    mime_type: &'static str,
    reader: fn(&[u8]) -> Result<Table, DataSweeperError>,
    writer: fn(&Table) -> Result<Vec<u8>, DataSweeperError>,
}

static CODECS: [Codec; 2] = [
    Codec {
        extension: "csv",
        mime_type: "text/csv",
        reader: csv::read,
        writer: csv::write,
    },
    Codec {
        extension: "xlsx",
        mime_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        reader: xlsx::read,
        writer: xlsx::write,
    },
];

impl FileFormat {
    const ALL: [FileFormat; 2] = [FileFormat::Csv, FileFormat::Xlsx];

    fn codec(self) -> &'static Codec {
        &CODECS[self as usize]
    }

    /// Detects the format from a file name's extension, case-insensitively.
    pub fn detect(file_name: &str) -> Result<FileFormat, FormatError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase);
        Self::ALL
            .into_iter()
            .find(|format| Some(format.extension()) == extension.as_deref())
            .ok_or_else(|| FormatError::UnsupportedFormat(file_name.to_owned()))
    }

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        self.codec().extension
    }

    /// MIME type attached to export artifacts of this format.
    pub fn mime_type(self) -> &'static str {
        self.codec().mime_type
    }

    /// Parses raw file bytes into a table.
    pub fn read(self, bytes: &[u8]) -> Result<Table, DataSweeperError> {
        (self.codec().reader)(bytes)
    }

    /// Serializes a table into an in-memory byte buffer.
    pub fn write(self, table: &Table) -> Result<Vec<u8>, DataSweeperError> {
        (self.codec().writer)(table)
    }

    /// Derives an export file name by swapping the original extension for
    /// this format's.
    pub fn replace_extension(self, file_name: &str) -> String {
        Path::new(file_name)
            .with_extension(self.extension())
            .to_string_lossy()
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_is_case_insensitive() {
        assert_eq!(FileFormat::detect("data.csv").unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::detect("DATA.CSV").unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::detect("report.xlsx").unwrap(), FileFormat::Xlsx);
        assert_eq!(FileFormat::detect("report.XlSx").unwrap(), FileFormat::Xlsx);
    }

    #[test]
    fn detect_rejects_other_extensions() {
        for name in ["notes.txt", "archive.zip", "data.xls", "noextension", "data.csv.bak"] {
            assert!(matches!(
                FileFormat::detect(name),
                Err(FormatError::UnsupportedFormat(reported)) if reported == name
            ));
        }
    }

    #[test]
    fn mime_types() {
        assert_eq!(FileFormat::Csv.mime_type(), "text/csv");
        assert_eq!(
            FileFormat::Xlsx.mime_type(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }

    #[test]
    fn replace_extension_swaps_only_the_extension() {
        assert_eq!(FileFormat::Xlsx.replace_extension("data.csv"), "data.xlsx");
        assert_eq!(FileFormat::Csv.replace_extension("report.XLSX"), "report.csv");
        assert_eq!(
            FileFormat::Csv.replace_extension("my.data.csv"),
            "my.data.csv"
        );
    }
}
