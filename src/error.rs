use crate::format::FormatError;
use thiserror::Error;

/// Main error type for the data sweeper pipeline.
/// Aggregates errors from the standard library, dependencies, and internal modules.
#[derive(Error, Debug)]
pub enum DataSweeperError {
    #[error("{0}")]
    WithContextError(String),

    #[error("{0}")]
    AnyhowError(#[from] anyhow::Error),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    #[error("{0}")]
    ParseFloatError(#[from] std::num::ParseFloatError),

    #[error("{0}")]
    StringEncodingError(#[from] std::str::Utf8Error),

    // Third-party library errors
    #[error("{0}")]
    CsvError(#[from] csv::Error),

    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),

    // Helper module errors
    #[error("{0}")]
    XmlHelperError(#[from] crate::helpers::xml::XmlError),

    // Table module errors
    #[error("{0}")]
    TableError(#[from] crate::table::TableError),

    // Format module errors
    #[error("{0}")]
    FormatError(#[from] FormatError),

    #[error("{0}")]
    XlsxError(#[from] crate::format::xlsx::XlsxError),

    // Pipeline module errors
    #[error("{0}")]
    PipelineError(#[from] crate::pipeline::PipelineError),
}

impl DataSweeperError {
    /// True for the one error kind the pipeline recovers from: an upload whose
    /// extension is neither `.csv` nor `.xlsx`.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(
            self,
            DataSweeperError::FormatError(FormatError::UnsupportedFormat(_))
        )
    }
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, DataSweeperError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| DataSweeperError::WithContextError(format!("{}: {}", message, e)))
    }
}
