//! # Data Sweeper
//!
//! The processing core of an interactive tabular-file cleaning tool: upload
//! CSV and Excel files, preview them, clean them, and convert between the two
//! formats.
//!
//! ## Features
//!
//! - **Two formats**: `.csv` and `.xlsx`, detected case-insensitively from the
//!   file extension; anything else is reported and skipped per file
//! - **Per-file sessions**: each upload is parsed once into a persistent
//!   [`Session`] entry, so cleaning and projection compose across interactions
//! - **Cleaning operations**: duplicate-row removal and mean-fill of missing
//!   numeric values, independently triggerable in any order
//! - **Column projection**: destructive narrowing to an ordered column subset
//! - **Chart view**: bar-chart intent over the first two numeric columns
//! - **Conversion**: export the current table as CSV or XLSX with the matching
//!   filename and MIME type
//! - **Pure Rust workbook handling**: XLSX parsing and serialization stream
//!   quick-xml events over the ZIP container directly
//!
//! Rendering is a collaborator: the pipeline emits intents through the
//! [`Renderer`] trait and never draws anything itself.

mod error;
mod format;
mod helpers;
mod pipeline;
mod table;

pub use error::DataSweeperError;
pub use format::xlsx::XlsxError;
pub use format::FileFormat;
pub use format::FormatError;
pub use helpers::xml::XmlError;
pub use pipeline::BarChart;
pub use pipeline::ExportArtifact;
pub use pipeline::FileState;
pub use pipeline::FileSummary;
pub use pipeline::PipelineError;
pub use pipeline::Renderer;
pub use pipeline::Series;
pub use pipeline::Session;
pub use pipeline::UploadedFile;
pub use pipeline::PREVIEW_ROWS;
pub use table::Table;
pub use table::TableError;
pub use table::Value;
