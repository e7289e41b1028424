//! The rendering collaborator boundary.
//!
//! The pipeline never draws anything; it emits these intents and a UI layer
//! decides how to present them. Implementations must not mutate pipeline
//! state through the intents they receive.

use crate::pipeline::BarChart;
use crate::pipeline::ExportArtifact;
use crate::table::Value;

/// File name plus size for the inspect step. Size is KiB as raw bytes / 1024,
/// unrounded.
#[derive(Clone, Debug, PartialEq)]
pub struct FileSummary {
    pub file_name: String,
    pub size_kib: f64,
}

/// Receives rendering intents emitted by [`Session`](crate::pipeline::Session)
/// operations.
pub trait Renderer {
    /// An upload whose extension is neither `.csv` nor `.xlsx`; the file was
    /// skipped, siblings still process.
    fn unsupported_format(&mut self, file_name: &str, message: &str);

    /// File name and size, emitted by the inspect step.
    fn file_summary(&mut self, summary: &FileSummary);

    /// The fixed-size head-of-table preview, emitted by the inspect step.
    fn preview(&mut self, file_name: &str, columns: &[String], rows: &[Vec<Value>]);

    /// A bar-chart view of the current table.
    fn chart(&mut self, file_name: &str, chart: &BarChart);

    /// A serialized export, ready to offer for download.
    fn export_ready(&mut self, artifact: &ExportArtifact);
}
