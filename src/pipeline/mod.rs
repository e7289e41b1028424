//! The per-file processing pipeline.
//!
//! A [`Session`] holds one [`FileState`] per uploaded file, keyed by file
//! name and kept in upload order. Files are parsed once, on upload; cleaning
//! and projection mutate the persisted table so that repeated interactions
//! compose instead of re-deriving from the raw upload. Files never interact
//! with each other, and a file that fails format detection is reported and
//! skipped without affecting its siblings.

mod chart;
mod render;

pub use chart::BarChart;
pub use chart::Series;
pub use render::FileSummary;
pub use render::Renderer;

use crate::error::DataSweeperError;
use crate::error::ResultMessage;
use crate::format::FileFormat;
use crate::table::Table;
use thiserror::Error;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Number of rows shown by the inspect step's preview.
pub const PREVIEW_ROWS: usize = 5;

/// Errors raised by the pipeline surface.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// An operation addressed a file that was never uploaded (or was skipped)
    #[error("No uploaded file named '{0}'")]
    FileNotFound(String),
}

/// An uploaded file handle: name (with extension) plus raw content.
#[derive(Clone, Debug)]
pub struct UploadedFile {
    name: String,
    data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> UploadedFile {
        UploadedFile {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Size in KiB, unrounded.
    pub fn size_kib(&self) -> f64 {
        self.data.len() as f64 / 1024.0
    }
}

/// One uploaded file's pipeline state: the parsed table plus which cleaning
/// operations have been applied to it.
#[derive(Debug)]
pub struct FileState {
    file: UploadedFile,
    format: FileFormat,
    table: Table,
    deduplicated: bool,
    filled: bool,
    projected: bool,
}

impl FileState {
    /// Parses an upload into pipeline state. Format detection failures and
    /// parse failures both surface here.
    fn parse(file: UploadedFile) -> Result<FileState, DataSweeperError> {
        let format = FileFormat::detect(&file.name)?;
        let table = format.read(&file.data)?;
        debug!(
            file = file.name.as_str(),
            rows = table.row_count(),
            columns = table.column_count(),
            "parsed upload"
        );
        Ok(FileState {
            file,
            format,
            table,
            deduplicated: false,
            filled: false,
            projected: false,
        })
    }

    pub fn name(&self) -> &str {
        self.file.name()
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// The current table, reflecting every operation applied so far.
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn deduplicated(&self) -> bool {
        self.deduplicated
    }

    pub fn filled(&self) -> bool {
        self.filled
    }

    pub fn projected(&self) -> bool {
        self.projected
    }
}

/// A serialized export: raw bytes plus the filename and MIME type to offer
/// them under.
#[derive(Clone, Debug)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Session state for one user: the uploaded files and their pipeline states,
/// in upload order. Created on first upload, torn down on drop.
#[derive(Debug, Default)]
pub struct Session {
    files: Vec<FileState>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// File names in upload order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(FileState::name)
    }

    /// Looks up a file's state without failing.
    pub fn get(&self, file_name: &str) -> Option<&FileState> {
        self.files.iter().find(|state| state.name() == file_name)
    }

    fn state(&self, file_name: &str) -> Result<&FileState, PipelineError> {
        self.get(file_name)
            .ok_or_else(|| PipelineError::FileNotFound(file_name.to_owned()))
    }

    fn state_mut(&mut self, file_name: &str) -> Result<&mut FileState, PipelineError> {
        self.files
            .iter_mut()
            .find(|state| state.name() == file_name)
            .ok_or_else(|| PipelineError::FileNotFound(file_name.to_owned()))
    }

    /// Accepts uploads in order, parsing each into per-file state.
    ///
    /// An unsupported extension is reported through the renderer and that
    /// file is skipped; remaining files still process. Any other parse
    /// failure aborts the upload and propagates. Re-uploading a name
    /// re-derives that file's state from the new content.
    pub fn upload(
        &mut self,
        uploads: Vec<UploadedFile>,
        renderer: &mut dyn Renderer,
    ) -> Result<(), DataSweeperError> {
        for file in uploads {
            let file_name = file.name().to_owned();
            match FileState::parse(file) {
                Ok(state) => {
                    info!(file = file_name.as_str(), "upload accepted");
                    match self.files.iter().position(|it| it.name() == file_name) {
                        Some(index) => self.files[index] = state,
                        None => self.files.push(state),
                    }
                }
                Err(error) if error.is_unsupported_format() => {
                    warn!(file = file_name.as_str(), "unsupported upload skipped");
                    renderer.unsupported_format(&file_name, &error.to_string());
                }
                Err(error) => return Err(error),
            }
        }
        Ok(())
    }

    /// Emits a file's name, size, and first-rows preview as render intents.
    /// Read-only; the table is not touched.
    pub fn inspect(
        &self,
        file_name: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<(), DataSweeperError> {
        let state = self.state(file_name)?;
        renderer.file_summary(&FileSummary {
            file_name: state.name().to_owned(),
            size_kib: state.file.size_kib(),
        });
        renderer.preview(
            state.name(),
            state.table.columns(),
            state.table.head(PREVIEW_ROWS),
        );
        Ok(())
    }

    /// Removes duplicate rows from a file's table; returns the removed count.
    pub fn deduplicate(&mut self, file_name: &str) -> Result<usize, DataSweeperError> {
        let state = self.state_mut(file_name)?;
        let removed = state.table.drop_duplicates();
        state.deduplicated = true;
        info!(file = file_name, removed, "duplicates removed");
        Ok(removed)
    }

    /// Mean-fills missing numeric cells in a file's table; returns the number
    /// of cells filled.
    pub fn fill_missing(&mut self, file_name: &str) -> Result<usize, DataSweeperError> {
        let state = self.state_mut(file_name)?;
        let filled = state.table.fill_missing();
        state.filled = true;
        info!(file = file_name, filled, "missing values filled");
        Ok(filled)
    }

    /// Projects a file's table to the given columns, in the given order.
    /// Cleaning already applied stays applied; dropped columns are gone for
    /// every later step.
    pub fn select_columns(
        &mut self,
        file_name: &str,
        selection: &[String],
    ) -> Result<(), DataSweeperError> {
        let state = self.state_mut(file_name)?;
        state.table.select(selection)?;
        state.projected = true;
        info!(file = file_name, columns = selection.len(), "columns selected");
        Ok(())
    }

    /// Emits a bar-chart intent over the current (post-projection) table.
    pub fn chart(
        &self,
        file_name: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<(), DataSweeperError> {
        let state = self.state(file_name)?;
        renderer.chart(file_name, &BarChart::from_table(&state.table));
        Ok(())
    }

    /// Serializes the current table to the target format, derives the export
    /// filename by swapping the extension, and emits the artifact as a
    /// download intent. Serialization failures propagate; there is no retry.
    pub fn export(
        &self,
        file_name: &str,
        target: FileFormat,
        renderer: &mut dyn Renderer,
    ) -> Result<ExportArtifact, DataSweeperError> {
        let state = self.state(file_name)?;
        let bytes = target
            .write(&state.table)
            .with_prefix(&format!("Convert '{}'", file_name))?;
        let artifact = ExportArtifact {
            file_name: target.replace_extension(file_name),
            mime_type: target.mime_type(),
            bytes,
        };
        info!(
            file = file_name,
            export = artifact.file_name.as_str(),
            size = artifact.bytes.len(),
            "export ready"
        );
        renderer.export_ready(&artifact);
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FileFormat;
    use crate::table::Value;

    /// Captures every intent the pipeline emits.
    #[derive(Default)]
    struct RecordingRenderer {
        unsupported: Vec<String>,
        summaries: Vec<FileSummary>,
        previews: Vec<(String, usize)>,
        charts: Vec<(String, BarChart)>,
        exports: Vec<(String, String)>,
    }

    impl Renderer for RecordingRenderer {
        fn unsupported_format(&mut self, file_name: &str, _message: &str) {
            self.unsupported.push(file_name.to_owned());
        }

        fn file_summary(&mut self, summary: &FileSummary) {
            self.summaries.push(summary.clone());
        }

        fn preview(&mut self, file_name: &str, _columns: &[String], rows: &[Vec<Value>]) {
            self.previews.push((file_name.to_owned(), rows.len()));
        }

        fn chart(&mut self, file_name: &str, chart: &BarChart) {
            self.charts.push((file_name.to_owned(), chart.clone()));
        }

        fn export_ready(&mut self, artifact: &ExportArtifact) {
            self.exports
                .push((artifact.file_name.clone(), artifact.mime_type.to_owned()));
        }
    }

    fn upload(name: &str, bytes: &[u8]) -> UploadedFile {
        UploadedFile::new(name, bytes.to_vec())
    }

    #[test]
    fn unsupported_upload_is_skipped_but_siblings_process() {
        let mut session = Session::new();
        let mut renderer = RecordingRenderer::default();
        session
            .upload(
                vec![
                    upload("left.csv", b"a\n1\n"),
                    upload("notes.txt", b"whatever"),
                    upload("right.csv", b"b\n2\n"),
                ],
                &mut renderer,
            )
            .unwrap();

        assert_eq!(renderer.unsupported, ["notes.txt"]);
        assert_eq!(
            session.file_names().collect::<Vec<_>>(),
            ["left.csv", "right.csv"]
        );
        assert!(session.get("notes.txt").is_none());
    }

    #[test]
    fn corrupt_supported_upload_propagates() {
        let mut session = Session::new();
        let mut renderer = RecordingRenderer::default();
        let result = session.upload(vec![upload("bad.xlsx", b"not a zip")], &mut renderer);
        assert!(result.is_err());
        assert!(renderer.unsupported.is_empty());
        assert!(session.is_empty());
    }

    #[test]
    fn inspect_reports_size_and_bounded_preview() {
        let mut session = Session::new();
        let mut renderer = RecordingRenderer::default();
        let bytes = b"a\n1\n2\n3\n4\n5\n6\n7\n";
        session
            .upload(vec![upload("data.csv", bytes)], &mut renderer)
            .unwrap();
        session.inspect("data.csv", &mut renderer).unwrap();

        assert_eq!(renderer.summaries.len(), 1);
        assert_eq!(renderer.summaries[0].file_name, "data.csv");
        assert_eq!(
            renderer.summaries[0].size_kib,
            bytes.len() as f64 / 1024.0
        );
        assert_eq!(renderer.previews, [("data.csv".to_owned(), PREVIEW_ROWS)]);
    }

    #[test]
    fn cleaning_operations_compose_across_interactions() {
        let mut session = Session::new();
        let mut renderer = RecordingRenderer::default();
        session
            .upload(vec![upload("data.csv", b"a,b\n1,\n2,5\n1,\n")], &mut renderer)
            .unwrap();

        assert_eq!(session.deduplicate("data.csv").unwrap(), 1);
        assert_eq!(session.fill_missing("data.csv").unwrap(), 1);

        let table = session.get("data.csv").unwrap().table();
        assert_eq!(
            table.rows(),
            [
                vec![Value::Number(1.0), Value::Number(5.0)],
                vec![Value::Number(2.0), Value::Number(5.0)],
            ]
        );

        let state = session.get("data.csv").unwrap();
        assert!(state.deduplicated());
        assert!(state.filled());
        assert!(!state.projected());
    }

    #[test]
    fn projection_persists_into_chart_and_export() {
        let mut session = Session::new();
        let mut renderer = RecordingRenderer::default();
        session
            .upload(
                vec![upload("data.csv", b"a,b\n1,4\n2,5\n3,6\n")],
                &mut renderer,
            )
            .unwrap();
        session
            .select_columns("data.csv", &["a".to_owned()])
            .unwrap();

        session.chart("data.csv", &mut renderer).unwrap();
        let (_, chart) = &renderer.charts[0];
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].name, "a");

        let artifact = session
            .export("data.csv", FileFormat::Xlsx, &mut renderer)
            .unwrap();
        assert_eq!(artifact.file_name, "data.xlsx");
        assert_eq!(
            artifact.mime_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );

        let exported = FileFormat::Xlsx.read(&artifact.bytes).unwrap();
        assert_eq!(exported.columns(), ["a"]);
        assert_eq!(
            exported.rows(),
            [
                vec![Value::Number(1.0)],
                vec![Value::Number(2.0)],
                vec![Value::Number(3.0)],
            ]
        );
    }

    #[test]
    fn export_to_csv_swaps_extension_and_emits_intent() {
        let mut session = Session::new();
        let mut renderer = RecordingRenderer::default();
        session
            .upload(vec![upload("report.csv", b"a\n1\n")], &mut renderer)
            .unwrap();
        let artifact = session
            .export("report.csv", FileFormat::Csv, &mut renderer)
            .unwrap();
        assert_eq!(artifact.file_name, "report.csv");
        assert_eq!(artifact.mime_type, "text/csv");
        assert_eq!(
            renderer.exports,
            [("report.csv".to_owned(), "text/csv".to_owned())]
        );
    }

    #[test]
    fn unknown_file_name_is_an_error() {
        let mut session = Session::new();
        let result = session.deduplicate("ghost.csv");
        assert!(matches!(
            result,
            Err(DataSweeperError::PipelineError(PipelineError::FileNotFound(name))) if name == "ghost.csv"
        ));
    }

    #[test]
    fn reupload_rederives_state() {
        let mut session = Session::new();
        let mut renderer = RecordingRenderer::default();
        session
            .upload(vec![upload("data.csv", b"a,b\n1,2\n")], &mut renderer)
            .unwrap();
        session
            .select_columns("data.csv", &["a".to_owned()])
            .unwrap();

        session
            .upload(vec![upload("data.csv", b"a,b\n3,4\n")], &mut renderer)
            .unwrap();
        let state = session.get("data.csv").unwrap();
        assert_eq!(state.table().columns(), ["a", "b"]);
        assert!(!state.projected());
        assert_eq!(session.len(), 1);
    }
}
