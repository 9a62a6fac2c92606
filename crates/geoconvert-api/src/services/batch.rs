use std::sync::Arc;

use geoconvert_core::export::{
    csv_file_name, to_delimited_text, to_kml_with_prefix, CSV_MIME, KML_FILE_NAME, KML_MIME,
};
use geoconvert_core::formats::FormatRegistry;
use geoconvert_core::{BatchOutput, BatchProcessor, ColumnMapping, Table};

use crate::dto::{ExportFormat, UploadedFile};
use crate::error::ApiError;
use crate::state::AppState;

/// Downloadable rendering of a batch result
#[derive(Debug)]
pub struct BatchArtifact {
    pub content_type: &'static str,
    pub file_name: &'static str,
    pub body: String,
}

/// Reads uploaded tables and converts them off the async runtime
pub struct BatchService;

impl BatchService {
    /// Parse an uploaded CSV or XLSX file
    pub async fn read_table(state: Arc<AppState>, file: UploadedFile) -> Result<Table, ApiError> {
        run_blocking(move || {
            let registry = FormatRegistry::with_defaults(state.config.input_delimiter.value);
            let reader = registry.reader_for_extension(file.extension())?;
            let table = reader.read_bytes(&file.data)?;

            tracing::info!(
                file = %file.name,
                format = reader.format_name(),
                rows = table.row_count(),
                columns = table.column_count(),
                "Table uploaded"
            );
            Ok(table)
        })
        .await
    }

    /// Convert every row of `table`
    pub async fn convert(
        state: Arc<AppState>,
        table: Table,
        mapping: ColumnMapping,
    ) -> Result<BatchOutput, ApiError> {
        run_blocking(move || {
            let output = BatchProcessor::new(&state.converter).process(&table, &mapping)?;
            Ok(output)
        })
        .await
    }

    /// Render a batch result as a KML or CSV download
    pub fn export(
        state: &AppState,
        output: &BatchOutput,
        format: ExportFormat,
    ) -> Result<BatchArtifact, ApiError> {
        match format {
            ExportFormat::Kml => Ok(BatchArtifact {
                content_type: KML_MIME,
                file_name: KML_FILE_NAME,
                body: to_kml_with_prefix(&output.points(), &state.config.placemark_prefix.value)?,
            }),
            ExportFormat::Csv => Ok(BatchArtifact {
                content_type: CSV_MIME,
                file_name: csv_file_name(output.direction),
                body: to_delimited_text(&output.to_table(), state.config.output_delimiter.value)?,
            }),
            ExportFormat::Json => Err(ApiError::internal("JSON results are not a file artifact")),
        }
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, geoconvert_core::GeoconvertError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::internal("Background task failed").with_details(e.to_string()))?
        .map_err(ApiError::from)
}
