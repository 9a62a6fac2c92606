use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::dto::{BatchForm, BatchResponse, ExportFormat, PreviewResponse, UploadedFile};
use crate::error::ApiError;
use crate::services::BatchService;
use crate::state::AppState;

/// Rows returned by the preview endpoint
const PREVIEW_ROWS: usize = 5;

/// POST /api/v1/batch/preview
pub async fn handle_preview(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<PreviewResponse>, ApiError> {
    let mut form = read_form(multipart).await?;
    let file = form.take_file()?;
    let file_name = file.name.clone();

    let table = BatchService::read_table(state, file).await?;
    let head = table.head(PREVIEW_ROWS);

    Ok(Json(PreviewResponse {
        file_name,
        total_rows: table.row_count(),
        headers: head.headers,
        rows: head.rows,
    }))
}

/// POST /api/v1/batch
pub async fn handle_batch(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut form = read_form(multipart).await?;
    let mapping = form.mapping(state.config.hemisphere.value)?;
    let format = form.export_format()?;
    let file = form.take_file()?;

    tracing::info!(
        file = %file.name,
        size = file.data.len(),
        direction = ?mapping.direction(),
        ?format,
        "Processing batch request"
    );

    let table = BatchService::read_table(state.clone(), file).await?;
    let output = BatchService::convert(state.clone(), table, mapping).await?;

    if format == ExportFormat::Json {
        return Ok(Json(BatchResponse::from(&output)).into_response());
    }

    let artifact = BatchService::export(&state, &output, format)?;
    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.file_name),
            ),
        ],
        artifact.body,
    )
        .into_response())
}

async fn read_form(mut multipart: Multipart) -> Result<BatchForm, ApiError> {
    let mut form = BatchForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::bad_request("Failed to parse multipart form").with_details(e.to_string())
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            let file_name = field.file_name().unwrap_or("upload.csv").to_string();
            let data = field.bytes().await.map_err(|e| {
                ApiError::bad_request("Failed to read file data").with_details(e.to_string())
            })?;
            form.file = Some(UploadedFile {
                name: file_name,
                data: data.to_vec(),
            });
        } else {
            let value = field.text().await.map_err(|e| {
                ApiError::bad_request("Failed to read form field").with_details(e.to_string())
            })?;
            form.set_field(&name, value);
        }
    }

    Ok(form)
}
