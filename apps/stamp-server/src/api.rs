//! API endpoint handlers

use axum::{extract::Multipart, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;

use crate::error::ServerError;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// A PDF download: status, content headers, body bytes
type PdfResponse = (StatusCode, [(String, String); 2], Vec<u8>);

fn pdf_response(filename: &str, bytes: Vec<u8>) -> PdfResponse {
    (
        StatusCode::OK,
        [
            ("Content-Type".to_string(), "application/pdf".to_string()),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
}

/// Health check endpoint
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "stamp-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Apply a list of placement actions to an uploaded PDF
///
/// Multipart fields: `file` (the PDF) and `actions` (the JSON action
/// list). Responds with the edited document named `edited_<original>`.
pub async fn handle_apply(mut multipart: Multipart) -> Result<PdfResponse, ServerError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut actions_json: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::InvalidRequest(format!("malformed multipart body: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let name = field
                    .file_name()
                    .unwrap_or("document.pdf")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    ServerError::InvalidRequest(format!("could not read file field: {}", e))
                })?;
                file = Some((name, data.to_vec()));
            }
            Some("actions") => {
                let text = field.text().await.map_err(|e| {
                    ServerError::InvalidRequest(format!("could not read actions field: {}", e))
                })?;
                actions_json = Some(text);
            }
            _ => {}
        }
    }

    let (name, bytes) =
        file.ok_or_else(|| ServerError::InvalidRequest("missing 'file' field".to_string()))?;
    let actions_json = actions_json
        .ok_or_else(|| ServerError::InvalidRequest("missing 'actions' field".to_string()))?;

    let list = stamp_core::parse_action_list(&actions_json)?;
    let (output, outcome) = stamp_core::apply_actions(&bytes, &list)?;

    info!(
        applied = outcome.applied,
        skipped = outcome.skipped,
        "stamped {}",
        name
    );

    Ok(pdf_response(&format!("edited_{}", name), output))
}

/// Merge two or more uploaded PDFs into one, in upload order
///
/// Multipart field `files`, repeated once per document. Responds with
/// `merged.pdf`.
pub async fn handle_merge(mut multipart: Multipart) -> Result<PdfResponse, ServerError> {
    let mut documents = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::InvalidRequest(format!("malformed multipart body: {}", e)))?
    {
        if field.name() == Some("files") {
            let data = field.bytes().await.map_err(|e| {
                ServerError::InvalidRequest(format!("could not read files field: {}", e))
            })?;
            documents.push(data.to_vec());
        }
    }

    if documents.len() < 2 {
        return Err(ServerError::InvalidRequest(
            "merge requires at least two files".to_string(),
        ));
    }

    let count = documents.len();
    let merged = stamp_core::merge_documents(documents)?;

    info!(files = count, "merged documents");

    Ok(pdf_response("merged.pdf", merged))
}
