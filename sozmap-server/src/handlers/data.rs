//! Word-map data handler

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sozmap_core::{map_rows, NodesResponse, SheetError};

pub const SPREADSHEET_NOT_FOUND: &str =
    "Google Sheet not found. Check the sheet name or permissions.";
pub const WORKSHEET_NOT_FOUND: &str = "Worksheet not found. Check the worksheet name.";

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An error ready to be sent to the client
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<SheetError> for ApiError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::SpreadsheetNotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: SPREADSHEET_NOT_FOUND.to_string(),
            },
            SheetError::WorksheetNotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: WORKSHEET_NOT_FOUND.to_string(),
            },
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("An unexpected error occurred: {}", other),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Read every row of the configured worksheet and return it as nodes
pub async fn get_data(State(state): State<AppState>) -> Result<Json<NodesResponse>, ApiError> {
    let rows = state
        .sheets
        .fetch_records(&state.spreadsheet, &state.worksheet)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                tracing::warn!("Word map lookup failed: {}", e);
            } else {
                tracing::error!("Failed to read word map: {}", e);
            }
            ApiError::from(e)
        })?;

    Ok(Json(NodesResponse::from(map_rows(&rows))))
}
