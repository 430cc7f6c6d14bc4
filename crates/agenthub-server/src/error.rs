use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use agenthub_core::error::{DashboardError, WizardError};

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unprocessable(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(m)
            | Self::NotFound(m)
            | Self::Conflict(m)
            | Self::Unprocessable(m) => {
                write!(f, "{m}")
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            Self::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            Self::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
            Self::Unprocessable(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::AgentNotFound(_) => Self::NotFound(err.to_string()),
            DashboardError::UnknownSortKey(_) => Self::BadRequest(err.to_string()),
        }
    }
}

impl From<WizardError> for AppError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::Validation { .. } => Self::Unprocessable(err.to_string()),
            WizardError::NoSuchConfiguration(_) => Self::NotFound(err.to_string()),
            WizardError::MultiAgentOnly | WizardError::LastConfiguration => {
                Self::Conflict(err.to_string())
            },
        }
    }
}
