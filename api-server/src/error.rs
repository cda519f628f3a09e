use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/// Everything a leaderboard request can fail with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LeaderboardError {
    /// Caller supplied a missing or malformed field.
    Validation {
        message: String,
        code: &'static str,
    },
    /// Storage read or write failed; the message is internal and only logged.
    Persistence(String),
    NotFound {
        message: String,
        code: &'static str,
    },
}

impl LeaderboardError {
    pub(crate) fn validation(message: impl Into<String>, code: &'static str) -> Self {
        Self::Validation {
            message: message.into(),
            code,
        }
    }

    pub(crate) fn not_found(message: impl Into<String>, code: &'static str) -> Self {
        Self::NotFound {
            message: message.into(),
            code,
        }
    }

    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::Validation { code, .. } | Self::NotFound { code, .. } => code,
            Self::Persistence(_) => "persistence_error",
        }
    }

    fn public_message(&self) -> &str {
        match self {
            Self::Validation { message, .. } | Self::NotFound { message, .. } => message,
            Self::Persistence(_) => "leaderboard store error",
        }
    }
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { message, .. } => write!(f, "validation failed: {message}"),
            Self::Persistence(message) => write!(f, "persistence failed: {message}"),
            Self::NotFound { message, .. } => write!(f, "not found: {message}"),
        }
    }
}

impl std::error::Error for LeaderboardError {}

impl From<String> for LeaderboardError {
    fn from(message: String) -> Self {
        Self::Persistence(message)
    }
}

impl ResponseError for LeaderboardError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Persistence(message) = self {
            tracing::error!("leaderboard store error: {message}");
        }
        json_error_with_code(self.status_code(), self.public_message(), Some(self.code()))
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<&'a str>,
}

/// The single JSON error shape every endpoint answers with.
pub(crate) fn json_error_with_code(
    status: StatusCode,
    message: &str,
    error_code: Option<&str>,
) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody {
        success: false,
        error: message,
        error_code,
    })
}
