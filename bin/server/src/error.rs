//! Boundary errors of the HTTP functions.
//!
//! Each function catches every fault and answers with its own structured
//! JSON body and a 400 status. Internal detail is logged, never returned,
//! except for content errors whose text is meant for the admin client.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_access::{
    AdminCheckResponse, AuthenticationError, AuthorizationError, ExchangeResponse, UpdateResponse,
};
use folio_content::ContentError;
use serde_json::json;
use std::fmt;

const INVALID_BODY: &str = "Invalid request body";

/// Failures of `discord-auth`.
#[derive(Debug)]
pub enum ExchangeError {
    /// The body was not the expected JSON.
    MalformedBody { details: String },
    /// The code could not be turned into an identity.
    Authentication(AuthenticationError),
}

impl From<JsonRejection> for ExchangeError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody {
            details: rejection.body_text(),
        }
    }
}

impl From<AuthenticationError> for ExchangeError {
    fn from(err: AuthenticationError) -> Self {
        Self::Authentication(err)
    }
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBody { details } => write!(f, "malformed exchange request: {details}"),
            Self::Authentication(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ExchangeError {}

impl IntoResponse for ExchangeError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::MalformedBody { .. } => {
                tracing::warn!(error = %self, "rejected exchange request");
                INVALID_BODY
            }
            Self::Authentication(err @ AuthenticationError::MissingCode) => {
                tracing::warn!(error = %self, "rejected exchange request");
                err.public_message()
            }
            Self::Authentication(err) => {
                tracing::error!(error = %self, "discord exchange failed");
                err.public_message()
            }
        };
        (
            StatusCode::BAD_REQUEST,
            Json(ExchangeResponse::failure(message)),
        )
            .into_response()
    }
}

/// Failures of `admin-check`.
#[derive(Debug)]
pub enum CheckError {
    /// The body was not the expected JSON.
    MalformedBody { details: String },
    /// No Discord id was supplied.
    MissingId,
    /// The allow-list lookup failed.
    Lookup { details: String },
}

impl From<JsonRejection> for CheckError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody {
            details: rejection.body_text(),
        }
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBody { details } => write!(f, "malformed check request: {details}"),
            Self::MissingId => write!(f, "no discord id supplied"),
            Self::Lookup { details } => write!(f, "admin lookup failed: {details}"),
        }
    }
}

impl std::error::Error for CheckError {}

impl IntoResponse for CheckError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::MalformedBody { .. } => {
                tracing::warn!(error = %self, "rejected check request");
                INVALID_BODY
            }
            Self::MissingId => {
                tracing::warn!(error = %self, "rejected check request");
                "Discord ID is required"
            }
            Self::Lookup { .. } => {
                tracing::error!(error = %self, "admin check failed");
                "Failed to check admin status"
            }
        };
        (
            StatusCode::BAD_REQUEST,
            Json(AdminCheckResponse::failure(message)),
        )
            .into_response()
    }
}

/// Failures of `admin-update`.
#[derive(Debug)]
pub enum UpdateError {
    /// The body was not the expected JSON.
    MalformedBody { details: String },
    /// The caller is not an admin, or that could not be established.
    Unauthorized(AuthorizationError),
    /// The mutation was rejected or the store failed.
    Content(ContentError),
}

impl From<JsonRejection> for UpdateError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody {
            details: rejection.body_text(),
        }
    }
}

impl From<AuthorizationError> for UpdateError {
    fn from(err: AuthorizationError) -> Self {
        Self::Unauthorized(err)
    }
}

impl From<ContentError> for UpdateError {
    fn from(err: ContentError) -> Self {
        Self::Content(err)
    }
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBody { details } => write!(f, "malformed update request: {details}"),
            Self::Unauthorized(err) => write!(f, "{err}"),
            Self::Content(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for UpdateError {}

impl IntoResponse for UpdateError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::MalformedBody { .. } => {
                tracing::warn!(error = %self, "rejected update request");
                INVALID_BODY.to_string()
            }
            Self::Unauthorized(AuthorizationError::MissingIdentity) => {
                tracing::warn!(error = %self, "unauthorized update");
                "Unauthorized".to_string()
            }
            Self::Unauthorized(AuthorizationError::NotAdmin { .. }) => {
                tracing::warn!(error = %self, "unauthorized update");
                "Unauthorized: Not an admin".to_string()
            }
            Self::Unauthorized(AuthorizationError::CheckFailed { .. }) => {
                tracing::error!(error = %self, "admin lookup failed, refusing update");
                "Unauthorized: Not an admin".to_string()
            }
            Self::Content(err @ ContentError::Storage { .. }) => {
                tracing::error!(error = %self, "content store failed");
                err.to_string()
            }
            Self::Content(err) => {
                tracing::warn!(error = %self, "rejected update");
                err.to_string()
            }
        };
        (
            StatusCode::BAD_REQUEST,
            Json(UpdateResponse::failure(message)),
        )
            .into_response()
    }
}

/// Failures of the public read endpoints.
#[derive(Debug)]
pub struct ReadError(pub ContentError);

impl IntoResponse for ReadError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "content read failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to load content" })),
        )
            .into_response()
    }
}
