//! `POST /functions/v1/discord-auth`

use crate::error::ExchangeError;
use crate::state::AppState;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use folio_access::{AuthenticationError, ExchangeRequest, ExchangeResponse};
use std::sync::Arc;
use tracing::{info, instrument};

/// Exchanges an OAuth code for the Discord identity that granted it.
#[instrument(skip_all)]
pub async fn discord_auth(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ExchangeRequest>, JsonRejection>,
) -> Result<Json<ExchangeResponse>, ExchangeError> {
    let Json(request) = body?;

    let provider = state
        .identity
        .as_ref()
        .ok_or(AuthenticationError::NotConfigured)?;

    let code = request
        .code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .ok_or(AuthenticationError::MissingCode)?;

    let user = provider
        .exchange_code(code, request.redirect_uri.as_deref().unwrap_or_default())
        .await
        .map_err(|report| ExchangeError::from(report.current_context().clone()))?;

    info!(discord_id = %user.id, "discord login");
    Ok(Json(ExchangeResponse::success(user)))
}
