//! `POST /functions/v1/admin-check`

use crate::error::CheckError;
use crate::state::AppState;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use folio_access::{AdminCheckRequest, AdminCheckResponse};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Reports whether a Discord id is on the admin allow-list.
///
/// An id that is not on the list is a normal negative answer, not an error.
#[instrument(skip_all)]
pub async fn admin_check(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AdminCheckRequest>, JsonRejection>,
) -> Result<Json<AdminCheckResponse>, CheckError> {
    let Json(request) = body?;

    let discord_id = request
        .discord_id
        .filter(|id| !id.is_blank())
        .ok_or(CheckError::MissingId)?;

    let admin = state
        .admins
        .find(&discord_id)
        .await
        .map_err(|report| CheckError::Lookup {
            details: report.current_context().to_string(),
        })?;

    debug!(%discord_id, is_admin = admin.is_some(), "admin check");
    Ok(Json(match admin {
        Some(admin) => AdminCheckResponse::admin(admin),
        None => AdminCheckResponse::not_admin(),
    }))
}
