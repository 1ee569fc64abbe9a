//! `POST /functions/v1/admin-update`

use crate::error::UpdateError;
use crate::state::AppState;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use folio_access::{AuthorizationError, UpdateRequest, UpdateResponse};
use folio_content::{ContentError, Mutation};
use std::sync::Arc;
use tracing::{info, instrument};

/// Applies one content mutation on behalf of an allow-listed admin.
///
/// The caller is re-checked against the allow-list on every call, before the
/// table or payload are even looked at. A failed lookup refuses the call.
#[instrument(skip_all)]
pub async fn admin_update(
    State(state): State<Arc<AppState>>,
    body: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<UpdateResponse>, UpdateError> {
    let Json(request) = body?;

    let discord_id = request
        .discord_id
        .ok_or(AuthorizationError::MissingIdentity)?;
    state
        .admins
        .require_admin(&discord_id)
        .await
        .map_err(|report| UpdateError::from(report.current_context().clone()))?;

    let mutation = Mutation::resolve(&request.table, request.data, request.id.as_deref())?;
    let (table, kind) = (mutation.table(), mutation.kind());

    let outcome = state
        .content
        .apply(mutation)
        .await
        .map_err(|report| UpdateError::from(report.current_context().clone()))?;

    info!(%discord_id, %table, kind, record = ?outcome.record_id(), "content updated");

    let data = serde_json::to_value(&outcome).map_err(ContentError::storage)?;
    Ok(Json(UpdateResponse::success(data)))
}
