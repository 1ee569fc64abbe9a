//! Public reads backing the showcase pages.

use crate::error::ReadError;
use crate::state::AppState;
use axum::{Json, extract::State};
use folio_content::{PortfolioProject, SiteSettings, Skill};
use std::sync::Arc;

/// `GET /api/site-settings`: the settings row, or `null` before one exists.
pub async fn site_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<SiteSettings>>, ReadError> {
    state
        .content
        .site_settings()
        .await
        .map(Json)
        .map_err(|report| ReadError(report.current_context().clone()))
}

/// `GET /api/skills`
pub async fn skills(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Skill>>, ReadError> {
    state
        .content
        .skills()
        .await
        .map(Json)
        .map_err(|report| ReadError(report.current_context().clone()))
}

/// `GET /api/portfolio-projects`
pub async fn portfolio_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PortfolioProject>>, ReadError> {
    state
        .content
        .projects()
        .await
        .map(Json)
        .map_err(|report| ReadError(report.current_context().clone()))
}

#[cfg(test)]
mod tests {
    use crate::functions::test_support::{app, get};
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn empty_site_reads_as_empty() {
        let app = app();
        assert_eq!(get(&app, "/api/site-settings").await, (StatusCode::OK, Value::Null));
        assert_eq!(get(&app, "/api/skills").await, (StatusCode::OK, json!([])));
        assert_eq!(
            get(&app, "/api/portfolio-projects").await,
            (StatusCode::OK, json!([]))
        );
    }
}
