//! HTTP client for the admin functions.

use crate::api::{
    AdminApi, AdminCheckRequest, AdminCheckResponse, ExchangeRequest, ExchangeResponse,
    UpdateRequest, UpdateResponse,
};
use crate::error::ApiError;
use async_trait::async_trait;
use rootcause::prelude::Report;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

const EXCHANGE_FUNCTION: &str = "discord-auth";
const CHECK_FUNCTION: &str = "admin-check";
const UPDATE_FUNCTION: &str = "admin-update";

/// Calls the admin functions at `{base_url}/functions/v1/<name>`.
///
/// Failed calls still answer with a JSON body and a 400 status, so the body
/// is decoded regardless of status.
#[derive(Debug, Clone)]
pub struct FunctionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl FunctionsClient {
    /// Creates a client for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing connection pool.
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    /// Sends `key` as both `apikey` and bearer token on every call.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Returns the URL of the named function.
    #[must_use]
    pub fn function_url(&self, name: &str) -> String {
        format!("{}/functions/v1/{name}", self.base_url)
    }

    #[instrument(skip(self, body))]
    async fn invoke<B, R>(&self, function: &str, body: &B) -> Result<R, Report<ApiError>>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let mut request = self.http.post(self.function_url(function)).json(body);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| ApiError::Transport {
            function: function.to_string(),
            details: e.to_string(),
        })?;

        let status = response.status();
        debug!(%status, "function responded");

        let decoded = response.json::<R>().await.map_err(|e| ApiError::Decode {
            function: function.to_string(),
            details: format!("status {status}: {e}"),
        })?;
        Ok(decoded)
    }
}

#[async_trait]
impl AdminApi for FunctionsClient {
    async fn exchange_code(
        &self,
        request: &ExchangeRequest,
    ) -> Result<ExchangeResponse, Report<ApiError>> {
        self.invoke(EXCHANGE_FUNCTION, request).await
    }

    async fn check_admin(
        &self,
        request: &AdminCheckRequest,
    ) -> Result<AdminCheckResponse, Report<ApiError>> {
        self.invoke(CHECK_FUNCTION, request).await
    }

    async fn update(&self, request: &UpdateRequest) -> Result<UpdateResponse, Report<ApiError>> {
        self.invoke(UPDATE_FUNCTION, request).await
    }
}
