//! Test doubles shared by the gate and reorder tests.

use crate::admin::AdminUser;
use crate::api::{
    AdminApi, AdminCheckRequest, AdminCheckResponse, ExchangeRequest, ExchangeResponse,
    UpdateRequest, UpdateResponse,
};
use crate::error::ApiError;
use crate::identity::DiscordUser;
use async_trait::async_trait;
use rootcause::prelude::Report;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Canned `AdminApi` that records every call.
pub(crate) struct FakeApi {
    pub exchange: Result<ExchangeResponse, ApiError>,
    pub check: Result<AdminCheckResponse, ApiError>,
    /// Answers for successive `update` calls; success once exhausted.
    pub update_results: Mutex<VecDeque<Result<UpdateResponse, ApiError>>>,
    pub updates: Mutex<Vec<UpdateRequest>>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            exchange: Ok(ExchangeResponse::failure("Discord credentials not configured")),
            check: Ok(AdminCheckResponse::not_admin()),
            update_results: Mutex::new(VecDeque::new()),
            updates: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    /// A fake where `user` logs in and is an admin.
    pub fn admin(user: DiscordUser) -> Self {
        let row = AdminUser::new(user.id.clone(), Some(user.username.clone()));
        Self {
            exchange: Ok(ExchangeResponse::success(user)),
            check: Ok(AdminCheckResponse::admin(row)),
            ..Self::default()
        }
    }

    pub fn with_update_results(
        self,
        results: impl IntoIterator<Item = Result<UpdateResponse, ApiError>>,
    ) -> Self {
        *self.update_results.lock().expect("lock") = results.into_iter().collect();
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn updates(&self) -> Vec<UpdateRequest> {
        self.updates.lock().expect("lock").clone()
    }

    fn record(&self, function: &'static str) {
        self.calls.lock().expect("lock").push(function);
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn exchange_code(
        &self,
        _request: &ExchangeRequest,
    ) -> Result<ExchangeResponse, Report<ApiError>> {
        self.record("discord-auth");
        self.exchange.clone().map_err(Report::from)
    }

    async fn check_admin(
        &self,
        _request: &AdminCheckRequest,
    ) -> Result<AdminCheckResponse, Report<ApiError>> {
        self.record("admin-check");
        self.check.clone().map_err(Report::from)
    }

    async fn update(&self, request: &UpdateRequest) -> Result<UpdateResponse, Report<ApiError>> {
        self.record("admin-update");
        self.updates.lock().expect("lock").push(request.clone());
        let next = self.update_results.lock().expect("lock").pop_front();
        match next {
            Some(result) => result.map_err(Report::from),
            None => Ok(UpdateResponse::success(request.data.clone())),
        }
    }
}
