//! Typed wrappers over the backend routes this client uses.

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{
    Achievement, Ack, AuthResponse, CheckIn, InviteCode, LoginRequest, Page, PasswordChange,
    RegisterRequest, ScenarioSummary, ShareEvent, TrainingReport, UserProfile,
};

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.post_json("/api/v1/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.post_json("/api/v1/auth/register", request).await
    }

    pub async fn me(&self) -> Result<UserProfile> {
        self.get_json("/api/v1/users/me").await
    }

    pub async fn change_password(&self, request: &PasswordChange) -> Result<Ack> {
        self.put_json("/api/v1/users/me/password", request).await
    }

    pub async fn plaza(&self, page: u32, page_size: u32) -> Result<Page<ScenarioSummary>> {
        self.get_json(&format!(
            "/api/v1/scenarios/plaza?page={page}&pageSize={page_size}"
        ))
        .await
    }

    pub async fn training_report(&self, session_id: &str) -> Result<TrainingReport> {
        self.get_json(&format!("/api/v1/training/sessions/{session_id}/report"))
            .await
    }

    pub async fn achievements(&self) -> Result<Vec<Achievement>> {
        self.get_json("/api/v1/achievements").await
    }

    pub async fn invite_code(&self) -> Result<InviteCode> {
        self.get_json("/api/v1/social/invite-code").await
    }

    pub async fn check_in(&self) -> Result<CheckIn> {
        self.post_json("/api/v1/points/check-in", &serde_json::json!({}))
            .await
    }

    /// Record a share action. Best effort: callers log failures and move on.
    pub async fn track_share(&self, event: &ShareEvent) -> Result<Ack> {
        self.post_json("/api/v1/analytics/share", event).await
    }
}
