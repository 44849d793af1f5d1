//! Wire types exchanged with the backend. Field names follow the backend's
//! camelCase JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub vip_level: u32,
    #[serde(default)]
    pub points: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub account: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub nickname: String,
    pub account: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// Generic acknowledgement body; every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Total item count when the backend reports it.
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub author_nickname: String,
    #[serde(default)]
    pub play_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingReport {
    pub session_id: String,
    pub scenario_title: String,
    pub score: u32,
    #[serde(default)]
    pub dimensions: Vec<DimensionScore>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub unlocked_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteCode {
    pub code: String,
    #[serde(default)]
    pub invited_count: u32,
    #[serde(default)]
    pub share_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub points_awarded: i64,
    #[serde(default)]
    pub streak_days: u32,
    #[serde(default)]
    pub total_points: i64,
}

/// Where a share action was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShareChannel {
    #[serde(rename = "wechat")]
    WeChat,
    #[serde(rename = "moments")]
    Moments,
    #[serde(rename = "copy_link")]
    CopyLink,
    #[serde(rename = "poster")]
    Poster,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareEvent {
    pub channel: ShareChannel,
    /// `report`, `achievement` or `invite`.
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_defaults_when_fields_missing() {
        let page: Page<ScenarioSummary> =
            serde_json::from_value(json!({ "items": [{ "id": "s1", "title": "陌拜开场" }] }))
                .unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total, None);
        assert_eq!(page.items[0].play_count, 0);
    }

    #[test]
    fn share_event_wire_shape() {
        let event = ShareEvent {
            channel: ShareChannel::CopyLink,
            content_type: "report".into(),
            content_id: None,
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "channel": "copy_link", "contentType": "report" })
        );
    }
}
