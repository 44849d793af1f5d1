//! Poster payload: common attribution fields plus one variant-specific body.

use serde::{Deserialize, Serialize};

/// Highest score a report or dimension can carry.
pub const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterPayload {
    pub title: String,
    #[serde(default)]
    pub user_nickname: String,
    #[serde(flatten)]
    pub content: PosterContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PosterContent {
    Report(ReportPoster),
    Achievement(AchievementPoster),
    Invite(InvitePoster),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosterKind {
    Report,
    Achievement,
    Invite,
}

impl PosterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosterKind::Report => "report",
            PosterKind::Achievement => "achievement",
            PosterKind::Invite => "invite",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPoster {
    pub score: u32,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementPoster {
    pub achievement_name: String,
    pub achievement_icon: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitePoster {
    #[serde(default)]
    pub invite_code: String,
}

impl PosterPayload {
    pub fn new(
        title: impl Into<String>,
        user_nickname: impl Into<String>,
        content: PosterContent,
    ) -> Self {
        Self {
            title: title.into(),
            user_nickname: user_nickname.into(),
            content,
        }
    }

    pub fn kind(&self) -> PosterKind {
        match &self.content {
            PosterContent::Report(_) => PosterKind::Report,
            PosterContent::Achievement(_) => PosterKind::Achievement,
            PosterContent::Invite(_) => PosterKind::Invite,
        }
    }

    /// Copy with every score clamped into `0..=MAX_SCORE` and the invite code
    /// trimmed. Use on data that did not come through client validation.
    pub fn normalized(&self) -> Self {
        let content = match &self.content {
            PosterContent::Report(report) => PosterContent::Report(ReportPoster {
                score: report.score.min(MAX_SCORE),
                dimensions: report
                    .dimensions
                    .iter()
                    .map(|d| Dimension {
                        name: d.name.clone(),
                        score: d.score.min(MAX_SCORE),
                    })
                    .collect(),
                description: report.description.clone(),
            }),
            PosterContent::Achievement(achievement) => {
                PosterContent::Achievement(achievement.clone())
            }
            PosterContent::Invite(invite) => PosterContent::Invite(InvitePoster {
                invite_code: invite.invite_code.trim().to_string(),
            }),
        };
        Self {
            title: self.title.clone(),
            user_nickname: self.user_nickname.clone(),
            content,
        }
    }
}

impl From<&api::types::TrainingReport> for ReportPoster {
    fn from(report: &api::types::TrainingReport) -> Self {
        Self {
            score: report.score,
            dimensions: report
                .dimensions
                .iter()
                .map(|d| Dimension {
                    name: d.name.clone(),
                    score: d.score,
                })
                .collect(),
            description: report.summary.clone(),
        }
    }
}

impl From<&api::types::Achievement> for AchievementPoster {
    fn from(achievement: &api::types::Achievement) -> Self {
        Self {
            achievement_name: achievement.name.clone(),
            achievement_icon: achievement.icon.clone(),
            description: achievement.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn report_payload_from_json() {
        let payload: PosterPayload = serde_json::from_value(json!({
            "type": "report",
            "title": "训练报告",
            "userNickname": "小林",
            "score": 82,
            "dimensions": [{ "name": "开场", "score": 90 }],
            "description": "完成一次训练对话"
        }))
        .unwrap();

        assert_eq!(payload.kind(), PosterKind::Report);
        assert_eq!(payload.user_nickname, "小林");
        match payload.content {
            PosterContent::Report(report) => {
                assert_eq!(report.score, 82);
                assert_eq!(report.dimensions.len(), 1);
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn invite_payload_defaults_code() {
        let payload: PosterPayload =
            serde_json::from_value(json!({ "type": "invite", "title": "邀请" })).unwrap();
        assert_eq!(
            payload.content,
            PosterContent::Invite(InvitePoster {
                invite_code: String::new()
            })
        );
    }

    #[test]
    fn normalized_clamps_scores() {
        let payload = PosterPayload::new(
            "t",
            "n",
            PosterContent::Report(ReportPoster {
                score: 140,
                dimensions: vec![Dimension {
                    name: "倾听".into(),
                    score: 101,
                }],
                description: String::new(),
            }),
        );
        let PosterContent::Report(report) = payload.normalized().content else {
            panic!("variant changed");
        };
        assert_eq!(report.score, 100);
        assert_eq!(report.dimensions[0].score, 100);
    }
}
