//! Data model for the endpoint's JSON payloads.
//!
//! Timestamps arrive pre-formatted by the endpoint and are kept as display
//! strings; unknown fields are ignored on decode.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Pending,
    Banned,
}

impl AccountStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Pending => "pending",
            AccountStatus::Banned => "banned",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub username: String,
    pub email: String,
    pub status: AccountStatus,
    pub created_at: String,
    pub last_used: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AccountStats {
    pub total: u64,
    pub active: u64,
    pub pending: u64,
    pub banned: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub stats: AccountStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogsResponse {
    pub logs: Vec<LogEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
    Live,
    Offline,
    #[serde(other)]
    Unknown,
}

impl ChannelStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ChannelStatus::Live => "live",
            ChannelStatus::Offline => "offline",
            ChannelStatus::Unknown => "-",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub url: String,
    pub target_viewers: u64,
    pub active_bots: u64,
    pub status: ChannelStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelsResponse {
    pub channels: Vec<Channel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageState {
    Sent,
    Pending,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub username: String,
    pub message: String,
    pub sent_at: String,
    pub status: MessageState,
    #[serde(default)]
    pub is_ai_generated: bool,
    #[serde(default)]
    pub context_used: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub messages: Vec<ChatMessage>,
}

/// Generic acknowledgement for mutating actions.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRegisterRequest {
    pub count: u32,
    pub prefix: String,
    pub email_domain: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChannelRequest {
    pub name: String,
    pub url: String,
    pub target_viewers: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignBotsRequest {
    pub channel_id: String,
    pub bot_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
}

impl ActivityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "low",
            ActivityLevel::Medium => "medium",
            ActivityLevel::High => "high",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ActivityLevel::Low => ActivityLevel::Medium,
            ActivityLevel::Medium => ActivityLevel::High,
            ActivityLevel::High => ActivityLevel::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStyle {
    Casual,
    Enthusiastic,
    Toxic,
    Supportive,
}

impl MessageStyle {
    pub fn label(&self) -> &'static str {
        match self {
            MessageStyle::Casual => "casual",
            MessageStyle::Enthusiastic => "enthusiastic",
            MessageStyle::Toxic => "toxic",
            MessageStyle::Supportive => "supportive",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            MessageStyle::Casual => MessageStyle::Enthusiastic,
            MessageStyle::Enthusiastic => MessageStyle::Toxic,
            MessageStyle::Toxic => MessageStyle::Supportive,
            MessageStyle::Supportive => MessageStyle::Casual,
        }
    }
}

/// Per-channel bot tuning, posted as `?action=bot-config`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    pub channel_id: String,
    pub message_frequency: u8,
    pub activity_level: ActivityLevel,
    pub message_style: MessageStyle,
    pub use_context_analysis: bool,
    pub enabled: bool,
}

impl BotConfig {
    pub fn for_channel(channel_id: &str) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            message_frequency: 5,
            activity_level: ActivityLevel::Medium,
            message_style: MessageStyle::Casual,
            use_context_analysis: true,
            enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_account_list_payload() {
        let body = r#"{
            "accounts": [
                {"id": "1", "username": "bot_user_001", "email": "bot001@example.com",
                 "status": "active", "createdAt": "2026-01-29", "lastUsed": "2026-01-30"},
                {"id": "3", "username": "bot_user_003", "email": "bot003@example.com",
                 "status": "pending", "createdAt": "2026-01-30", "lastUsed": "-"}
            ],
            "stats": {"total": 142, "active": 128, "pending": 9, "banned": 5}
        }"#;
        let resp: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.accounts.len(), 2);
        assert_eq!(resp.accounts[0].status, AccountStatus::Active);
        assert_eq!(resp.accounts[1].last_used, "-");
        assert_eq!(resp.stats.total, 142);
    }

    #[test]
    fn decodes_logs_with_type_field() {
        let body = r#"{"logs": [
            {"id": "1", "type": "success", "message": "account registered", "timestamp": "2026-01-30 14:32:15"},
            {"id": "2", "type": "error", "message": "email already in use", "timestamp": "2026-01-30 14:15:33"}
        ]}"#;
        let resp: LogsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.logs[0].kind, LogKind::Success);
        assert_eq!(resp.logs[1].kind, LogKind::Error);
    }

    #[test]
    fn decodes_channels_and_tolerates_unknown_status() {
        let body = r#"{"channels": [
            {"id": "c1", "name": "streamer_one", "url": "https://example.tv/streamer_one",
             "targetViewers": 120, "activeBots": 14, "status": "live"},
            {"id": "c2", "name": "streamer_two", "url": "https://example.tv/streamer_two",
             "targetViewers": 40, "activeBots": 0, "status": "starting"}
        ]}"#;
        let resp: ChannelsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.channels[0].status, ChannelStatus::Live);
        assert_eq!(resp.channels[1].status, ChannelStatus::Unknown);
        assert_eq!(resp.channels[0].target_viewers, 120);
    }

    #[test]
    fn decodes_chat_message_flags() {
        let body = r#"{"messages": [
            {"id": "m1", "username": "bot_user_042", "message": "nice clutch!",
             "sentAt": "14:32:15", "status": "sent", "isAiGenerated": true,
             "contextUsed": "gameplay screenshot"},
            {"id": "m2", "username": "bot_user_007", "message": "hello",
             "sentAt": "14:32:18", "status": "queued"}
        ]}"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(resp.messages[0].is_ai_generated);
        assert_eq!(resp.messages[0].context_used.as_deref(), Some("gameplay screenshot"));
        assert!(!resp.messages[1].is_ai_generated);
        assert_eq!(resp.messages[1].status, MessageState::Unknown);
    }

    #[test]
    fn bot_config_serializes_camel_case() {
        let cfg = BotConfig::for_channel("c1");
        let v = serde_json::to_value(&cfg).unwrap();
        assert_eq!(v["channelId"], "c1");
        assert_eq!(v["messageFrequency"], 5);
        assert_eq!(v["activityLevel"], "medium");
        assert_eq!(v["messageStyle"], "casual");
        assert_eq!(v["useContextAnalysis"], true);
        assert_eq!(v["enabled"], false);
    }

    #[test]
    fn error_body_decodes() {
        let resp: ErrorResponse = serde_json::from_str(r#"{"error": "username taken"}"#).unwrap();
        assert_eq!(resp.error, "username taken");
    }
}
