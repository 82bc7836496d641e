//! Client for the external control endpoint.
//!
//! The endpoint is a single URL that multiplexes actions through a query
//! parameter. Requests run on a background worker thread so the UI loop
//! never waits on the network; finished responses land in a shared inbox
//! the event loop drains once per frame. Every call is fire-once: failures
//! are reported, never retried.

use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::model::{
    ActionResponse, AddChannelRequest, AssignBotsRequest, BotConfig, BulkRegisterRequest, Channel,
    ChannelsResponse, ChatMessage, ChatResponse, ErrorResponse, ListResponse, LogEntry,
    LogsResponse, RegisterRequest,
};

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),
}

pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, base })
    }

    fn action_url(&self, action: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("action", action);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        url
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ApiError::Status { status, message });
        }
        serde_json::from_str(&body).map_err(ApiError::Decode)
    }

    fn get<T: DeserializeOwned>(&self, action: &str, params: &[(&str, &str)]) -> Result<T, ApiError> {
        let response = self.http.get(self.action_url(action, params)).send()?;
        Self::decode(response)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, action: &str, body: &B) -> Result<T, ApiError> {
        let response = self.http.post(self.action_url(action, &[])).json(body).send()?;
        Self::decode(response)
    }

    pub fn list_accounts(&self) -> Result<ListResponse, ApiError> {
        self.get("list", &[])
    }

    pub fn fetch_logs(&self) -> Result<Vec<LogEntry>, ApiError> {
        self.get::<LogsResponse>("logs", &[]).map(|r| r.logs)
    }

    pub fn list_channels(&self) -> Result<Vec<Channel>, ApiError> {
        self.get::<ChannelsResponse>("channels", &[]).map(|r| r.channels)
    }

    pub fn chat_messages(&self, channel_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        self.get::<ChatResponse>("chat-messages", &[("channelId", channel_id)])
            .map(|r| r.messages)
    }

    pub fn register(&self, req: &RegisterRequest) -> Result<ActionResponse, ApiError> {
        self.post("register", req)
    }

    pub fn bulk_register(&self, req: &BulkRegisterRequest) -> Result<ActionResponse, ApiError> {
        self.post("bulk-register", req)
    }

    pub fn add_channel(&self, req: &AddChannelRequest) -> Result<ActionResponse, ApiError> {
        self.post("add-channel", req)
    }

    pub fn assign_bots(&self, req: &AssignBotsRequest) -> Result<ActionResponse, ApiError> {
        self.post("assign-bots", req)
    }

    pub fn start_bots(&self, channel_id: &str) -> Result<ActionResponse, ApiError> {
        self.post("start-bots", &serde_json::json!({ "channelId": channel_id }))
    }

    pub fn stop_bots(&self, channel_id: &str) -> Result<ActionResponse, ApiError> {
        self.post("stop-bots", &serde_json::json!({ "channelId": channel_id }))
    }

    pub fn save_bot_config(&self, config: &BotConfig) -> Result<ActionResponse, ApiError> {
        self.post("bot-config", config)
    }

    /// Account removal is the one bare-verb call: DELETE on the base URL.
    pub fn delete_account(&self, id: &str) -> Result<ActionResponse, ApiError> {
        let response = self
            .http
            .delete(self.base.clone())
            .json(&serde_json::json!({ "id": id }))
            .send()?;
        Self::decode(response)
    }
}

/// Work the UI hands to the background thread.
#[derive(Debug)]
pub enum ApiJob {
    FetchAccounts,
    FetchLogs,
    FetchChannels,
    FetchChat { channel_id: String },
    Register(RegisterRequest),
    BulkRegister(BulkRegisterRequest),
    AddChannel(AddChannelRequest),
    AssignBots(AssignBotsRequest),
    StartBots { channel_id: String },
    StopBots { channel_id: String },
    SaveBotConfig(BotConfig),
    DeleteAccount { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Accounts,
    Logs,
    Channels,
    Chat,
    Register,
    BulkRegister,
    AddChannel,
    AssignBots,
    StartBots,
    StopBots,
    BotConfig,
    DeleteAccount,
}

impl JobKind {
    pub fn label(&self) -> &'static str {
        match self {
            JobKind::Accounts => "account list",
            JobKind::Logs => "log fetch",
            JobKind::Channels => "channel list",
            JobKind::Chat => "chat history",
            JobKind::Register => "registration",
            JobKind::BulkRegister => "bulk registration",
            JobKind::AddChannel => "add channel",
            JobKind::AssignBots => "bot assignment",
            JobKind::StartBots => "start bots",
            JobKind::StopBots => "stop bots",
            JobKind::BotConfig => "bot config",
            JobKind::DeleteAccount => "account removal",
        }
    }
}

impl ApiJob {
    pub fn kind(&self) -> JobKind {
        match self {
            ApiJob::FetchAccounts => JobKind::Accounts,
            ApiJob::FetchLogs => JobKind::Logs,
            ApiJob::FetchChannels => JobKind::Channels,
            ApiJob::FetchChat { .. } => JobKind::Chat,
            ApiJob::Register(_) => JobKind::Register,
            ApiJob::BulkRegister(_) => JobKind::BulkRegister,
            ApiJob::AddChannel(_) => JobKind::AddChannel,
            ApiJob::AssignBots(_) => JobKind::AssignBots,
            ApiJob::StartBots { .. } => JobKind::StartBots,
            ApiJob::StopBots { .. } => JobKind::StopBots,
            ApiJob::SaveBotConfig(_) => JobKind::BotConfig,
            ApiJob::DeleteAccount { .. } => JobKind::DeleteAccount,
        }
    }
}

/// What the worker posts back to the UI.
#[derive(Debug)]
pub enum ApiEvent {
    Accounts(ListResponse),
    Logs(Vec<LogEntry>),
    Channels(Vec<Channel>),
    Chat { channel_id: String, messages: Vec<ChatMessage> },
    ActionDone { kind: JobKind, message: String },
    Failed { kind: JobKind, error: String },
}

pub type Inbox = Arc<Mutex<Vec<ApiEvent>>>;

pub fn new_inbox() -> Inbox {
    Arc::new(Mutex::new(Vec::new()))
}

// Worker thread: drains the job queue for the lifetime of the program and
// parks each outcome in the inbox.
pub fn spawn_worker(client: ApiClient, jobs: Receiver<ApiJob>, inbox: Inbox) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(job) = jobs.recv() {
            let kind = job.kind();
            tracing::debug!(job = kind.label(), "dispatching endpoint request");
            let event = run_job(&client, job);
            if let ApiEvent::Failed { kind, error } = &event {
                tracing::warn!(job = kind.label(), %error, "endpoint request failed");
            }
            inbox.lock().unwrap().push(event);
        }
    })
}

fn run_job(client: &ApiClient, job: ApiJob) -> ApiEvent {
    let kind = job.kind();
    let result: Result<ApiEvent, ApiError> = match job {
        ApiJob::FetchAccounts => client.list_accounts().map(ApiEvent::Accounts),
        ApiJob::FetchLogs => client.fetch_logs().map(ApiEvent::Logs),
        ApiJob::FetchChannels => client.list_channels().map(ApiEvent::Channels),
        ApiJob::FetchChat { channel_id } => client
            .chat_messages(&channel_id)
            .map(|messages| ApiEvent::Chat { channel_id, messages }),
        ApiJob::Register(req) => client.register(&req).map(|r| done(kind, r)),
        ApiJob::BulkRegister(req) => client.bulk_register(&req).map(|r| done(kind, r)),
        ApiJob::AddChannel(req) => client.add_channel(&req).map(|r| done(kind, r)),
        ApiJob::AssignBots(req) => client.assign_bots(&req).map(|r| done(kind, r)),
        ApiJob::StartBots { channel_id } => client.start_bots(&channel_id).map(|r| done(kind, r)),
        ApiJob::StopBots { channel_id } => client.stop_bots(&channel_id).map(|r| done(kind, r)),
        ApiJob::SaveBotConfig(config) => client.save_bot_config(&config).map(|r| done(kind, r)),
        ApiJob::DeleteAccount { id } => client.delete_account(&id).map(|r| done(kind, r)),
    };
    result.unwrap_or_else(|e| ApiEvent::Failed { kind, error: e.to_string() })
}

fn done(kind: JobKind, response: ActionResponse) -> ApiEvent {
    let message = if response.message.is_empty() {
        format!("{} completed", kind.label())
    } else {
        response.message
    };
    ApiEvent::ActionDone { kind, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(Url::parse("https://functions.example.dev/api").unwrap()).unwrap()
    }

    #[test]
    fn action_url_carries_the_selector() {
        let url = client().action_url("list", &[]);
        assert_eq!(url.as_str(), "https://functions.example.dev/api?action=list");
    }

    #[test]
    fn action_url_appends_extra_params() {
        let url = client().action_url("chat-messages", &[("channelId", "c1")]);
        assert_eq!(
            url.as_str(),
            "https://functions.example.dev/api?action=chat-messages&channelId=c1"
        );
    }

    #[test]
    fn action_url_preserves_existing_query() {
        let base = Url::parse("https://functions.example.dev/api?key=abc").unwrap();
        let api = ApiClient::new(base).unwrap();
        let url = api.action_url("logs", &[]);
        assert_eq!(url.as_str(), "https://functions.example.dev/api?key=abc&action=logs");
    }

    #[test]
    fn job_kinds_round_trip_through_events() {
        let job = ApiJob::StartBots { channel_id: "c1".into() };
        assert_eq!(job.kind(), JobKind::StartBots);
        assert_eq!(JobKind::StartBots.label(), "start bots");
    }
}
