//! Application state and key dispatch.
//!
//! One `App` instance is mutated only from the UI event loop: keys feed
//! `on_key`, and `on_frame` runs once per redraw to drain the worker inbox,
//! expire notices, and advance the activity monitor.

use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::api::{ApiEvent, ApiJob, Inbox, JobKind};
use crate::constants::NOTICE_TTL_SECS;
use crate::model::{
    Account, AccountStats, AddChannelRequest, AssignBotsRequest, BotConfig, BulkRegisterRequest,
    Channel, ChatMessage, LogEntry, RegisterRequest,
};
use crate::monitor::{ActivityMonitor, BotRank, BotStats, SampleSource, StyleShare, SyntheticSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Accounts,
    Channels,
    Activity,
    Chat,
    Logs,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Accounts, Tab::Channels, Tab::Activity, Tab::Chat, Tab::Logs]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Accounts => "Accounts",
            Tab::Channels => "Channels",
            Tab::Activity => "Activity",
            Tab::Chat => "Chat",
            Tab::Logs => "Logs",
        }
    }

    pub fn index(&self) -> usize {
        Tab::all().iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(&self) -> Tab {
        let all = Tab::all();
        all[(self.index() + 1) % all.len()]
    }

    fn prev(&self) -> Tab {
        let all = Tab::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub at: Instant,
}

#[derive(Debug, Clone)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    pub mask: bool,
}

impl TextField {
    fn new(label: &'static str) -> Self {
        Self { label, value: String::new(), mask: false }
    }

    fn masked(label: &'static str) -> Self {
        Self { label, value: String::new(), mask: true }
    }
}

#[derive(Debug, Clone)]
pub enum FormKind {
    Register,
    BulkRegister,
    AddChannel,
    AssignBots { channel_id: String, channel_name: String },
}

/// A modal form made of text fields; Enter validates and submits, Esc
/// cancels. Validation failures keep the form open.
#[derive(Debug, Clone)]
pub struct TextForm {
    pub kind: FormKind,
    pub fields: Vec<TextField>,
    pub focus: usize,
}

impl TextForm {
    pub fn register() -> Self {
        Self {
            kind: FormKind::Register,
            fields: vec![
                TextField::new("Username"),
                TextField::new("Email"),
                TextField::masked("Password"),
            ],
            focus: 0,
        }
    }

    pub fn bulk_register() -> Self {
        Self {
            kind: FormKind::BulkRegister,
            fields: vec![
                TextField::new("Count"),
                TextField::new("Username prefix"),
                TextField::new("Email domain"),
            ],
            focus: 0,
        }
    }

    pub fn add_channel() -> Self {
        Self {
            kind: FormKind::AddChannel,
            fields: vec![
                TextField::new("Name"),
                TextField::new("URL"),
                TextField::new("Target viewers"),
            ],
            focus: 0,
        }
    }

    pub fn assign_bots(channel: &Channel) -> Self {
        Self {
            kind: FormKind::AssignBots {
                channel_id: channel.id.clone(),
                channel_name: channel.name.clone(),
            },
            fields: vec![TextField::new("Bot count")],
            focus: 0,
        }
    }

    pub fn title(&self) -> String {
        match &self.kind {
            FormKind::Register => "Register account".to_string(),
            FormKind::BulkRegister => "Bulk registration".to_string(),
            FormKind::AddChannel => "Add channel".to_string(),
            FormKind::AssignBots { channel_name, .. } => {
                format!("Assign bots to {channel_name}")
            }
        }
    }

    fn field(&self, i: usize) -> &str {
        self.fields[i].value.trim()
    }

    /// Check required fields and build the request; an `Err` names the
    /// first problem found and blocks submission.
    pub fn submit(&self) -> Result<ApiJob, String> {
        for f in &self.fields {
            if f.value.trim().is_empty() {
                return Err(format!("{} is required", f.label));
            }
        }
        match &self.kind {
            FormKind::Register => {
                if !self.field(1).contains('@') {
                    return Err("email looks invalid".to_string());
                }
                Ok(ApiJob::Register(RegisterRequest {
                    username: self.field(0).to_string(),
                    email: self.field(1).to_string(),
                    password: self.field(2).to_string(),
                }))
            }
            FormKind::BulkRegister => {
                let count: u32 = self
                    .field(0)
                    .parse()
                    .map_err(|_| "count must be a number".to_string())?;
                if count == 0 {
                    return Err("count must be at least 1".to_string());
                }
                Ok(ApiJob::BulkRegister(BulkRegisterRequest {
                    count,
                    prefix: self.field(1).to_string(),
                    email_domain: self.field(2).to_string(),
                }))
            }
            FormKind::AddChannel => {
                if url::Url::parse(self.field(1)).is_err() {
                    return Err("URL looks invalid".to_string());
                }
                let target_viewers: u64 = self
                    .field(2)
                    .parse()
                    .map_err(|_| "target viewers must be a number".to_string())?;
                Ok(ApiJob::AddChannel(AddChannelRequest {
                    name: self.field(0).to_string(),
                    url: self.field(1).to_string(),
                    target_viewers,
                }))
            }
            FormKind::AssignBots { channel_id, .. } => {
                let bot_count: u32 = self
                    .field(0)
                    .parse()
                    .map_err(|_| "bot count must be a number".to_string())?;
                if bot_count == 0 {
                    return Err("bot count must be at least 1".to_string());
                }
                Ok(ApiJob::AssignBots(AssignBotsRequest {
                    channel_id: channel_id.clone(),
                    bot_count,
                }))
            }
        }
    }
}

/// Per-channel bot tuning overlay. Rows are edited with arrows/space.
#[derive(Debug, Clone)]
pub struct ConfigForm {
    pub channel_name: String,
    pub config: BotConfig,
    pub focus: usize,
}

impl ConfigForm {
    pub const ROWS: usize = 5;

    pub fn new(channel: &Channel) -> Self {
        Self {
            channel_name: channel.name.clone(),
            config: BotConfig::for_channel(&channel.id),
            focus: 0,
        }
    }
}

pub enum Overlay {
    Form(TextForm),
    Config(ConfigForm),
    ConfirmDelete { id: String, username: String },
}

pub struct App {
    pub tab: Tab,
    pub should_quit: bool,

    pub accounts: Vec<Account>,
    pub account_stats: AccountStats,
    pub account_cursor: usize,

    pub channels: Vec<Channel>,
    pub channel_cursor: usize,

    pub chat: Vec<ChatMessage>,
    pub chat_channel: Option<(String, String)>,
    pub chat_scroll: usize,

    pub logs: Vec<LogEntry>,
    pub log_scroll: usize,

    pub monitor: ActivityMonitor,
    source: Box<dyn SampleSource>,
    pub bot_stats: BotStats,
    pub distribution: Vec<StyleShare>,
    pub top_bots: Vec<BotRank>,

    pub overlay: Option<Overlay>,
    pub notice: Option<Notice>,
    pub endpoint_host: String,

    jobs: Sender<ApiJob>,
    inbox: Inbox,
}

impl App {
    pub fn new(jobs: Sender<ApiJob>, inbox: Inbox, endpoint_host: String, period: Duration) -> Self {
        Self::with_source(jobs, inbox, endpoint_host, period, Box::new(SyntheticSource::new()))
    }

    pub fn with_source(
        jobs: Sender<ApiJob>,
        inbox: Inbox,
        endpoint_host: String,
        period: Duration,
        source: Box<dyn SampleSource>,
    ) -> Self {
        let mut app = Self {
            tab: Tab::Accounts,
            should_quit: false,
            accounts: Vec::new(),
            account_stats: AccountStats::default(),
            account_cursor: 0,
            channels: Vec::new(),
            channel_cursor: 0,
            chat: Vec::new(),
            chat_channel: None,
            chat_scroll: 0,
            logs: Vec::new(),
            log_scroll: 0,
            monitor: ActivityMonitor::new(crate::constants::WINDOW_CAPACITY, period),
            source,
            bot_stats: BotStats::seeded(),
            distribution: StyleShare::demo_breakdown(),
            top_bots: BotRank::demo_leaderboard(),
            overlay: None,
            notice: None,
            endpoint_host,
            jobs,
            inbox,
        };
        // Charts should not be empty before the first live tick.
        let n = app.monitor.capacity();
        app.monitor.seed(n, app.source.as_mut());
        app.request(ApiJob::FetchAccounts);
        app.request(ApiJob::FetchLogs);
        app.request(ApiJob::FetchChannels);
        app
    }

    pub fn notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice { text: text.into(), kind, at: Instant::now() });
    }

    fn request(&mut self, job: ApiJob) {
        if self.jobs.send(job).is_err() {
            tracing::error!("background worker is gone; request dropped");
            self.notice(NoticeKind::Error, "background worker stopped");
        }
    }

    pub fn selected_account(&self) -> Option<&Account> {
        self.accounts.get(self.account_cursor)
    }

    pub fn selected_channel(&self) -> Option<&Channel> {
        self.channels.get(self.channel_cursor)
    }

    // ------------------------------------------------------------------
    // Keys
    // ------------------------------------------------------------------

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.overlay.is_some() {
            self.on_overlay_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.prev(),
            KeyCode::Char(c @ '1'..='5') => {
                self.tab = Tab::all()[(c as usize) - ('1' as usize)];
            }
            _ => self.on_tab_key(key),
        }
    }

    fn on_tab_key(&mut self, key: KeyEvent) {
        match self.tab {
            Tab::Accounts => match key.code {
                KeyCode::Up => self.account_cursor = self.account_cursor.saturating_sub(1),
                KeyCode::Down => {
                    if self.account_cursor + 1 < self.accounts.len() {
                        self.account_cursor += 1;
                    }
                }
                KeyCode::Char('n') => self.overlay = Some(Overlay::Form(TextForm::register())),
                KeyCode::Char('b') => self.overlay = Some(Overlay::Form(TextForm::bulk_register())),
                KeyCode::Char('d') => {
                    if let Some(account) = self.selected_account() {
                        self.overlay = Some(Overlay::ConfirmDelete {
                            id: account.id.clone(),
                            username: account.username.clone(),
                        });
                    }
                }
                KeyCode::Char('r') => {
                    self.request(ApiJob::FetchAccounts);
                    self.notice(NoticeKind::Info, "refreshing accounts");
                }
                _ => {}
            },
            Tab::Channels => match key.code {
                KeyCode::Up => self.channel_cursor = self.channel_cursor.saturating_sub(1),
                KeyCode::Down => {
                    if self.channel_cursor + 1 < self.channels.len() {
                        self.channel_cursor += 1;
                    }
                }
                KeyCode::Char('a') => self.overlay = Some(Overlay::Form(TextForm::add_channel())),
                KeyCode::Char('g') => {
                    if let Some(channel) = self.selected_channel() {
                        self.overlay = Some(Overlay::Form(TextForm::assign_bots(channel)));
                    }
                }
                KeyCode::Char('c') => {
                    if let Some(channel) = self.selected_channel() {
                        self.overlay = Some(Overlay::Config(ConfigForm::new(channel)));
                    }
                }
                KeyCode::Char('s') => {
                    if let Some(channel) = self.selected_channel() {
                        let id = channel.id.clone();
                        self.request(ApiJob::StartBots { channel_id: id });
                    }
                }
                KeyCode::Char('x') => {
                    if let Some(channel) = self.selected_channel() {
                        let id = channel.id.clone();
                        self.request(ApiJob::StopBots { channel_id: id });
                    }
                }
                KeyCode::Enter => {
                    if let Some(channel) = self.selected_channel() {
                        let id = channel.id.clone();
                        let name = channel.name.clone();
                        self.chat_channel = Some((id.clone(), name));
                        self.chat.clear();
                        self.chat_scroll = 0;
                        self.request(ApiJob::FetchChat { channel_id: id });
                        self.tab = Tab::Chat;
                    }
                }
                KeyCode::Char('r') => {
                    self.request(ApiJob::FetchChannels);
                    self.notice(NoticeKind::Info, "refreshing channels");
                }
                _ => {}
            },
            Tab::Activity => {
                if key.code == KeyCode::Char(' ') {
                    self.toggle_live();
                }
            }
            Tab::Chat => match key.code {
                KeyCode::Up => self.chat_scroll = self.chat_scroll.saturating_add(1),
                KeyCode::Down => self.chat_scroll = self.chat_scroll.saturating_sub(1),
                KeyCode::Char('r') => {
                    if let Some((id, _)) = self.chat_channel.clone() {
                        self.request(ApiJob::FetchChat { channel_id: id });
                        self.notice(NoticeKind::Info, "refreshing chat");
                    } else {
                        self.notice(NoticeKind::Info, "select a channel first (Enter on Channels)");
                    }
                }
                _ => {}
            },
            Tab::Logs => match key.code {
                KeyCode::Up => self.log_scroll = self.log_scroll.saturating_sub(1),
                KeyCode::Down => {
                    if self.log_scroll + 1 < self.logs.len() {
                        self.log_scroll += 1;
                    }
                }
                KeyCode::Char('r') => {
                    self.request(ApiJob::FetchLogs);
                    self.notice(NoticeKind::Info, "refreshing logs");
                }
                _ => {}
            },
        }
    }

    fn on_overlay_key(&mut self, key: KeyEvent) {
        let Some(overlay) = self.overlay.take() else { return };
        match overlay {
            Overlay::Form(mut form) => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => match form.submit() {
                    Ok(job) => {
                        self.notice(NoticeKind::Info, format!("{} sent", job.kind().label()));
                        self.request(job);
                    }
                    Err(problem) => {
                        self.notice(NoticeKind::Error, problem);
                        self.overlay = Some(Overlay::Form(form));
                    }
                },
                KeyCode::Tab | KeyCode::Down => {
                    form.focus = (form.focus + 1) % form.fields.len();
                    self.overlay = Some(Overlay::Form(form));
                }
                KeyCode::BackTab | KeyCode::Up => {
                    form.focus = (form.focus + form.fields.len() - 1) % form.fields.len();
                    self.overlay = Some(Overlay::Form(form));
                }
                KeyCode::Backspace => {
                    form.fields[form.focus].value.pop();
                    self.overlay = Some(Overlay::Form(form));
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    form.fields[form.focus].value.push(c);
                    self.overlay = Some(Overlay::Form(form));
                }
                _ => self.overlay = Some(Overlay::Form(form)),
            },
            Overlay::Config(mut form) => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => {
                    self.notice(NoticeKind::Info, "saving bot config");
                    let config = form.config.clone();
                    self.request(ApiJob::SaveBotConfig(config));
                }
                KeyCode::Up => {
                    form.focus = (form.focus + ConfigForm::ROWS - 1) % ConfigForm::ROWS;
                    self.overlay = Some(Overlay::Config(form));
                }
                KeyCode::Down | KeyCode::Tab => {
                    form.focus = (form.focus + 1) % ConfigForm::ROWS;
                    self.overlay = Some(Overlay::Config(form));
                }
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                    let right = key.code != KeyCode::Left;
                    match form.focus {
                        0 => form.config.enabled = !form.config.enabled,
                        1 => {
                            let f = form.config.message_frequency;
                            form.config.message_frequency = if right {
                                (f + 1).min(10)
                            } else {
                                (f - 1).max(1)
                            };
                        }
                        2 => form.config.activity_level = form.config.activity_level.next(),
                        3 => form.config.message_style = form.config.message_style.next(),
                        _ => {
                            form.config.use_context_analysis = !form.config.use_context_analysis
                        }
                    }
                    self.overlay = Some(Overlay::Config(form));
                }
                _ => self.overlay = Some(Overlay::Config(form)),
            },
            Overlay::ConfirmDelete { id, username } => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.notice(NoticeKind::Info, format!("removing {username}"));
                    self.request(ApiJob::DeleteAccount { id });
                }
                KeyCode::Esc | KeyCode::Char('n') => {}
                _ => self.overlay = Some(Overlay::ConfirmDelete { id, username }),
            },
        }
    }

    // ------------------------------------------------------------------
    // Live activity
    // ------------------------------------------------------------------

    /// Live/paused toggle. Resuming rebuilds the window from a fresh seed;
    /// nothing carries over between live sessions.
    pub fn toggle_live(&mut self) {
        if self.monitor.is_live() {
            self.monitor.stop();
            self.notice(NoticeKind::Info, "live polling paused");
        } else {
            let n = self.monitor.capacity();
            self.monitor.seed(n, self.source.as_mut());
            self.monitor.start();
            self.bot_stats = BotStats::seeded();
            self.notice(NoticeKind::Success, "live polling started");
        }
    }

    // ------------------------------------------------------------------
    // Per-frame upkeep
    // ------------------------------------------------------------------

    pub fn on_frame(&mut self) {
        self.drain_inbox();
        if let Some(notice) = &self.notice {
            if notice.at.elapsed() > Duration::from_secs(NOTICE_TTL_SECS) {
                self.notice = None;
            }
        }
        self.monitor.poll(self.source.as_mut());
    }

    fn drain_inbox(&mut self) {
        let events: Vec<ApiEvent> = self.inbox.lock().unwrap().drain(..).collect();
        for event in events {
            self.apply_event(event);
        }
    }

    pub fn apply_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Accounts(resp) => {
                self.accounts = resp.accounts;
                self.account_stats = resp.stats;
                if self.account_cursor >= self.accounts.len() {
                    self.account_cursor = self.accounts.len().saturating_sub(1);
                }
            }
            ApiEvent::Logs(logs) => {
                self.logs = logs;
                self.log_scroll = 0;
            }
            ApiEvent::Channels(channels) => {
                self.channels = channels;
                if self.channel_cursor >= self.channels.len() {
                    self.channel_cursor = self.channels.len().saturating_sub(1);
                }
            }
            ApiEvent::Chat { channel_id, messages } => {
                // Stale replies for a previously selected channel are dropped.
                if self
                    .chat_channel
                    .as_ref()
                    .map(|(id, _)| *id == channel_id)
                    .unwrap_or(false)
                {
                    self.chat = messages;
                    self.chat_scroll = 0;
                }
            }
            ApiEvent::ActionDone { kind, message } => {
                self.notice(NoticeKind::Success, message);
                for job in readback_jobs(kind) {
                    self.request(job);
                }
            }
            ApiEvent::Failed { kind, error } => {
                self.notice(NoticeKind::Error, format!("{} failed: {error}", kind.label()));
            }
        }
    }
}

/// Which views to refetch after a mutating action succeeds.
fn readback_jobs(kind: JobKind) -> Vec<ApiJob> {
    match kind {
        JobKind::Register | JobKind::BulkRegister | JobKind::DeleteAccount => {
            vec![ApiJob::FetchAccounts, ApiJob::FetchLogs]
        }
        JobKind::AddChannel
        | JobKind::AssignBots
        | JobKind::StartBots
        | JobKind::StopBots
        | JobKind::BotConfig => vec![ApiJob::FetchChannels, ApiJob::FetchLogs],
        JobKind::Accounts | JobKind::Logs | JobKind::Channels | JobKind::Chat => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::new_inbox;
    use crate::model::{ChannelStatus, ListResponse};
    use std::sync::mpsc;

    fn test_app() -> (App, mpsc::Receiver<ApiJob>) {
        let (tx, rx) = mpsc::channel();
        let app = App::new(tx, new_inbox(), "example.dev".into(), Duration::from_millis(10));
        // App::new queues its initial fetches; discard them so assertions
        // below only see what the test itself triggers.
        while rx.try_recv().is_ok() {}
        (app, rx)
    }

    fn channel(id: &str, name: &str) -> Channel {
        Channel {
            id: id.into(),
            name: name.into(),
            url: format!("https://example.tv/{name}"),
            target_viewers: 50,
            active_bots: 3,
            status: ChannelStatus::Live,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn tab_cycling_wraps_both_ways() {
        assert_eq!(Tab::Logs.next(), Tab::Accounts);
        assert_eq!(Tab::Accounts.prev(), Tab::Logs);
        assert_eq!(Tab::Accounts.next(), Tab::Channels);
    }

    #[test]
    fn empty_register_form_is_blocked() {
        let form = TextForm::register();
        let err = form.submit().unwrap_err();
        assert!(err.contains("required"));
    }

    #[test]
    fn register_form_rejects_mailless_email() {
        let mut form = TextForm::register();
        form.fields[0].value = "bot_user_006".into();
        form.fields[1].value = "not-an-email".into();
        form.fields[2].value = "hunter2".into();
        assert_eq!(form.submit().unwrap_err(), "email looks invalid");
    }

    #[test]
    fn valid_register_form_builds_the_job() {
        let mut form = TextForm::register();
        form.fields[0].value = "bot_user_006".into();
        form.fields[1].value = "bot006@example.com".into();
        form.fields[2].value = "hunter2".into();
        let job = form.submit().unwrap();
        assert_eq!(job.kind(), JobKind::Register);
    }

    #[test]
    fn bulk_form_rejects_zero_count() {
        let mut form = TextForm::bulk_register();
        form.fields[0].value = "0".into();
        form.fields[1].value = "bot_user_".into();
        form.fields[2].value = "example.com".into();
        assert!(form.submit().is_err());
    }

    #[test]
    fn assign_form_carries_the_channel() {
        let mut form = TextForm::assign_bots(&channel("c9", "streamer"));
        form.fields[0].value = "15".into();
        match form.submit().unwrap() {
            ApiJob::AssignBots(req) => {
                assert_eq!(req.channel_id, "c9");
                assert_eq!(req.bot_count, 15);
            }
            other => panic!("unexpected job {other:?}"),
        }
    }

    #[test]
    fn successful_action_triggers_readback() {
        let (mut app, rx) = test_app();
        app.apply_event(ApiEvent::ActionDone {
            kind: JobKind::Register,
            message: "account created".into(),
        });
        let kinds: Vec<JobKind> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|j| j.kind())
            .collect();
        assert_eq!(kinds, vec![JobKind::Accounts, JobKind::Logs]);
        assert_eq!(app.notice.as_ref().unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn failed_action_surfaces_an_error_notice() {
        let (mut app, _rx) = test_app();
        app.apply_event(ApiEvent::Failed {
            kind: JobKind::StartBots,
            error: "503 service unavailable".into(),
        });
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.contains("start bots"));
    }

    #[test]
    fn account_list_replaces_rows_and_clamps_the_cursor() {
        let (mut app, _rx) = test_app();
        app.account_cursor = 7;
        app.apply_event(ApiEvent::Accounts(ListResponse {
            accounts: Vec::new(),
            stats: AccountStats { total: 0, active: 0, pending: 0, banned: 0 },
        }));
        assert_eq!(app.account_cursor, 0);
    }

    #[test]
    fn stale_chat_replies_are_dropped() {
        let (mut app, _rx) = test_app();
        app.chat_channel = Some(("c2".into(), "other".into()));
        app.apply_event(ApiEvent::Chat { channel_id: "c1".into(), messages: Vec::new() });
        assert!(app.chat_channel.as_ref().unwrap().0 == "c2");
        assert!(app.chat.is_empty());
    }

    #[test]
    fn toggling_live_reseeds_and_starts() {
        let (mut app, _rx) = test_app();
        assert!(!app.monitor.is_live());
        app.toggle_live();
        assert!(app.monitor.is_live());
        assert_eq!(app.monitor.len(), app.monitor.capacity());
        app.toggle_live();
        assert!(!app.monitor.is_live());
    }

    #[test]
    fn overlay_swallows_global_keys() {
        let (mut app, _rx) = test_app();
        app.overlay = Some(Overlay::Form(TextForm::register()));
        app.on_key(press(KeyCode::Char('q')));
        assert!(!app.should_quit);
        match app.overlay.as_ref().unwrap() {
            Overlay::Form(form) => assert_eq!(form.fields[0].value, "q"),
            _ => panic!("form should still be open"),
        }
    }

    #[test]
    fn invalid_submit_keeps_the_form_open() {
        let (mut app, _rx) = test_app();
        app.overlay = Some(Overlay::Form(TextForm::register()));
        app.on_key(press(KeyCode::Enter));
        assert!(matches!(app.overlay, Some(Overlay::Form(_))));
        assert_eq!(app.notice.as_ref().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn escape_closes_the_overlay() {
        let (mut app, _rx) = test_app();
        app.overlay = Some(Overlay::Form(TextForm::register()));
        app.on_key(press(KeyCode::Esc));
        assert!(app.overlay.is_none());
    }

    #[test]
    fn config_form_clamps_frequency() {
        let (mut app, _rx) = test_app();
        let mut form = ConfigForm::new(&channel("c1", "streamer"));
        form.focus = 1;
        app.overlay = Some(Overlay::Config(form));
        for _ in 0..20 {
            app.on_key(press(KeyCode::Right));
        }
        match app.overlay.as_ref().unwrap() {
            Overlay::Config(f) => assert_eq!(f.config.message_frequency, 10),
            _ => panic!("config form should still be open"),
        }
        for _ in 0..20 {
            app.on_key(press(KeyCode::Left));
        }
        match app.overlay.as_ref().unwrap() {
            Overlay::Config(f) => assert_eq!(f.config.message_frequency, 1),
            _ => panic!("config form should still be open"),
        }
    }

    #[test]
    fn delete_confirmation_sends_the_job() {
        let (mut app, rx) = test_app();
        app.overlay = Some(Overlay::ConfirmDelete { id: "5".into(), username: "bot_user_005".into() });
        app.on_key(press(KeyCode::Char('y')));
        assert!(app.overlay.is_none());
        match rx.try_recv().unwrap() {
            ApiJob::DeleteAccount { id } => assert_eq!(id, "5"),
            other => panic!("unexpected job {other:?}"),
        }
    }
}
