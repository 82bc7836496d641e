//! Terminal rendering and the main event loop.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        BarChart, Block, BorderType, Borders, Cell, Clear, Gauge, List, ListItem, Paragraph, Row,
        Table, TableState, Tabs,
    },
    Frame, Terminal,
};

use crate::app::{App, ConfigForm, NoticeKind, Overlay, Tab, TextForm};
use crate::constants::{BAR_WINDOW, FRAME_RATE_MS};
use crate::model::{AccountStatus, ChannelStatus, LogKind, MessageState};
use crate::util::{centered_rect, format_count, format_percent};

// Terminal state is restored here as well, so a panic in the draw path
// cannot strand the user in raw mode.
struct TerminalCleanup;

impl Drop for TerminalCleanup {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

pub fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let _cleanup = TerminalCleanup;
    let res = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run_loop<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let frame = Duration::from_millis(FRAME_RATE_MS);
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(frame)? {
            if let Event::Key(key) = event::read()? {
                app.on_key(key);
            }
        }
        app.on_frame();

        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8), Constraint::Length(1)])
        .split(f.size());

    render_tabs(f, app, chunks[0]);
    match app.tab {
        Tab::Accounts => render_accounts(f, app, chunks[1]),
        Tab::Channels => render_channels(f, app, chunks[1]),
        Tab::Activity => render_activity(f, app, chunks[1]),
        Tab::Chat => render_chat(f, app, chunks[1]),
        Tab::Logs => render_logs(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    if let Some(overlay) = &app.overlay {
        match overlay {
            Overlay::Form(form) => render_text_form(f, form),
            Overlay::Config(form) => render_config_form(f, form),
            Overlay::ConfirmDelete { username, .. } => render_confirm_delete(f, username),
        }
    }
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, t)| {
            Line::from(vec![
                Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(t.title()),
            ])
        })
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Bot Fleet Console "),
        );
    f.render_widget(tabs, area);
}

// ----------------------------------------------------------------------
// Accounts
// ----------------------------------------------------------------------

fn render_accounts(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(5)])
        .split(area);

    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(chunks[0]);

    let stats = &app.account_stats;
    render_tile(f, tiles[0], "Total accounts", format_count(stats.total), Color::White);
    render_tile(f, tiles[1], "Active", format_count(stats.active), Color::Green);
    render_tile(f, tiles[2], "Pending", format_count(stats.pending), Color::Yellow);
    render_tile(f, tiles[3], "Banned", format_count(stats.banned), Color::Red);

    let header_cells = ["Username", "Email", "Status", "Created", "Last used"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let rows = app.accounts.iter().map(|account| {
        let status_color = match account.status {
            AccountStatus::Active => Color::Green,
            AccountStatus::Pending => Color::Yellow,
            AccountStatus::Banned => Color::Red,
        };
        Row::new(vec![
            Cell::from(account.username.clone()),
            Cell::from(account.email.clone()).style(Style::default().fg(Color::DarkGray)),
            Cell::from(account.status.label()).style(Style::default().fg(status_color)),
            Cell::from(account.created_at.clone()).style(Style::default().fg(Color::DarkGray)),
            Cell::from(account.last_used.clone()).style(Style::default().fg(Color::DarkGray)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(22),
            Constraint::Percentage(30),
            Constraint::Percentage(12),
            Constraint::Percentage(18),
            Constraint::Percentage(18),
        ],
    )
    .header(header)
    .highlight_style(Style::default().bg(Color::Rgb(50, 50, 50)).add_modifier(Modifier::BOLD))
    .block(
        Block::default()
            .title(" Accounts [n]ew [b]ulk [d]elete [r]efresh ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );

    let mut state = TableState::default();
    state.select(if app.accounts.is_empty() { None } else { Some(app.account_cursor) });
    f.render_stateful_widget(table, chunks[1], &mut state);
}

// ----------------------------------------------------------------------
// Channels
// ----------------------------------------------------------------------

fn render_channels(f: &mut Frame, app: &App, area: Rect) {
    let header_cells = ["Name", "URL", "Target viewers", "Active bots", "Status"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let rows = app.channels.iter().map(|channel| {
        let status_color = match channel.status {
            ChannelStatus::Live => Color::Green,
            ChannelStatus::Offline => Color::DarkGray,
            ChannelStatus::Unknown => Color::DarkGray,
        };
        Row::new(vec![
            Cell::from(channel.name.clone()),
            Cell::from(channel.url.clone()).style(Style::default().fg(Color::DarkGray)),
            Cell::from(channel.target_viewers.to_string()),
            Cell::from(channel.active_bots.to_string()).style(Style::default().fg(Color::Cyan)),
            Cell::from(channel.status.label()).style(Style::default().fg(status_color)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(20),
            Constraint::Percentage(35),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
        ],
    )
    .header(header)
    .highlight_style(Style::default().bg(Color::Rgb(50, 50, 50)).add_modifier(Modifier::BOLD))
    .block(
        Block::default()
            .title(" Channels [a]dd [g]ive bots [s]tart [x]stop [c]onfig [Enter] chat ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );

    let mut state = TableState::default();
    state.select(if app.channels.is_empty() { None } else { Some(app.channel_cursor) });
    f.render_stateful_widget(table, area, &mut state);
}

// ----------------------------------------------------------------------
// Activity
// ----------------------------------------------------------------------

fn render_activity(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(10), Constraint::Length(8)])
        .split(area);

    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(chunks[0]);

    let active_bots = app.monitor.latest().map(|s| s.active_bots).unwrap_or(app.bot_stats.active_bots);
    render_tile(f, tiles[0], "Total messages", format_count(app.monitor.total_messages), Color::White);
    render_tile(f, tiles[1], "Active bots", active_bots.to_string(), Color::Cyan);
    render_tile(
        f,
        tiles[2],
        "Avg response",
        format!("{:.1}s", app.bot_stats.avg_response_secs),
        Color::Yellow,
    );
    render_tile(
        f,
        tiles[3],
        "Success rate",
        format!("{:.1}%", app.bot_stats.success_rate),
        Color::Green,
    );

    let live_title = if app.monitor.is_live() {
        Span::styled(" ● LIVE ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(" paused ", Style::default().fg(Color::DarkGray))
    };
    let monitor_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Activity (space toggles) ")
        .title(live_title);
    let inner = monitor_block.inner(chunks[1]);
    f.render_widget(monitor_block, chunks[1]);

    let graph_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(18),
            Constraint::Percentage(32),
        ])
        .split(inner);

    let chart_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(graph_chunks[0]);

    let messages: Vec<f64> = app.monitor.samples().map(|s| s.messages as f64).collect();
    let viewers: Vec<f64> = app.monitor.samples().map(|s| s.viewers as f64).collect();
    render_series_canvas(f, chart_chunks[0], "Messages", Color::Green, &messages, app.monitor.capacity());
    render_series_canvas(f, chart_chunks[1], "Viewers", Color::Blue, &viewers, app.monitor.capacity());

    render_window_stats(f, graph_chunks[1], app);
    render_bot_bars(f, graph_chunks[2], app);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[2]);
    render_distribution(f, bottom[0], app);
    render_top_bots(f, bottom[1], app);
}

fn render_series_canvas(f: &mut Frame, area: Rect, title: &str, color: Color, values: &[f64], capacity: usize) {
    let max = values.iter().cloned().fold(1.0, f64::max);
    let canvas = Canvas::default()
        .block(Block::default().title(title).title_style(Style::default().fg(color)))
        .marker(Marker::Braille)
        .x_bounds([0.0, capacity as f64])
        .y_bounds([0.0, max])
        .paint(|ctx| {
            for (i, &val) in values.iter().enumerate() {
                ctx.draw(&CanvasLine {
                    x1: i as f64,
                    y1: 0.0,
                    x2: i as f64,
                    y2: val,
                    color,
                });
            }
        });
    f.render_widget(canvas, area);
}

fn render_window_stats(f: &mut Frame, area: Rect, app: &App) {
    let current = app.monitor.latest().map(|s| s.messages).unwrap_or(0);
    let peak_at = app
        .monitor
        .peak_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let lines = vec![
        Line::from(vec![
            Span::raw("▲ "),
            Span::styled(
                format!("{} msgs", current),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Peak: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{}", app.monitor.peak_messages)),
        ]),
        Line::from(vec![
            Span::styled("  at:   ", Style::default().fg(Color::DarkGray)),
            Span::raw(peak_at),
        ]),
        Line::from(vec![
            Span::styled("  Win:  ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{}/{}", app.monitor.len(), app.monitor.capacity())),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().style(Style::default().fg(Color::Green))),
        area,
    );
}

fn render_bot_bars(f: &mut Frame, area: Rect, app: &App) {
    let recent: Vec<(String, u64)> = app
        .monitor
        .samples()
        .rev()
        .take(BAR_WINDOW)
        .map(|s| (s.at.format("%M:%S").to_string(), s.active_bots))
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    let data: Vec<(&str, u64)> = recent.iter().map(|(l, v)| (l.as_str(), *v)).collect();

    let chart = BarChart::default()
        .block(Block::default().title("Active bots").borders(Borders::LEFT))
        .data(&data)
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Magenta))
        .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    f.render_widget(chart, area);
}

fn render_distribution(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Message styles ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let total: u64 = app.distribution.iter().map(|s| s.count).sum();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); app.distribution.len()])
        .split(inner);

    for (share, row) in app.distribution.iter().zip(rows.iter()) {
        let ratio = if total == 0 { 0.0 } else { share.count as f64 / total as f64 };
        let gauge = Gauge::default()
            .ratio(ratio)
            .label(format!(
                "{} {} ({})",
                share.style,
                share.count,
                format_percent(share.count, total)
            ))
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Rgb(40, 40, 40)));
        f.render_widget(gauge, *row);
    }
}

fn render_top_bots(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .top_bots
        .iter()
        .enumerate()
        .map(|(i, bot)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(bot.name, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  {} msgs  ", bot.messages)),
                Span::styled(format!("{}%", bot.efficiency), Style::default().fg(Color::Green)),
            ]))
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .title(" Top bots ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(list, area);
}

// ----------------------------------------------------------------------
// Chat
// ----------------------------------------------------------------------

fn render_chat(f: &mut Frame, app: &App, area: Rect) {
    let title = match &app.chat_channel {
        Some((_, name)) => format!(" Chat: {name} [r]efresh "),
        None => " Chat (pick a channel on the Channels tab) ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let height = inner.height as usize;
    // Newest messages stick to the bottom; scrolling up moves the window back.
    let end = app.chat.len().saturating_sub(app.chat_scroll);
    let start = end.saturating_sub(height);

    let items: Vec<ListItem> = app.chat[start..end]
        .iter()
        .map(|msg| {
            let status_color = match msg.status {
                MessageState::Sent => Color::Green,
                MessageState::Pending => Color::Yellow,
                MessageState::Failed => Color::Red,
                MessageState::Unknown => Color::DarkGray,
            };
            let mut spans = vec![
                Span::styled(format!("[{}] ", msg.sent_at), Style::default().fg(Color::DarkGray)),
                Span::styled(&msg.username, Style::default().fg(Color::Cyan)),
                Span::raw(": "),
                Span::styled(&msg.message, Style::default().fg(status_color)),
            ];
            if msg.is_ai_generated {
                spans.push(Span::styled(" (ai)", Style::default().fg(Color::Magenta)));
            }
            if let Some(context) = &msg.context_used {
                spans.push(Span::styled(
                    format!(" [{context}]"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    f.render_widget(List::new(items), inner);
}

// ----------------------------------------------------------------------
// Logs
// ----------------------------------------------------------------------

fn render_logs(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Operation log [r]efresh ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let start = app.log_scroll.min(app.logs.len());
    let items: Vec<ListItem> = app.logs[start..]
        .iter()
        .take(inner.height as usize)
        .map(|log| {
            let (icon, color) = match log.kind {
                LogKind::Success => ("✔", Color::Green),
                LogKind::Error => ("✖", Color::Red),
                LogKind::Info => ("ℹ", Color::Blue),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{icon} "), Style::default().fg(color)),
                Span::styled(format!("{} ", log.timestamp), Style::default().fg(Color::DarkGray)),
                Span::raw(&log.message),
            ]))
        })
        .collect();
    f.render_widget(List::new(items), inner);
}

// ----------------------------------------------------------------------
// Shared pieces
// ----------------------------------------------------------------------

fn render_tile(f: &mut Frame, area: Rect, label: &str, value: String, color: Color) {
    let lines = vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(label.to_string(), Style::default().fg(Color::DarkGray))),
    ];
    let tile = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(tile, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mode = if app.monitor.is_live() {
        Span::styled("LIVE", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("paused", Style::default().fg(Color::DarkGray))
    };
    let mut spans = vec![
        Span::styled(
            " q quit │ tab/1-5 switch │ ",
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(app.endpoint_host.clone(), Style::default().fg(Color::Cyan)),
        Span::raw(" │ "),
        mode,
        Span::raw(" "),
    ];
    if let Some(notice) = &app.notice {
        let color = match notice.kind {
            NoticeKind::Info => Color::White,
            NoticeKind::Success => Color::Green,
            NoticeKind::Error => Color::Red,
        };
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(notice.text.clone(), Style::default().fg(color)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ----------------------------------------------------------------------
// Overlays
// ----------------------------------------------------------------------

fn render_text_form(f: &mut Frame, form: &TextForm) {
    let rows = form.fields.len() as u16 * 2 + 4;
    let area = overlay_rect(f.size(), 50, rows);
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints: Vec<Constraint> = Vec::new();
    for _ in &form.fields {
        constraints.push(Constraint::Length(2));
    }
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let shown = if field.mask {
            "•".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };
        let cursor = if focused { "_" } else { "" };
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let line = Line::from(vec![
            Span::styled(format!("{:<16}", field.label), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{shown}{cursor}"), style),
        ]);
        f.render_widget(Paragraph::new(line), chunks[i]);
    }
    f.render_widget(
        Paragraph::new(Span::styled(
            "Enter submit · Esc cancel · Tab next field",
            Style::default().fg(Color::DarkGray),
        )),
        chunks[form.fields.len()],
    );
}

fn render_config_form(f: &mut Frame, form: &ConfigForm) {
    let area = overlay_rect(f.size(), 56, ConfigForm::ROWS as u16 + 4);
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" Bot tuning: {} ", form.channel_name))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cfg = &form.config;
    let freq_meter = format!(
        "[{}{}] {}/10",
        "█".repeat(cfg.message_frequency as usize),
        "░".repeat(10 - cfg.message_frequency as usize),
        cfg.message_frequency
    );
    let rows: [(&str, String); ConfigForm::ROWS] = [
        ("Enabled", if cfg.enabled { "on".into() } else { "off".into() }),
        ("Message frequency", freq_meter),
        ("Activity level", cfg.activity_level.label().to_string()),
        ("Message style", cfg.message_style.label().to_string()),
        ("Context analysis", if cfg.use_context_analysis { "on".into() } else { "off".into() }),
    ];

    let mut constraints = vec![Constraint::Length(1); ConfigForm::ROWS];
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, (label, value)) in rows.iter().enumerate() {
        let style = if i == form.focus {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let line = Line::from(vec![
            Span::styled(format!("{label:<20}"), Style::default().fg(Color::DarkGray)),
            Span::styled(value.clone(), style),
        ]);
        f.render_widget(Paragraph::new(line), chunks[i]);
    }
    f.render_widget(
        Paragraph::new(Span::styled(
            "←/→/space change · Enter save · Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
        chunks[ConfigForm::ROWS + 1],
    );
}

fn render_confirm_delete(f: &mut Frame, username: &str) {
    let area = overlay_rect(f.size(), 44, 5);
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(" Remove account ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    f.render_widget(block, area);
    let lines = vec![
        Line::from(format!("Retire {username}?")),
        Line::from(Span::styled("y confirm · n / Esc cancel", Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

// Fixed-height overlay centered horizontally at `percent_x` width.
fn overlay_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let centered = centered_rect(percent_x, 100, area);
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x: centered.x,
        y,
        width: centered.width,
        height: height.min(area.height),
    }
}
