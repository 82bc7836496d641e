//! Live-activity sampling: a bounded, time-ordered window of recent
//! activity measurements plus the running totals shown next to the charts.
//!
//! The window only ever grows by one sample per elapsed period and evicts
//! strictly oldest-first, so its length stays in `[0, capacity]` and its
//! ordering is always oldest-to-newest. Callers that pause and resume are
//! expected to re-seed; the window carries nothing over between live
//! sessions.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::constants::{SAMPLE_PERIOD_MS, WINDOW_CAPACITY};

/// One activity measurement. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub at: DateTime<Local>,
    pub messages: u64,
    pub viewers: u64,
    pub active_bots: u64,
}

impl Sample {
    pub fn label(&self) -> String {
        self.at.format("%H:%M:%S").to_string()
    }
}

/// Where samples come from.
///
/// Returning `None` means no measurement could be produced for this period
/// (a fetch failed, say). The caller skips the tick and leaves the window
/// untouched; there is no retry within the period.
pub trait SampleSource {
    fn next_sample(&mut self, at: DateTime<Local>) -> Option<Sample>;
}

/// Random demo metrics, the stand-in while no live data source is wired.
pub struct SyntheticSource {
    rng: ThreadRng,
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self { rng: rand::thread_rng() }
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for SyntheticSource {
    fn next_sample(&mut self, at: DateTime<Local>) -> Option<Sample> {
        Some(Sample {
            at,
            messages: self.rng.gen_range(10..40),
            viewers: self.rng.gen_range(20..70),
            active_bots: self.rng.gen_range(5..20),
        })
    }
}

/// Sliding window of recent samples with per-tick gating and totals.
pub struct ActivityMonitor {
    window: VecDeque<Sample>,
    capacity: usize,
    period: Duration,
    live: bool,
    last_tick: Option<Instant>,

    pub total_messages: u64,
    pub peak_messages: u64,
    pub peak_at: Option<DateTime<Local>>,
}

impl ActivityMonitor {
    pub fn new(capacity: usize, period: Duration) -> Self {
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            period,
            live: false,
            last_tick: None,
            total_messages: 0,
            peak_messages: 0,
            peak_at: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(WINDOW_CAPACITY, Duration::from_millis(SAMPLE_PERIOD_MS))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn samples(&self) -> impl DoubleEndedIterator<Item = &Sample> + ExactSizeIterator {
        self.window.iter()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.window.back()
    }

    /// Discard everything and backfill `n` samples spaced one period apart,
    /// ending at "now", so the charts are populated before the first live
    /// tick. Totals restart from the seeded samples.
    pub fn seed(&mut self, n: usize, source: &mut dyn SampleSource) {
        self.window.clear();
        self.total_messages = 0;
        self.peak_messages = 0;
        self.peak_at = None;

        let now = Local::now();
        let step = chrono::Duration::milliseconds(self.period.as_millis() as i64);
        for i in (0..n).rev() {
            let at = now - step * i as i32;
            if let Some(sample) = source.next_sample(at) {
                self.push(sample);
            }
        }
    }

    /// Begin periodic sampling. Idempotent: while live this is a no-op, so
    /// there is never more than one tick per period. The first sample lands
    /// one full period after the call.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        if self.live {
            return;
        }
        self.live = true;
        self.last_tick = Some(now);
    }

    /// Cancel periodic sampling. Idempotent; no sample is produced after
    /// this returns until `start` is called again.
    pub fn stop(&mut self) {
        self.live = false;
    }

    /// Produce at most one sample if live and a period has elapsed.
    /// Returns whether the window changed. A declined sample (source
    /// returned `None`) consumes the period without touching the window.
    pub fn poll(&mut self, source: &mut dyn SampleSource) -> bool {
        self.poll_at(Instant::now(), source)
    }

    pub fn poll_at(&mut self, now: Instant, source: &mut dyn SampleSource) -> bool {
        if !self.live {
            return false;
        }
        let due = match self.last_tick {
            None => true,
            Some(t) => now.duration_since(t) >= self.period,
        };
        if !due {
            return false;
        }
        self.last_tick = Some(now);

        match source.next_sample(Local::now()) {
            Some(sample) => {
                self.push(sample);
                true
            }
            None => {
                tracing::warn!("sample source declined; window left unchanged this period");
                false
            }
        }
    }

    fn push(&mut self, sample: Sample) {
        self.total_messages += sample.messages;
        if sample.messages > self.peak_messages {
            self.peak_messages = sample.messages;
            self.peak_at = Some(sample.at);
        }
        self.window.push_back(sample);
        if self.window.len() > self.capacity {
            self.window.pop_front();
        }
    }
}

/// Headline figures for the activity view. Total messages live on the
/// monitor itself; the rest are fleet-level readings refreshed per session.
#[derive(Debug, Clone, Copy)]
pub struct BotStats {
    pub active_bots: u64,
    pub avg_response_secs: f64,
    pub success_rate: f64,
}

impl BotStats {
    pub fn seeded() -> Self {
        Self {
            active_bots: 12,
            avg_response_secs: 1.8,
            success_rate: 98.5,
        }
    }
}

/// One slice of the message-style breakdown.
#[derive(Debug, Clone)]
pub struct StyleShare {
    pub style: &'static str,
    pub count: u64,
}

impl StyleShare {
    pub fn demo_breakdown() -> Vec<StyleShare> {
        vec![
            StyleShare { style: "casual", count: 450 },
            StyleShare { style: "enthusiastic", count: 380 },
            StyleShare { style: "supportive", count: 280 },
            StyleShare { style: "questions", count: 100 },
            StyleShare { style: "toxic", count: 37 },
        ]
    }
}

/// Leaderboard row for the most productive bots.
#[derive(Debug, Clone)]
pub struct BotRank {
    pub name: &'static str,
    pub messages: u64,
    pub efficiency: u8,
}

impl BotRank {
    pub fn demo_leaderboard() -> Vec<BotRank> {
        vec![
            BotRank { name: "bot_user_42", messages: 156, efficiency: 98 },
            BotRank { name: "bot_user_17", messages: 143, efficiency: 96 },
            BotRank { name: "bot_user_89", messages: 138, efficiency: 95 },
            BotRank { name: "bot_user_31", messages: 127, efficiency: 93 },
            BotRank { name: "bot_user_64", messages: 119, efficiency: 91 },
        ]
    }
}
