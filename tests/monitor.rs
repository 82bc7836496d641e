//! End-to-end checks of the live-activity window through the public
//! library surface, driven by scripted sampling sources. No network.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use bot_manager::monitor::{ActivityMonitor, Sample, SampleSource, SyntheticSource};

/// Yields predetermined message counts; `None` entries model fetch
/// failures. Panics if polled past the end of its script so a test can
/// never silently over-tick.
struct Scripted {
    script: VecDeque<Option<u64>>,
}

impl Scripted {
    fn new(entries: impl IntoIterator<Item = Option<u64>>) -> Self {
        Self { script: entries.into_iter().collect() }
    }
}

impl SampleSource for Scripted {
    fn next_sample(&mut self, at: DateTime<Local>) -> Option<Sample> {
        let messages = self.script.pop_front().expect("script exhausted")?;
        Some(Sample { at, messages, viewers: messages * 2, active_bots: 1 })
    }
}

const PERIOD: Duration = Duration::from_millis(20);

fn drive(monitor: &mut ActivityMonitor, source: &mut dyn SampleSource, ticks: usize) {
    let t0 = Instant::now();
    monitor.start_at(t0);
    for i in 1..=ticks {
        monitor.poll_at(t0 + PERIOD * i as u32, source);
    }
}

#[test]
fn a_long_run_retains_only_the_newest_capacity_samples() {
    let mut monitor = ActivityMonitor::new(30, PERIOD);
    let mut source = Scripted::new((1..=45).map(Some));

    drive(&mut monitor, &mut source, 45);

    assert_eq!(monitor.len(), 30);
    let got: Vec<u64> = monitor.samples().map(|s| s.messages).collect();
    let want: Vec<u64> = (16..=45).collect();
    assert_eq!(got, want);
}

#[test]
fn pausing_stops_production_and_resuming_reseeds_cleanly() {
    let mut monitor = ActivityMonitor::new(10, PERIOD);
    let mut source = Scripted::new((1..=100).map(Some));

    drive(&mut monitor, &mut source, 4);
    assert_eq!(monitor.len(), 4);

    // Paused: arbitrary elapsed time yields nothing.
    monitor.stop();
    let t = Instant::now() + Duration::from_secs(60);
    assert!(!monitor.poll_at(t, &mut source));
    assert!(!monitor.poll_at(t + PERIOD * 50, &mut source));
    assert_eq!(monitor.len(), 4);

    // Resume the way the console does: fresh seed, then start. The old
    // window is gone and totals restart from the new seed.
    monitor.seed(10, &mut source);
    monitor.start_at(t);
    assert_eq!(monitor.len(), 10);
    let first = monitor.samples().next().unwrap().messages;
    assert!(first >= 5, "previous session's samples must not survive a resume");

    assert!(monitor.poll_at(t + PERIOD, &mut source));
    assert_eq!(monitor.len(), 10);
}

#[test]
fn a_failing_fetch_never_corrupts_the_window() {
    let mut monitor = ActivityMonitor::new(5, PERIOD);
    let mut source = Scripted::new(vec![
        Some(1),
        Some(2),
        None,
        None,
        Some(3),
    ]);

    drive(&mut monitor, &mut source, 5);

    // Two failed periods were skipped outright; order and length hold.
    let got: Vec<u64> = monitor.samples().map(|s| s.messages).collect();
    assert_eq!(got, vec![1, 2, 3]);
    assert_eq!(monitor.total_messages, 6);
}

#[test]
fn seeded_backfill_is_chart_ready_before_the_first_tick() {
    let mut monitor = ActivityMonitor::new(30, PERIOD);
    let mut source = SyntheticSource::new();
    monitor.seed(30, &mut source);

    assert_eq!(monitor.len(), 30);
    assert!(monitor.total_messages > 0);

    let stamps: Vec<_> = monitor.samples().map(|s| s.at).collect();
    assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    let span = stamps.last().unwrap().signed_duration_since(*stamps.first().unwrap());
    assert_eq!(span.num_milliseconds(), PERIOD.as_millis() as i64 * 29);
}

#[test]
fn the_synthetic_and_scripted_sources_share_the_window_logic() {
    let mut monitor = ActivityMonitor::new(8, PERIOD);

    let mut synthetic = SyntheticSource::new();
    monitor.seed(8, &mut synthetic);
    assert_eq!(monitor.len(), 8);

    // Swapping sources mid-flight is transparent to the window.
    let mut scripted = Scripted::new([Some(999)]);
    let t0 = Instant::now();
    monitor.start_at(t0);
    assert!(monitor.poll_at(t0 + PERIOD, &mut scripted));
    assert_eq!(monitor.latest().unwrap().messages, 999);
    assert_eq!(monitor.len(), 8);
}
