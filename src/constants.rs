pub const SAMPLE_PERIOD_MS: u64 = 3000;
pub const WINDOW_CAPACITY: usize = 30;

// UI redraw cadence; sampling runs on its own period above.
pub const FRAME_RATE_MS: u64 = 250;

// How many of the newest samples the active-bots bar chart shows.
pub const BAR_WINDOW: usize = 10;

// Status-bar notices fade after this many seconds.
pub const NOTICE_TTL_SECS: u64 = 5;
