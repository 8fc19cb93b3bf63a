use std::sync::Arc;

use gdc_transfer::{ProgressCallback, ProgressEvent};
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

pub trait Tracker {
    type Ctx: Clone;
    fn new(ctx: Self::Ctx) -> Self;
    fn finish(&self, msg: Option<String>);
}

const PB_STYLE: &str = "{spinner:.blue} {msg} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(PB_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK).progress_chars(PB_CHARS))
});

/// One bar per file transfer.
pub struct ProgressTracker {
    pub pb: ProgressBar,
}

#[derive(Debug, Clone)]
pub struct ProgressTrackerConfig {
    pub len: Option<u64>,
    /// Bytes already on disk before this attempt.
    pub position: u64,
    pub message: String,
}

impl Tracker for ProgressTracker {
    type Ctx = ProgressTrackerConfig;

    fn new(ctx: Self::Ctx) -> Self {
        let pb = match ctx.len {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::no_length(),
        };

        if let Some(style) = PB_TEMPLATE.as_ref() {
            pb.set_style(style.clone());
        }
        pb.set_position(ctx.position);
        pb.set_message(ctx.message);
        ProgressTracker { pb }
    }

    fn finish(&self, msg: Option<String>) {
        match msg {
            Some(msg) => self.pb.finish_with_message(msg),
            None => self.pb.finish(),
        }
    }
}

impl ProgressTracker {
    /// Progress callback that moves this bar. The executor reports absolute
    /// positions, so the bar never double counts resumed bytes.
    pub fn callback(&self) -> ProgressCallback {
        let pb = self.pb.clone();
        Arc::new(move |event: &ProgressEvent| {
            if let Some(total) = event.bytes_total {
                pb.set_length(total);
            }
            pb.set_position(event.bytes_transferred);
        })
    }

    pub fn abandon(&self, msg: String) {
        self.pb.abandon_with_message(msg);
    }
}
