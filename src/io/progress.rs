//! Terminal progress for sampling rounds and repeated-sample checks

use crate::chain::Hexagon;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static ROUND_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {prefix} round {pos} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] {{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress display for one sampling session
///
/// A single run shows a spinner advanced once per doubling round; the
/// uniformity check shows a bar over completed samples.
#[derive(Default)]
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl ProgressManager {
    /// Create a manager with nothing displayed yet
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Show a round spinner for one sampling run
    pub fn start_sampling(&mut self, hexagon: &Hexagon) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ROUND_STYLE.clone());
        bar.set_prefix(hexagon.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));
        self.bar = Some(bar);
    }

    /// Report a finished round
    pub fn update_round(&self, round: usize, lookback: u64, gap: usize) {
        if let Some(ref bar) = self.bar {
            bar.set_position(round as u64);
            bar.set_message(format!("lookback {lookback} steps, {gap} cells apart"));
        }
    }

    /// Show a bar over `samples` independent runs
    pub fn start_batch(&mut self, hexagon: &Hexagon, samples: usize) {
        let bar = ProgressBar::new(samples as u64);
        bar.set_style(BATCH_STYLE.clone());
        bar.set_prefix(hexagon.to_string());
        self.bar = Some(bar);
    }

    /// Report completed runs in batch mode
    pub fn update_samples(&self, completed: usize) {
        if let Some(ref bar) = self.bar {
            bar.set_position(completed as u64);
        }
    }

    /// Position of the active display, if any
    pub fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(ProgressBar::position)
    }

    /// Clear the active display
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
