//! Command-line interface for sampling and rendering random lozenge tilings

use crate::analysis::enumeration::{enumerate_states, macmahon_count};
use crate::analysis::uniformity::check_uniformity;
use crate::chain::Hexagon;
use crate::io::configuration::{
    DEFAULT_MAX_ROUNDS, DEFAULT_OUTPUT, DEFAULT_SEED, DEFAULT_SIDE_A, DEFAULT_SIDE_B,
    DEFAULT_SIDE_C, GIF_FRAME_DELAY_MS, MAX_ENUMERATED_STATES, RENDER_SCALE,
    UNIFORMITY_SIGNIFICANCE, VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, computation_error};
use crate::io::image::export_tiling_as_png;
use crate::io::progress::ProgressManager;
use crate::io::visualization::VisualizationCapture;
use crate::sampler::{CftpSampler, Sample, SamplerConfig, SamplerPhase};
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "lozenge-cftp")]
#[command(
    author,
    version,
    about = "Sample uniformly random lozenge tilings of a hexagon by coupling from the past"
)]
/// Command-line arguments for the sampling tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Hexagon side a (flat steps per path)
    #[arg(short = 'a', long, default_value_t = DEFAULT_SIDE_A)]
    pub side_a: usize,

    /// Hexagon side b (up steps per path)
    #[arg(short = 'b', long, default_value_t = DEFAULT_SIDE_B)]
    pub side_b: usize,

    /// Hexagon side c (number of paths)
    #[arg(short = 'c', long, default_value_t = DEFAULT_SIDE_C)]
    pub side_c: usize,

    /// Random seed for reproducible sampling
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum doubling rounds before giving up (0 for no limit)
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_ROUNDS)]
    pub max_rounds: usize,

    /// Output PNG path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Also write an animated GIF of both chains per round
    #[arg(short, long)]
    pub visualize: bool,

    /// Instead of rendering, draw this many samples and test them for uniformity
    #[arg(short, long, value_name = "SAMPLES", conflicts_with = "count")]
    pub uniformity: Option<usize>,

    /// Instead of rendering, print the number of tilings
    #[arg(long)]
    pub count: bool,

    /// Skip the per-round order and validity checks
    #[arg(long)]
    pub no_verify: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Sampler configuration requested on the command line
    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            max_rounds: NonZeroUsize::new(self.max_rounds).map(NonZeroUsize::get),
            verify_coupling: !self.no_verify,
        }
    }
}

/// Runs one sampling session described by the CLI arguments
pub struct SampleRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl SampleRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Sample and render, or run the uniformity check
    ///
    /// # Errors
    ///
    /// Returns an error if the hexagon is invalid, sampling fails, output
    /// cannot be written, or the uniformity check rejects the samples
    pub fn process(&mut self) -> Result<()> {
        let hexagon = Hexagon::new(self.cli.side_a, self.cli.side_b, self.cli.side_c)?;

        if self.cli.count {
            return self.process_count(&hexagon);
        }
        if let Some(samples) = self.cli.uniformity {
            return self.process_uniformity(&hexagon, samples);
        }

        let start_time = Instant::now();
        let mut capture = self
            .cli
            .visualize
            .then(|| VisualizationCapture::new(hexagon, RENDER_SCALE));

        let sample = self.sample(hexagon, capture.as_mut())?;
        export_tiling_as_png(&sample.tiling(), &self.cli.output)?;

        if let Some(capture) = capture {
            capture.export_gif(
                &Self::get_visualization_path(&self.cli.output),
                GIF_FRAME_DELAY_MS,
            )?;
        }

        self.report(&format!(
            "Sampled {hexagon} in {} rounds (lookback {} steps, {:.2?}) -> {}",
            sample.rounds,
            sample.lookback,
            start_time.elapsed(),
            self.cli.output.display()
        ));

        Ok(())
    }

    /// Drive the sampler round by round so progress and capture see each one
    fn sample(
        &mut self,
        hexagon: Hexagon,
        mut capture: Option<&mut VisualizationCapture>,
    ) -> Result<Sample> {
        let mut sampler = CftpSampler::new(hexagon, self.cli.seed, self.cli.sampler_config());

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_sampling(&hexagon);
        }

        loop {
            let phase = match sampler.run_round() {
                Ok(phase) => phase,
                Err(error) => {
                    self.finish_progress();
                    return Err(error);
                }
            };

            if let Some(ref pm) = self.progress_manager {
                pm.update_round(sampler.round(), sampler.lookback(), sampler.gap());
            }
            if let Some(capture) = capture.as_deref_mut() {
                capture.record_round(
                    sampler.round(),
                    sampler.lookback(),
                    sampler.lower(),
                    sampler.upper(),
                );
            }

            if phase == SamplerPhase::Coalesced {
                break;
            }
        }

        self.finish_progress();
        sampler.finish()
    }

    /// Report the MacMahon count, cross-checked by enumeration when small
    fn process_count(&self, hexagon: &Hexagon) -> Result<()> {
        let count: u128 = macmahon_count(hexagon)?;

        if count <= MAX_ENUMERATED_STATES as u128 {
            let enumerated = enumerate_states(hexagon, MAX_ENUMERATED_STATES)?.len();
            if enumerated as u128 != count {
                return Err(computation_error(
                    "count",
                    &format!("enumerated {enumerated} path systems, expected {count}"),
                ));
            }
            self.report(&format!("{hexagon}: {count} tilings (confirmed by enumeration)"));
        } else {
            self.report(&format!("{hexagon}: {count} tilings"));
        }

        Ok(())
    }

    fn process_uniformity(&mut self, hexagon: &Hexagon, samples: usize) -> Result<()> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_batch(hexagon, samples);
        }

        let progress = self.progress_manager.as_ref();
        let report = check_uniformity(
            hexagon,
            samples,
            self.cli.seed,
            self.cli.sampler_config(),
            |completed| {
                if let Some(pm) = progress {
                    pm.update_samples(completed);
                }
            },
        );
        self.finish_progress();
        let report = report?;

        self.report(&format!(
            "{} samples of {hexagon}: {} of {} tilings seen, chi-squared {:.3} on {} dof, p = {:.4}",
            report.samples,
            report.distinct,
            report.tilings,
            report.statistic,
            report.degrees_of_freedom,
            report.p_value
        ));

        if report.is_consistent(UNIFORMITY_SIGNIFICANCE) {
            Ok(())
        } else {
            Err(computation_error(
                "uniformity check",
                &format!(
                    "p = {:.6} is below the {UNIFORMITY_SIGNIFICANCE} significance level",
                    report.p_value
                ),
            ))
        }
    }

    fn finish_progress(&mut self) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }
    }

    // Allow print for user feedback on completed runs
    #[allow(clippy::print_stderr)]
    fn report(&self, line: &str) {
        if !self.cli.quiet {
            eprintln!("{line}");
        }
    }

    /// Path of the rounds animation written next to `output`
    pub fn get_visualization_path(output: &Path) -> PathBuf {
        let stem = output.file_stem().unwrap_or_default();
        let viz_name = format!("{}{VISUALIZATION_SUFFIX}.gif", stem.to_string_lossy());

        output
            .parent()
            .map_or_else(|| PathBuf::from(&viz_name), |parent| parent.join(&viz_name))
    }
}
