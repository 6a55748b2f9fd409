//! Frame capture and GIF generation for watching the chains coalesce

use crate::chain::{Hexagon, PathSystem};
use crate::io::error::{AlgorithmError, Result};
use crate::io::image::{ensure_parent_dir, render_side_by_side};
use crate::tiling::extract_tiling;
use image::Frame;
use std::path::Path;

/// Snapshot of both chains at the end of one sampler round
#[derive(Debug, Clone)]
pub struct RoundCapture {
    /// Round number, starting at 1
    pub round: usize,
    /// Lookback window replayed in this round
    pub lookback: u64,
    /// Chain started from the minimal state
    pub lower: PathSystem,
    /// Chain started from the maximal state
    pub upper: PathSystem,
}

impl RoundCapture {
    /// Cells where the two chains disagree
    pub fn gap(&self) -> usize {
        self.lower.differing_cells(&self.upper)
    }
}

/// Records the lower and upper chains after every round
///
/// States are kept as tables and only rendered on export, so capture costs
/// one clone of each state per round.
pub struct VisualizationCapture {
    hexagon: Hexagon,
    rounds: Vec<RoundCapture>,
    scale: f64,
}

impl VisualizationCapture {
    /// Start an empty capture rendered at `scale` pixels per lattice unit
    pub const fn new(hexagon: Hexagon, scale: f64) -> Self {
        Self {
            hexagon,
            rounds: Vec::new(),
            scale,
        }
    }

    /// Record the state of both chains after a round
    pub fn record_round(
        &mut self,
        round: usize,
        lookback: u64,
        lower: &PathSystem,
        upper: &PathSystem,
    ) {
        self.rounds.push(RoundCapture {
            round,
            lookback,
            lower: lower.clone(),
            upper: upper.clone(),
        });
    }

    /// All recorded rounds in order
    pub fn rounds(&self) -> &[RoundCapture] {
        &self.rounds
    }

    /// Export one frame per round, lower chain on the left
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No rounds were captured
    /// - A frame cannot be rendered
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.rounds.is_empty() {
            return Err(AlgorithmError::InvalidParameter {
                parameter: "visualization",
                value: self.hexagon.to_string(),
                reason: "no sampler rounds captured".to_string(),
            });
        }

        let frames = self.generate_frames(frame_delay_ms)?;

        ensure_parent_dir(output_path)?;
        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32) -> Result<Vec<Frame>> {
        let mut frames = self
            .rounds
            .iter()
            .map(|capture| {
                let lower = extract_tiling(&self.hexagon, &capture.lower);
                let upper = extract_tiling(&self.hexagon, &capture.upper);
                Ok(Frame::from_parts(
                    render_side_by_side(&lower, &upper, self.scale)?,
                    0,
                    0,
                    image::Delay::from_numer_denom_ms(delay_ms, 1),
                ))
            })
            .collect::<Result<Vec<Frame>>>()?;

        // Hold the coalesced frame
        if let Some(last_frame_img) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last_frame_img,
                0,
                0,
                image::Delay::from_numer_denom_ms(delay_ms.saturating_mul(5), 1),
            ));
        }

        Ok(frames)
    }
}
