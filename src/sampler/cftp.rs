//! Doubling-schedule sampler built on replayable update blocks

use crate::chain::{Hexagon, PathSystem};
use crate::io::configuration::DEFAULT_MAX_ROUNDS;
use crate::io::error::{AlgorithmError, Result, computation_error, invalid_parameter};
use crate::sampler::block::{Block, ReplayableRng};
use crate::tiling::{Tiling, extract_tiling};
use rand::{SeedableRng, rngs::StdRng};

/// Position of the sampler in its round cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerPhase {
    /// About to extend the history with an older block
    Accumulating,
    /// About to rerun the whole history from the extremal states
    Replaying,
    /// Last replay left the two states apart; the window will double
    NotCoalesced,
    /// Both states agree; the common state is an exact sample
    Coalesced,
}

/// Sampler parameters
#[derive(Debug, Clone, Copy)]
pub struct SamplerConfig {
    /// Give up with `SamplingTimeout` after this many rounds
    pub max_rounds: Option<usize>,
    /// Verify `lower <= upper` and state validity after every round
    pub verify_coupling: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_rounds: Some(DEFAULT_MAX_ROUNDS),
            verify_coupling: true,
        }
    }
}

/// Exact uniform sample produced by a coalesced run
#[derive(Debug, Clone)]
pub struct Sample {
    /// Hexagon the sample tiles
    pub hexagon: Hexagon,
    /// The common state of both chains
    pub state: PathSystem,
    /// Rounds needed to coalesce
    pub rounds: usize,
    /// Total updates replayed in the final round
    pub lookback: u64,
}

impl Sample {
    /// Decompose the sampled path system into lozenges
    pub fn tiling(&self) -> Tiling {
        extract_tiling(&self.hexagon, &self.state)
    }
}

/// Monotone coupling-from-the-past driver
///
/// Runs two copies of the chain, one from the minimal and one from the maximal
/// state, over an ever longer history of random updates. Each round prepends an
/// older block as long as the existing history, so the lookback window doubles,
/// and replays everything from scratch. Once both copies agree, every start
/// state would have agreed too, and the common state is distributed exactly
/// uniformly over path systems.
pub struct CftpSampler<R: ReplayableRng = StdRng> {
    hexagon: Hexagon,
    config: SamplerConfig,
    /// Source of fresh sub-streams for new blocks
    master: R,
    /// Blocks in creation order, each reaching further into the past;
    /// replay walks them in reverse
    blocks: Vec<Block<R>>,
    bottom: PathSystem,
    top: PathSystem,
    lower: PathSystem,
    upper: PathSystem,
    phase: SamplerPhase,
    round: usize,
    lookback: u64,
}

impl CftpSampler<StdRng> {
    /// Create a sampler driven by a seeded `StdRng`
    pub fn new(hexagon: Hexagon, seed: u64, config: SamplerConfig) -> Self {
        Self::with_rng(hexagon, StdRng::seed_from_u64(seed), config)
    }
}

impl<R: ReplayableRng + SeedableRng> CftpSampler<R> {
    /// Create a sampler around an explicit generator
    pub fn with_rng(hexagon: Hexagon, rng: R, config: SamplerConfig) -> Self {
        let bottom = PathSystem::minimal(&hexagon);
        let top = PathSystem::maximal(&hexagon);

        Self {
            hexagon,
            config,
            master: rng,
            blocks: Vec::new(),
            lower: bottom.clone(),
            upper: top.clone(),
            bottom,
            top,
            phase: SamplerPhase::Accumulating,
            round: 0,
            lookback: 0,
        }
    }

    /// Perform a single state-machine transition
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The round cap is reached before coalescence (`SamplingTimeout`)
    /// - A block replay diverges from its earlier replay (`ReplayInconsistency`)
    /// - The coupled states leave the partial order (`CouplingViolation`)
    /// - The lookback window overflows
    pub fn advance(&mut self) -> Result<SamplerPhase> {
        self.phase = match self.phase {
            SamplerPhase::Accumulating => {
                self.extend_history()?;
                SamplerPhase::Replaying
            }
            SamplerPhase::Replaying => {
                self.replay(self.round + 1)?;
                self.round += 1;
                if self.lower == self.upper {
                    SamplerPhase::Coalesced
                } else {
                    SamplerPhase::NotCoalesced
                }
            }
            SamplerPhase::NotCoalesced => SamplerPhase::Accumulating,
            SamplerPhase::Coalesced => SamplerPhase::Coalesced,
        };

        Ok(self.phase)
    }

    /// Advance until the current round ends in `Coalesced` or `NotCoalesced`
    ///
    /// # Errors
    ///
    /// Propagates any error from `advance`
    pub fn run_round(&mut self) -> Result<SamplerPhase> {
        loop {
            match self.advance()? {
                phase @ (SamplerPhase::Coalesced | SamplerPhase::NotCoalesced) => {
                    return Ok(phase);
                }
                SamplerPhase::Accumulating | SamplerPhase::Replaying => {}
            }
        }
    }

    /// Run rounds until coalescence and return the exact sample
    ///
    /// # Errors
    ///
    /// Propagates any error from `advance`; no partial result is returned
    pub fn run(mut self) -> Result<Sample> {
        while self.run_round()? != SamplerPhase::Coalesced {}
        Ok(self.into_sample())
    }

    /// Prepend an older block so the lookback window doubles
    fn extend_history(&mut self) -> Result<()> {
        if self.config.max_rounds.is_some_and(|cap| self.round >= cap) {
            return Err(AlgorithmError::SamplingTimeout {
                rounds: self.round,
                lookback: self.lookback,
            });
        }

        let steps = if self.blocks.is_empty() {
            1
        } else {
            self.lookback
        };
        let lookback = self.lookback.checked_add(steps).ok_or_else(|| {
            computation_error("extend_history", &"lookback window overflowed u64")
        })?;

        let stream = R::from_rng(&mut self.master);
        self.blocks.push(Block::new(stream.snapshot(), steps));
        self.lookback = lookback;
        Ok(())
    }

    /// Restart both copies from the extremal states and replay every block,
    /// oldest first, as round `round` (1-based)
    fn replay(&mut self, round: usize) -> Result<()> {
        self.lower.clone_from(&self.bottom);
        self.upper.clone_from(&self.top);

        for block in self.blocks.iter_mut().rev() {
            block.replay(&self.hexagon, &mut self.lower, &mut self.upper, round)?;
        }

        if self.config.verify_coupling {
            self.verify_coupling(round)?;
        }
        Ok(())
    }

    fn verify_coupling(&self, round: usize) -> Result<()> {
        if !self.lower.dominated_by(&self.upper) {
            return Err(AlgorithmError::CouplingViolation {
                round,
                cells: self.lower.cells_above(&self.upper),
            });
        }

        for state in [&self.lower, &self.upper] {
            if !state.is_valid_for(&self.hexagon) {
                return Err(computation_error(
                    "verify_coupling",
                    &format!("round left an invalid path system for {}", self.hexagon),
                ));
            }
        }
        Ok(())
    }
}

impl<R: ReplayableRng> CftpSampler<R> {
    /// Hexagon being sampled
    pub const fn hexagon(&self) -> &Hexagon {
        &self.hexagon
    }

    /// Current phase
    pub const fn phase(&self) -> SamplerPhase {
        self.phase
    }

    /// Completed replay rounds
    pub const fn round(&self) -> usize {
        self.round
    }

    /// Total updates in the current history
    pub const fn lookback(&self) -> u64 {
        self.lookback
    }

    /// Block step counts in creation order
    pub fn block_steps(&self) -> Vec<u64> {
        self.blocks.iter().map(Block::steps).collect()
    }

    /// Chain started from the minimal state
    pub const fn lower(&self) -> &PathSystem {
        &self.lower
    }

    /// Chain started from the maximal state
    pub const fn upper(&self) -> &PathSystem {
        &self.upper
    }

    /// Cells where the two chains still disagree
    pub fn gap(&self) -> usize {
        self.lower.differing_cells(&self.upper)
    }

    /// Whether the sampler has reached its terminal phase
    pub fn is_coalesced(&self) -> bool {
        self.phase == SamplerPhase::Coalesced
    }

    /// Take the common state once coalesced
    ///
    /// Callers must check `is_coalesced` first; before coalescence this
    /// returns the lower chain, which is not a uniform sample.
    fn into_sample(self) -> Sample {
        Sample {
            hexagon: self.hexagon,
            state: self.lower,
            rounds: self.round,
            lookback: self.lookback,
        }
    }

    /// Finish a sampler driven manually through `advance` or `run_round`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the sampler has not coalesced yet
    pub fn finish(self) -> Result<Sample> {
        if self.is_coalesced() {
            Ok(self.into_sample())
        } else {
            Err(invalid_parameter(
                "sampler",
                &format!("round {}", self.round),
                &"cannot take a sample before the chains coalesce",
            ))
        }
    }
}

/// Sample one tiling of the a×b×c hexagon with default configuration
///
/// # Errors
///
/// Returns `InvalidGeometry` for a zero side, and any sampler error from
/// `CftpSampler::run`
pub fn run(a: usize, b: usize, c: usize, seed: u64) -> Result<Sample> {
    let hexagon = Hexagon::new(a, b, c)?;
    CftpSampler::new(hexagon, seed, SamplerConfig::default()).run()
}
