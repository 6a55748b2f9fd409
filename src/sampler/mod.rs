//! Coupling-from-the-past sampling over the path system chain

/// Replayable update blocks and the snapshot/restore contract for generators
pub mod block;
/// Doubling-schedule driver and its state machine
pub mod cftp;

pub use block::{Block, ReplayableRng};
pub use cftp::{CftpSampler, Sample, SamplerConfig, SamplerPhase, run};
