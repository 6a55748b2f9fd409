//! Exact uniform sampling of lozenge tilings of an a×b×c hexagon
//!
//! A tiling is encoded as a system of non-intersecting lattice paths. A monotone
//! Markov chain on path systems is driven by coupling from the past, which
//! returns a sample from the exact uniform distribution without knowing how
//! long the chain takes to mix.

#![forbid(unsafe_code)]

/// Tiling counts, enumeration and uniformity diagnostics
pub mod analysis;
/// Path system state space and the monotone local update rule
pub mod chain;
/// Input/output operations and error handling
pub mod io;
/// Probability helpers for the statistical checks
pub mod math;
/// Coupling-from-the-past driver
pub mod sampler;
/// Lozenge decomposition of path systems
pub mod tiling;

pub use chain::{Hexagon, PathSystem};
pub use io::error::{AlgorithmError, Result};
pub use sampler::{CftpSampler, Sample, SamplerConfig, run};
