//! Mathematical utilities for the statistical checks

/// Probability distributions and goodness-of-fit statistics
pub mod probability;
