//! Counting, enumeration and statistical diagnostics for sampled tilings

/// MacMahon counts and exhaustive state enumeration
pub mod enumeration;
/// Chi-squared uniformity check over repeated samples
pub mod uniformity;
