//! Input/output: CLI, rendering, progress display, configuration and errors

/// Command-line parsing and session orchestration
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error type and context helpers
pub mod error;
/// PNG rendering of tilings
pub mod image;
/// Terminal progress display
pub mod progress;
/// GIF capture of sampler rounds
pub mod visualization;
