//! Lozenge view of a path system
//!
//! Read-only output formatting: nothing here feeds back into the chain.

/// Unit-triangle occupancy mask
pub mod coverage;
/// Path system to lozenge decomposition
pub mod extractor;

pub use extractor::{Lozenge, LozengeKind, Tiling, extract_tiling};
