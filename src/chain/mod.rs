//! Markov chain on systems of non-intersecting lattice paths
//!
//! A lozenge tiling of an a×b×c hexagon is encoded as `c` paths, each with
//! `a` flat steps and `b` up steps. The chain moves one path point at a time
//! and is monotone for the cell-wise order on path systems.

/// Validated hexagon side lengths
pub mod hexagon;
/// Path system tables, extremal states and the partial order
pub mod path_system;
/// Random local moves and the monotone update rule
pub mod update;

pub use hexagon::Hexagon;
pub use path_system::PathSystem;
pub use update::{Direction, Update, apply_update, sample_update};
