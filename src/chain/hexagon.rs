use crate::io::configuration::MAX_SIDE_LENGTH;
use crate::io::error::{AlgorithmError, Result};
use std::fmt;

/// Side lengths of an a×b×c hexagon
///
/// Immutable for the lifetime of a sampling run. Every path system over this
/// hexagon is a `(c + 2) × (a + b + 1)` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hexagon {
    a: usize,
    b: usize,
    c: usize,
}

impl Hexagon {
    /// Validate side lengths and build the hexagon
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` if any side is zero or larger than
    /// `MAX_SIDE_LENGTH`
    pub fn new(a: usize, b: usize, c: usize) -> Result<Self> {
        for (side, value) in [("a", a), ("b", b), ("c", c)] {
            if value == 0 {
                return Err(AlgorithmError::InvalidGeometry {
                    side,
                    value,
                    reason: "side lengths must be positive",
                });
            }
            if value > MAX_SIDE_LENGTH {
                return Err(AlgorithmError::InvalidGeometry {
                    side,
                    value,
                    reason: "side length exceeds the supported maximum",
                });
            }
        }

        Ok(Self { a, b, c })
    }

    /// Flat steps per path
    pub const fn a(&self) -> usize {
        self.a
    }

    /// Up steps per path
    pub const fn b(&self) -> usize {
        self.b
    }

    /// Number of paths
    pub const fn c(&self) -> usize {
        self.c
    }

    /// Table rows including both sentinel rows
    pub const fn rows(&self) -> usize {
        self.c + 2
    }

    /// Table columns (points per path)
    pub const fn columns(&self) -> usize {
        self.a + self.b + 1
    }

    /// Cells an update may touch
    pub const fn interior_cells(&self) -> usize {
        self.c * (self.a + self.b - 1)
    }

    /// Lozenges in every tiling of this hexagon
    pub const fn lozenge_count(&self) -> usize {
        self.a * self.b + self.b * self.c + self.c * self.a
    }
}

impl fmt::Display for Hexagon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.a, self.b, self.c)
    }
}
