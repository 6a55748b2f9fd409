//! Unit-triangle occupancy for checking that lozenges tile a hexagon
//!
//! Each lattice square `(x, y)` is split by its `(1, 1)` diagonal into a lower
//! and an upper triangle. A lozenge is exactly two adjacent triangles.

use crate::chain::Hexagon;
use crate::tiling::extractor::Lozenge;
use bitvec::prelude::*;

/// Half of the lattice square with lower-left corner `(x, y)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// Square column
    pub x: i32,
    /// Square row
    pub y: i32,
    /// `true` for the half above the diagonal
    pub upper: bool,
}

impl Triangle {
    /// Triangle `(x, y) (x+1, y) (x+1, y+1)`
    pub const fn lower(x: i32, y: i32) -> Self {
        Self { x, y, upper: false }
    }

    /// Triangle `(x, y) (x, y+1) (x+1, y+1)`
    pub const fn upper(x: i32, y: i32) -> Self {
        Self { x, y, upper: true }
    }
}

/// Set of unit triangles inside the bounding box of a hexagon
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriangleMask {
    bits: BitVec,
    width: usize,
    height: usize,
}

impl TriangleMask {
    /// Create an empty mask sized for `hexagon`
    pub fn new(hexagon: &Hexagon) -> Self {
        let width = hexagon.a() + hexagon.b();
        let height = hexagon.b() + hexagon.c() + 1;
        Self {
            bits: bitvec![0; width * height * 2],
            width,
            height,
        }
    }

    /// Mark every triangle of every lozenge
    ///
    /// Returns `None` if a triangle falls outside the bounding box or is
    /// covered twice.
    pub fn from_lozenges<'a>(
        hexagon: &Hexagon,
        lozenges: impl IntoIterator<Item = &'a Lozenge>,
    ) -> Option<Self> {
        let mut mask = Self::new(hexagon);
        for lozenge in lozenges {
            for triangle in lozenge.triangles() {
                if !mask.insert(triangle)? {
                    return None;
                }
            }
        }
        Some(mask)
    }

    fn index(&self, triangle: Triangle) -> Option<usize> {
        let x = usize::try_from(triangle.x).ok()?;
        let y = usize::try_from(triangle.y).ok()?;
        (x < self.width && y < self.height)
            .then(|| (x * self.height + y) * 2 + usize::from(triangle.upper))
    }

    /// Mark a triangle, returning whether it was previously unmarked
    ///
    /// `None` when the triangle lies outside the bounding box.
    pub fn insert(&mut self, triangle: Triangle) -> Option<bool> {
        let index = self.index(triangle)?;
        let was_set = self.bits.get(index).as_deref() == Some(&true);
        self.bits.set(index, true);
        Some(!was_set)
    }

    /// Test triangle membership
    pub fn contains(&self, triangle: Triangle) -> bool {
        self.index(triangle)
            .is_some_and(|index| self.bits.get(index).as_deref() == Some(&true))
    }

    /// Number of marked triangles
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }
}
