//! Decomposition of a path system into its three lozenge families
//!
//! Lattice coordinates `(x, y)` use the basis of the path plane: `x` is the
//! column and `y` the height. A flat path step crosses a left lozenge, an up
//! step crosses a right lozenge, and every vertical lattice edge strictly
//! between two consecutive rows is the short diagonal of a top lozenge.

use crate::chain::{Hexagon, PathSystem};
use crate::tiling::coverage::{Triangle, TriangleMask};

const HALF_SQRT_3: f64 = 0.866_025_403_784_438_6;

/// Lozenge family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LozengeKind {
    /// Crossed by a flat path step
    Left,
    /// Crossed by an up path step
    Right,
    /// Not crossed by any path
    Top,
}

/// One unit rhombus given by its four corners in lattice coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lozenge {
    /// Lozenge family
    pub kind: LozengeKind,
    /// Corners in order around the boundary
    pub corners: [[i32; 2]; 4],
}

impl Lozenge {
    const fn left(x: i32, y: i32) -> Self {
        Self {
            kind: LozengeKind::Left,
            corners: [[x, y], [x + 1, y], [x + 1, y + 1], [x, y + 1]],
        }
    }

    const fn right(x: i32, y: i32) -> Self {
        Self {
            kind: LozengeKind::Right,
            corners: [[x, y], [x + 1, y + 1], [x + 1, y + 2], [x, y + 1]],
        }
    }

    const fn top(x: i32, y: i32) -> Self {
        Self {
            kind: LozengeKind::Top,
            corners: [[x, y], [x + 1, y], [x + 2, y + 1], [x + 1, y + 1]],
        }
    }

    /// Corners projected to the Euclidean plane
    ///
    /// The three lattice directions `(1,0)`, `(0,1)` and `(1,1)` map to unit
    /// vectors 60° apart, so the hexagon comes out with equal angles.
    pub fn plane_corners(&self) -> [[f64; 2]; 4] {
        self.corners.map(|[x, y]| {
            let (x, y) = (f64::from(x), f64::from(y));
            [x * HALF_SQRT_3, x.mul_add(-0.5, y)]
        })
    }

    /// The two unit triangles this lozenge covers
    pub(crate) const fn triangles(&self) -> [Triangle; 2] {
        let [x, y] = self.corners[0];
        match self.kind {
            LozengeKind::Left => [Triangle::lower(x, y), Triangle::upper(x, y)],
            LozengeKind::Right => [Triangle::upper(x, y), Triangle::lower(x, y + 1)],
            LozengeKind::Top => [Triangle::lower(x, y), Triangle::upper(x + 1, y)],
        }
    }
}

/// Every lozenge of one tiling, grouped by family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tiling {
    hexagon: Hexagon,
    left: Vec<Lozenge>,
    right: Vec<Lozenge>,
    top: Vec<Lozenge>,
}

impl Tiling {
    /// Hexagon the tiling covers
    pub const fn hexagon(&self) -> &Hexagon {
        &self.hexagon
    }

    /// Lozenges crossed by flat steps
    pub fn left(&self) -> &[Lozenge] {
        &self.left
    }

    /// Lozenges crossed by up steps
    pub fn right(&self) -> &[Lozenge] {
        &self.right
    }

    /// Lozenges between paths
    pub fn top(&self) -> &[Lozenge] {
        &self.top
    }

    /// All lozenges, left then right then top
    pub fn iter(&self) -> impl Iterator<Item = &Lozenge> {
        self.left.iter().chain(&self.right).chain(&self.top)
    }

    /// Total number of lozenges
    pub fn len(&self) -> usize {
        self.left.len() + self.right.len() + self.top.len()
    }

    /// Whether the tiling has no lozenges at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bounding box of the projected tiling as `(min, max)`
    pub fn plane_bounds(&self) -> ([f64; 2], [f64; 2]) {
        self.iter().flat_map(|lozenge| lozenge.plane_corners()).fold(
            ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]),
            |(min, max), [x, y]| {
                (
                    [min[0].min(x), min[1].min(y)],
                    [max[0].max(x), max[1].max(y)],
                )
            },
        )
    }

    /// Check that the lozenges cover every unit triangle of the hexagon
    /// exactly once and nothing outside it
    pub fn covers_hexagon_exactly(&self) -> bool {
        let Some(covered) = TriangleMask::from_lozenges(&self.hexagon, self.iter()) else {
            return false;
        };

        let reference = extract_tiling(&self.hexagon, &PathSystem::minimal(&self.hexagon));
        TriangleMask::from_lozenges(&self.hexagon, reference.iter())
            .is_some_and(|region| region == covered)
    }
}

/// Enumerate the lozenges of a path system
///
/// Produces `c·a` left, `c·b` right and `a·b` top lozenges for any valid state.
pub fn extract_tiling(hexagon: &Hexagon, state: &PathSystem) -> Tiling {
    let (rows, columns) = state.dim();
    let mut left = Vec::with_capacity(hexagon.c() * hexagon.a());
    let mut right = Vec::with_capacity(hexagon.c() * hexagon.b());
    let mut top = Vec::with_capacity(hexagon.a() * hexagon.b());

    for k in 1..rows.saturating_sub(1) {
        for j in 1..columns {
            let (Some(previous), Some(current)) = (state.get(k, j - 1), state.get(k, j)) else {
                continue;
            };
            let x = j as i32 - 1;
            if current == previous {
                left.push(Lozenge::left(x, previous));
            } else {
                right.push(Lozenge::right(x, previous));
            }
        }
    }

    for k in 0..rows.saturating_sub(1) {
        for j in 0..columns {
            let (Some(below), Some(above)) = (state.get(k, j), state.get(k + 1, j)) else {
                continue;
            };
            let x = j as i32 - 1;
            top.extend((below + 1..above).map(|y| Lozenge::top(x, y)));
        }
    }

    Tiling {
        hexagon: *hexagon,
        left,
        right,
        top,
    }
}
