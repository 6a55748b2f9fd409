//! Path system tables with closed-form extremal states and the cell-wise order
//!
//! Row `k` holds the heights of path `k` at columns `0..=a+b`. Rows `0` and
//! `c + 1` are sentinels shared by every state: they trace the lower and upper
//! boundary of the hexagon, so the update rule never needs bounds of its own.

use crate::chain::hexagon::Hexagon;
use crate::io::error::{Result, invalid_parameter};
use ndarray::{Array2, ArrayView1, Axis};
use std::cmp::Ordering;

/// Height of the lowest possible path `k` at column `j` (flat steps first)
const fn flat_first(hexagon: &Hexagon, k: i32, j: i32) -> i32 {
    let a = hexagon.a() as i32;
    k + if j > a { j - a } else { 0 }
}

/// Height of the highest possible path `k` at column `j` (up steps first)
const fn up_first(hexagon: &Hexagon, k: i32, j: i32) -> i32 {
    let b = hexagon.b() as i32;
    k + if j < b { j } else { b }
}

/// Table of path heights representing one lozenge tiling
///
/// Invariants for every state built by this crate:
/// - row `0` is the flat-first boundary and row `c + 1` the up-first boundary
/// - column `0` of path `k` is `k`, column `a + b` is `k + b`
/// - every step along a row rises by 0 or 1
/// - rows are strictly increasing down each column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSystem {
    heights: Array2<i32>,
}

impl PathSystem {
    /// The unique smallest path system: every path takes its flat steps first
    pub fn minimal(hexagon: &Hexagon) -> Self {
        let top = hexagon.rows() as i32 - 1;
        Self::from_fn(hexagon, |k, j| {
            if k == top {
                up_first(hexagon, k, j)
            } else {
                flat_first(hexagon, k, j)
            }
        })
    }

    /// The unique largest path system: every path takes its up steps first
    pub fn maximal(hexagon: &Hexagon) -> Self {
        Self::from_fn(hexagon, |k, j| {
            if k == 0 {
                flat_first(hexagon, k, j)
            } else {
                up_first(hexagon, k, j)
            }
        })
    }

    /// Build a state from explicit rows, sentinels included
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the rows do not have the table shape of
    /// `hexagon` or do not form a valid non-intersecting path system
    pub fn from_rows(hexagon: &Hexagon, rows: &[Vec<i32>]) -> Result<Self> {
        let shape = (hexagon.rows(), hexagon.columns());
        let flat: Vec<i32> = rows.iter().flatten().copied().collect();

        if rows.len() != shape.0 || rows.iter().any(|row| row.len() != shape.1) {
            return Err(invalid_parameter(
                "rows",
                &format!("{} rows", rows.len()),
                &format!("expected a {}x{} table", shape.0, shape.1),
            ));
        }

        let heights = Array2::from_shape_vec(shape, flat)
            .map_err(|e| invalid_parameter("rows", &"table", &e))?;
        let state = Self { heights };

        if state.is_valid_for(hexagon) {
            Ok(state)
        } else {
            Err(invalid_parameter(
                "rows",
                &"table",
                &format!("not a non-intersecting path system of the {hexagon} hexagon"),
            ))
        }
    }

    fn from_fn(hexagon: &Hexagon, height: impl Fn(i32, i32) -> i32) -> Self {
        let heights = Array2::from_shape_fn((hexagon.rows(), hexagon.columns()), |(k, j)| {
            height(k as i32, j as i32)
        });
        Self { heights }
    }

    /// Height of a table cell
    pub fn get(&self, row: usize, column: usize) -> Option<i32> {
        self.heights.get([row, column]).copied()
    }

    pub(crate) fn set(&mut self, row: usize, column: usize, value: i32) {
        if let Some(cell) = self.heights.get_mut([row, column]) {
            *cell = value;
        }
    }

    /// Underlying height table
    pub const fn heights(&self) -> &Array2<i32> {
        &self.heights
    }

    /// Table shape as (rows, columns)
    pub fn dim(&self) -> (usize, usize) {
        self.heights.dim()
    }

    /// Iterate over table rows, sentinels included
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, i32>> {
        self.heights.axis_iter(Axis(0))
    }

    /// Cell-wise `self <= other`
    pub fn dominated_by(&self, other: &Self) -> bool {
        self.dim() == other.dim()
            && self
                .heights
                .iter()
                .zip(other.heights.iter())
                .all(|(mine, theirs)| mine <= theirs)
    }

    /// Number of cells where `self` is strictly above `other`
    pub fn cells_above(&self, other: &Self) -> usize {
        self.heights
            .iter()
            .zip(other.heights.iter())
            .filter(|(mine, theirs)| mine > theirs)
            .count()
    }

    /// Number of cells where the two tables disagree
    pub fn differing_cells(&self, other: &Self) -> usize {
        self.heights
            .iter()
            .zip(other.heights.iter())
            .filter(|(mine, theirs)| mine != theirs)
            .count()
    }

    /// Check every structural invariant against `hexagon`
    pub fn is_valid_for(&self, hexagon: &Hexagon) -> bool {
        let (rows, columns) = (hexagon.rows(), hexagon.columns());
        if self.dim() != (rows, columns) {
            return false;
        }

        let top = rows - 1;
        let sentinels_fixed = (0..columns).all(|j| {
            let column = j as i32;
            self.get(0, j) == Some(flat_first(hexagon, 0, column))
                && self.get(top, j) == Some(up_first(hexagon, top as i32, column))
        });
        if !sentinels_fixed {
            return false;
        }

        let b = hexagon.b() as i32;
        let endpoints_pinned = (1..top).all(|k| {
            self.get(k, 0) == Some(k as i32) && self.get(k, columns - 1) == Some(k as i32 + b)
        });
        if !endpoints_pinned {
            return false;
        }

        let steps_valid = self.rows().all(|row| {
            row.iter()
                .zip(row.iter().skip(1))
                .all(|(prev, next)| (0..=1).contains(&(next - prev)))
        });

        let rows_ordered = self
            .rows()
            .zip(self.rows().skip(1))
            .all(|(below, above)| below.iter().zip(above.iter()).all(|(lo, hi)| lo < hi));

        steps_valid && rows_ordered
    }
}

impl PartialOrd for PathSystem {
    /// Cell-wise partial order; `None` when neither table dominates the other
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.dominated_by(other), other.dominated_by(self)) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }
}
