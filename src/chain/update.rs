//! Random local moves and the monotone update rule
//!
//! An update names one interior cell and a direction. The same update is
//! applied to every coupled copy of the chain, and the rule is monotone:
//! if `P <= Q` before the update then `P' <= Q'` after it.

use crate::chain::{hexagon::Hexagon, path_system::PathSystem};
use rand::Rng;

/// Which way an update tries to move its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Raise the cell by one
    PushUp,
    /// Lower the cell by one
    PushDown,
}

/// Candidate local move `(k, j, direction)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Update {
    /// Path index in `1..=c`
    pub row: usize,
    /// Column index in `1..=a+b-1`
    pub column: usize,
    /// Requested move
    pub direction: Direction,
}

/// Draw a uniformly random update
///
/// Draws row, column and direction in that order. How many words each draw
/// consumes depends only on the stream position, never on any chain state, so
/// a restored stream reproduces the same updates whatever they are applied to.
pub fn sample_update<R: Rng + ?Sized>(hexagon: &Hexagon, rng: &mut R) -> Update {
    let row = rng.random_range(1..=hexagon.c());
    let column = rng.random_range(1..hexagon.a() + hexagon.b());
    let direction = if rng.random::<bool>() {
        Direction::PushUp
    } else {
        Direction::PushDown
    };

    Update {
        row,
        column,
        direction,
    }
}

/// Apply an update in place, returning whether the cell moved
///
/// Push up fires iff `P[k][j-1] == P[k][j] < P[k][j+1] < P[k+1][j]`; push down
/// fires iff `P[k-1][j] < P[k][j-1] < P[k][j] == P[k][j+1]`. Otherwise, and for
/// any update outside the interior, the state is left untouched.
pub fn apply_update(state: &mut PathSystem, update: Update) -> bool {
    let Update {
        row: k,
        column: j,
        direction,
    } = update;
    let (rows, columns) = state.dim();

    if k == 0 || k + 1 >= rows || j == 0 || j + 1 >= columns {
        return false;
    }

    let neighbourhood = (
        state.get(k, j - 1),
        state.get(k, j),
        state.get(k, j + 1),
    );
    let (Some(left), Some(centre), Some(right)) = neighbourhood else {
        return false;
    };

    match direction {
        Direction::PushUp => {
            let Some(above) = state.get(k + 1, j) else {
                return false;
            };
            if left == centre && centre < right && right < above {
                state.set(k, j, centre + 1);
                return true;
            }
        }
        Direction::PushDown => {
            let Some(below) = state.get(k - 1, j) else {
                return false;
            };
            if below < left && left < centre && centre == right {
                state.set(k, j, centre - 1);
                return true;
            }
        }
    }

    false
}
