//! Replayable blocks of random updates
//!
//! A block owns a snapshot of the random stream that produced its updates.
//! Restoring the snapshot and drawing again yields the identical sequence,
//! which is what lets every round restart from the extremal states.

use crate::chain::{Hexagon, PathSystem, apply_update, sample_update};
use crate::io::error::{AlgorithmError, Result};
use rand::RngCore;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Random stream whose exact internal state can be captured and restored
pub trait ReplayableRng: RngCore {
    /// Captured generator state
    type Snapshot;

    /// Capture the current state
    fn snapshot(&self) -> Self::Snapshot;

    /// Rebuild a generator positioned exactly at `snapshot`
    fn restore(snapshot: &Self::Snapshot) -> Self;
}

impl<R: RngCore + Clone> ReplayableRng for R {
    type Snapshot = Self;

    fn snapshot(&self) -> Self {
        self.clone()
    }

    fn restore(snapshot: &Self) -> Self {
        snapshot.clone()
    }
}

/// A run of consecutive updates reproducible from one stream snapshot
pub struct Block<R: ReplayableRng> {
    snapshot: R::Snapshot,
    steps: u64,
    fingerprint: Option<u64>,
}

impl<R: ReplayableRng> Block<R> {
    /// Create a block that will draw `steps` updates from `snapshot`
    pub const fn new(snapshot: R::Snapshot, steps: u64) -> Self {
        Self {
            snapshot,
            steps,
            fingerprint: None,
        }
    }

    /// Number of updates in the block
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Fingerprint of the update sequence, once the block has been replayed
    pub const fn fingerprint(&self) -> Option<u64> {
        self.fingerprint
    }

    /// Apply the block's updates identically to both coupled states
    ///
    /// The first replay records a fingerprint of the drawn updates; every later
    /// replay must reproduce it.
    ///
    /// # Errors
    ///
    /// Returns `ReplayInconsistency` if the restored stream drew a different
    /// update sequence than on the first replay
    pub fn replay(
        &mut self,
        hexagon: &Hexagon,
        lower: &mut PathSystem,
        upper: &mut PathSystem,
        round: usize,
    ) -> Result<()> {
        let mut rng = R::restore(&self.snapshot);
        let mut hasher = DefaultHasher::new();

        for _ in 0..self.steps {
            let update = sample_update(hexagon, &mut rng);
            update.hash(&mut hasher);
            apply_update(lower, update);
            apply_update(upper, update);
        }

        let found = hasher.finish();
        match self.fingerprint {
            None => {
                self.fingerprint = Some(found);
                Ok(())
            }
            Some(expected) if expected == found => Ok(()),
            Some(expected) => Err(AlgorithmError::ReplayInconsistency {
                round,
                block_steps: self.steps,
                expected,
                found,
            }),
        }
    }
}
