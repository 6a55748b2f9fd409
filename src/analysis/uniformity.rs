//! Goodness-of-fit check of sampled tilings against the uniform distribution

use crate::analysis::enumeration::macmahon_count;
use crate::chain::{Hexagon, PathSystem};
use crate::io::error::{Result, invalid_parameter};
use crate::math::probability::{chi_squared_upper_tail, uniform_chi_squared};
use crate::sampler::{CftpSampler, SamplerConfig};
use std::collections::HashMap;

// Pearson's approximation is unreliable below this many expected hits per tiling
const MIN_EXPECTED_PER_TILING: usize = 5;

/// Outcome of a chi-squared uniformity check
#[derive(Debug, Clone)]
pub struct UniformityReport {
    /// Hexagon that was sampled
    pub hexagon: Hexagon,
    /// Number of independent runs
    pub samples: usize,
    /// Number of distinct tilings observed
    pub distinct: usize,
    /// Number of tilings that exist
    pub tilings: usize,
    /// Pearson's chi-squared statistic
    pub statistic: f64,
    /// Degrees of freedom (`tilings - 1`)
    pub degrees_of_freedom: usize,
    /// Probability of a statistic at least this large under uniformity
    pub p_value: f64,
}

impl UniformityReport {
    /// Whether the sample frequencies are consistent with uniformity at the
    /// given significance level
    pub const fn is_consistent(&self, significance: f64) -> bool {
        self.p_value >= significance
    }
}

/// Draw `samples` exact samples with seeds `base_seed, base_seed + 1, ...`
/// and count how often each tiling occurs
///
/// `on_sample` is called with the number of completed samples after each run.
///
/// # Errors
///
/// Propagates any sampler error; a single failed run aborts the tally
pub fn tally_samples(
    hexagon: &Hexagon,
    samples: usize,
    base_seed: u64,
    config: SamplerConfig,
    mut on_sample: impl FnMut(usize),
) -> Result<HashMap<PathSystem, usize>> {
    let mut tally = HashMap::new();

    for index in 0..samples {
        let seed = base_seed.wrapping_add(index as u64);
        let sample = CftpSampler::new(*hexagon, seed, config).run()?;
        *tally.entry(sample.state).or_insert(0) += 1;
        on_sample(index + 1);
    }

    Ok(tally)
}

/// Sample repeatedly and test the frequencies against the uniform distribution
///
/// # Errors
///
/// Returns an error if:
/// - The hexagon has too many tilings for `samples` runs to test meaningfully
/// - The tiling count overflows
/// - Any sampler run fails
pub fn check_uniformity(
    hexagon: &Hexagon,
    samples: usize,
    base_seed: u64,
    config: SamplerConfig,
    on_sample: impl FnMut(usize),
) -> Result<UniformityReport> {
    let tilings: usize = macmahon_count(hexagon)?;
    let needed = tilings.saturating_mul(MIN_EXPECTED_PER_TILING);
    if samples < needed {
        return Err(invalid_parameter(
            "samples",
            &samples,
            &format!("{hexagon} has {tilings} tilings; at least {needed} samples are needed"),
        ));
    }

    let tally = tally_samples(hexagon, samples, base_seed, config, on_sample)?;
    let observed: Vec<usize> = tally.values().copied().collect();
    let statistic = uniform_chi_squared(&observed, tilings).ok_or_else(|| {
        invalid_parameter(
            "samples",
            &samples,
            &format!("{} distinct states exceed the {tilings} tilings", observed.len()),
        )
    })?;
    let degrees_of_freedom = tilings - 1;

    Ok(UniformityReport {
        hexagon: *hexagon,
        samples,
        distinct: observed.len(),
        tilings,
        statistic,
        degrees_of_freedom,
        p_value: chi_squared_upper_tail(statistic, degrees_of_freedom),
    })
}
