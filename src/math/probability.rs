/// Error function approximation using Abramowitz and Stegun method
///
/// Accurate to about 1.5e-7, which is plenty for p-values of the uniformity
/// check while avoiding a statistics dependency.
pub fn erf(x: f64) -> f64 {
    let a1 = 0.254_829_592_f64;
    let a2 = -0.284_496_736_f64;
    let a3 = 1.421_413_741_f64;
    let a4 = -1.453_152_027_f64;
    let a5 = 1.061_405_429_f64;
    let p = 0.327_591_1_f64;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / p.mul_add(x, 1.0);
    let y = (((((a5.mul_add(t, a4)).mul_add(t, a3)).mul_add(t, a2)).mul_add(t, a1)) * t)
        .mul_add(-(-x * x).exp(), 1.0);

    sign * y
}

/// Upper tail `P(Z > z)` of the standard normal distribution
pub fn standard_normal_upper_tail(z: f64) -> f64 {
    0.5 * (1.0 - erf(z / std::f64::consts::SQRT_2))
}

/// Upper tail `P(X > statistic)` for `X ~ ChiSquared(degrees_of_freedom)`
///
/// Uses the Wilson-Hilferty cube-root transformation to a normal variable.
/// With zero degrees of freedom the statistic is degenerate at 0.
pub fn chi_squared_upper_tail(statistic: f64, degrees_of_freedom: usize) -> f64 {
    if degrees_of_freedom == 0 {
        return if statistic > 0.0 { 0.0 } else { 1.0 };
    }
    if statistic <= 0.0 {
        return 1.0;
    }

    let k = degrees_of_freedom as f64;
    let spread = 2.0 / (9.0 * k);
    let z = ((statistic / k).cbrt() - (1.0 - spread)) / spread.sqrt();

    standard_normal_upper_tail(z)
}

/// Pearson's chi-squared statistic of observed counts against a uniform
/// expectation over `categories` outcomes
///
/// Categories that were never observed do not appear in `observed` but still
/// contribute their full expected count. Returns `None` when there are no
/// categories or no observations.
pub fn uniform_chi_squared(observed: &[usize], categories: usize) -> Option<f64> {
    let total: usize = observed.iter().sum();
    if categories == 0 || total == 0 || observed.len() > categories {
        return None;
    }

    let expected = total as f64 / categories as f64;
    let seen: f64 = observed
        .iter()
        .map(|&count| {
            let deviation = count as f64 - expected;
            deviation * deviation / expected
        })
        .sum();
    let unseen = (categories - observed.len()) as f64 * expected;

    Some(seen + unseen)
}
