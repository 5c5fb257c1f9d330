//! Goodness-of-fit statistics for the statistical simulation tests.

/// Pearson's chi-square statistic of `observed` counts against `expected`
/// probabilities.
pub fn chi_square(observed: &[u64], expected: &[f64]) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let total = observed.iter().sum::<u64>() as f64;

    observed
        .iter()
        .zip(expected)
        .map(|(observed, expected)| {
            #[allow(clippy::cast_precision_loss)]
            let observed = *observed as f64;
            let expected = expected * total;

            (observed - expected).powi(2) / expected
        })
        .sum()
}

/// Upper 5% critical values of the chi-square distribution, indexed by the
/// degrees of freedom.
pub const CHI_SQUARE_CRITICAL_5: [f64; 6] = [0.0, 3.841, 5.991, 7.815, 9.488, 11.070];

/// The Anderson-Darling statistic `A^2` of `samples` against a fully
/// specified distribution with cumulative distribution function `cdf`.
pub fn anderson_darling<F: Fn(f64) -> f64>(samples: &mut [f64], cdf: F) -> f64 {
    samples.sort_unstable_by(f64::total_cmp);

    #[allow(clippy::cast_precision_loss)]
    let n = samples.len() as f64;

    let sum = samples
        .iter()
        .zip(samples.iter().rev())
        .enumerate()
        .map(|(i, (low, high))| {
            #[allow(clippy::cast_precision_loss)]
            let weight = (2 * i + 1) as f64;

            weight * (cdf(*low).ln() + (1.0 - cdf(*high)).ln())
        })
        .sum::<f64>();

    -n - sum / n
}

/// Upper 5% critical value of `A^2` for a fully specified distribution.
pub const ANDERSON_DARLING_CRITICAL_5: f64 = 2.492;

#[test]
fn perfect_fit_has_no_chi_square() {
    assert!(chi_square(&[25, 75], &[0.25, 0.75]).abs() < 1e-12);
    assert!(chi_square(&[50, 50], &[0.25, 0.75]) > CHI_SQUARE_CRITICAL_5[1]);
}

#[test]
fn anderson_darling_rejects_a_shifted_sample() {
    let uniform_cdf = |x: f64| x.clamp(1e-12, 1.0 - 1e-12);

    let mut fitting = (0..1000).map(|i| (f64::from(i) + 0.5) / 1000.0).collect::<Vec<_>>();
    let mut shifted = fitting.iter().map(|x| x * 0.5).collect::<Vec<_>>();

    assert!(anderson_darling(&mut fitting, uniform_cdf) < ANDERSON_DARLING_CRITICAL_5);
    assert!(anderson_darling(&mut shifted, uniform_cdf) > ANDERSON_DARLING_CRITICAL_5);
}
