use crate::numerical::integration_errors::{IntegrationError, validate_bounds, validate_count};
use crate::numerical::quadrature::{Integrand, IntegrationResult, QuadMethod};
use rand::Rng;
use std::time::Instant;

/// uniform point of `[a, b)` drawn from `rng`
pub(crate) fn uniform_point<R: Rng>(rng: &mut R, a: f64, b: f64) -> f64 {
    a + rng.random::<f64>() * (b - a)
}

/// Monte Carlo estimate `(b - a) * mean(f(x_i))` with `samples` points drawn from the
/// thread-local generator. Repeated calls give different values; the standard error
/// shrinks like `1/√samples`.
pub fn monte_carlo<F>(
    f: &F,
    a: f64,
    b: f64,
    samples: usize,
) -> Result<IntegrationResult, IntegrationError>
where
    F: Integrand + ?Sized,
{
    monte_carlo_with_rng(f, a, b, samples, &mut rand::rng())
}

/// Same estimator with an injected generator; a seeded `StdRng` makes it reproducible.
pub fn monte_carlo_with_rng<F, R>(
    f: &F,
    a: f64,
    b: f64,
    samples: usize,
    rng: &mut R,
) -> Result<IntegrationResult, IntegrationError>
where
    F: Integrand + ?Sized,
    R: Rng,
{
    let method = QuadMethod::MonteCarlo;
    validate_bounds(a, b)?;
    validate_count(method, samples)?;
    let start = Instant::now();
    let mut sum = 0.0;
    for _ in 0..samples {
        sum += f.value_at(uniform_point(rng, a, b))?;
    }
    let value = (b - a) / samples as f64 * sum;
    Ok(IntegrationResult::new(method, value, samples, start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_monte_carlo_linear() {
        // ∫₀¹ x dx = 0.5
        let result = monte_carlo(&|x: f64| x, 0.0, 1.0, 100_000).unwrap();
        assert!((result.value - 0.5).abs() < 0.01);
        assert_eq!(result.sample_count, 100_000);
        assert_eq!(result.method, QuadMethod::MonteCarlo);
    }

    #[test]
    fn test_seeded_monte_carlo_is_reproducible() {
        let f = |x: f64| x.sin() + 1.0;
        let seeded = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            monte_carlo_with_rng(&f, 0.0, 3.0, 5_000, &mut rng).unwrap()
        };
        let first = seeded(42);
        let second = seeded(42);
        assert_eq!(first.value, second.value);
        let other = seeded(7);
        assert_ne!(first.value, other.value);
    }

    #[test]
    fn test_constant_function_is_exact() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = monte_carlo_with_rng(&|_x: f64| 2.0, -1.0, 3.0, 50, &mut rng).unwrap();
        assert!((result.value - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_samples_stay_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let x = uniform_point(&mut rng, 2.0, 2.5);
            assert!((2.0..2.5).contains(&x));
        }
    }

    #[test]
    fn test_monte_carlo_validation() {
        let calls = std::cell::Cell::new(0);
        let f = |x: f64| {
            calls.set(calls.get() + 1);
            x
        };
        assert!(matches!(
            monte_carlo(&f, 1.0, 1.0, 100),
            Err(IntegrationError::InvalidBounds { .. })
        ));
        assert!(matches!(
            monte_carlo(&f, 0.0, 1.0, 9),
            Err(IntegrationError::InvalidSampleCount { minimum: 10, .. })
        ));
        assert_eq!(calls.get(), 0);
    }
}
