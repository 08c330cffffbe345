//! Convergence series: one method evaluated at a geometric sequence of resolutions.
use crate::numerical::integration_errors::{IntegrationError, validate_bounds};
use crate::numerical::monte_carlo::monte_carlo_with_rng;
use crate::numerical::quadrature::{Integrand, QuadMethod, integrate};
use log::info;
use rand::Rng;
use serde::Serialize;

pub const DEFAULT_CONVERGENCE_STEPS: usize = 8;
/// Monte Carlo converges like 1/√N, so it gets this many times more samples per step
pub const MONTE_CARLO_SCALE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvergencePoint {
    pub sample_count: usize,
    pub estimate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceSeries {
    pub method: QuadMethod,
    pub points: Vec<ConvergencePoint>,
}

impl ConvergenceSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_estimate(&self) -> Option<f64> {
        self.points.last().map(|p| p.estimate)
    }

    /// absolute error of every point against `reference`
    pub fn errors_against(&self, reference: f64) -> Vec<(usize, f64)> {
        self.points
            .iter()
            .map(|p| (p.sample_count, (p.estimate - reference).abs()))
            .collect()
    }

    /// Observed order p from the last two points, e_prev / e_last = (n_last / n_prev)^p.
    /// `None` when there are fewer than two points or an error is zero.
    pub fn observed_order(&self, reference: f64) -> Option<f64> {
        let errors = self.errors_against(reference);
        let [.., (n_prev, e_prev), (n_last, e_last)] = errors.as_slice() else {
            return None;
        };
        if *e_prev == 0.0 || *e_last == 0.0 {
            return None;
        }
        Some((e_prev / e_last).ln() / (*n_last as f64 / *n_prev as f64).ln())
    }
}

/// requested count of step `i` (1-based): 2^(i+2), times [`MONTE_CARLO_SCALE`] for Monte Carlo
pub fn step_count(method: QuadMethod, step: usize) -> usize {
    let base = 1usize << (step + 2);
    match method {
        QuadMethod::MonteCarlo => base * MONTE_CARLO_SCALE,
        _ => base,
    }
}

fn run_series(
    method: QuadMethod,
    steps: usize,
    mut evaluate: impl FnMut(usize) -> Result<(usize, f64), IntegrationError>,
) -> Result<ConvergenceSeries, IntegrationError> {
    let mut points = Vec::with_capacity(steps);
    for step in 1..=steps {
        let (sample_count, estimate) = evaluate(step_count(method, step))?;
        points.push(ConvergencePoint {
            sample_count,
            estimate,
        });
    }
    info!("convergence series of {}: {} points", method, points.len());
    Ok(ConvergenceSeries { method, points })
}

/// Evaluates `method` at `steps` geometric resolutions. Each point records the count the
/// method actually used (Simpson's adjustments included).
pub fn analyze_convergence<F>(
    f: &F,
    a: f64,
    b: f64,
    method: QuadMethod,
    steps: usize,
) -> Result<ConvergenceSeries, IntegrationError>
where
    F: Integrand + ?Sized,
{
    validate_bounds(a, b)?;
    run_series(method, steps, |count| {
        let result = integrate(method, f, a, b, count)?;
        Ok((result.sample_count, result.value))
    })
}

/// [`analyze_convergence`] with the Monte Carlo draws taken from `rng`.
pub fn analyze_convergence_with_rng<F, R>(
    f: &F,
    a: f64,
    b: f64,
    method: QuadMethod,
    steps: usize,
    rng: &mut R,
) -> Result<ConvergenceSeries, IntegrationError>
where
    F: Integrand + ?Sized,
    R: Rng,
{
    validate_bounds(a, b)?;
    run_series(method, steps, |count| {
        let result = match method {
            QuadMethod::MonteCarlo => monte_carlo_with_rng(f, a, b, count, rng)?,
            _ => integrate(method, f, a, b, count)?,
        };
        Ok((result.sample_count, result.value))
    })
}
