//! Composite Newton-Cotes rules: trapezoidal, Simpson's 1/3 and Simpson's 3/8.
//!
//! Every rule is a pure function of `(f, a, b, n)`. Bounds are checked before the count and
//! both before the first evaluation of `f`. Simpson's rules round the requested interval
//! count up (to even, to a multiple of 3) and report the count actually used.
use crate::numerical::integration_errors::{IntegrationError, validate_bounds, validate_count};
use crate::numerical::monte_carlo::monte_carlo;
use crate::numerical::reference_error::{ErrorMetrics, compute_error};
use crate::symbolic::symbolic_lambdify::CompiledFunction;
use log::debug;
use serde::{Serialize, Serializer};
use std::time::Instant;
use strum_macros::{Display, EnumIter, EnumString};

/// Anything that can be sampled by the integration methods.
///
/// Closures are accepted as they are; a NaN or infinite value is reported as
/// `InvalidExpression`, the same way a compiled function reports it.
pub trait Integrand {
    fn value_at(&self, x: f64) -> Result<f64, IntegrationError>;
}

impl<F> Integrand for F
where
    F: Fn(f64) -> f64 + ?Sized,
{
    fn value_at(&self, x: f64) -> Result<f64, IntegrationError> {
        let y = self(x);
        if y.is_finite() {
            Ok(y)
        } else {
            Err(IntegrationError::invalid_expression(
                "<closure>",
                format!("evaluates to {} at x = {}", y, x),
            ))
        }
    }
}

impl Integrand for CompiledFunction {
    fn value_at(&self, x: f64) -> Result<f64, IntegrationError> {
        self.call(x)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum QuadMethod {
    #[strum(serialize = "trapezoidal", serialize = "trapezoid", to_string = "Trapezoidal Rule")]
    Trapezoidal,
    #[strum(serialize = "simpson", serialize = "simpson13", to_string = "Simpson's 1/3 Rule")]
    SimpsonOneThird,
    #[strum(serialize = "simpson38", to_string = "Simpson's 3/8 Rule")]
    SimpsonThreeEighths,
    #[strum(serialize = "monte-carlo", serialize = "montecarlo", to_string = "Monte Carlo")]
    MonteCarlo,
}

impl QuadMethod {
    /// short identifier used in task files and as export key
    pub fn id(&self) -> &'static str {
        match self {
            QuadMethod::Trapezoidal => "trapezoidal",
            QuadMethod::SimpsonOneThird => "simpson",
            QuadMethod::SimpsonThreeEighths => "simpson38",
            QuadMethod::MonteCarlo => "monte-carlo",
        }
    }

    pub fn is_interval_based(&self) -> bool {
        !matches!(self, QuadMethod::MonteCarlo)
    }

    pub fn count_unit(&self) -> &'static str {
        if self.is_interval_based() {
            "intervals"
        } else {
            "samples"
        }
    }

    pub fn min_count(&self) -> usize {
        if self.is_interval_based() { 2 } else { 10 }
    }

    /// the interval count the rule really uses for a requested count; a count that cannot
    /// be rounded up without overflow is rounded down instead
    pub fn adjusted_count(&self, requested: usize) -> usize {
        match self {
            QuadMethod::SimpsonOneThird => requested
                .checked_add(requested % 2)
                .unwrap_or(requested - requested % 2),
            QuadMethod::SimpsonThreeEighths => requested
                .div_ceil(3)
                .checked_mul(3)
                .unwrap_or(requested - requested % 3),
            QuadMethod::Trapezoidal | QuadMethod::MonteCarlo => requested,
        }
    }
}

impl Serialize for QuadMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of one method invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationResult {
    pub method: QuadMethod,
    pub value: f64,
    /// intervals for the Newton-Cotes rules (after adjustment), samples for Monte Carlo
    pub sample_count: usize,
    /// wall-clock time, diagnostic only
    pub elapsed_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorMetrics>,
}

impl IntegrationResult {
    pub(crate) fn new(method: QuadMethod, value: f64, sample_count: usize, start: Instant) -> Self {
        let elapsed_time_ms = start.elapsed().as_secs_f64() * 1e3;
        debug!(
            "{}: {} with {} {} in {:.4} ms",
            method,
            value,
            sample_count,
            method.count_unit(),
            elapsed_time_ms
        );
        IntegrationResult {
            method,
            value,
            sample_count,
            elapsed_time_ms,
            error: None,
        }
    }

    pub fn method_name(&self) -> String {
        self.method.to_string()
    }

    pub fn with_error(self, metrics: ErrorMetrics) -> Self {
        IntegrationResult {
            error: Some(metrics),
            ..self
        }
    }

    /// attaches the error metrics against `reference`
    pub fn with_reference(self, reference: f64) -> Self {
        let metrics = compute_error(self.value, reference);
        self.with_error(metrics)
    }
}

/// f(a) + f(b) + Σ_{i=1}^{n-1} w(i) f(a + i h)
fn weighted_sum<F>(
    f: &F,
    a: f64,
    b: f64,
    n: usize,
    weight: impl Fn(usize) -> f64,
) -> Result<f64, IntegrationError>
where
    F: Integrand + ?Sized,
{
    let h = (b - a) / n as f64;
    let mut sum = f.value_at(a)? + f.value_at(b)?;
    for i in 1..n {
        sum += weight(i) * f.value_at(a + i as f64 * h)?;
    }
    Ok(sum)
}

/// Composite trapezoidal rule, error O(h²).
pub fn trapezoidal<F>(
    f: &F,
    a: f64,
    b: f64,
    n: usize,
) -> Result<IntegrationResult, IntegrationError>
where
    F: Integrand + ?Sized,
{
    let method = QuadMethod::Trapezoidal;
    validate_bounds(a, b)?;
    validate_count(method, n)?;
    let start = Instant::now();
    let h = (b - a) / n as f64;
    let sum = weighted_sum(f, a, b, n, |_| 2.0)?;
    Ok(IntegrationResult::new(method, h / 2.0 * sum, n, start))
}

/// Composite Simpson's 1/3 rule, error O(h⁴). An odd `n` is raised to `n + 1`.
pub fn simpson_one_third<F>(
    f: &F,
    a: f64,
    b: f64,
    n: usize,
) -> Result<IntegrationResult, IntegrationError>
where
    F: Integrand + ?Sized,
{
    let method = QuadMethod::SimpsonOneThird;
    validate_bounds(a, b)?;
    validate_count(method, n)?;
    let start = Instant::now();
    let n = method.adjusted_count(n);
    let h = (b - a) / n as f64;
    let sum = weighted_sum(f, a, b, n, |i| if i % 2 == 0 { 2.0 } else { 4.0 })?;
    Ok(IntegrationResult::new(method, h / 3.0 * sum, n, start))
}

/// Composite Simpson's 3/8 rule, error O(h⁴). `n` is raised to the next multiple of 3.
pub fn simpson_three_eighths<F>(
    f: &F,
    a: f64,
    b: f64,
    n: usize,
) -> Result<IntegrationResult, IntegrationError>
where
    F: Integrand + ?Sized,
{
    let method = QuadMethod::SimpsonThreeEighths;
    validate_bounds(a, b)?;
    validate_count(method, n)?;
    let start = Instant::now();
    let n = method.adjusted_count(n);
    let h = (b - a) / n as f64;
    let sum = weighted_sum(f, a, b, n, |i| if i % 3 == 0 { 2.0 } else { 3.0 })?;
    Ok(IntegrationResult::new(method, 3.0 * h / 8.0 * sum, n, start))
}

/// Runs `method` with `count` intervals (or samples for Monte Carlo).
pub fn integrate<F>(
    method: QuadMethod,
    f: &F,
    a: f64,
    b: f64,
    count: usize,
) -> Result<IntegrationResult, IntegrationError>
where
    F: Integrand + ?Sized,
{
    match method {
        QuadMethod::Trapezoidal => trapezoidal(f, a, b, count),
        QuadMethod::SimpsonOneThird => simpson_one_third(f, a, b, count),
        QuadMethod::SimpsonThreeEighths => simpson_three_eighths(f, a, b, count),
        QuadMethod::MonteCarlo => monte_carlo(f, a, b, count),
    }
}
