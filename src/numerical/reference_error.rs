use crate::numerical::integration_errors::IntegrationError;
use crate::numerical::quadrature::{Integrand, simpson_one_third};
use log::{info, warn};
use serde::Serialize;

/// interval count of the Simpson's 1/3 run used as ground truth
pub const REFERENCE_INTERVALS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMetrics {
    pub absolute: f64,
    /// percent of |reference|; equals `absolute` when the reference is exactly zero
    pub relative: f64,
    pub reference_value: f64,
    /// set when the reference is zero and `relative` carries the absolute error
    pub relative_is_absolute: bool,
}

/// High resolution stand-in for the exact integral: Simpson's 1/3 with
/// [`REFERENCE_INTERVALS`] intervals.
pub fn reference_value<F>(f: &F, a: f64, b: f64) -> Result<f64, IntegrationError>
where
    F: Integrand + ?Sized,
{
    let reference = simpson_one_third(f, a, b, REFERENCE_INTERVALS)?;
    info!(
        "reference value on [{}, {}]: {} ({} intervals)",
        a, b, reference.value, reference.sample_count
    );
    Ok(reference.value)
}

pub fn compute_error(estimate: f64, reference: f64) -> ErrorMetrics {
    let absolute = (estimate - reference).abs();
    if reference == 0.0 {
        warn!("reference value is 0, relative error falls back to absolute error");
        return ErrorMetrics {
            absolute,
            relative: absolute,
            reference_value: reference,
            relative_is_absolute: true,
        };
    }
    ErrorMetrics {
        absolute,
        relative: absolute / reference.abs() * 100.0,
        reference_value: reference,
        relative_is_absolute: false,
    }
}
