//! Geometry a renderer needs to draw how each method approximates the area: the curve
//! itself and one descriptor per trapezoid, parabolic arc, cubic arc or random sample.
use crate::numerical::integration_errors::{IntegrationError, validate_bounds, validate_count};
use crate::numerical::monte_carlo::uniform_point;
use crate::numerical::quadrature::{Integrand, QuadMethod};
use crate::symbolic::symbolic_lambdify::linspace;
use itertools::Itertools;
use log::debug;
use rand::Rng;
use serde::Serialize;

/// number of sub-intervals of the Monte Carlo curve
pub const CURVE_RESOLUTION: usize = 100;
/// cap on the Monte Carlo samples a task turns into visualization data
pub const MAX_VISUALIZED_SAMPLES: usize = 500;
/// largest interval or sample count `generate_visualization` accepts
pub const MAX_VISUALIZED_COUNT: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// `y` of the interval variants is the representative height of the drawn shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AreaSegment {
    Trapezoid { x1: f64, x2: f64, y: f64 },
    Parabola { x1: f64, x2: f64, y: f64 },
    Cubic { x1: f64, x2: f64, y: f64 },
    Sample { x: f64, y: f64 },
}

impl AreaSegment {
    /// signed area the segment stands for; zero for a sample point
    pub fn area(&self) -> f64 {
        match *self {
            AreaSegment::Trapezoid { x1, x2, y }
            | AreaSegment::Parabola { x1, x2, y }
            | AreaSegment::Cubic { x1, x2, y } => (x2 - x1) * y,
            AreaSegment::Sample { .. } => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationData {
    pub method: QuadMethod,
    pub curve_points: Vec<CurvePoint>,
    pub area_segments: Vec<AreaSegment>,
}

impl VisualizationData {
    /// sum of the segment areas; reproduces the rule's estimate for the interval methods
    pub fn total_area(&self) -> f64 {
        self.area_segments.iter().map(AreaSegment::area).sum()
    }
}

fn sample_curve<F>(f: &F, a: f64, b: f64, n: usize) -> Result<Vec<CurvePoint>, IntegrationError>
where
    F: Integrand + ?Sized,
{
    linspace(a, b, n + 1)
        .into_iter()
        .map(|x| Ok(CurvePoint { x, y: f.value_at(x)? }))
        .collect()
}

fn interval_segments(method: QuadMethod, nodes: &[CurvePoint]) -> Vec<AreaSegment> {
    match method {
        QuadMethod::Trapezoidal => nodes
            .iter()
            .tuple_windows()
            .map(|(p1, p2)| AreaSegment::Trapezoid {
                x1: p1.x,
                x2: p2.x,
                y: (p1.y + p2.y) / 2.0,
            })
            .collect(),
        QuadMethod::SimpsonOneThird => nodes
            .windows(3)
            .step_by(2)
            .map(|w| AreaSegment::Parabola {
                x1: w[0].x,
                x2: w[2].x,
                y: (w[0].y + 4.0 * w[1].y + w[2].y) / 6.0,
            })
            .collect(),
        QuadMethod::SimpsonThreeEighths => nodes
            .windows(4)
            .step_by(3)
            .map(|w| AreaSegment::Cubic {
                x1: w[0].x,
                x2: w[3].x,
                y: (w[0].y + 3.0 * w[1].y + 3.0 * w[2].y + w[3].y) / 8.0,
            })
            .collect(),
        QuadMethod::MonteCarlo => Vec::new(),
    }
}

/// Curve and area segments of `method` over `[a, b]`; `count` is the interval count
/// (adjusted like the rule adjusts it) or the number of Monte Carlo samples.
pub fn generate_visualization<F>(
    method: QuadMethod,
    f: &F,
    a: f64,
    b: f64,
    count: usize,
) -> Result<VisualizationData, IntegrationError>
where
    F: Integrand + ?Sized,
{
    generate_visualization_with_rng(method, f, a, b, count, &mut rand::rng())
}

pub fn generate_visualization_with_rng<F, R>(
    method: QuadMethod,
    f: &F,
    a: f64,
    b: f64,
    count: usize,
    rng: &mut R,
) -> Result<VisualizationData, IntegrationError>
where
    F: Integrand + ?Sized,
    R: Rng,
{
    validate_bounds(a, b)?;
    validate_count(method, count)?;
    if count > MAX_VISUALIZED_COUNT {
        return Err(IntegrationError::VisualizationTooLarge {
            method,
            requested: count,
            maximum: MAX_VISUALIZED_COUNT,
        });
    }
    let data = if method.is_interval_based() {
        let n = method.adjusted_count(count);
        let curve_points = sample_curve(f, a, b, n)?;
        let area_segments = interval_segments(method, &curve_points);
        VisualizationData {
            method,
            curve_points,
            area_segments,
        }
    } else {
        let curve_points = sample_curve(f, a, b, CURVE_RESOLUTION)?;
        let area_segments = (0..count)
            .map(|_| {
                let x = uniform_point(rng, a, b);
                Ok(AreaSegment::Sample { x, y: f.value_at(x)? })
            })
            .collect::<Result<Vec<_>, IntegrationError>>()?;
        VisualizationData {
            method,
            curve_points,
            area_segments,
        }
    };
    debug!(
        "visualization of {}: {} curve points, {} segments",
        method,
        data.curve_points.len(),
        data.area_segments.len()
    );
    Ok(data)
}
