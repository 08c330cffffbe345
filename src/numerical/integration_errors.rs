//! Error taxonomy shared by the expression evaluator and every integration method.
use crate::numerical::quadrature::QuadMethod;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    /// expression does not lex/parse, names an unknown identifier or evaluates to NaN/inf
    #[error("invalid function expression `{expression}`: {reason}")]
    InvalidExpression { expression: String, reason: String },
    #[error("lower bound ({lower}) must be finite and less than upper bound ({upper})")]
    InvalidBounds { lower: f64, upper: f64 },
    #[error(
        "{method} needs at least {minimum} {unit}, got {requested}",
        unit = .method.count_unit()
    )]
    InvalidSampleCount {
        method: QuadMethod,
        requested: usize,
        minimum: usize,
    },
    /// visualization data is held in memory, so its size is capped
    #[error(
        "{method} visualization takes at most {maximum} {unit}, got {requested}",
        unit = .method.count_unit()
    )]
    VisualizationTooLarge {
        method: QuadMethod,
        requested: usize,
        maximum: usize,
    },
    #[error("no integration method selected")]
    NoMethodSelected,
    #[error("task document error: {0}")]
    TaskFile(String),
}

impl IntegrationError {
    pub fn invalid_expression(expression: &str, reason: impl Into<String>) -> Self {
        IntegrationError::InvalidExpression {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}

/// Bounds must be finite with `lower < upper`; equal or inverted bounds are rejected.
pub fn validate_bounds(lower: f64, upper: f64) -> Result<(), IntegrationError> {
    if lower.is_finite() && upper.is_finite() && lower < upper {
        Ok(())
    } else {
        Err(IntegrationError::InvalidBounds { lower, upper })
    }
}

pub fn validate_count(method: QuadMethod, requested: usize) -> Result<(), IntegrationError> {
    let minimum = method.min_count();
    if requested < minimum {
        return Err(IntegrationError::InvalidSampleCount {
            method,
            requested,
            minimum,
        });
    }
    Ok(())
}
