use crate::numerical::integration_errors::{IntegrationError, validate_bounds};
use crate::symbolic::symbolic_engine::Expr;
use log::{debug, info};
use std::fmt;

/// point at which [`compile`] checks that the function evaluates to a finite number
pub const PROBE_POINT: f64 = 1.0;

impl Expr {
    /// LAMBDIFICATION - Converting Symbolic Expressions to Executable Functions

    /// Converts the expression into an owned closure of `x`.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.pow(Expr::Const(2.0)); // x^2
    /// let func = f.lambdify1D();
    /// assert_eq!(func(3.0), 9.0);
    /// ```
    pub fn lambdify1D(&self) -> Box<dyn Fn(f64) -> f64 + Send + Sync> {
        let expr = self.clone();
        Box::new(move |x| expr.eval(x))
    }

    /// Evaluates the expression on `num_values` evenly spaced points of `[start, end]`.
    pub fn lambdify1D_from_linspace(&self, start: f64, end: f64, num_values: usize) -> Vec<f64> {
        linspace(start, end, num_values)
            .into_iter()
            .map(|x| self.eval(x))
            .collect()
    }
}

/// `num_values` evenly spaced points from `start` to `end`, both included
pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    match num_values {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num_values - 1) as f64;
            (0..num_values).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// A user function compiled from text: the source and its expression tree.
///
/// Stateless and reentrant; it can be shared between threads and reused by every method.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledFunction {
    source: String,
    expr: Expr,
}

impl CompiledFunction {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// unchecked evaluation, NaN and infinities pass through
    pub fn eval(&self, x: f64) -> f64 {
        self.expr.eval(x)
    }

    /// Evaluates at `x`; division by zero and non-finite values are `InvalidExpression`.
    pub fn call(&self, x: f64) -> Result<f64, IntegrationError> {
        self.expr
            .eval_checked(x)
            .map_err(|reason| IntegrationError::invalid_expression(&self.source, reason))
    }

    pub fn lambdify1D(&self) -> Box<dyn Fn(f64) -> f64 + Send + Sync> {
        self.expr.lambdify1D()
    }

    fn probe(self, x: f64) -> Result<Self, IntegrationError> {
        let value = self.call(x)?;
        debug!("probe of '{}' at x = {}: {}", self.source, x, value);
        Ok(self)
    }
}

impl fmt::Display for CompiledFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

fn parse_to_function(expression: &str) -> Result<CompiledFunction, IntegrationError> {
    let expr = Expr::parse_expression(expression)?;
    info!("compiled '{}' as {}", expression, expr);
    Ok(CompiledFunction {
        source: expression.to_string(),
        expr,
    })
}

/// Compiles a textual expression of `x` and checks it at [`PROBE_POINT`].
///
/// # Examples
/// ```
/// use RustedQuad::symbolic::symbolic_lambdify::compile;
/// let f = compile("exp(x)").unwrap();
/// assert!((f.eval(1.0) - std::f64::consts::E).abs() < 1e-12);
/// ```
pub fn compile(expression: &str) -> Result<CompiledFunction, IntegrationError> {
    parse_to_function(expression)?.probe(PROBE_POINT)
}

/// Compiles for integration over `[lower, upper]`: the bounds are validated first and the
/// function is probed at the lower bound, where every method evaluates it anyway.
pub fn compile_for_bounds(
    expression: &str,
    lower: f64,
    upper: f64,
) -> Result<CompiledFunction, IntegrationError> {
    validate_bounds(lower, upper)?;
    parse_to_function(expression)?.probe(lower)
}
