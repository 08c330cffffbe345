#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// splits a String expression into tokens: numbers, identifiers, operators and parentheses
pub mod lexer;
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedQuad::symbolic::symbolic_engine::Expr;
/// let parsed_expression = Expr::parse_expression("x^2 + sin(pi*x)").unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert!((parsed_expression.eval(0.5) - 1.25).abs() < 1e-12);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// expression tree of one variable `x` with
/// 1) arithmetic operators + - * / ^ (and ** as a synonym of ^)
/// 2) functions sin, cos, tan (tg), sqrt, exp, log (ln), abs
/// 3) constants pi (π) and e
///# Example#
/// ```
/// use RustedQuad::symbolic::symbolic_engine::Expr;
/// let input = "exp(x) + log(x)";
/// let f = Expr::parse_expression(input).unwrap();
/// // plain evaluation lets NaN and infinities through
/// assert!(f.eval(0.0).is_infinite());
/// // checked evaluation reports them
/// assert!(f.eval_checked(0.0).is_err());
/// let f_res = f.lambdify1D()(1.0);
/// assert!((f_res - std::f64::consts::E).abs() < 1e-12);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
/// turning expressions into Rust functions and compiling user input with a probe evaluation
pub mod symbolic_lambdify;
