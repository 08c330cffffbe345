//! # Symbolic Engine Module
//!
//! Expression tree for single-variable real functions.
//!
//! ## Purpose
//!
//! The engine holds the parsed form of a user supplied function such as `sin(x) + x^2` and
//! evaluates it directly over `f64`. The tree is produced by
//! [`Expr::parse_expression`](crate::symbolic::parse_expr) and is turned into a callable by
//! [`compile`](crate::symbolic::symbolic_lambdify::compile).
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Variable**: `Var(String)` - only `x` is ever produced by the parser
//! - **Constants**: `Const(f64)` - literals and the named constants `pi`, `π`, `e`
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow`
//! - **Functions**: `Exp`, `Ln`, `sin`, `cos`, `tg`, `sqrt`, `abs`
//!
//! ### Key Methods
//! - `eval(x)` - plain evaluation, IEEE semantics (may return NaN or inf)
//! - `eval_checked(x)` - evaluation that reports division by zero and non-finite values
//!
//! ## Interesting Code Features
//!
//! 1. **Recursive Expression Tree**: `Box<Expr>` children, evaluation mirrors the tree
//! 2. **Operator Overloading**: `std::ops` traits build nodes, so `x.clone() * x` reads
//!    like the formula
//! 3. **Unary minus** is stored as `Mul(Const(-1.0), expr)`
#![allow(non_camel_case_types)]

use std::f64;
use std::fmt;

/// Core symbolic expression enum representing a function of one variable as an abstract
/// syntax tree.
///
/// # Examples
/// ```rust, ignore
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// assert_eq!(expr.eval(1.0), 3.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// the integration variable
    Var(String),
    Const(f64),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    /// base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    Exp(Box<Expr>),
    /// natural logarithm, written `ln(x)` or `log(x)`
    Ln(Box<Expr>),
    sin(Box<Expr>),
    cos(Box<Expr>),
    /// tangent - mathematical notation 'tg', written `tan(x)`
    tg(Box<Expr>),
    sqrt(Box<Expr>),
    abs(Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
            Expr::sqrt(expr) => write!(f, "sqrt({})", expr),
            Expr::abs(expr) => write!(f, "abs({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), self.boxed())
    }
}

impl Expr {
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    /// Builds the node for a named single-argument function. `None` for unknown names.
    pub fn function(name: &str, arg: Expr) -> Option<Expr> {
        let arg = arg.boxed();
        let expr = match name {
            "sin" => Expr::sin(arg),
            "cos" => Expr::cos(arg),
            "tan" | "tg" => Expr::tg(arg),
            "sqrt" => Expr::sqrt(arg),
            "exp" => Expr::Exp(arg),
            "log" | "ln" => Expr::Ln(arg),
            "abs" => Expr::abs(arg),
            _ => return None,
        };
        Some(expr)
    }

    /// Named constants: `pi`, `π` and Euler's number `e`.
    pub fn named_constant(name: &str) -> Option<Expr> {
        match name {
            "pi" | "π" => Some(Expr::Const(f64::consts::PI)),
            "e" => Some(Expr::Const(f64::consts::E)),
            _ => None,
        }
    }

    /// Evaluates the tree at `x` with plain IEEE semantics; every variable is bound to `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Var(_) => x,
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => lhs.eval(x) + rhs.eval(x),
            Expr::Sub(lhs, rhs) => lhs.eval(x) - rhs.eval(x),
            Expr::Mul(lhs, rhs) => lhs.eval(x) * rhs.eval(x),
            Expr::Div(lhs, rhs) => lhs.eval(x) / rhs.eval(x),
            Expr::Pow(base, exp) => base.eval(x).powf(exp.eval(x)),
            Expr::Exp(expr) => expr.eval(x).exp(),
            Expr::Ln(expr) => expr.eval(x).ln(),
            Expr::sin(expr) => expr.eval(x).sin(),
            Expr::cos(expr) => expr.eval(x).cos(),
            Expr::tg(expr) => expr.eval(x).tan(),
            Expr::sqrt(expr) => expr.eval(x).sqrt(),
            Expr::abs(expr) => expr.eval(x).abs(),
        }
    }

    /// Like [`Expr::eval`] but division by zero and a NaN/infinite result are errors.
    pub fn eval_checked(&self, x: f64) -> Result<f64, String> {
        let value = self.try_eval(x)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!("evaluates to {} at x = {}", value, x))
        }
    }

    fn try_eval(&self, x: f64) -> Result<f64, String> {
        let value = match self {
            Expr::Div(lhs, rhs) => {
                let numerator = lhs.try_eval(x)?;
                let denominator = rhs.try_eval(x)?;
                if denominator == 0.0 {
                    return Err(format!("division by zero at x = {}", x));
                }
                numerator / denominator
            }
            Expr::Add(lhs, rhs) => lhs.try_eval(x)? + rhs.try_eval(x)?,
            Expr::Sub(lhs, rhs) => lhs.try_eval(x)? - rhs.try_eval(x)?,
            Expr::Mul(lhs, rhs) => lhs.try_eval(x)? * rhs.try_eval(x)?,
            Expr::Pow(base, exp) => base.try_eval(x)?.powf(exp.try_eval(x)?),
            Expr::Exp(expr) => expr.try_eval(x)?.exp(),
            Expr::Ln(expr) => expr.try_eval(x)?.ln(),
            Expr::sin(expr) => expr.try_eval(x)?.sin(),
            Expr::cos(expr) => expr.try_eval(x)?.cos(),
            Expr::tg(expr) => expr.try_eval(x)?.tan(),
            Expr::sqrt(expr) => expr.try_eval(x)?.sqrt(),
            Expr::abs(expr) => expr.try_eval(x)?.abs(),
            Expr::Var(_) | Expr::Const(_) => self.eval(x),
        };
        Ok(value)
    }
}
