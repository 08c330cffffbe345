//! # Numerical quadrature
//! Example#1
//! ```
//! // the shortest way: integrate a compiled expression with one rule
//! use RustedQuad::symbolic::symbolic_lambdify::compile;
//! use RustedQuad::numerical::quadrature::simpson_one_third;
//! let f = compile("x^2").unwrap();
//! let result = simpson_one_third(&f, 0.0, 1.0, 100).unwrap();
//! assert!((result.value - 1.0 / 3.0).abs() < 1e-9);
//! println!("{} = {} with {} intervals", result.method, result.value, result.sample_count);
//! ```
//! Example#2
//! ```
//! // compare every method against the reference value
//! use RustedQuad::numerical::integration_api::IntegrationTask;
//! let document = "function expression: \"sin(x) + x^2\" \n bounds lower: 0 upper: 3.14159 \n settings methods: trapezoidal, simpson, simpson38, monte-carlo \n run seed: 42 loglevel: off";
//! let task = IntegrationTask::from_task_document(document).unwrap();
//! let report = task.solve().unwrap();
//! println!("{}", report.results_table());
//! assert_eq!(report.results.len(), 4);
//! ```
/// error type shared by every module and the count/bounds validation
pub mod integration_errors;
/// trapezoidal, Simpson's 1/3 and Simpson's 3/8 rules, the `Integrand` trait and `QuadMethod`
pub mod quadrature;
/// Monte Carlo estimator with the thread generator or an injected one
pub mod monte_carlo;
/// high-resolution reference value and absolute/relative errors
pub mod reference_error;
/// estimates at a geometric sequence of resolutions
pub mod convergence;
/// curve samples and area segments for renderers
pub mod visualization;
/// IntegrationTask: configure, run and export a comparison of methods
pub mod integration_api;
