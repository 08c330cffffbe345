//! examples of usage of RustedQuad
/// comparison of quadrature methods, convergence series and export
pub mod integration_examples;
