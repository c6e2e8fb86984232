//! Mathematical utilities: segment moments and least squares.

pub mod ols;

pub use ols::*;
