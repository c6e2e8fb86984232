//! `bylin-reg` library crate.
//!
//! Two-segment (bilinear) least-squares regression at a fixed breakpoint.
//! The binary (`bylin`) is a thin wrapper around this library so that:
//!
//! - the split/fit/evaluate core is testable without spawning processes
//! - the fit can be embedded by other tools without the CLI

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
