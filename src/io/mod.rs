//! Input/output helpers.
//!
//! - dataset + threshold ingest (`ingest`)
//! - per-sample CSV export (`export`)
//! - fit JSON read/write (`curve`)

pub mod curve;
pub mod export;
pub mod ingest;

pub use curve::*;
pub use export::*;
pub use ingest::*;
