//! Chart rendering.
//!
//! - `style`: the explicit chart configuration (`PlotStyle`)
//! - `ascii`: fixed-grid terminal plot
//! - `svg`: Plotters SVG chart

pub mod ascii;
pub mod style;
pub mod svg;

pub use ascii::*;
pub use style::*;
pub use svg::*;
