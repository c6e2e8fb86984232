//! Chart styling.
//!
//! `PlotStyle` is the single place chart appearance is configured. It is passed
//! explicitly to the renderer; nothing in the fitting code reads it. Defaults
//! match the conventional thermal-conductivity figure: Arial 15pt on a
//! 6.5 x 5 inch canvas, inward ticks, hollow blue markers and a translucent
//! black regression line.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickDirection {
    In,
    Out,
}

/// Stroke used for the fitted line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub color: [u8; 3],
    /// Points.
    pub width: f64,
    pub alpha: f64,
    pub label: String,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: [0, 0, 0],
            width: 1.5,
            alpha: 0.6,
            label: "regression".to_string(),
        }
    }
}

/// Hollow markers used for the observed samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Marker diameter in points.
    pub size: f64,
    pub edge_width: f64,
    pub edge_color: [u8; 3],
    pub alpha: f64,
    pub label: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: 5.0,
            edge_width: 2.0,
            edge_color: [0, 0, 255],
            alpha: 0.8,
            label: "experiment".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub font_family: String,
    /// Points.
    pub font_size: f64,
    /// Inches, `[width, height]`.
    pub figure_size: [f64; 2],
    pub dpi: u32,
    pub tick_direction: TickDirection,
    /// Light minor gridlines between labelled ticks.
    pub minor_ticks: bool,
    /// Frame the plotting area so ticks read on all four sides.
    pub mirror_ticks: bool,
    pub x_label: String,
    pub y_label: String,
    pub line: LineStyle,
    pub markers: MarkerStyle,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 15.0,
            figure_size: [6.5, 5.0],
            dpi: 100,
            tick_direction: TickDirection::In,
            minor_ticks: true,
            mirror_ticks: true,
            x_label: "T [degC]".to_string(),
            y_label: "λα / λ".to_string(),
            line: LineStyle::default(),
            markers: MarkerStyle::default(),
        }
    }
}

impl PlotStyle {
    /// Load a style from JSON; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)
            .map_err(|e| AppError::new(2, format!("Failed to open style JSON '{}': {e}", path.display())))?;
        let style: PlotStyle =
            serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid style JSON: {e}")))?;
        Ok(style)
    }

    /// Canvas size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi.max(1) as f64;
        let w = (self.figure_size[0] * dpi).round().max(64.0) as u32;
        let h = (self.figure_size[1] * dpi).round().max(64.0) as u32;
        (w, h)
    }

    /// Convert a length in points to pixels at this style's DPI.
    pub fn pt_to_px(&self, pt: f64) -> f64 {
        pt * self.dpi.max(1) as f64 / 72.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_canvas_is_650_by_500() {
        let style = PlotStyle::default();
        assert_eq!(style.pixel_size(), (650, 500));
        assert!((style.pt_to_px(72.0) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.json");
        std::fs::write(&path, r#"{ "font_size": 11, "line": { "color": [255, 0, 0] } }"#).unwrap();

        let style = PlotStyle::from_json_file(&path).unwrap();
        assert_eq!(style.font_size, 11.0);
        assert_eq!(style.line.color, [255, 0, 0]);
        assert_eq!(style.line.width, 1.5);
        assert_eq!(style.x_label, "T [degC]");
        assert_eq!(style.tick_direction, TickDirection::In);
    }
}
