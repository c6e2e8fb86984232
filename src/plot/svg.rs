//! Plotters-powered SVG chart of the regression.
//!
//! The chart overlays the fitted piecewise line on the observed samples. All
//! appearance comes from `PlotStyle`; data bounds are computed here from the
//! samples and the fitted grid.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::domain::{CurveGrid, SampleSet};
use crate::error::AppError;
use crate::plot::style::{PlotStyle, TickDirection};

/// Render the chart to an SVG file.
pub fn render_svg(path: &Path, samples: &SampleSet, curve: &CurveGrid, style: &PlotStyle) -> Result<(), AppError> {
    let root = SVGBackend::new(path, style.pixel_size()).into_drawing_area();
    draw_chart(&root, samples, curve, style)
        .map_err(|e| AppError::new(2, format!("Failed to render SVG '{}': {e}", path.display())))?;
    root.present()
        .map_err(|e| AppError::new(2, format!("Failed to write SVG '{}': {e}", path.display())))?;

    tracing::info!(path = %path.display(), "chart written");
    Ok(())
}

/// Render the chart into an in-memory SVG string.
pub fn render_svg_string(samples: &SampleSet, curve: &CurveGrid, style: &PlotStyle) -> Result<String, AppError> {
    let mut out = String::new();
    {
        let root = SVGBackend::with_string(&mut out, style.pixel_size()).into_drawing_area();
        draw_chart(&root, samples, curve, style)
            .map_err(|e| AppError::new(2, format!("Failed to render SVG: {e}")))?;
        root.present()
            .map_err(|e| AppError::new(2, format!("Failed to render SVG: {e}")))?;
    }
    Ok(out)
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    samples: &SampleSet,
    curve: &CurveGrid,
    style: &PlotStyle,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (x0, x1) = padded_bounds(samples.x().iter().chain(&curve.x).copied());
    let (y0, y1) = padded_bounds(samples.y().iter().chain(&curve.y).copied());

    let font_px = style.pt_to_px(style.font_size);
    let font = (style.font_family.as_str(), font_px).into_font().color(&BLACK);
    let label_area = (font_px * 3.5).round() as u32;

    let mut chart = ChartBuilder::on(root)
        .margin((font_px * 0.8).round() as u32)
        .x_label_area_size(label_area)
        .y_label_area_size(label_area)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    let tick_len = style.pt_to_px(3.5).round() as i32;
    let tick_len = match style.tick_direction {
        TickDirection::In => -tick_len,
        TickDirection::Out => tick_len,
    };
    let minor_style = if style.minor_ticks {
        BLACK.mix(0.08).stroke_width(1)
    } else {
        TRANSPARENT.stroke_width(0)
    };

    chart
        .configure_mesh()
        .x_desc(style.x_label.as_str())
        .y_desc(style.y_label.as_str())
        .x_labels(6)
        .y_labels(6)
        .label_style(font.clone())
        .axis_desc_style(font.clone())
        .set_all_tick_mark_size(tick_len)
        .axis_style(BLACK.stroke_width(1))
        .bold_line_style(TRANSPARENT.stroke_width(0))
        .light_line_style(minor_style)
        .draw()?;

    if style.mirror_ticks {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x0, y0), (x1, y1)],
            BLACK.stroke_width(1),
        )))?;
    }

    // Fitted line.
    let [r, g, b] = style.line.color;
    let line_style = RGBColor(r, g, b)
        .mix(style.line.alpha)
        .stroke_width(style.pt_to_px(style.line.width).round().max(1.0) as u32);
    chart
        .draw_series(LineSeries::new(
            curve.x.iter().copied().zip(curve.y.iter().copied()),
            line_style,
        ))?
        .label(style.line.label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

    // Observed samples as hollow markers.
    let [r, g, b] = style.markers.edge_color;
    let marker_style = RGBColor(r, g, b)
        .mix(style.markers.alpha)
        .stroke_width(style.pt_to_px(style.markers.edge_width).round().max(1.0) as u32);
    let radius = (style.pt_to_px(style.markers.size) / 2.0).round().max(1.0) as u32;
    chart
        .draw_series(samples.iter().map(|p| Circle::new(p, radius, marker_style)))?
        .label(style.markers.label.as_str())
        .legend(move |(x, y)| Circle::new((x + 10, y), radius, marker_style));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(font)
        .background_style(WHITE.mix(0.8).filled())
        .border_style(BLACK.stroke_width(1))
        .draw()?;

    Ok(())
}

fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0);
    }
    let span = max - min;
    let pad = if span > 0.0 { span * 0.05 } else { min.abs().max(1.0) * 0.05 };
    (min - pad, max + pad)
}
