//! Plotters-powered sales chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`: one line per series, a dashed vertical marker
//! and its text annotation.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Number of segments the marker is split into (every other one is drawn).
const MARKER_DASHES: usize = 14;

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call, so `render()`
/// only draws.
pub struct SalesPlottersChart<'a> {
    /// One `(points, color)` pair per series; x is days since CE.
    pub series: &'a [(Vec<(f64, f64)>, RGBColor)],
    /// Marker x position (days since CE).
    pub marker_x: f64,
    /// Y at which the annotation text is anchored.
    pub marker_anchor: f64,
    pub marker_label: &'a str,
    pub marker_color: RGBColor,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    /// Formatting of tick labels.
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for SalesPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&RGBColor(60, 60, 60))
                .light_line_style(&TRANSPARENT)
                .draw()?;

            for (points, color) in self.series {
                chart.draw_series(LineSeries::new(points.iter().copied(), color))?;
                // Pixels make single-point series visible too.
                chart.draw_series(points.iter().map(|&(x, y)| Pixel::new((x, y), *color)))?;
            }

            let mx = self.marker_x;
            let step = (y1 - y0) / MARKER_DASHES as f64;
            for i in (0..MARKER_DASHES).step_by(2) {
                let a = y0 + step * i as f64;
                let b = a + step;
                chart.draw_series(LineSeries::new([(mx, a), (mx, b)], &self.marker_color))?;
            }

            chart.draw_series(std::iter::once(Text::new(
                self.marker_label.to_string(),
                (mx, self.marker_anchor),
                ("sans-serif", 10).into_font().color(&self.marker_color),
            )))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
