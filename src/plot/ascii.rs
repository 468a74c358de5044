//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal or CI log
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - one glyph per series (`*`, `o`, `+`, ...), points joined by lines
//! - price-increase marker: dashed `|` column

use chrono::{Datelike, NaiveDate};

use crate::domain::ChartResult;

const SERIES_GLYPHS: [char; 8] = ['*', 'o', '+', 'x', '#', '%', '@', '&'];
const MARKER_GLYPH: char = '|';

/// Render a chart as text: title, ranges, grid, legend, marker note.
pub fn render_ascii_plot(chart: &ChartResult, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (d_min, d_max) = chart.date_span();
    let (y_min, y_max) = chart.sales_span().unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let x_min = day_number(d_min);
    let x_max = day_number(d_max);

    let mut grid = vec![vec![' '; width]; height];

    // Marker first, dashed: series lines do not overwrite it, points do.
    let mx = map_x(day_number(chart.marker.date), x_min, x_max, width);
    for (row, line) in grid.iter_mut().enumerate() {
        if !chart.marker.dashed || row % 2 == 0 {
            line[mx] = MARKER_GLYPH;
        }
    }

    for (idx, series) in chart.series.iter().enumerate() {
        let glyph = SERIES_GLYPHS[idx % SERIES_GLYPHS.len()];
        let cells: Vec<(usize, usize)> = series
            .points
            .iter()
            .map(|p| {
                (
                    map_x(day_number(p.date), x_min, x_max, width),
                    map_y(p.sales, y_min, y_max, height),
                )
            })
            .collect();

        for pair in cells.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            draw_line(&mut grid, x0, y0, x1, y1, glyph);
        }
        for &(x, y) in &cells {
            grid[y][x] = glyph;
        }
    }

    let mut out = String::new();
    out.push_str(&chart.title);
    out.push('\n');
    out.push_str(&format!(
        "x=[{d_min}, {d_max}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    if chart.is_empty() {
        out.push_str("(no data for this selection)\n");
    }

    let legend = chart
        .series
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            format!(
                "{} {}",
                SERIES_GLYPHS[idx % SERIES_GLYPHS.len()],
                s.name.as_deref().unwrap_or("sales")
            )
        })
        .collect::<Vec<_>>()
        .join("  ");
    if !legend.is_empty() {
        out.push_str(&format!("legend: {legend}\n"));
    }

    out.push_str(&format!(
        "{MARKER_GLYPH} {} @ {} (y={:.2})\n",
        chart.marker.label, chart.marker.date, chart.marker.anchor_sales
    ));

    out
}

fn day_number(d: NaiveDate) -> f64 {
    f64::from(d.num_days_from_ce())
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::render_chart;
    use crate::domain::{CleanedDataset, CleanedSalesRecord, RegionQuery};

    fn record(sales: f64, day: u32, region: &str) -> CleanedSalesRecord {
        CleanedSalesRecord {
            sales,
            date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            region: region.to_string(),
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let ds = CleanedDataset::from_records(vec![record(100.0, 14, "north"), record(110.0, 16, "north")]);
        let chart = render_chart(&ds, &RegionQuery::parse("north"));

        let txt = render_ascii_plot(&chart, 11, 5);
        let expected = concat!(
            "Pink Morsel Sales - North Region\n",
            "x=[2021-01-14, 2021-01-16] | y=[99.50, 110.50]\n",
            "     |   **\n",
            "       **  \n",
            "    *|*    \n",
            "  **       \n",
            "**   |     \n",
            "legend: * sales\n",
            "| Price Increase (Jan 15, 2021) @ 2021-01-15 (y=110.00)\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_selection_still_draws_the_marker() {
        let ds = CleanedDataset::from_records(vec![record(5.0, 3, "north")]);
        let chart = render_chart(&ds, &RegionQuery::parse("atlantis"));

        let txt = render_ascii_plot(&chart, 10, 5);
        assert!(txt.contains("x=[2021-01-14, 2021-01-16]"));
        assert!(txt.contains("(no data for this selection)"));
        assert!(txt.contains("(y=0.00)"));

        let marker_rows = txt.lines().filter(|l| l.contains('|') && l.len() == 10).count();
        assert_eq!(marker_rows, 3);
    }

    #[test]
    fn all_regions_legend_lists_every_series() {
        let ds = CleanedDataset::from_records(vec![
            record(1.0, 10, "north"),
            record(2.0, 11, "south"),
            record(3.0, 20, "east"),
        ]);
        let chart = render_chart(&ds, &RegionQuery::All);
        let txt = render_ascii_plot(&chart, 40, 8);
        assert!(txt.contains("legend: * north  o south  + east\n"));
    }
}
