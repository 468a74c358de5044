//! Ratatui-based dashboard.
//!
//! The dashboard shows a region picker and the sales chart for the selected
//! region. Each selection change calls `Renderer::render` again; nothing is
//! cached between interactions.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use plotters::style::RGBColor;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};
use tracing::{debug, info, warn};

use crate::chart::Renderer;
use crate::domain::{ChartResult, RegionQuery, Rgb};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::SalesPlottersChart;

const DASHBOARD_TITLE: &str = "Soul Foods Pink Morsel Sales Dashboard";
const DASHBOARD_SUBTITLE: &str =
    "Visualising the impact of the January 15, 2021 price increase on sales, with region-specific insights.";

/// Start the dashboard with an already-loaded dataset.
pub fn run(renderer: Renderer, initial: RegionQuery) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(renderer, initial);
    info!(region = %app.current().label(), "dashboard started");
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    renderer: Renderer,
    options: Vec<RegionQuery>,
    selected: usize,
    chart: ChartResult,
    status: String,
}

impl App {
    fn new(renderer: Renderer, initial: RegionQuery) -> Self {
        let mut options = renderer.region_options();
        let wanted = initial.label();
        let selected = match options.iter().position(|q| q.label() == wanted) {
            Some(idx) => idx,
            None => {
                // Keep an unknown region selectable; it renders as an empty chart.
                options.push(initial);
                options.len() - 1
            }
        };

        let chart = renderer.render(&options[selected]);
        let mut app = Self {
            renderer,
            options,
            selected,
            chart,
            status: String::new(),
        };
        app.status = app.selection_status();
        app
    }

    fn current(&self) -> &RegionQuery {
        &self.options[self.selected]
    }

    fn select(&mut self, idx: usize) {
        if idx >= self.options.len() || idx == self.selected {
            return;
        }
        self.selected = idx;
        self.chart = self.renderer.render(&self.options[idx]);
        debug!(region = %self.current().label(), points = self.chart.point_count(), "region changed");
        if self.chart.is_empty() {
            warn!(region = %self.current().label(), "no rows for selected region");
        }
        self.status = self.selection_status();
    }

    fn selection_status(&self) -> String {
        if self.chart.is_empty() {
            format!("No sales rows for '{}'.", self.current().display_name())
        } else {
            format!(
                "{}: {} points in {} series",
                self.current().display_name(),
                self.chart.point_count(),
                self.chart.series.len()
            )
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        info!("dashboard closed");
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let n = self.options.len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left | KeyCode::Char('h') => self.select((self.selected + n - 1) % n),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.select((self.selected + 1) % n),
            KeyCode::Char('a') => self.select(0),
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(d) = c.to_digit(10) {
                    self.select(d as usize - 1);
                }
            }
            KeyCode::Char('e') => self.export_current(),
            _ => {}
        }
        false
    }

    fn export_current(&mut self) {
        let ts = Local::now().format("%Y%m%d_%H%M%S");
        let path = PathBuf::from("charts").join(format!(
            "morsel_chart_{}_{ts}.json",
            sanitize_label(&self.current().label())
        ));
        match crate::io::chart_json::write_chart_json(&path, &self.chart) {
            Ok(()) => {
                info!(path = %path.display(), "exported chart JSON");
                self.status = format!("Wrote chart: {}", path.display());
            }
            Err(err) => {
                warn!(error = %err, "chart export failed");
                self.status = format!("Export failed: {err}");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_picker(frame, chunks[1]);
        self.draw_chart(frame, chunks[2]);
        self.draw_legend(frame, chunks[3]);
        self.draw_footer(frame, chunks[4]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                DASHBOARD_TITLE,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(DASHBOARD_SUBTITLE, Style::default().fg(Color::Gray))),
        ];
        let p = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_picker(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut spans = vec![Span::styled(
            "Select Region: ",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        for (idx, option) in self.options.iter().enumerate() {
            let (mark, style) = if idx == self.selected {
                ("(•)", Style::default().fg(Color::Black).bg(Color::White))
            } else {
                ("( )", Style::default().fg(Color::Gray))
            };
            spans.push(Span::styled(format!("{mark} {}", option.display_name()), style));
            spans.push(Span::raw("  "));
        }

        let p = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(self.chart.title.as_str())
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(data) = prepare_chart(&self.chart) else {
            warn!(title = %self.chart.title, "chart bounds are not drawable");
            let msg = Paragraph::new("Chart unavailable for this selection.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let widget = SalesPlottersChart {
            series: &data.series,
            marker_x: data.marker_x,
            marker_anchor: data.marker_anchor,
            marker_label: &self.chart.marker.label,
            marker_color: to_plotters(self.chart.marker.color),
            x_bounds: data.x_bounds,
            y_bounds: data.y_bounds,
            x_label: &self.chart.x_label,
            y_label: &self.chart.y_label,
            fmt_x: fmt_axis_date,
            fmt_y: fmt_axis_sales,
        };
        frame.render_widget(widget, inner);

        if self.chart.is_empty() {
            let hint = Paragraph::new("No data for this selection.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow));
            let rect = Rect {
                x: inner.x,
                y: inner.y + inner.height / 2,
                width: inner.width,
                height: 1.min(inner.height),
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_legend(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut spans = Vec::new();
        for s in &self.chart.series {
            let Rgb(r, g, b) = s.color;
            spans.push(Span::styled("━━ ", Style::default().fg(Color::Rgb(r, g, b))));
            let name = s
                .name
                .clone()
                .unwrap_or_else(|| self.current().display_name());
            spans.push(Span::raw(format!("{name}   ")));
        }
        let Rgb(r, g, b) = self.chart.marker.color;
        spans.push(Span::styled("┆ ", Style::default().fg(Color::Rgb(r, g, b))));
        spans.push(Span::raw(self.chart.marker.label.as_str()));

        let p = Paragraph::new(Line::from(spans)).block(Block::default().title("Region").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ region  a all  1-9 pick  e export json  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(self.status.as_str(), Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Chart data in plotters coordinates (x = days since CE).
struct PreparedChart {
    series: Vec<(Vec<(f64, f64)>, RGBColor)>,
    marker_x: f64,
    marker_anchor: f64,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

fn prepare_chart(chart: &ChartResult) -> Option<PreparedChart> {
    let (d0, d1) = chart.date_span();
    let x_bounds = [day_number(d0), day_number(d1)];

    let (mut y_min, mut y_max) = chart.sales_span().unwrap_or((0.0, 1.0));
    y_min = y_min.min(chart.marker.anchor_sales);
    y_max = y_max.max(chart.marker.anchor_sales);
    if !(y_min.is_finite() && y_max.is_finite()) || y_max <= y_min {
        return None;
    }
    // Extra headroom on top so the annotation above the maximum stays visible.
    let span = y_max - y_min;
    let y_bounds = [y_min - span * 0.05, y_max + span * 0.15];
    let marker_anchor = chart.marker.anchor_sales + span * 0.05;

    let series = chart
        .series
        .iter()
        .map(|s| {
            let points = s
                .points
                .iter()
                .map(|p| (day_number(p.date), p.sales))
                .collect();
            (points, to_plotters(s.color))
        })
        .collect();

    Some(PreparedChart {
        series,
        marker_x: day_number(chart.marker.date),
        marker_anchor,
        x_bounds,
        y_bounds,
    })
}

fn day_number(d: NaiveDate) -> f64 {
    f64::from(d.num_days_from_ce())
}

fn to_plotters(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn fmt_axis_date(v: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(v.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn fmt_axis_sales(v: f64) -> String {
    format!("{v:.0}")
}

fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CleanedDataset, CleanedSalesRecord};

    fn renderer() -> Renderer {
        let rec = |sales: f64, day: u32, region: &str| CleanedSalesRecord {
            sales,
            date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            region: region.to_string(),
        };
        Renderer::new(CleanedDataset::from_records(vec![
            rec(5.0, 10, "north"),
            rec(8.0, 20, "south"),
            rec(6.0, 12, "north"),
        ]))
    }

    #[test]
    fn app_cycles_through_regions() {
        let mut app = App::new(renderer(), RegionQuery::All);
        assert_eq!(app.options.len(), 3);
        assert_eq!(app.chart.series.len(), 2);

        assert!(!app.handle_key(KeyCode::Right));
        assert_eq!(app.current(), &RegionQuery::Region("north".to_string()));
        assert_eq!(app.chart.series.len(), 1);
        assert_eq!(app.chart.series[0].points.len(), 2);

        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.current(), &RegionQuery::Region("south".to_string()));

        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.current(), &RegionQuery::All);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn unknown_initial_region_is_selectable_and_empty() {
        let app = App::new(renderer(), RegionQuery::parse("Atlantis"));
        assert_eq!(app.options.len(), 4);
        assert!(app.chart.is_empty());
        assert_eq!(app.chart.marker.anchor_sales, 0.0);
        assert_eq!(app.status, "No sales rows for 'Atlantis'.");
    }

    #[test]
    fn initial_region_matches_case_insensitively() {
        let app = App::new(renderer(), RegionQuery::parse("SOUTH"));
        assert_eq!(app.options.len(), 3);
        assert_eq!(app.current(), &RegionQuery::Region("south".to_string()));
    }

    #[test]
    fn prepared_chart_leaves_room_for_the_annotation() {
        let chart = renderer().render(&RegionQuery::All);
        let data = prepare_chart(&chart).unwrap();
        assert!(data.y_bounds[1] > data.marker_anchor);
        assert!(data.marker_anchor > chart.marker.anchor_sales);
        assert!(data.x_bounds[0] <= data.marker_x && data.marker_x <= data.x_bounds[1]);
    }

    #[test]
    fn empty_chart_still_prepares() {
        let chart = renderer().render(&RegionQuery::parse("nowhere"));
        assert!(prepare_chart(&chart).is_some());
    }

    #[test]
    fn axis_formatting() {
        let d = NaiveDate::from_ymd_opt(2021, 1, 15).unwrap();
        assert_eq!(fmt_axis_date(day_number(d)), "2021-01-15");
        assert_eq!(sanitize_label("north east"), "north_east");
    }
}
