//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the aggregation, or loads the dataset and renders charts
//! - prints reports/plots and writes optional exports

use clap::Parser;
use tracing::{error, info};

use crate::chart::Renderer;
use crate::cli::{AggregateArgs, ChartArgs, Command, DashboardArgs};
use crate::domain::{AggregateConfig, ChartConfig, RegionQuery};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `morsel` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is fine; the defaults and real environment still apply.
    dotenvy::dotenv().ok();

    // `morsel` and `morsel -r east` behave like `morsel dashboard ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Aggregate(args) => handle_aggregate(args),
        Command::Chart(args) => handle_chart(args),
        Command::Dashboard(args) => handle_dashboard(args),
    }
}

fn handle_aggregate(args: AggregateArgs) -> Result<(), AppError> {
    crate::logging::init_stderr();

    let config = aggregate_config_from_args(&args);
    let output = pipeline::run_aggregate(&config)?;

    println!(
        "{}",
        crate::report::format_aggregate_summary(&output, config.preview_rows)
    );
    Ok(())
}

fn handle_chart(args: ChartArgs) -> Result<(), AppError> {
    crate::logging::init_stderr();

    let config = chart_config_from_args(&args);
    let renderer = Renderer::load(&config.dataset_path)?;
    let chart = renderer.render(&config.query);

    if let Some(stats) = renderer.dataset().stats() {
        println!("{}", crate::report::format_dataset_summary(&stats));
    }
    println!("{}", crate::report::format_chart_summary(&chart));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(&chart, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    if let Some(path) = &config.export_json {
        crate::io::chart_json::write_chart_json(path, &chart)?;
        info!(path = %path.display(), "exported chart JSON");
    }

    Ok(())
}

fn handle_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    crate::logging::init_file(&args.log_dir)?;

    // Load before touching the terminal so a bad dataset prints a plain error.
    let initial = RegionQuery::parse(args.dataset.region.trim());
    let result = Renderer::load(&args.dataset.dataset)
        .map_err(AppError::from)
        .and_then(|renderer| crate::tui::run(renderer, initial));

    // stderr only shows the message after the terminal is restored; keep it in
    // the log file as well.
    if let Err(err) = &result {
        error!(exit_code = err.exit_code(), "{err}");
    }
    result
}

pub fn aggregate_config_from_args(args: &AggregateArgs) -> AggregateConfig {
    AggregateConfig {
        data_dir: args.data_dir.clone(),
        output_path: args.output.clone(),
        preview_rows: args.preview,
    }
}

pub fn chart_config_from_args(args: &ChartArgs) -> ChartConfig {
    ChartConfig {
        dataset_path: args.dataset.dataset.clone(),
        query: RegionQuery::parse(args.dataset.region.trim()),
        plot: !args.no_plot,
        plot_width: usize::from(args.width),
        plot_height: usize::from(args.height),
        export_json: args.export_json.clone(),
    }
}

/// Rewrite argv so `morsel` defaults to `morsel dashboard`.
///
/// Rules:
/// - `morsel`                        -> `morsel dashboard`
/// - `morsel -r east ...`            -> `morsel dashboard -r east ...`
/// - `morsel --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("dashboard".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "aggregate" | "chart" | "dashboard");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "dashboard flags".
    if arg1.starts_with('-') {
        argv.insert(1, "dashboard".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_dashboard() {
        assert_eq!(rewrite_args(argv(&["morsel"])), argv(&["morsel", "dashboard"]));
        assert_eq!(
            rewrite_args(argv(&["morsel", "-r", "east"])),
            argv(&["morsel", "dashboard", "-r", "east"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_are_untouched() {
        for items in [
            &["morsel", "aggregate"][..],
            &["morsel", "chart", "-r", "north"][..],
            &["morsel", "--help"][..],
            &["morsel", "-V"][..],
        ] {
            assert_eq!(rewrite_args(argv(items)), argv(items));
        }
    }

    #[test]
    fn chart_config_resolves_region_and_plot_flag() {
        let cli = crate::cli::Cli::try_parse_from(["morsel", "chart", "-r", "ALL", "--no-plot"]).unwrap();
        let Command::Chart(args) = cli.command else {
            panic!("expected chart subcommand");
        };
        let config = chart_config_from_args(&args);
        assert_eq!(config.query, RegionQuery::All);
        assert!(!config.plot);
        assert!(config.export_json.is_none());
    }

    #[test]
    fn chart_config_trims_the_region_flag() {
        let cli = crate::cli::Cli::try_parse_from(["morsel", "chart", "-r", " north "]).unwrap();
        let Command::Chart(args) = cli.command else {
            panic!("expected chart subcommand");
        };
        let config = chart_config_from_args(&args);
        assert_eq!(config.query, RegionQuery::Region("north".to_string()));
        assert_eq!((config.plot_width, config.plot_height), (100, 25));
    }
}
