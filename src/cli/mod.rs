//! Command-line parsing for the Pink Morsel sales tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline and rendering code. Every path option also reads an environment
//! variable (a `.env` file is loaded before parsing).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default data directory holding the raw daily extracts.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default location of the cleaned dataset.
pub const DEFAULT_DATASET: &str = "data/cleaned_sales_data.csv";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "morsel", version, about = "Pink Morsel sales aggregator and dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Combine the daily extracts into the cleaned `Sales,date,region` CSV.
    Aggregate(AggregateArgs),
    /// Render one region's chart as text and optionally export it as JSON.
    Chart(ChartArgs),
    /// Launch the interactive dashboard.
    ///
    /// Loads the cleaned dataset once, then re-renders the chart every time the
    /// region selection changes.
    Dashboard(DashboardArgs),
}

/// Options for `morsel aggregate`.
#[derive(Debug, Args, Clone)]
pub struct AggregateArgs {
    /// Directory containing `daily_sales_data_*.csv`.
    #[arg(long, env = "MORSEL_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Cleaned CSV to write (replaced atomically).
    #[arg(short = 'o', long, env = "MORSEL_OUTPUT", default_value = DEFAULT_DATASET)]
    pub output: PathBuf,

    /// Number of cleaned rows to print after the run.
    #[arg(long, default_value_t = 5)]
    pub preview: usize,
}

/// Options shared by the rendering commands.
#[derive(Debug, Args, Clone)]
pub struct DatasetArgs {
    /// Cleaned CSV produced by `morsel aggregate`.
    #[arg(long, env = "MORSEL_DATASET", default_value = DEFAULT_DATASET)]
    pub dataset: PathBuf,

    /// Region to show (`all`, or a region name; case-insensitive).
    #[arg(short = 'r', long, default_value = "all")]
    pub region: String,
}

/// Options for `morsel chart`.
#[derive(Debug, Args, Clone)]
pub struct ChartArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Plot width (columns, 10-1000).
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u16).range(10..=1000))]
    pub width: u16,

    /// Plot height (rows, 5-500).
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u16).range(5..=500))]
    pub height: u16,

    /// Skip the ASCII plot, print the summary only.
    #[arg(long)]
    pub no_plot: bool,

    /// Write the chart specification (series + marker) to a JSON file.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for `morsel dashboard`.
#[derive(Debug, Args, Clone)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Directory for the dashboard log file.
    #[arg(long, env = "MORSEL_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_flags_parse() {
        let cli = Cli::try_parse_from([
            "morsel",
            "chart",
            "--dataset",
            "out.csv",
            "-r",
            "North",
            "--no-plot",
            "--export-json",
            "north.json",
        ])
        .unwrap();

        let Command::Chart(args) = cli.command else {
            panic!("expected chart subcommand");
        };
        assert_eq!(args.dataset.dataset, PathBuf::from("out.csv"));
        assert_eq!(args.dataset.region, "North");
        assert!(args.no_plot);
        assert_eq!(args.export_json, Some(PathBuf::from("north.json")));
    }

    #[test]
    fn aggregate_preview_flag() {
        let cli = Cli::try_parse_from(["morsel", "aggregate", "--preview", "0", "-o", "x.csv"]).unwrap();
        let Command::Aggregate(args) = cli.command else {
            panic!("expected aggregate subcommand");
        };
        assert_eq!(args.preview, 0);
        assert_eq!(args.output, PathBuf::from("x.csv"));
    }

    #[test]
    fn plot_size_is_bounded() {
        assert!(Cli::try_parse_from(["morsel", "chart", "--width", "100000"]).is_err());
        assert!(Cli::try_parse_from(["morsel", "chart", "--height", "0"]).is_err());

        let cli = Cli::try_parse_from(["morsel", "chart", "--width", "1000", "--height", "500"]).unwrap();
        let Command::Chart(args) = cli.command else {
            panic!("expected chart subcommand");
        };
        assert_eq!((args.width, args.height), (1000, 500));
    }
}
