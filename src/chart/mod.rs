//! Chart construction: dataset + region query -> `ChartResult`.
//!
//! `render_chart` is a pure function over an immutable dataset, so every
//! front-end (ASCII plot, JSON export, TUI) shares the exact same series,
//! titles and marker placement.

use std::path::Path;

use crate::domain::{
    ChartMarker, ChartResult, ChartSeries, CleanedDataset, PRICE_INCREASE_LABEL, RegionQuery, Rgb,
    SalesPoint, price_increase_date, title_case,
};
use crate::error::SalesError;

pub const TITLE_ALL_REGIONS: &str = "Pink Morsel Sales Across All Regions";
pub const X_LABEL: &str = "Date";
pub const Y_LABEL: &str = "Total Sales ($)";

/// Qualitative series palette, cycled when there are more regions than colors.
pub const PALETTE: [Rgb; 10] = [
    Rgb(0x63, 0x6e, 0xfa),
    Rgb(0xef, 0x55, 0x3b),
    Rgb(0x00, 0xcc, 0x96),
    Rgb(0xab, 0x63, 0xfa),
    Rgb(0xff, 0xa1, 0x5a),
    Rgb(0x19, 0xd3, 0xf3),
    Rgb(0xff, 0x66, 0x92),
    Rgb(0xb6, 0xe8, 0x80),
    Rgb(0xff, 0x97, 0xff),
    Rgb(0xfe, 0xcb, 0x52),
];

/// A loaded dataset, ready to answer chart queries.
///
/// Holding a `Renderer` means the dataset loaded successfully; there is no
/// way to unload or reload it in place.
#[derive(Debug, Clone)]
pub struct Renderer {
    dataset: CleanedDataset,
}

impl Renderer {
    pub fn new(dataset: CleanedDataset) -> Self {
        Self { dataset }
    }

    pub fn load(path: &Path) -> Result<Self, SalesError> {
        crate::io::dataset::load_cleaned_dataset(path).map(Self::new)
    }

    pub fn dataset(&self) -> &CleanedDataset {
        &self.dataset
    }

    /// `All` followed by each region (lowercased, deduplicated, in order of
    /// first appearance).
    pub fn region_options(&self) -> Vec<RegionQuery> {
        let mut out = vec![RegionQuery::All];
        for region in self.dataset.regions() {
            let q = RegionQuery::Region(region.to_lowercase());
            if !out.contains(&q) {
                out.push(q);
            }
        }
        out
    }

    pub fn render(&self, query: &RegionQuery) -> ChartResult {
        render_chart(&self.dataset, query)
    }
}

/// Build the chart for one region filter.
///
/// An empty filter result is a valid chart: one series without points and the
/// marker annotation anchored at 0.
pub fn render_chart(dataset: &CleanedDataset, query: &RegionQuery) -> ChartResult {
    let (title, series) = match query {
        RegionQuery::All => (TITLE_ALL_REGIONS.to_string(), series_per_region(dataset)),
        RegionQuery::Region(region) => (
            format!("Pink Morsel Sales - {} Region", title_case(region)),
            vec![single_region_series(dataset, region)],
        ),
    };

    let anchor_sales = series
        .iter()
        .filter_map(ChartSeries::max_sales)
        .reduce(f64::max)
        .unwrap_or(0.0);

    ChartResult {
        title,
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        series,
        marker: ChartMarker {
            date: price_increase_date(),
            label: PRICE_INCREASE_LABEL.to_string(),
            anchor_sales,
            color: Rgb::RED,
            dashed: true,
        },
    }
}

fn series_per_region(dataset: &CleanedDataset) -> Vec<ChartSeries> {
    dataset
        .regions()
        .into_iter()
        .enumerate()
        .map(|(idx, region)| ChartSeries {
            name: Some(region.to_string()),
            color: PALETTE[idx % PALETTE.len()],
            points: dataset
                .records()
                .iter()
                .filter(|r| r.region == region)
                .map(|r| SalesPoint {
                    date: r.date,
                    sales: r.sales,
                })
                .collect(),
        })
        .collect()
}

fn single_region_series(dataset: &CleanedDataset, region: &str) -> ChartSeries {
    let wanted = region.to_lowercase();
    ChartSeries {
        name: None,
        color: PALETTE[0],
        points: dataset
            .records()
            .iter()
            .filter(|r| r.region.to_lowercase() == wanted)
            .map(|r| SalesPoint {
                date: r.date,
                sales: r.sales,
            })
            .collect(),
    }
}
