//! Core of the tournament leaderboard viewer.
//!
//! Everything in this crate root is presentation-agnostic: the dataset loader,
//! the view state that derives the visible rows, the aggregator behind the
//! headline cards and charts, the comparison set, CSV export, preferences and
//! the optional per-player enrichment records. The Yew front end in `main.rs`
//! drives all of it through [`app::App::dispatch`].

pub mod app;
pub mod compare;
pub mod dataset;
pub mod enrichment;
pub mod export;
pub mod prefs;
pub mod stats;
pub mod view;

pub use app::{App, Command, CommandError, Snapshot};
pub use compare::{ComparisonError, ComparisonSet};
pub use dataset::{load_standings, Dataset, LoadError, PlayerRecord};
pub use stats::{aggregate, bucket, Histogram, OutcomeTotals, ScatterPoint, Statistics};
pub use view::{SortDirection, SortKey, ViewState, VisibleRow};

/// Fixed parameters shared by the core and the front end.
pub mod defaults {
    /// Maximum number of players in the side-by-side comparison.
    pub const COMPARISON_CAPACITY: usize = 3;

    /// Win-rate histogram edges, in percent.
    pub const WIN_RATE_EDGES: [f64; 6] = [0.0, 20.0, 40.0, 60.0, 80.0, 100.0];

    /// Rating (mu) histogram edges.
    pub const RATING_EDGES: [f64; 9] = [0.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 50.0];
}

/// Render an integer field, using the same `NaN` marker as unparseable reals.
pub fn format_count(value: Option<u32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NaN".to_string(),
    }
}

/// Render a fraction in `[0, 1]` as a percentage with one decimal place.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}
