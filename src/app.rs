//! Application state and command dispatch.
//!
//! [`App`] owns the dataset, the view state, the comparison set and the user
//! preferences. The front end changes it only through [`App::dispatch`] and
//! renders from [`App::snapshot`], which recomputes every derived view from
//! scratch.

use crate::compare::{ComparisonError, ComparisonSet};
use crate::dataset::{Dataset, LoadError, PlayerRecord};
use crate::export::export_csv;
use crate::prefs::Preferences;
use crate::stats::{
    aggregate, outcome_totals, rating_histogram, scatter_points, win_rate_histogram, Histogram,
    OutcomeTotals, ScatterPoint, Statistics,
};
use crate::view::{SortDirection, SortKey, ViewState, VisibleRow};
use log::{debug, info, warn};
use std::fmt;

/// One user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Sort(SortKey, SortDirection),
    ToggleColumnSort(SortKey),
    TogglePin(String),
    AddToComparison(String),
    RemoveFromComparison(String),
    ClearComparison,
    ToggleDarkMode,
    SetTheme(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    Comparison(ComparisonError),
    UnknownPlayer(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Comparison(e) => write!(f, "{}", e),
            CommandError::UnknownPlayer(name) => write!(f, "Unknown player: {}", name),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<ComparisonError> for CommandError {
    fn from(e: ComparisonError) -> Self {
        CommandError::Comparison(e)
    }
}

/// Everything the front end draws for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<'a> {
    pub rows: Vec<VisibleRow<'a>>,
    /// Over the visible rows.
    pub statistics: Statistics,
    /// Over the whole dataset, for the headline cards.
    pub overall: Statistics,
    pub win_rate_histogram: Histogram,
    pub rating_histogram: Histogram,
    pub outcomes: OutcomeTotals,
    pub scatter: Vec<ScatterPoint<'a>>,
}

#[derive(Debug, Clone, Default)]
pub struct App {
    dataset: Dataset,
    view: ViewState,
    comparison: ComparisonSet,
    preferences: Preferences,
    load_error: Option<LoadError>,
}

impl App {
    /// Start empty, with the view restored from saved preferences.
    pub fn new(preferences: Preferences) -> Self {
        Self {
            view: ViewState::with_pinned(preferences.pinned_player.clone()),
            preferences,
            ..Self::default()
        }
    }

    /// Install the result of the one-time startup load. On failure the
    /// dataset stays empty and the error is kept for display.
    pub fn load(&mut self, result: Result<Dataset, LoadError>) {
        match result {
            Ok(dataset) => {
                info!("Leaderboard ready with {} players", dataset.len());
                self.dataset = dataset;
                self.load_error = None;
            }
            Err(e) => {
                warn!("{}", e);
                self.dataset = Dataset::default();
                self.load_error = Some(e);
            }
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn comparison(&self) -> &ComparisonSet {
        &self.comparison
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    /// Apply a command. A failed command leaves the state untouched.
    pub fn dispatch(&mut self, command: Command) -> Result<(), CommandError> {
        debug!("dispatch {:?}", command);
        match command {
            Command::Search(term) => self.view.set_search_term(term),
            Command::Sort(key, direction) => self.view.set_sort(key, direction),
            Command::ToggleColumnSort(key) => self.view.toggle_column_sort(key),
            Command::TogglePin(name) => {
                self.view.set_pinned(&name);
                self.preferences.pinned_player = self.view.pinned().map(str::to_string);
            }
            Command::AddToComparison(name) => {
                if !self.dataset.contains(&name) {
                    return Err(CommandError::UnknownPlayer(name));
                }
                self.comparison.add(&name)?;
            }
            Command::RemoveFromComparison(name) => {
                self.comparison.remove(&name);
            }
            Command::ClearComparison => self.comparison.clear(),
            Command::ToggleDarkMode => {
                self.preferences.dark_mode = !self.preferences.dark_mode;
            }
            Command::SetTheme(theme) => self.preferences.theme = theme,
        }
        Ok(())
    }

    pub fn visible_rows(&self) -> Vec<VisibleRow<'_>> {
        self.view.visible_rows(&self.dataset)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let rows = self.visible_rows();
        let records = || rows.iter().map(|r| r.record);
        Snapshot {
            statistics: aggregate(records()),
            overall: aggregate(self.dataset.records()),
            win_rate_histogram: win_rate_histogram(records()),
            rating_histogram: rating_histogram(records()),
            outcomes: outcome_totals(records()),
            scatter: scatter_points(records()),
            rows,
        }
    }

    /// Comparison entries that still resolve, in insertion order.
    pub fn comparison_records(&self) -> Vec<&PlayerRecord> {
        self.comparison
            .names()
            .iter()
            .filter_map(|name| self.dataset.get(name))
            .collect()
    }

    /// CSV text of the rows currently shown.
    pub fn export_csv(&self) -> Result<String, csv::Error> {
        export_csv(&self.visible_rows())
    }
}
