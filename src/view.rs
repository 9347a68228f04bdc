//! Search, sort and pin state, and the visible row sequence derived from it.

use crate::dataset::{Dataset, PlayerRecord};
use std::cmp::Ordering;

/// Column the leaderboard can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Rank,
    Name,
    RatingMean,
    RatingDeviation,
    Wins,
    Draws,
    Losses,
    Games,
    WinRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl SortKey {
    /// Columns in display order.
    pub const ALL: [SortKey; 9] = [
        SortKey::Rank,
        SortKey::Name,
        SortKey::RatingMean,
        SortKey::RatingDeviation,
        SortKey::Wins,
        SortKey::Draws,
        SortKey::Losses,
        SortKey::Games,
        SortKey::WinRate,
    ];

    pub fn is_numeric(self) -> bool {
        self != SortKey::Name
    }

    /// Direction used when a column header is clicked for the first time:
    /// bigger-is-better for numbers, alphabetical for names.
    pub fn default_direction(self) -> SortDirection {
        if self.is_numeric() {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Rank => "Rank",
            SortKey::Name => "Player",
            SortKey::RatingMean => "Rating (μ)",
            SortKey::RatingDeviation => "Rating (σ)",
            SortKey::Wins => "Wins",
            SortKey::Draws => "Draws",
            SortKey::Losses => "Losses",
            SortKey::Games => "Games",
            SortKey::WinRate => "Win Rate",
        }
    }

    /// Numeric sort value; `None` for the name column and for sentinels.
    fn numeric_value(self, record: &PlayerRecord) -> Option<f64> {
        let value = match self {
            SortKey::Name => return None,
            SortKey::Rank => record.rank.map(f64::from),
            SortKey::RatingMean => Some(record.rating_mean),
            SortKey::RatingDeviation => Some(record.rating_deviation),
            SortKey::Wins => record.wins.map(f64::from),
            SortKey::Draws => record.draws.map(f64::from),
            SortKey::Losses => record.losses.map(f64::from),
            SortKey::Games => record.games.map(f64::from),
            SortKey::WinRate => Some(record.win_rate),
        };
        value.filter(|v| !v.is_nan())
    }
}

/// Map a sort dropdown value to its preset ordering. Unknown values fall back
/// to rank order.
pub fn sort_preset(value: &str) -> (SortKey, SortDirection) {
    match value {
        "rating" => (SortKey::RatingMean, SortDirection::Descending),
        "winRate" => (SortKey::WinRate, SortDirection::Descending),
        "wins" => (SortKey::Wins, SortDirection::Descending),
        "games" => (SortKey::Games, SortDirection::Descending),
        _ => (SortKey::Rank, SortDirection::Ascending),
    }
}

/// Order two records by `key`. Missing numbers always sort after present ones.
pub fn compare_records(
    key: SortKey,
    direction: SortDirection,
    a: &PlayerRecord,
    b: &PlayerRecord,
) -> Ordering {
    if key == SortKey::Name {
        return direction.apply(a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    }
    match (key.numeric_value(a), key.numeric_value(b)) {
        (Some(x), Some(y)) => direction.apply(x.partial_cmp(&y).unwrap_or(Ordering::Equal)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A row of the visible sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRow<'a> {
    pub record: &'a PlayerRecord,
    pub pinned: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    search_term: String,
    sort_key: SortKey,
    sort_direction: SortDirection,
    /// Player name; resolved against the dataset on every derivation.
    pinned: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort_key: SortKey::Rank,
            sort_direction: SortDirection::Ascending,
            pinned: None,
        }
    }
}

impl ViewState {
    pub fn with_pinned(pinned: Option<String>) -> Self {
        Self {
            pinned,
            ..Self::default()
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// The stored pin, whether or not it resolves.
    pub fn pinned(&self) -> Option<&str> {
        self.pinned.as_deref()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        self.sort_key = key;
        self.sort_direction = direction;
    }

    pub fn toggle_column_sort(&mut self, key: SortKey) {
        if key == self.sort_key {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_key = key;
            self.sort_direction = key.default_direction();
        }
    }

    /// Pin `name`, or clear the pin if it is already pinned. Returns whether a
    /// player is pinned afterwards.
    pub fn set_pinned(&mut self, name: &str) -> bool {
        if self.pinned.as_deref() == Some(name) {
            self.pinned = None;
        } else {
            self.pinned = Some(name.to_string());
        }
        self.pinned.is_some()
    }

    pub fn clear_pin(&mut self) {
        self.pinned = None;
    }

    /// The pinned record, if the stored name still resolves.
    pub fn pinned_record<'a>(&self, dataset: &'a Dataset) -> Option<&'a PlayerRecord> {
        self.pinned.as_deref().and_then(|name| dataset.get(name))
    }

    pub fn matches(&self, record: &PlayerRecord) -> bool {
        self.search_term.is_empty()
            || record
                .name
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
    }

    /// Filter by the search term, stable-sort by the current column, then
    /// move the pinned player (if it survived the filter) to the front.
    pub fn visible_rows<'a>(&self, dataset: &'a Dataset) -> Vec<VisibleRow<'a>> {
        let needle = self.search_term.to_lowercase();
        let mut records: Vec<&PlayerRecord> = dataset
            .records()
            .iter()
            .filter(|r| needle.is_empty() || r.name.to_lowercase().contains(&needle))
            .collect();

        records.sort_by(|a, b| compare_records(self.sort_key, self.sort_direction, a, b));

        let pinned_at = self
            .pinned
            .as_deref()
            .and_then(|name| records.iter().position(|r| r.name == name));
        if let Some(pos) = pinned_at {
            let record = records.remove(pos);
            records.insert(0, record);
        }

        records
            .into_iter()
            .enumerate()
            .map(|(i, record)| VisibleRow {
                record,
                pinned: pinned_at.is_some() && i == 0,
            })
            .collect()
    }
}
