//! Aggregates and chart series over a row sequence.

use crate::dataset::PlayerRecord;
use crate::defaults::{RATING_EDGES, WIN_RATE_EDGES};
use serde::Serialize;

/// Headline numbers for a set of rows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Statistics {
    pub count: usize,
    /// Mean rating over records with a numeric rating; 0 when there are none.
    pub mean_rating: f64,
    /// Mean win-rate fraction over records with a numeric win rate; 0 when there are none.
    pub mean_win_rate: f64,
    pub total_games: u64,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

pub fn aggregate<'a, I>(rows: I) -> Statistics
where
    I: IntoIterator<Item = &'a PlayerRecord>,
    I::IntoIter: Clone,
{
    let rows = rows.into_iter();
    Statistics {
        count: rows.clone().count(),
        mean_rating: mean(rows.clone().map(|r| r.rating_mean)),
        mean_win_rate: mean(rows.clone().map(|r| r.win_rate)),
        total_games: rows.filter_map(|r| r.games).map(u64::from).sum(),
    }
}

/// Count `values` into the bins described by `edges`.
///
/// `n + 1` ascending edges give `n` bins `[edges[i], edges[i + 1])`; the last
/// bin also includes its upper edge. Values outside `[edges[0], edges[n]]`
/// (and `NaN`) are dropped without error.
pub fn bucket(values: &[f64], edges: &[f64]) -> Vec<usize> {
    if edges.len() < 2 {
        return Vec::new();
    }
    let bins = edges.len() - 1;
    let mut counts = vec![0usize; bins];

    for &value in values {
        let slot = (0..bins).find(|&i| {
            let upper_ok = if i == bins - 1 {
                value <= edges[i + 1]
            } else {
                value < edges[i + 1]
            };
            value >= edges[i] && upper_ok
        });
        if let Some(i) = slot {
            counts[i] += 1;
        }
    }
    counts
}

/// Labelled histogram ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
}

impl Histogram {
    fn build(values: &[f64], edges: &[f64], suffix: &str) -> Self {
        let labels = edges
            .windows(2)
            .map(|w| format!("{}-{}{}", w[0], w[1], suffix))
            .collect();
        Self {
            labels,
            counts: bucket(values, edges),
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Win-rate distribution in percent over [`WIN_RATE_EDGES`].
pub fn win_rate_histogram<'a>(rows: impl IntoIterator<Item = &'a PlayerRecord>) -> Histogram {
    let values: Vec<f64> = rows.into_iter().map(|r| r.win_rate_percent()).collect();
    Histogram::build(&values, &WIN_RATE_EDGES, "%")
}

/// Rating distribution over [`RATING_EDGES`].
pub fn rating_histogram<'a>(rows: impl IntoIterator<Item = &'a PlayerRecord>) -> Histogram {
    let values: Vec<f64> = rows.into_iter().map(|r| r.rating_mean).collect();
    Histogram::build(&values, &RATING_EDGES, "")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OutcomeTotals {
    pub wins: u64,
    pub draws: u64,
    pub losses: u64,
}

pub fn outcome_totals<'a>(rows: impl IntoIterator<Item = &'a PlayerRecord>) -> OutcomeTotals {
    rows.into_iter().fold(OutcomeTotals::default(), |acc, r| OutcomeTotals {
        wins: acc.wins + r.wins.map(u64::from).unwrap_or(0),
        draws: acc.draws + r.draws.map(u64::from).unwrap_or(0),
        losses: acc.losses + r.losses.map(u64::from).unwrap_or(0),
    })
}

/// One point of the rating vs win-rate scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint<'a> {
    pub name: &'a str,
    pub rating: f64,
    pub win_rate_percent: f64,
}

pub fn scatter_points<'a>(rows: impl IntoIterator<Item = &'a PlayerRecord>) -> Vec<ScatterPoint<'a>> {
    rows.into_iter()
        .map(|r| ScatterPoint {
            name: &r.name,
            rating: r.rating_mean,
            win_rate_percent: r.win_rate_percent(),
        })
        .collect()
}
