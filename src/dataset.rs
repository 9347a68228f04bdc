//! Player records and the standings loader.
//!
//! The standings source is a comma-separated table with a header row and nine
//! positional fields per player:
//! `rank, name, rating_mu, rating_sigma, wins, draws, losses, games, win_rate`.
//! Unparseable numbers do not abort the load; they are kept as sentinels
//! (`None` for counts, `NaN` for reals). Rows without a name are dropped and
//! fields past the ninth are ignored.

use log::{debug, info, warn};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Number of positional fields in a standings row.
pub const FIELD_COUNT: usize = 9;

/// One player's final standing. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub rank: Option<u32>,
    pub name: String,
    pub rating_mean: f64,
    pub rating_deviation: f64,
    pub wins: Option<u32>,
    pub draws: Option<u32>,
    pub losses: Option<u32>,
    pub games: Option<u32>,
    /// Fraction in `[0, 1]`, not a percentage.
    pub win_rate: f64,
}

impl PlayerRecord {
    pub fn win_rate_percent(&self) -> f64 {
        self.win_rate * 100.0
    }

    /// `wins + draws + losses == games`, with every count present.
    pub fn is_consistent(&self) -> bool {
        match (self.wins, self.draws, self.losses, self.games) {
            (Some(w), Some(d), Some(l), Some(g)) => {
                u64::from(w) + u64::from(d) + u64::from(l) == u64::from(g)
            }
            _ => false,
        }
    }
}

/// Error raised while loading the standings table.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The text could not be interpreted; `line` is 1-based.
    MalformedInput { line: usize, reason: String },
    /// The source could not be fetched at all.
    Unreachable(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::MalformedInput { line, reason } => {
                write!(f, "Malformed standings data on line {}: {}", line, reason)
            }
            LoadError::Unreachable(reason) => {
                write!(f, "Tournament data could not be loaded: {}", reason)
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// The loaded standings, in source order. Cloning shares the records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Rc<Vec<PlayerRecord>>,
}

impl Dataset {
    pub fn from_records(records: Vec<PlayerRecord>) -> Self {
        Self {
            records: Rc::new(records),
        }
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact (case-sensitive) lookup by player name.
    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }
}

/// Counts may be written as whole-valued decimals (`10.0`).
fn parse_count(field: Option<&str>) -> Option<u32> {
    let s = field?;
    if let Ok(n) = s.parse::<u32>() {
        return Some(n);
    }
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) {
        Some(v as u32)
    } else {
        None
    }
}

fn parse_real(field: Option<&str>) -> f64 {
    field
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

fn record_line(record: &csv::StringRecord, fallback: usize) -> usize {
    record
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(fallback)
}

/// Parse the standings table into a [`Dataset`].
///
/// Fails only when the table has no header row or when the text itself cannot
/// be tokenised.
pub fn load_standings(text: &str) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let header_len = reader
        .headers()
        .map_err(|e| malformed(&e, 1))?
        .len();
    if header_len == 0 {
        return Err(LoadError::MalformedInput {
            line: 1,
            reason: "missing header row".to_string(),
        });
    }

    let mut records = Vec::new();
    let mut seen_names = HashSet::new();

    for (i, row) in reader.records().enumerate() {
        let row = row.map_err(|e| malformed(&e, i + 2))?;
        let line = record_line(&row, i + 2);

        if row.len() > FIELD_COUNT {
            warn!(
                "Line {}: ignoring {} fields past the {}th",
                line,
                row.len() - FIELD_COUNT,
                FIELD_COUNT
            );
        }

        let name = row.get(1).unwrap_or("").to_string();
        if name.is_empty() {
            debug!("Dropping line {}: empty player name", line);
            continue;
        }
        if !seen_names.insert(name.clone()) {
            warn!("Duplicate player '{}' on line {}, skipping", name, line);
            continue;
        }

        let record = PlayerRecord {
            rank: parse_count(row.get(0)).filter(|&r| r > 0),
            name,
            rating_mean: parse_real(row.get(2)),
            rating_deviation: parse_real(row.get(3)),
            wins: parse_count(row.get(4)),
            draws: parse_count(row.get(5)),
            losses: parse_count(row.get(6)),
            games: parse_count(row.get(7)),
            win_rate: parse_real(row.get(8)),
        };

        if !record.is_consistent() {
            debug!(
                "Line {}: results for '{}' do not add up to games played",
                line, record.name
            );
        }
        records.push(record);
    }

    info!("Loaded {} players from standings", records.len());
    Ok(Dataset::from_records(records))
}

fn malformed(err: &csv::Error, fallback_line: usize) -> LoadError {
    let line = err
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(fallback_line);
    LoadError::MalformedInput {
        line,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Rank,Player,Rating_Mu,Rating_Sigma,Wins,Draws,Losses,Games,Win_Rate";

    #[test]
    fn loads_positional_fields() {
        let text = format!("{}\n1,alice,30.5,1.25,8,1,1,10,0.8\n", HEADER);
        let dataset = load_standings(&text).unwrap();
        assert_eq!(dataset.len(), 1);
        let alice = dataset.get("alice").unwrap();
        assert_eq!(alice.rank, Some(1));
        assert_eq!(alice.rating_mean, 30.5);
        assert_eq!(alice.rating_deviation, 1.25);
        assert_eq!(alice.wins, Some(8));
        assert_eq!(alice.games, Some(10));
        assert_eq!(alice.win_rate, 0.8);
        assert!(alice.is_consistent());
    }

    #[test]
    fn bad_numbers_become_sentinels() {
        let text = format!("{}\nx,carol,abc,,8,one,1,10,\n", HEADER);
        let dataset = load_standings(&text).unwrap();
        let carol = dataset.get("carol").unwrap();
        assert_eq!(carol.rank, None);
        assert!(carol.rating_mean.is_nan());
        assert!(carol.rating_deviation.is_nan());
        assert_eq!(carol.draws, None);
        assert!(carol.win_rate.is_nan());
        assert!(!carol.is_consistent());
    }

    #[test]
    fn short_rows_keep_the_name() {
        let text = format!("{}\n3,dave\n", HEADER);
        let dataset = load_standings(&text).unwrap();
        let dave = dataset.get("dave").unwrap();
        assert_eq!(dave.rank, Some(3));
        assert_eq!(dave.games, None);
    }

    #[test]
    fn rows_without_name_are_dropped() {
        let text = format!("{}\n1,,30,1,1,0,0,1,1.0\n2\n\n3,erin,20,1,0,0,1,1,0.0\n", HEADER);
        let dataset = load_standings(&text).unwrap();
        assert_eq!(dataset.names().collect::<Vec<_>>(), vec!["erin"]);
    }

    #[test]
    fn duplicate_names_keep_first() {
        let text = format!("{}\n1,alice,30,1,1,0,0,1,1.0\n2,alice,10,1,0,0,1,1,0.0\n", HEADER);
        let dataset = load_standings(&text).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.get("alice").unwrap().rank, Some(1));
    }

    #[test]
    fn zero_rank_is_not_a_rank() {
        let text = format!("{}\n0,zed,1,1,0,0,0,0,0\n", HEADER);
        let dataset = load_standings(&text).unwrap();
        assert_eq!(dataset.get("zed").unwrap().rank, None);
    }

    #[test]
    fn trailing_comma_keeps_every_row() {
        let text = format!("{}\n1,alice,30,1,8,1,1,10,0.8\n2,bob,25,0,5,0,5,10,0.5,\n", HEADER);
        let dataset = load_standings(&text).unwrap();
        assert_eq!(dataset.names().collect::<Vec<_>>(), vec!["alice", "bob"]);
        let bob = dataset.get("bob").unwrap();
        assert_eq!(bob.games, Some(10));
        assert_eq!(bob.win_rate, 0.5);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let text = format!("{}\n2,bob,smith,25,1,5,0,5,10,0.5\n", HEADER);
        let dataset = load_standings(&text).unwrap();
        let bob = dataset.get("bob").unwrap();
        assert!(bob.rating_mean.is_nan());
        assert_eq!(bob.rank, Some(2));
    }

    #[test]
    fn whole_decimals_read_as_counts() {
        let text = format!("{}\n1.0,alice,30,0,8.0,1,1,10.0,0.8\n2,bob,25,0,2.5,-1,5,10,0.5\n", HEADER);
        let dataset = load_standings(&text).unwrap();
        let alice = dataset.get("alice").unwrap();
        assert_eq!(alice.rank, Some(1));
        assert_eq!(alice.wins, Some(8));
        assert_eq!(alice.games, Some(10));
        let bob = dataset.get("bob").unwrap();
        assert_eq!(bob.wins, None);
        assert_eq!(bob.draws, None);
    }

    #[test]
    fn empty_source_is_malformed() {
        assert!(matches!(
            load_standings(""),
            Err(LoadError::MalformedInput { line: 1, .. })
        ));
    }

    #[test]
    fn header_only_is_an_empty_dataset() {
        let dataset = load_standings(HEADER).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn dataset_clones_share_records() {
        let dataset = Dataset::from_records(vec![]);
        let copy = dataset.clone();
        assert!(Rc::ptr_eq(&dataset.records, &copy.records));
    }
}
