//! CSV snapshot of the visible rows.

use crate::format_count;
use crate::view::VisibleRow;

pub const EXPORT_HEADER: [&str; 9] = [
    "Rank",
    "Player",
    "Rating_Mu",
    "Rating_Sigma",
    "Wins",
    "Draws",
    "Losses",
    "Games",
    "Win_Rate",
];

/// Serialize `rows` in display order. Ratings get two decimals, the win rate
/// three, counts none. Lines are `\n`-separated with no trailing newline.
pub fn export_csv(rows: &[VisibleRow<'_>]) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER)?;
    for row in rows {
        let r = row.record;
        writer.write_record([
            format_count(r.rank),
            r.name.clone(),
            format!("{:.2}", r.rating_mean),
            format!("{:.2}", r.rating_deviation),
            format_count(r.wins),
            format_count(r.draws),
            format_count(r.losses),
            format_count(r.games),
            format!("{:.3}", r.win_rate),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    let mut text = String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::PlayerRecord;

    fn alice() -> PlayerRecord {
        PlayerRecord {
            rank: Some(1),
            name: "alice".to_string(),
            rating_mean: 30.0,
            rating_deviation: 0.0,
            wins: Some(8),
            draws: Some(1),
            losses: Some(1),
            games: Some(10),
            win_rate: 0.8,
        }
    }

    #[test]
    fn single_row_export() {
        let record = alice();
        let rows = [VisibleRow {
            record: &record,
            pinned: false,
        }];
        assert_eq!(
            export_csv(&rows).unwrap(),
            "Rank,Player,Rating_Mu,Rating_Sigma,Wins,Draws,Losses,Games,Win_Rate\n\
             1,alice,30.00,0.00,8,1,1,10,0.800"
        );
    }

    #[test]
    fn empty_export_is_just_the_header() {
        assert_eq!(
            export_csv(&[]).unwrap(),
            "Rank,Player,Rating_Mu,Rating_Sigma,Wins,Draws,Losses,Games,Win_Rate"
        );
    }

    #[test]
    fn sentinels_and_awkward_names() {
        let mut record = alice();
        record.name = "smith, j".to_string();
        record.rating_mean = f64::NAN;
        record.games = None;
        let rows = [VisibleRow {
            record: &record,
            pinned: true,
        }];
        let text = export_csv(&rows).unwrap();
        let line = text.lines().nth(1).unwrap();
        assert_eq!(line, "1,\"smith, j\",NaN,0.00,8,1,1,NaN,0.800");
    }
}
