use std::fs;
use std::path::PathBuf;

use leaderboard_viewer::defaults::WIN_RATE_EDGES;
use leaderboard_viewer::prefs::Preferences;
use leaderboard_viewer::{
    aggregate, bucket, load_standings, App, Command, Dataset, SortDirection, SortKey, ViewState,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn dataset(name: &str) -> Dataset {
    load_standings(&read_fixture(name)).expect("fixture should parse")
}

fn shown(app: &App) -> Vec<String> {
    app.visible_rows()
        .iter()
        .map(|r| r.record.name.clone())
        .collect()
}

#[test]
fn alice_and_bob_walkthrough() {
    let mut app = App::new(Preferences::default());
    app.load(Ok(dataset("final_standings.csv")));

    app.dispatch(Command::Search("b".to_string())).unwrap();
    assert_eq!(shown(&app), vec!["bob"]);

    app.dispatch(Command::Search(String::new())).unwrap();
    app.dispatch(Command::Sort(SortKey::RatingMean, SortDirection::Descending))
        .unwrap();
    assert_eq!(shown(&app), vec!["alice", "bob"]);

    let stats = aggregate(app.dataset().records());
    assert_eq!(stats.count, 2);
    assert!((stats.mean_rating - 27.5).abs() < 1e-9);
    assert!((stats.mean_win_rate - 0.65).abs() < 1e-9);
    assert_eq!(stats.total_games, 20);

    app.dispatch(Command::Search("alice".to_string())).unwrap();
    assert_eq!(
        app.export_csv().unwrap(),
        "Rank,Player,Rating_Mu,Rating_Sigma,Wins,Draws,Losses,Games,Win_Rate\n1,alice,30.00,0.00,8,1,1,10,0.800"
    );
}

#[test]
fn messy_fixture_keeps_rows_with_bad_numbers() {
    let data = dataset("messy_standings.csv");
    let names: Vec<&str> = data.names().collect();
    assert_eq!(
        names,
        vec!["Gpt-Planner", "claude-stepwise", "Random-Baseline", "greedy-bot", "GPT-Mini"]
    );
    assert!(data.get("Random-Baseline").unwrap().rating_mean.is_nan());
    assert!(data.get("greedy-bot").unwrap().rating_deviation.is_nan());

    let stats = aggregate(data.records());
    assert_eq!(stats.count, 5);
    assert!((stats.mean_rating - 26.18).abs() < 1e-9);
    assert_eq!(stats.total_games, 100);
}

#[test]
fn visible_rows_never_exceed_dataset() {
    let data = dataset("messy_standings.csv");
    let mut view = ViewState::default();
    for term in ["", "g", "GPT", "bot", "-", "zzz", "Planner"] {
        view.set_search_term(term);
        let rows = view.visible_rows(&data);
        assert!(rows.len() <= data.len());
        if term.is_empty() {
            assert_eq!(rows.len(), data.len());
        }
        let needle = term.to_lowercase();
        for record in data.records() {
            let visible = rows.iter().any(|r| r.record.name == record.name);
            assert_eq!(visible, record.name.to_lowercase().contains(&needle));
        }
    }
}

#[test]
fn rating_ties_and_missing_values() {
    let data = dataset("messy_standings.csv");
    let mut view = ViewState::default();
    let order = |view: &ViewState| -> Vec<String> {
        view.visible_rows(&data)
            .iter()
            .map(|r| r.record.name.clone())
            .collect()
    };

    view.set_sort(SortKey::RatingMean, SortDirection::Descending);
    assert_eq!(
        order(&view),
        vec!["Gpt-Planner", "claude-stepwise", "greedy-bot", "GPT-Mini", "Random-Baseline"]
    );
    view.set_sort(SortKey::RatingMean, SortDirection::Ascending);
    assert_eq!(
        order(&view),
        vec!["greedy-bot", "GPT-Mini", "claude-stepwise", "Gpt-Planner", "Random-Baseline"]
    );
}

#[test]
fn pin_survives_sorts_but_not_search() {
    let mut app = App::new(Preferences::default());
    app.load(Ok(dataset("messy_standings.csv")));
    app.dispatch(Command::TogglePin("greedy-bot".to_string())).unwrap();

    for key in SortKey::ALL {
        app.dispatch(Command::ToggleColumnSort(key)).unwrap();
        assert_eq!(shown(&app)[0], "greedy-bot");
    }

    app.dispatch(Command::Search("gpt".to_string())).unwrap();
    assert_eq!(shown(&app), vec!["Gpt-Planner", "GPT-Mini"]);
    assert!(app.visible_rows().iter().all(|r| !r.pinned));
}

#[test]
fn win_rate_bins_account_for_every_value() {
    let data = dataset("messy_standings.csv");
    let values: Vec<f64> = data.records().iter().map(|r| r.win_rate_percent()).collect();
    let counts = bucket(&values, &WIN_RATE_EDGES);
    assert_eq!(counts.iter().sum::<usize>(), values.len());
    assert_eq!(counts, vec![1, 2, 0, 2, 0]);
}
