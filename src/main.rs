//! Front end for the tournament leaderboard viewer using Yew.
//! Loads the standings, owns the reducer, and wires components, charts and
//! background profile fetching.

use futures::future::join_all;
use gloo_timers::callback::Timeout;
use leaderboard_viewer::enrichment::{parse_profile, AgentProfile, EnrichmentError, ResourceResolver};
use leaderboard_viewer::view::sort_preset;
use leaderboard_viewer::{load_standings, Command, Dataset, LoadError};
use log::{info, warn};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

mod cache;
mod chart;
mod components;
mod config;
mod hooks;
mod utils;

use cache::{profile_count, profile_for, store_profile};
use components::{render_comparison, render_leaderboard, render_player_detail, Notice, StatCards, TableActions};
use config::*;
use hooks::{command_callback, use_leaderboard, LeaderboardAction};
use utils::{apply_theme, download_text, fetch_text, LocalStore};

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Create a debounced callback that cancels any previous pending call
fn debounce_callback<T: 'static>(
    timer_handle: &UseStateHandle<Option<Timeout>>,
    callback: Callback<T>,
    value: T,
    delay_ms: u32,
) {
    // Dropping the previous Timeout cancels it
    timer_handle.set(None);

    let timer_handle_clone = timer_handle.clone();
    let handle = Timeout::new(delay_ms, move || {
        callback.emit(value);
        timer_handle_clone.set(None);
    });
    timer_handle.set(Some(handle));
}

async fn load_dataset() -> Result<Dataset, LoadError> {
    let text = fetch_text(STANDINGS_URL)
        .await
        .map_err(LoadError::Unreachable)?;
    load_standings(&text)
}

async fn fetch_profile(
    resolver: &ResourceResolver,
    player: &str,
) -> Result<AgentProfile, EnrichmentError> {
    let url = resolver.resolve(player)?;
    let text = fetch_text(&url)
        .await
        .map_err(|reason| EnrichmentError::Fetch {
            player: player.to_string(),
            reason,
        })?;
    parse_profile(&text)
}

/// Fetch agent profiles for every player in the index. Runs alongside the
/// standings load; failures are logged and otherwise ignored.
async fn run_enrichment(profile_version: UseStateHandle<usize>) {
    let resolver = match fetch_text(PLAYER_INDEX_URL).await {
        Ok(text) => match ResourceResolver::from_json(&text) {
            Ok(resolver) => resolver,
            Err(e) => {
                warn!("Ignoring player index: {}", e);
                return;
            }
        },
        Err(e) => {
            warn!("No player index available: {}", e);
            return;
        }
    };
    if resolver.is_empty() {
        info!("Player index is empty, skipping profiles");
        return;
    }

    let players = resolver.players();
    let results = join_all(players.iter().map(|p| fetch_profile(&resolver, p))).await;
    for (player, result) in players.iter().zip(results) {
        match result {
            Ok(profile) => store_profile(player, profile),
            Err(e) => warn!("{}", e),
        }
    }

    info!("Loaded {} player profiles", profile_count());
    profile_version.set(*profile_version + 1);
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring state, effects, and UI elements.
#[function_component(Leaderboard)]
fn leaderboard() -> Html {
    let model = use_leaderboard();
    let dispatcher = model.dispatcher();
    let search_text = use_state(String::new);
    let debounce_timer = use_state(|| None::<Timeout>);
    let notice_timer = use_state(|| None::<Timeout>);
    let detail = use_state(|| None::<String>);
    // Bumped when background profiles arrive
    let profile_version = use_state(|| 0usize);

    // One-time startup: standings and profiles load independently
    {
        let dispatcher = dispatcher.clone();
        let profile_version = profile_version.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                dispatcher.dispatch(LeaderboardAction::Loaded(load_dataset().await));
            });
            wasm_bindgen_futures::spawn_local(run_enrichment(profile_version));
            || ()
        });
    }

    // Persist preferences and apply the theme whenever they change
    use_effect_with(model.app.preferences().clone(), |prefs| {
        apply_theme(prefs);
        prefs.save(&mut LocalStore::open());
        || ()
    });

    // Redraw charts when the visible rows or the colours change
    {
        let model = model.clone();
        let deps = (
            model.app.view().clone(),
            model.app.dataset().len(),
            model.app.preferences().clone(),
        );
        use_effect_with(deps, move |_| {
            chart::draw_charts(&model.app.snapshot());
            || ()
        });
    }

    // Transient notices disappear on their own
    {
        let dispatcher = dispatcher.clone();
        let notice_timer = notice_timer.clone();
        use_effect_with(model.notice.clone(), move |notice| {
            if notice.is_some() {
                let handle = Timeout::new(NOTICE_MS, move || {
                    dispatcher.dispatch(LeaderboardAction::DismissNotice);
                });
                notice_timer.set(Some(handle));
            }
            || ()
        });
    }

    let on_search = {
        let search_text = search_text.clone();
        let debounce_timer = debounce_timer.clone();
        let search = command_callback(&dispatcher, Command::Search);
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let term = input.value();
            search_text.set(term.clone());
            debounce_callback(&debounce_timer, search.clone(), term, SEARCH_DEBOUNCE_MS);
        })
    };

    let on_sort_preset = command_callback(&dispatcher, |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        let (key, direction) = sort_preset(&select.value());
        Command::Sort(key, direction)
    });

    let on_palette = command_callback(&dispatcher, |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Command::SetTheme(select.value())
    });

    let on_toggle_dark = command_callback(&dispatcher, |_: MouseEvent| Command::ToggleDarkMode);

    let on_export = {
        let model = model.clone();
        Callback::from(move |_: MouseEvent| match model.app.export_csv() {
            Ok(csv) => {
                if let Err(e) = download_text(EXPORT_FILENAME, &csv, "text/csv") {
                    warn!("Export failed: {}", e);
                }
            }
            Err(e) => warn!("Export failed: {}", e),
        })
    };

    let actions = TableActions {
        on_sort: command_callback(&dispatcher, Command::ToggleColumnSort),
        on_view: {
            let detail = detail.clone();
            Callback::from(move |name: String| detail.set(Some(name)))
        },
        on_compare: command_callback(&dispatcher, Command::AddToComparison),
        on_pin: command_callback(&dispatcher, Command::TogglePin),
    };
    let on_remove = command_callback(&dispatcher, Command::RemoveFromComparison);
    let on_clear = command_callback(&dispatcher, |_: ()| Command::ClearComparison);
    let on_close_detail = {
        let detail = detail.clone();
        Callback::from(move |_: ()| detail.set(None))
    };

    let snapshot = model.app.snapshot();
    let prefs = model.app.preferences();
    let detail_view = detail
        .as_ref()
        .and_then(|name| model.app.dataset().get(name))
        .map(|record| {
            let profile = profile_for(&record.name);
            render_player_detail(record, profile.as_ref(), &on_close_detail, &actions.on_compare)
        });

    html! {
        <div class="container">
            <header class="app-header">
                <h1>{ "Tournament Leaderboard" }</h1>
                <div class="header-controls">
                    <select class="palette-select" onchange={on_palette}>
                        { for PALETTES.iter().map(|p| html! {
                            <option value={*p} selected={*p == prefs.theme}>{ *p }</option>
                        }) }
                    </select>
                    <button class="theme-toggle" onclick={on_toggle_dark}>
                        <span class="theme-icon">{ if prefs.dark_mode { "☀️" } else { "🌙" } }</span>
                    </button>
                </div>
            </header>

            if let Some(err) = model.app.load_error() {
                <Notice message={err.to_string()} persistent={true} />
            }
            if let Some(message) = &model.notice {
                <Notice message={message.clone()} />
            }

            <StatCards overall={snapshot.overall} shown={snapshot.rows.len()} />

            // Search, preset sort and export
            <div class="controls">
                <input
                    type="search"
                    id="searchInput"
                    placeholder="Search players..."
                    value={(*search_text).clone()}
                    oninput={on_search}
                />
                <select id="sortSelect" onchange={on_sort_preset}>
                    <option value="rank">{ "Sort by Rank" }</option>
                    <option value="rating">{ "Sort by Rating" }</option>
                    <option value="winRate">{ "Sort by Win Rate" }</option>
                    <option value="wins">{ "Sort by Wins" }</option>
                    <option value="games">{ "Sort by Games" }</option>
                </select>
                <button class="btn-primary" onclick={on_export}>{ "Export CSV" }</button>
            </div>

            <div class="table-container">
                { render_leaderboard(&snapshot.rows, model.app.view(), &actions) }
            </div>

            { render_comparison(&model.app.comparison_records(), &on_remove, &on_clear) }

            // Chart section
            <div class="charts-grid">
                <div class="chart-card">
                    <h3>{ "Win Rate Distribution" }</h3>
                    <canvas id={WIN_RATE_CANVAS}></canvas>
                </div>
                <div class="chart-card">
                    <h3>{ "Rating Distribution" }</h3>
                    <canvas id={RATING_CANVAS}></canvas>
                </div>
                <div class="chart-card">
                    <h3>{ "Game Outcomes" }</h3>
                    <canvas id={OUTCOME_CANVAS}></canvas>
                </div>
                <div class="chart-card">
                    <h3>{ "Rating vs Win Rate" }</h3>
                    <canvas id={SCATTER_CANVAS}></canvas>
                </div>
            </div>

            { detail_view.unwrap_or_default() }
        </div>
    }
}

/// Entry point: installs logging and renders the leaderboard.
fn main() {
    console_error_panic_hook::set_once();
    utils::init_logging(LOG_LEVEL);
    yew::Renderer::<Leaderboard>::new().render();
}
