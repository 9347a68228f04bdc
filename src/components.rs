//! Pure Yew view components for the leaderboard UI.
//!
//! Everything here renders from borrowed core data and reports user actions
//! through callbacks; none of it holds state.

use crate::utils::rank_badge_class;
use leaderboard_viewer::enrichment::AgentProfile;
use leaderboard_viewer::{
    format_count, format_percent, PlayerRecord, SortDirection, SortKey, Statistics, ViewState,
    VisibleRow,
};
use yew::prelude::*;

/// Row-level and header-level actions of the leaderboard table.
#[derive(Clone, PartialEq)]
pub struct TableActions {
    pub on_sort: Callback<SortKey>,
    pub on_view: Callback<String>,
    pub on_compare: Callback<String>,
    pub on_pin: Callback<String>,
}

fn sort_indicator(view: &ViewState, key: SortKey) -> &'static str {
    if view.sort_key() != key {
        return "";
    }
    match view.sort_direction() {
        SortDirection::Ascending => " ▲",
        SortDirection::Descending => " ▼",
    }
}

/// Renders the leaderboard table for the visible rows.
pub fn render_leaderboard(rows: &[VisibleRow<'_>], view: &ViewState, actions: &TableActions) -> Html {
    if rows.is_empty() {
        return html! {
            <div class="no-results-message">
                <p>{ "No players match the current search." }</p>
            </div>
        };
    }

    html! {
        <table class="leaderboard-table">
            <thead>
                <tr>
                    { SortKey::ALL.iter().map(|&key| {
                        let on_sort = actions.on_sort.reform(move |_: MouseEvent| key);
                        html! {
                            <th class="sortable" onclick={on_sort}>
                                { key.label() }{ sort_indicator(view, key) }
                            </th>
                        }
                    }).collect::<Html>() }
                    <th>{ "Actions" }</th>
                </tr>
            </thead>
            <tbody>
                { rows.iter().map(|row| render_row(row, actions)).collect::<Html>() }
            </tbody>
        </table>
    }
}

fn render_row(row: &VisibleRow<'_>, actions: &TableActions) -> Html {
    let r = row.record;
    let name_for = |cb: &Callback<String>| {
        let name = r.name.clone();
        cb.reform(move |_: MouseEvent| name.clone())
    };
    let width = format!("width: {}%", (r.win_rate_percent()).clamp(0.0, 100.0));

    html! {
        <tr class={classes!(row.pinned.then_some("pinned-row"))}>
            <td><span class={classes!("rank-badge", rank_badge_class(r.rank))}>{ format_count(r.rank) }</span></td>
            <td><span class="player-name" onclick={name_for(&actions.on_view)}>{ &r.name }</span></td>
            <td>{ format!("{:.2}", r.rating_mean) }</td>
            <td>{ format!("{:.2}", r.rating_deviation) }</td>
            <td>{ format_count(r.wins) }</td>
            <td>{ format_count(r.draws) }</td>
            <td>{ format_count(r.losses) }</td>
            <td>{ format_count(r.games) }</td>
            <td>
                <div class="win-rate-bar">
                    <div class="win-rate-fill" style={width}></div>
                </div>
                { format_percent(r.win_rate) }
            </td>
            <td class="row-actions">
                <button class="btn-small btn-pin" onclick={name_for(&actions.on_pin)}>
                    { if row.pinned { "Unpin" } else { "Pin" } }
                </button>
                <button class="btn-small btn-view" onclick={name_for(&actions.on_view)}>{ "View" }</button>
                <button class="btn-small btn-compare" onclick={name_for(&actions.on_compare)}>{ "Compare" }</button>
            </td>
        </tr>
    }
}

/// Headline statistics over the whole tournament.
#[derive(Properties, PartialEq)]
pub struct StatCardsProps {
    pub overall: Statistics,
    pub shown: usize,
}

#[function_component(StatCards)]
pub fn stat_cards(props: &StatCardsProps) -> Html {
    let s = &props.overall;
    html! {
        <div class="stats-grid">
            <div class="stat-card">
                <span class="stat-label">{ "Total Players" }</span>
                <span class="stat-value">{ s.count }</span>
                <span class="stat-note">{ format!("{} shown", props.shown) }</span>
            </div>
            <div class="stat-card">
                <span class="stat-label">{ "Average Rating" }</span>
                <span class="stat-value">{ format!("{:.2}", s.mean_rating) }</span>
            </div>
            <div class="stat-card">
                <span class="stat-label">{ "Average Win Rate" }</span>
                <span class="stat-value">{ format_percent(s.mean_win_rate) }</span>
            </div>
            <div class="stat-card">
                <span class="stat-label">{ "Total Games" }</span>
                <span class="stat-value">{ s.total_games }</span>
            </div>
        </div>
    }
}

fn stat_line(label: &str, value: String) -> Html {
    html! {
        <div class="detail-stat">
            <span class="detail-stat-label">{ label }</span>
            <span class="detail-stat-value">{ value }</span>
        </div>
    }
}

fn record_stats(r: &PlayerRecord) -> Html {
    html! {
        <>
            { stat_line("Rank:", format!("#{}", format_count(r.rank))) }
            { stat_line("Rating (μ):", format!("{:.2}", r.rating_mean)) }
            { stat_line("Rating (σ):", format!("{:.2}", r.rating_deviation)) }
            { stat_line("Wins:", format_count(r.wins)) }
            { stat_line("Draws:", format_count(r.draws)) }
            { stat_line("Losses:", format_count(r.losses)) }
            { stat_line("Games:", format_count(r.games)) }
            { stat_line("Win Rate:", format_percent(r.win_rate)) }
        </>
    }
}

/// Side-by-side cards for the comparison set. Renders nothing when empty.
pub fn render_comparison(
    records: &[&PlayerRecord],
    on_remove: &Callback<String>,
    on_clear: &Callback<()>,
) -> Html {
    if records.is_empty() {
        return html! {};
    }

    html! {
        <section class="comparison-section">
            <div class="section-header">
                <h2>{ "Player Comparison" }</h2>
                <button class="btn-secondary" onclick={on_clear.reform(|_: MouseEvent| ())}>
                    { "Clear All" }
                </button>
            </div>
            <div class="comparison-grid">
                { records.iter().map(|r| {
                    let name = r.name.clone();
                    html! {
                        <div class="comparison-card">
                            <h3>{ &r.name }</h3>
                            { record_stats(r) }
                            <button class="btn-small btn-remove"
                                onclick={on_remove.reform(move |_: MouseEvent| name.clone())}>
                                { "Remove" }
                            </button>
                        </div>
                    }
                }).collect::<Html>() }
            </div>
        </section>
    }
}

/// Agent configuration block. Prompts are rendered as text nodes, which Yew
/// escapes, so profile content can never inject markup.
fn render_profile(profile: &AgentProfile) -> Html {
    let model = &profile.agent.model;
    let prompts = &profile.agent.prompts;
    html! {
        <div class="agent-profile">
            <h3>{ "Agent" }</h3>
            { stat_line("Provider:", model.provider.clone()) }
            { stat_line("Model:", model.name.clone()) }
            if !model.params.is_empty() {
                <ul class="model-params">
                    { model.params.iter().map(|(k, v)| html! {
                        <li><code>{ k }</code>{ ": " }{ v.to_string() }</li>
                    }).collect::<Html>() }
                </ul>
            }
            if let Some(text) = &prompts.system_prompt {
                <h4>{ "System prompt" }</h4>
                <pre class="prompt">{ text }</pre>
            }
            if let Some(text) = &prompts.step_wise_prompt {
                <h4>{ "Step-wise prompt" }</h4>
                <pre class="prompt">{ text }</pre>
            }
        </div>
    }
}

/// Modal with the full record of one player.
pub fn render_player_detail(
    record: &PlayerRecord,
    profile: Option<&AgentProfile>,
    on_close: &Callback<()>,
    on_compare: &Callback<String>,
) -> Html {
    let name = record.name.clone();
    let close_and_compare = {
        let on_close = on_close.clone();
        let on_compare = on_compare.clone();
        Callback::from(move |_: MouseEvent| {
            on_compare.emit(name.clone());
            on_close.emit(());
        })
    };

    html! {
        <div class="modal" onclick={on_close.reform(|_: MouseEvent| ())}>
            <div class="modal-content" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <span class="close" onclick={on_close.reform(|_: MouseEvent| ())}>{ "×" }</span>
                <div class="player-detail">
                    <h2>{ &record.name }</h2>
                    { record_stats(record) }
                    if let Some(profile) = profile {
                        { render_profile(profile) }
                    }
                    <div class="detail-actions">
                        <button class="btn-small btn-compare" onclick={close_and_compare}>
                            { "Add to Comparison" }
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeProps {
    pub message: String,
    #[prop_or_default]
    pub persistent: bool,
}

/// Banner for user-visible errors.
#[function_component(Notice)]
pub fn notice(props: &NoticeProps) -> Html {
    html! {
        <div class={classes!("notice", props.persistent.then_some("notice-error"))} role="alert">
            { &props.message }
        </div>
    }
}
