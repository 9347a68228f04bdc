//! JavaScript interop for Chart.js visualization.
//! Provides Rust bindings to chart helper functions defined in chart_helpers.js.
//! Each helper destroys the chart previously drawn on the same canvas.

use crate::config::{OUTCOME_CANVAS, RATING_CANVAS, SCATTER_CANVAS, WIN_RATE_CANVAS};
use leaderboard_viewer::Snapshot;
use log::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/chart_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = renderHistogram)]
    fn render_histogram(canvas_id: &str, histogram: JsValue, color_var: &str);

    #[wasm_bindgen(js_name = renderOutcomeChart)]
    fn render_outcome_chart(canvas_id: &str, totals: JsValue);

    #[wasm_bindgen(js_name = renderScatterChart)]
    fn render_scatter_chart(canvas_id: &str, points: JsValue);
}

fn to_js<T: Serialize>(value: &T, canvas_id: &str) -> Option<JsValue> {
    match serde_wasm_bindgen::to_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Skipping chart {}: {}", canvas_id, e);
            None
        }
    }
}

/// Redraw all four summary charts from one snapshot.
pub fn draw_charts(snapshot: &Snapshot<'_>) {
    if let Some(v) = to_js(&snapshot.win_rate_histogram, WIN_RATE_CANVAS) {
        render_histogram(WIN_RATE_CANVAS, v, "--accent");
    }
    if let Some(v) = to_js(&snapshot.rating_histogram, RATING_CANVAS) {
        render_histogram(RATING_CANVAS, v, "--success");
    }
    if let Some(v) = to_js(&snapshot.outcomes, OUTCOME_CANVAS) {
        render_outcome_chart(OUTCOME_CANVAS, v);
    }
    if let Some(v) = to_js(&snapshot.scatter, SCATTER_CANVAS) {
        render_scatter_chart(SCATTER_CANVAS, v);
    }
}
