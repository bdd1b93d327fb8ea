//! WASM bindings for schedule-engine.
//!
//! Exposes schedule aggregation, day layout and the now-indicator to
//! JavaScript via `wasm-bindgen`. Snapshots, items and layout records cross the
//! boundary as JSON strings; dates are `YYYY-MM-DD`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p schedule-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/schedule-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/schedule_engine_wasm.wasm
//! ```

use chrono::{NaiveDate, NaiveTime};
use schedule_engine::{LayoutConfig, ScheduleItem, Snapshot, Zoom};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    schedule_engine::parse::parse_date(s).map_err(js_err)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Optional layout overrides passed from JavaScript.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct LayoutOptions {
    minimum_render_minutes: Option<u32>,
    default_duration_minutes: Option<u32>,
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Aggregate a snapshot into ordered schedule items.
///
/// `snapshot_json` is the planner snapshot (`tasks`, `events`, `routines`,
/// `routineInstances`, `goals`, `projects`). `zoom` is one of `day`, `week`,
/// `month`, `year`. Returns a JSON array of schedule items.
#[wasm_bindgen(js_name = "getScheduleItems")]
pub fn get_schedule_items(
    snapshot_json: &str,
    window_start: &str,
    window_end: &str,
    zoom: &str,
) -> Result<String, JsValue> {
    let snapshot = Snapshot::from_json(snapshot_json).map_err(js_err)?;
    let start = parse_date(window_start)?;
    let end = parse_date(window_end)?;
    let zoom: Zoom = zoom.parse().map_err(js_err)?;

    let items = schedule_engine::get_schedule_items(&snapshot, start, end, zoom);
    to_json(&items)
}

/// Lay out one day's items in the visible hour window.
///
/// `items_json` is an array of schedule items (as returned by
/// `getScheduleItems`); untimed and out-of-window items are dropped.
/// `options_json` may override `minimumRenderMinutes` and
/// `defaultDurationMinutes`. Returns a JSON array of layout records.
#[wasm_bindgen(js_name = "layoutDay")]
pub fn layout_day(
    items_json: &str,
    visible_start_hour: u32,
    visible_end_hour: u32,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let items: Vec<ScheduleItem> = serde_json::from_str(items_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid items JSON: {}", e)))?;
    let options: LayoutOptions = match options_json.as_deref() {
        Some(json) => serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid options JSON: {}", e)))?,
        None => LayoutOptions::default(),
    };

    let mut config = LayoutConfig::with_hours(visible_start_hour, visible_end_hour);
    if let Some(min) = options.minimum_render_minutes {
        config.minimum_render_minutes = min;
    }
    if let Some(default) = options.default_duration_minutes {
        config.default_duration_minutes = default;
    }
    config.validate().map_err(js_err)?;

    let records = schedule_engine::layout_day_with(&items, &config);
    to_json(&records)
}

/// Minutes from the top of the visible window for `hour:minute`, or
/// `undefined` when the hour is outside it.
#[wasm_bindgen(js_name = "nowOffset")]
pub fn now_offset(
    hour: u32,
    minute: u32,
    visible_start_hour: u32,
    visible_end_hour: u32,
) -> Result<Option<u32>, JsValue> {
    let now = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| JsValue::from_str(&format!("Invalid time {}:{}", hour, minute)))?;
    Ok(schedule_engine::now_offset(
        &now,
        visible_start_hour,
        visible_end_hour,
    ))
}
