//! Nutrilog WASM Module
//!
//! WebAssembly bindings that let a browser page drive the client state
//! transitions. State crosses the boundary as JSON; the page performs the
//! requests itself and feeds the results back through the same functions.

use nutrilog_shared::validation::parse_record_date;
use nutrilog_shared::{ClientState, DatePick, StateError, SubmissionPlan};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Result of picking a date
#[derive(Serialize)]
struct PickResult {
    state: ClientState,
    /// `load_existing` or `empty`
    action: &'static str,
}

fn parse_state(state_json: &str) -> Result<ClientState, String> {
    serde_json::from_str(state_json).map_err(|e| format!("Invalid state: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

pub fn initial_state_json(today: &str) -> Result<String, String> {
    let today = parse_record_date(today)?;
    to_json(&ClientState::new(today))
}

pub fn pick_date_json(state_json: &str, date: &str) -> Result<String, String> {
    let mut state = parse_state(state_json)?;
    let action = match state.pick_date_str(date).map_err(|e| e.to_string())? {
        DatePick::Filled(_) => "load_existing",
        DatePick::Empty(_) => "empty",
    };
    to_json(&PickResult { state, action })
}

pub fn clear_active_user_json(state_json: &str) -> Result<String, String> {
    let mut state = parse_state(state_json)?;
    state.clear_active_user();
    to_json(&state)
}

pub fn plan_submission_json(state_json: &str) -> Result<String, String> {
    let state = parse_state(state_json)?;
    let plan = match state.plan_submission() {
        Ok(SubmissionPlan::Ready(_)) => "ready",
        Ok(SubmissionPlan::NeedsConfirmation(_)) => "needs_confirmation",
        Err(StateError::NoActiveUser) => "no_active_user",
        Err(other) => return Err(other.to_string()),
    };
    Ok(plan.to_string())
}

pub fn calendar_markers_json(state_json: &str) -> Result<String, String> {
    let state = parse_state(state_json)?;
    to_json(&state.calendar_markers)
}

/// Initial state with the record form dated `today` (YYYY-MM-DD)
#[wasm_bindgen]
pub fn initial_state(today: &str) -> Result<String, JsValue> {
    initial_state_json(today).map_err(|e| JsValue::from_str(&e))
}

/// Pick a calendar date; returns `{ state, action }`
#[wasm_bindgen]
pub fn pick_date(state_json: &str, date: &str) -> Result<String, JsValue> {
    pick_date_json(state_json, date).map_err(|e| JsValue::from_str(&e))
}

/// Switch to "no user"
#[wasm_bindgen]
pub fn clear_active_user(state_json: &str) -> Result<String, JsValue> {
    clear_active_user_json(state_json).map_err(|e| JsValue::from_str(&e))
}

/// `ready`, `needs_confirmation` or `no_active_user`
#[wasm_bindgen]
pub fn plan_submission(state_json: &str) -> Result<String, JsValue> {
    plan_submission_json(state_json).map_err(|e| JsValue::from_str(&e))
}

/// Calendar highlight descriptors for the filled dates
#[wasm_bindgen]
pub fn calendar_markers(state_json: &str) -> Result<String, JsValue> {
    calendar_markers_json(state_json).map_err(|e| JsValue::from_str(&e))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_invalid_date_becomes_js_error() {
        let state = initial_state("2025-05-14").unwrap();
        assert!(pick_date(&state, "05/14/2025").is_err());
    }
}
