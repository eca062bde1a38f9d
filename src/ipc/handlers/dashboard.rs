use chrono::Utc;
use serde_json::json;

use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use crate::selectors;

fn handle_dashboard_stats(state: &mut AppState, req: &Request) -> serde_json::Value {
    let stats = selectors::dashboard(&state.store, Utc::now());
    let role = selectors::current_role(&state.store);
    ok(&req.id, json!({ "stats": stats, "role": role }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dashboard.stats" => Some(handle_dashboard_stats(state, req)),
        _ => None,
    }
}
