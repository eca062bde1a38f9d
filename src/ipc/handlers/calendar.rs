use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::ipc::error::{err, ok, parse_params};
use crate::ipc::handlers::crud;
use crate::ipc::types::{AppState, Request};
use crate::model::{CalendarEvent, EventCategory};
use crate::selectors;
use crate::store::{Action, CalendarAction};

const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Default, Deserialize)]
struct Window {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

fn hidden_json(state: &AppState) -> serde_json::Value {
    json!(state.store.calendar.hidden)
}

fn handle_toggle_category(state: &mut AppState, req: &Request) -> serde_json::Value {
    let raw = req
        .params
        .get("category")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    let Some(category) = EventCategory::parse(raw) else {
        return err(
            &req.id,
            "bad_params",
            format!("unknown category: {raw:?}"),
            None,
        );
    };
    state
        .store
        .dispatch(Action::Calendar(CalendarAction::ToggleCategory(category)));
    ok(
        &req.id,
        json!({
            "category": category,
            "visible": state.store.calendar.is_visible(category),
            "hidden": hidden_json(state),
        }),
    )
}

fn handle_show_all(state: &mut AppState, req: &Request) -> serde_json::Value {
    let changed = state
        .store
        .dispatch(Action::Calendar(CalendarAction::ShowAll));
    ok(
        &req.id,
        json!({ "changed": changed, "hidden": hidden_json(state) }),
    )
}

fn handle_visible(state: &mut AppState, req: &Request) -> serde_json::Value {
    let w: Window = if req.params.is_null() {
        Window::default()
    } else {
        match parse_params(req) {
            Ok(w) => w,
            Err(resp) => return resp,
        }
    };
    let from = w.from.unwrap_or_else(Utc::now);
    let to = match w.to {
        Some(to) => to,
        None => match from.checked_add_signed(Duration::days(DEFAULT_WINDOW_DAYS)) {
            Some(to) => to,
            None => {
                return err(&req.id, "bad_params", "from is too far in the future", None);
            }
        },
    };
    if to <= from {
        return err(&req.id, "bad_params", "to must be after from", None);
    }
    let events = selectors::visible_events(&state.store.calendar, from, to);
    ok(
        &req.id,
        json!({
            "from": from,
            "to": to,
            "events": events,
            "hidden": hidden_json(state),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "calendar.toggleCategory" => Some(handle_toggle_category(state, req)),
        "calendar.showAll" => Some(handle_show_all(state, req)),
        "calendar.visible" => Some(handle_visible(state, req)),
        _ => crud::try_handle::<CalendarEvent>(state, req, "calendar", true),
    }
}
