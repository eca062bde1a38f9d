use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::json;

use crate::db;
use crate::i18n::{self, Locale};
use crate::ipc::error::{err, ok, parse_params};
use crate::ipc::handlers::core::{LOCALE_KEY, THEME_KEY};
use crate::ipc::types::{AppState, Request};
use crate::store::{Action, Theme, UiAction};

fn ui_json(state: &AppState) -> serde_json::Value {
    let ui = &state.store.ui;
    json!({
        "locale": ui.locale,
        "direction": ui.locale.direction(),
        "theme": ui.theme,
        "sidebarOpen": ui.sidebar_open,
    })
}

/// Best-effort: a preference that fails to persist still applies for this run.
fn remember(state: &AppState, key: &str, value: &str) {
    if let Some(conn) = state.db.as_ref() {
        if let Err(e) = db::kv_set(conn, key, value) {
            tracing::warn!(key, error = %e, "failed to persist ui preference");
        }
    }
}

fn handle_ui_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, ui_json(state))
}

fn handle_set_locale(state: &mut AppState, req: &Request) -> serde_json::Value {
    let raw = req
        .params
        .get("locale")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    let Some(locale) = Locale::parse(raw) else {
        return err(
            &req.id,
            "bad_params",
            format!("unsupported locale: {raw:?}"),
            Some(json!({ "supported": ["en", "fr", "ar"] })),
        );
    };
    state.store.dispatch(Action::Ui(UiAction::SetLocale(locale)));
    remember(state, LOCALE_KEY, locale.code());
    ok(&req.id, ui_json(state))
}

fn handle_set_theme(state: &mut AppState, req: &Request) -> serde_json::Value {
    let raw = req
        .params
        .get("theme")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    let Some(theme) = Theme::parse(raw) else {
        return err(&req.id, "bad_params", format!("unknown theme: {raw:?}"), None);
    };
    state.store.dispatch(Action::Ui(UiAction::SetTheme(theme)));
    remember(state, THEME_KEY, raw);
    ok(&req.id, ui_json(state))
}

fn handle_toggle_sidebar(state: &mut AppState, req: &Request) -> serde_json::Value {
    let action = match req.params.get("open").and_then(|v| v.as_bool()) {
        Some(open) => UiAction::SetSidebar(open),
        None => UiAction::ToggleSidebar,
    };
    state.store.dispatch(Action::Ui(action));
    ok(&req.id, ui_json(state))
}

#[derive(Debug, Deserialize)]
struct TranslateParams {
    key: String,
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    args: BTreeMap<String, String>,
}

fn handle_translate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p: TranslateParams = match parse_params(req) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let locale = p
        .locale
        .as_deref()
        .and_then(Locale::parse)
        .unwrap_or(state.store.locale());
    let args: Vec<(&str, String)> = p
        .args
        .iter()
        .map(|(k, v)| (k.as_str(), v.clone()))
        .collect();
    ok(
        &req.id,
        json!({
            "text": i18n::render(locale, &p.key, &args),
            "locale": locale,
            "direction": locale.direction(),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "ui.get" => Some(handle_ui_get(state, req)),
        "ui.setLocale" => Some(handle_set_locale(state, req)),
        "ui.setTheme" => Some(handle_set_theme(state, req)),
        "ui.toggleSidebar" => Some(handle_toggle_sidebar(state, req)),
        "i18n.translate" => Some(handle_translate(state, req)),
        _ => None,
    }
}
