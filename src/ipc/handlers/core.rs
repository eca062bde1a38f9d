use std::path::{Path, PathBuf};

use serde_json::json;

use crate::db;
use crate::i18n::Locale;
use crate::ipc::error::{api_err, err, ok};
use crate::ipc::types::{AppState, Request};
use crate::session;
use crate::store::{Action, AuthAction, Theme, UiAction};

pub const LOCALE_KEY: &str = "ui.locale";
pub const THEME_KEY: &str = "ui.theme";

/// Opens (or creates) the workspace database, then restores the stored session
/// and UI preferences. Returns whether a session was restored.
pub fn open_workspace(state: &mut AppState, path: &Path) -> anyhow::Result<bool> {
    let conn = db::open_db(path)?;

    let locale = db::kv_get(&conn, LOCALE_KEY)?
        .as_deref()
        .and_then(Locale::parse)
        .unwrap_or(state.config.locale);
    let theme = db::kv_get(&conn, THEME_KEY)?
        .as_deref()
        .and_then(Theme::parse)
        .unwrap_or_default();
    state.store.dispatch(Action::Ui(UiAction::SetLocale(locale)));
    state.store.dispatch(Action::Ui(UiAction::SetTheme(theme)));

    // Nothing from a previously selected workspace outlives the switch.
    state.api.set_token(None);
    state.store.dispatch(Action::Auth(AuthAction::SignedOut));
    let restored = match session::load(&conn)? {
        Some(s) => {
            tracing::info!(user = %s.user.id, "session restored");
            state.api.set_token(Some(s.token));
            state.store.dispatch(Action::Auth(AuthAction::SignedIn(s.user)));
            true
        }
        None => false,
    };

    state.workspace = Some(path.to_path_buf());
    state.db = Some(conn);
    tracing::info!(workspace = %path.display(), "workspace opened");
    Ok(restored)
}

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string()),
            "transport": state.api.transport_name(),
        }),
    )
}

fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    match open_workspace(state, &path) {
        Ok(restored) => ok(
            &req.id,
            json!({
                "workspacePath": path.to_string_lossy(),
                "sessionRestored": restored,
            }),
        ),
        Err(e) => err(&req.id, "db_open_failed", format!("{e:?}"), None),
    }
}

fn handle_config_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let c = &state.config;
    let endpoints = c.endpoints();
    ok(
        &req.id,
        json!({
            "workspace": c.workspace.as_ref().map(|p| p.to_string_lossy().to_string()),
            "classroomApiUrl": endpoints.as_ref().map(|e| e.classroom.as_str()),
            "usersApiUrl": endpoints.as_ref().map(|e| e.users.as_str()),
            "authApiUrl": endpoints.as_ref().map(|e| e.auth.as_str()),
            "timeoutSecs": c.request_timeout.as_secs(),
            "locale": c.locale,
            "transport": state.api.transport_name(),
        }),
    )
}

fn handle_api_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.api.health() {
        Ok(()) => ok(
            &req.id,
            json!({ "reachable": true, "transport": state.api.transport_name() }),
        ),
        Err(e) => api_err(&req.id, state.store.locale(), &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        "config.get" => Some(handle_config_get(state, req)),
        "api.health" => Some(handle_api_health(state, req)),
        _ => None,
    }
}
