use serde_json::json;

use crate::i18n;
use crate::ipc::error::{api_err, err, ok, parse_params, submit_err};
use crate::ipc::types::{AppState, Request};
use crate::session::{self, Session};
use crate::store::{Action, AuthAction};
use crate::submit::SubmitError;
use crate::validate::{LoginForm, Validate};

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let form: LoginForm = match parse_params(req) {
        Ok(f) => f,
        Err(resp) => return resp,
    };
    let locale = state.store.locale();
    if let Err(e) = form.validate() {
        return submit_err(&req.id, locale, &SubmitError::Validation(e));
    }

    state.store.dispatch(Action::Auth(AuthAction::Started));
    let resp = match state.api.login(&form) {
        Ok(r) => r,
        Err(e) => {
            let message = i18n::t(locale, e.message_key()).to_string();
            state.store.dispatch(Action::Auth(AuthAction::Failed(message)));
            return api_err(&req.id, locale, &e);
        }
    };

    let session = Session {
        token: resp.token,
        refresh_token: resp.refresh_token,
        user: resp.user,
    };
    let persisted = match state.db.as_ref() {
        Some(conn) => {
            if let Err(e) = session::save(conn, &session) {
                tracing::error!(error = %e, "session not saved; staying signed out");
                state
                    .store
                    .dispatch(Action::Auth(AuthAction::Failed(e.to_string())));
                return err(&req.id, "db_update_failed", e.to_string(), None);
            }
            true
        }
        None => false,
    };

    tracing::info!(user = %session.user.id, role = ?session.user.role, "signed in");
    state.api.set_token(Some(session.token));
    state
        .store
        .dispatch(Action::Auth(AuthAction::SignedIn(session.user.clone())));
    let user = session.user;

    ok(
        &req.id,
        json!({
            "notice": i18n::render(locale, "notice.signedIn", &[("name", user.name.clone())]),
            "user": user,
            "persisted": persisted,
        }),
    )
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.api.set_token(None);
    state.store.dispatch(Action::Auth(AuthAction::SignedOut));
    if let Some(conn) = state.db.as_ref() {
        if let Err(e) = session::clear(conn) {
            return err(&req.id, "db_update_failed", e.to_string(), None);
        }
    }
    tracing::info!("signed out");
    ok(
        &req.id,
        json!({ "notice": i18n::t(state.store.locale(), "notice.signedOut") }),
    )
}

fn handle_session_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let auth = &state.store.auth;
    let role = auth.user.as_ref().map(|u| u.role);
    ok(
        &req.id,
        json!({
            "signedIn": auth.user.is_some() && state.api.has_token(),
            "user": auth.user,
            "role": role,
            "canManage": role.is_some_and(|r| r.can_manage_school()),
            "error": auth.error,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.login" => Some(handle_login(state, req)),
        "auth.logout" => Some(handle_logout(state, req)),
        "session.get" => Some(handle_session_get(state, req)),
        _ => None,
    }
}
