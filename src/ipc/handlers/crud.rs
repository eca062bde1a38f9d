//! list/create/update/delete shared by every entity family.

use serde_json::json;

use crate::i18n;
use crate::ipc::error::{api_err, err, ok, parse_params, submit_err};
use crate::ipc::types::{AppState, Request};
use crate::submit::{self, Resource};

/// Rejects mutations from signed-in accounts that only read (parents, students).
/// Anonymous callers pass; the backend has the final word on tokens.
pub fn guard(state: &AppState, req: &Request) -> Result<(), serde_json::Value> {
    match state.store.auth.user.as_ref() {
        Some(user) if !user.role.can_manage_school() => {
            tracing::info!(method = %req.method, role = ?user.role, "mutation refused");
            Err(err(
                &req.id,
                "forbidden",
                i18n::t(state.store.locale(), "error.forbidden"),
                Some(json!({ "role": user.role })),
            ))
        }
        _ => Ok(()),
    }
}

pub fn required_id(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    match req.params.get(key).and_then(|v| v.as_str()) {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(err(&req.id, "bad_params", format!("missing {key}"), None)),
    }
}

pub fn not_found(state: &AppState, req: &Request, id: &str) -> serde_json::Value {
    err(
        &req.id,
        "not_found",
        i18n::t(state.store.locale(), "error.notFound"),
        Some(json!({ "id": id })),
    )
}

pub fn handle_list<R: Resource>(state: &mut AppState, req: &Request) -> serde_json::Value {
    match submit::refresh::<R>(&mut state.store, &state.api) {
        Ok(count) => ok(
            &req.id,
            json!({ "items": R::slice(&state.store).items, "count": count }),
        ),
        Err(e) => api_err(&req.id, state.store.locale(), &e),
    }
}

pub fn handle_create<R: Resource>(state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft: R::Draft = match parse_params(req) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    let locale = state.store.locale();
    match submit::create::<R>(&mut state.store, &state.api, &draft) {
        Ok(record) => ok(
            &req.id,
            json!({
                "record": record,
                "notice": submit::notice::<R>(locale, "notice.created"),
            }),
        ),
        Err(e) => submit_err(&req.id, locale, &e),
    }
}

pub fn handle_update<R: Resource>(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_id(req, "id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let draft: R::Draft = match parse_params(req) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    let locale = state.store.locale();
    match submit::update::<R>(&mut state.store, &state.api, &id, &draft) {
        Ok(record) => ok(
            &req.id,
            json!({
                "record": record,
                "notice": submit::notice::<R>(locale, "notice.updated"),
            }),
        ),
        Err(e) => submit_err(&req.id, locale, &e),
    }
}

pub fn handle_delete<R: Resource>(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_id(req, "id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let locale = state.store.locale();
    match submit::remove::<R>(&mut state.store, &state.api, &id) {
        Ok(()) => ok(
            &req.id,
            json!({
                "id": id,
                "notice": submit::notice::<R>(locale, "notice.deleted"),
            }),
        ),
        Err(e) => submit_err(&req.id, locale, &e),
    }
}

/// Routes `<family>.list|create|update|delete`. Mutations pass `guard` first when
/// `guarded` is set.
pub fn try_handle<R: Resource>(
    state: &mut AppState,
    req: &Request,
    family: &str,
    guarded: bool,
) -> Option<serde_json::Value> {
    let verb = req.method.strip_prefix(family)?.strip_prefix('.')?;
    if guarded && matches!(verb, "create" | "update" | "delete") {
        if let Err(resp) = guard(state, req) {
            return Some(resp);
        }
    }
    match verb {
        "list" => Some(handle_list::<R>(state, req)),
        "create" => Some(handle_create::<R>(state, req)),
        "update" => Some(handle_update::<R>(state, req)),
        "delete" => Some(handle_delete::<R>(state, req)),
        _ => None,
    }
}
