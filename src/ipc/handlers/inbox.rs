use serde_json::json;

use crate::ipc::error::{ok, parse_params, submit_err};
use crate::ipc::handlers::crud;
use crate::ipc::types::{AppState, Request};
use crate::model::{Message, MessageDraft};
use crate::selectors;
use crate::store::{Action, InboxAction};
use crate::submit;

fn handle_inbox_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let mut resp = crud::handle_list::<Message>(state, req);
    if let Some(result) = resp.get_mut("result") {
        result["unread"] = json!(selectors::unread_count(&state.store.inbox));
    }
    resp
}

fn handle_inbox_send(state: &mut AppState, req: &Request) -> serde_json::Value {
    let mut draft: MessageDraft = match parse_params(req) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    if draft.from_id.trim().is_empty() {
        if let Some(user) = state.store.auth.user.as_ref() {
            draft.from_id = user.id.clone();
        }
    }
    let locale = state.store.locale();
    match submit::create::<Message>(&mut state.store, &state.api, &draft) {
        Ok(record) => ok(
            &req.id,
            json!({
                "record": record,
                "notice": submit::notice::<Message>(locale, "notice.created"),
            }),
        ),
        Err(e) => submit_err(&req.id, locale, &e),
    }
}

fn handle_mark_read(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match crud::required_id(req, "id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let locale = state.store.locale();
    let Some(current) = state.store.inbox.get(&id) else {
        return crud::not_found(state, req, &id);
    };
    if current.read {
        return ok(
            &req.id,
            json!({
                "changed": false,
                "unread": selectors::unread_count(&state.store.inbox),
            }),
        );
    }

    let mut next = current.clone();
    next.read = true;
    if let Err(e) = submit::push::<Message>(&state.api, &next) {
        return submit_err(&req.id, locale, &e);
    }
    state.store.dispatch(Action::Inbox(InboxAction::MarkRead(id)));
    ok(
        &req.id,
        json!({
            "changed": true,
            "unread": selectors::unread_count(&state.store.inbox),
            "notice": submit::notice::<Message>(locale, "notice.updated"),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "inbox.list" => Some(handle_inbox_list(state, req)),
        "inbox.send" => Some(handle_inbox_send(state, req)),
        "inbox.markRead" => Some(handle_mark_read(state, req)),
        "inbox.delete" => Some(crud::handle_delete::<Message>(state, req)),
        _ => None,
    }
}
