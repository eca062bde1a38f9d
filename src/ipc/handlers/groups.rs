use serde::Deserialize;
use serde_json::json;

use crate::i18n;
use crate::ipc::error::{ok, parse_params, submit_err};
use crate::ipc::handlers::crud;
use crate::ipc::types::{AppState, Request};
use crate::model::Group;
use crate::selectors;
use crate::store::{Action, GroupAction};
use crate::submit;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberParams {
    group_id: String,
    member_id: String,
}

fn handle_add_member(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(resp) = crud::guard(state, req) {
        return resp;
    }
    let p: MemberParams = match parse_params(req) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let locale = state.store.locale();
    let Some(current) = state.store.groups.get(&p.group_id) else {
        return crud::not_found(state, req, &p.group_id);
    };

    // Duplicate and full are both silent no-ops; `reason` only tells the caller which.
    let reason = if current.member_ids.iter().any(|m| *m == p.member_id) {
        Some("duplicate")
    } else if current.is_full() {
        Some("full")
    } else {
        None
    };
    if let Some(reason) = reason {
        tracing::debug!(group = %p.group_id, member = %p.member_id, reason, "add member skipped");
        return ok(
            &req.id,
            json!({
                "changed": false,
                "reason": reason,
                "record": current,
                "notice": i18n::t(locale, "notice.unchanged"),
            }),
        );
    }

    let mut next = current.clone();
    next.add_member(&p.member_id);
    if let Err(e) = submit::push::<Group>(&state.api, &next) {
        return submit_err(&req.id, locale, &e);
    }
    state.store.dispatch(Action::Groups(GroupAction::AddMember {
        group_id: p.group_id.clone(),
        member_id: p.member_id,
    }));
    ok(
        &req.id,
        json!({
            "changed": true,
            "record": state.store.groups.get(&p.group_id),
            "notice": i18n::t(locale, "notice.memberAdded"),
        }),
    )
}

fn handle_remove_member(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(resp) = crud::guard(state, req) {
        return resp;
    }
    let p: MemberParams = match parse_params(req) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let locale = state.store.locale();
    let Some(current) = state.store.groups.get(&p.group_id) else {
        return crud::not_found(state, req, &p.group_id);
    };

    let mut next = current.clone();
    if !next.remove_member(&p.member_id) {
        return ok(
            &req.id,
            json!({
                "changed": false,
                "record": current,
                "notice": i18n::t(locale, "notice.unchanged"),
            }),
        );
    }
    if let Err(e) = submit::push::<Group>(&state.api, &next) {
        return submit_err(&req.id, locale, &e);
    }
    state.store.dispatch(Action::Groups(GroupAction::RemoveMember {
        group_id: p.group_id.clone(),
        member_id: p.member_id,
    }));
    ok(
        &req.id,
        json!({
            "changed": true,
            "record": state.store.groups.get(&p.group_id),
            "notice": i18n::t(locale, "notice.memberRemoved"),
        }),
    )
}

fn handle_groups_available(state: &mut AppState, req: &Request) -> serde_json::Value {
    let open = selectors::groups_with_open_seats(&state.store.groups);
    let full = selectors::full_groups(&state.store.groups).len();
    ok(&req.id, json!({ "groups": open, "fullCount": full }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "groups.addMember" => Some(handle_add_member(state, req)),
        "groups.removeMember" => Some(handle_remove_member(state, req)),
        "groups.available" => Some(handle_groups_available(state, req)),
        _ => crud::try_handle::<Group>(state, req, "groups", true),
    }
}
