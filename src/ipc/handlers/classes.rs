use serde::Deserialize;
use serde_json::json;

use crate::i18n;
use crate::ipc::error::{ok, parse_params, submit_err};
use crate::ipc::handlers::crud;
use crate::ipc::types::{AppState, Request};
use crate::model::Class;
use crate::selectors;
use crate::store::{Action, ClassAction};
use crate::submit;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RosterParams {
    class_id: String,
    student_id: String,
}

/// Applies the roster change to a copy, pushes it, and only then updates the slice.
/// A change that would not alter the roster never reaches the network.
fn handle_roster_change(state: &mut AppState, req: &Request, adding: bool) -> serde_json::Value {
    if let Err(resp) = crud::guard(state, req) {
        return resp;
    }
    let p: RosterParams = match parse_params(req) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let locale = state.store.locale();
    let Some(current) = state.store.classes.get(&p.class_id) else {
        return crud::not_found(state, req, &p.class_id);
    };

    let mut next = current.clone();
    let changed = if adding {
        next.add_student(&p.student_id)
    } else {
        next.remove_student(&p.student_id)
    };
    if !changed {
        return ok(
            &req.id,
            json!({
                "changed": false,
                "record": current,
                "notice": i18n::t(locale, "notice.unchanged"),
            }),
        );
    }

    if let Err(e) = submit::push::<Class>(&state.api, &next) {
        return submit_err(&req.id, locale, &e);
    }
    let action = if adding {
        ClassAction::AddStudent {
            class_id: p.class_id.clone(),
            student_id: p.student_id,
        }
    } else {
        ClassAction::RemoveStudent {
            class_id: p.class_id.clone(),
            student_id: p.student_id,
        }
    };
    state.store.dispatch(Action::Classes(action));

    let notice = if adding {
        "notice.memberAdded"
    } else {
        "notice.memberRemoved"
    };
    ok(
        &req.id,
        json!({
            "changed": true,
            "record": state.store.classes.get(&p.class_id),
            "notice": i18n::t(locale, notice),
        }),
    )
}

fn handle_classes_students(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = match crud::required_id(req, "classId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(class) = state.store.classes.get(&class_id) else {
        return crud::not_found(state, req, &class_id);
    };
    let students = selectors::students_in_class(&state.store, &class_id);
    ok(
        &req.id,
        json!({
            "classId": class_id,
            "currentStudents": class.current_students,
            "students": students,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.addStudent" => Some(handle_roster_change(state, req, true)),
        "classes.removeStudent" => Some(handle_roster_change(state, req, false)),
        "classes.students" => Some(handle_classes_students(state, req)),
        _ => crud::try_handle::<Class>(state, req, "classes", true),
    }
}
