use serde::Deserialize;
use serde_json::json;

use crate::i18n;
use crate::ipc::error::{api_err, ok, parse_params, submit_err};
use crate::ipc::handlers::crud;
use crate::ipc::types::{AppState, Request};
use crate::model::{BulkMarks, Mark};
use crate::submit;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkFilter {
    student_id: Option<String>,
    classroom_id: Option<String>,
    group_id: Option<String>,
}

impl MarkFilter {
    fn matches(&self, m: &Mark) -> bool {
        fn eq(want: &Option<String>, have: Option<&str>) -> bool {
            want.as_deref().map_or(true, |w| have == Some(w))
        }
        eq(&self.student_id, Some(m.student_id.as_str()))
            && eq(&self.classroom_id, m.classroom_id.as_deref())
            && eq(&self.group_id, m.group_id.as_deref())
    }
}

fn handle_marks_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let filter: MarkFilter = if req.params.is_null() {
        MarkFilter::default()
    } else {
        match parse_params(req) {
            Ok(f) => f,
            Err(resp) => return resp,
        }
    };
    if let Err(e) = submit::refresh::<Mark>(&mut state.store, &state.api) {
        return api_err(&req.id, state.store.locale(), &e);
    }
    let items: Vec<&Mark> = state
        .store
        .marks
        .items
        .iter()
        .filter(|m| filter.matches(m))
        .collect();
    ok(&req.id, json!({ "count": items.len(), "items": items }))
}

fn handle_marks_bulk_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(resp) = crud::guard(state, req) {
        return resp;
    }
    let sheet: BulkMarks = match parse_params(req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let locale = state.store.locale();
    match submit::submit_bulk_marks(&mut state.store, &state.api, &sheet) {
        Ok(marks) => ok(
            &req.id,
            json!({
                "count": marks.len(),
                "items": marks,
                "notice": i18n::render(locale, "notice.marksSubmitted", &[("count", marks.len().to_string())]),
            }),
        ),
        Err(e) => submit_err(&req.id, locale, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "marks.list" => Some(handle_marks_list(state, req)),
        "marks.submit" => Some(match crud::guard(state, req) {
            Ok(()) => crud::handle_create::<Mark>(state, req),
            Err(resp) => resp,
        }),
        "marks.bulkSubmit" => Some(handle_marks_bulk_submit(state, req)),
        "marks.update" | "marks.delete" => crud::try_handle::<Mark>(state, req, "marks", true),
        _ => None,
    }
}
