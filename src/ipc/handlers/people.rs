use crate::ipc::handlers::crud;
use crate::ipc::types::{AppState, Request};
use crate::model::{Parent, Student, Teacher};

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    crud::try_handle::<Student>(state, req, "students", true)
        .or_else(|| crud::try_handle::<Teacher>(state, req, "teachers", true))
        .or_else(|| crud::try_handle::<Parent>(state, req, "parents", true))
}
