use super::handlers;
use super::types::{AppState, Request};
use crate::ipc::error::err;

pub fn handle_request(state: &mut AppState, req: Request) -> serde_json::Value {
    let _span = tracing::debug_span!("request", id = %req.id, method = %req.method).entered();

    let families: [fn(&mut AppState, &Request) -> Option<serde_json::Value>; 11] = [
        handlers::core::try_handle,
        handlers::auth::try_handle,
        handlers::people::try_handle,
        handlers::classes::try_handle,
        handlers::groups::try_handle,
        handlers::marks::try_handle,
        handlers::payments::try_handle,
        handlers::calendar::try_handle,
        handlers::inbox::try_handle,
        handlers::ui::try_handle,
        handlers::dashboard::try_handle,
    ];
    for try_handle in families {
        if let Some(resp) = try_handle(state, &req) {
            return resp;
        }
    }

    tracing::debug!("unknown method");
    err(
        &req.id,
        "not_implemented",
        format!("unknown method: {}", req.method),
        None,
    )
}
