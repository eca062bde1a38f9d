use serde::de::DeserializeOwned;
use serde_json::json;

use crate::api::ApiError;
use crate::i18n::{self, Locale};
use crate::ipc::types::Request;
use crate::submit::SubmitError;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

pub fn api_err(id: &str, locale: Locale, e: &ApiError) -> serde_json::Value {
    err(
        id,
        e.code(),
        i18n::t(locale, e.message_key()),
        Some(json!({ "status": e.status(), "cause": e.to_string() })),
    )
}

pub fn submit_err(id: &str, locale: Locale, e: &SubmitError) -> serde_json::Value {
    match e {
        SubmitError::Validation(v) => err(
            id,
            "validation_failed",
            i18n::t(locale, "validation.failed"),
            Some(json!({ "fields": v.to_json(locale) })),
        ),
        SubmitError::Api(a) => api_err(id, locale, a),
    }
}

/// Decodes `params` into a typed payload, or answers `bad_params`.
pub fn parse_params<T: DeserializeOwned>(req: &Request) -> Result<T, serde_json::Value> {
    serde_json::from_value(req.params.clone())
        .map_err(|e| err(&req.id, "bad_params", e.to_string(), None))
}
