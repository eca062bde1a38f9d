//! Client for the external classroom, users and auth REST APIs.
//!
//! `Transport` is the object-safe seam: it moves untyped JSON. `ApiClient`
//! layers typed helpers on top so request and response bodies are explicit
//! structs at the boundary.

mod error;
mod http;
mod local;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::model::User;
use crate::validate::LoginForm;

pub use error::ApiError;
pub use http::HttpTransport;
pub use local::LocalTransport;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Classroom,
    Users,
    Auth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub service: Service,
    pub path: String,
    pub body: Option<Value>,
}

pub trait Transport {
    /// Short name for logs and `config.get`.
    fn name(&self) -> &'static str;

    fn send(&self, req: &ApiRequest, token: Option<&str>) -> Result<Value>;

    fn health(&self) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub user: User,
}

pub struct ApiClient {
    transport: Box<dyn Transport>,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            token: None,
        }
    }

    /// HTTP when a classroom API URL is configured, the in-process stand-in otherwise.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport: Box<dyn Transport> = match config.endpoints() {
            Some(endpoints) => Box::new(HttpTransport::new(endpoints, config.request_timeout)?),
            None => Box::new(LocalTransport::new()),
        };
        tracing::info!(transport = transport.name(), "api client ready");
        Ok(Self::new(transport))
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn call(
        &self,
        method: Method,
        service: Service,
        path: String,
        body: Option<Value>,
    ) -> Result<Value> {
        let req = ApiRequest {
            method,
            service,
            path,
            body,
        };
        tracing::debug!(?method, ?service, path = %req.path, "api request");
        self.transport
            .send(&req, self.token.as_deref())
            .inspect_err(|e| tracing::warn!(path = %req.path, error = %e, "api request failed"))
    }

    pub fn list<T: DeserializeOwned>(&self, service: Service, path: &str) -> Result<Vec<T>> {
        let v = self.call(Method::Get, service, path.to_string(), None)?;
        Ok(serde_json::from_value(unwrap_envelope(v))?)
    }

    pub fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let v = self.call(Method::Post, service, path.to_string(), Some(body))?;
        Ok(serde_json::from_value(unwrap_envelope(v))?)
    }

    pub fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        id: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let v = self.call(Method::Put, service, format!("{path}/{id}"), Some(body))?;
        Ok(serde_json::from_value(unwrap_envelope(v))?)
    }

    pub fn delete(&self, service: Service, path: &str, id: &str) -> Result<()> {
        self.call(Method::Delete, service, format!("{path}/{id}"), None)
            .map(|_| ())
    }

    pub fn login(&self, form: &LoginForm) -> Result<LoginResponse> {
        self.post(Service::Auth, "auth/login", form)
    }

    pub fn health(&self) -> Result<()> {
        self.transport.health()
    }
}

/// Accepts both bare payloads and `{ "data": ... }` envelopes.
fn unwrap_envelope(v: Value) -> Value {
    match v {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};

    use super::*;

    /// Records requests and answers every one with the same canned result.
    pub struct ScriptedTransport {
        pub reply: RefCell<Result<Value>>,
        pub calls: Cell<usize>,
    }

    impl ScriptedTransport {
        pub fn failing(err: ApiError) -> Self {
            Self {
                reply: RefCell::new(Err(err)),
                calls: Cell::new(0),
            }
        }
    }

    impl Transport for std::rc::Rc<ScriptedTransport> {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn send(&self, _req: &ApiRequest, _token: Option<&str>) -> Result<Value> {
            self.calls.set(self.calls.get() + 1);
            self.reply.borrow().clone()
        }

        fn health(&self) -> Result<()> {
            self.reply.borrow().clone().map(|_| ())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_is_unwrapped_only_when_alone() {
        assert_eq!(unwrap_envelope(json!({ "data": [1, 2] })), json!([1, 2]));
        assert_eq!(
            unwrap_envelope(json!({ "data": 1, "meta": {} })),
            json!({ "data": 1, "meta": {} })
        );
    }

    #[test]
    fn local_login_round_trips_through_typed_client() {
        let api = ApiClient::new(Box::new(LocalTransport::new()));
        let resp = api
            .login(&LoginForm {
                email: "nadia@school.ma".into(),
                password: "secret1".into(),
            })
            .expect("login");
        assert_eq!(resp.user.email, "nadia@school.ma");
        assert_eq!(resp.user.name, "nadia");
        assert!(resp.refresh_token.is_some());
    }
}
