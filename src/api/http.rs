use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;

use crate::config::Endpoints;

use super::{ApiError, ApiRequest, Method, Result, Service, Transport};

/// Health probes use their own short fixed timeout regardless of configuration.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(3);

pub struct HttpTransport {
    client: Client,
    health_client: Client,
    endpoints: Endpoints,
}

impl HttpTransport {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let health_client = Client::builder().timeout(HEALTH_TIMEOUT).build()?;
        Ok(Self {
            client,
            health_client,
            endpoints,
        })
    }

    fn base(&self, service: Service) -> &str {
        match service {
            Service::Classroom => &self.endpoints.classroom,
            Service::Users => &self.endpoints.users,
            Service::Auth => &self.endpoints.auth,
        }
    }

    fn url(&self, service: Service, path: &str) -> String {
        format!(
            "{}/{}",
            self.base(service).trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Transport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    fn send(&self, req: &ApiRequest, token: Option<&str>) -> Result<Value> {
        let url = self.url(req.service, &req.path);
        let mut builder = match req.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        }
        .header(USER_AGENT, format!("majord/{}", env!("CARGO_PKG_VERSION")))
        .header(ACCEPT, "application/json");
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn health(&self) -> Result<()> {
        let url = self.url(Service::Classroom, "health");
        let response = self.health_client.get(&url).send()?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::from_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("health check failed"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let t = HttpTransport::new(
            Endpoints {
                classroom: "https://api.example.org/classroom/".into(),
                users: "https://api.example.org/users".into(),
                auth: "https://auth.example.org".into(),
            },
            Duration::from_secs(5),
        )
        .expect("client");
        assert_eq!(
            t.url(Service::Classroom, "/groups/g1"),
            "https://api.example.org/classroom/groups/g1"
        );
        assert_eq!(
            t.url(Service::Auth, "auth/login"),
            "https://auth.example.org/auth/login"
        );
    }
}
