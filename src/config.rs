use std::path::PathBuf;
use std::time::Duration;

use crate::i18n::Locale;
use crate::logging::{LogConfig, LogFormat};

/// Base URLs of the three external services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub classroom: String,
    pub users: String,
    pub auth: String,
}

/// Process configuration.
///
/// Parsed from `--flag=value` arguments, falling back to `MAJOR_*` environment
/// variables, then to defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Workspace opened at startup (session storage lives there).
    pub workspace: Option<PathBuf>,
    pub classroom_api_url: Option<String>,
    /// Defaults to the classroom URL.
    pub users_api_url: Option<String>,
    /// Defaults to the classroom URL.
    pub auth_api_url: Option<String>,
    pub request_timeout: Duration,
    pub locale: Locale,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace: None,
            classroom_api_url: None,
            users_api_url: None,
            auth_api_url: None,
            request_timeout: Duration::from_secs(15),
            locale: Locale::En,
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Supported flags:
    /// - `--workspace=PATH`
    /// - `--classroom-api=URL`, `--users-api=URL`, `--auth-api=URL`
    /// - `--timeout-secs=N`
    /// - `--locale=CODE`
    /// - `--log-level=FILTER`, `--log-format=compact|json`
    pub fn from_args(args: &[String], env: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        config.workspace = env("MAJOR_WORKSPACE").map(PathBuf::from);
        config.classroom_api_url = env("MAJOR_CLASSROOM_API_URL");
        config.users_api_url = env("MAJOR_USERS_API_URL");
        config.auth_api_url = env("MAJOR_AUTH_API_URL");
        if let Some(secs) = env("MAJOR_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(locale) = env("MAJOR_LOCALE").and_then(|v| Locale::parse(&v)) {
            config.locale = locale;
        }
        if let Some(filter) = env("MAJOR_LOG") {
            config.log.filter = filter;
        }

        for arg in args {
            if let Some(val) = arg.strip_prefix("--workspace=") {
                config.workspace = Some(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--classroom-api=") {
                config.classroom_api_url = Some(val.to_string());
            } else if let Some(val) = arg.strip_prefix("--users-api=") {
                config.users_api_url = Some(val.to_string());
            } else if let Some(val) = arg.strip_prefix("--auth-api=") {
                config.auth_api_url = Some(val.to_string());
            } else if let Some(val) = arg.strip_prefix("--timeout-secs=") {
                if let Ok(secs) = val.parse() {
                    config.request_timeout = Duration::from_secs(secs);
                }
            } else if let Some(val) = arg.strip_prefix("--locale=") {
                if let Some(locale) = Locale::parse(val) {
                    config.locale = locale;
                }
            } else if let Some(val) = arg.strip_prefix("--log-level=") {
                config.log.filter = val.to_string();
            } else if let Some(val) = arg.strip_prefix("--log-format=") {
                config.log.format = LogFormat::parse(val).unwrap_or_default();
            }
        }

        // Empty values count as unset.
        for url in [
            &mut config.classroom_api_url,
            &mut config.users_api_url,
            &mut config.auth_api_url,
        ] {
            if url.as_deref().is_some_and(|u| u.trim().is_empty()) {
                *url = None;
            }
        }

        config
    }

    pub fn from_env_and_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_args(&args, |k| std::env::var(k).ok())
    }

    /// `None` selects the in-process API stand-in.
    pub fn endpoints(&self) -> Option<Endpoints> {
        let classroom = self.classroom_api_url.clone()?;
        Some(Endpoints {
            users: self
                .users_api_url
                .clone()
                .unwrap_or_else(|| classroom.clone()),
            auth: self
                .auth_api_url
                .clone()
                .unwrap_or_else(|| classroom.clone()),
            classroom,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags_override_environment() {
        let env = |k: &str| match k {
            "MAJOR_CLASSROOM_API_URL" => Some("https://env.example.org".to_string()),
            "MAJOR_LOCALE" => Some("fr".to_string()),
            _ => None,
        };
        let c = Config::from_args(
            &args(&["--classroom-api=https://flag.example.org", "--timeout-secs=4"]),
            env,
        );
        assert_eq!(c.classroom_api_url.as_deref(), Some("https://flag.example.org"));
        assert_eq!(c.locale, Locale::Fr);
        assert_eq!(c.request_timeout, Duration::from_secs(4));
    }

    #[test]
    fn endpoints_fall_back_to_classroom_url() {
        let c = Config::from_args(
            &args(&[
                "--classroom-api=https://api.example.org",
                "--auth-api=https://auth.example.org",
            ]),
            |_| None,
        );
        let e = c.endpoints().expect("endpoints");
        assert_eq!(e.users, "https://api.example.org");
        assert_eq!(e.auth, "https://auth.example.org");
    }

    #[test]
    fn no_classroom_url_means_local_mode() {
        let c = Config::from_args(&args(&["--classroom-api="]), |_| None);
        assert!(c.endpoints().is_none());
        assert_eq!(c.locale, Locale::En);
    }
}
