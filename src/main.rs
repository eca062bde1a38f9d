mod api;
mod config;
mod db;
mod i18n;
mod ipc;
mod logging;
mod model;
mod selectors;
mod session;
mod store;
mod submit;
mod validate;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use serde_json::json;

fn main() -> ExitCode {
    let config = config::Config::from_env_and_args();
    logging::init_logging(&config.log);

    let api = match api::ApiClient::from_config(&config) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!(error = %e, "failed to build api client");
            return ExitCode::FAILURE;
        }
    };

    let startup_workspace = config.workspace.clone();
    let mut state = ipc::AppState::new(config, api);
    if let Some(path) = startup_workspace {
        // A broken workspace flag should not keep the sidecar from answering.
        if let Err(e) = ipc::open_workspace(&mut state, &path) {
            tracing::warn!(workspace = %path.display(), error = %e, "could not open startup workspace");
        }
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "majord ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "stdin closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let resp = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => ipc::handle_request(&mut state, req),
            Err(e) => {
                tracing::debug!(error = %e, "unparseable request line");
                json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                })
            }
        };

        let out = serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string());
        if writeln!(stdout, "{out}").and_then(|_| stdout.flush()).is_err() {
            break;
        }
    }

    tracing::info!("stdin closed; exiting");
    ExitCode::SUCCESS
}
