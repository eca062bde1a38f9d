use std::path::PathBuf;

use rusqlite::Connection;
use serde::Deserialize;

use crate::api::ApiClient;
use crate::config::Config;
use crate::store::Store;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub config: Config,
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
    pub store: Store,
    pub api: ApiClient,
}

impl AppState {
    pub fn new(config: Config, api: ApiClient) -> Self {
        let store = Store::new(config.locale);
        Self {
            config,
            workspace: None,
            db: None,
            store,
            api,
        }
    }
}
