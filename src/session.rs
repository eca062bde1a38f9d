//! Session blob persisted in the workspace: auth token, refresh token and the
//! serialized user, each under a fixed key.

use rusqlite::Connection;

use crate::db;
use crate::model::User;

pub const TOKEN_KEY: &str = "auth.token";
pub const REFRESH_TOKEN_KEY: &str = "auth.refreshToken";
pub const USER_KEY: &str = "auth.user";

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub refresh_token: Option<String>,
    pub user: User,
}

pub fn save(conn: &Connection, session: &Session) -> anyhow::Result<()> {
    let tx = conn.unchecked_transaction()?;
    db::kv_set(&tx, TOKEN_KEY, &session.token)?;
    match &session.refresh_token {
        Some(t) => db::kv_set(&tx, REFRESH_TOKEN_KEY, t)?,
        None => db::kv_delete(&tx, REFRESH_TOKEN_KEY)?,
    }
    db::kv_set_json(&tx, USER_KEY, &serde_json::to_value(&session.user)?)?;
    tx.commit()?;
    Ok(())
}

/// A session missing its token or user counts as no session at all.
pub fn load(conn: &Connection) -> anyhow::Result<Option<Session>> {
    let Some(token) = db::kv_get(conn, TOKEN_KEY)? else {
        return Ok(None);
    };
    let Some(raw) = db::kv_get(conn, USER_KEY)? else {
        return Ok(None);
    };
    let user: User = match serde_json::from_str(&raw) {
        Ok(u) => u,
        Err(e) => {
            tracing::warn!(error = %e, "stored user is unreadable; ignoring session");
            return Ok(None);
        }
    };
    Ok(Some(Session {
        token,
        refresh_token: db::kv_get(conn, REFRESH_TOKEN_KEY)?,
        user,
    }))
}

pub fn clear(conn: &Connection) -> anyhow::Result<()> {
    for key in [TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
        db::kv_delete(conn, key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> std::path::PathBuf {
        let p = std::env::temp_dir().join(format!(
            "{}-{}",
            prefix,
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ));
        std::fs::create_dir_all(&p).expect("create temp dir");
        p
    }

    #[test]
    fn save_load_clear() {
        let conn = db::open_db(&temp_dir("major-session")).expect("open db");
        assert_eq!(load(&conn).expect("load"), None);

        let s = Session {
            token: "tok".into(),
            refresh_token: Some("ref".into()),
            user: User {
                id: "u1".into(),
                name: "Hind".into(),
                email: "hind@school.ma".into(),
                role: Role::Parent,
            },
        };
        save(&conn, &s).expect("save");
        assert_eq!(load(&conn).expect("load"), Some(s.clone()));

        let rotated = Session {
            token: "tok2".into(),
            refresh_token: None,
            ..s
        };
        save(&conn, &rotated).expect("save again");
        assert_eq!(load(&conn).expect("load"), Some(rotated));

        clear(&conn).expect("clear");
        assert_eq!(load(&conn).expect("load"), None);
    }

    #[test]
    fn garbled_user_counts_as_no_session() {
        let conn = db::open_db(&temp_dir("major-session-garbled")).expect("open db");
        db::kv_set(&conn, TOKEN_KEY, "tok").expect("seed token");
        db::kv_set(&conn, USER_KEY, "{not json").expect("seed user");
        assert_eq!(load(&conn).expect("load"), None);

        db::kv_set(&conn, USER_KEY, r#"{"id":"u1"}"#).expect("seed partial user");
        assert_eq!(load(&conn).expect("load"), None);
    }
}
