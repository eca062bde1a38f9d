mod common;

use common::{temp_dir, Sidecar};
use rusqlite::Connection;
use serde_json::json;

#[test]
fn session_survives_a_restart_and_logout_clears_it() {
    let workspace = temp_dir("majord-session");
    let ws = workspace.to_string_lossy().to_string();

    let mut sc = Sidecar::spawn();
    let selected = sc.request_ok("workspace.select", json!({ "path": ws }));
    assert_eq!(selected["sessionRestored"], false);

    let bad = sc.request_err(
        "auth.login",
        json!({ "email": "nadia", "password": "123" }),
    );
    assert_eq!(bad["code"], "validation_failed");

    let login = sc.request_ok(
        "auth.login",
        json!({ "email": "nadia@school.ma", "password": "secret1" }),
    );
    assert_eq!(login["persisted"], true);
    assert_eq!(login["notice"], "Welcome back, nadia");
    sc.request_ok("ui.setLocale", json!({ "locale": "ar" }));
    sc.shutdown();

    let conn = Connection::open(workspace.join("major.sqlite3")).expect("open db");
    let token: String = conn
        .query_row("SELECT value FROM kv WHERE key = 'auth.token'", [], |r| r.get(0))
        .expect("token row");
    assert!(token.starts_with("local-"));
    drop(conn);

    let mut sc = Sidecar::spawn_with_args(&[&format!("--workspace={ws}")]);
    let session = sc.request_ok("session.get", json!({}));
    assert_eq!(session["signedIn"], true);
    assert_eq!(session["user"]["email"], "nadia@school.ma");
    assert_eq!(session["canManage"], true);

    let ui = sc.request_ok("ui.get", json!({}));
    assert_eq!(ui["locale"], "ar");
    assert_eq!(ui["direction"], "rtl");

    let out = sc.request_ok("auth.logout", json!({}));
    assert_eq!(out["notice"], "تم تسجيل الخروج");
    let session = sc.request_ok("session.get", json!({}));
    assert_eq!(session["signedIn"], false);
    sc.shutdown();

    let mut sc = Sidecar::spawn();
    let selected = sc.request_ok("workspace.select", json!({ "path": ws }));
    assert_eq!(selected["sessionRestored"], false);
    sc.shutdown();
}

#[test]
fn read_only_roles_cannot_mutate_school_data() {
    let workspace = temp_dir("majord-parent-role");
    let conn = majord_db(&workspace);
    for (key, value) in [
        ("auth.token", "parent-token".to_string()),
        (
            "auth.user",
            json!({ "id": "p1", "name": "Karim", "email": "karim@home.ma", "role": "parent" })
                .to_string(),
        ),
    ] {
        conn.execute(
            "INSERT INTO kv(key, value, updated_at) VALUES(?, ?, '2025-01-01T00:00:00Z')",
            (key, value),
        )
        .expect("seed session");
    }
    drop(conn);

    let mut sc = Sidecar::spawn();
    let selected = sc.request_ok(
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(selected["sessionRestored"], true);

    let session = sc.request_ok("session.get", json!({}));
    assert_eq!(session["role"], "parent");
    assert_eq!(session["canManage"], false);

    let denied = sc.request_err("classes.create", json!({ "name": "5C", "grade": "5" }));
    assert_eq!(denied["code"], "forbidden");
    assert_eq!(denied["details"]["role"], "parent");

    let denied = sc.request_err(
        "groups.addMember",
        json!({ "groupId": "g1", "memberId": "s1" }),
    );
    assert_eq!(denied["code"], "forbidden");

    // Reading and messaging stay open.
    sc.request_ok("classes.list", json!({}));
    let sent = sc.request_ok(
        "inbox.send",
        json!({ "toIds": ["t1"], "subject": "Absence", "body": "Yanis is sick today." }),
    );
    assert_eq!(sent["record"]["fromId"], "p1");

    sc.shutdown();
}

#[test]
fn switching_workspaces_drops_the_previous_session_and_prefs() {
    let first = temp_dir("majord-switch-a");
    let second = temp_dir("majord-switch-b");

    let mut sc = Sidecar::spawn();
    sc.request_ok("workspace.select", json!({ "path": first.to_string_lossy() }));
    sc.request_ok(
        "auth.login",
        json!({ "email": "x@school.ma", "password": "secret1" }),
    );
    sc.request_ok("ui.setLocale", json!({ "locale": "ar" }));
    sc.request_ok("ui.setTheme", json!({ "theme": "dark" }));

    let selected = sc.request_ok("workspace.select", json!({ "path": second.to_string_lossy() }));
    assert_eq!(selected["sessionRestored"], false);
    let session = sc.request_ok("session.get", json!({}));
    assert_eq!(session["signedIn"], false);
    assert_eq!(session["user"], serde_json::Value::Null);
    let ui = sc.request_ok("ui.get", json!({}));
    assert_eq!(ui["locale"], "en");
    assert_eq!(ui["theme"], "light");

    // Going back restores what the first workspace stored.
    let selected = sc.request_ok("workspace.select", json!({ "path": first.to_string_lossy() }));
    assert_eq!(selected["sessionRestored"], true);
    let ui = sc.request_ok("ui.get", json!({}));
    assert_eq!(ui["locale"], "ar");
    assert_eq!(ui["theme"], "dark");

    sc.shutdown();
}

#[test]
fn unreadable_stored_user_opens_the_workspace_signed_out() {
    let workspace = temp_dir("majord-garbled-user");
    let conn = majord_db(&workspace);
    for (key, value) in [("auth.token", "tok"), ("auth.user", "{not json")] {
        conn.execute(
            "INSERT INTO kv(key, value, updated_at) VALUES(?, ?, '2025-01-01T00:00:00Z')",
            (key, value),
        )
        .expect("seed session");
    }
    drop(conn);

    let mut sc = Sidecar::spawn();
    let selected = sc.request_ok(
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(selected["sessionRestored"], false);
    let session = sc.request_ok("session.get", json!({}));
    assert_eq!(session["signedIn"], false);
    sc.shutdown();
}

#[test]
fn login_that_cannot_be_saved_stays_signed_out() {
    let workspace = temp_dir("majord-unsaved-login");
    let mut sc = Sidecar::spawn();
    sc.request_ok(
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let conn = Connection::open(workspace.join("major.sqlite3")).expect("open db");
    conn.execute("DROP TABLE kv", []).expect("drop kv");
    drop(conn);

    let failed = sc.request_err(
        "auth.login",
        json!({ "email": "nadia@school.ma", "password": "secret1" }),
    );
    assert_eq!(failed["code"], "db_update_failed");

    let session = sc.request_ok("session.get", json!({}));
    assert_eq!(session["signedIn"], false);
    assert_eq!(session["user"], serde_json::Value::Null);
    assert!(session["error"].is_string());

    sc.shutdown();
}

fn majord_db(workspace: &std::path::Path) -> Connection {
    let conn = Connection::open(workspace.join("major.sqlite3")).expect("open db");
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )
    .expect("create kv");
    conn
}
