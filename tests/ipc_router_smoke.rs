mod common;

use common::{temp_dir, Sidecar};
use serde_json::json;

const METHODS: &[&str] = &[
    "health",
    "config.get",
    "api.health",
    "session.get",
    "students.list",
    "students.create",
    "students.update",
    "students.delete",
    "teachers.list",
    "teachers.create",
    "parents.list",
    "parents.delete",
    "classes.list",
    "classes.create",
    "classes.addStudent",
    "classes.removeStudent",
    "classes.students",
    "groups.list",
    "groups.create",
    "groups.addMember",
    "groups.removeMember",
    "groups.available",
    "marks.list",
    "marks.submit",
    "marks.bulkSubmit",
    "marks.delete",
    "payments.list",
    "payments.create",
    "payments.markPaid",
    "payments.summary",
    "calendar.list",
    "calendar.create",
    "calendar.toggleCategory",
    "calendar.showAll",
    "calendar.visible",
    "inbox.list",
    "inbox.send",
    "inbox.markRead",
    "inbox.delete",
    "ui.get",
    "ui.setLocale",
    "ui.setTheme",
    "ui.toggleSidebar",
    "i18n.translate",
    "dashboard.stats",
    "auth.logout",
];

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let workspace = temp_dir("majord-router-smoke");
    let mut sc = Sidecar::spawn();

    sc.request_ok("workspace.select", json!({ "path": workspace.to_string_lossy() }));

    for method in METHODS {
        let resp = sc.request(method, json!({}));
        if resp.get("ok").and_then(|v| v.as_bool()) == Some(false) {
            let code = resp
                .pointer("/error/code")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            assert_ne!(code, "not_implemented", "unexpected unknown method for {}", method);
        }
    }

    let unknown = sc.request_err("students.teleport", json!({}));
    assert_eq!(unknown["code"], "not_implemented");

    sc.shutdown();
}

#[test]
fn malformed_lines_answer_bad_json_and_the_loop_continues() {
    let mut sc = Sidecar::spawn();

    let resp = sc.send_line("{not json");
    assert_eq!(resp["ok"], false);
    assert_eq!(resp["error"]["code"], "bad_json");

    let health = sc.request_ok("health", json!({}));
    assert_eq!(health["transport"], "local");
    assert!(health["workspacePath"].is_null());

    sc.shutdown();
}

#[test]
fn config_reports_offline_transport_and_flags() {
    let mut sc = Sidecar::spawn_with_args(&["--timeout-secs=7", "--locale=fr"]);

    let config = sc.request_ok("config.get", json!({}));
    assert_eq!(config["transport"], "local");
    assert_eq!(config["timeoutSecs"], 7);
    assert_eq!(config["locale"], "fr");
    assert!(config["classroomApiUrl"].is_null());

    let ui = sc.request_ok("ui.get", json!({}));
    assert_eq!(ui["locale"], "fr");

    let api = sc.request_ok("api.health", json!({}));
    assert_eq!(api["reachable"], true);

    sc.shutdown();
}
