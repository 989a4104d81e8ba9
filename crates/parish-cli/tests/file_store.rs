//! CLI integration tests against the file-backed store.

mod common;

use serde_json::{Value, json};

use common::{Sandbox, stderr};

fn json_lines(stdout: &str) -> Vec<Value> {
    stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn test_login_whoami_logout() {
    let sandbox = Sandbox::new();

    let stdout = sandbox.run_success(&["login", "--user-id", "u-1", "--name", "Ana Cruz"]);
    assert!(stdout.contains("Logged in successfully"));

    let stdout = sandbox.run_success(&["whoami"]);
    assert!(stdout.contains("u-1"));
    assert!(stdout.contains("Ana Cruz"));
    assert!(stdout.contains("member"));
    assert!(stdout.contains(&sandbox.store_url));

    let stdout = sandbox.run_success(&["logout"]);
    assert!(stdout.contains("Logged out"));

    let output = sandbox.run(&["whoami"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No active session"));
}

#[test]
fn test_commands_require_session() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["list", "priests"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No active session"));
}

#[test]
fn test_unknown_collection_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox.login_admin();

    let output = sandbox.run(&["list", "parishioners"]);
    assert!(!output.status.success());
}

#[cfg(target_os = "linux")]
#[test]
fn test_session_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let sandbox = Sandbox::new();
    sandbox.login("u-1");

    let path = sandbox.home.join("data").join("parish").join("session.json");
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);

    let stored: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(stored["user"]["id"], "u-1");
}

#[test]
fn test_record_lifecycle() {
    let sandbox = Sandbox::new();
    sandbox.login_admin();

    let id = sandbox.create("announcements", &["title=Parish fiesta", "pinned=true"]);
    assert_eq!(id.len(), 20);
    assert!(
        sandbox
            .store_path
            .join("announcements")
            .join(format!("{}.json", id))
            .exists()
    );

    let record = sandbox.get("announcements", &id);
    assert_eq!(record["id"], json!(id));
    assert_eq!(record["title"], "Parish fiesta");
    assert_eq!(record["pinned"], true);
    assert!(record["dateTimeStamp"].is_string());

    sandbox.run_success(&["patch", "announcements", &id, "--set", "title=Fiesta Mass"]);
    let record = sandbox.get("announcements", &id);
    assert_eq!(record["title"], "Fiesta Mass");
    assert_eq!(record["pinned"], true);
    assert!(record["updated"].is_string());

    let output = sandbox.run(&["delete", "announcements", &id]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--yes"));
    sandbox.get("announcements", &id);

    sandbox.run_success(&["delete", "announcements", &id, "--yes"]);
    let output = sandbox.run(&["get", "announcements", &id]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Record not found"));
}

#[test]
fn test_patch_missing_record_fails() {
    let sandbox = Sandbox::new();
    sandbox.login_admin();

    let output = sandbox.run(&["patch", "priests", "missing", "--set", "name=X"]);
    assert!(!output.status.success());
    assert!(!sandbox.store_path.join("priests").join("missing.json").exists());
}

#[test]
fn test_bulk_delete() {
    let sandbox = Sandbox::new();
    sandbox.login_admin();

    let a = sandbox.create("priests", &["name=Fr. A"]);
    let b = sandbox.create("priests", &["name=Fr. B"]);
    let c = sandbox.create("priests", &["name=Fr. C"]);

    let stdout = sandbox.run_success(&["delete", "priests", &a, &c, "--yes"]);
    assert!(stdout.contains(&format!("priests/{}", a)));
    assert!(stdout.contains(&format!("priests/{}", c)));

    let stdout = sandbox.run_success(&["list", "priests", "--json"]);
    let remaining = json_lines(&stdout);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], json!(b));
}

#[test]
fn test_list_search_and_paging() {
    let sandbox = Sandbox::new();
    sandbox.login_admin();

    for n in 1..=12 {
        let name = format!("name=Priest {}", n);
        let order = format!("order={}", n);
        sandbox.create("priests", &[&name, &order]);
    }

    let stdout = sandbox.run_success(&["list", "priests", "--json"]);
    let first_page = json_lines(&stdout);
    assert_eq!(first_page.len(), 10);
    assert_eq!(first_page[0]["name"], "Priest 12");

    let stdout = sandbox.run_success(&["list", "priests", "--json", "--page", "2"]);
    let second_page = json_lines(&stdout);
    assert_eq!(second_page.len(), 2);
    assert_eq!(second_page[1]["name"], "Priest 1");

    let stdout = sandbox.run_success(&["list", "priests", "--json", "--query", "priest 1"]);
    let names: Vec<_> = json_lines(&stdout)
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Priest 12", "Priest 11", "Priest 10", "Priest 1"]);

    let stdout = sandbox.run_success(&["list", "priests", "--columns", "name,order", "--page-size", "15"]);
    assert!(stdout.contains("Name"));
    assert!(stdout.contains("Priest 7"));

    let output = sandbox.run(&["list", "priests", "--page-size", "12"]);
    assert!(!output.status.success());

    let stdout = sandbox.run_success(&["search", "priests", "order", "3"]);
    let found = json_lines(&stdout);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Priest 3");
}

#[test]
fn test_export_covers_every_record() {
    let sandbox = Sandbox::new();
    sandbox.login_admin();

    for n in 1..=12 {
        let title = format!("title=Notice {}", n);
        sandbox.create("announcements", &[&title]);
    }

    let out_dir = sandbox.dir.path().join("out");
    std::fs::create_dir_all(&out_dir).unwrap();
    let out = out_dir.to_str().unwrap();

    let stdout = sandbox.run_success(&[
        "export",
        "announcements",
        "--out",
        out,
        "--title",
        "Notices",
        "--columns",
        "title",
    ]);
    assert!(stdout.contains("Notices.csv"));

    let csv = std::fs::read_to_string(out_dir.join("Notices.csv")).unwrap();
    let lines: Vec<&str> = csv.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert!(!csv.ends_with("\r\n"));
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], "title");
    assert_eq!(lines[1], "Notice 1");
}

#[test]
fn test_appointment_approval_and_notification() {
    let sandbox = Sandbox::new();
    sandbox.login_admin();

    let first = sandbox.create("baptismAppointment", &["status=pending", "userId=u-1"]);
    let second = sandbox.create("baptismAppointment", &["status=approved", "userId=u-2"]);
    let third = sandbox.create("baptismAppointment", &["status=pending", "userId=u-3"]);

    let stdout = sandbox.run_success(&["approve", "baptismAppointment", &first]);
    assert!(stdout.contains("Approved"));

    assert_eq!(sandbox.get("baptismAppointment", &first)["status"], "approved");
    assert_eq!(sandbox.get("baptismAppointment", &second)["status"], "approved");
    assert_eq!(sandbox.get("baptismAppointment", &third)["status"], "pending");

    let output = sandbox.run(&["approve", "baptismAppointment", &second]);
    assert!(!output.status.success());

    let stdout = sandbox.run_success(&["list", "notification", "--json"]);
    let notifications = json_lines(&stdout);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["userId"], "u-1");
    assert_eq!(notifications[0]["type"], "BaptismAppointment");
    assert_eq!(notifications[0]["message"], "Baptism Appointment has been approved");
    assert_eq!(notifications[0]["fromAdmin"], true);
}

#[test]
fn test_request_form_release() {
    let sandbox = Sandbox::new();
    sandbox.login_admin();

    let id = sandbox.create("weddingRequestForm", &["userId=u-1"]);

    let output = sandbox.run(&["release", "weddingRequestForm", &id, "--to", "Lito"]);
    assert!(!output.status.success());

    sandbox.run_success(&["ready", "weddingRequestForm", &id]);

    let output = sandbox.run(&["release", "weddingRequestForm", &id, "--to", " L "]);
    assert!(!output.status.success());

    sandbox.run_success(&["release", "weddingRequestForm", &id, "--to", "Lito"]);
    let record = sandbox.get("weddingRequestForm", &id);
    assert_eq!(record["status"], "released");
    assert_eq!(record["releasedTo"], "Lito");
    assert!(record["releasedDate"].is_string());
}

#[test]
fn test_members_cannot_approve() {
    let sandbox = Sandbox::new();
    sandbox.login_admin();
    let id = sandbox.create("weddingAppointment", &["status=pending"]);

    sandbox.login("u-1");
    let output = sandbox.run(&["approve", "weddingAppointment", &id]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not allowed"));
    assert_eq!(sandbox.get("weddingAppointment", &id)["status"], "pending");
}

#[test]
fn test_priest_sees_only_own_assignments() {
    let sandbox = Sandbox::new();
    sandbox.login_admin();

    let cruz = sandbox.create("priests", &["name=Fr. Cruz", "authId=u-cruz"]);
    let reyes = sandbox.create("priests", &["name=Fr. Reyes", "authId=u-reyes"]);

    let mine = sandbox.create("massAppointments", &["intention=For Ana"]);
    let theirs = sandbox.create("massAppointments", &["intention=For Ben"]);
    sandbox.run_success(&["assign-priest", "massAppointments", &mine, "--priest", &cruz, "--request"]);
    sandbox.run_success(&["assign-priest", "massAppointments", &theirs, "--priest", &reyes]);

    let stdout = sandbox.run_success(&["list", "massAppointments", "--json"]);
    assert_eq!(json_lines(&stdout).len(), 2);

    let stdout = sandbox.run_success(&["login", "--user-id", "u-cruz"]);
    assert!(stdout.contains(&cruz));

    let stdout = sandbox.run_success(&["list", "massAppointments", "--json"]);
    let visible = json_lines(&stdout);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["id"], json!(mine));
    assert_eq!(visible[0]["priestConfirmationStatus"], "pending");

    let output = sandbox.run(&["confirm-priest", "massAppointments", &theirs]);
    assert!(!output.status.success());

    sandbox.run_success(&["decline-priest", "massAppointments", &mine]);
    let output = sandbox.run(&["list", "massAppointments", "--json"]);
    assert!(output.status.success());
    assert!(json_lines(&String::from_utf8_lossy(&output.stdout)).is_empty());
}
