use assert_cmd::Command;
use tempfile::TempDir;

// Isolated config dir and session flag for every run
fn catalog(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("catalog").unwrap();
    cmd.current_dir(dir.path())
        .env("CATALOG_CONFIG_DIR", dir.path())
        .env(
            "CATALOG_DASHBOARD__SESSION_FILE",
            dir.path().join("session.flag"),
        )
        // Nothing listens here
        .env("CATALOG_DASHBOARD__API_BASE_URL", "http://127.0.0.1:9/api")
        .env_remove("RUST_LOG");
    cmd
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    let output = catalog(&dir).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["login", "logout", "dashboard", "books", "add", "edit", "delete"] {
        assert!(stdout.contains(command), "missing {command}");
    }
}

#[test]
fn books_require_login() {
    let dir = tempfile::tempdir().unwrap();
    let output = catalog(&dir).arg("books").output().unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("not logged in"));
}

#[test]
fn wrong_credentials_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = catalog(&dir)
        .args(["login", "--username", "admin", "--password", "nope"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid credentials"));
    assert!(!dir.path().join("session.flag").exists());
}

#[test]
fn login_fails_when_api_is_down() {
    let dir = tempfile::tempdir().unwrap();
    let output = catalog(&dir)
        .args(["login", "-u", "admin", "-p", "admin"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("cannot reach the catalog API"));
    assert!(!dir.path().join("session.flag").exists());
}

#[test]
fn persisted_flag_opens_the_gate() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("session.flag"), "true").unwrap();

    let output = catalog(&dir).arg("status").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("logged in"));

    // Past the gate, the unreachable API is what fails
    let output = catalog(&dir).arg("dashboard").output().unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("cannot reach the catalog API"));

    let output = catalog(&dir).arg("logout").output().unwrap();
    assert!(output.status.success());
    assert!(!dir.path().join("session.flag").exists());
}
