use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn socialseed(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("socialseed").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("ASTRA_DB_API_ENDPOINT")
        .env_remove("ASTRA_DB_APPLICATION_TOKEN")
        .env_remove("ASTRA_DB_KEYSPACE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_configuration_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    socialseed(&dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ASTRA_DB_API_ENDPOINT"))
        .stdout(predicate::str::contains("Connected").not());
}

#[test]
fn missing_token_exits_before_connecting() {
    let dir = tempfile::tempdir().unwrap();
    socialseed(&dir)
        .env("ASTRA_DB_API_ENDPOINT", "http://127.0.0.1:9")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ASTRA_DB_APPLICATION_TOKEN is not set"))
        .stdout(predicate::str::is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_token_sends_no_requests() {
    let server = wiremock::MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    socialseed(&dir)
        .env("ASTRA_DB_API_ENDPOINT", server.uri())
        .assert()
        .code(1);

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "unexpected requests: {requests:?}");
}

#[test]
fn dry_run_needs_no_configuration() {
    let dir = tempfile::tempdir().unwrap();
    socialseed(&dir)
        .args(["--dry-run", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25 messages inserted."))
        .stdout(predicate::str::contains("Total messages: 25"))
        .stdout(predicate::str::contains("Done."));
}

#[test]
fn dry_run_uses_profile_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = std::fs::File::create(dir.path().join("profile.yaml")).unwrap();
    writeln!(file, "users: 2\ntopics: [rust]\ntemplates: [\"Hello\"]").unwrap();

    socialseed(&dir)
        .args(["--dry-run", "--count", "6", "--profile", "profile.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Available topics: rust"))
        .stdout(predicate::str::contains("  - rust: 6 messages"));
}

#[test]
fn invalid_profile_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("profile.yaml"), "topics: []\n").unwrap();

    socialseed(&dir)
        .args(["--dry-run", "--profile", "profile.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one topic"));
}
