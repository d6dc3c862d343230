use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::{Mock, Server, ServerGuard};
use predicates::prelude::*;

const FOO_JSON: &str = r#"{
    "info": {"name": "foo", "version": "1.1"},
    "releases": {
        "1.0": [{"filename": "foo-1.0.tar.gz", "upload_time": "2024-01-01T00:00:00", "yanked": false}],
        "1.1": [{"filename": "foo-1.1.tar.gz", "upload_time": "2024-03-01T00:00:00", "yanked": false}],
        "1.10": [{"filename": "foo-1.10.tar.gz", "upload_time": "2024-02-01T00:00:00", "yanked": true}],
        "2.0.dev1": [{"filename": "foo-2.0.dev1.tar.gz", "upload_time": "2024-04-01T00:00:00", "yanked": false}]
    }
}"#;

/// A package index with `foo`, `empty` (no releases) and `nope` (unknown).
/// The mocks must stay alive as long as the server is used.
fn index_server() -> (ServerGuard, Vec<Mock>) {
    let mut server = Server::new();
    let foo = server
        .mock("GET", "/pypi/foo/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(FOO_JSON)
        .create();
    let empty = server
        .mock("GET", "/pypi/empty/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"info": {"name": "empty"}, "releases": {}}"#)
        .create();
    let nope = server
        .mock("GET", "/pypi/nope/json")
        .with_status(404)
        .create();
    (server, vec![foo, empty, nope])
}

fn releases_cmd(server: &ServerGuard) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("pip-helpers"));
    cmd.env_remove("PIP_HELPERS_INDEX_URL")
        .env_remove("PIP_HELPERS_PYTHON")
        .arg("--index-url")
        .arg(format!("{}/pypi", server.url()))
        .arg("releases");
    cmd
}

#[test]
fn test_releases_lists_matching_versions() {
    let (server, _mocks) = index_server();

    releases_cmd(&server)
        .arg("foo>=1.0,<2.0")
        .assert()
        .success()
        .stdout("1.0\t2024-01-01T00:00:00\n1.1\t2024-03-01T00:00:00\n");
}

#[test]
fn test_releases_with_prerelease_and_yanked() {
    let (server, _mocks) = index_server();

    releases_cmd(&server)
        .arg("foo")
        .arg("--pre")
        .arg("--include-yanked")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.10\t"))
        .stdout(predicate::str::contains("2.0.dev1\t"));
}

#[test]
fn test_releases_sorted_by_upload_time() {
    let (server, _mocks) = index_server();

    releases_cmd(&server)
        .arg("foo")
        .arg("--include-yanked")
        .arg("--sort")
        .arg("upload-time")
        .assert()
        .success()
        .stdout("1.0\t2024-01-01T00:00:00\n1.10\t2024-02-01T00:00:00\n1.1\t2024-03-01T00:00:00\n");
}

#[test]
fn test_releases_latest_json() {
    let (server, _mocks) = index_server();

    let output = releases_cmd(&server)
        .arg("foo")
        .arg("--latest")
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed[0]["version"], "1.1");
    assert_eq!(parsed[0]["filename"], "foo-1.1.tar.gz");
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[test]
fn test_releases_invalid_descriptor() {
    let (server, _mocks) = index_server();

    releases_cmd(&server)
        .arg("foo<>1.0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid package descriptor"));
}

#[test]
fn test_releases_no_matching_releases() {
    let (server, _mocks) = index_server();

    releases_cmd(&server)
        .arg("foo>=3.0")
        .assert()
        .failure()
        .stderr(predicate::str::contains(">=3.0"))
        .stderr(predicate::str::contains("1.0, 1.1, 2.0.dev1"));
}

#[test]
fn test_releases_no_releases_found() {
    let (server, _mocks) = index_server();

    releases_cmd(&server)
        .arg("empty")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No releases found for package: empty"));
}

#[test]
fn test_releases_unknown_package() {
    let (server, _mocks) = index_server();

    releases_cmd(&server)
        .arg("nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch releases for nope"));
}

#[test]
fn test_index_url_from_environment() {
    let (server, _mocks) = index_server();

    Command::new(cargo::cargo_bin!("pip-helpers"))
        .env("PIP_HELPERS_INDEX_URL", format!("{}/pypi/{{name}}/json", server.url()))
        .arg("releases")
        .arg("foo==1.0")
        .assert()
        .success()
        .stdout("1.0\t2024-01-01T00:00:00\n");
}
