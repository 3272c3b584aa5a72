//! End-to-end tests for the `sico` binary against a mocked license backend.
//!
//! Every test gets its own config file through `SICO_CONFIG`, so nothing
//! touches the user's real configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-session-token";

struct TestEnv {
    _dir: TempDir,
    config_path: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        Self {
            _dir: dir,
            config_path,
        }
    }

    /// Writes a config with a valid session for `admin`.
    fn logged_in(api_url: &str) -> Self {
        let env = Self::new();
        fs::write(
            &env.config_path,
            format!(
                r#"api_url = "{api_url}"

[session]
token = "{TOKEN}"
expires_at = "2099-01-01T00:00:00Z"
user_name = "admin"
can_manage_licenses = true
"#
            ),
        )
        .unwrap();
        env
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_sico"));
        cmd.args(args)
            .env("SICO_CONFIG", &self.config_path)
            .env("NO_COLOR", "1")
            .env_remove("SICO_API_URL")
            .env_remove("SICO_PASSWORD")
            .env_remove("RUST_LOG")
            .stdin(Stdio::null());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().unwrap()
    }

    /// Runs the binary off the async runtime so the mock server keeps serving.
    async fn run_async(&self, args: &[&str]) -> Output {
        let mut cmd = self.command(args);
        tokio::task::spawn_blocking(move || cmd.output().unwrap())
            .await
            .unwrap()
    }

    fn config(&self) -> String {
        fs::read_to_string(&self.config_path).unwrap_or_default()
    }
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

fn stderr_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stderr).unwrap()
}

fn rows() -> Value {
    json!([
        {
            "id": 1,
            "projectName": "Waterworks",
            "releaseDate": "2025-06-30T22:00:00",
            "neuronId": "04A1",
            "password": "PW-1",
            "userName": "admin"
        },
        {
            "id": 2,
            "projectName": "Depot",
            "releaseDate": "2026-03-15",
            "neuronId": "04A2",
            "description": "north cabinet"
        },
        {
            "id": 3,
            "projectName": "Legacy",
            "releaseDate": null,
            "neuronId": "04A3"
        }
    ])
}

async fn mount_projects(server: &MockServer, product: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/projects/{product}")))
        .and(query_param("userName", "admin"))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows()))
        .mount(server)
        .await;
}

fn exit_code(output: &Output) -> i32 {
    output.status.code().unwrap()
}

#[test]
fn test_config_path_uses_env_override() {
    let env = TestEnv::new();
    let output = env.run(&["config", "path"]);

    assert!(output.status.success());
    let printed = String::from_utf8(output.stdout).unwrap();
    assert_eq!(Path::new(printed.trim()), env.config_path);
}

#[test]
fn test_config_set_then_show() {
    let env = TestEnv::new();

    let output = env.run(&["config", "set", "api_url", "https://lic.example.com/"]);
    assert!(output.status.success());

    let output = env.run(&["--json", "config", "show"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["exists"], true);
    assert_eq!(json["api_url"], "https://lic.example.com");
    assert_eq!(json["config"]["api_url"], "https://lic.example.com");
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let env = TestEnv::new();
    let output = env.run(&["--json", "config", "set", "colour", "red"]);

    assert_eq!(exit_code(&output), 5);
    assert_eq!(stderr_json(&output)["error"]["code"], "CONFIG_ERROR");
}

#[test]
fn test_list_without_session_is_auth_error() {
    let env = TestEnv::new();
    let output = env.run(&["--json", "list", "sico1010"]);

    assert_eq!(exit_code(&output), 2);
    let error = stderr_json(&output);
    assert_eq!(error["error"]["code"], "AUTH_ERROR");
    assert!(error["error"]["message"]
        .as_str()
        .unwrap()
        .contains("sico login"));
}

#[test]
fn test_status_without_session() {
    let env = TestEnv::new();
    let output = env.run(&["--json", "status"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["logged_in"], false);
    assert!(json["session"].is_null());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_stores_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "userName": "admin", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": TOKEN,
            "expiresAt": "2099-01-01T00:00:00Z",
            "isAdmin": true,
            "canManageLicenses": true
        })))
        .mount(&server)
        .await;

    let env = TestEnv::new();
    let output = env
        .run_async(&[
            "--api-url",
            &server.uri(),
            "login",
            "--user",
            " admin ",
            "--password",
            "secret",
        ])
        .await;
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(env.config().contains(TOKEN));

    let output = env.run(&["--json", "status"]);
    let json = stdout_json(&output);
    assert_eq!(json["logged_in"], true);
    assert_eq!(json["session"]["user_name"], "admin");
    assert_eq!(json["session"]["is_admin"], true);
    assert!(json["session"].get("token").is_none());

    let output = env.run(&["logout"]);
    assert!(output.status.success());
    assert!(!env.config().contains(TOKEN));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_rejected_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let env = TestEnv::new();
    let output = env
        .run_async(&[
            "--json",
            "--api-url",
            &server.uri(),
            "login",
            "-u",
            "admin",
            "-p",
            "wrong",
        ])
        .await;

    assert_eq!(exit_code(&output), 2);
    assert_eq!(stderr_json(&output)["error"]["code"], "AUTH_ERROR");
    assert!(env.config().is_empty());
}

#[test]
fn test_login_without_terminal_requires_credentials() {
    let env = TestEnv::new();
    let output = env.run(&["--json", "login", "--user", "admin"]);

    assert_eq!(exit_code(&output), 1);
    assert_eq!(stderr_json(&output)["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_json_with_filters() {
    let server = MockServer::start().await;
    mount_projects(&server, "sico2020").await;
    let env = TestEnv::logged_in(&server.uri());

    let output = env.run_async(&["--json", "list", "sico2020"]).await;
    let json = stdout_json(&output);
    assert_eq!(json["product"], "sico2020");
    assert_eq!(json["filter"]["kind"], "empty_query");
    assert_eq!(json["count"], 3);

    let output = env
        .run_async(&["--json", "list", "sico2020", "--filter", "2026"])
        .await;
    let json = stdout_json(&output);
    assert_eq!(json["filter"]["kind"], "year_match");
    assert_eq!(json["filter"]["label"], "year: 2026");
    assert_eq!(json["total"], 3);
    assert_eq!(json["count"], 1);
    assert_eq!(json["anlagen"][0]["neuronId"], "04A2");

    let output = env
        .run_async(&["--json", "list", "sico2020", "--filter", "NORTH"])
        .await;
    let json = stdout_json(&output);
    assert_eq!(json["filter"]["kind"], "free_text");
    assert_eq!(json["count"], 1);

    let output = env
        .run_async(&[
            "--json",
            "list",
            "sico2020",
            "--from",
            "01.01.2025",
            "--to",
            "30.06.2025",
        ])
        .await;
    let json = stdout_json(&output);
    assert_eq!(json["filter"]["kind"], "date_range");
    assert_eq!(json["filter"]["query"], "01.01.2025 - 30.06.2025");
    assert_eq!(json["count"], 1);
    assert_eq!(json["anlagen"][0]["neuronId"], "04A1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_table_output() {
    let server = MockServer::start().await;
    mount_projects(&server, "sico1010").await;
    let env = TestEnv::logged_in(&server.uri());

    let output = env
        .run_async(&["list", "sico1010", "-f", "01.01.2025 - 30.06.2025"])
        .await;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Sico1010: date range: 01.01.2025 to 30.06.2025 (1 of 3)"));
    assert!(stdout.contains("Waterworks"));
    assert!(stdout.contains("30.06.2025"));
    assert!(!stdout.contains("Depot"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_backend_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/sico5000"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;
    let env = TestEnv::logged_in(&server.uri());

    let output = env.run_async(&["--json", "list", "sico5000"]).await;
    assert_eq!(exit_code(&output), 2);
    assert_eq!(stderr_json(&output)["error"]["code"], "API_ERROR");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_network_license() {
    let server = MockServer::start().await;
    mount_projects(&server, "sico6000").await;
    Mock::given(method("POST"))
        .and(path("/api/licenses/sico6000"))
        .and(body_json(json!({
            "neuronId": "04A9",
            "projectName": "Harbour",
            "description": "",
            "version": "4.2",
            "userName": "admin|10.8.0.9|10.0.0.9",
            "isPremium": true,
            "hasLicence": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "password": "PW-9",
            "premiumPassword": "PREM-9",
            "modemPassword": "10.0.0.9|10.8.0.9",
            "isNewLicense": true
        })))
        .mount(&server)
        .await;
    let env = TestEnv::logged_in(&server.uri());

    let output = env
        .run_async(&[
            "--json",
            "create",
            "sico6000",
            "--neuron-id",
            " 04A9 ",
            "--project-name",
            "Harbour",
            "--firmware",
            "4.2",
            "--premium",
            "--wireguard",
            "10.8.0.9",
            "--ip",
            "10.0.0.9",
        ])
        .await;
    let json = stdout_json(&output);
    assert_eq!(json["password"], "PW-9");
    assert_eq!(json["premium_password"], "PREM-9");
    assert_eq!(json["ip_address"], "10.0.0.9");
    assert_eq!(json["wireguard_address"], "10.8.0.9");
    assert_eq!(json["is_new_license"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_regenerates_from_existing_anlage() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/sico2020"))
        .and(query_param("userName", "admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 4,
                "projectName": "Harbour",
                "releaseDate": "2025-06-30T22:00:00",
                "neuronId": "04A9",
                "password": "PW-OLD",
                "modemPassword": "10.0.0.9",
                "hasLicense": true,
                "password3": "10.8.0.9",
                "isPassword3": true,
                "password5": "4.1",
                "description": "pier 3"
            }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/licenses/sico2020"))
        .and(body_json(json!({
            "neuronId": "04A9",
            "projectName": "Harbour",
            "description": "pier 3",
            "version": "4.2",
            "userName": "admin|10.8.0.9|10.0.0.9",
            "isPremium": true,
            "hasLicence": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "password": "PW-NEW",
            "isNewLicense": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    let env = TestEnv::logged_in(&server.uri());

    let output = env
        .run_async(&[
            "--json", "create", "sico2020", "-n", "04A9", "--firmware", "4.2",
        ])
        .await;
    let json = stdout_json(&output);
    assert_eq!(json["password"], "PW-NEW");
    assert_eq!(json["project_name"], "Harbour");
    assert_eq!(json["is_new_license"], false);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_unknown_neuron_id_needs_project_name() {
    let server = MockServer::start().await;
    mount_projects(&server, "sico1010").await;
    let env = TestEnv::logged_in(&server.uri());

    let output = env
        .run_async(&["--json", "create", "sico1010", "-n", "04B7"])
        .await;
    assert_eq!(exit_code(&output), 1);
    let json = stderr_json(&output);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("project name"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_rejects_blank_project_name() {
    let server = MockServer::start().await;
    mount_projects(&server, "sico1010").await;
    let env = TestEnv::logged_in(&server.uri());

    let output = env
        .run_async(&["--json", "create", "sico1010", "-n", "04A1", "-p", "   "])
        .await;
    assert_eq!(exit_code(&output), 1);
    assert_eq!(stderr_json(&output)["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_force() {
    let server = MockServer::start().await;
    mount_projects(&server, "sico5000").await;
    Mock::given(method("POST"))
        .and(path("/api/licenses/sico5000/delete"))
        .and(body_json(json!({ "neuronId": "04A2", "userName": "admin" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "License deleted"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let env = TestEnv::logged_in(&server.uri());

    let output = env
        .run_async(&["--json", "delete", "sico5000", "04A2", "--force"])
        .await;
    let json = stdout_json(&output);
    assert_eq!(json["status"], "deleted");
    assert_eq!(json["project_name"], "Depot");
    assert_eq!(json["message"], "License deleted");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_unknown_neuron_id() {
    let server = MockServer::start().await;
    mount_projects(&server, "sico5000").await;
    let env = TestEnv::logged_in(&server.uri());

    let output = env
        .run_async(&["--json", "delete", "sico5000", "FFFF", "--force"])
        .await;
    assert_eq!(exit_code(&output), 1);
    assert_eq!(stderr_json(&output)["error"]["code"], "NOT_FOUND");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_without_terminal_needs_force() {
    let server = MockServer::start().await;
    mount_projects(&server, "sico5000").await;
    Mock::given(method("POST"))
        .and(path("/api/licenses/sico5000/delete"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let env = TestEnv::logged_in(&server.uri());

    let output = env
        .run_async(&["--json", "delete", "sico5000", "04A1"])
        .await;
    assert_eq!(exit_code(&output), 1);
    assert_eq!(stderr_json(&output)["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_unreachable_backend_is_network_error() {
    let env = TestEnv::logged_in("http://127.0.0.1:1");
    let output = env.run(&["--json", "list", "sico1010"]);

    assert_eq!(exit_code(&output), 3);
    assert_eq!(stderr_json(&output)["error"]["code"], "API_ERROR");
}
