use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;

/// Binary with an isolated config dir and no inherited token.
fn cmd(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("copilot-usage-mcp").unwrap();
    cmd.env_remove("COPILOT_TOKEN")
        .env_remove("COPILOT_USAGE_API_URL")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn usage_payload() -> serde_json::Value {
    json!({
        "copilot_plan": "individual",
        "access_type_sku": "free_limited_copilot",
        "chat_enabled": true,
        "assigned_date": "2025-01-01T12:00:00Z",
        "quota_reset_date": "2025-09-01T00:00:00Z",
        "quota_snapshots": {
            "chat": { "unlimited": false, "remaining": 40, "entitlement": 50, "percent_remaining": 80.0, "overage_permitted": false, "overage_count": 0 },
            "completions": { "unlimited": true, "overage_permitted": false, "overage_count": 0 },
            "premium_interactions": { "unlimited": true, "overage_permitted": false, "overage_count": 0 }
        }
    })
}

#[test]
fn help_lists_subcommands() {
    let home = tempfile::tempdir().unwrap();
    cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("show"));
}

#[test]
fn show_without_token_fails() {
    let home = tempfile::tempdir().unwrap();
    cmd(home.path())
        .args(["show", "--api-url", "http://127.0.0.1:1/never"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Token do GitHub Copilot ausente"));
}

#[test]
fn show_summary_prints_quotas() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/copilot_internal/user")
            .header("authorization", "token cli-token");
        then.status(200).json_body(usage_payload());
    });

    let home = tempfile::tempdir().unwrap();
    cmd(home.path())
        .env("COPILOT_TOKEN", "cli-token")
        .args([
            "show",
            "--view",
            "summary",
            "--api-url",
            &server.url("/copilot_internal/user"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("📊 **Resumo GitHub Copilot** (individual)"))
        .stdout(predicate::str::contains("🗨️ **Chat**: 40/50"))
        .stdout(predicate::str::contains("Interações Premium").not());

    mock.assert();
}

#[test]
fn show_raw_prints_payload_json() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/copilot_internal/user");
        then.status(200).json_body(usage_payload());
    });

    let home = tempfile::tempdir().unwrap();
    let output = cmd(home.path())
        .env("COPILOT_TOKEN", "cli-token")
        .args([
            "show",
            "--view",
            "raw",
            "--api-url",
            &server.url("/copilot_internal/user"),
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed, usage_payload());
}

#[test]
fn show_reports_http_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/copilot_internal/user");
        then.status(401).body(r#"{"message":"Bad credentials"}"#);
    });

    let home = tempfile::tempdir().unwrap();
    cmd(home.path())
        .env("COPILOT_TOKEN", "bad-token")
        .args(["show", "--api-url", &server.url("/copilot_internal/user")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("401 Unauthorized"));
}

#[test]
fn show_reports_unreachable_host() {
    let home = tempfile::tempdir().unwrap();
    cmd(home.path())
        .env("COPILOT_TOKEN", "cli-token")
        .args(["show", "--api-url", "http://127.0.0.1:1/x"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Erro ao obter informações de uso do Copilot: Erro de rede: Não foi possível conectar à API do GitHub.",
        ));
}

#[test]
fn api_url_from_config_file() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/custom");
        then.status(200).json_body(usage_payload());
    });

    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join("copilot-usage-mcp");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        format!("[api]\nurl = \"{}\"\n", server.url("/custom")),
    )
    .unwrap();

    cmd(home.path())
        .env("COPILOT_TOKEN", "cli-token")
        .args(["show", "--view", "formatted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("• Plano: individual"));

    mock.assert();
}
