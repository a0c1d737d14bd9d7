mod common;

use common::{fixture_portfolio, TestEnv};
use serde_json::Value;

#[test]
fn periods_generate_tiles_the_contract_lifetime() {
    let env = TestEnv::new();

    let generated = env.run_json(&["periods", "generate", "acme-hosting"]);
    assert_eq!(generated["ok"], true);
    assert_eq!(generated["data"]["created"], 3);

    let list = env.run_json(&["periods", "list", "acme-hosting"]);
    let periods = list["data"].as_array().expect("periods array");
    assert_eq!(periods.len(), 3);
    assert_eq!(periods[0]["start_date"], "2023-01-01");
    assert_eq!(periods[0]["end_date"], "2023-01-31");
    assert_eq!(periods[1]["start_date"], "2023-02-01");
    assert_eq!(periods[1]["end_date"], "2023-02-28");
    assert_eq!(periods[2]["start_date"], "2023-03-01");
    assert_eq!(periods[2]["end_date"], "2023-03-31");
}

#[test]
fn second_generation_is_rejected_with_error_envelope() {
    let env = TestEnv::new();

    let first = env.run_json(&["periods", "generate", "acme-hosting"]);
    assert_eq!(first["ok"], true);

    let err = env.run_json_failure(&["periods", "generate", "acme-hosting"]);
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"]["code"], "DUPLICATE_PERIODS");
    let msg = err["error"]["message"].as_str().unwrap_or("");
    assert!(msg.contains("acme-hosting"));
}

#[test]
fn generation_without_effective_date_is_a_reported_noop() {
    let env = TestEnv::new();

    let out = env.run_json(&["periods", "generate", "acme-consulting"]);
    assert_eq!(out["ok"], true);
    assert_eq!(out["data"]["created"], 0);
    assert_eq!(out["data"]["reason"], "missing_effective_date");

    let list = env.run_json(&["periods", "list", "acme-consulting"]);
    assert_eq!(list["data"].as_array().expect("periods array").len(), 0);
}

#[test]
fn unknown_contract_surfaces_not_found() {
    let env = TestEnv::new();

    let err = env.run_json_failure(&["periods", "generate", "ghost"]);
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"]["code"], "CONTRACT_NOT_FOUND");
}

#[test]
fn end_to_end_quarter_compliance_scenario() {
    let env = TestEnv::new();
    env.run_json(&["periods", "generate", "acme-hosting"]);

    let all = env.run_json(&["report", "generate-all", "acme-hosting"]);
    assert_eq!(all["data"].as_array().expect("report list").len(), 3);

    // January: P1 well under its 1h cap, P2 exactly on its 24h cap.
    let january = env.run_json(&["report", "show", "acme-hosting@2023-01-01"]);
    assert_eq!(january["data"]["total_items"], 2);
    assert_eq!(january["data"]["compliant_items"], 2);
    assert_eq!(january["data"]["compliance_percentage"], 100.0);

    // February: only P1 measured, at twice its cap.
    let february = env.run_json(&["report", "show", "acme-hosting@2023-02-01"]);
    assert_eq!(february["data"]["total_items"], 1);
    assert_eq!(february["data"]["compliant_items"], 0);
    assert_eq!(february["data"]["compliance_percentage"], 0.0);

    // March: no measurements at all, so no items and no percentage.
    let march = env.run_json(&["report", "show", "acme-hosting@2023-03-01"]);
    assert_eq!(march["data"]["total_items"], 0);
    assert!(march["data"]["compliance_percentage"].is_null());
}

#[test]
fn report_tree_attaches_verdicts_under_grouping_node() {
    let env = TestEnv::new();
    env.run_json(&["periods", "generate", "acme-hosting"]);
    env.run_json(&["report", "generate", "acme-hosting@2023-02-01"]);

    let shown = env.run_json(&["report", "show", "acme-hosting@2023-02-01"]);
    let tree = shown["data"]["tree"].as_array().expect("tree array");
    assert_eq!(tree.len(), 1);

    let root = &tree[0];
    assert_eq!(root["id"], "mitigation");
    assert!(root["item"].is_null());
    let children = root["children"].as_array().expect("children array");
    assert_eq!(children.len(), 2);

    let p1 = children.iter().find(|c| c["id"] == "p1").expect("p1 node");
    assert_eq!(p1["item"]["is_compliant"], false);
    assert_eq!(p1["measurement"]["calculated_value"], 2.0);
    assert_eq!(p1["measurement"]["is_disputed"], true);

    let p2 = children.iter().find(|c| c["id"] == "p2").expect("p2 node");
    assert!(p2["item"].is_null());
}

#[test]
fn regeneration_is_idempotent_by_checksum() {
    let env = TestEnv::new();
    env.run_json(&["periods", "generate", "acme-hosting"]);

    let first = env.run_json(&["report", "generate", "acme-hosting@2023-01-01"]);
    let second = env.run_json(&["report", "generate", "acme-hosting@2023-01-01"]);

    assert_eq!(first["data"]["items"], 2);
    assert_eq!(second["data"]["items"], 2);
    assert_eq!(first["data"]["checksum"], second["data"]["checksum"]);
}

#[test]
fn report_show_creates_absent_report_on_demand() {
    let env = TestEnv::new();
    env.run_json(&["periods", "generate", "acme-hosting"]);

    let shown = env.run_json(&["report", "show", "acme-hosting@2023-01-01"]);
    assert_eq!(shown["ok"], true);
    assert_eq!(shown["data"]["total_items"], 2);

    // the generated report is persisted, not recomputed per display
    let status = env.run_json(&["status"]);
    let hosting = status["data"]["contracts"]
        .as_array()
        .expect("contracts array")
        .iter()
        .find(|c| c["name"] == "acme-hosting")
        .expect("hosting summary")
        .clone();
    assert_eq!(hosting["compliance_percentage"], 100.0);
    assert_eq!(hosting["latest_period"]["start_date"], "2023-01-01");
}

#[test]
fn report_for_unknown_period_fails_cleanly() {
    let env = TestEnv::new();
    env.run_json(&["periods", "generate", "acme-hosting"]);

    let err = env.run_json_failure(&["report", "generate", "acme-hosting@2024-01-01"]);
    assert_eq!(err["error"]["code"], "PERIOD_NOT_FOUND");

    let bad_ref = env.run_json_failure(&["report", "generate", "acme-hosting"]);
    assert_eq!(bad_ref["error"]["code"], "BAD_PERIOD_REF");
}

#[test]
fn activation_generates_periods_once_and_flips_status() {
    let env = TestEnv::new();

    let activated = env.run_json(&["contract", "activate", "acme-consulting"]);
    assert_eq!(activated["data"]["status"], "ACTIVE");
    assert_eq!(activated["data"]["periods_created"], 0);

    let status = env.run_json(&["status"]);
    assert_eq!(status["data"]["total_active_contracts"], 2);

    // hosting already carries dates, so activation derives its periods
    let hosting = env.run_json(&["contract", "activate", "acme-hosting"]);
    assert_eq!(hosting["data"]["periods_created"], 3);

    let again = env.run_json(&["contract", "activate", "acme-hosting"]);
    assert_eq!(again["data"]["periods_created"], 0);
}

#[test]
fn horizon_applies_when_no_expiration_date() {
    let env = TestEnv::new();
    let mut portfolio = fixture_portfolio();
    portfolio["contracts"][0]["expiration_date"] = Value::Null;
    env.write_portfolio(&portfolio);

    let mut cmd = env.cmd();
    let out = cmd
        .env("PACTA_TODAY", "2024-06-01")
        .arg("--json")
        .args(["periods", "generate", "acme-hosting"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let generated: Value = serde_json::from_slice(&out).expect("valid json output");

    let periods = generated["data"]["periods"]
        .as_array()
        .expect("periods array");
    assert_eq!(periods.first().unwrap()["start_date"], "2023-01-01");
    // boundary is exactly 365 days past the injected clock
    assert_eq!(periods.last().unwrap()["end_date"], "2025-06-01");
}

#[test]
fn config_file_overrides_generation_horizon() {
    let env = TestEnv::new();
    let mut portfolio = fixture_portfolio();
    portfolio["contracts"][0]["expiration_date"] = Value::Null;
    env.write_portfolio(&portfolio);

    let config_dir = env.home.join(".config/pacta");
    std::fs::create_dir_all(&config_dir).expect("create config dir");
    std::fs::write(
        config_dir.join("config.toml"),
        "[generation]\nhorizon_days = 30\n",
    )
    .expect("write config file");

    let mut cmd = env.cmd();
    let out = cmd
        .env("PACTA_TODAY", "2024-06-01")
        .arg("--json")
        .args(["periods", "generate", "acme-hosting"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let generated: Value = serde_json::from_slice(&out).expect("valid json output");

    let periods = generated["data"]["periods"]
        .as_array()
        .expect("periods array");
    assert_eq!(periods.last().unwrap()["end_date"], "2024-07-01");
}

#[test]
fn validate_flags_cycles_and_dangling_references() {
    let env = TestEnv::new();
    env.run_json(&["periods", "generate", "acme-hosting"]);

    let clean = env.run_json(&["validate"]);
    assert_eq!(clean["ok"], true);
    assert_eq!(clean["data"].as_array().expect("issue list").len(), 0);

    let mut portfolio = fixture_portfolio();
    portfolio["contracts"][0]["slas"][0]["parent"] = Value::String("p1".to_string());
    portfolio["contracts"][0]["measurements"] = serde_json::json!([]);
    env.write_portfolio(&portfolio);

    let broken = env.run_json_failure(&["validate"]);
    assert_eq!(broken["ok"], false);
    let codes: Vec<&str> = broken["data"]
        .as_array()
        .expect("issue list")
        .iter()
        .filter_map(|i| i["code"].as_str())
        .collect();
    assert!(codes.contains(&"sla_cycle"));
}

#[test]
fn unknown_reporting_frequency_is_rejected_at_load() {
    let env = TestEnv::new();
    let mut portfolio = fixture_portfolio();
    portfolio["contracts"][0]["reporting_frequency"] = Value::String("WEEKLY".to_string());
    env.write_portfolio(&portfolio);

    let err = env.run_json_failure(&["contract", "list"]);
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"]["code"], "INTERNAL");
}
