use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub portfolio: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let portfolio = tmp.path().join("portfolio.json");
        fs::write(
            &portfolio,
            serde_json::to_string_pretty(&fixture_portfolio()).expect("serialize portfolio"),
        )
        .expect("write portfolio fixture");

        Self {
            _tmp: tmp,
            home,
            portfolio,
        }
    }

    pub fn write_portfolio(&self, portfolio: &Value) {
        fs::write(
            &self.portfolio,
            serde_json::to_string_pretty(portfolio).expect("serialize portfolio"),
        )
        .expect("write portfolio fixture");
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("pacta").expect("binary under test");
        cmd.env("HOME", &self.home)
            .arg("--portfolio")
            .arg(&self.portfolio);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

/// One tenant with an active monthly hosting contract covering Q1 2023 plus
/// a draft consulting contract that has no dates yet. Measurements exist
/// for the first two periods only; the third stays empty on purpose.
pub fn fixture_portfolio() -> Value {
    json!({
        "tenants": [
            {"name": "acme"}
        ],
        "slis": [
            {
                "name": "Priority 1 Time to Fix",
                "description": "Maximum time to fix Priority 1 issues",
                "unit": "hours"
            },
            {
                "name": "Priority 2 Time to Fix",
                "description": "Maximum time to fix Priority 2 issues",
                "unit": "hours"
            }
        ],
        "contracts": [
            {
                "name": "acme-hosting",
                "tenant": "acme",
                "status": "ACTIVE",
                "effective_date": "2023-01-01",
                "expiration_date": "2023-03-31",
                "reporting_frequency": "MONTHLY",
                "slas": [
                    {
                        "id": "mitigation",
                        "name": "Mitigation",
                        "description": "Top-level node for mitigation SLAs"
                    },
                    {
                        "id": "p1",
                        "name": "Priority 1 Remediation",
                        "parent": "mitigation",
                        "binding": {
                            "sli": "Priority 1 Time to Fix",
                            "threshold_type": "MAX",
                            "threshold_value": 1.0
                        }
                    },
                    {
                        "id": "p2",
                        "name": "Priority 2 Remediation",
                        "parent": "mitigation",
                        "binding": {
                            "sli": "Priority 2 Time to Fix",
                            "threshold_type": "MAX",
                            "threshold_value": 24.0
                        }
                    }
                ],
                "measurements": [
                    {
                        "period_start": "2023-01-01",
                        "sli": "Priority 1 Time to Fix",
                        "reported_value": 0.5,
                        "calculated_value": 0.5
                    },
                    {
                        "period_start": "2023-01-01",
                        "sli": "Priority 2 Time to Fix",
                        "reported_value": 24.0,
                        "calculated_value": 24.0
                    },
                    {
                        "period_start": "2023-02-01",
                        "sli": "Priority 1 Time to Fix",
                        "reported_value": 2.0,
                        "calculated_value": 2.0,
                        "is_disputed": true
                    }
                ]
            },
            {
                "name": "acme-consulting",
                "tenant": "acme",
                "status": "DRAFT",
                "reporting_frequency": "QUARTERLY"
            }
        ]
    })
}
