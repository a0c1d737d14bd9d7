use crate::domain::models::{ConfigFile, Portfolio};
use std::path::{Path, PathBuf};

/// Load the portfolio file. A missing file is an empty portfolio, so
/// read-only commands work before anything has been recorded.
pub fn load_portfolio(path: &Path) -> anyhow::Result<Portfolio> {
    if !path.exists() {
        return Ok(Portfolio::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write the whole portfolio back in one pass. Report item replacement and
/// period creation become visible atomically with this single write.
pub fn save_portfolio(path: &Path, portfolio: &Portfolio) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, serde_json::to_string_pretty(portfolio)?)?;
    Ok(())
}

fn config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/pacta/config.toml"))
}

pub fn load_config() -> anyhow::Result<ConfigFile> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// Append one event to the audit trail. Best effort: reporting flows must
/// not fail because the log is unavailable.
pub fn audit(action: &str, data: serde_json::Value) {
    let Ok(home) = std::env::var("HOME") else {
        return;
    };
    let path = PathBuf::from(home).join(".config/pacta/audit.jsonl");
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = serde_json::json!({
        "ts": chrono::Utc::now().to_rfc3339(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
}
