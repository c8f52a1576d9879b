/*
 * This file is part of EcoSense.
 *
 * Copyright (C) 2025 EcoSense contributors
 *
 * EcoSense is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * EcoSense is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with EcoSense. If not, see <https://www.gnu.org/licenses/>.
 */

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{default_decision_log, DecisionLogEntry, Mode};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const MIN_TIMEOUT_MS: u64 = 100;
pub const MAX_TIMEOUT_MS: u64 = 120_000;
pub const MAX_DECISION_LOG: usize = 256;
const MAX_DECISION_LEN: usize = 256;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_timeout_ms() -> u64 { DEFAULT_TIMEOUT_MS }
fn default_mode_name() -> String { Mode::Normal.as_str().to_string() }

fn default_modes() -> Vec<String> {
    [Mode::Normal, Mode::Eco, Mode::Weekend, Mode::Peak]
        .iter()
        .map(|m| m.as_str().to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Mode selected at startup; must appear in `modes`.
    #[serde(default = "default_mode_name")]
    pub default_mode: String,
    #[serde(default = "default_modes")]
    pub modes: Vec<String>,
    #[serde(default = "default_decision_log")]
    pub decision_log: Vec<DecisionLogEntry>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_timeout_ms(),
            default_mode: default_mode_name(),
            modes: default_modes(),
            decision_log: default_decision_log(),
        }
    }
}

impl DashboardConfig {
    pub fn default_mode(&self) -> Mode {
        Mode::from(self.default_mode.as_str())
    }

    pub fn modes(&self) -> Vec<Mode> {
        self.modes.iter().map(|m| Mode::from(m.as_str())).collect()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("ecosense").join("config.json");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("ecosense")
            .join("config.json");
    }
    PathBuf::from("/etc/ecosense/config.json")
}

/// Read and validate the file at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(DashboardConfig::default()),
        Err(source) => return Err(ConfigError::Io { path: path.to_path_buf(), source }),
    };
    let cfg: DashboardConfig = serde_json::from_str(&data)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
    validate_config(&cfg)?;
    Ok(cfg)
}

pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(&DashboardConfig::default())
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
    fs::write(path, json).map_err(io_err)
}

fn is_safe_label(s: &str) -> bool {
    if s.is_empty() || s.len() > 64 { return false; }
    s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
}

pub fn validate_config(cfg: &DashboardConfig) -> Result<(), ConfigError> {
    let invalid = |msg: String| Err(ConfigError::Invalid(msg));

    match Url::parse(&cfg.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => return invalid(format!("base_url scheme must be http or https, got '{}'", url.scheme())),
        Err(e) => return invalid(format!("base_url '{}' does not parse: {}", cfg.base_url, e)),
    }

    if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&cfg.request_timeout_ms) {
        return invalid(format!(
            "request_timeout_ms out of range ({}..{})",
            MIN_TIMEOUT_MS, MAX_TIMEOUT_MS
        ));
    }

    if cfg.modes.is_empty() {
        return invalid("at least one mode is required".to_string());
    }
    let mut seen = HashSet::new();
    for (i, m) in cfg.modes.iter().enumerate() {
        if !is_safe_label(m) {
            return invalid(format!("invalid characters or length in mode #{}", i + 1));
        }
        if !seen.insert(m.as_str()) {
            return invalid(format!("duplicate mode '{}'", m));
        }
    }
    if !seen.contains(cfg.default_mode.as_str()) {
        return invalid(format!("default_mode '{}' is not listed in modes", cfg.default_mode));
    }

    if cfg.decision_log.len() > MAX_DECISION_LOG {
        return invalid(format!("too many decision log entries (max {})", MAX_DECISION_LOG));
    }
    for (i, entry) in cfg.decision_log.iter().enumerate() {
        if entry.time.len() > 32 || entry.decision.is_empty() || entry.decision.len() > MAX_DECISION_LEN {
            return invalid(format!("decision log entry #{} has invalid length", i + 1));
        }
    }
    Ok(())
}
