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

//! JSON-lines log file. The terminal belongs to the TUI, so nothing is ever
//! written to stdout or stderr from here.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_NAME: &str = "logs.json";
const FALLBACK_LOG_PATH: &str = "/tmp/ecosense_logs.json";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("no writable log location (tried {preferred} and {fallback})")]
    NoWritableFile { preferred: PathBuf, fallback: PathBuf },
    #[error("failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

pub fn log_path() -> PathBuf {
    if let Ok(state) = env::var("XDG_STATE_HOME") {
        return Path::new(&state).join("ecosense").join(LOG_FILE_NAME);
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".local")
            .join("state")
            .join("ecosense")
            .join(LOG_FILE_NAME);
    }
    PathBuf::from(FALLBACK_LOG_PATH)
}

fn open_append(path: &Path) -> Option<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Install the JSON file subscriber. Later calls are no-ops.
///
/// Returns the file actually written to.
pub fn init_logging() -> Result<PathBuf, LoggingError> {
    let preferred = log_path();
    let fallback = PathBuf::from(FALLBACK_LOG_PATH);

    let (path, file) = match open_append(&preferred) {
        Some(f) => (preferred, f),
        None => match open_append(&fallback) {
            Some(f) => (fallback, f),
            None => return Err(LoggingError::NoWritableFile { preferred, fallback }),
        },
    };

    if LOG_GUARD.get().is_some() {
        return Ok(path);
    }

    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer()
        .json()
        .with_current_span(false)
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer);

    tracing::subscriber::set_global_default(tracing_subscriber::registry().with(filter).with(layer))?;
    let _ = LOG_GUARD.set(guard);
    tracing::info!(path = %path.display(), "logging initialized");
    Ok(path)
}
