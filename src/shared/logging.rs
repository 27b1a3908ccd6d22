use crate::shared::dirs::XdgDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LOG_PATH_ENV: &str = "DESKTOP_DIALOGS_LOG";

pub fn default_log_path(dirs: &XdgDirs) -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(LOG_PATH_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs.app_state_dir()
        .map(|dir| dir.join("logs").join("dialogs.log"))
}

/// Destination of the JSON-lines log. A disabled log drops every line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogLog {
    path: Option<PathBuf>,
}

impl DialogLog {
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn from_dirs(dirs: &XdgDirs) -> Self {
        Self {
            path: default_log_path(dirs),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Appends one line. Logging never fails the caller.
    pub fn append(&self, level: &str, event: &str, message: &str) {
        if let Some(path) = &self.path {
            append_log_at(path, level, event, message);
        }
    }
}

pub fn append_log_at(path: &Path, level: &str, event: &str, message: &str) {
    let payload = serde_json::json!({
        "timestamp": chrono::Utc::now().timestamp(),
        "level": level,
        "event": event,
        "message": message,
    });

    let Ok(line) = serde_json::to_string(&payload) else {
        return;
    };

    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = writeln!(file, "{line}");
}
