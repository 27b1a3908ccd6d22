//! Loading, creating and saving `.desktop` files.

pub mod create;
pub mod keyfile;
pub mod locale;

pub use create::{create_new, CreatePresets};
pub use keyfile::{KeyFile, ParseError};
pub use locale::Locale;

use crate::shared::errors::EditorError;
use std::fs;
use std::path::Path;

pub const DESKTOP_GROUP: &str = "Desktop Entry";

pub const KEY_VERSION: &str = "Version";
pub const KEY_TYPE: &str = "Type";
pub const KEY_NAME: &str = "Name";
pub const KEY_COMMENT: &str = "Comment";
pub const KEY_ICON: &str = "Icon";
pub const KEY_EXEC: &str = "Exec";
pub const KEY_TERMINAL: &str = "Terminal";
pub const KEY_STARTUP_NOTIFY: &str = "StartupNotify";
pub const KEY_URL: &str = "URL";

pub const TYPE_APPLICATION: &str = "Application";
pub const TYPE_LINK: &str = "Link";

/// Reads and parses a desktop file. `label` names the file in error messages.
pub fn load(path: &Path, label: &str) -> Result<KeyFile, EditorError> {
    let contents = fs::read(path).map_err(|source| EditorError::Io {
        path: label.to_string(),
        source,
    })?;
    if contents.is_empty() {
        return Err(EditorError::NoData {
            path: label.to_string(),
        });
    }
    KeyFile::from_bytes(&contents).map_err(|source| EditorError::Parse {
        path: label.to_string(),
        source,
    })
}
