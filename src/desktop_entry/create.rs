use super::{
    KeyFile, DESKTOP_GROUP, KEY_COMMENT, KEY_EXEC, KEY_ICON, KEY_NAME, KEY_TYPE, KEY_URL,
    KEY_VERSION, TYPE_APPLICATION, TYPE_LINK,
};

pub const DEFAULT_LINK_ICON: &str = "gnome-fs-bookmark";

/// Values offered on the command line for a file that does not exist yet.
/// Empty strings count as "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePresets {
    pub entry_type: Option<String>,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub command: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
}

fn preset<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value.as_deref() {
        Some(value) if !value.is_empty() => value,
        _ => fallback,
    }
}

/// Builds a minimal entry. The type is written as given, so an unknown
/// `--type` is caught by mode detection like any loaded file.
pub fn create_new(presets: &CreatePresets) -> KeyFile {
    let mut file = KeyFile::new();
    let entry_type = preset(&presets.entry_type, TYPE_APPLICATION);
    file.set_value(DESKTOP_GROUP, KEY_VERSION, "1.0");
    file.set_string(DESKTOP_GROUP, KEY_TYPE, entry_type);
    file.set_string(DESKTOP_GROUP, KEY_NAME, preset(&presets.name, ""));
    file.set_string(DESKTOP_GROUP, KEY_COMMENT, preset(&presets.comment, ""));

    if entry_type == TYPE_LINK {
        file.set_string(
            DESKTOP_GROUP,
            KEY_ICON,
            preset(&presets.icon, DEFAULT_LINK_ICON),
        );
        file.set_string(DESKTOP_GROUP, KEY_URL, preset(&presets.url, ""));
    } else {
        file.set_string(DESKTOP_GROUP, KEY_EXEC, preset(&presets.command, ""));
        file.set_string(DESKTOP_GROUP, KEY_ICON, preset(&presets.icon, ""));
    }
    file
}
