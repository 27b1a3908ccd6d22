use crate::desktop_entry::{KeyFile, DESKTOP_GROUP, KEY_TYPE, TYPE_APPLICATION, TYPE_LINK};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Application,
    Link,
}

pub const ALL_EDIT_MODES: [EditMode; 2] = [EditMode::Application, EditMode::Link];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModeError {
    #[error("no type key")]
    Missing,
    #[error("unsupported desktop file type \"{0}\"")]
    Unsupported(String),
}

impl EditMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EditMode::Application => TYPE_APPLICATION,
            EditMode::Link => TYPE_LINK,
        }
    }

    /// Exact, case-sensitive match against the `Type` values we edit.
    pub fn from_type_value(value: &str) -> Option<Self> {
        ALL_EDIT_MODES
            .into_iter()
            .find(|mode| mode.as_str() == value)
    }

    pub fn detect(entry: &KeyFile) -> Result<Self, ModeError> {
        let value = entry
            .string(DESKTOP_GROUP, KEY_TYPE)
            .ok_or(ModeError::Missing)?;
        Self::from_type_value(&value).ok_or(ModeError::Unsupported(value))
    }

    pub fn title(self, create_new: bool) -> &'static str {
        match (self, create_new) {
            (EditMode::Application, true) => "Create Launcher",
            (EditMode::Link, true) => "Create Link",
            (EditMode::Application, false) => "Edit Launcher",
            (EditMode::Link, false) => "Edit Link",
        }
    }

    pub fn accept_label(create_new: bool) -> &'static str {
        if create_new {
            "Create"
        } else {
            "Save"
        }
    }
}
