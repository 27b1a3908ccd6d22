use crate::desktop_entry::KeyFile;
use crate::shared::errors::EditorError;
use crate::shared::fs_atomic::atomic_write_file;
use crate::shared::logging::DialogLog;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_NEW_FILE_NAME: &str = "new-file.desktop";
pub const FILENAME_PROMPT_TITLE: &str = "Choose filename";

/// What the target path pointed at when it was resolved. Symlinks are not
/// followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Directory,
    RegularFile,
    Missing,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLocation {
    pub path: PathBuf,
    pub kind: TargetKind,
}

impl TargetLocation {
    pub fn probe(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = match fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_dir() => TargetKind::Directory,
            Ok(meta) if meta.is_file() => TargetKind::RegularFile,
            Ok(_) => TargetKind::Other,
            Err(_) => TargetKind::Missing,
        };
        Self { path, kind }
    }

    /// `file://` URI of the target, used in user-facing messages.
    pub fn uri(&self) -> String {
        file_uri(&self.path)
    }
}

pub fn file_uri(path: &Path) -> String {
    let mut uri = String::from("file://");
    let mut wrote_component = false;
    for component in path.components() {
        match component {
            Component::RootDir => {}
            Component::Normal(part) => {
                uri.push('/');
                uri.push_str(&urlencoding::encode(&part.to_string_lossy()));
                wrote_component = true;
            }
            other => {
                uri.push('/');
                uri.push_str(&other.as_os_str().to_string_lossy());
                wrote_component = true;
            }
        }
    }
    if !wrote_component {
        uri.push('/');
    }
    uri
}

/// Pre-filled values for the filename prompt shown after a failed create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenamePrompt {
    pub title: String,
    pub folder: Option<PathBuf>,
    pub name: Option<String>,
}

impl FilenamePrompt {
    pub fn for_target(target: &TargetLocation) -> Self {
        let (folder, name) = match target.kind {
            TargetKind::Directory => (
                Some(target.path.clone()),
                Some(DEFAULT_NEW_FILE_NAME.to_string()),
            ),
            TargetKind::RegularFile => (
                target.path.parent().map(Path::to_path_buf),
                target
                    .path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned()),
            ),
            TargetKind::Missing | TargetKind::Other => (None, None),
        };
        Self {
            title: FILENAME_PROMPT_TITLE.to_string(),
            folder,
            name,
        }
    }
}

/// Text of the error dialog shown when saving fails for good.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFailure {
    pub path: PathBuf,
    pub primary: String,
    pub secondary: String,
}

impl SaveFailure {
    fn new(target: &TargetLocation, create_new: bool, error: &EditorError) -> Self {
        let reason = match error {
            EditorError::Save { source, .. } => source.to_string(),
            other => other.to_string(),
        };
        let primary = if create_new {
            format!("Failed to create \"{}\".", target.uri())
        } else {
            format!("Failed to save \"{}\".", target.uri())
        };
        Self {
            path: target.path.clone(),
            primary,
            secondary: format!("{reason}."),
        }
    }
}

/// The interactive steps the coordinator may need while saving.
pub trait SaveHost {
    /// Asks for another file name. `None` means the user cancelled.
    fn choose_filename(&mut self, prompt: &FilenamePrompt) -> Result<Option<PathBuf>, EditorError>;

    fn show_error(&mut self, failure: &SaveFailure) -> Result<(), EditorError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Editing,
    Saving,
    SaveFailedPromptForPath,
    Saved,
    Aborted,
}

#[derive(Debug)]
pub enum SaveOutcome {
    Saved { path: PathBuf },
    Cancelled,
    Failed { path: PathBuf, error: EditorError },
}

impl SaveOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            SaveOutcome::Saved { .. } | SaveOutcome::Cancelled => 0,
            SaveOutcome::Failed { .. } => 1,
        }
    }
}

/// Writes the edited entry to its target. Only a create with the original
/// target gets one chance to pick another file name; every other failure
/// is final.
#[derive(Debug)]
pub struct SaveCoordinator {
    target: TargetLocation,
    opened_for_create: bool,
    create_new: bool,
    state: SaveState,
    history: Vec<SaveState>,
    log: DialogLog,
}

impl SaveCoordinator {
    pub fn new(target: TargetLocation, create_new: bool) -> Self {
        Self {
            target,
            opened_for_create: create_new,
            create_new,
            state: SaveState::Editing,
            history: vec![SaveState::Editing],
            log: DialogLog::disabled(),
        }
    }

    pub fn with_log(mut self, log: DialogLog) -> Self {
        self.log = log;
        self
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    /// Every state visited so far, in order.
    pub fn history(&self) -> &[SaveState] {
        &self.history
    }

    pub fn target(&self) -> &TargetLocation {
        &self.target
    }

    pub fn save<H: SaveHost + ?Sized>(
        &mut self,
        entry: &KeyFile,
        host: &mut H,
    ) -> Result<SaveOutcome, EditorError> {
        let data = entry.to_data();
        loop {
            self.transition(SaveState::Saving);
            let error = match atomic_write_file(&self.target.path, data.as_bytes()) {
                Ok(()) => {
                    self.transition(SaveState::Saved);
                    self.log.append(
                        "info",
                        "save.written",
                        &format!("wrote {}", self.target.path.display()),
                    );
                    return Ok(SaveOutcome::Saved {
                        path: self.target.path.clone(),
                    });
                }
                Err(source) => EditorError::Save {
                    path: self.target.path.display().to_string(),
                    source,
                },
            };

            if self.create_new {
                self.log.append("warn", "save.prompt", &error.to_string());
                self.transition(SaveState::SaveFailedPromptForPath);
                let prompt = FilenamePrompt::for_target(&self.target);
                match host.choose_filename(&prompt)? {
                    Some(path) => {
                        self.target = TargetLocation::probe(path);
                        self.create_new = false;
                        continue;
                    }
                    None => {
                        self.transition(SaveState::Aborted);
                        self.log.append("info", "save.cancelled", "filename prompt cancelled");
                        return Ok(SaveOutcome::Cancelled);
                    }
                }
            }

            self.transition(SaveState::Aborted);
            self.log.append("error", "save.failed", &error.to_string());
            let failure = SaveFailure::new(&self.target, self.opened_for_create, &error);
            host.show_error(&failure)?;
            return Ok(SaveOutcome::Failed {
                path: self.target.path.clone(),
                error,
            });
        }
    }

    fn transition(&mut self, next: SaveState) {
        self.state = next;
        self.history.push(next);
    }
}
