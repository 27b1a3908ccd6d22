use super::fields::{EditorFields, EditorPresenter};
use super::mode::{EditMode, ModeError};
use super::save::{SaveCoordinator, SaveHost, SaveOutcome, TargetLocation};
use crate::desktop_entry::{self, create_new, CreatePresets, KeyFile, Locale};
use crate::shared::errors::EditorError;
use crate::shared::logging::DialogLog;
use std::path::{Path, PathBuf};

/// Everything the command line decided, fixed for the whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorOptions {
    pub target: String,
    pub create_new: bool,
    pub presets: CreatePresets,
    pub xid: Option<i64>,
    pub locale: Option<Locale>,
    pub log: DialogLog,
}

/// Turns the command-line argument into a location. `file://` URIs are
/// decoded and relative paths are taken relative to `cwd`.
pub fn resolve_target(arg: &str, cwd: &Path) -> TargetLocation {
    let path = match arg.strip_prefix("file://") {
        Some(rest) => {
            let rest = rest.strip_prefix("localhost").unwrap_or(rest);
            let decoded = urlencoding::decode(rest)
                .map(|value| value.into_owned())
                .unwrap_or_else(|_| rest.to_string());
            PathBuf::from(decoded)
        }
        None => PathBuf::from(arg),
    };
    if path.is_absolute() {
        TargetLocation::probe(path)
    } else {
        TargetLocation::probe(cwd.join(path))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResponse {
    Accept,
    Cancel,
}

/// The main editor dialog as handed to the host.
pub struct EditorDialog {
    pub title: String,
    pub accept_label: &'static str,
    pub presenter: EditorPresenter,
}

pub trait EditorHost: SaveHost {
    /// Best effort; returns false when the host cannot honour the hint.
    fn set_transient_for(&mut self, xid: i64) -> bool;

    fn run_editor(&mut self, dialog: &mut EditorDialog) -> Result<DialogResponse, EditorError>;
}

#[derive(Debug)]
pub enum SessionOutcome {
    EditorCancelled,
    Save(SaveOutcome),
}

impl SessionOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            SessionOutcome::EditorCancelled => 0,
            SessionOutcome::Save(outcome) => outcome.exit_code(),
        }
    }
}

pub struct EditingSession {
    options: EditorOptions,
    target: TargetLocation,
    entry: KeyFile,
    mode: EditMode,
    dialog: EditorDialog,
}

impl EditingSession {
    /// Loads (or creates) the entry and classifies it. Any error here is
    /// fatal and happens before a dialog is shown.
    pub fn prepare(options: EditorOptions, cwd: &Path) -> Result<Self, EditorError> {
        let target = resolve_target(&options.target, cwd);
        let entry = if options.create_new {
            options.log.append(
                "info",
                "session.created",
                &format!("new entry for {}", target.path.display()),
            );
            create_new(&options.presets)
        } else {
            let entry = desktop_entry::load(&target.path, &options.target)?;
            options.log.append(
                "info",
                "session.loaded",
                &format!("loaded {}", target.path.display()),
            );
            entry
        };

        let mode = EditMode::detect(&entry).map_err(|err| match err {
            ModeError::Missing => EditorError::MissingType {
                path: options.target.clone(),
            },
            ModeError::Unsupported(value) => EditorError::UnsupportedType { value },
        })?;

        let fields = EditorFields::populate(&entry, mode, options.locale.as_ref());
        let dialog = EditorDialog {
            title: mode.title(options.create_new).to_string(),
            accept_label: EditMode::accept_label(options.create_new),
            presenter: EditorPresenter::new(fields),
        };
        Ok(Self {
            options,
            target,
            entry,
            mode,
            dialog,
        })
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn target(&self) -> &TargetLocation {
        &self.target
    }

    pub fn entry(&self) -> &KeyFile {
        &self.entry
    }

    pub fn dialog(&self) -> &EditorDialog {
        &self.dialog
    }

    pub fn run(mut self, host: &mut dyn EditorHost) -> Result<SessionOutcome, EditorError> {
        if let Some(xid) = self.options.xid.filter(|xid| *xid != 0) {
            if !host.set_transient_for(xid) {
                self.options.log.append(
                    "debug",
                    "session.transient_parent",
                    &format!("transient parent {xid} not supported by this host"),
                );
            }
        }

        if host.run_editor(&mut self.dialog)? == DialogResponse::Cancel {
            self.options
                .log
                .append("info", "session.cancelled", "editor dialog cancelled");
            return Ok(SessionOutcome::EditorCancelled);
        }

        self.dialog
            .presenter
            .fields()
            .apply(&mut self.entry, self.options.locale.as_ref());

        let mut coordinator = SaveCoordinator::new(self.target, self.options.create_new)
            .with_log(self.options.log.clone());
        let outcome = coordinator.save(&self.entry, host)?;
        Ok(SessionOutcome::Save(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::fields::EditorField;
    use crate::editor::save::{FilenamePrompt, SaveFailure};
    use std::fs;

    struct FakeHost {
        response: DialogResponse,
        edits: Vec<(EditorField, &'static str)>,
        transient_requests: Vec<i64>,
        seen_title: Option<String>,
        prompts: usize,
        errors: usize,
    }

    impl FakeHost {
        fn accepting(edits: Vec<(EditorField, &'static str)>) -> Self {
            Self {
                response: DialogResponse::Accept,
                edits,
                transient_requests: Vec::new(),
                seen_title: None,
                prompts: 0,
                errors: 0,
            }
        }
    }

    impl SaveHost for FakeHost {
        fn choose_filename(
            &mut self,
            _prompt: &FilenamePrompt,
        ) -> Result<Option<PathBuf>, EditorError> {
            self.prompts += 1;
            Ok(None)
        }

        fn show_error(&mut self, _failure: &SaveFailure) -> Result<(), EditorError> {
            self.errors += 1;
            Ok(())
        }
    }

    impl EditorHost for FakeHost {
        fn set_transient_for(&mut self, xid: i64) -> bool {
            self.transient_requests.push(xid);
            false
        }

        fn run_editor(&mut self, dialog: &mut EditorDialog) -> Result<DialogResponse, EditorError> {
            self.seen_title = Some(dialog.title.clone());
            for (field, value) in &self.edits {
                dialog.presenter.set_text(*field, *value);
            }
            Ok(self.response)
        }
    }

    fn options(target: &Path) -> EditorOptions {
        EditorOptions {
            target: target.display().to_string(),
            ..EditorOptions::default()
        }
    }

    #[test]
    fn edits_existing_file_and_keeps_unknown_content() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("site.desktop");
        fs::write(
            &path,
            "# mine\n[Desktop Entry]\nType=Link\nName=Site\nURL=https://old.example\nX-Extra=1\n",
        )
        .expect("seed");

        let session = EditingSession::prepare(options(&path), temp.path()).expect("prepare");
        assert_eq!(session.mode(), EditMode::Link);
        assert_eq!(session.dialog().accept_label, "Save");
        let mut host = FakeHost::accepting(vec![(EditorField::Url, "https://new.example")]);

        let outcome = session.run(&mut host).expect("run");

        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(host.seen_title.as_deref(), Some("Edit Link"));
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "# mine\n[Desktop Entry]\nType=Link\nName=Site\nURL=https://new.example\nX-Extra=1\nIcon=\nComment=\n"
        );
    }

    #[test]
    fn cancelling_the_editor_writes_nothing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.desktop");
        let body = "[Desktop Entry]\nType=Application\nName=App\nExec=app\n";
        fs::write(&path, body).expect("seed");

        let session = EditingSession::prepare(options(&path), temp.path()).expect("prepare");
        let mut host = FakeHost::accepting(vec![(EditorField::Name, "Changed")]);
        host.response = DialogResponse::Cancel;

        let outcome = session.run(&mut host).expect("run");

        assert!(matches!(outcome, SessionOutcome::EditorCancelled));
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(fs::read_to_string(&path).expect("read"), body);
    }

    #[test]
    fn load_errors_abort_before_any_dialog() {
        let temp = tempfile::tempdir().expect("tempdir");
        let unknown = temp.path().join("dir.desktop");
        fs::write(&unknown, "[Desktop Entry]\nType=Directory\n").expect("seed");
        let untyped = temp.path().join("untyped.desktop");
        fs::write(&untyped, "[Desktop Entry]\nName=x\n").expect("seed");

        let err = EditingSession::prepare(options(&unknown), temp.path())
            .err()
            .expect("unsupported");
        assert_eq!(err.to_string(), "Unsupported desktop file type \"Directory\"");

        let err = EditingSession::prepare(options(&untyped), temp.path())
            .err()
            .expect("untyped");
        assert!(matches!(err, EditorError::MissingType { .. }));
        assert!(err.is_load_error());
    }

    #[test]
    fn create_mode_applies_presets_and_requests_transient_parent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("tool.desktop");
        let opts = EditorOptions {
            target: "tool.desktop".to_string(),
            create_new: true,
            presets: CreatePresets {
                name: Some("Tool".to_string()),
                command: Some("tool --run".to_string()),
                ..CreatePresets::default()
            },
            xid: Some(42),
            ..EditorOptions::default()
        };

        let session = EditingSession::prepare(opts, temp.path()).expect("prepare");
        assert_eq!(session.target().path, path);
        assert!(session.dialog().presenter.is_complete());
        let mut host = FakeHost::accepting(Vec::new());

        let outcome = session.run(&mut host).expect("run");

        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(host.transient_requests, vec![42]);
        assert_eq!(host.seen_title.as_deref(), Some("Create Launcher"));
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "[Desktop Entry]\nVersion=1.0\nType=Application\nName=Tool\nComment=\nExec=tool --run\nIcon=\nTerminal=false\nStartupNotify=false\n"
        );
    }

    #[test]
    fn create_mode_with_unknown_type_fails_detection() {
        let temp = tempfile::tempdir().expect("tempdir");
        let opts = EditorOptions {
            target: temp.path().display().to_string(),
            create_new: true,
            presets: CreatePresets {
                entry_type: Some("Service".to_string()),
                ..CreatePresets::default()
            },
            ..EditorOptions::default()
        };
        let err = EditingSession::prepare(opts, temp.path()).err().expect("error");
        assert!(matches!(err, EditorError::UnsupportedType { value } if value == "Service"));
    }

    #[test]
    fn resolve_target_handles_uris_and_relative_paths() {
        let temp = tempfile::tempdir().expect("tempdir");
        let spaced = temp.path().join("My Links");
        fs::create_dir(&spaced).expect("mkdir");
        let uri = format!("file://{}/My%20Links", temp.path().display());

        let from_uri = resolve_target(&uri, Path::new("/"));
        assert_eq!(from_uri.path, spaced);
        assert_eq!(from_uri.kind, crate::editor::save::TargetKind::Directory);

        let relative = resolve_target("My Links/new.desktop", temp.path());
        assert_eq!(relative.path, spaced.join("new.desktop"));
        assert_eq!(relative.kind, crate::editor::save::TargetKind::Missing);
    }
}
