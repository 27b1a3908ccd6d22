pub mod fields;
pub mod mode;
pub mod save;
pub mod session;

pub use fields::{fields_for_mode, normalize_icon, EditorField, EditorFields, EditorPresenter};
pub use mode::{EditMode, ModeError};
pub use save::{
    FilenamePrompt, SaveCoordinator, SaveFailure, SaveHost, SaveOutcome, SaveState,
    TargetKind, TargetLocation, DEFAULT_NEW_FILE_NAME,
};
pub use session::{
    resolve_target, DialogResponse, EditingSession, EditorDialog, EditorHost, EditorOptions,
    SessionOutcome,
};
