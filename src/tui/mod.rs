pub mod chooser_dialog;
pub mod dialog;
pub mod editor_dialog;
pub mod host;
pub mod prompts;
pub mod widgets;

pub use chooser_dialog::{ChooserDialog, CHOOSER_TITLE};
pub use dialog::{
    is_cancel_key, run_modal, InputEvent, KeySource, ModalDialog, ScriptedKeys, TerminalKeys,
    SCRIPT_KEYS_ENV,
};
pub use editor_dialog::EditorDialogView;
pub use host::{is_interactive, TerminalGuard, TerminalHost};
pub use prompts::{FilenamePromptDialog, MessageDialog};
