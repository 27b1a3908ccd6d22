use super::chooser_dialog::ChooserDialog;
use super::dialog::{run_modal, KeySource};
use super::editor_dialog::EditorDialogView;
use super::prompts::{FilenamePromptDialog, MessageDialog};
use crate::editor::{
    DialogResponse, EditorDialog, EditorHost, FilenamePrompt, SaveFailure, SaveHost,
};
use crate::helpers::{ChooserResponse, HelperRegistry};
use crate::shared::errors::EditorError;
use crate::shared::logging::DialogLog;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io::{self, IsTerminal, Stdout};
use std::path::PathBuf;

pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Raw mode and the alternate screen, restored on drop.
#[derive(Debug)]
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> Result<(Self, Terminal<CrosstermBackend<Stdout>>), EditorError> {
        enable_raw_mode()
            .map_err(|e| EditorError::Terminal(format!("failed to enable raw mode: {e}")))?;
        let guard = Self { _private: () };
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)
            .map_err(|e| EditorError::Terminal(format!("failed to enter dialog screen: {e}")))?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| EditorError::Terminal(format!("failed to create terminal: {e}")))?;
        Ok((guard, terminal))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    }
}

/// Runs every dialog of a session on one terminal.
pub struct TerminalHost<B: Backend, K: KeySource> {
    terminal: Terminal<B>,
    keys: K,
    log: DialogLog,
}

impl<B: Backend, K: KeySource> TerminalHost<B, K> {
    pub fn new(terminal: Terminal<B>, keys: K, log: DialogLog) -> Self {
        Self {
            terminal,
            keys,
            log,
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    pub fn run_chooser(
        &mut self,
        registry: &mut dyn HelperRegistry,
    ) -> Result<ChooserResponse, EditorError> {
        let mut dialog = ChooserDialog::new(registry);
        run_modal(&mut self.terminal, &mut self.keys, &mut dialog)
    }
}

impl<B: Backend, K: KeySource> SaveHost for TerminalHost<B, K> {
    fn choose_filename(&mut self, prompt: &FilenamePrompt) -> Result<Option<PathBuf>, EditorError> {
        let mut dialog = FilenamePromptDialog::new(prompt);
        run_modal(&mut self.terminal, &mut self.keys, &mut dialog)
    }

    fn show_error(&mut self, failure: &SaveFailure) -> Result<(), EditorError> {
        let mut dialog = MessageDialog::error(failure);
        run_modal(&mut self.terminal, &mut self.keys, &mut dialog)
    }
}

impl<B: Backend, K: KeySource> EditorHost for TerminalHost<B, K> {
    fn set_transient_for(&mut self, xid: i64) -> bool {
        self.log.append(
            "debug",
            "tui.transient_parent",
            &format!("ignoring transient parent window {xid}"),
        );
        false
    }

    fn run_editor(&mut self, dialog: &mut EditorDialog) -> Result<DialogResponse, EditorError> {
        let mut view = EditorDialogView::new(dialog);
        run_modal(&mut self.terminal, &mut self.keys, &mut view)
    }
}
