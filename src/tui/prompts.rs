use super::dialog::{is_cancel_key, ModalDialog};
use super::widgets::{
    centered_rect, dialog_block, display_width, footer, selected_style, tail_for_display,
};
use crate::editor::{FilenamePrompt, SaveFailure};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Wrap};
use ratatui::Frame;
use std::path::{Path, PathBuf};

const ERROR_TITLE: &str = "Error";
const PROMPT_HINT_TEXT: &str = "Tab switch field | Enter save | Esc cancel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptFocus {
    Folder,
    Name,
}

/// Asks where to save. Replacing an existing file needs a second Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenamePromptDialog {
    title: String,
    folder: String,
    name: String,
    focus: PromptFocus,
    pending_overwrite: Option<PathBuf>,
    status: String,
}

impl FilenamePromptDialog {
    pub fn new(prompt: &FilenamePrompt) -> Self {
        Self {
            title: prompt.title.clone(),
            folder: prompt
                .folder
                .as_ref()
                .map(|folder| folder.display().to_string())
                .unwrap_or_default(),
            name: prompt.name.clone().unwrap_or_default(),
            focus: PromptFocus::Name,
            pending_overwrite: None,
            status: String::new(),
        }
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// The path the current input points at. A relative folder (or none)
    /// resolves against the working directory.
    pub fn chosen_path(&self) -> Option<PathBuf> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let name = Path::new(name);
        if name.is_absolute() || self.folder.trim().is_empty() {
            return Some(name.to_path_buf());
        }
        Some(Path::new(self.folder.trim()).join(name))
    }

    fn submit(&mut self) -> Option<Option<PathBuf>> {
        let Some(path) = self.chosen_path() else {
            self.status = "Enter a file name".to_string();
            return None;
        };
        if path.is_dir() {
            self.status = format!("\"{}\" is a folder", path.display());
            return None;
        }
        if path.exists() && self.pending_overwrite.as_ref() != Some(&path) {
            self.status = format!(
                "A file named \"{}\" already exists. Press Enter again to replace it.",
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default()
            );
            self.pending_overwrite = Some(path);
            return None;
        }
        Some(Some(path))
    }

    fn focused_buffer(&mut self) -> &mut String {
        self.pending_overwrite = None;
        self.status.clear();
        match self.focus {
            PromptFocus::Folder => &mut self.folder,
            PromptFocus::Name => &mut self.name,
        }
    }
}

impl ModalDialog for FilenamePromptDialog {
    type Response = Option<PathBuf>;

    fn cancel_response(&self) -> Self::Response {
        None
    }

    fn key_pressed(&mut self, key: KeyEvent) -> Option<Self::Response> {
        if is_cancel_key(key) {
            return Some(None);
        }
        match key.code {
            KeyCode::Enter => return self.submit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    PromptFocus::Folder => PromptFocus::Name,
                    PromptFocus::Name => PromptFocus::Folder,
                };
            }
            KeyCode::Backspace => {
                self.focused_buffer().pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_buffer().push(ch);
            }
            _ => {}
        }
        None
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let area = centered_rect(70, 40, frame.area());
        let block = dialog_block(&self.title);
        frame.render_widget(Clear, area);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(2),
            ])
            .split(inner);

        let inputs = [
            (PromptFocus::Name, "Name:   ", &self.name),
            (PromptFocus::Folder, "Folder: ", &self.folder),
        ];
        for (row, (focus, label, value)) in inputs.into_iter().enumerate() {
            let width = (rows[row].width as usize).saturating_sub(label.len() + 1);
            let display_value = tail_for_display(value, width);
            let style = if focus == self.focus {
                frame.set_cursor_position((
                    rows[row].x + (label.len() + display_width(&display_value)) as u16,
                    rows[row].y,
                ));
                selected_style()
            } else {
                Style::default()
            };
            frame.render_widget(
                Paragraph::new(format!("{label}{display_value}")).style(style),
                rows[row],
            );
        }
        frame.render_widget(footer(PROMPT_HINT_TEXT, &self.status), rows[3]);
    }
}

/// Error report with a bold primary line and a detail line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDialog {
    pub title: String,
    pub primary: String,
    pub secondary: String,
}

impl MessageDialog {
    pub fn error(failure: &SaveFailure) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            primary: failure.primary.clone(),
            secondary: failure.secondary.clone(),
        }
    }
}

impl ModalDialog for MessageDialog {
    type Response = ();

    fn cancel_response(&self) -> Self::Response {}

    fn key_pressed(&mut self, key: KeyEvent) -> Option<Self::Response> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(()),
            _ if is_cancel_key(key) => Some(()),
            _ => None,
        }
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let area = centered_rect(60, 40, frame.area());
        let block = dialog_block(&self.title);
        frame.render_widget(Clear, area);
        frame.render_widget(block.clone(), area);
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                self.primary.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(self.secondary.clone()),
            Line::from(""),
            Line::from("[ Close ]"),
        ])
        .wrap(Wrap { trim: true });
        frame.render_widget(body, block.inner(area));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn prompt(folder: Option<PathBuf>, name: Option<&str>) -> FilenamePrompt {
        FilenamePrompt {
            title: "Choose filename".to_string(),
            folder,
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn prefilled_name_can_be_replaced() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut dialog =
            FilenamePromptDialog::new(&prompt(Some(temp.path().to_path_buf()), Some("new-file.desktop")));
        for _ in 0.."new-file.desktop".len() {
            dialog.key_pressed(key(KeyCode::Backspace));
        }
        for ch in "mine.desktop".chars() {
            dialog.key_pressed(key(KeyCode::Char(ch)));
        }
        assert_eq!(
            dialog.key_pressed(key(KeyCode::Enter)),
            Some(Some(temp.path().join("mine.desktop")))
        );
    }

    #[test]
    fn existing_file_needs_confirmation() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("taken.desktop"), "x").expect("write");
        let mut dialog =
            FilenamePromptDialog::new(&prompt(Some(temp.path().to_path_buf()), Some("taken.desktop")));

        assert_eq!(dialog.key_pressed(key(KeyCode::Enter)), None);
        assert!(dialog.status().contains("already exists"));
        assert_eq!(
            dialog.key_pressed(key(KeyCode::Enter)),
            Some(Some(temp.path().join("taken.desktop")))
        );
    }

    #[test]
    fn empty_name_is_refused_and_escape_cancels() {
        let mut dialog = FilenamePromptDialog::new(&prompt(None, None));
        assert_eq!(dialog.chosen_path(), None);
        assert_eq!(dialog.key_pressed(key(KeyCode::Enter)), None);
        assert_eq!(dialog.status(), "Enter a file name");
        assert_eq!(dialog.key_pressed(key(KeyCode::Esc)), Some(None));
    }

    #[test]
    fn folder_field_is_reachable_with_tab() {
        let mut dialog = FilenamePromptDialog::new(&prompt(None, Some("a.desktop")));
        dialog.key_pressed(key(KeyCode::Tab));
        for ch in "/srv".chars() {
            dialog.key_pressed(key(KeyCode::Char(ch)));
        }
        assert_eq!(dialog.folder(), "/srv");
        assert_eq!(dialog.chosen_path(), Some(PathBuf::from("/srv/a.desktop")));
    }

    #[test]
    fn message_dialog_closes_on_enter() {
        let failure = SaveFailure {
            path: PathBuf::from("/x"),
            primary: "Failed to save \"file:///x\".".to_string(),
            secondary: "Permission denied.".to_string(),
        };
        let mut dialog = MessageDialog::error(&failure);
        assert_eq!(dialog.key_pressed(key(KeyCode::Char('a'))), None);
        assert_eq!(dialog.key_pressed(key(KeyCode::Enter)), Some(()));
    }
}
