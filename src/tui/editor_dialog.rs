use super::dialog::{is_cancel_key, ModalDialog};
use super::widgets::{
    button_line, centered_rect, dialog_block, display_width, footer, selected_style, tail_for_display,
};
use crate::editor::{fields_for_mode, DialogResponse, EditMode, EditorDialog, EditorField};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::text::Line;
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use std::rc::Rc;

const LABEL_WIDTH: usize = 26;
const EDITOR_HINT_TEXT: &str = "Tab/Up/Down move | Space toggle | Enter or Ctrl+S accept | Esc cancel";

/// Terminal rendition of the launcher/link editor.
pub struct EditorDialogView<'a> {
    dialog: &'a mut EditorDialog,
    focus: usize,
    accept_enabled: Rc<Cell<bool>>,
    status: String,
}

impl<'a> EditorDialogView<'a> {
    pub fn new(dialog: &'a mut EditorDialog) -> Self {
        let accept_enabled = Rc::new(Cell::new(false));
        let observer = Rc::clone(&accept_enabled);
        dialog
            .presenter
            .observe_complete(move |complete| observer.set(complete));
        Self {
            dialog,
            focus: 0,
            accept_enabled,
            status: String::new(),
        }
    }

    pub fn accept_enabled(&self) -> bool {
        self.accept_enabled.get()
    }

    pub fn focused_field(&self) -> EditorField {
        self.rows()[self.focus]
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn rows(&self) -> &'static [EditorField] {
        fields_for_mode(self.dialog.presenter.mode())
    }

    fn move_focus(&mut self, forward: bool) {
        let len = self.rows().len();
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
    }

    fn try_accept(&mut self) -> Option<DialogResponse> {
        if self.accept_enabled() {
            return Some(DialogResponse::Accept);
        }
        self.status = match self.dialog.presenter.mode() {
            EditMode::Application => "Name and command are required".to_string(),
            EditMode::Link => "Name and URL are required".to_string(),
        };
        None
    }

    fn edit_text(&mut self, field: EditorField, edit: impl FnOnce(&mut String)) {
        let mut value = self
            .dialog
            .presenter
            .fields()
            .text(field)
            .unwrap_or_default()
            .to_string();
        edit(&mut value);
        self.dialog.presenter.set_text(field, value);
        self.status.clear();
    }
}

impl ModalDialog for EditorDialogView<'_> {
    type Response = DialogResponse;

    fn cancel_response(&self) -> Self::Response {
        DialogResponse::Cancel
    }

    fn key_pressed(&mut self, key: KeyEvent) -> Option<Self::Response> {
        if is_cancel_key(key) {
            return Some(DialogResponse::Cancel);
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let field = self.focused_field();
        match key.code {
            KeyCode::Char('s') if ctrl => return self.try_accept(),
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Enter | KeyCode::Char(' ') if field.is_toggle() => {
                self.dialog.presenter.toggle(field);
            }
            KeyCode::Enter => return self.try_accept(),
            KeyCode::Backspace if !field.is_toggle() => {
                self.edit_text(field, |value| {
                    value.pop();
                });
            }
            KeyCode::Char(ch) if !ctrl && !field.is_toggle() => {
                self.edit_text(field, |value| value.push(ch));
            }
            _ => {}
        }
        None
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let area = centered_rect(80, 80, frame.area());
        let block = dialog_block(&self.dialog.title);
        frame.render_widget(Clear, area);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let rows = self.rows();
        let mut constraints: Vec<Constraint> = rows.iter().map(|_| Constraint::Length(1)).collect();
        constraints.extend([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(2),
        ]);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let fields = self.dialog.presenter.fields();
        for (idx, field) in rows.iter().enumerate() {
            let style = if idx == self.focus {
                selected_style()
            } else {
                Default::default()
            };
            let chunk = chunks[idx];
            if let Some(flag) = fields.flag(*field) {
                let mark = if flag { "x" } else { " " };
                frame.render_widget(
                    Paragraph::new(format!("[{mark}] {}", field.label())).style(style),
                    chunk,
                );
                continue;
            }
            let label = format!("{:<LABEL_WIDTH$}", format!("{}:", field.label()));
            let width = (chunk.width as usize).saturating_sub(LABEL_WIDTH + 1);
            let value = tail_for_display(fields.text(*field).unwrap_or_default(), width);
            if idx == self.focus {
                frame.set_cursor_position((
                    chunk.x + (LABEL_WIDTH + display_width(&value)) as u16,
                    chunk.y,
                ));
            }
            frame.render_widget(
                Paragraph::new(Line::from(format!("{label}{value}"))).style(style),
                chunk,
            );
        }

        let base = rows.len();
        frame.render_widget(
            Paragraph::new(button_line(
                "Cancel",
                self.dialog.accept_label,
                self.accept_enabled(),
            )),
            chunks[base + 1],
        );
        frame.render_widget(footer(EDITOR_HINT_TEXT, &self.status), chunks[base + 2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{EditorFields, EditorPresenter};

    fn dialog(mode: EditMode) -> EditorDialog {
        EditorDialog {
            title: mode.title(true).to_string(),
            accept_label: EditMode::accept_label(true),
            presenter: EditorPresenter::new(EditorFields::empty(mode)),
        }
    }

    fn press(view: &mut EditorDialogView<'_>, code: KeyCode) -> Option<DialogResponse> {
        view.key_pressed(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(view: &mut EditorDialogView<'_>, text: &str) {
        for ch in text.chars() {
            press(view, KeyCode::Char(ch));
        }
    }

    #[test]
    fn accept_follows_completeness() {
        let mut dialog = dialog(EditMode::Application);
        let mut view = EditorDialogView::new(&mut dialog);
        assert!(!view.accept_enabled());

        type_text(&mut view, "App");
        assert_eq!(press(&mut view, KeyCode::Enter), None);
        assert_eq!(view.status(), "Name and command are required");

        press(&mut view, KeyCode::Tab);
        press(&mut view, KeyCode::Tab);
        assert_eq!(view.focused_field(), EditorField::Command);
        type_text(&mut view, "app");
        assert!(view.accept_enabled());
        press(&mut view, KeyCode::Backspace);
        press(&mut view, KeyCode::Backspace);
        press(&mut view, KeyCode::Backspace);
        assert!(!view.accept_enabled());
    }

    #[test]
    fn toggles_flip_with_space_and_ctrl_s_accepts() {
        let mut dialog = dialog(EditMode::Application);
        {
            let mut view = EditorDialogView::new(&mut dialog);
            type_text(&mut view, "App");
            press(&mut view, KeyCode::Down);
            press(&mut view, KeyCode::Down);
            type_text(&mut view, "app");
            press(&mut view, KeyCode::Up);
            press(&mut view, KeyCode::Up);
            press(&mut view, KeyCode::Up);
            assert_eq!(view.focused_field(), EditorField::StartupNotify);
            press(&mut view, KeyCode::Char(' '));
            let response =
                view.key_pressed(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
            assert_eq!(response, Some(DialogResponse::Accept));
        }
        let fields = dialog.presenter.fields();
        assert!(fields.startup_notify);
        assert!(!fields.terminal);
        assert_eq!(fields.command, "app");
    }

    #[test]
    fn escape_cancels_and_renders_link_rows() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let mut dialog = dialog(EditMode::Link);
        let mut view = EditorDialogView::new(&mut dialog);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
        terminal.draw(|frame| view.draw(frame)).expect("draw");
        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("Create Link"));
        assert!(rendered.contains("URL:"));
        assert!(!rendered.contains("Command:"));
        assert_eq!(press(&mut view, KeyCode::Esc), Some(DialogResponse::Cancel));
    }

    #[test]
    fn cursor_column_counts_wide_characters_twice() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        fn cursor_after(text: &str) -> u16 {
            let mut dialog = dialog(EditMode::Application);
            let mut view = EditorDialogView::new(&mut dialog);
            type_text(&mut view, text);
            let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
            terminal.draw(|frame| view.draw(frame)).expect("draw");
            terminal.get_cursor_position().expect("cursor").x
        }

        assert_eq!(cursor_after("日本"), cursor_after("abcd"));
        assert_eq!(cursor_after("abcd"), cursor_after("ab") + 2);
    }
}
