use crate::shared::errors::EditorError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::Backend;
use ratatui::{Frame, Terminal};
use std::collections::VecDeque;
use std::time::Duration;

pub const SCRIPT_KEYS_ENV: &str = "DESKTOP_DIALOGS_SCRIPT_KEYS";

/// A dialog that runs modally until a key produces a response.
pub trait ModalDialog {
    type Response;

    fn draw(&self, frame: &mut Frame<'_>);

    /// Response used when the dialog is dismissed without a decision.
    fn cancel_response(&self) -> Self::Response;

    fn key_pressed(&mut self, key: KeyEvent) -> Option<Self::Response> {
        is_cancel_key(key).then(|| self.cancel_response())
    }
}

pub fn is_cancel_key(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize,
    /// No more input will arrive.
    End,
}

pub trait KeySource {
    fn next_event(&mut self) -> Result<InputEvent, EditorError>;
}

/// Reads key presses from the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_event(&mut self) -> Result<InputEvent, EditorError> {
        loop {
            if !event::poll(Duration::from_millis(250))
                .map_err(|e| EditorError::Terminal(format!("failed to poll input: {e}")))?
            {
                continue;
            }
            let ev = event::read()
                .map_err(|e| EditorError::Terminal(format!("failed to read input: {e}")))?;
            match ev {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    return Ok(InputEvent::Key(key))
                }
                Event::Resize(_, _) => return Ok(InputEvent::Resize),
                _ => continue,
            }
        }
    }
}

/// Replays a fixed list of keys, then reports the end of input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyEvent>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Parses a comma separated script such as `text:app,tab,ctrl-s`.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut keys = Vec::new();
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if let Some(text) = token.strip_prefix("text:") {
                keys.extend(
                    text.chars()
                        .map(|ch| KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)),
                );
                continue;
            }
            keys.push(parse_key_token(token)?);
        }
        Ok(Self::new(keys))
    }

    pub fn from_env() -> Result<Option<Self>, String> {
        match std::env::var(SCRIPT_KEYS_ENV) {
            Ok(raw) => Self::parse(&raw).map(Some),
            Err(_) => Ok(None),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_event(&mut self) -> Result<InputEvent, EditorError> {
        Ok(self
            .keys
            .pop_front()
            .map(InputEvent::Key)
            .unwrap_or(InputEvent::End))
    }
}

fn parse_key_token(token: &str) -> Result<KeyEvent, String> {
    let normalized = token.to_ascii_lowercase();
    if let Some(rest) = normalized.strip_prefix("ctrl-") {
        let mut chars = rest.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Ok(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
        }
    }
    let code = match normalized.as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "space" => KeyCode::Char(' '),
        "f1" => KeyCode::F(1),
        _ => {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => {
                    return Err(format!(
                        "invalid {SCRIPT_KEYS_ENV} token `{token}`; valid tokens: up,down,left,right,enter,esc,tab,backtab,backspace,space,f1,ctrl-<key>,text:<chars> or a single character"
                    ))
                }
            }
        }
    };
    let modifiers = if code == KeyCode::BackTab {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    Ok(KeyEvent::new(code, modifiers))
}

/// Draws `dialog` and feeds it keys until it responds. Running out of
/// input counts as dismissing the dialog.
pub fn run_modal<B, D>(
    terminal: &mut Terminal<B>,
    keys: &mut dyn KeySource,
    dialog: &mut D,
) -> Result<D::Response, EditorError>
where
    B: Backend,
    D: ModalDialog + ?Sized,
{
    loop {
        terminal
            .draw(|frame| dialog.draw(frame))
            .map_err(|e| EditorError::Terminal(format!("failed to render dialog: {e}")))?;
        match keys.next_event()? {
            InputEvent::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if let Some(response) = dialog.key_pressed(key) {
                    return Ok(response);
                }
            }
            InputEvent::Resize => {}
            InputEvent::End => return Ok(dialog.cancel_response()),
        }
    }
}
