use super::category::{ChooserPage, HelperCategory, ALL_CHOOSER_PAGES};
use super::registry::HelperRegistry;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const CHOOSER_HINT_TEXT: &str =
    "Tab page | Up/Down select | Left/Right change | F1 help | Esc close";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserAction {
    Close,
    Help,
    NextPage,
    PrevPage,
    FocusPrev,
    FocusNext,
    PreviousHelper,
    NextHelper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserResponse {
    Close,
}

/// Escape and Ctrl+W both close the chooser.
pub fn chooser_action_from_key(key: KeyEvent) -> Option<ChooserAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(ChooserAction::Close),
        KeyCode::Char('w') | KeyCode::Char('W') if ctrl => Some(ChooserAction::Close),
        KeyCode::F(1) | KeyCode::Char('?') => Some(ChooserAction::Help),
        KeyCode::Tab => Some(ChooserAction::NextPage),
        KeyCode::BackTab => Some(ChooserAction::PrevPage),
        KeyCode::Up => Some(ChooserAction::FocusPrev),
        KeyCode::Down => Some(ChooserAction::FocusNext),
        KeyCode::Left => Some(ChooserAction::PreviousHelper),
        KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => Some(ChooserAction::NextHelper),
        _ => None,
    }
}

/// Page, focus and feedback state of the chooser. Selection changes are
/// committed to the registry as soon as they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserModel {
    page_index: usize,
    focus: usize,
    show_help: bool,
    status: String,
}

impl Default for ChooserModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChooserModel {
    pub fn new() -> Self {
        Self {
            page_index: 0,
            focus: 0,
            show_help: false,
            status: String::new(),
        }
    }

    pub fn page(&self) -> ChooserPage {
        ALL_CHOOSER_PAGES[self.page_index]
    }

    pub fn focused_category(&self) -> HelperCategory {
        let categories = self.page().categories();
        categories[self.focus.min(categories.len() - 1)]
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn hint(&self) -> &'static str {
        CHOOSER_HINT_TEXT
    }

    pub fn apply(
        &mut self,
        action: ChooserAction,
        registry: &mut dyn HelperRegistry,
    ) -> Option<ChooserResponse> {
        match action {
            ChooserAction::Close => return Some(ChooserResponse::Close),
            ChooserAction::Help => self.show_help = !self.show_help,
            ChooserAction::NextPage => self.switch_page(1),
            ChooserAction::PrevPage => self.switch_page(ALL_CHOOSER_PAGES.len() - 1),
            ChooserAction::FocusPrev => self.focus = self.focus.saturating_sub(1),
            ChooserAction::FocusNext => {
                let last = self.page().categories().len() - 1;
                self.focus = (self.focus + 1).min(last);
            }
            ChooserAction::PreviousHelper => self.cycle_helper(registry, false),
            ChooserAction::NextHelper => self.cycle_helper(registry, true),
        }
        None
    }

    fn switch_page(&mut self, step: usize) {
        self.page_index = (self.page_index + step) % ALL_CHOOSER_PAGES.len();
        self.focus = 0;
    }

    fn cycle_helper(&mut self, registry: &mut dyn HelperRegistry, forward: bool) {
        let category = self.focused_category();
        let helpers = registry.helpers(category);
        if helpers.is_empty() {
            self.status = format!("No helpers available for {}", category.title());
            return;
        }
        let current = registry
            .default_helper(category)
            .and_then(|helper| helpers.iter().position(|h| h.id == helper.id));
        let len = helpers.len();
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(idx), true) => (idx + 1) % len,
            (Some(idx), false) => (idx + len - 1) % len,
        };
        let helper = &helpers[next];
        self.status = match registry.set_default(category, &helper.id) {
            Ok(()) => format!("{}: {}", category.title(), helper.name),
            Err(err) => err.to_string(),
        };
    }
}
