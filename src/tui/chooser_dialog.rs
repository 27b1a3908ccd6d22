use super::dialog::ModalDialog;
use super::widgets::{centered_rect, dialog_block, footer, selected_style};
use crate::helpers::{
    chooser_action_from_key, ChooserModel, ChooserResponse, HelperRegistry, ALL_CHOOSER_PAGES,
};
use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;

pub const CHOOSER_TITLE: &str = "Preferred Applications";

const HELP_TEXT: &str = "Pick the application used for each task. Changes take effect immediately. \
Use Left and Right to cycle through the installed applications of the selected category.";

/// The preferred-applications dialog over a helper registry.
pub struct ChooserDialog<'a> {
    model: ChooserModel,
    registry: &'a mut dyn HelperRegistry,
}

impl<'a> ChooserDialog<'a> {
    pub fn new(registry: &'a mut dyn HelperRegistry) -> Self {
        Self {
            model: ChooserModel::new(),
            registry,
        }
    }

    pub fn model(&self) -> &ChooserModel {
        &self.model
    }
}

impl ModalDialog for ChooserDialog<'_> {
    type Response = ChooserResponse;

    fn cancel_response(&self) -> Self::Response {
        ChooserResponse::Close
    }

    fn key_pressed(&mut self, key: KeyEvent) -> Option<Self::Response> {
        let action = chooser_action_from_key(key)?;
        self.model.apply(action, &mut *self.registry)
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let area = centered_rect(80, 80, frame.area());
        let block = dialog_block(CHOOSER_TITLE);
        frame.render_widget(Clear, area);
        frame.render_widget(block.clone(), area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(4),
                Constraint::Length(2),
            ])
            .split(block.inner(area));

        let page = self.model.page();
        let selected_tab = ALL_CHOOSER_PAGES
            .iter()
            .position(|candidate| *candidate == page)
            .unwrap_or(0);
        let tabs = Tabs::new(ALL_CHOOSER_PAGES.iter().map(|page| page.title()))
            .select(selected_tab)
            .highlight_style(selected_style());
        frame.render_widget(tabs, chunks[0]);

        let mut lines = Vec::new();
        for category in page.categories() {
            let focused = category == self.model.focused_category();
            let title_style = if focused {
                selected_style()
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(Span::styled(category.title(), title_style)));
            lines.push(Line::from(category.description()));
            let current = self
                .registry
                .default_helper(category)
                .map(|helper| helper.name)
                .unwrap_or_else(|| "No application selected".to_string());
            lines.push(Line::from(Span::styled(
                format!("  < {current} >"),
                Style::default().fg(Color::Green),
            )));
            lines.push(Line::from(""));
        }
        if self.model.show_help() {
            lines.push(Line::from(Span::styled(
                HELP_TEXT,
                Style::default().fg(Color::Cyan),
            )));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[1]);
        frame.render_widget(footer(self.model.hint(), self.model.status()), chunks[2]);
    }
}
