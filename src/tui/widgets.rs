use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal columns taken by `value`; wide characters count twice.
pub fn display_width(value: &str) -> usize {
    UnicodeWidthStr::width(value)
}

/// Keeps the end of `value` visible in an input `max_width` columns wide.
pub fn tail_for_display(value: &str, max_width: usize) -> String {
    if display_width(value) <= max_width {
        return value.to_string();
    }
    let mut width = 0;
    let mut start = value.len();
    for (idx, ch) in value.char_indices().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        start = idx;
    }
    // Combining marks whose base character was cut go too.
    value[start..]
        .trim_start_matches(|ch: char| UnicodeWidthChar::width(ch) == Some(0))
        .to_string()
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub(crate) fn dialog_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(Line::from(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .padding(Padding::new(2, 2, 1, 1))
}

pub(crate) fn selected_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn footer(hint: &str, status: &str) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(hint.to_string()),
        Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Red),
        )),
    ])
}

/// Renders `[ Cancel ]  [ Accept ]`, greying out the accept button while
/// it cannot be used.
pub fn button_line(cancel: &str, accept: &str, accept_enabled: bool) -> Line<'static> {
    let accept_style = if accept_enabled {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::raw(format!("[ {cancel} ]")),
        Span::raw("  "),
        Span::styled(format!("[ {accept} ]"), accept_style),
    ])
}
