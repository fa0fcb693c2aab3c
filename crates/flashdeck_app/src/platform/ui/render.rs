use flashdeck_core::{AppViewModel, CardView, DisplayMode, Severity};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::keymap::{FocusZone, DECK_HINT, INPUT_HINT};
use super::UiState;

pub const GRID_COLUMNS: usize = 3;
const CARD_HEIGHT: u16 = 7;
const MAX_INPUT_LINES: u16 = 8;

const ACCENT: Color = Color::Cyan;
const HIGHLIGHT: Color = Color::Yellow;
const MUTED: Color = Color::DarkGray;

pub fn render(frame: &mut Frame, view: &AppViewModel, ui: &UiState) {
    let [input_area, status_area, controls_area, deck_area, hint_area] = Layout::vertical([
        Constraint::Length(input_height(view)),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_input(frame, input_area, view, ui);
    render_status(frame, status_area, view);
    render_controls(frame, controls_area, view);
    match view.mode {
        DisplayMode::Grid => render_grid(frame, deck_area, view, ui),
        DisplayMode::Focus => render_focus(frame, deck_area, view),
    }

    let hint = match ui.zone {
        FocusZone::Input => INPUT_HINT,
        FocusZone::Deck => DECK_HINT,
    };
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(MUTED)),
        hint_area,
    );
}

fn input_height(view: &AppViewModel) -> u16 {
    let lines = view.topic.lines().count().max(1) as u16;
    lines.min(MAX_INPUT_LINES) + 2
}

fn render_input(frame: &mut Frame, area: Rect, view: &AppViewModel, ui: &UiState) {
    let focused = ui.zone == FocusZone::Input;
    let title = if view.generate_enabled {
        " Topic, or one \"term: definition\" per line "
    } else {
        " Topic (generating...) "
    };
    let mut text = view.topic.clone();
    if focused {
        text.push('▏');
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { ACCENT } else { MUTED }))
        .title(title);
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_status(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let Some(status) = &view.status else {
        return;
    };
    let color = match status.severity {
        Severity::Info => ACCENT,
        Severity::Error => Color::Red,
    };
    frame.render_widget(
        Paragraph::new(status.text.as_str()).style(Style::default().fg(color)),
        area,
    );
}

fn render_controls(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let mut spans = vec![control_span("Enter", "Generate", view.generate_enabled)];
    if view.controls.show_mode_toggle {
        spans.push(control_span("m", view.mode_toggle_label, true));
    }
    if view.controls.show_shuffle {
        spans.push(control_span("s", "Shuffle", true));
    }
    if view.controls.show_navigation {
        spans.push(control_span("←", "Prev", true));
        spans.push(control_span("→", "Next", true));
    }
    if let Some(counter) = &view.counter_label {
        spans.push(Span::styled(
            format!(" {counter} "),
            Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn control_span(key: &str, label: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(MUTED).add_modifier(Modifier::DIM)
    };
    Span::styled(format!("[{key}] {label}  "), style)
}

fn render_grid(frame: &mut Frame, area: Rect, view: &AppViewModel, ui: &UiState) {
    if view.cards.is_empty() {
        render_empty(frame, area);
        return;
    }

    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = ui.selected / GRID_COLUMNS;
    let first_row = (selected_row + 1).saturating_sub(visible_rows);

    let row_constraints = vec![Constraint::Length(CARD_HEIGHT); visible_rows];
    let rows = Layout::vertical(row_constraints).split(area);
    let column_constraints = vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS];

    for (row_offset, row_area) in rows.iter().enumerate() {
        let start = (first_row + row_offset) * GRID_COLUMNS;
        if start >= view.cards.len() {
            break;
        }
        let cells = Layout::horizontal(column_constraints.clone()).split(*row_area);
        for (column, cell) in cells.iter().enumerate() {
            let index = start + column;
            let Some(card) = view.cards.get(index) else {
                break;
            };
            let highlighted = ui.zone == FocusZone::Deck && index == ui.selected;
            frame.render_widget(card_widget(card, highlighted), *cell);
        }
    }
}

fn render_focus(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let Some(card) = view.active_card() else {
        render_empty(frame, area);
        return;
    };
    let [_, middle, _] = Layout::horizontal([
        Constraint::Percentage(15),
        Constraint::Percentage(70),
        Constraint::Percentage(15),
    ])
    .areas(area);
    let height = (area.height * 2 / 3).max(CARD_HEIGHT).min(area.height);
    let [_, card_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(middle);
    frame.render_widget(card_widget(card, true), card_area);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new("No cards yet. Type a topic and press Enter.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(MUTED)),
        area,
    );
}

fn card_widget(card: &CardView, highlighted: bool) -> Paragraph<'_> {
    let border_color = if card.removing {
        MUTED
    } else if highlighted {
        HIGHLIGHT
    } else {
        ACCENT
    };
    let title = if card.removing {
        " removing... "
    } else if card.flipped {
        " definition "
    } else {
        ""
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(title);

    let lines = if card.flipped {
        vec![Line::from(card.definition.as_str())]
    } else {
        vec![
            Line::from(card.emoji.as_str()),
            Line::from(Span::styled(
                card.term.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ]
    };

    let mut style = Style::default();
    if card.removing {
        style = style.fg(MUTED).add_modifier(Modifier::DIM);
    }

    Paragraph::new(lines)
        .block(block)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}
