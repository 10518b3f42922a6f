use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

pub(super) fn draw_menu(f: &mut Frame, app: &AppState) {
    let area = centered_rect(60, 50, f.area());
    let title = format!("pot-split {}", crate::VERSION);
    let block = Block::default().title(title).borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        "Settings:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (i, it) in app.menu_items_display().into_iter().enumerate() {
        let style = if i == app.menu_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(it, style)));
    }
    lines.push(Line::from(""));
    if !app.config.usual_suspects.is_empty() {
        lines.push(Line::from(format!("Regulars: {}", app.config.usual_suspects.join(", "))));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "[Enter] Apply  [Q] Quit  [Esc] Cancel  [↑/↓] Move  [+/-] Adjust",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true }).alignment(Alignment::Center);
    f.render_widget(para, inner(area));
}
