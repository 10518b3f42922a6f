mod layout;
mod menu;
mod payout;
mod side_pot;

use crate::tui::app::{AppState, EditTarget, Focus, Scene};
use ratatui::prelude::*;
use ratatui::widgets::*;

use layout::{centered_rect, inner};

pub fn draw(f: &mut Frame, app: &AppState) {
    match app.scene {
        Scene::Settings => menu::draw_menu(f, app),
        Scene::Payout => payout::draw_payout(f, app),
        Scene::SidePot => side_pot::draw_side_pot(f, app),
    }
    if app.help_open() {
        draw_help(f);
    }
}

/// Cell contents with the focus and inline-editor styling applied.
fn cell<'a>(app: &'a AppState, row: usize, col: usize, raw: &'a str) -> Cell<'a> {
    let focused = app.focus == Focus::Rows && row == app.row && col == app.col;
    if app.edit_target() == Some(EditTarget::Cell { row, col }) {
        let text = format!("{}_", app.edit_text().unwrap_or(""));
        return Cell::from(text).style(Style::default().fg(Color::Black).bg(Color::Yellow));
    }
    let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default()
    };
    Cell::from(raw).style(style)
}

/// Value of a one-line field, showing the editor buffer when it is open.
fn field(app: &AppState, target: EditTarget, value: &str, placeholder: &str) -> Span<'static> {
    if app.edit_target() == Some(target) {
        return Span::styled(
            format!("{}_", app.edit_text().unwrap_or("")),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        );
    }
    match value.trim() {
        "" => Span::styled(placeholder.to_string(), Style::default().add_modifier(Modifier::DIM)),
        v => Span::raw(v.to_string()),
    }
}

fn balance_span(balanced: bool, difference: f64) -> Span<'static> {
    if balanced {
        Span::styled("Balanced", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(
            format!("Off by {}", crate::amount::format_amount(difference)),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState, mut info: Vec<Line>) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner(area));
    if app.delete_mode() {
        info.push(Line::from(Span::styled(
            "Delete mode: Enter removes the focused row, Esc leaves",
            Style::default().fg(Color::LightRed),
        )));
    }
    if let Some(msg) = app.status() {
        info.push(Line::from(Span::styled(msg.to_string(), Style::default().fg(Color::Yellow))));
    }
    let keys = vec![Line::from("Tab sheet • M settings"), Line::from("? help • Q quit")];
    f.render_widget(Paragraph::new(info).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(keys).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Both sheets:", bold)),
        Line::from("- Arrows: move focus"),
        Line::from("- Enter: edit cell (Enter saves, Esc cancels)"),
        Line::from("- A: add row • R: remove last row • C: clear"),
        Line::from("- X: delete mode (Enter removes focused row)"),
        Line::from("- U: seat the next regular (usual_suspects in the config file)"),
        Line::from("- Tab: switch sheet"),
        Line::from(""),
        Line::from(Span::styled("Payout:", bold)),
        Line::from("- B: edit buy-in • + / -: step buy-in"),
        Line::from("- S: toggle settled"),
        Line::from("- T: send names to side pots"),
        Line::from(""),
        Line::from(Span::styled("Side pots:", bold)),
        Line::from("- I: edit dead money • B: one / two boards"),
        Line::from("- P: switch between rows and pots"),
        Line::from("- Enter / Space on pots: toggle winner"),
        Line::from(""),
        Line::from(Span::styled("Settings:", bold)),
        Line::from("- M: open / close • Up / Down: move • + / -: adjust"),
        Line::from("- Enter: apply • Esc: cancel"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}
