use crate::amount::format_amount;
use crate::pots::Settlement;
use crate::tui::app::{AppState, EditTarget, Focus};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::sheet_chunks;
use super::{balance_span, cell, draw_status, field};

pub(super) fn draw_side_pot(f: &mut Frame, app: &AppState) {
    let [header_area, body_area, status_area] = sheet_chunks(f.area(), 2);
    let sheet = &app.side_pot;
    let settlement = sheet.settlement();

    let header_lines = vec![
        Line::from(vec![
            Span::raw("Dead money: "),
            field(app, EditTarget::InitialPot, sheet.initial_pot(), "0"),
            Span::raw(format!("   Boards: {}", sheet.boards().count())),
        ]),
        Line::from(vec![
            Span::raw(format!(
                "Total: {}   Paid: {}   ",
                format_amount(settlement.total_contributed),
                format_amount(settlement.total_distributed)
            )),
            balance_span(
                settlement.balanced,
                settlement.total_distributed - settlement.total_contributed,
            ),
        ]),
    ];
    let header = Paragraph::new(header_lines)
        .block(Block::default().title("Side Pots").borders(Borders::ALL));
    f.render_widget(header, header_area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body_area);

    let rows: Vec<Row> = sheet
        .rows()
        .iter()
        .zip(&settlement.outcomes)
        .enumerate()
        .map(|(i, (row, outcome))| {
            let net = outcome.net();
            let net_style = if net > 0.0 {
                Style::default().fg(Color::Green)
            } else if net < 0.0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            let marker = if app.delete_mode() && i == app.row { "x" } else { "" };
            Row::new(vec![
                Cell::from(marker),
                cell(app, i, 0, &row.name),
                cell(app, i, 1, &row.bet),
                Cell::from(format_amount(outcome.won)),
                Cell::from(format_amount(net)).style(net_style),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(2),
        Constraint::Percentage(34),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
    ];
    let header_row = Row::new(vec!["", "Name", "Bet", "Won", "Net"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let mut rows_block = Block::default().title("Players").borders(Borders::ALL);
    if app.focus == Focus::Rows {
        rows_block = rows_block.border_style(Style::default().fg(Color::Cyan));
    }
    let table = Table::new(rows, widths).header(header_row).block(rows_block);
    f.render_widget(table, cols[0]);

    let mut pots_block = Block::default().title("Pots").borders(Borders::ALL);
    if app.focus == Focus::Pots {
        pots_block = pots_block.border_style(Style::default().fg(Color::Cyan));
    }
    let pots =
        Paragraph::new(pot_lines(app, &settlement)).block(pots_block).wrap(Wrap { trim: false });
    f.render_widget(pots, cols[1]);

    let info = vec![Line::from(
        "Enter edit • A add • R remove • X delete mode • I dead money • B boards • P pots",
    )];
    draw_status(f, status_area, app, info);
}

// Walks pots in the same order as `AppState::pot_candidates` so the cursor
// index lines up with the rendered boxes.
fn pot_lines(app: &AppState, settlement: &Settlement) -> Vec<Line<'static>> {
    let sheet = &app.side_pot;
    let boards = sheet.boards();
    let selection = sheet.selection();
    let on_pots = app.focus == Focus::Pots;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    let mut idx = 0usize;

    if sheet.pots().is_empty() {
        lines.push(Line::from(Span::styled(
            "Enter bets to build pots.",
            Style::default().add_modifier(Modifier::DIM),
        )));
        return lines;
    }
    for pot in sheet.pots() {
        let mut title = format!("{}  {}", pot.name(), format_amount(pot.size));
        if boards.count() > 1 {
            title.push_str(&format!(" ({} per board)", format_amount(pot.share(boards))));
        }
        lines.push(Line::from(Span::styled(title, bold)));
        for board in 0..boards.count() {
            let mut spans = vec![Span::raw(format!("  Board {}: ", board + 1))];
            for player in &pot.eligible {
                let won = selection.is_winner(pot.tier, board, player);
                let check = if won { "[x]" } else { "[ ]" };
                let mut style =
                    if won { Style::default().fg(Color::Green) } else { Style::default() };
                if on_pots && idx == app.pot_cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(format!("{check} {player}"), style));
                spans.push(Span::raw("  "));
                idx += 1;
            }
            lines.push(Line::from(spans));
        }
    }
    let open = settlement.unsettled().count();
    if open > 0 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{open} pot share(s) still need a winner"),
            Style::default().fg(Color::Yellow),
        )));
    }
    lines
}
