use crate::amount::format_amount;
use crate::tui::app::{AppState, EditTarget};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::sheet_chunks;
use super::{balance_span, cell, draw_status, field};

pub(super) fn draw_payout(f: &mut Frame, app: &AppState) {
    let [header_area, table_area, status_area] = sheet_chunks(f.area(), 2);
    let summary = app.payout.summary();

    let header_lines = vec![
        Line::from(vec![
            Span::raw("Buy-in: "),
            field(app, EditTarget::BuyInUnit, app.payout.buy_in(), "(none)"),
            Span::raw(format!("   Players: {}", app.payout.rows().len())),
        ]),
        Line::from(vec![
            Span::raw(format!(
                "In: {}   Out: {}   ",
                format_amount(summary.total_in),
                format_amount(summary.total_out)
            )),
            balance_span(summary.balanced, summary.total_out - summary.total_in),
        ]),
    ];
    let header = Paragraph::new(header_lines)
        .block(Block::default().title("Payout").borders(Borders::ALL));
    f.render_widget(header, header_area);

    let dim = Style::default().add_modifier(Modifier::DIM);
    let rows: Vec<Row> = app
        .payout
        .rows()
        .iter()
        .zip(&summary.lines)
        .enumerate()
        .map(|(i, (row, line))| {
            let payout_style = if line.payout > 0.0 {
                Style::default().fg(Color::Green)
            } else if line.payout < 0.0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            let marker = if app.delete_mode() && i == app.row { "x" } else { "" };
            let settled = if row.settled { "✓" } else { "" };
            let mut r = Row::new(vec![
                Cell::from(marker),
                cell(app, i, 0, &row.name),
                cell(app, i, 1, &row.buy_in),
                cell(app, i, 2, &row.cash_out),
                Cell::from(format_amount(line.payout)).style(payout_style),
                Cell::from(settled),
            ]);
            if row.settled {
                r = r.style(dim);
            }
            r
        })
        .collect();
    let widths = [
        Constraint::Length(2),
        Constraint::Percentage(30),
        Constraint::Percentage(18),
        Constraint::Percentage(18),
        Constraint::Percentage(18),
        Constraint::Length(7),
    ];
    let header_row = Row::new(vec!["", "Name", "In", "Out", "Payout", "Settled"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let table = Table::new(rows, widths)
        .header(header_row)
        .block(Block::default().title("Players").borders(Borders::ALL));
    f.render_widget(table, table_area);

    let info = vec![Line::from(
        "Enter edit • A add • R remove • X delete mode • +/- buy-in • S settled • T send names",
    )];
    draw_status(f, status_area, app, info);
}
