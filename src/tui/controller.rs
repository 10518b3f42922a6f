use crate::tui::app::{AppState, Focus, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Map a key to an action. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    if app.editing() {
        let action = match code {
            KeyCode::Esc => InputAction::EditCancel,
            KeyCode::Enter | KeyCode::Tab => InputAction::EditSubmit,
            KeyCode::Backspace => InputAction::EditBackspace,
            KeyCode::Char(c) => InputAction::EditChar(c),
            _ => return false,
        };
        let _ = app.handle_input(action);
        return false;
    }
    if matches!(code, KeyCode::Char('?')) {
        let _ = app.handle_input(InputAction::ToggleHelp);
        return false;
    }
    if app.help_open() {
        if matches!(code, KeyCode::Esc) {
            let _ = app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }

    let action = match app.scene {
        Scene::Settings => match code {
            KeyCode::Up => InputAction::MenuPrev,
            KeyCode::Down => InputAction::MenuNext,
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => InputAction::MenuInc,
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => InputAction::MenuDec,
            KeyCode::Enter => InputAction::MenuApply,
            KeyCode::Esc => InputAction::MenuCancel,
            KeyCode::Char('m') | KeyCode::Char('M') => InputAction::ToggleMenu,
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => return false,
        },
        Scene::Payout | Scene::SidePot => match sheet_action(app, code) {
            Some(action) => action,
            None => return matches!(code, KeyCode::Char('q') | KeyCode::Char('Q')),
        },
    };
    let _ = app.handle_input(action);
    false
}

fn sheet_action(app: &AppState, code: KeyCode) -> Option<InputAction> {
    let on_pots = app.scene == Scene::SidePot && app.focus == Focus::Pots;
    let action = match code {
        KeyCode::Tab => InputAction::SwitchSheet,
        KeyCode::Up => InputAction::RowPrev,
        KeyCode::Down => InputAction::RowNext,
        KeyCode::Left => InputAction::ColPrev,
        KeyCode::Right => InputAction::ColNext,
        KeyCode::Enter | KeyCode::Char(' ') if on_pots => InputAction::ToggleWinner,
        KeyCode::Enter if app.delete_mode() => InputAction::DeleteFocusedRow,
        KeyCode::Enter => InputAction::EditOpen,
        KeyCode::Delete => InputAction::DeleteFocusedRow,
        KeyCode::Esc if app.delete_mode() => InputAction::ToggleDeleteMode,
        KeyCode::Char('m') | KeyCode::Char('M') => InputAction::ToggleMenu,
        KeyCode::Char('a') | KeyCode::Char('A') => InputAction::AddRow,
        KeyCode::Char('r') | KeyCode::Char('R') => InputAction::RemoveLastRow,
        KeyCode::Char('x') | KeyCode::Char('X') => InputAction::ToggleDeleteMode,
        KeyCode::Char('c') | KeyCode::Char('C') => InputAction::ClearSheet,
        KeyCode::Char('u') | KeyCode::Char('U') => InputAction::AddSuspect,
        KeyCode::Char('+') | KeyCode::Char('=') => InputAction::StepBuyInUp,
        KeyCode::Char('-') | KeyCode::Char('_') => InputAction::StepBuyInDown,
        KeyCode::Char('s') | KeyCode::Char('S') => InputAction::ToggleSettled,
        KeyCode::Char('t') | KeyCode::Char('T') => InputAction::TransferNames,
        KeyCode::Char('b') | KeyCode::Char('B') if app.scene == Scene::Payout => {
            InputAction::EditBuyInUnit
        }
        KeyCode::Char('b') | KeyCode::Char('B') => InputAction::ToggleBoards,
        KeyCode::Char('i') | KeyCode::Char('I') => InputAction::EditInitialPot,
        KeyCode::Char('p') | KeyCode::Char('P') => InputAction::TogglePanel,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_goes_to_the_editor_not_the_shortcuts() {
        let mut app = AppState::default();
        handle_key(&mut app, KeyCode::Enter);
        assert!(app.editing());
        for c in "qa".chars() {
            assert!(!handle_key(&mut app, KeyCode::Char(c)));
        }
        handle_key(&mut app, KeyCode::Enter);
        assert_eq!(app.payout.rows()[0].name, "qa");
        assert_eq!(app.payout.rows().len(), 2);
    }

    #[test]
    fn q_quits_from_a_sheet() {
        let mut app = AppState::default();
        assert!(handle_key(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn enter_toggles_winner_on_pot_panel() {
        let mut app = AppState::default();
        handle_key(&mut app, KeyCode::Tab);
        app.side_pot.set_name(0, "A");
        app.side_pot.set_name(1, "B");
        app.side_pot.set_bet(0, "4");
        app.side_pot.set_bet(1, "4");
        handle_key(&mut app, KeyCode::Char('p'));
        handle_key(&mut app, KeyCode::Enter);
        assert!(!app.editing());
        assert_eq!(app.side_pot.selection().len(), 1);
    }
}
