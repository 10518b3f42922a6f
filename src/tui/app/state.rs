use crate::config::Config;
use crate::pots::{Boards, PlayerId};
use crate::session::{PayoutSheet, SidePotSheet};
use crate::sheet::Sheet;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Payout,
    SidePot,
    Settings,
}

/// Which side-pot panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Rows,
    Pots,
}

/// What the inline editor writes back to on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Cell { row: usize, col: usize },
    BuyInUnit,
    InitialPot,
}

/// One clickable winner box: pot tier, board, player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotCandidate {
    pub pot: usize,
    pub board: usize,
    pub player: PlayerId,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    SwitchSheet,
    RowNext,
    RowPrev,
    ColNext,
    ColPrev,
    EditOpen,
    EditBuyInUnit,
    EditInitialPot,
    EditChar(char),
    EditBackspace,
    EditSubmit,
    EditCancel,
    AddRow,
    RemoveLastRow,
    ToggleDeleteMode,
    DeleteFocusedRow,
    ClearSheet,
    StepBuyInUp,
    StepBuyInDown,
    ToggleSettled,
    AddSuspect,
    TransferNames,
    ToggleBoards,
    TogglePanel,
    ToggleWinner,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub config: Config,
    pub payout: PayoutSheet,
    pub side_pot: SidePotSheet,
    // Focused row and column on the active sheet
    pub row: usize,
    pub col: usize,
    pub focus: Focus,
    pub pot_cursor: usize,
    // Settings being edited
    pub menu_index: usize,
    pub cfg_boards: Boards,
    pub cfg_buy_in: String,
    pub(crate) return_scene: Scene,
    help_open: bool,
    delete_mode: bool,
    edit: Option<(EditTarget, String)>,
    status: Option<String>,
    status_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    const STATUS_TTL: Duration = Duration::from_secs(3);
    const EDIT_MAX_LEN: usize = 24;

    pub fn new(config: Config) -> Self {
        let mut payout = PayoutSheet::new(config.max_rows);
        payout.set_buy_in(config.buy_in_unit.clone());
        let side_pot = SidePotSheet::new(config.max_rows, config.boards);
        Self {
            scene: Scene::Payout,
            cfg_boards: config.boards,
            cfg_buy_in: config.buy_in_unit.clone(),
            config,
            payout,
            side_pot,
            row: 0,
            col: 0,
            focus: Focus::Rows,
            pot_cursor: 0,
            menu_index: 0,
            return_scene: Scene::Payout,
            help_open: false,
            delete_mode: false,
            edit: None,
            status: None,
            status_at: None,
        }
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn delete_mode(&self) -> bool {
        self.delete_mode
    }

    pub fn editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn edit_target(&self) -> Option<EditTarget> {
        self.edit.as_ref().map(|(t, _)| *t)
    }

    pub fn edit_text(&self) -> Option<&str> {
        self.edit.as_ref().map(|(_, buf)| buf.as_str())
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
        self.status_at = Some(Instant::now());
    }

    fn active_sheet(&self) -> &dyn Sheet {
        match self.scene {
            Scene::SidePot => &self.side_pot,
            _ => &self.payout,
        }
    }

    fn active_sheet_mut(&mut self) -> &mut dyn Sheet {
        match self.scene {
            Scene::SidePot => &mut self.side_pot,
            _ => &mut self.payout,
        }
    }

    fn on_sheet(&self) -> bool {
        matches!(self.scene, Scene::Payout | Scene::SidePot)
    }

    /// Editable columns of the active sheet.
    pub fn col_count(&self) -> usize {
        match self.scene {
            Scene::SidePot => 2,
            _ => 3,
        }
    }

    fn clamp_cursor(&mut self) {
        let rows = self.active_sheet().row_count();
        self.row = self.row.min(rows.saturating_sub(1));
        self.col = self.col.min(self.col_count() - 1);
        let candidates = self.pot_candidates().len();
        self.pot_cursor = self.pot_cursor.min(candidates.saturating_sub(1));
    }

    /// Every (pot, board, eligible player) box in display order.
    pub fn pot_candidates(&self) -> Vec<PotCandidate> {
        let boards = self.side_pot.boards().count();
        self.side_pot
            .pots()
            .iter()
            .flat_map(|pot| {
                (0..boards).flat_map(move |board| {
                    pot.eligible.iter().map(move |player| PotCandidate {
                        pot: pot.tier,
                        board,
                        player: player.clone(),
                    })
                })
            })
            .collect()
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                self.help_open = !self.help_open;
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Settings {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Settings {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Settings {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Settings {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => self.scene == Scene::Settings && self.apply_menu(),
            InputAction::MenuCancel => {
                if self.scene == Scene::Settings {
                    self.cancel_menu();
                }
                false
            }
            InputAction::SwitchSheet => self.switch_sheet(),
            InputAction::RowNext => self.move_row(1),
            InputAction::RowPrev => self.move_row(-1),
            InputAction::ColNext => self.move_col(1),
            InputAction::ColPrev => self.move_col(-1),
            InputAction::EditOpen => self.edit_open(),
            InputAction::EditBuyInUnit => {
                self.scene == Scene::Payout && self.begin_edit(EditTarget::BuyInUnit)
            }
            InputAction::EditInitialPot => {
                self.scene == Scene::SidePot && self.begin_edit(EditTarget::InitialPot)
            }
            InputAction::EditChar(c) => self.edit_push(c),
            InputAction::EditBackspace => match self.edit.as_mut() {
                Some((_, buf)) => buf.pop().is_some(),
                None => false,
            },
            InputAction::EditSubmit => self.edit_submit(),
            InputAction::EditCancel => self.edit.take().is_some(),
            InputAction::AddRow => self.add_row(),
            InputAction::RemoveLastRow => self.remove_last_row(),
            InputAction::ToggleDeleteMode => {
                if !self.on_sheet() {
                    return false;
                }
                self.delete_mode = !self.delete_mode;
                true
            }
            InputAction::DeleteFocusedRow => self.delete_focused_row(),
            InputAction::ClearSheet => self.clear_sheet(),
            InputAction::StepBuyInUp => self.step_buy_in(1),
            InputAction::StepBuyInDown => self.step_buy_in(-1),
            InputAction::ToggleSettled => {
                self.scene == Scene::Payout && self.payout.toggle_settled(self.row)
            }
            InputAction::AddSuspect => self.add_suspect(),
            InputAction::TransferNames => self.transfer_names(),
            InputAction::ToggleBoards => self.toggle_boards(),
            InputAction::TogglePanel => {
                if self.scene != Scene::SidePot {
                    return false;
                }
                self.focus = match self.focus {
                    Focus::Rows => Focus::Pots,
                    Focus::Pots => Focus::Rows,
                };
                self.clamp_cursor();
                true
            }
            InputAction::ToggleWinner => self.toggle_winner(),
        }
    }

    fn switch_sheet(&mut self) -> bool {
        self.scene = match self.scene {
            Scene::Payout => Scene::SidePot,
            Scene::SidePot => Scene::Payout,
            Scene::Settings => return false,
        };
        self.edit = None;
        self.delete_mode = false;
        self.focus = Focus::Rows;
        self.clamp_cursor();
        true
    }

    fn move_row(&mut self, delta: isize) -> bool {
        if !self.on_sheet() {
            return false;
        }
        let (len, cursor) = match self.focus {
            Focus::Pots if self.scene == Scene::SidePot => {
                (self.pot_candidates().len(), &mut self.pot_cursor)
            }
            _ => (self.active_sheet().row_count(), &mut self.row),
        };
        if len == 0 {
            return false;
        }
        *cursor = (*cursor as isize + delta).rem_euclid(len as isize) as usize;
        true
    }

    fn move_col(&mut self, delta: isize) -> bool {
        if !self.on_sheet() || self.focus == Focus::Pots {
            return false;
        }
        let n = self.col_count() as isize;
        self.col = (self.col as isize + delta).rem_euclid(n) as usize;
        true
    }

    fn edit_open(&mut self) -> bool {
        if !self.on_sheet() || self.focus == Focus::Pots {
            return false;
        }
        if self.active_sheet().row_count() == 0 {
            return false;
        }
        self.begin_edit(EditTarget::Cell { row: self.row, col: self.col })
    }

    fn begin_edit(&mut self, target: EditTarget) -> bool {
        let current = match target {
            EditTarget::Cell { row, col } => self.cell_text(row, col).map(str::to_string),
            EditTarget::BuyInUnit => Some(self.payout.buy_in().to_string()),
            EditTarget::InitialPot => Some(self.side_pot.initial_pot().to_string()),
        };
        let Some(current) = current else {
            return false;
        };
        self.edit = Some((target, current));
        true
    }

    /// Raw text of a cell on the active sheet.
    pub fn cell_text(&self, row: usize, col: usize) -> Option<&str> {
        match self.scene {
            Scene::SidePot => {
                let r = self.side_pot.rows().get(row)?;
                match col {
                    0 => Some(&r.name),
                    1 => Some(&r.bet),
                    _ => None,
                }
            }
            _ => {
                let r = self.payout.rows().get(row)?;
                match col {
                    0 => Some(&r.name),
                    1 => Some(&r.buy_in),
                    2 => Some(&r.cash_out),
                    _ => None,
                }
            }
        }
    }

    fn edit_push(&mut self, c: char) -> bool {
        let Some((_, buf)) = self.edit.as_mut() else {
            return false;
        };
        if c.is_control() || buf.chars().count() >= Self::EDIT_MAX_LEN {
            return false;
        }
        buf.push(c);
        true
    }

    fn edit_submit(&mut self) -> bool {
        let Some((target, buf)) = self.edit.take() else {
            return false;
        };
        match (target, self.scene) {
            (EditTarget::Cell { row, col }, Scene::Payout) => {
                let ok = match col {
                    0 => self.payout.set_name(row, &buf),
                    1 => self.payout.set_buy_in_at(row, &buf),
                    _ => self.payout.set_cash_out(row, &buf),
                };
                self.payout.recalc();
                ok
            }
            (EditTarget::Cell { row, col }, Scene::SidePot) => match col {
                0 => self.side_pot.set_name(row, &buf),
                _ => self.side_pot.set_bet(row, &buf),
            },
            (EditTarget::BuyInUnit, _) => {
                self.payout.set_buy_in(buf);
                true
            }
            (EditTarget::InitialPot, _) => {
                self.side_pot.set_initial_pot(&buf);
                true
            }
            _ => false,
        }
    }

    fn add_row(&mut self) -> bool {
        if !self.on_sheet() {
            return false;
        }
        match self.active_sheet_mut().add_empty_row() {
            Some(idx) => {
                self.row = idx;
                self.clamp_cursor();
                true
            }
            None => {
                let max = self.active_sheet().max_rows();
                self.set_status(format!("Sheet is full ({max} players)"));
                false
            }
        }
    }

    fn remove_last_row(&mut self) -> bool {
        if !self.on_sheet() {
            return false;
        }
        let removed = self.active_sheet_mut().delete_last_row();
        self.clamp_cursor();
        removed
    }

    fn delete_focused_row(&mut self) -> bool {
        if !self.on_sheet() || !self.delete_mode || self.focus == Focus::Pots {
            return false;
        }
        let row = self.row;
        let removed = self.active_sheet_mut().delete_row(row);
        self.clamp_cursor();
        removed
    }

    fn clear_sheet(&mut self) -> bool {
        if !self.on_sheet() {
            return false;
        }
        self.active_sheet_mut().clear();
        self.edit = None;
        self.delete_mode = false;
        self.row = 0;
        self.pot_cursor = 0;
        info!(scene = ?self.scene, "sheet cleared");
        true
    }

    fn step_buy_in(&mut self, delta: i64) -> bool {
        if self.scene != Scene::Payout {
            return false;
        }
        if self.payout.buy_in().trim().is_empty() {
            self.set_status("Set a buy-in first (B)");
            return false;
        }
        self.payout.step_buy_in(self.row, delta)
    }

    /// Seat the next regular not already on the active sheet.
    fn add_suspect(&mut self) -> bool {
        if !self.on_sheet() {
            return false;
        }
        let next = self
            .active_sheet()
            .available_suspects(&self.config.usual_suspects)
            .first()
            .map(|s| s.to_string());
        let Some(name) = next else {
            if self.config.usual_suspects.is_empty() {
                self.set_status("No regulars configured (usual_suspects in the config file)");
            } else {
                self.set_status("No regulars left to seat");
            }
            return false;
        };
        let added = self.active_sheet_mut().add_player(&name);
        if added {
            self.set_status(format!("Seated {name}"));
        } else {
            self.set_status("Sheet is full");
        }
        self.clamp_cursor();
        added
    }

    fn transfer_names(&mut self) -> bool {
        if self.scene != Scene::Payout {
            return false;
        }
        let names = self.payout.names();
        self.side_pot =
            SidePotSheet::from_names(&names, self.side_pot.boards(), self.config.max_rows);
        info!(players = names.len(), "names sent to side pots");
        self.scene = Scene::SidePot;
        self.row = 0;
        self.col = 1;
        self.focus = Focus::Rows;
        self.pot_cursor = 0;
        self.delete_mode = false;
        true
    }

    fn toggle_boards(&mut self) -> bool {
        if self.scene != Scene::SidePot {
            return false;
        }
        self.side_pot.set_boards(self.side_pot.boards().toggled());
        self.clamp_cursor();
        true
    }

    fn toggle_winner(&mut self) -> bool {
        if self.scene != Scene::SidePot || self.focus != Focus::Pots {
            return false;
        }
        let Some(c) = self.pot_candidates().into_iter().nth(self.pot_cursor) else {
            return false;
        };
        let contested = self.side_pot.pots().get(c.pot).is_some_and(|p| p.eligible.len() > 1);
        if !contested {
            self.set_status(format!("{} is the only contester and wins this pot", c.player));
            return false;
        }
        self.side_pot.toggle_winner(c.pot, c.board, &c.player);
        true
    }

    /// Expire the status line.
    pub fn on_tick(&mut self) {
        if let Some(at) = self.status_at {
            if at.elapsed() >= Self::STATUS_TTL {
                self.status = None;
                self.status_at = None;
            }
        }
    }
}
