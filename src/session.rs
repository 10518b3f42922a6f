//! Editable sheets for one table session.
//!
//! A sheet owns the rows exactly as typed and hands plain snapshots to the
//! engines on every change. Nothing here knows how it is displayed.

use crate::amount::{format_amount, format_integer, parse_amount};
use crate::payout::{compute_payouts, step_buy_in, PayoutRow, PayoutSummary};
use crate::pots::{
    build_pots, settle, Boards, Contribution, PlayerId, Pot, Settlement, WinnerSelection,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Upper bound on player rows per sheet.
pub const MAX_ROWS: usize = 32;
/// Rows present on a fresh or cleared sheet.
pub const DEFAULT_ROWS: usize = 2;
/// Player id used for a row without a name.
pub const UNNAMED: &str = "(no name)";

/// One player's line on the side-pot sheet, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bet: String,
}

impl BetRow {
    pub fn new(name: impl Into<String>, bet: impl Into<String>) -> Self {
        Self { name: name.into(), bet: bet.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayoutSheet {
    rows: Vec<PayoutRow>,
    buy_in: String,
    max_rows: usize,
}

impl Default for PayoutSheet {
    fn default() -> Self {
        Self::new(MAX_ROWS)
    }
}

impl PayoutSheet {
    pub fn new(max_rows: usize) -> Self {
        let max_rows = max_rows.clamp(1, MAX_ROWS);
        Self {
            rows: vec![PayoutRow::default(); DEFAULT_ROWS.min(max_rows)],
            buy_in: String::new(),
            max_rows,
        }
    }

    /// Sheet restored from saved rows; rows past the cap are dropped.
    pub fn with_rows(rows: Vec<PayoutRow>, buy_in: impl Into<String>, max_rows: usize) -> Self {
        let mut sheet = Self::new(max_rows);
        sheet.rows = rows.into_iter().take(sheet.max_rows).collect();
        sheet.buy_in = buy_in.into();
        sheet
    }

    pub fn rows(&self) -> &[PayoutRow] {
        &self.rows
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Default buy-in used by the stepper and when seating regulars.
    pub fn buy_in(&self) -> &str {
        &self.buy_in
    }

    pub fn set_buy_in(&mut self, raw: impl Into<String>) {
        self.buy_in = raw.into();
    }

    pub fn add_row(&mut self, row: PayoutRow) -> Option<usize> {
        if self.rows.len() >= self.max_rows {
            return None;
        }
        self.rows.push(row);
        Some(self.rows.len() - 1)
    }

    pub fn delete_row(&mut self, idx: usize) -> bool {
        if idx >= self.rows.len() {
            return false;
        }
        self.rows.remove(idx);
        true
    }

    pub fn clear(&mut self) {
        self.rows = vec![PayoutRow::default(); DEFAULT_ROWS.min(self.max_rows)];
    }

    pub fn set_name(&mut self, idx: usize, name: &str) -> bool {
        self.with_row(idx, |r| r.name = name.to_string())
    }

    pub fn set_buy_in_at(&mut self, idx: usize, raw: &str) -> bool {
        self.with_row(idx, |r| r.buy_in = raw.to_string())
    }

    pub fn set_cash_out(&mut self, idx: usize, raw: &str) -> bool {
        self.with_row(idx, |r| r.cash_out = raw.to_string())
    }

    pub fn toggle_settled(&mut self, idx: usize) -> bool {
        self.with_row(idx, |r| r.settled = !r.settled)
    }

    /// Add or remove one buy-in unit on a row. No-op without a unit.
    pub fn step_buy_in(&mut self, idx: usize, delta: i64) -> bool {
        let Some(row) = self.rows.get_mut(idx) else {
            return false;
        };
        match step_buy_in(&row.buy_in, &self.buy_in, delta) {
            Some(next) => {
                row.buy_in = next;
                true
            }
            None => false,
        }
    }

    /// Seat a regular: fill the first unnamed row, or append one.
    pub fn add_player(&mut self, name: &str) -> bool {
        let unit = (!self.buy_in.trim().is_empty()).then(|| parse_amount(&self.buy_in));
        if let Some(row) = self.rows.iter_mut().find(|r| r.name.trim().is_empty()) {
            row.name = name.to_string();
            if let Some(unit) = unit {
                row.buy_in = format_integer(unit);
            }
            return true;
        }
        let buy_in = if unit.is_some() { self.buy_in.clone() } else { String::new() };
        let row = PayoutRow { name: name.to_string(), buy_in, ..PayoutRow::default() };
        self.add_row(row).is_some()
    }

    pub fn names(&self) -> Vec<String> {
        non_empty_names(self.rows.iter().map(|r| r.name.as_str()))
    }

    pub fn summary(&self) -> PayoutSummary {
        compute_payouts(&self.rows)
    }

    /// Compute totals and rewrite negative cash-outs as `0.00`.
    pub fn recalc(&mut self) -> PayoutSummary {
        let summary = self.summary();
        for (row, line) in self.rows.iter_mut().zip(&summary.lines) {
            if line.cash_out_clamped {
                row.cash_out = format_amount(0.0);
            }
        }
        summary
    }

    fn with_row(&mut self, idx: usize, f: impl FnOnce(&mut PayoutRow)) -> bool {
        match self.rows.get_mut(idx) {
            Some(row) => {
                f(row);
                true
            }
            None => false,
        }
    }
}

/// Side-pot sheet: bets, dead money, board count and winner marks.
///
/// Pots and the winner selection are rebuilt after every edit.
#[derive(Debug, Clone, PartialEq)]
pub struct SidePotSheet {
    initial_pot: String,
    rows: Vec<BetRow>,
    boards: Boards,
    max_rows: usize,
    pots: Vec<Pot>,
    selection: WinnerSelection,
}

impl Default for SidePotSheet {
    fn default() -> Self {
        Self::new(MAX_ROWS, Boards::One)
    }
}

impl SidePotSheet {
    pub fn new(max_rows: usize, boards: Boards) -> Self {
        let max_rows = max_rows.clamp(1, MAX_ROWS);
        let mut sheet = Self {
            initial_pot: String::new(),
            rows: vec![BetRow::default(); DEFAULT_ROWS.min(max_rows)],
            boards,
            max_rows,
            pots: Vec::new(),
            selection: WinnerSelection::new(),
        };
        sheet.rebuild();
        sheet
    }

    /// Sheet restored from saved rows; rows past the cap are dropped.
    pub fn with_rows(
        rows: Vec<BetRow>,
        initial_pot: impl Into<String>,
        boards: Boards,
        max_rows: usize,
    ) -> Self {
        let mut sheet = Self::new(max_rows, boards);
        sheet.rows = rows.into_iter().take(sheet.max_rows).collect();
        sheet.initial_pot = initial_pot.into();
        sheet.rebuild();
        sheet
    }

    /// One empty-bet row per name, or the default empty rows when there are
    /// no names.
    pub fn from_names(names: &[String], boards: Boards, max_rows: usize) -> Self {
        if names.is_empty() {
            return Self::new(max_rows, boards);
        }
        let rows = names.iter().map(|n| BetRow::new(n.trim(), "")).collect();
        Self::with_rows(rows, "", boards, max_rows)
    }

    pub fn rows(&self) -> &[BetRow] {
        &self.rows
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    pub fn initial_pot(&self) -> &str {
        &self.initial_pot
    }

    pub fn boards(&self) -> Boards {
        self.boards
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn selection(&self) -> &WinnerSelection {
        &self.selection
    }

    /// Player id for every row, in row order.
    ///
    /// Ids are trimmed names; a blank name becomes [`UNNAMED`] and repeats are
    /// suffixed `#2`, `#3`, ... so each row stays distinct.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        let mut issued: HashSet<String> = HashSet::new();
        self.rows
            .iter()
            .map(|r| {
                let base = match r.name.trim() {
                    "" => UNNAMED,
                    name => name,
                };
                // A typed name may already look like a generated one.
                let mut id = base.to_string();
                let mut n = 1;
                while issued.contains(&id) {
                    n += 1;
                    id = format!("{base} #{n}");
                }
                issued.insert(id.clone());
                PlayerId::new(id)
            })
            .collect()
    }

    pub fn contributions(&self) -> Vec<Contribution> {
        self.player_ids()
            .into_iter()
            .zip(&self.rows)
            .map(|(player, row)| Contribution { player, amount: parse_amount(&row.bet) })
            .collect()
    }

    pub fn settlement(&self) -> Settlement {
        settle(
            &self.contributions(),
            parse_amount(&self.initial_pot),
            &self.selection,
            self.boards,
        )
    }

    pub fn add_row(&mut self, row: BetRow) -> Option<usize> {
        if self.rows.len() >= self.max_rows {
            return None;
        }
        self.rows.push(row);
        self.rebuild();
        Some(self.rows.len() - 1)
    }

    pub fn delete_row(&mut self, idx: usize) -> bool {
        if idx >= self.rows.len() {
            return false;
        }
        self.rows.remove(idx);
        self.rebuild();
        true
    }

    /// Reset to empty rows and no dead money; the board count stays.
    pub fn clear(&mut self) {
        self.rows = vec![BetRow::default(); DEFAULT_ROWS.min(self.max_rows)];
        self.initial_pot.clear();
        self.selection = WinnerSelection::new();
        self.pots.clear();
        self.rebuild();
    }

    pub fn set_name(&mut self, idx: usize, name: &str) -> bool {
        let Some(row) = self.rows.get_mut(idx) else {
            return false;
        };
        row.name = name.to_string();
        self.rebuild();
        true
    }

    pub fn set_bet(&mut self, idx: usize, raw: &str) -> bool {
        let Some(row) = self.rows.get_mut(idx) else {
            return false;
        };
        row.bet = raw.to_string();
        self.rebuild();
        true
    }

    pub fn set_initial_pot(&mut self, raw: &str) {
        self.initial_pot = raw.to_string();
        self.rebuild();
    }

    pub fn set_boards(&mut self, boards: Boards) {
        self.boards = boards;
        self.rebuild();
    }

    /// Seat a regular: fill the first unnamed row, or append one.
    pub fn add_player(&mut self, name: &str) -> bool {
        if let Some(idx) = self.rows.iter().position(|r| r.name.trim().is_empty()) {
            return self.set_name(idx, name);
        }
        self.add_row(BetRow::new(name, "")).is_some()
    }

    pub fn names(&self) -> Vec<String> {
        non_empty_names(self.rows.iter().map(|r| r.name.as_str()))
    }

    /// Flip a winner mark, carrying it to later pots the player is in.
    /// Returns the new state of the toggled mark.
    pub fn toggle_winner(&mut self, pot: usize, board: usize, player: &PlayerId) -> bool {
        if board >= self.boards.count() {
            return false;
        }
        let won = self.selection.toggle(&self.pots, pot, board, player);
        debug!(pot, board, player = %player, won, "winner toggled");
        self.rebuild();
        self.selection.is_winner(pot, board, player)
    }

    // Negative amounts are typing mistakes; show them as zero.
    fn rebuild(&mut self) {
        if parse_amount(&self.initial_pot) < 0.0 {
            self.initial_pot = format_amount(0.0);
        }
        for row in &mut self.rows {
            if parse_amount(&row.bet) < 0.0 {
                row.bet = format_amount(0.0);
            }
        }
        let pots = build_pots(&self.contributions(), parse_amount(&self.initial_pot));
        self.selection = self.selection.carry_over(&self.pots, &pots, self.boards);
        self.pots = pots;
    }
}

fn non_empty_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names.map(str::trim).filter(|n| !n.is_empty()).map(str::to_string).collect()
}
