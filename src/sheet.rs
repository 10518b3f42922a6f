// Minimal sheet API boundary. Row-level operations shared by both calculators
// so front ends (TUI, GUI, scripts) can manage rows without caring which
// sheet is active. Implemented for `PayoutSheet` and `SidePotSheet`.

use crate::session::{BetRow, PayoutSheet, SidePotSheet};

pub trait Sheet {
    // Rows
    fn row_count(&self) -> usize;
    fn max_rows(&self) -> usize;
    fn add_empty_row(&mut self) -> Option<usize>;
    fn delete_row(&mut self, idx: usize) -> bool;
    fn clear(&mut self);

    // Names
    fn name(&self, idx: usize) -> Option<&str>;
    fn set_name(&mut self, idx: usize, name: &str) -> bool;
    fn add_player(&mut self, name: &str) -> bool;
    fn names(&self) -> Vec<String>;

    // Totals
    fn is_balanced(&self) -> bool;

    fn is_full(&self) -> bool {
        self.row_count() >= self.max_rows()
    }

    fn delete_last_row(&mut self) -> bool {
        match self.row_count() {
            0 => false,
            n => self.delete_row(n - 1),
        }
    }

    /// Regulars from `suspects` not yet seated at this sheet.
    fn available_suspects<'a>(&self, suspects: &'a [String]) -> Vec<&'a str> {
        let seated = self.names();
        suspects
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && !seated.iter().any(|n| n == s))
            .collect()
    }
}

impl Sheet for PayoutSheet {
    fn row_count(&self) -> usize {
        self.rows().len()
    }
    fn max_rows(&self) -> usize {
        self.max_rows()
    }
    fn add_empty_row(&mut self) -> Option<usize> {
        self.add_row(Default::default())
    }
    fn delete_row(&mut self, idx: usize) -> bool {
        self.delete_row(idx)
    }
    fn clear(&mut self) {
        self.clear()
    }

    fn name(&self, idx: usize) -> Option<&str> {
        self.rows().get(idx).map(|r| r.name.as_str())
    }
    fn set_name(&mut self, idx: usize, name: &str) -> bool {
        self.set_name(idx, name)
    }
    fn add_player(&mut self, name: &str) -> bool {
        self.add_player(name)
    }
    fn names(&self) -> Vec<String> {
        self.names()
    }

    fn is_balanced(&self) -> bool {
        self.summary().balanced
    }
}

impl Sheet for SidePotSheet {
    fn row_count(&self) -> usize {
        self.rows().len()
    }
    fn max_rows(&self) -> usize {
        self.max_rows()
    }
    fn add_empty_row(&mut self) -> Option<usize> {
        self.add_row(BetRow::default())
    }
    fn delete_row(&mut self, idx: usize) -> bool {
        self.delete_row(idx)
    }
    fn clear(&mut self) {
        self.clear()
    }

    fn name(&self, idx: usize) -> Option<&str> {
        self.rows().get(idx).map(|r| r.name.as_str())
    }
    fn set_name(&mut self, idx: usize, name: &str) -> bool {
        self.set_name(idx, name)
    }
    fn add_player(&mut self, name: &str) -> bool {
        self.add_player(name)
    }
    fn names(&self) -> Vec<String> {
        self.names()
    }

    fn is_balanced(&self) -> bool {
        self.settlement().balanced
    }
}
