use super::{Boards, PlayerId, Pot};
use std::collections::BTreeSet;
use tracing::trace;

/// One (pot, board, player) triple marked as a winner.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WinnerMark {
    pub pot: usize,
    pub board: usize,
    pub player: PlayerId,
}

/// Sparse set of winner marks over a list of pots.
///
/// Callers only mark players that are eligible for the pot in question; the
/// selection does not check this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinnerSelection {
    marks: BTreeSet<WinnerMark>,
}

impl WinnerSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn marks(&self) -> impl Iterator<Item = &WinnerMark> {
        self.marks.iter()
    }

    pub fn is_winner(&self, pot: usize, board: usize, player: &PlayerId) -> bool {
        self.marks.contains(&WinnerMark { pot, board, player: player.clone() })
    }

    /// Set or clear a single mark without touching any other pot.
    pub fn set(&mut self, pot: usize, board: usize, player: &PlayerId, won: bool) {
        let mark = WinnerMark { pot, board, player: player.clone() };
        if won {
            self.marks.insert(mark);
        } else {
            self.marks.remove(&mark);
        }
    }

    /// Mark or unmark `player` on `pot`, then carry the same state forward to
    /// every later pot on the same board that the player is eligible for.
    /// Earlier pots are never touched.
    pub fn mark(&mut self, pots: &[Pot], pot: usize, board: usize, player: &PlayerId, won: bool) {
        if pot >= pots.len() {
            return;
        }
        self.set(pot, board, player, won);
        for (idx, later) in pots.iter().enumerate().skip(pot + 1) {
            if later.is_eligible(player) {
                self.set(idx, board, player, won);
                trace!(from = pot, to = idx, board, player = %player, won, "winner propagated");
            }
        }
    }

    /// Flip a mark (with forward propagation) and return the new state.
    pub fn toggle(&mut self, pots: &[Pot], pot: usize, board: usize, player: &PlayerId) -> bool {
        let won = !self.is_winner(pot, board, player);
        self.mark(pots, pot, board, player, won);
        won
    }

    /// Winners of one pot on one board, in the pot's eligibility order.
    pub fn winners<'a>(&self, pot: &'a Pot, board: usize) -> Vec<&'a PlayerId> {
        pot.eligible.iter().filter(|p| self.is_winner(pot.tier, board, p)).collect()
    }

    /// Re-derive the selection after pots were rebuilt.
    ///
    /// A pot with a single eligible player is always won by that player.
    /// Otherwise marks survive only where the previous pot at the same index
    /// was contested by more than one player and the player is still
    /// eligible. Boards beyond `boards` are dropped.
    pub fn carry_over(&self, previous: &[Pot], next: &[Pot], boards: Boards) -> Self {
        let mut out = Self::new();
        for pot in next {
            let was_contested =
                previous.get(pot.tier).map(|p| p.eligible.len() > 1).unwrap_or(false);
            for board in 0..boards.count() {
                if pot.eligible.len() == 1 {
                    out.set(pot.tier, board, &pot.eligible[0], true);
                    continue;
                }
                if !was_contested {
                    continue;
                }
                for player in &pot.eligible {
                    if self.is_winner(pot.tier, board, player) {
                        out.set(pot.tier, board, player, true);
                    }
                }
            }
        }
        out
    }
}
