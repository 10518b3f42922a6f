//! Side-pot construction and settlement.
//!
//! Pots are rebuilt from scratch from a snapshot of contributions every time
//! anything changes; nothing here is incremental. The flow is:
//!
//! 1. [`build_pots`] layers the contributions into a main pot and side pots.
//! 2. A [`WinnerSelection`] records which eligible players won which pot on
//!    which board, propagating marks forward through later pots.
//! 3. [`settle`] divides each pot (per board) among its marked winners and
//!    checks the result against what went in.
//!
//! ```
//! use pot_split::pots::{build_pots, Contribution};
//!
//! let pots = build_pots(
//!     &[Contribution::new("A", 5.0), Contribution::new("B", 10.0), Contribution::new("C", 10.0)],
//!     0.0,
//! );
//! assert_eq!(pots.len(), 2);
//! assert_eq!(pots[0].size, 15.0);
//! assert_eq!(pots[1].size, 10.0);
//! assert_eq!(pots[1].name(), "Side Pot 1");
//! ```

mod build;
mod distribute;
mod selection;

pub use build::build_pots;
pub use distribute::{distribute, settle, PlayerOutcome, PotAward, Settlement};
pub use selection::{WinnerMark, WinnerSelection};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a player within one table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Total chips one player put in this hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub player: PlayerId,
    pub amount: f64,
}

impl Contribution {
    pub fn new(player: impl Into<PlayerId>, amount: f64) -> Self {
        Self { player: player.into(), amount }
    }
}

/// A main pot (tier 0) or side pot.
#[derive(Debug, Clone, PartialEq)]
pub struct Pot {
    pub tier: usize,
    pub size: f64,
    /// Players whose contribution reaches this tier, lowest contribution first.
    pub eligible: Vec<PlayerId>,
}

impl Pot {
    pub fn name(&self) -> String {
        if self.tier == 0 {
            "Main Pot".to_string()
        } else {
            format!("Side Pot {}", self.tier)
        }
    }

    pub fn is_side(&self) -> bool {
        self.tier > 0
    }

    pub fn is_eligible(&self, player: &PlayerId) -> bool {
        self.eligible.contains(player)
    }

    /// The part of this pot resolved on each board.
    pub fn share(&self, boards: Boards) -> f64 {
        self.size / boards.count() as f64
    }
}

/// Number of boards the pots are run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Boards {
    #[default]
    One,
    Two,
}

impl Boards {
    pub fn count(self) -> usize {
        match self {
            Boards::One => 1,
            Boards::Two => 2,
        }
    }

    /// Interpret a typed board count.
    ///
    /// Takes the leading integer (`"2.7"` is 2), falls back to one board for
    /// anything unreadable or zero, and caps at two.
    ///
    /// ```
    /// use pot_split::pots::Boards;
    ///
    /// assert_eq!(Boards::from_input("2"), Boards::Two);
    /// assert_eq!(Boards::from_input("7"), Boards::Two);
    /// assert_eq!(Boards::from_input("0"), Boards::One);
    /// assert_eq!(Boards::from_input("x"), Boards::One);
    /// ```
    pub fn from_input(raw: &str) -> Self {
        let s = raw.trim();
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let end = digits.bytes().take_while(u8::is_ascii_digit).count();
        if end == 0 {
            return Boards::One;
        }
        // Only overflow can fail here; anything that long is above two.
        let n = digits[..end].parse::<u64>().unwrap_or(u64::MAX);
        if negative || n < 2 {
            Boards::One
        } else {
            Boards::Two
        }
    }

    pub fn as_input(self) -> String {
        self.count().to_string()
    }

    pub fn toggled(self) -> Self {
        match self {
            Boards::One => Boards::Two,
            Boards::Two => Boards::One,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pot_names_follow_tier() {
        let main = Pot { tier: 0, size: 1.0, eligible: vec![] };
        let side = Pot { tier: 3, size: 1.0, eligible: vec![] };
        assert_eq!(main.name(), "Main Pot");
        assert!(!main.is_side());
        assert_eq!(side.name(), "Side Pot 3");
        assert!(side.is_side());
    }

    #[test]
    fn board_input_is_clamped() {
        assert_eq!(Boards::from_input(""), Boards::One);
        assert_eq!(Boards::from_input("1"), Boards::One);
        assert_eq!(Boards::from_input(" 2 "), Boards::Two);
        assert_eq!(Boards::from_input("2.9"), Boards::Two);
        assert_eq!(Boards::from_input("-4"), Boards::One);
        assert_eq!(Boards::from_input("99999999999999999999999"), Boards::Two);
    }

    #[test]
    fn share_splits_across_boards() {
        let pot = Pot { tier: 0, size: 25.0, eligible: vec![] };
        assert_eq!(pot.share(Boards::One), 25.0);
        assert_eq!(pot.share(Boards::Two), 12.5);
    }
}
