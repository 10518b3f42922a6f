//! pot-split: payout and side-pot calculator for home poker games
//!
//! Goals:
//! - Exact-to-the-cent settlement of buy-ins, cash-outs and side pots
//! - Forgiving amount entry (`"1.234,56"`, `"$20"`, `"12,5"` all parse)
//! - Total engines: bad input parses to zero, nothing panics
//!
//! ## Quick start: settle an all-in
//! ```
//! use pot_split::pots::{build_pots, settle, Boards, Contribution, PlayerId, WinnerSelection};
//!
//! let bets = vec![
//!     Contribution::new("A", 5.0),
//!     Contribution::new("B", 10.0),
//!     Contribution::new("C", 10.0),
//! ];
//! let pots = build_pots(&bets, 0.0);
//! assert_eq!(pots.len(), 2);
//! assert_eq!(pots[0].size, 15.0);
//! assert_eq!(pots[1].name(), "Side Pot 1");
//!
//! let mut winners = WinnerSelection::new();
//! winners.mark(&pots, 0, 0, &PlayerId::from("A"), true);
//! winners.mark(&pots, 1, 0, &PlayerId::from("B"), true);
//! let s = settle(&bets, 0.0, &winners, Boards::One);
//! assert_eq!(s.won(&PlayerId::from("A")), 15.0);
//! assert!(s.balanced);
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin pot-split
//! ```

pub mod amount;
pub mod config;
pub mod payout;
pub mod pots;
pub mod session;
pub mod sheet;
pub mod snapshot;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
