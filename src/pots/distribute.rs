use super::{build_pots, Boards, Contribution, PlayerId, Pot, WinnerSelection};
use crate::amount::{cents_balanced, round_cents};
use std::collections::BTreeMap;
use tracing::debug;

/// How one pot's share on one board was paid out.
#[derive(Debug, Clone, PartialEq)]
pub struct PotAward {
    pub pot: usize,
    pub board: usize,
    pub share: f64,
    pub winners: Vec<PlayerId>,
    /// Zero when nobody has been marked yet.
    pub per_winner: f64,
}

impl PotAward {
    /// False while the share is still waiting for a winner.
    pub fn is_settled(&self) -> bool {
        !self.winners.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerOutcome {
    pub player: PlayerId,
    pub contributed: f64,
    pub won: f64,
}

impl PlayerOutcome {
    pub fn net(&self) -> f64 {
        self.won - self.contributed
    }
}

/// Result of settling one hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub pots: Vec<Pot>,
    pub awards: Vec<PotAward>,
    /// Winnings per player, including players that won nothing.
    pub winnings: BTreeMap<PlayerId, f64>,
    /// Per contribution row, in input order.
    pub outcomes: Vec<PlayerOutcome>,
    /// All chips put in, dead money included.
    pub total_contributed: f64,
    pub total_distributed: f64,
    pub balanced: bool,
}

impl Settlement {
    pub fn won(&self, player: &PlayerId) -> f64 {
        self.winnings.get(player).copied().unwrap_or(0.0)
    }

    /// Pot/board shares with no winner marked yet.
    pub fn unsettled(&self) -> impl Iterator<Item = &PotAward> {
        self.awards.iter().filter(|a| !a.is_settled())
    }
}

/// Divide every pot's per-board share evenly among that board's winners.
///
/// Running totals are kept to the cent, so each award is rounded as it is
/// added. Shares with no winners stay undistributed.
pub fn distribute(
    pots: &[Pot],
    selection: &WinnerSelection,
    boards: Boards,
) -> (Vec<PotAward>, BTreeMap<PlayerId, f64>) {
    let mut awards = Vec::with_capacity(pots.len() * boards.count());
    let mut winnings: BTreeMap<PlayerId, f64> = BTreeMap::new();
    for pot in pots {
        let share = pot.share(boards);
        for board in 0..boards.count() {
            let winners: Vec<PlayerId> =
                selection.winners(pot, board).into_iter().cloned().collect();
            let per_winner =
                if winners.is_empty() { 0.0 } else { share / winners.len() as f64 };
            for w in &winners {
                let entry = winnings.entry(w.clone()).or_insert(0.0);
                *entry = round_cents(*entry + per_winner);
            }
            if winners.is_empty() {
                debug!(pot = pot.tier, board, share, "pot share unsettled");
            }
            awards.push(PotAward { pot: pot.tier, board, share, winners, per_winner });
        }
    }
    (awards, winnings)
}

/// Build pots from `contributions`, pay them out per `selection`, and check
/// the books.
///
/// Negative contributions and a negative `initial_pot` count as zero.
///
/// ```
/// use pot_split::pots::{build_pots, settle, Boards, Contribution, PlayerId, WinnerSelection};
///
/// let contributions = vec![
///     Contribution::new("A", 5.0),
///     Contribution::new("B", 10.0),
///     Contribution::new("C", 10.0),
/// ];
/// let pots = build_pots(&contributions, 0.0);
/// let mut selection = WinnerSelection::new();
/// selection.mark(&pots, 0, 0, &PlayerId::from("C"), true);
///
/// let s = settle(&contributions, 0.0, &selection, Boards::One);
/// assert_eq!(s.won(&PlayerId::from("C")), 25.0);
/// assert!(s.balanced);
/// ```
pub fn settle(
    contributions: &[Contribution],
    initial_pot: f64,
    selection: &WinnerSelection,
    boards: Boards,
) -> Settlement {
    let initial_pot = initial_pot.max(0.0);
    let pots = build_pots(contributions, initial_pot);
    let (awards, mut won) = distribute(&pots, selection, boards);

    let total_contributed =
        initial_pot + contributions.iter().map(|c| c.amount.max(0.0)).sum::<f64>();
    let total_distributed: f64 = won.values().sum();
    let balanced = cents_balanced(total_distributed, total_contributed);

    let outcomes: Vec<PlayerOutcome> = contributions
        .iter()
        .map(|c| PlayerOutcome {
            player: c.player.clone(),
            contributed: c.amount.max(0.0),
            won: won.get(&c.player).copied().unwrap_or(0.0),
        })
        .collect();
    for c in contributions {
        won.entry(c.player.clone()).or_insert(0.0);
    }

    debug!(
        pots = pots.len(),
        boards = boards.count(),
        total_contributed,
        total_distributed,
        balanced,
        "hand settled"
    );
    Settlement {
        pots,
        awards,
        winnings: won,
        outcomes,
        total_contributed,
        total_distributed,
        balanced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PlayerId {
        PlayerId::from(s)
    }

    fn contribs(entries: &[(&str, f64)]) -> Vec<Contribution> {
        entries.iter().map(|(p, a)| Contribution::new(*p, *a)).collect()
    }

    #[test]
    fn main_and_side_pot_to_different_winners() {
        let c = contribs(&[("A", 5.0), ("B", 10.0), ("C", 10.0)]);
        let pots = build_pots(&c, 0.0);
        let mut sel = WinnerSelection::new();
        sel.set(0, 0, &id("A"), true);
        sel.set(1, 0, &id("B"), true);
        let s = settle(&c, 0.0, &sel, Boards::One);
        assert_eq!(s.pots, pots);
        assert_eq!(s.won(&id("A")), 15.0);
        assert_eq!(s.won(&id("B")), 10.0);
        assert_eq!(s.won(&id("C")), 0.0);
        assert_eq!(s.total_contributed, 25.0);
        assert!(s.balanced);
        assert_eq!(s.outcomes[2].net(), -10.0);
    }

    #[test]
    fn split_pot_rounds_each_award_to_cents() {
        let c = contribs(&[("A", 10.0), ("B", 10.0), ("C", 10.0)]);
        let mut sel = WinnerSelection::new();
        sel.set(0, 0, &id("A"), true);
        sel.set(0, 0, &id("B"), true);
        sel.set(0, 0, &id("C"), true);
        let s = settle(&c, 1.0, &sel, Boards::One);
        // 31 / 3 = 10.333...
        assert_eq!(s.won(&id("A")), 10.33);
        assert_eq!(s.awards[0].winners.len(), 3);
        assert!((s.total_distributed - 30.99).abs() < 1e-9);
        assert!(!s.balanced);
    }

    #[test]
    fn two_boards_split_each_pot_in_half() {
        let c = contribs(&[("A", 20.0), ("B", 20.0)]);
        let mut sel = WinnerSelection::new();
        sel.set(0, 0, &id("A"), true);
        sel.set(0, 1, &id("B"), true);
        let s = settle(&c, 0.0, &sel, Boards::Two);
        assert_eq!(s.awards.len(), 2);
        assert_eq!(s.awards[0].share, 20.0);
        assert_eq!(s.won(&id("A")), 20.0);
        assert_eq!(s.won(&id("B")), 20.0);
        assert!(s.balanced);
    }

    #[test]
    fn missing_winners_leave_share_unsettled() {
        let c = contribs(&[("A", 20.0), ("B", 20.0)]);
        let mut sel = WinnerSelection::new();
        sel.set(0, 0, &id("A"), true);
        let s = settle(&c, 0.0, &sel, Boards::Two);
        let open: Vec<_> = s.unsettled().collect();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].board, 1);
        assert_eq!(open[0].per_winner, 0.0);
        assert_eq!(s.total_distributed, 20.0);
        assert!(!s.balanced);
    }

    #[test]
    fn empty_hand_settles_to_nothing() {
        let s = settle(&[], 0.0, &WinnerSelection::new(), Boards::One);
        assert!(s.pots.is_empty());
        assert!(s.awards.is_empty());
        assert!(s.balanced);
    }

    #[test]
    fn dead_money_without_players_is_unbalanced() {
        let s = settle(&[], 5.0, &WinnerSelection::new(), Boards::One);
        assert_eq!(s.total_contributed, 5.0);
        assert!(!s.balanced);
    }

    #[test]
    fn non_contributing_players_still_listed() {
        let c = contribs(&[("A", 0.0), ("B", 4.0), ("C", 4.0)]);
        let mut sel = WinnerSelection::new();
        sel.set(0, 0, &id("B"), true);
        let s = settle(&c, 0.0, &sel, Boards::One);
        assert_eq!(s.winnings.len(), 3);
        assert_eq!(s.won(&id("A")), 0.0);
        assert_eq!(s.outcomes[0].contributed, 0.0);
    }

    #[test]
    fn settling_twice_is_identical() {
        let c = contribs(&[("A", 3.0), ("B", 7.5), ("C", 12.0)]);
        let pots = build_pots(&c, 2.0);
        let mut sel = WinnerSelection::new();
        sel.mark(&pots, 0, 0, &id("B"), true);
        sel = sel.carry_over(&pots, &pots, Boards::One);
        let a = settle(&c, 2.0, &sel, Boards::One);
        let b = settle(&c, 2.0, &sel, Boards::One);
        assert_eq!(a, b);
        assert!(a.balanced);
    }
}
