use super::{Contribution, Pot};
use tracing::debug;

/// Layer contributions into a main pot followed by side pots.
///
/// Contributions of zero or less take no part. The rest are walked in
/// ascending order; every time the amount steps up, the new layer
/// `(amount - previous) * players_still_in` becomes a pot that everyone from
/// that position on is eligible for. `initial_pot` (dead money already in the
/// middle) is added to the main pot. Players sharing an amount open a single
/// tier, but each one still leaves the contester count as they are passed.
pub fn build_pots(contributions: &[Contribution], initial_pot: f64) -> Vec<Pot> {
    let mut contesting: Vec<&Contribution> =
        contributions.iter().filter(|c| c.amount > 0.0).collect();
    if contesting.is_empty() {
        return Vec::new();
    }
    // Stable, so equal amounts keep input order.
    contesting.sort_by(|a, b| a.amount.total_cmp(&b.amount));

    let mut pots: Vec<Pot> = Vec::new();
    let mut prev = 0.0;
    let mut remaining = contesting.len();
    for (i, c) in contesting.iter().enumerate() {
        if c.amount > prev {
            let mut size = (c.amount - prev) * remaining as f64;
            if pots.is_empty() && initial_pot > 0.0 {
                size += initial_pot;
            }
            let eligible = contesting[i..].iter().map(|c| c.player.clone()).collect();
            debug!(
                tier = pots.len(),
                threshold = c.amount,
                contesters = remaining,
                size,
                "pot tier opened"
            );
            pots.push(Pot { tier: pots.len(), size, eligible });
        }
        remaining -= 1;
        prev = c.amount;
    }
    pots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pots::PlayerId;

    fn contribs(entries: &[(&str, f64)]) -> Vec<Contribution> {
        entries.iter().map(|(p, a)| Contribution::new(*p, *a)).collect()
    }

    fn ids(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|n| PlayerId::from(*n)).collect()
    }

    #[test]
    fn equal_contributions_make_one_pot() {
        let pots = build_pots(&contribs(&[("A", 10.0), ("B", 10.0), ("C", 10.0)]), 0.0);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].size, 30.0);
        assert_eq!(pots[0].eligible, ids(&["A", "B", "C"]));
    }

    #[test]
    fn short_stack_opens_side_pot() {
        let pots = build_pots(&contribs(&[("A", 5.0), ("B", 10.0), ("C", 10.0)]), 0.0);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].size, 15.0);
        assert_eq!(pots[0].eligible, ids(&["A", "B", "C"]));
        assert_eq!(pots[1].tier, 1);
        assert_eq!(pots[1].size, 10.0);
        assert_eq!(pots[1].eligible, ids(&["B", "C"]));
    }

    #[test]
    fn initial_pot_joins_main_pot_only() {
        let pots = build_pots(&contribs(&[("A", 10.0), ("B", 10.0)]), 6.0);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].size, 26.0);

        let pots = build_pots(&contribs(&[("A", 4.0), ("B", 10.0)]), 6.0);
        assert_eq!(pots[0].size, 14.0);
        assert_eq!(pots[1].size, 6.0);
    }

    #[test]
    fn non_positive_contributions_are_ignored() {
        let pots = build_pots(&contribs(&[("A", 0.0), ("B", -3.0), ("C", 8.0), ("D", 8.0)]), 0.0);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].size, 16.0);
        assert_eq!(pots[0].eligible, ids(&["C", "D"]));
    }

    #[test]
    fn no_contributions_no_pots() {
        assert!(build_pots(&[], 0.0).is_empty());
        assert!(build_pots(&contribs(&[("A", 0.0)]), 12.0).is_empty());
    }

    #[test]
    fn shared_amounts_step_contester_count_once_each() {
        // Sorted: A50 B50 C100 D100 E300
        let pots = build_pots(
            &contribs(&[("C", 100.0), ("A", 50.0), ("E", 300.0), ("B", 50.0), ("D", 100.0)]),
            0.0,
        );
        assert_eq!(pots.len(), 3);
        assert_eq!(pots[0].size, 250.0);
        assert_eq!(pots[0].eligible, ids(&["A", "B", "C", "D", "E"]));
        assert_eq!(pots[1].size, 150.0);
        assert_eq!(pots[1].eligible, ids(&["C", "D", "E"]));
        assert_eq!(pots[2].size, 200.0);
        assert_eq!(pots[2].eligible, ids(&["E"]));
    }

    #[test]
    fn fractional_amounts() {
        let pots = build_pots(&contribs(&[("A", 2.5), ("B", 7.25)]), 0.5);
        assert_eq!(pots[0].size, 5.5);
        assert_eq!(pots[1].size, 4.75);
    }
}
