use pot_split::pots::{build_pots, settle, Boards, Contribution, PlayerId, WinnerSelection};
use proptest::prelude::*;

fn any_contributions() -> impl Strategy<Value = Vec<Contribution>> {
    prop::collection::vec(0u32..=50_000u32, 0..=12).prop_map(|cents| {
        cents
            .into_iter()
            .enumerate()
            .map(|(i, c)| Contribution::new(format!("P{i}"), f64::from(c) / 100.0))
            .collect()
    })
}

fn any_initial_pot() -> impl Strategy<Value = f64> {
    (0u32..=10_000u32).prop_map(|c| f64::from(c) / 100.0)
}

proptest! {
    #[test]
    fn pots_add_up_to_everything_put_in(c in any_contributions(), initial in any_initial_pot()) {
        let pots = build_pots(&c, initial);
        let total: f64 = pots.iter().map(|p| p.size).sum();
        let put_in: f64 = c.iter().map(|x| x.amount).sum();
        if put_in > 0.0 {
            prop_assert!((total - (put_in + initial)).abs() < 0.01);
        } else {
            prop_assert!(pots.is_empty());
        }
    }

    #[test]
    fn later_pots_have_fewer_contesters(c in any_contributions()) {
        let pots = build_pots(&c, 0.0);
        for pair in pots.windows(2) {
            prop_assert!(pair[1].eligible.len() < pair[0].eligible.len());
            prop_assert!(pair[1].eligible.iter().all(|p| pair[0].is_eligible(p)));
        }
        for (i, pot) in pots.iter().enumerate() {
            prop_assert_eq!(pot.tier, i);
            prop_assert!(pot.size > 0.0);
        }
    }

    #[test]
    fn building_is_deterministic(c in any_contributions(), initial in any_initial_pot()) {
        prop_assert_eq!(build_pots(&c, initial), build_pots(&c, initial));
    }

    #[test]
    fn marks_only_spread_forward(c in any_contributions(), pick in 0usize..12, pot in 0usize..6) {
        let pots = build_pots(&c, 0.0);
        prop_assume!(!pots.is_empty());
        let pot = pot % pots.len();
        let eligible = &pots[pot].eligible;
        let player = eligible[pick % eligible.len()].clone();

        let mut sel = WinnerSelection::new();
        sel.mark(&pots, pot, 0, &player, true);
        for (k, later) in pots.iter().enumerate() {
            let expected = k >= pot && later.is_eligible(&player);
            prop_assert_eq!(sel.is_winner(k, 0, &player), expected);
        }
    }

    #[test]
    fn one_winner_everywhere_balances(c in any_contributions(), initial in any_initial_pot()) {
        let pots = build_pots(&c, initial);
        prop_assume!(!pots.is_empty());
        // The biggest contributor is eligible for every pot.
        let top: PlayerId = pots[0].eligible.last().cloned().unwrap();
        let mut sel = WinnerSelection::new();
        sel.mark(&pots, 0, 0, &top, true);
        let s = settle(&c, initial, &sel, Boards::One);
        prop_assert!(s.balanced);
        prop_assert_eq!(s.unsettled().count(), 0);
    }
}
