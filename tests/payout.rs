use pot_split::payout::{compute_payouts, PayoutRow};
use pot_split::session::{PayoutSheet, SidePotSheet, MAX_ROWS};
use pot_split::sheet::Sheet;

#[test]
fn winners_and_losers_cancel_out() {
    let rows = vec![PayoutRow::new("A", "30", "40"), PayoutRow::new("B", "30", "20")];
    let s = compute_payouts(&rows);
    assert_eq!(s.payouts(), vec![10.0, -10.0]);
    assert_eq!(s.total_in, 60.0);
    assert_eq!(s.total_out, 60.0);
    assert!(s.balanced);
}

#[test]
fn missing_chips_show_as_unbalanced() {
    let rows = vec![PayoutRow::new("A", "50", "70,50"), PayoutRow::new("B", "50", "29")];
    let s = compute_payouts(&rows);
    assert_eq!(s.payouts(), vec![20.5, -21.0]);
    assert!(!s.balanced);
    assert!((s.total_payout() + 0.5).abs() < 1e-9);
}

#[test]
fn empty_sheet_is_balanced() {
    let s = compute_payouts(&[]);
    assert!(s.lines.is_empty());
    assert!(s.balanced);
}

#[test]
fn session_night_with_rebuys_and_regulars() {
    let mut sheet = PayoutSheet::new(MAX_ROWS);
    sheet.set_buy_in("20");
    for name in ["Ann", "Ben", "Cat"] {
        assert!(sheet.add_player(name));
    }
    // Ben rebuys twice.
    assert!(sheet.step_buy_in(1, 1));
    assert!(sheet.step_buy_in(1, 1));
    sheet.set_cash_out(0, "45");
    sheet.set_cash_out(1, "35");
    sheet.set_cash_out(2, "20");

    let s = sheet.recalc();
    assert_eq!(s.payouts(), vec![25.0, -25.0, 0.0]);
    assert!(s.balanced);

    let regulars = vec!["Ann".to_string(), "Dan".to_string()];
    assert_eq!(sheet.available_suspects(&regulars), vec!["Dan"]);
}

#[test]
fn names_move_to_the_side_pot_sheet() {
    let mut payout = PayoutSheet::new(MAX_ROWS);
    payout.set_name(0, " Ann ");
    payout.add_row(PayoutRow::new("Ben", "", ""));
    let side = SidePotSheet::from_names(&payout.names(), Default::default(), MAX_ROWS);
    let names: Vec<&str> = side.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ann", "Ben"]);
    assert!(side.rows().iter().all(|r| r.bet.is_empty()));
}
