use pot_split::config::{Config, ConfigError};
use pot_split::payout::PayoutRow;
use pot_split::pots::{Boards, PlayerId};
use pot_split::session::{BetRow, PayoutSheet, SidePotSheet, MAX_ROWS};
use pot_split::snapshot::{PayoutSnapshot, SidePotSnapshot, SnapshotError};

#[test]
fn payout_snapshot_restores_rows_and_buy_in() {
    let mut sheet = PayoutSheet::with_rows(
        vec![PayoutRow::new("Ann", "20", "55"), PayoutRow::new("Ben", "40", "5")],
        "20",
        MAX_ROWS,
    );
    sheet.toggle_settled(1);
    let json = PayoutSnapshot::from_sheet(&sheet).to_json().unwrap();
    let restored = PayoutSnapshot::from_json(&json).unwrap().into_sheet(MAX_ROWS);
    assert_eq!(restored, sheet);
    assert!(restored.summary().balanced);
}

#[test]
fn stored_side_pot_shape_is_accepted() {
    let json = r#"{"v":1,"boards":"2","initialPot":"4","rows":[
        {"name":"A","bet":"10"},{"name":"B","bet":"10"}]}"#;
    let mut sheet = SidePotSnapshot::from_json(json).unwrap().into_sheet(MAX_ROWS);
    assert_eq!(sheet.boards(), Boards::Two);
    assert_eq!(sheet.pots()[0].size, 24.0);

    sheet.toggle_winner(0, 0, &PlayerId::from("A"));
    sheet.toggle_winner(0, 1, &PlayerId::from("A"));
    let s = sheet.settlement();
    assert_eq!(s.won(&PlayerId::from("A")), 24.0);
    assert!(s.balanced);
}

#[test]
fn restored_rows_are_capped() {
    let rows = vec![BetRow::new("x", "1"); MAX_ROWS + 5];
    let snap = SidePotSnapshot {
        v: 1,
        boards: "1".into(),
        initial_pot: String::new(),
        rows,
    };
    let sheet: SidePotSheet = snap.into_sheet(MAX_ROWS);
    assert_eq!(sheet.rows().len(), MAX_ROWS);
}

#[test]
fn future_versions_are_refused() {
    let err = SidePotSnapshot::from_json(r#"{"v":9,"rows":[]}"#).unwrap_err();
    assert!(matches!(err, SnapshotError::Version(9)));
}

#[test]
fn config_file_seeds_regulars() {
    let cfg = Config::from_toml_str(
        r#"
        boards = 1
        buy_in = "25"
        usual_suspects = ["Kevin", "Luke", "Mic"]
        "#,
    )
    .unwrap();
    assert_eq!(cfg.usual_suspects.len(), 3);
    assert_eq!(cfg.max_rows, MAX_ROWS);
    assert!(matches!(Config::from_toml_str("boards = 0"), Err(ConfigError::Invalid(_))));
}
