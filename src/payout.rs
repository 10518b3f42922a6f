use crate::amount::{cents_balanced, format_integer, parse_amount};
use serde::{Deserialize, Serialize};

/// One player's line on the payout sheet, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRow {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "in")]
    pub buy_in: String,
    #[serde(default, rename = "out")]
    pub cash_out: String,
    /// Money has been handed over. Informational only.
    #[serde(default)]
    pub settled: bool,
}

impl PayoutRow {
    pub fn new(
        name: impl Into<String>,
        buy_in: impl Into<String>,
        cash_out: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), buy_in: buy_in.into(), cash_out: cash_out.into(), settled: false }
    }
}

/// Parsed figures for a single row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoutLine {
    pub buy_in: f64,
    pub cash_out: f64,
    pub payout: f64,
    /// The typed cash-out was negative and has been treated as zero.
    pub cash_out_clamped: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayoutSummary {
    pub lines: Vec<PayoutLine>,
    pub total_in: f64,
    pub total_out: f64,
    pub balanced: bool,
}

impl PayoutSummary {
    /// Net result per row, in row order.
    pub fn payouts(&self) -> Vec<f64> {
        self.lines.iter().map(|l| l.payout).collect()
    }

    pub fn total_payout(&self) -> f64 {
        self.total_out - self.total_in
    }
}

/// Compute `cash_out - buy_in` for every row plus sheet totals.
///
/// Negative cash-outs are clamped to zero. The sheet is balanced when total
/// cash-out equals total buy-in to the cent.
///
/// ```
/// use pot_split::payout::{compute_payouts, PayoutRow};
///
/// let rows = vec![PayoutRow::new("A", "30", "40"), PayoutRow::new("B", "30", "20")];
/// let summary = compute_payouts(&rows);
/// assert_eq!(summary.payouts(), vec![10.0, -10.0]);
/// assert!(summary.balanced);
/// ```
pub fn compute_payouts(rows: &[PayoutRow]) -> PayoutSummary {
    let mut total_in = 0.0;
    let mut total_out = 0.0;
    let lines: Vec<PayoutLine> = rows
        .iter()
        .map(|row| {
            let buy_in = parse_amount(&row.buy_in);
            let raw_out = parse_amount(&row.cash_out);
            let cash_out_clamped = raw_out < 0.0;
            let cash_out = if cash_out_clamped { 0.0 } else { raw_out };
            total_in += buy_in;
            total_out += cash_out;
            PayoutLine { buy_in, cash_out, payout: cash_out - buy_in, cash_out_clamped }
        })
        .collect();
    let balanced = cents_balanced(total_out, total_in);
    tracing::trace!(rows = lines.len(), total_in, total_out, balanced, "payouts computed");
    PayoutSummary { lines, total_in, total_out, balanced }
}

/// Step a buy-in by whole units (re-buys).
///
/// Returns `None` when no unit is set. The result never drops below a single
/// unit and is rendered as an integer.
///
/// ```
/// use pot_split::payout::step_buy_in;
///
/// assert_eq!(step_buy_in("20", "20", 1).as_deref(), Some("40"));
/// assert_eq!(step_buy_in("20", "20", -1).as_deref(), Some("20"));
/// assert_eq!(step_buy_in("20", " ", 1), None);
/// ```
pub fn step_buy_in(current: &str, unit: &str, delta: i64) -> Option<String> {
    if unit.trim().is_empty() {
        return None;
    }
    let unit = parse_amount(unit);
    let next = (parse_amount(current) + delta as f64 * unit).max(unit);
    Some(format_integer(next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_cash_out_is_clamped() {
        let rows = vec![PayoutRow::new("A", "10", "-5"), PayoutRow::new("B", "0", "10")];
        let s = compute_payouts(&rows);
        assert!(s.lines[0].cash_out_clamped);
        assert_eq!(s.lines[0].cash_out, 0.0);
        assert_eq!(s.lines[0].payout, -10.0);
        assert!(!s.lines[1].cash_out_clamped);
        assert_eq!(s.total_out, 10.0);
        assert!(s.balanced);
    }

    #[test]
    fn malformed_numbers_count_as_zero() {
        let rows = vec![PayoutRow::new("A", "twenty", "x"), PayoutRow::new("B", "", "")];
        let s = compute_payouts(&rows);
        assert_eq!(s.payouts(), vec![0.0, 0.0]);
        assert!(s.balanced);
    }

    #[test]
    fn unbalanced_by_a_cent() {
        let rows = vec![PayoutRow::new("A", "10", "10,01")];
        let s = compute_payouts(&rows);
        assert!(!s.balanced);
        assert!((s.total_payout() - 0.01).abs() < 1e-9);
    }

    #[test]
    fn empty_sheet_is_balanced() {
        let s = compute_payouts(&[]);
        assert!(s.lines.is_empty());
        assert!(s.balanced);
    }

    #[test]
    fn step_adds_units_and_floors_at_one_unit() {
        assert_eq!(step_buy_in("", "25", 1).as_deref(), Some("25"));
        assert_eq!(step_buy_in("50", "25", 1).as_deref(), Some("75"));
        assert_eq!(step_buy_in("50", "25", -1).as_deref(), Some("25"));
        assert_eq!(step_buy_in("10", "25", -1).as_deref(), Some("25"));
        assert_eq!(step_buy_in("12,5", "12,5", 1).as_deref(), Some("25"));
    }
}
