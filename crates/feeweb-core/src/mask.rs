//! Receipt masking: collapsing selected fee heads into one synthetic
//! line on printed receipts.
//!
//! The transform is purely presentational. It never changes any amount
//! total, and it is idempotent: the synthetic line's `fee_head_id` is
//! `None` and therefore never matches the masked set on a second pass.

use rust_decimal::Decimal;

use super::models::{LedgerLine, ReceiptSetting};

/// Apply the receipt mask to reconciled ledger lines.
///
/// Lines whose fee head is in `setting.masked_fee_head_ids` are replaced
/// by a single synthetic line named `setting.mask_name` carrying the sums
/// of every amount field, appended after the visible lines. An empty
/// masked partition returns the input unchanged.
pub fn apply_mask(lines: Vec<LedgerLine>, setting: &ReceiptSetting) -> Vec<LedgerLine> {
    let (masked, mut visible): (Vec<LedgerLine>, Vec<LedgerLine>) = lines
        .into_iter()
        .partition(|line| setting.is_masked(line.fee_head_id.as_deref()));

    if masked.is_empty() {
        return visible;
    }

    let mut demand_amount = Decimal::ZERO;
    let mut paid_amount = Decimal::ZERO;
    let mut net_paid = Decimal::ZERO;
    let mut due_amount = Decimal::ZERO;
    let mut cash_amount = Decimal::ZERO;
    let mut bank_amount = Decimal::ZERO;
    for line in &masked {
        demand_amount += line.demand_amount;
        paid_amount += line.paid_amount;
        net_paid += line.net_paid;
        due_amount += line.due_amount;
        cash_amount += line.cash_amount;
        bank_amount += line.bank_amount;
    }

    visible.push(LedgerLine {
        fee_head_id: None,
        name: setting.mask_name.clone(),
        student_year: None,
        semester: None,
        demand_amount,
        paid_amount,
        net_paid,
        due_amount,
        is_overpaid: net_paid > demand_amount,
        cash_amount,
        bank_amount,
    });

    visible
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn line(fee_head: &str, demand: i64, paid: i64) -> LedgerLine {
        let demand = Decimal::from(demand);
        let paid = Decimal::from(paid);
        LedgerLine {
            fee_head_id: Some(fee_head.to_string()),
            name: fee_head.to_string(),
            student_year: Some(1),
            semester: None,
            demand_amount: demand,
            paid_amount: paid.max(Decimal::ZERO),
            net_paid: paid,
            due_amount: (demand - paid).max(Decimal::ZERO),
            is_overpaid: paid > demand,
            cash_amount: paid.max(Decimal::ZERO),
            bank_amount: Decimal::ZERO,
        }
    }

    fn setting(masked: &[&str]) -> ReceiptSetting {
        ReceiptSetting {
            show_college_header: true,
            masked_fee_head_ids: masked.iter().map(|s| s.to_string()).collect::<HashSet<_>>(),
            mask_name: "Processing Fee".to_string(),
        }
    }

    #[test]
    fn test_masked_lines_collapse_into_synthetic() {
        let lines = vec![line("X", 800, 800), line("Y", 500, 500)];
        let out = apply_mask(lines, &setting(&["X"]));

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].fee_head_id.as_deref(), Some("Y"));
        assert_eq!(out[1].fee_head_id, None);
        assert_eq!(out[1].name, "Processing Fee");
        assert_eq!(out[1].paid_amount, Decimal::from(800));
    }

    #[test]
    fn test_empty_mask_is_identity() {
        let lines = vec![line("X", 800, 800), line("Y", 500, 200)];
        let out = apply_mask(lines.clone(), &setting(&[]));
        assert_eq!(out, lines);
    }

    #[test]
    fn test_mask_preserves_amount_totals() {
        let lines = vec![line("X", 800, 300), line("Y", 500, 500), line("Z", 100, 0)];
        let before_demand: Decimal = lines.iter().map(|l| l.demand_amount).sum();
        let before_paid: Decimal = lines.iter().map(|l| l.paid_amount).sum();
        let before_due: Decimal = lines.iter().map(|l| l.due_amount).sum();

        let out = apply_mask(lines, &setting(&["X", "Z"]));
        let after_demand: Decimal = out.iter().map(|l| l.demand_amount).sum();
        let after_paid: Decimal = out.iter().map(|l| l.paid_amount).sum();
        let after_due: Decimal = out.iter().map(|l| l.due_amount).sum();

        assert_eq!(before_demand, after_demand);
        assert_eq!(before_paid, after_paid);
        assert_eq!(before_due, after_due);
    }

    #[test]
    fn test_mask_is_idempotent() {
        let lines = vec![line("X", 800, 300), line("Y", 500, 500)];
        let s = setting(&["X"]);
        let once = apply_mask(lines, &s);
        let twice = apply_mask(once.clone(), &s);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_all_lines_masked() {
        let lines = vec![line("X", 800, 300), line("Y", 500, 500)];
        let out = apply_mask(lines, &setting(&["X", "Y"]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].fee_head_id, None);
        assert_eq!(out[0].demand_amount, Decimal::from(1300));
        assert_eq!(out[0].paid_amount, Decimal::from(800));
    }
}
