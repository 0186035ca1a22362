//! Collection report aggregation: folding transaction streams into
//! grouped buckets with cash/bank and debit/credit splits.
//!
//! Aggregation is a pure fold over an already-fetched slice. Buckets
//! accumulate in `BTreeMap` key order, which makes `day` buckets
//! chronological and every other dimension stable. Row-count and range
//! ceilings are enforced at the fetch boundary (`FeeLedger`), not here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::models::{PayMode, Transaction, TxnType};
use super::reports::{FeeHeadBreakdown, ReportBucket, ReportTotals};
use super::time::ReportRange;

/// Report grouping dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// One bucket per calendar day
    Day,
    /// One bucket per cashier, with nested fee-head/college splits
    Cashier,
    /// One bucket per fee head, with a nested college split
    FeeHead,
    /// One bucket per payment mode
    Mode,
}

impl std::str::FromStr for GroupBy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(GroupBy::Day),
            "cashier" => Ok(GroupBy::Cashier),
            "feehead" | "fee_head" => Ok(GroupBy::FeeHead),
            "mode" => Ok(GroupBy::Mode),
            _ => Err(format!("Invalid grouping dimension: {}", s)),
        }
    }
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupBy::Day => write!(f, "day"),
            GroupBy::Cashier => write!(f, "cashier"),
            GroupBy::FeeHead => write!(f, "feehead"),
            GroupBy::Mode => write!(f, "mode"),
        }
    }
}

/// Mode/type accumulator shared by buckets and nested splits
#[derive(Debug, Default, Clone)]
struct SplitAccum {
    count: usize,
    cash: Decimal,
    bank: Decimal,
    debit: Decimal,
    credit: Decimal,
    colleges: BTreeMap<String, Decimal>,
}

impl SplitAccum {
    fn apply(&mut self, txn: &Transaction) {
        self.count += 1;
        match txn.txn_type {
            TxnType::Debit => {
                self.debit += txn.amount;
                match txn.mode {
                    PayMode::Cash => self.cash += txn.amount,
                    PayMode::Bank => self.bank += txn.amount,
                }
            }
            TxnType::Credit => self.credit += txn.amount,
        }
    }

    fn apply_college(&mut self, txn: &Transaction) {
        *self.colleges.entry(txn.college.clone()).or_default() += txn.signed_amount();
    }

    fn total(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// Per-group accumulator
#[derive(Debug, Default)]
struct BucketAccum {
    split: SplitAccum,
    fee_heads: BTreeMap<String, SplitAccum>,
}

/// Fold transactions inside `range` into report buckets for one grouping
/// dimension.
///
/// Every transaction in range lands in exactly one bucket, so bucket
/// totals over a full dimension sum to the signed total of the filtered
/// slice.
pub fn aggregate(
    transactions: &[Transaction],
    range: &ReportRange,
    group_by: GroupBy,
) -> Vec<ReportBucket> {
    let mut groups: BTreeMap<String, BucketAccum> = BTreeMap::new();

    for txn in transactions {
        if !range.contains(&txn.date()) {
            continue;
        }

        let key = match group_by {
            GroupBy::Day => txn.date().to_string(),
            GroupBy::Cashier => txn.cashier_id.clone(),
            GroupBy::FeeHead => txn.fee_head_id.clone(),
            GroupBy::Mode => txn.mode.to_string(),
        };

        let group = groups.entry(key).or_default();
        group.split.apply(txn);

        match group_by {
            GroupBy::Cashier => {
                let head = group.fee_heads.entry(txn.fee_head_id.clone()).or_default();
                head.apply(txn);
                head.apply_college(txn);
            }
            GroupBy::FeeHead => group.split.apply_college(txn),
            GroupBy::Day | GroupBy::Mode => {}
        }
    }

    groups
        .into_iter()
        .map(|(group_key, accum)| {
            let fee_heads = accum
                .fee_heads
                .into_iter()
                .map(|(fee_head_id, head)| FeeHeadBreakdown {
                    fee_head_id,
                    name: None,
                    count: head.count,
                    cash_amount: head.cash,
                    bank_amount: head.bank,
                    debit_amount: head.debit,
                    credit_amount: head.credit,
                    total_amount: head.total(),
                    colleges: head.colleges,
                })
                .collect();

            ReportBucket {
                group_key,
                label: None,
                count: accum.split.count,
                cash_amount: accum.split.cash,
                bank_amount: accum.split.bank,
                debit_amount: accum.split.debit,
                credit_amount: accum.split.credit,
                total_amount: accum.split.total(),
                fee_heads,
                colleges: accum.split.colleges,
            }
        })
        .collect()
}

/// Sum bucket splits into report-level totals
pub fn totals(buckets: &[ReportBucket]) -> ReportTotals {
    let mut out = ReportTotals::default();
    for bucket in buckets {
        out.count += bucket.count;
        out.cash_amount += bucket.cash_amount;
        out.bank_amount += bucket.bank_amount;
        out.debit_amount += bucket.debit_amount;
        out.credit_amount += bucket.credit_amount;
        out.total_amount += bucket.total_amount;
    }
    out
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(
        day: u32,
        cashier: &str,
        fee_head: &str,
        college: &str,
        amount: i64,
        txn_type: TxnType,
        mode: PayMode,
    ) -> Transaction {
        Transaction {
            id: format!("t-{}-{}-{}", cashier, fee_head, amount),
            student_id: "s1".to_string(),
            fee_head_id: fee_head.to_string(),
            student_year: 1,
            semester: None,
            amount: Decimal::from(amount),
            txn_type,
            mode,
            cashier_id: cashier.to_string(),
            college: college.to_string(),
            timestamp: NaiveDate::from_ymd_opt(2026, 7, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            receipt_no: "RCP-00000001".to_string(),
        }
    }

    fn sample_day() -> Vec<Transaction> {
        vec![
            txn(10, "A", "X", "ENG", 1000, TxnType::Debit, PayMode::Cash),
            txn(10, "A", "X", "ENG", 200, TxnType::Credit, PayMode::Cash),
            txn(10, "B", "Y", "PHARM", 500, TxnType::Debit, PayMode::Bank),
        ]
    }

    #[test]
    fn test_cashier_grouping_splits() {
        let buckets = aggregate(
            &sample_day(),
            &ReportRange::custom(
                NaiveDate::from_ymd_opt(2026, 7, 10).unwrap(),
                NaiveDate::from_ymd_opt(2026, 7, 10).unwrap(),
            ),
            GroupBy::Cashier,
        );

        assert_eq!(buckets.len(), 2);
        let a = buckets.iter().find(|b| b.group_key == "A").unwrap();
        assert_eq!(a.cash_amount, Decimal::from(1000));
        assert_eq!(a.bank_amount, Decimal::ZERO);
        assert_eq!(a.debit_amount, Decimal::from(1000));
        assert_eq!(a.credit_amount, Decimal::from(200));
        assert_eq!(a.total_amount, Decimal::from(800));
        assert_eq!(a.count, 2);

        let b = buckets.iter().find(|b| b.group_key == "B").unwrap();
        assert_eq!(b.cash_amount, Decimal::ZERO);
        assert_eq!(b.bank_amount, Decimal::from(500));
        assert_eq!(b.total_amount, Decimal::from(500));
        assert_eq!(b.count, 1);
    }

    #[test]
    fn test_cashier_nested_fee_head_college() {
        let buckets = aggregate(&sample_day(), &ReportRange::default(), GroupBy::Cashier);
        let a = buckets.iter().find(|b| b.group_key == "A").unwrap();
        assert_eq!(a.fee_heads.len(), 1);
        let head = &a.fee_heads[0];
        assert_eq!(head.fee_head_id, "X");
        assert_eq!(head.total_amount, Decimal::from(800));
        assert_eq!(head.colleges.get("ENG"), Some(&Decimal::from(800)));
    }

    #[test]
    fn test_fee_head_grouping_college_split() {
        let buckets = aggregate(&sample_day(), &ReportRange::default(), GroupBy::FeeHead);
        assert_eq!(buckets.len(), 2);
        let x = buckets.iter().find(|b| b.group_key == "X").unwrap();
        assert_eq!(x.colleges.get("ENG"), Some(&Decimal::from(800)));
        assert!(x.fee_heads.is_empty());
    }

    #[test]
    fn test_day_buckets_chronological() {
        let transactions = vec![
            txn(12, "A", "X", "ENG", 300, TxnType::Debit, PayMode::Cash),
            txn(10, "A", "X", "ENG", 100, TxnType::Debit, PayMode::Cash),
            txn(11, "A", "X", "ENG", 200, TxnType::Debit, PayMode::Cash),
        ];
        let buckets = aggregate(&transactions, &ReportRange::default(), GroupBy::Day);
        let keys: Vec<&str> = buckets.iter().map(|b| b.group_key.as_str()).collect();
        assert_eq!(keys, vec!["2026-07-10", "2026-07-11", "2026-07-12"]);
    }

    #[test]
    fn test_mode_grouping() {
        let buckets = aggregate(&sample_day(), &ReportRange::default(), GroupBy::Mode);
        let cash = buckets.iter().find(|b| b.group_key == "cash").unwrap();
        let bank = buckets.iter().find(|b| b.group_key == "bank").unwrap();
        assert_eq!(cash.total_amount, Decimal::from(800));
        assert_eq!(bank.total_amount, Decimal::from(500));
    }

    #[test]
    fn test_range_filter_inclusive() {
        let transactions = vec![
            txn(9, "A", "X", "ENG", 100, TxnType::Debit, PayMode::Cash),
            txn(10, "A", "X", "ENG", 200, TxnType::Debit, PayMode::Cash),
            txn(11, "A", "X", "ENG", 400, TxnType::Debit, PayMode::Cash),
            txn(12, "A", "X", "ENG", 800, TxnType::Debit, PayMode::Cash),
        ];
        let range = ReportRange::custom(
            NaiveDate::from_ymd_opt(2026, 7, 10).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 11).unwrap(),
        );
        let buckets = aggregate(&transactions, &range, GroupBy::Day);
        assert_eq!(totals(&buckets).total_amount, Decimal::from(600));
    }

    #[test]
    fn test_sum_conservation_across_dimensions() {
        let transactions = vec![
            txn(10, "A", "X", "ENG", 1000, TxnType::Debit, PayMode::Cash),
            txn(10, "A", "Y", "ENG", 700, TxnType::Debit, PayMode::Bank),
            txn(11, "B", "X", "PHARM", 300, TxnType::Credit, PayMode::Cash),
            txn(12, "C", "Z", "MBA", 50, TxnType::Debit, PayMode::Cash),
        ];
        let signed_sum: Decimal = transactions.iter().map(|t| t.signed_amount()).sum();

        for group_by in [GroupBy::Day, GroupBy::Cashier, GroupBy::FeeHead, GroupBy::Mode] {
            let buckets = aggregate(&transactions, &ReportRange::default(), group_by);
            let report = totals(&buckets);
            assert_eq!(report.total_amount, signed_sum);
            assert_eq!(report.count, transactions.len());
        }
    }

    #[test]
    fn test_group_by_from_str() {
        assert_eq!("day".parse::<GroupBy>().unwrap(), GroupBy::Day);
        assert_eq!("fee_head".parse::<GroupBy>().unwrap(), GroupBy::FeeHead);
        assert_eq!("FEEHEAD".parse::<GroupBy>().unwrap(), GroupBy::FeeHead);
        assert!("student".parse::<GroupBy>().is_err());
    }
}
