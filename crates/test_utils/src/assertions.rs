//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for registry types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_registry::{LedgerTotals, PropertyFile, Transaction};

/// Asserts that a line's outstanding balance is `max(0, receivable - paid)`
pub fn assert_line_balanced(line: &Transaction) {
    let expected = Money::outstanding(line.receivable, line.amount_paid);
    assert_eq!(
        line.balduedeb(),
        expected,
        "Line seq={} has balduedeb={} but receivable={} and paid={}",
        line.seq,
        line.balduedeb(),
        line.receivable,
        line.amount_paid
    );
}

/// Asserts that a file's cached totals equal the reduction of its ledger
pub fn assert_totals_consistent(file: &PropertyFile) {
    let expected = LedgerTotals::from_entries(file.transactions());
    assert_eq!(
        file.totals(),
        expected,
        "File {} caches paid={} balance={} but its ledger sums to paid={} balance={}",
        file.file_no,
        file.payment_received(),
        file.balance(),
        expected.payment_received,
        expected.balance
    );
}

/// Asserts that ledger lines are in non-decreasing `seq` order
pub fn assert_sorted_by_seq(lines: &[Transaction]) {
    let seqs: Vec<u32> = lines.iter().map(|t| t.seq).collect();
    assert!(
        seqs.windows(2).all(|w| w[0] <= w[1]),
        "Ledger is not ordered by seq: {:?}",
        seqs
    );
}

/// Asserts that a file's totals match the given amounts
pub fn assert_totals(file: &PropertyFile, payment_received: i64, balance: i64) {
    assert_eq!(
        file.payment_received(),
        Money::new(payment_received),
        "paymentReceived of {}",
        file.file_no
    );
    assert_eq!(file.balance(), Money::new(balance), "balance of {}", file.file_no);
}
