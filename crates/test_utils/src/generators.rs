//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random registry data
//! that maintains domain invariants.

use core_kernel::Money;
use domain_registry::PropertyFile;
use proptest::prelude::*;
use serde_json::Value;

use crate::builders::{PropertyFileBuilder, TransactionBuilder};

/// Strategy for non-negative whole-rupee amounts
pub fn amount_strategy() -> impl Strategy<Value = i64> {
    0i64..10_000_000i64
}

/// Strategy for Money values, including negative adjustments
pub fn money_strategy() -> impl Strategy<Value = Money> {
    (-10_000_000i64..10_000_000i64).prop_map(Money::new)
}

/// Strategy for raw input a user may type into a money cell
///
/// Covers numbers, numeric strings, decimals, blanks, and garbage.
pub fn money_input_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        amount_strategy().prop_map(Value::from),
        amount_strategy().prop_map(|n| Value::from(n.to_string())),
        (0i64..100_000i64, 0u32..100u32).prop_map(|(w, f)| Value::from(format!("{}.{:02}", w, f))),
        Just(Value::from("")),
        "[a-zA-Z ]{1,8}".prop_map(Value::from),
        Just(Value::Null),
    ]
}

/// Strategy for `(receivable, paid)` pairs of a ledger
pub fn ledger_amounts_strategy(max_lines: usize) -> impl Strategy<Value = Vec<(i64, i64)>> {
    proptest::collection::vec((amount_strategy(), amount_strategy()), 0..=max_lines)
}

/// Strategy for file numbers like `DIN-0042`
pub fn file_no_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{3}-[0-9]{4}"
}

/// Strategy for a file with a random ledger
pub fn property_file_strategy() -> impl Strategy<Value = PropertyFile> {
    (
        file_no_strategy(),
        "[A-Za-z \\n]{1,20}",
        "[0-9]{5}-[0-9]{7}-[0-9]",
        ledger_amounts_strategy(8),
    )
        .prop_map(|(file_no, owner, cnic, amounts)| {
            PropertyFileBuilder::new(file_no)
                .with_owner(owner, cnic)
                .with_installments(&amounts)
                .build()
        })
}

/// Strategy for a file whose ledger carries arbitrary, possibly repeated
/// `seq` values
pub fn unordered_file_strategy() -> impl Strategy<Value = PropertyFile> {
    proptest::collection::vec((1u32..6u32, amount_strategy(), amount_strategy()), 0..8).prop_map(
        |lines| {
            lines
                .into_iter()
                .fold(PropertyFileBuilder::new("F-UNORDERED"), |builder, (seq, r, p)| {
                    builder.with_line(TransactionBuilder::new(seq).receivable(r).paid(p))
                })
                .build()
        },
    )
}

/// Strategy for a registry of files with unique numbers
pub fn registry_strategy(max_files: usize) -> impl Strategy<Value = Vec<PropertyFile>> {
    proptest::collection::vec(property_file_strategy(), 0..=max_files).prop_map(|files| {
        let mut seen = std::collections::HashSet::new();
        files
            .into_iter()
            .filter(|f| seen.insert(f.file_no.clone()))
            .collect()
    })
}
