//! Core Kernel - Foundational types and utilities for the plot registry
//!
//! This crate provides the building blocks used by the registry domain and
//! the API layer:
//! - Whole-unit money with lenient input coercion
//! - Timezone-aware "today" and the registry date formats
//! - File numbers and transaction ids

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{Money, MoneyError, CURRENCY_CODE, CURRENCY_SYMBOL};
pub use temporal::{
    Timezone, TemporalError, format_due_date, format_iso_date, format_registration_date,
};
pub use identifiers::{FileNo, TransId};
