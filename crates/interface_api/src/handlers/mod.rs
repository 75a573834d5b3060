//! Request handlers

pub mod export;
pub mod files;
pub mod health;
pub mod ledger;
pub mod registry;
