//! Request and response bodies

pub mod files;
pub mod ledger;
pub mod registry;
