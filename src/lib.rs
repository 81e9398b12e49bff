pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod orders;
pub mod persistence;
pub mod prices;
pub mod types;
pub mod valuation;
