pub mod account;
pub mod holding;
pub mod order;
