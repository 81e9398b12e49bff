//! Account ledger tests: create, deposit, withdraw, listing, invariants.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rust_portfolio::error::ApiError;
use rust_portfolio::ledger::Ledger;
use rust_portfolio::types::account::{Account, AccountType, TransType};
use uuid::Uuid;

fn funded_account(ledger: &mut Ledger, user_id: Uuid, balance: Decimal) -> Uuid {
    let account = ledger
        .create_account(user_id, "Main", AccountType::Checking)
        .unwrap();
    if balance > Decimal::ZERO {
        ledger.deposit(account.account_id, balance, None).unwrap();
    }
    account.account_id
}

#[test]
fn create_account_starts_at_zero_not_default() {
    let mut ledger = Ledger::new();
    let user_id = Uuid::new_v4();
    let account = ledger
        .create_account(user_id, "Brokerage", AccountType::Brokerage)
        .unwrap();

    assert_eq!(account.user_id, user_id);
    assert_eq!(account.cash_balance, Decimal::ZERO);
    assert!(!account.is_default);
    assert_eq!(account.account_type, AccountType::Brokerage);
}

#[test]
fn create_account_blank_name_rejected() {
    let mut ledger = Ledger::new();
    let err = ledger
        .create_account(Uuid::new_v4(), "   ", AccountType::Checking)
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[test]
fn deposit_updates_balance_and_appends_audit_record() {
    let mut ledger = Ledger::new();
    let account_id = funded_account(&mut ledger, Uuid::new_v4(), Decimal::ZERO);

    let mutation = ledger.deposit(account_id, dec!(100), Some("payday")).unwrap();
    assert_eq!(mutation.previous_balance, Decimal::ZERO);
    assert_eq!(mutation.new_balance, dec!(100));
    assert_eq!(mutation.record.trans_type, TransType::Deposit);
    assert_eq!(mutation.record.cost, dec!(100));
    assert_eq!(mutation.record.description, "payday");
    // Write-through applies this as a relative update, so it must carry sign.
    assert_eq!(mutation.signed_delta(), dec!(100));

    let account = ledger.get_account(account_id).unwrap();
    assert_eq!(account.cash_balance, dec!(100));
}

#[test]
fn deposit_rejects_non_positive_amounts() {
    let mut ledger = Ledger::new();
    let account_id = funded_account(&mut ledger, Uuid::new_v4(), Decimal::ZERO);

    for amount in [Decimal::ZERO, dec!(-5)] {
        let err = ledger.deposit(account_id, amount, None).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
    assert!(ledger.transactions_for_account(account_id).is_empty());
}

#[test]
fn deposit_unknown_account_not_found() {
    let mut ledger = Ledger::new();
    let err = ledger.deposit(Uuid::new_v4(), dec!(10), None).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn withdraw_more_than_balance_fails_without_mutation() {
    let mut ledger = Ledger::new();
    let account_id = funded_account(&mut ledger, Uuid::new_v4(), dec!(100));

    let err = ledger.withdraw(account_id, dec!(150), None).unwrap_err();
    assert!(matches!(err, ApiError::InsufficientFunds(_)));
    assert_eq!(
        err.to_string(),
        "Insufficient funds. Available balance: $100"
    );

    // Balance untouched, only the funding deposit on record.
    let account = ledger.get_account(account_id).unwrap();
    assert_eq!(account.cash_balance, dec!(100));
    assert_eq!(ledger.transactions_for_account(account_id).len(), 1);
}

#[test]
fn withdraw_within_balance_succeeds() {
    let mut ledger = Ledger::new();
    let account_id = funded_account(&mut ledger, Uuid::new_v4(), dec!(100));

    let mutation = ledger.withdraw(account_id, dec!(50), None).unwrap();
    assert_eq!(mutation.previous_balance, dec!(100));
    assert_eq!(mutation.new_balance, dec!(50));
    assert_eq!(mutation.record.trans_type, TransType::Withdraw);
    assert_eq!(mutation.record.cost, dec!(50));
    assert_eq!(mutation.signed_delta(), dec!(-50));

    assert_eq!(ledger.get_account(account_id).unwrap().cash_balance, dec!(50));
}

#[test]
fn deposit_then_withdraw_round_trips_with_two_records() {
    let mut ledger = Ledger::new();
    let account_id = funded_account(&mut ledger, Uuid::new_v4(), Decimal::ZERO);

    ledger.deposit(account_id, dec!(75), None).unwrap();
    ledger.withdraw(account_id, dec!(75), None).unwrap();

    assert_eq!(ledger.get_account(account_id).unwrap().cash_balance, Decimal::ZERO);
    let records = ledger.transactions_for_account(account_id);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].trans_type, TransType::Deposit);
    assert_eq!(records[1].trans_type, TransType::Withdraw);
}

#[test]
fn withdraw_can_never_leave_balance_negative() {
    let mut ledger = Ledger::new();
    let account_id = funded_account(&mut ledger, Uuid::new_v4(), dec!(30));

    for amount in [dec!(31), dec!(1000), dec!(30.01)] {
        assert!(ledger.withdraw(account_id, amount, None).is_err());
    }
    ledger.withdraw(account_id, dec!(30), None).unwrap();
    assert_eq!(ledger.get_account(account_id).unwrap().cash_balance, Decimal::ZERO);
}

#[test]
fn accounts_for_user_sorted_default_first_then_name() {
    let mut ledger = Ledger::new();
    let user_id = Uuid::new_v4();

    let beta = ledger
        .create_account(user_id, "Beta", AccountType::Savings)
        .unwrap();
    let alpha = ledger
        .create_account(user_id, "Alpha", AccountType::Checking)
        .unwrap();
    // The default flag only comes from hydration in this slice.
    ledger.insert_account(Account {
        is_default: true,
        ..ledger.get_account(beta.account_id).unwrap().clone()
    });
    // Another user's account must not leak in.
    ledger
        .create_account(Uuid::new_v4(), "Other", AccountType::Checking)
        .unwrap();

    let accounts = ledger.accounts_for_user(user_id);
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].account_id, beta.account_id);
    assert_eq!(accounts[1].account_id, alpha.account_id);
}

#[test]
fn total_cash_sums_across_accounts() {
    let mut ledger = Ledger::new();
    let user_id = Uuid::new_v4();
    let a = funded_account(&mut ledger, user_id, dec!(10));
    let b = funded_account(&mut ledger, user_id, dec!(25.50));
    funded_account(&mut ledger, Uuid::new_v4(), dec!(999));

    assert_ne!(a, b);
    assert_eq!(ledger.total_cash(user_id), dec!(35.50));
}
