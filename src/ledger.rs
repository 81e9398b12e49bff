//! Account ledger: per-account cash balances plus an append-only transaction
//! log. Testable without HTTP or a database.
//!
//! Each mutation (balance check + update + audit append) runs as one critical
//! section under the ledger write lock, so two concurrent withdrawals cannot
//! both read the same stale balance.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ApiError;
use crate::types::account::{Account, AccountType, TransType, Transaction};

pub type SharedLedger = Arc<RwLock<Ledger>>;

/// Outcome of a successful deposit or withdrawal, including the audit record
/// appended with it.
#[derive(Debug, Clone, PartialEq)]
pub struct CashMutation {
    pub account_id: Uuid,
    pub amount: Decimal,
    pub previous_balance: Decimal,
    pub new_balance: Decimal,
    pub record: Transaction,
}

impl CashMutation {
    /// Signed balance delta for durable write-through: positive when cash
    /// comes in, negative when it goes out.
    pub fn signed_delta(&self) -> Decimal {
        match self.record.trans_type {
            TransType::Deposit | TransType::Sell => self.amount,
            TransType::Withdraw | TransType::Buy => -self.amount,
        }
    }
}

#[derive(Debug, Default)]
pub struct Ledger {
    accounts: HashMap<Uuid, Account>,
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an account as-is (hydration from the database at startup).
    pub fn insert_account(&mut self, account: Account) {
        self.accounts.insert(account.account_id, account);
    }

    /// Create an account with a zero balance. Account-type strings are
    /// validated at the API edge; here the type is already a closed enum.
    pub fn create_account(
        &mut self,
        user_id: Uuid,
        account_name: &str,
        account_type: AccountType,
    ) -> Result<Account, ApiError> {
        if account_name.trim().is_empty() {
            return Err(ApiError::Validation("accountName is required".to_string()));
        }
        let account = Account {
            account_id: Uuid::new_v4(),
            user_id,
            account_name: account_name.to_string(),
            account_type,
            cash_balance: Decimal::ZERO,
            is_default: false,
            created_at: Utc::now(),
        };
        self.accounts.insert(account.account_id, account.clone());
        Ok(account)
    }

    /// Add to the balance and append a DEPOSIT transaction.
    pub fn deposit(
        &mut self,
        account_id: Uuid,
        amount: Decimal,
        description: Option<&str>,
    ) -> Result<CashMutation, ApiError> {
        validate_amount(amount)?;
        let account = self
            .accounts
            .get_mut(&account_id)
            .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

        let previous_balance = account.cash_balance;
        account.cash_balance += amount;
        let new_balance = account.cash_balance;
        let user_id = account.user_id;

        let record = self.append_transaction(
            user_id,
            account_id,
            TransType::Deposit,
            amount,
            description.unwrap_or("Cash deposit"),
        );
        Ok(CashMutation {
            account_id,
            amount,
            previous_balance,
            new_balance,
            record,
        })
    }

    /// Subtract from the balance and append a WITHDRAW transaction. Fails
    /// without mutating anything when the balance would go negative.
    pub fn withdraw(
        &mut self,
        account_id: Uuid,
        amount: Decimal,
        description: Option<&str>,
    ) -> Result<CashMutation, ApiError> {
        validate_amount(amount)?;
        let account = self
            .accounts
            .get_mut(&account_id)
            .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

        if amount > account.cash_balance {
            return Err(ApiError::InsufficientFunds(account.cash_balance));
        }

        let previous_balance = account.cash_balance;
        account.cash_balance -= amount;
        let new_balance = account.cash_balance;
        let user_id = account.user_id;

        let record = self.append_transaction(
            user_id,
            account_id,
            TransType::Withdraw,
            amount,
            description.unwrap_or("Cash withdrawal"),
        );
        Ok(CashMutation {
            account_id,
            amount,
            previous_balance,
            new_balance,
            record,
        })
    }

    fn append_transaction(
        &mut self,
        user_id: Uuid,
        account_id: Uuid,
        trans_type: TransType,
        cost: Decimal,
        description: &str,
    ) -> Transaction {
        let record = Transaction {
            trans_id: Uuid::new_v4(),
            user_id,
            account_id,
            asset_id: None,
            trans_type,
            date: Utc::now(),
            units: None,
            price_per_unit: None,
            cost,
            description: description.to_string(),
        };
        self.transactions.push(record.clone());
        record
    }

    pub fn get_account(&self, account_id: Uuid) -> Option<&Account> {
        self.accounts.get(&account_id)
    }

    /// Accounts for a user, default account first, then by name.
    pub fn accounts_for_user(&self, user_id: Uuid) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then_with(|| a.account_name.cmp(&b.account_name))
        });
        accounts
    }

    /// Canonical cash figure: the sum across all of a user's accounts,
    /// explicitly not derived from portfolio holdings.
    pub fn total_cash(&self, user_id: Uuid) -> Decimal {
        self.accounts
            .values()
            .filter(|a| a.user_id == user_id)
            .map(|a| a.cash_balance)
            .sum()
    }

    pub fn transactions_for_account(&self, account_id: Uuid) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect()
    }
}

fn validate_amount(amount: Decimal) -> Result<(), ApiError> {
    if amount <= Decimal::ZERO {
        return Err(ApiError::Validation(
            "Amount must be a positive number".to_string(),
        ));
    }
    Ok(())
}
