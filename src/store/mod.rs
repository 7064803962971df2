//! In-memory account and transaction store.
//!
//! Stands in for a real persistence layer. One `RwLock` guards accounts
//! and the transaction log
//! together so transfers stay atomic; reads clone out, so many concurrent
//! requests can look up accounts while one mutates.

use crate::error::{Error, Result};
use crate::model::{
    Account, AccountStatus, AccountType, Transaction, TransactionStatus, TransactionType,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Read access to accounts and transaction history, as the agent sees it.
pub trait BankStore: Send + Sync {
    fn account(&self, account_number: &str) -> Option<Account>;

    /// Transaction history for one account, newest first.
    fn transactions(&self, account_number: &str) -> Vec<Transaction>;
}

struct Inner {
    accounts: HashMap<String, Account>,
    /// Append-only log, oldest first.
    transactions: Vec<Transaction>,
}

pub struct InMemoryBank {
    inner: RwLock<Inner>,
}

impl InMemoryBank {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                accounts: HashMap::new(),
                transactions: Vec::new(),
            }),
        }
    }

    /// A bank pre-loaded with the five demo accounts.
    pub fn seeded() -> Self {
        let bank = Self::new();
        let seeds = [
            ("ACC001", "John Doe", "john.doe@example.com", AccountType::Checking, 5000.00),
            ("ACC002", "Jane Smith", "jane.smith@example.com", AccountType::Savings, 15000.00),
            ("ACC003", "Bob Johnson", "bob.johnson@example.com", AccountType::Checking, 3500.50),
            ("ACC004", "Alice Williams", "alice.williams@example.com", AccountType::Investment, 25000.00),
            ("ACC005", "Charlie Brown", "charlie.brown@example.com", AccountType::Savings, 8750.25),
        ];
        for (number, name, email, kind, balance) in seeds {
            // Seed accounts are fresh; open_account cannot collide here.
            let _ = bank.open_account(number, name, email, kind, balance);
        }
        info!("seeded {} demo accounts", bank.accounts().len());
        bank
    }

    pub fn open_account(
        &self,
        account_number: &str,
        customer_name: &str,
        email: &str,
        account_type: AccountType,
        opening_balance: f64,
    ) -> Result<Account> {
        if opening_balance < 0.0 {
            return Err(Error::Validation(
                "opening balance must not be negative".to_string(),
            ));
        }
        let mut inner = self.inner.write().expect("bank lock poisoned");
        if inner.accounts.contains_key(account_number) {
            return Err(Error::Validation(format!(
                "account number already exists: {account_number}"
            )));
        }
        let now = Utc::now();
        let account = Account {
            account_number: account_number.to_string(),
            customer_name: customer_name.to_string(),
            email: email.to_string(),
            account_type,
            balance: opening_balance,
            currency: "USD".to_string(),
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        };
        inner
            .accounts
            .insert(account_number.to_string(), account.clone());
        debug!(account = account_number, customer = customer_name, "account opened");
        Ok(account)
    }

    pub fn deposit(
        &self,
        account_number: &str,
        amount: f64,
        description: Option<&str>,
    ) -> Result<Transaction> {
        if amount <= 0.0 {
            return Err(Error::Validation(
                "deposit amount must be positive".to_string(),
            ));
        }
        let mut inner = self.inner.write().expect("bank lock poisoned");
        let txn = apply(&mut inner, account_number, amount, TransactionType::Deposit, None, description)?;
        info!(account = account_number, amount, "deposit recorded");
        Ok(txn)
    }

    pub fn withdraw(
        &self,
        account_number: &str,
        amount: f64,
        description: Option<&str>,
    ) -> Result<Transaction> {
        if amount <= 0.0 {
            return Err(Error::Validation(
                "withdrawal amount must be positive".to_string(),
            ));
        }
        let mut inner = self.inner.write().expect("bank lock poisoned");
        let txn = apply(&mut inner, account_number, -amount, TransactionType::Withdrawal, None, description)?;
        info!(account = account_number, amount, "withdrawal recorded");
        Ok(txn)
    }

    /// Move funds between two accounts. Recorded as a withdrawal-typed
    /// Transfer on the source plus a deposit on the destination, both under
    /// one lock so no reader observes the funds in flight.
    pub fn transfer(
        &self,
        from: &str,
        to: &str,
        amount: f64,
        description: Option<&str>,
    ) -> Result<Transaction> {
        if amount <= 0.0 {
            return Err(Error::Validation(
                "transfer amount must be positive".to_string(),
            ));
        }
        if from == to {
            return Err(Error::Validation(
                "cannot transfer to the same account".to_string(),
            ));
        }
        let mut inner = self.inner.write().expect("bank lock poisoned");
        if !inner.accounts.contains_key(to) {
            return Err(Error::NotFound(to.to_string()));
        }
        let mut out = apply(
            &mut inner,
            from,
            -amount,
            TransactionType::Transfer,
            Some(to),
            description.or(Some("Transfer")),
        )?;
        apply(
            &mut inner,
            to,
            amount,
            TransactionType::Deposit,
            None,
            Some(&format!("Transfer from {from}")),
        )?;
        out.destination_account = Some(to.to_string());
        info!(from, to, amount, "transfer completed");
        Ok(out)
    }

    pub fn accounts(&self) -> Vec<Account> {
        let inner = self.inner.read().expect("bank lock poisoned");
        let mut accounts: Vec<_> = inner.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        accounts
    }
}

impl Default for InMemoryBank {
    fn default() -> Self {
        Self::new()
    }
}

impl BankStore for InMemoryBank {
    fn account(&self, account_number: &str) -> Option<Account> {
        let inner = self.inner.read().expect("bank lock poisoned");
        inner.accounts.get(account_number).cloned()
    }

    fn transactions(&self, account_number: &str) -> Vec<Transaction> {
        let inner = self.inner.read().expect("bank lock poisoned");
        inner
            .transactions
            .iter()
            .filter(|t| t.account_number == account_number)
            .rev()
            .cloned()
            .collect()
    }
}

/// Apply a signed delta to one account and append the transaction record.
/// Caller holds the write lock and has validated the amount's sign.
fn apply(
    inner: &mut Inner,
    account_number: &str,
    delta: f64,
    kind: TransactionType,
    destination: Option<&str>,
    description: Option<&str>,
) -> Result<Transaction> {
    let account = inner
        .accounts
        .get_mut(account_number)
        .ok_or_else(|| Error::NotFound(account_number.to_string()))?;
    let new_balance = account.balance + delta;
    if new_balance < 0.0 {
        return Err(Error::Validation("insufficient funds".to_string()));
    }
    account.balance = new_balance;
    account.updated_at = Utc::now();
    let txn = Transaction {
        id: Uuid::new_v4(),
        account_number: account_number.to_string(),
        kind,
        amount: delta.abs(),
        currency: account.currency.clone(),
        destination_account: destination.map(str::to_string),
        description: description.map(str::to_string),
        status: TransactionStatus::Completed,
        balance_after: new_balance,
        transaction_date: Utc::now(),
    };
    inner.transactions.push(txn.clone());
    Ok(txn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_and_withdraw_update_balance_and_history() {
        let bank = InMemoryBank::seeded();
        bank.deposit("ACC001", 250.0, Some("payday")).unwrap();
        bank.withdraw("ACC001", 100.0, None).unwrap();

        let account = bank.account("ACC001").unwrap();
        assert!((account.balance - 5150.0).abs() < 1e-9);

        let history = bank.transactions("ACC001");
        assert_eq!(history.len(), 2);
        // Newest first.
        assert_eq!(history[0].kind, TransactionType::Withdrawal);
        assert_eq!(history[1].kind, TransactionType::Deposit);
        assert!((history[1].balance_after - 5250.0).abs() < 1e-9);
    }

    #[test]
    fn withdrawal_rejects_insufficient_funds() {
        let bank = InMemoryBank::seeded();
        let err = bank.withdraw("ACC003", 1_000_000.0, None).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        // Balance untouched.
        assert!((bank.account("ACC003").unwrap().balance - 3500.50).abs() < 1e-9);
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let bank = InMemoryBank::seeded();
        assert!(matches!(bank.deposit("ACC001", 0.0, None), Err(Error::Validation(_))));
        assert!(matches!(bank.withdraw("ACC001", -5.0, None), Err(Error::Validation(_))));
    }

    #[test]
    fn transfer_moves_funds_and_tags_destination() {
        let bank = InMemoryBank::seeded();
        let txn = bank.transfer("ACC002", "ACC001", 500.0, None).unwrap();
        assert_eq!(txn.kind, TransactionType::Transfer);
        assert_eq!(txn.destination_account.as_deref(), Some("ACC001"));
        assert!((bank.account("ACC002").unwrap().balance - 14500.0).abs() < 1e-9);
        assert!((bank.account("ACC001").unwrap().balance - 5500.0).abs() < 1e-9);
    }

    #[test]
    fn transfer_to_missing_destination_leaves_source_untouched() {
        let bank = InMemoryBank::seeded();
        let err = bank.transfer("ACC002", "ACC999", 500.0, None).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!((bank.account("ACC002").unwrap().balance - 15000.0).abs() < 1e-9);
        assert!(bank.transactions("ACC002").is_empty());
    }

    #[test]
    fn unknown_account_is_not_found() {
        let bank = InMemoryBank::new();
        assert!(bank.account("ACC404").is_none());
        assert!(matches!(
            bank.deposit("ACC404", 10.0, None),
            Err(Error::NotFound(_))
        ));
    }
}
