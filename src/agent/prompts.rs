//! Fixed prompt templates for classification and response generation.

use crate::model::{Account, Transaction};

/// Upper bound on transactions embedded in the summary prompt. Fixed, not
/// configurable per call — bounds prompt size no matter how long the
/// history grows.
pub const RECENT_TRANSACTION_LIMIT: usize = 10;

/// The intent-classification prompt. The model is asked for exactly one
/// label from the closed vocabulary.
pub fn classification(query: &str, account_number: Option<&str>, context: Option<&str>) -> String {
    format!(
        "Analyze the following customer query and determine their intent.\n\
         Respond with ONLY ONE of these intents: CHECK_BALANCE, VIEW_TRANSACTIONS, \
         DEPOSIT, WITHDRAWAL, TRANSFER, ACCOUNT_INFO, GENERAL_INQUIRY\n\
         \n\
         Customer Query: {query}\n\
         Account Number: {}\n\
         Context: {}\n\
         \n\
         Intent:",
        account_number.unwrap_or("Not provided"),
        context.unwrap_or("None"),
    )
}

pub fn balance_inquiry(account: &Account) -> String {
    format!(
        "Generate a friendly, natural response for a customer balance inquiry.\n\
         \n\
         Account Number: {}\n\
         Account Type: {}\n\
         Current Balance: {:.2} {}\n\
         Account Status: {}\n\
         \n\
         Provide a helpful response that includes the balance information in a \
         conversational way.",
        account.account_number, account.account_type, account.balance, account.currency,
        account.status,
    )
}

/// Summary prompt for recent transactions. Embeds at most
/// [`RECENT_TRANSACTION_LIMIT`] entries; `transactions` is expected newest
/// first.
pub fn transaction_summary(account_number: &str, transactions: &[Transaction]) -> String {
    let mut lines = String::new();
    for t in transactions.iter().take(RECENT_TRANSACTION_LIMIT) {
        let description = t
            .description
            .as_deref()
            .map(|d| format!("({d}) "))
            .unwrap_or_default();
        lines.push_str(&format!(
            "- {}: {:.2} {} {}on {}\n",
            t.kind,
            t.amount,
            t.currency,
            description,
            t.transaction_date.format("%Y-%m-%d %H:%M"),
        ));
    }

    format!(
        "Generate a friendly summary of the customer's recent transactions.\n\
         \n\
         Account Number: {account_number}\n\
         Total Transactions: {}\n\
         Recent Transactions (last {RECENT_TRANSACTION_LIMIT}):\n\
         {lines}\n\
         Provide a helpful summary in a conversational way.",
        transactions.len(),
    )
}

pub fn account_info(account: &Account) -> String {
    format!(
        "Generate a comprehensive summary of the customer's account information.\n\
         \n\
         Account Number: {}\n\
         Customer Name: {}\n\
         Account Type: {}\n\
         Balance: {:.2} {}\n\
         Status: {}\n\
         Created: {}\n\
         \n\
         Provide a helpful summary in a conversational, professional manner.",
        account.account_number,
        account.customer_name,
        account.account_type,
        account.balance,
        account.currency,
        account.status,
        account.created_at.format("%Y-%m-%d"),
    )
}

pub fn general_inquiry(query: &str, context: Option<&str>) -> String {
    format!(
        "You are a helpful banking assistant. Answer the following customer question:\n\
         \n\
         Question: {query}\n\
         Context: {}\n\
         \n\
         Provide a helpful, accurate, and professional response about banking \
         services, policies, or general information.\n\
         If the question requires account-specific information, politely ask for \
         the account number.",
        context.unwrap_or("General banking inquiry"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TransactionStatus, TransactionType};
    use chrono::Utc;
    use uuid::Uuid;

    fn txn(n: usize) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            account_number: "ACC001".to_string(),
            kind: TransactionType::Deposit,
            amount: n as f64,
            currency: "USD".to_string(),
            destination_account: None,
            description: None,
            status: TransactionStatus::Completed,
            balance_after: 1000.0 + n as f64,
            transaction_date: Utc::now(),
        }
    }

    #[test]
    fn summary_embeds_at_most_ten_transactions() {
        let transactions: Vec<_> = (0..15).map(txn).collect();
        let prompt = transaction_summary("ACC001", &transactions);
        let lines = prompt.lines().filter(|l| l.starts_with("- ")).count();
        assert_eq!(lines, 10);
        // Total count still reflects the full history.
        assert!(prompt.contains("Total Transactions: 15"));
    }

    #[test]
    fn summary_with_short_history_embeds_everything() {
        let transactions: Vec<_> = (0..3).map(txn).collect();
        let prompt = transaction_summary("ACC001", &transactions);
        let lines = prompt.lines().filter(|l| l.starts_with("- ")).count();
        assert_eq!(lines, 3);
    }

    #[test]
    fn classification_embeds_query_and_defaults() {
        let prompt = classification("What is my balance?", None, None);
        assert!(prompt.contains("What is my balance?"));
        assert!(prompt.contains("Account Number: Not provided"));
        assert!(prompt.contains("Context: None"));
    }
}
