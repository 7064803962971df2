//! Agent request/response surface and the intent vocabulary.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request / Response
// ---------------------------------------------------------------------------

/// One inbound customer query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentRequest {
    pub account_number: Option<String>,
    pub operation_type: Option<String>,
    /// Natural-language query. Required; a blank query short-circuits to a
    /// guidance response without touching the model.
    pub query: String,
    /// Additional free-text context for the classifier.
    pub context: Option<String>,
}

impl AgentRequest {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn account(mut self, account_number: impl Into<String>) -> Self {
        self.account_number = Some(account_number.into());
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Outcome of one processed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Natural-language answer for the customer.
    pub message: String,
    /// Structured payload backing the answer (account, transactions, ...).
    pub data: Option<serde_json::Value>,
    pub status: ResponseStatus,
    /// Provider key that served (or would have served) the request.
    pub provider_used: String,
}

impl AgentResponse {
    pub fn success(
        message: impl Into<String>,
        data: Option<serde_json::Value>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            data,
            status: ResponseStatus::Success,
            provider_used: provider.into(),
        }
    }

    pub fn error(message: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            status: ResponseStatus::Error,
            provider_used: provider.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Error,
    Pending,
}

impl ResponseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseStatus::Success => "SUCCESS",
            ResponseStatus::Error => "ERROR",
            ResponseStatus::Pending => "PENDING",
        }
    }
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// Classified purpose of a customer query.
///
/// Closed vocabulary: labels outside the set fall back to
/// [`Intent::GeneralInquiry`] rather than failing — an unrecognized label
/// from the classifier is an expected outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    CheckBalance,
    ViewTransactions,
    Deposit,
    Withdrawal,
    Transfer,
    AccountInfo,
    GeneralInquiry,
}

impl Intent {
    /// Parse a raw classifier label. Trims and upper-cases before matching;
    /// anything unrecognized resolves to `GeneralInquiry`.
    pub fn from_label(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "CHECK_BALANCE" => Intent::CheckBalance,
            "VIEW_TRANSACTIONS" => Intent::ViewTransactions,
            "DEPOSIT" => Intent::Deposit,
            "WITHDRAWAL" => Intent::Withdrawal,
            "TRANSFER" => Intent::Transfer,
            "ACCOUNT_INFO" => Intent::AccountInfo,
            _ => Intent::GeneralInquiry,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::CheckBalance => "CHECK_BALANCE",
            Intent::ViewTransactions => "VIEW_TRANSACTIONS",
            Intent::Deposit => "DEPOSIT",
            Intent::Withdrawal => "WITHDRAWAL",
            Intent::Transfer => "TRANSFER",
            Intent::AccountInfo => "ACCOUNT_INFO",
            Intent::GeneralInquiry => "GENERAL_INQUIRY",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
