//! Core data model.
//!
//! Banking records, the agent request/response surface, and feedback
//! submissions. Everything here is plain data; behavior lives in the
//! store and the agent.

pub mod banking;
pub mod feedback;
pub mod request;

pub use banking::{Account, AccountStatus, AccountType, Transaction, TransactionStatus, TransactionType};
pub use feedback::SatisfactionReport;
pub use request::{AgentRequest, AgentResponse, Intent, ResponseStatus};
