//! The banking agent: intent classification and per-intent dispatch.
//!
//! Every request runs a fixed two-phase state machine: one model call to
//! classify the query into an [`Intent`], then one handler for that intent
//! which may make a second model call to phrase the answer. Handlers that
//! need an account short-circuit with a canned message when the account
//! number is missing or unknown, so no completion call is wasted on a
//! request that cannot succeed.
//!
//! All model calls go through [`BankingAgent::traced_complete`], which wraps
//! the provider in an [`LlmCall`] instrumentation context and a bounded
//! timeout. The agent itself holds no mutable state and is safe to share.

use crate::error::{Error, Result};
use crate::llm::{ChatProvider, CompletionOptions, ProviderRegistry};
use crate::model::{AgentRequest, AgentResponse, Intent, ResponseStatus};
use crate::store::BankStore;
use crate::telemetry::genai::{CallOutcome, LlmTelemetry};
use crate::telemetry::request::{
    record_business_event, record_failure, record_intent, record_status, start_request_span,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

pub mod prompts;

/// Tunables for the agent's completion calls.
#[derive(Debug, Clone)]
pub struct AgentOptions {
    pub temperature: f32,
    /// Upper bound on any single completion call. A provider that stalls
    /// past this fails the call instead of hanging the request.
    pub completion_timeout: Duration,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            completion_timeout: Duration::from_secs(30),
        }
    }
}

pub struct BankingAgent {
    providers: Arc<ProviderRegistry>,
    bank: Arc<dyn BankStore>,
    telemetry: Arc<LlmTelemetry>,
    options: AgentOptions,
}

impl BankingAgent {
    pub fn new(
        providers: Arc<ProviderRegistry>,
        bank: Arc<dyn BankStore>,
        telemetry: Arc<LlmTelemetry>,
    ) -> Self {
        Self::with_options(providers, bank, telemetry, AgentOptions::default())
    }

    pub fn with_options(
        providers: Arc<ProviderRegistry>,
        bank: Arc<dyn BankStore>,
        telemetry: Arc<LlmTelemetry>,
        options: AgentOptions,
    ) -> Self {
        Self {
            providers,
            bank,
            telemetry,
            options,
        }
    }

    /// Process one customer request end to end.
    ///
    /// Never returns an `Err`: every failure becomes an error-status
    /// [`AgentResponse`] the caller can show to the customer. A blank query
    /// is answered with guidance directly, before any span or model call.
    pub async fn process_request(
        &self,
        request: &AgentRequest,
        provider_key: &str,
    ) -> AgentResponse {
        if request.query.trim().is_empty() {
            return AgentResponse::error(
                "Please tell me what you would like to do, for example check your \
                 balance or view recent transactions.",
                provider_key,
            );
        }

        let span = start_request_span(provider_key, request.account_number.as_deref());

        let result = self
            .handle_request(request, provider_key, &span)
            .instrument(span.clone())
            .await;

        match result {
            Ok(response) => response,
            Err(e) => {
                record_failure(&span, &e.to_string());
                AgentResponse::error(
                    format!(
                        "I apologize, but I encountered an error processing your request: {e}"
                    ),
                    provider_key,
                )
            }
        }
    }

    async fn handle_request(
        &self,
        request: &AgentRequest,
        provider_key: &str,
        span: &tracing::Span,
    ) -> Result<AgentResponse> {
        let provider = self.providers.get(provider_key)?;
        let account = request.account_number.as_deref();

        let label = self
            .traced_complete(
                &provider,
                "classify_intent",
                &prompts::classification(&request.query, account, request.context.as_deref()),
                "DETERMINE_INTENT",
                account,
            )
            .await?;
        let intent = Intent::from_label(&label);
        record_intent(span, intent);
        tracing::info!(%intent, raw_label = %label.trim(), "query classified");

        let response = match intent {
            Intent::CheckBalance => self.check_balance(request, &provider).await?,
            Intent::ViewTransactions => self.view_transactions(request, &provider).await?,
            Intent::AccountInfo => self.account_info(request, &provider).await?,
            // Money movement is not performed from free-text queries; those
            // intents get the conversational path, which explains next steps.
            Intent::Deposit | Intent::Withdrawal | Intent::Transfer | Intent::GeneralInquiry => {
                self.general_inquiry(request, intent, &provider).await?
            }
        };

        record_status(span, response.status);
        record_business_event(
            "banking_request_processed",
            &[
                ("provider", provider.name()),
                ("intent", intent.as_str()),
                ("status", response.status.as_str()),
                ("account", account.unwrap_or("none")),
            ],
        );
        Ok(response)
    }

    async fn check_balance(
        &self,
        request: &AgentRequest,
        provider: &Arc<dyn ChatProvider>,
    ) -> Result<AgentResponse> {
        let Some(account_number) = request.account_number.as_deref() else {
            return Ok(AgentResponse::error(
                "To check your balance, please provide your account number.",
                provider.name(),
            ));
        };
        let Some(account) = self.bank.account(account_number) else {
            return Ok(AgentResponse::error(
                "Account not found. Please verify your account number.",
                provider.name(),
            ));
        };

        let message = self
            .traced_complete(
                provider,
                "generate_response",
                &prompts::balance_inquiry(&account),
                Intent::CheckBalance.as_str(),
                Some(account_number),
            )
            .await?;
        Ok(AgentResponse::success(
            message,
            serde_json::to_value(&account).ok(),
            provider.name(),
        ))
    }

    async fn view_transactions(
        &self,
        request: &AgentRequest,
        provider: &Arc<dyn ChatProvider>,
    ) -> Result<AgentResponse> {
        let Some(account_number) = request.account_number.as_deref() else {
            return Ok(AgentResponse::error(
                "To view your transactions, please provide your account number.",
                provider.name(),
            ));
        };
        if self.bank.account(account_number).is_none() {
            return Ok(AgentResponse::error(
                "Account not found. Please verify your account number.",
                provider.name(),
            ));
        }

        let transactions = self.bank.transactions(account_number);
        if transactions.is_empty() {
            return Ok(AgentResponse::success(
                "No transactions found for this account.",
                None,
                provider.name(),
            ));
        }

        let message = self
            .traced_complete(
                provider,
                "generate_response",
                &prompts::transaction_summary(account_number, &transactions),
                Intent::ViewTransactions.as_str(),
                Some(account_number),
            )
            .await?;
        let recent: Vec<_> = transactions
            .iter()
            .take(prompts::RECENT_TRANSACTION_LIMIT)
            .collect();
        Ok(AgentResponse::success(
            message,
            serde_json::to_value(&recent).ok(),
            provider.name(),
        ))
    }

    async fn account_info(
        &self,
        request: &AgentRequest,
        provider: &Arc<dyn ChatProvider>,
    ) -> Result<AgentResponse> {
        let Some(account_number) = request.account_number.as_deref() else {
            return Ok(AgentResponse::error(
                "To view your account information, please provide your account number.",
                provider.name(),
            ));
        };
        let Some(account) = self.bank.account(account_number) else {
            return Ok(AgentResponse::error(
                "Account not found. Please verify your account number.",
                provider.name(),
            ));
        };

        let message = self
            .traced_complete(
                provider,
                "generate_response",
                &prompts::account_info(&account),
                Intent::AccountInfo.as_str(),
                Some(account_number),
            )
            .await?;
        Ok(AgentResponse::success(
            message,
            serde_json::to_value(&account).ok(),
            provider.name(),
        ))
    }

    async fn general_inquiry(
        &self,
        request: &AgentRequest,
        intent: Intent,
        provider: &Arc<dyn ChatProvider>,
    ) -> Result<AgentResponse> {
        let message = self
            .traced_complete(
                provider,
                "generate_response",
                &prompts::general_inquiry(&request.query, request.context.as_deref()),
                intent.as_str(),
                request.account_number.as_deref(),
            )
            .await?;
        Ok(AgentResponse::success(message, None, provider.name()))
    }

    /// One instrumented completion call: span, prompt/completion attributes,
    /// token and cost estimates, request/error counters, and the bounded
    /// timeout, wrapped around the raw provider call.
    async fn traced_complete(
        &self,
        provider: &Arc<dyn ChatProvider>,
        operation: &str,
        prompt: &str,
        intent: &str,
        account: Option<&str>,
    ) -> Result<String> {
        let mut call = self
            .telemetry
            .start_call(provider.name(), provider.model(), operation);
        call.record_prompt(prompt, Some(self.options.temperature), None);
        call.record_domain_context(intent, account);

        let options = CompletionOptions {
            temperature: self.options.temperature,
            max_tokens: None,
        };
        let outcome = tokio::time::timeout(
            self.options.completion_timeout,
            provider
                .complete(prompt, &options)
                .instrument(call.span().clone()),
        )
        .await;

        match outcome {
            Ok(Ok(text)) => {
                call.record_completion(&text, "stop");
                call.finish(CallOutcome::Success);
                Ok(text)
            }
            Ok(Err(e)) => {
                call.finish(CallOutcome::Error(e.to_string()));
                Err(e)
            }
            Err(_) => {
                let e = Error::Provider(format!(
                    "completion call timed out after {:?}",
                    self.options.completion_timeout
                ));
                call.finish(CallOutcome::Error(e.to_string()));
                Err(e)
            }
        }
    }
}
