//! teller CLI — demo front end for the banking agent.

use clap::{Parser, Subcommand};
use std::sync::Arc;
use teller_rs::agent::{AgentOptions, BankingAgent};
use teller_rs::config::Config;
use teller_rs::feedback::FeedbackRecorder;
use teller_rs::llm::{OllamaProvider, OpenAiProvider, ProviderRegistry};
use teller_rs::model::ResponseStatus;
use teller_rs::store::InMemoryBank;
use teller_rs::telemetry::genai::LlmTelemetry;
use teller_rs::telemetry::metrics::AgentMetrics;
use teller_rs::telemetry::{TelemetryConfig, init_telemetry};

#[derive(Parser)]
#[command(name = "teller", about = "LLM-backed banking assistant")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask the banking agent a question
    Ask {
        /// Natural-language query
        query: String,
        /// Account number, if the question is account-specific
        #[arg(long)]
        account: Option<String>,
        /// Provider key (falls back to the default provider when unknown)
        #[arg(long)]
        provider: Option<String>,
        /// Extra context passed to the classifier
        #[arg(long)]
        context: Option<String>,
    },
    /// List the seeded demo accounts
    Accounts,
    /// Submit satisfaction feedback for a previous session
    Feedback {
        /// Session identifier the feedback refers to
        #[arg(long)]
        session: String,
        /// Provider that served the session
        #[arg(long, default_value = "ollama")]
        provider: String,
        /// Intent the session was classified as
        #[arg(long, default_value = "GENERAL_INQUIRY")]
        intent: String,
        /// Satisfaction score, either 0..1 or 1..5 stars
        #[arg(long)]
        score: f64,
        /// Optional free-text comment
        #[arg(long)]
        comment: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "teller".to_string(),
    })?;

    let metrics = Arc::new(AgentMetrics::new(&guard.meter()));
    let telemetry = Arc::new(LlmTelemetry::new(Arc::clone(&metrics)));

    let registry = Arc::new(ProviderRegistry::new(&config.default_provider));
    registry.register(Arc::new(OllamaProvider::new(
        &config.ollama_url,
        &config.ollama_model,
    )));
    if let Some(key) = config.openai_api_key.clone() {
        registry.register(Arc::new(OpenAiProvider::new(key, &config.openai_model)));
    }

    let bank = Arc::new(InMemoryBank::seeded());
    let mut exit_code = 0;

    match cli.command {
        Command::Ask {
            query,
            account,
            provider,
            context,
        } => {
            let agent = BankingAgent::with_options(
                registry,
                bank,
                Arc::clone(&telemetry),
                AgentOptions {
                    completion_timeout: config.completion_timeout,
                    ..AgentOptions::default()
                },
            );

            let mut request = teller_rs::model::AgentRequest::query(query);
            request.account_number = account;
            request.context = context;

            let provider_key = provider.unwrap_or_else(|| config.default_provider.clone());
            let response = agent.process_request(&request, &provider_key).await;

            println!("[{}] via {}", response.status, response.provider_used);
            println!("{}", response.message);
            if let Some(data) = response.data {
                println!("---\n{}", serde_json::to_string_pretty(&data)?);
            }
            if response.status == ResponseStatus::Error {
                exit_code = 1;
            }
        }
        Command::Accounts => {
            for account in bank.accounts() {
                println!(
                    "{}  {:<16} {:<12} {:>12.2} {}  {}",
                    account.account_number,
                    account.customer_name,
                    account.account_type.to_string(),
                    account.balance,
                    account.currency,
                    account.status,
                );
            }
        }
        Command::Feedback {
            session,
            provider,
            intent,
            score,
            comment,
        } => {
            let recorder = FeedbackRecorder::new(Arc::clone(&metrics));
            recorder.record_satisfaction(&teller_rs::model::SatisfactionReport {
                session_id: session,
                account_number: None,
                provider,
                intent,
                score,
                feedback: comment,
                was_helpful: None,
                was_accurate: None,
                submitted_at: chrono::Utc::now(),
            });
            println!("Feedback recorded. Thank you!");
        }
    }

    guard.force_flush();
    if exit_code != 0 {
        // process::exit skips destructors; shut the pipelines down first so
        // the failed request's spans and metrics still reach the backend.
        drop(guard);
        std::process::exit(exit_code);
    }
    Ok(())
}
