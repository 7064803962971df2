//! # teller-rs
//!
//! Demo banking agent with an instrumented LLM pipeline.
//!
//! The banking side is deliberately trivial — CRUD over an in-memory store.
//! The point of the crate is the observability layer around each completion
//! call: GenAI-convention trace spans, token and cost estimates, request and
//! error metrics, and business events for every processed query and every
//! piece of user feedback.

pub mod agent;
pub mod config;
pub mod error;
pub mod feedback;
pub mod llm;
pub mod model;
pub mod store;
pub mod telemetry;
