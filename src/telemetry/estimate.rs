//! Token and cost estimation for LLM calls.
//!
//! These are deliberately crude approximations for observability — not a
//! tokenizer and not a billing system. Treat every number produced here as
//! an estimate, never as exact usage.

/// Estimated token count for a piece of text: one token per four bytes,
/// rounded down. Empty text is zero tokens.
pub fn estimate_tokens(text: &str) -> u64 {
    text.len() as u64 / 4
}

/// Estimated cost of one completion call, split by direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostEstimate {
    pub prompt_usd: f64,
    pub completion_usd: f64,
}

impl CostEstimate {
    pub const FREE: CostEstimate = CostEstimate {
        prompt_usd: 0.0,
        completion_usd: 0.0,
    };

    pub fn total(&self) -> f64 {
        self.prompt_usd + self.completion_usd
    }
}

/// Cost per 1000 tokens, separate prompt/completion rates.
struct Pricing {
    prompt_per_1k: f64,
    completion_per_1k: f64,
}

/// Static price table, approximate 2025 list prices. Self-hosted providers
/// have no entry and estimate to zero, as does anything unrecognized.
fn pricing_for(provider: &str) -> Option<Pricing> {
    match provider.to_lowercase().as_str() {
        // GPT-4 pricing
        "openai" => Some(Pricing {
            prompt_per_1k: 0.03,
            completion_per_1k: 0.06,
        }),
        // Gemini Pro pricing
        "gemini" => Some(Pricing {
            prompt_per_1k: 0.00025,
            completion_per_1k: 0.0005,
        }),
        _ => None,
    }
}

/// Estimate the cost of a call from its token counts. Deterministic, no
/// state, no network.
pub fn estimate_cost(provider: &str, prompt_tokens: u64, completion_tokens: u64) -> CostEstimate {
    match pricing_for(provider) {
        Some(pricing) => CostEstimate {
            prompt_usd: (prompt_tokens as f64 / 1000.0) * pricing.prompt_per_1k,
            completion_usd: (completion_tokens as f64 / 1000.0) * pricing.completion_per_1k,
        },
        None => CostEstimate::FREE,
    }
}

/// Map an internal provider key to the vocabulary the observability backend
/// expects. Unrecognized keys pass through lower-cased.
pub fn normalize_provider(provider: &str) -> String {
    let key = provider.to_lowercase();
    match key.as_str() {
        "gemini" => "google".to_string(),
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_zero_tokens() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn tokens_are_length_over_four_floored() {
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcdefg"), 1);
        assert_eq!(estimate_tokens("abcdefgh"), 2);
        assert_eq!(estimate_tokens(&"x".repeat(4000)), 1000);
    }

    #[test]
    fn self_hosted_providers_are_free() {
        for (p, c) in [(0, 0), (1, 1), (1000, 500), (1_000_000, 1_000_000)] {
            assert_eq!(estimate_cost("ollama", p, c), CostEstimate::FREE);
        }
    }

    #[test]
    fn unknown_providers_are_free() {
        assert_eq!(estimate_cost("llamafile", 5000, 5000), CostEstimate::FREE);
    }

    #[test]
    fn openai_uses_gpt4_rates() {
        let cost = estimate_cost("openai", 1000, 1000);
        assert!((cost.prompt_usd - 0.03).abs() < 1e-12);
        assert!((cost.completion_usd - 0.06).abs() < 1e-12);
        assert!((cost.total() - 0.09).abs() < 1e-12);
    }

    #[test]
    fn gemini_uses_gemini_pro_rates() {
        let cost = estimate_cost("GEMINI", 2000, 4000);
        assert!((cost.prompt_usd - 0.0005).abs() < 1e-12);
        assert!((cost.completion_usd - 0.002).abs() < 1e-12);
    }

    #[test]
    fn provider_normalization() {
        assert_eq!(normalize_provider("gemini"), "google");
        assert_eq!(normalize_provider("Gemini"), "google");
        assert_eq!(normalize_provider("OpenAI"), "openai");
        assert_eq!(normalize_provider("ollama"), "ollama");
        assert_eq!(normalize_provider("SomethingElse"), "somethingelse");
    }
}
