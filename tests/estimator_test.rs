use teller_rs::telemetry::estimate::{
    CostEstimate, estimate_cost, estimate_tokens, normalize_provider,
};

#[test]
fn token_estimate_is_length_over_four() {
    assert_eq!(estimate_tokens(""), 0);
    assert_eq!(estimate_tokens("abc"), 0);
    assert_eq!(estimate_tokens("abcd"), 1);
    assert_eq!(estimate_tokens("hello world!"), 3);
    assert_eq!(estimate_tokens(&"a".repeat(4000)), 1000);
}

#[test]
fn token_estimate_is_monotonic_in_length() {
    let mut previous = 0;
    for len in 0..200 {
        let tokens = estimate_tokens(&"x".repeat(len));
        assert!(tokens >= previous);
        previous = tokens;
    }
}

#[test]
fn ollama_calls_are_always_free() {
    for (prompt, completion) in [(0, 0), (1, 1), (500, 1000), (1_000_000, 1_000_000)] {
        let cost = estimate_cost("ollama", prompt, completion);
        assert_eq!(cost, CostEstimate::FREE);
        assert_eq!(cost.total(), 0.0);
    }
}

#[test]
fn unknown_providers_are_free() {
    assert_eq!(estimate_cost("mistral-local", 5000, 5000), CostEstimate::FREE);
    assert_eq!(estimate_cost("", 5000, 5000), CostEstimate::FREE);
}

#[test]
fn openai_costs_follow_gpt4_list_prices() {
    let cost = estimate_cost("openai", 1000, 1000);
    assert!((cost.prompt_usd - 0.03).abs() < 1e-12);
    assert!((cost.completion_usd - 0.06).abs() < 1e-12);
    assert!((cost.total() - 0.09).abs() < 1e-12);

    // Scales linearly with token counts.
    let half = estimate_cost("openai", 500, 500);
    assert!((half.total() - 0.045).abs() < 1e-12);
}

#[test]
fn gemini_costs_follow_gemini_pro_list_prices() {
    let cost = estimate_cost("gemini", 2000, 4000);
    assert!((cost.prompt_usd - 0.0005).abs() < 1e-12);
    assert!((cost.completion_usd - 0.002).abs() < 1e-12);
}

#[test]
fn provider_lookup_is_case_insensitive() {
    assert_eq!(
        estimate_cost("OpenAI", 1000, 1000),
        estimate_cost("openai", 1000, 1000)
    );
}

#[test]
fn provider_names_normalize_for_the_backend() {
    assert_eq!(normalize_provider("gemini"), "google");
    assert_eq!(normalize_provider("GEMINI"), "google");
    assert_eq!(normalize_provider("OpenAI"), "openai");
    assert_eq!(normalize_provider("ollama"), "ollama");
    assert_eq!(normalize_provider("anything-else"), "anything-else");
}
