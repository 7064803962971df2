//! Registry of available chat providers, keyed by lower-cased name.

use crate::error::{Error, Result};
use crate::llm::ChatProvider;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

pub struct ProviderRegistry {
    providers: RwLock<HashMap<String, Arc<dyn ChatProvider>>>,
    default_provider: String,
}

impl ProviderRegistry {
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
            default_provider: default_provider.into().to_lowercase(),
        }
    }

    pub fn register(&self, provider: Arc<dyn ChatProvider>) {
        let key = provider.name().to_lowercase();
        info!(provider = %key, model = provider.model(), "chat provider registered");
        self.providers
            .write()
            .expect("provider registry lock poisoned")
            .insert(key, provider);
    }

    /// Resolve a provider by key. Unknown keys fall back to the default
    /// provider (logged, not an error); failure only when nothing usable is
    /// registered at all.
    pub fn get(&self, key: &str) -> Result<Arc<dyn ChatProvider>> {
        let providers = self
            .providers
            .read()
            .expect("provider registry lock poisoned");
        let key = key.to_lowercase();
        if let Some(provider) = providers.get(&key) {
            return Ok(Arc::clone(provider));
        }
        if let Some(provider) = providers.get(&self.default_provider) {
            warn!(
                requested = %key,
                default = %self.default_provider,
                "provider not available, using default"
            );
            return Ok(Arc::clone(provider));
        }
        Err(Error::Config(
            "no chat providers registered".to_string(),
        ))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.providers
            .read()
            .expect("provider registry lock poisoned")
            .contains_key(&key.to_lowercase())
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .providers
            .read()
            .expect("provider registry lock poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::CompletionOptions;
    use async_trait::async_trait;

    struct StubProvider(&'static str);

    #[async_trait]
    impl ChatProvider for StubProvider {
        fn name(&self) -> &str {
            self.0
        }
        fn model(&self) -> &str {
            "stub-model"
        }
        async fn complete(&self, _prompt: &str, _options: &CompletionOptions) -> Result<String> {
            Ok("ok".to_string())
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = ProviderRegistry::new("ollama");
        registry.register(Arc::new(StubProvider("Ollama")));
        assert!(registry.contains("OLLAMA"));
        assert_eq!(registry.get("oLLaMa").unwrap().name(), "Ollama");
    }

    #[test]
    fn unknown_key_falls_back_to_default() {
        let registry = ProviderRegistry::new("ollama");
        registry.register(Arc::new(StubProvider("ollama")));
        let provider = registry.get("gemini").unwrap();
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn empty_registry_is_a_config_error() {
        let registry = ProviderRegistry::new("ollama");
        assert!(matches!(registry.get("ollama"), Err(Error::Config(_))));
    }
}
