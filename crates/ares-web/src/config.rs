//! Environment-driven relay configuration.
//!
//! Everything the relay needs at runtime comes from `ARES_*` environment
//! variables read once at startup. Missing values are carried as `None` and
//! surface as configuration errors on the requests that need them; the
//! server itself always starts, so an operator can fix the environment
//! without a crash loop. Tests construct [`ProxyConfig`] directly instead of
//! going through the environment.

use ares_core::ModelMap;

use crate::prompt::{self, SystemPrompts};

/// Relay configuration, immutable after startup.
#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    /// Base URL of the upstream completion API (`ARES_UPSTREAM_URL`).
    pub upstream_url: Option<String>,
    /// Task-to-model routing table (`ARES_MODEL_CODE` / `_MATH` /
    /// `_CREATIVE` / `_GENERAL`).
    pub models: ModelMap,
    /// System prompt pair selected by the safety flag
    /// (`ARES_SYSTEM_PROMPT` / `ARES_SYSTEM_PROMPT_UNRESTRICTED`).
    pub prompts: SystemPrompts,
}

impl ProxyConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok();
        Self {
            upstream_url: var("ARES_UPSTREAM_URL"),
            models: ModelMap {
                code: var("ARES_MODEL_CODE"),
                math: var("ARES_MODEL_MATH"),
                creative: var("ARES_MODEL_CREATIVE"),
                general: var("ARES_MODEL_GENERAL"),
            },
            prompts: SystemPrompts {
                restricted: var("ARES_SYSTEM_PROMPT")
                    .unwrap_or_else(|| prompt::RESTRICTED_PROMPT.to_string()),
                unrestricted: var("ARES_SYSTEM_PROMPT_UNRESTRICTED")
                    .unwrap_or_else(|| prompt::UNRESTRICTED_PROMPT.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_prompts_but_no_routing() {
        let config = ProxyConfig::default();
        assert!(config.upstream_url.is_none());
        assert!(config.models.general.is_none());
        assert!(!config.prompts.restricted.is_empty());
        assert!(!config.prompts.unrestricted.is_empty());
    }
}
