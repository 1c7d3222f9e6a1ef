use crate::prompts::{FLEXIBLE_INSTRUCTIONS, STRICT_INSTRUCTIONS};
use std::env;

pub const DEFAULT_MODEL: &str = "o3";

/// Which instruction document the per-request agent is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPolicy {
    /// Official-site-only answers, verified to carry an actual document.
    Strict,
    /// Also allows search-engine results, aggregator hubs and social pages.
    Flexible,
}

impl PromptPolicy {
    pub fn instructions(self) -> &'static str {
        match self {
            PromptPolicy::Strict => STRICT_INSTRUCTIONS,
            PromptPolicy::Flexible => FLEXIBLE_INSTRUCTIONS,
        }
    }
}

/// Process-wide configuration, read once at startup and immutable afterwards.
/// Credentials may be absent here when the deployment expects them per-request.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub firecrawl_api_key: Option<String>,
    pub model: String,
    pub policy: PromptPolicy,
}

impl AppConfig {
    pub fn from_env(flexible: bool) -> Self {
        Self {
            openai_api_key: non_empty(env::var("OPENAI_API_KEY").ok()),
            firecrawl_api_key: non_empty(env::var("FIRECRAWL_API_KEY").ok()),
            model: non_empty(env::var("MEDIA_KIT_MODEL").ok())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            policy: if flexible {
                PromptPolicy::Flexible
            } else {
                PromptPolicy::Strict
            },
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
