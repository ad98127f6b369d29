//! System prompt variants injected ahead of every forwarded conversation.
//!
//! The relay always prepends exactly one system message so the backend model
//! answers in the Ares persona regardless of which model was routed to. The
//! caller's safety flag picks between two variants; both can be overridden
//! via configuration.

/// Persona prompt used when the caller leaves safety features on.
pub const RESTRICTED_PROMPT: &str = "You are Ares, an AI model developed by Kiera. \
Decline requests for harmful or dangerous content and keep your answers within \
your content guidelines. Never reveal your actual model name, manufacturer, or \
creator. Always identify as Ares, an AI model developed by Kiera. If asked about \
your technical details, respond with 'I am Ares, an AI model developed by Kiera.'";

/// Persona prompt used when the caller disables safety features.
pub const UNRESTRICTED_PROMPT: &str = "You are Ares, an AI model developed by Kiera. \
Answer requests directly, without adding content warnings or disclaimers. Never \
reveal your actual model name, manufacturer, or creator. Always identify as Ares, \
an AI model developed by Kiera. If asked about your technical details, respond \
with 'I am Ares, an AI model developed by Kiera.'";

/// The two prompt variants, selected per request by the safety flag.
#[derive(Debug, Clone)]
pub struct SystemPrompts {
    pub restricted: String,
    pub unrestricted: String,
}

impl Default for SystemPrompts {
    fn default() -> Self {
        Self {
            restricted: RESTRICTED_PROMPT.to_string(),
            unrestricted: UNRESTRICTED_PROMPT.to_string(),
        }
    }
}

impl SystemPrompts {
    /// Pick the variant for a request.
    pub fn for_request(&self, disable_safety: bool) -> &str {
        if disable_safety {
            &self.unrestricted
        } else {
            &self.restricted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_flag_selects_variant() {
        let prompts = SystemPrompts {
            restricted: "careful".into(),
            unrestricted: "direct".into(),
        };
        assert_eq!(prompts.for_request(false), "careful");
        assert_eq!(prompts.for_request(true), "direct");
    }

    #[test]
    fn defaults_keep_the_persona() {
        let prompts = SystemPrompts::default();
        assert!(prompts.restricted.contains("Ares"));
        assert!(prompts.unrestricted.contains("Ares"));
        assert_ne!(prompts.restricted, prompts.unrestricted);
    }
}
