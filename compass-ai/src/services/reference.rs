//! Reference URL resolver
//!
//! One model call for the person's English Wikipedia page. The reply is kept
//! only when it has the canonical prefix; anything else leaves the URL unset.

use std::sync::Arc;

use super::model_client::{ChatPrompt, ModelClient, ModelError};

pub const REFERENCE_PREFIX: &str = "https://en.wikipedia.org/wiki/";

const SYSTEM_PROMPT: &str =
    "You provide Wikipedia URLs for notable people. Return ONLY the full English Wikipedia URL, nothing else.";

pub struct ReferenceResolver {
    client: Arc<dyn ModelClient>,
}

impl ReferenceResolver {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Resolve the reference URL; call failures propagate
    pub async fn resolve(&self, name: &str) -> Result<Option<String>, ModelError> {
        let reply = self.client.complete(&Self::prompt(name)).await?;
        let url = accept_reference(&reply);
        if url.is_none() {
            tracing::warn!(name = %name, reply = %reply.trim(), "Rejected reference URL reply");
        }
        Ok(url)
    }

    pub fn prompt(name: &str) -> ChatPrompt {
        ChatPrompt {
            system: SYSTEM_PROMPT.to_string(),
            user: format!(
                "What is the English Wikipedia URL for \"{}\"? Return ONLY the URL.",
                name
            ),
            temperature: 0.1,
            max_tokens: 100,
        }
    }
}

/// Trimmed reply if it starts with the canonical prefix
pub fn accept_reference(reply: &str) -> Option<String> {
    let trimmed = reply.trim();
    trimmed
        .starts_with(REFERENCE_PREFIX)
        .then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_canonical_url() {
        assert_eq!(
            accept_reference(" https://en.wikipedia.org/wiki/Ayn_Rand\n"),
            Some("https://en.wikipedia.org/wiki/Ayn_Rand".to_string())
        );
    }

    #[test]
    fn test_rejects_other_replies() {
        assert_eq!(accept_reference("I'm not sure"), None);
        assert_eq!(accept_reference("http://en.wikipedia.org/wiki/Ayn_Rand"), None);
        assert_eq!(accept_reference("https://de.wikipedia.org/wiki/Ayn_Rand"), None);
        assert_eq!(accept_reference("See https://en.wikipedia.org/wiki/Ayn_Rand"), None);
        assert_eq!(accept_reference(""), None);
    }
}
