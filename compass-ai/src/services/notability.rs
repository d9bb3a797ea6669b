//! Notability gate
//!
//! One model call deciding whether a name is documented well enough to be
//! placed on the compass. Only an exact `YES` (after trim/uppercase) passes.

use std::sync::Arc;

use super::model_client::{ChatPrompt, ModelClient, ModelError};

const AFFIRMATIVE: &str = "YES";

const SYSTEM_PROMPT: &str = "You are evaluating if a person is well-known enough to be placed on a political compass. \
A person is notable if they are well-documented in Wikipedia and other sources. \
This includes philosophers, writers, artists, scientists, business leaders, celebrities, historical figures, etc. - not just politicians. \
Answer ONLY with 'YES' or 'NO'.";

pub struct NotabilityGate {
    client: Arc<dyn ModelClient>,
}

impl NotabilityGate {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Ask the model once; call failures propagate
    pub async fn is_notable(&self, name: &str) -> Result<bool, ModelError> {
        let reply = self.client.complete(&Self::prompt(name)).await?;
        let notable = is_affirmative(&reply);
        tracing::info!(name = %name, reply = %reply.trim(), notable, "Notability checked");
        Ok(notable)
    }

    pub fn prompt(name: &str) -> ChatPrompt {
        ChatPrompt {
            system: SYSTEM_PROMPT.to_string(),
            user: format!(
                "Is \"{}\" a well-known person (from any field) who is documented enough in Wikipedia and other sources \
                 to infer their philosophical and political views? Answer ONLY 'YES' or 'NO'.",
                name
            ),
            temperature: 0.1,
            max_tokens: 10,
        }
    }
}

/// Exact affirmative check; partial matches such as `YES.` do not count
pub fn is_affirmative(reply: &str) -> bool {
    reply.trim().to_uppercase() == AFFIRMATIVE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("YES"));
        assert!(is_affirmative("  yes\n"));
        assert!(is_affirmative("Yes"));

        assert!(!is_affirmative("NO"));
        assert!(!is_affirmative("YES."));
        assert!(!is_affirmative("Yes, definitely"));
        assert!(!is_affirmative(""));
    }

    #[test]
    fn test_prompt_mentions_name() {
        let prompt = NotabilityGate::prompt("Noam Chomsky");
        assert!(prompt.user.contains("\"Noam Chomsky\""));
        assert_eq!(prompt.max_tokens, 10);
    }
}
