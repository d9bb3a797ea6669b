//! Scoring engine
//!
//! One model call per question, in table order. Each reply becomes a signed
//! strike on the question's axis. A failed call contributes nothing and the
//! loop moves on; one bad question never voids the run.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::model_client::{ChatPrompt, ModelClient};
use super::progress::ProgressReporter;
use crate::models::{AnswerSymbol, Axis, Question};

/// Running per-axis totals for one run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreAccumulator {
    pub x: f64,
    pub y: f64,
}

impl ScoreAccumulator {
    pub fn add(&mut self, axis: Axis, strike: f64) {
        match axis {
            Axis::X => self.x += strike,
            Axis::Y => self.y += strike,
        }
    }
}

/// Outcome of a scoring loop
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreSummary {
    pub totals: ScoreAccumulator,
    /// Questions whose reply was used (including defaulted replies)
    pub answered: usize,
    /// Questions skipped because the model call failed
    pub failed: usize,
    /// Replies that did not parse and were counted as `Disagree`
    pub defaulted: usize,
}

pub struct ScoringEngine {
    client: Arc<dyn ModelClient>,
}

impl ScoringEngine {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Score `name` against every question
    ///
    /// Emits one progress step before each call. Stops early only when
    /// `cancel` fires; the caller checks the token afterwards.
    pub async fn score(
        &self,
        name: &str,
        questions: &[Question],
        progress: &mut ProgressReporter<'_>,
        cancel: &CancellationToken,
    ) -> ScoreSummary {
        let mut summary = ScoreSummary::default();
        let count = questions.len();

        for (i, question) in questions.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::info!(name = %name, processed = i, "Scoring cancelled");
                break;
            }

            progress.step(format!("Processing question {} of {}", i + 1, count));

            let reply = match self.client.complete(&Self::prompt(name, question)).await {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::warn!(
                        question_id = question.id,
                        error = %e,
                        "Question failed, skipping"
                    );
                    summary.failed += 1;
                    continue;
                }
            };

            let parsed = AnswerSymbol::parse(&reply);
            if !parsed.recognized {
                tracing::warn!(
                    question_id = question.id,
                    reply = %reply.trim(),
                    "Unrecognised answer, defaulting to {}",
                    AnswerSymbol::DEFAULT
                );
                summary.defaulted += 1;
            }

            let strike = parsed.symbol.strike_for(question);
            summary.totals.add(question.axis, strike);
            summary.answered += 1;

            tracing::debug!(
                question_id = question.id,
                answer = %parsed.symbol,
                strike,
                x = summary.totals.x,
                y = summary.totals.y,
                "Question scored"
            );
        }

        summary
    }

    pub fn prompt(name: &str, question: &Question) -> ChatPrompt {
        ChatPrompt {
            system: format!(
                "You are answering a political compass question on behalf of {name} based on their documented political views and positions.\n\
                 \n\
                 Choose the most accurate answer:\n\
                 ++ (strongly agree) - Use only when {name} would have an extreme, uncompromising position on this issue\n\
                 + (agree) - Use when {name} would generally agree but might have some nuance or exceptions\n\
                 - (disagree) - Use when {name} would generally disagree but might see some merit in the opposing view\n\
                 -- (strongly disagree) - Use only when {name} would fundamentally oppose this with no room for compromise\n\
                 \n\
                 Most answers should be + or - unless the person had extreme views on that specific issue.\n\
                 Respond with ONLY the symbol, nothing else.",
                name = name
            ),
            user: format!(
                "How would {} answer this question:\n\"{}\"\n\nAnswer with only ++, +, -, or --",
                name, question.text
            ),
            temperature: 0.5,
            max_tokens: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_routes_by_axis() {
        let mut acc = ScoreAccumulator::default();
        acc.add(Axis::X, 2.0);
        acc.add(Axis::Y, -1.5);
        acc.add(Axis::X, -4.0);
        assert_eq!(acc, ScoreAccumulator { x: -2.0, y: -1.5 });
    }

    #[test]
    fn test_prompt_contains_question_and_name() {
        let question = Question::new(
            7,
            "The rich are too highly taxed.",
            Axis::X,
            2.0,
            crate::models::Polarity::Agree,
        );
        let prompt = ScoringEngine::prompt("Milton Friedman", &question);
        assert!(prompt.user.contains("\"The rich are too highly taxed.\""));
        assert!(prompt.system.contains("on behalf of Milton Friedman"));
        assert_eq!(prompt.temperature, 0.5);
    }
}
