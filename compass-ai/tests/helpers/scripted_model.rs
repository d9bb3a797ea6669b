//! Scripted model client
//!
//! Answers each prompt from a fixed script and records which kind of
//! prompt it saw, in order.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use compass_ai::services::{ChatPrompt, ModelClient, ModelError};

/// Which pipeline stage a prompt belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Notability,
    Question,
    Reference,
}

impl PromptKind {
    pub fn of(prompt: &ChatPrompt) -> Self {
        if prompt.system.contains("well-known enough") {
            PromptKind::Notability
        } else if prompt.system.contains("Wikipedia URLs") {
            PromptKind::Reference
        } else {
            PromptKind::Question
        }
    }
}

/// Scripted reply
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail,
}

impl Reply {
    pub fn text(value: &str) -> Self {
        Reply::Text(value.to_string())
    }

    fn into_result(self) -> Result<String, ModelError> {
        match self {
            Reply::Text(text) => Ok(text),
            Reply::Fail => Err(ModelError::Network("connection refused".to_string())),
        }
    }
}

pub struct ScriptedModel {
    notability: Reply,
    answers: Mutex<VecDeque<Reply>>,
    default_answer: Reply,
    reference: Reply,
    question_delay: Option<Duration>,
    calls: Mutex<Vec<PromptKind>>,
}

impl ScriptedModel {
    /// Notable, answers `+` to everything, resolves a valid reference
    pub fn new() -> Self {
        Self {
            notability: Reply::text("YES"),
            answers: Mutex::new(VecDeque::new()),
            default_answer: Reply::text("+"),
            reference: Reply::text("https://en.wikipedia.org/wiki/Test_Person"),
            question_delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn notability(mut self, reply: Reply) -> Self {
        self.notability = reply;
        self
    }

    /// Replies for the first questions, in order; later questions get the default
    pub fn answers(self, replies: Vec<Reply>) -> Self {
        *self.answers.lock().unwrap() = replies.into();
        self
    }

    pub fn default_answer(mut self, reply: Reply) -> Self {
        self.default_answer = reply;
        self
    }

    pub fn reference(mut self, reply: Reply) -> Self {
        self.reference = reply;
        self
    }

    /// Sleep before answering each question prompt
    pub fn question_delay(mut self, delay: Duration) -> Self {
        self.question_delay = Some(delay);
        self
    }

    /// Prompt kinds seen so far
    pub fn calls(&self) -> Vec<PromptKind> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, kind: PromptKind) -> usize {
        self.calls().into_iter().filter(|k| *k == kind).count()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ModelError> {
        let kind = PromptKind::of(prompt);
        self.calls.lock().unwrap().push(kind);

        if let (PromptKind::Question, Some(delay)) = (kind, self.question_delay) {
            tokio::time::sleep(delay).await;
        }

        let reply = match kind {
            PromptKind::Notability => self.notability.clone(),
            PromptKind::Reference => self.reference.clone(),
            PromptKind::Question => self
                .answers
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.default_answer.clone()),
        };
        reply.into_result()
    }
}
