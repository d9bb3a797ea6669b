//! Services for compass-ai

pub mod finalizer;
pub mod model_client;
pub mod notability;
pub mod person_store;
pub mod pipeline;
pub mod progress;
pub mod question_bank;
pub mod reference;
pub mod scoring;

pub use finalizer::finalize;
pub use model_client::{ChatPrompt, ModelClient, ModelError, OllamaClient};
pub use notability::NotabilityGate;
pub use person_store::{PersonStore, StoreError};
pub use pipeline::{Pipeline, PipelineError, PipelineState};
pub use progress::{ChannelSink, CollectingSink, ProgressReporter, ProgressSink};
pub use question_bank::QuestionBank;
pub use reference::ReferenceResolver;
pub use scoring::{ScoreAccumulator, ScoreSummary, ScoringEngine};
