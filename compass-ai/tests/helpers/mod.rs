//! Test Helper Utilities
//!
//! Shared utilities for testing compass-ai

#![allow(dead_code)]

pub mod db_utils;
pub mod scripted_model;

pub use db_utils::{create_memory_db, create_seeded_db, stored_names};
pub use scripted_model::{PromptKind, Reply, ScriptedModel};

use compass_ai::models::{Axis, Polarity, Question};
use compass_ai::services::QuestionBank;

/// Question bank with `count` questions alternating between X and Y
///
/// Every question has weight 2.0 and `Agree` polarity.
pub fn question_bank(count: u32) -> QuestionBank {
    let questions = (1..=count)
        .map(|id| {
            let axis = if id % 2 == 1 { Axis::X } else { Axis::Y };
            Question::new(id, format!("Proposition {}", id), axis, 2.0, Polarity::Agree)
        })
        .collect();
    QuestionBank::new(questions)
}
