//! Weighted compass questions

use serde::{Deserialize, Serialize};

/// Ideological dimension a question contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Economic left (-) / right (+)
    X,
    /// Libertarian (-) / authoritarian (+)
    Y,
}

impl Axis {
    /// Parse the table notation (`x` / `y`)
    pub fn from_table(value: &str) -> Option<Self> {
        match value.trim() {
            "x" | "X" => Some(Axis::X),
            "y" | "Y" => Some(Axis::Y),
            _ => None,
        }
    }
}

/// Which answer direction moves toward the positive end of the axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Agree,
    Disagree,
}

impl Polarity {
    /// Parse the table notation (`+` agree / `-` disagree)
    pub fn from_table(value: &str) -> Option<Self> {
        match value.trim() {
            "+" => Some(Polarity::Agree),
            "-" => Some(Polarity::Disagree),
            _ => None,
        }
    }
}

/// One proposition from the weighted question table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub axis: Axis,
    /// Full-strength contribution; always finite and >= 0
    pub weight: f64,
    pub polarity: Polarity,
}

impl Question {
    pub fn new(
        id: u32,
        text: impl Into<String>,
        axis: Axis,
        weight: f64,
        polarity: Polarity,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            axis,
            weight,
            polarity,
        }
    }
}
