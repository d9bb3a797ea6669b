//! Answer symbols and their signed contribution
//!
//! Model replies are untrusted text. Anything that is not one of the four
//! symbols (or their spelled-out names) falls back to `Disagree`.

use serde::{Deserialize, Serialize};

use super::question::{Polarity, Question};

/// Four-point answer scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerSymbol {
    StronglyAgree,
    Agree,
    Disagree,
    StronglyDisagree,
}

/// Result of parsing a raw model reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedAnswer {
    pub symbol: AnswerSymbol,
    /// False when the reply was unrecognised and `symbol` is the default
    pub recognized: bool,
}

impl AnswerSymbol {
    /// Symbol used for unparsable replies
    pub const DEFAULT: AnswerSymbol = AnswerSymbol::Disagree;

    pub const ALL: [AnswerSymbol; 4] = [
        AnswerSymbol::StronglyAgree,
        AnswerSymbol::Agree,
        AnswerSymbol::Disagree,
        AnswerSymbol::StronglyDisagree,
    ];

    /// Parse a raw reply
    ///
    /// Accepts `++ + - --` and the symbol names in any case, with spaces,
    /// underscores or hyphens between the words.
    pub fn parse(raw: &str) -> ParsedAnswer {
        let trimmed = raw.trim();

        let symbol = match trimmed {
            "++" => Some(AnswerSymbol::StronglyAgree),
            "+" => Some(AnswerSymbol::Agree),
            "-" => Some(AnswerSymbol::Disagree),
            "--" => Some(AnswerSymbol::StronglyDisagree),
            _ => {
                let words: String = trimmed
                    .chars()
                    .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
                    .flat_map(char::to_lowercase)
                    .collect();
                match words.as_str() {
                    "stronglyagree" => Some(AnswerSymbol::StronglyAgree),
                    "agree" => Some(AnswerSymbol::Agree),
                    "disagree" => Some(AnswerSymbol::Disagree),
                    "stronglydisagree" => Some(AnswerSymbol::StronglyDisagree),
                    _ => None,
                }
            }
        };

        match symbol {
            Some(symbol) => ParsedAnswer {
                symbol,
                recognized: true,
            },
            None => ParsedAnswer {
                symbol: Self::DEFAULT,
                recognized: false,
            },
        }
    }

    /// Wire notation used in prompts and logs
    pub fn as_symbol(&self) -> &'static str {
        match self {
            AnswerSymbol::StronglyAgree => "++",
            AnswerSymbol::Agree => "+",
            AnswerSymbol::Disagree => "-",
            AnswerSymbol::StronglyDisagree => "--",
        }
    }

    /// Side of the scale this answer sits on
    pub fn side(&self) -> Polarity {
        match self {
            AnswerSymbol::StronglyAgree | AnswerSymbol::Agree => Polarity::Agree,
            AnswerSymbol::Disagree | AnswerSymbol::StronglyDisagree => Polarity::Disagree,
        }
    }

    /// Fraction of the question weight this answer carries
    pub fn magnitude_fraction(&self) -> f64 {
        match self {
            AnswerSymbol::StronglyAgree | AnswerSymbol::StronglyDisagree => 1.0,
            AnswerSymbol::Agree | AnswerSymbol::Disagree => 0.5,
        }
    }

    /// Signed contribution for a question of the given weight and polarity
    ///
    /// Positive exactly when the answer's side matches the polarity.
    pub fn strike(&self, weight: f64, polarity: Polarity) -> f64 {
        let magnitude = weight * self.magnitude_fraction();
        if self.side() == polarity {
            magnitude
        } else {
            -magnitude
        }
    }

    /// Signed contribution for a specific question
    pub fn strike_for(&self, question: &Question) -> f64 {
        self.strike(question.weight, question.polarity)
    }
}

impl std::fmt::Display for AnswerSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_symbol())
    }
}
