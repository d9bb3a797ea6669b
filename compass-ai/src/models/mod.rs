//! Data models for the person pipeline

pub mod answer;
pub mod person;
pub mod question;

pub use answer::{AnswerSymbol, ParsedAnswer};
pub use person::{NewPerson, Person, PersonRecord, MAX_NAME_CHARS};
pub use question::{Axis, Polarity, Question};
