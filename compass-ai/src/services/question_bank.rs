//! Weighted question table
//!
//! Loaded once at startup and shared read-only across all pipeline runs.
//! Rows look like `"12","Proposition text","x","3.5","+"`; the first line is
//! a header. Malformed rows are dropped with a warning.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

use crate::models::{Axis, Polarity, Question};

fn row_pattern() -> &'static Regex {
    static ROW: OnceLock<Regex> = OnceLock::new();
    ROW.get_or_init(|| {
        Regex::new(r#"^"(\d+)","([^"]+)","([^"]+)","([^"]+)","([^"]+)""#)
            .expect("question row pattern is valid")
    })
}

/// Immutable ordered list of questions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Read and parse the table at `path`
    pub fn load(path: &Path) -> compass_common::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            compass_common::Error::Config(format!(
                "Failed to read question table {}: {}",
                path.display(),
                e
            ))
        })?;

        let bank = Self::from_csv_str(&content);
        info!(
            path = %path.display(),
            questions = bank.len(),
            "Question table loaded"
        );
        Ok(bank)
    }

    /// Parse table text, skipping the header line
    pub fn from_csv_str(content: &str) -> Self {
        let questions = content
            .lines()
            .enumerate()
            .skip(1)
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| {
                let parsed = parse_row(line.trim());
                if parsed.is_none() {
                    warn!(line = index + 1, row = %line, "Dropping malformed question row");
                }
                parsed
            })
            .collect();

        Self { questions }
    }

    /// All questions in table order
    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn parse_row(line: &str) -> Option<Question> {
    let caps = row_pattern().captures(line)?;

    let id = caps[1].parse::<u32>().ok()?;
    let text = caps[2].trim();
    let axis = Axis::from_table(&caps[3])?;
    let weight = caps[4].trim().parse::<f64>().ok()?;
    let polarity = Polarity::from_table(&caps[5])?;

    if text.is_empty() || !weight.is_finite() || weight < 0.0 {
        return None;
    }

    Some(Question::new(id, text, axis, weight, polarity))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = r#""id","question","axis","units","agree""#;

    #[test]
    fn test_parses_rows_in_order() {
        let csv = format!(
            "{}\n{}\n{}\n",
            HEADER,
            r#""1","If economic globalisation is inevitable, it should primarily serve humanity.","x","3.5","-""#,
            r#""2","Our race has many superior qualities.","y","2","+""#,
        );

        let bank = QuestionBank::from_csv_str(&csv);
        assert_eq!(bank.len(), 2);

        let first = &bank.all()[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.axis, Axis::X);
        assert_eq!(first.weight, 3.5);
        assert_eq!(first.polarity, Polarity::Disagree);

        let second = &bank.all()[1];
        assert_eq!(second.id, 2);
        assert_eq!(second.axis, Axis::Y);
        assert_eq!(second.polarity, Polarity::Agree);
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(QuestionBank::from_csv_str(HEADER).is_empty());
        assert!(QuestionBank::from_csv_str("").is_empty());
    }

    #[test]
    fn test_malformed_rows_are_dropped() {
        let csv = [
            HEADER,
            r#""1","Valid.","x","1.0","+""#,
            r#""2","Bad axis.","z","1.0","+""#,
            r#""3","Bad weight.","y","heavy","+""#,
            r#""4","Bad polarity.","y","1.0","?""#,
            r#""5","Negative weight.","y","-2","+""#,
            r#"6,Unquoted,x,1,+"#,
            "",
            r#""7","Also valid.","y","0","-""#,
        ]
        .join("\n");

        let bank = QuestionBank::from_csv_str(&csv);
        let ids: Vec<u32> = bank.all().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 7]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let csv = format!("{}\r\n{}\r\n", HEADER, r#""9","Windows row.","x","2","+""#);
        let bank = QuestionBank::from_csv_str(&csv);
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.all()[0].text, "Windows row.");
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = QuestionBank::load(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, compass_common::Error::Config(_)));
    }

    #[test]
    fn test_shipped_table_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("data/political_compass_question-weights.csv");
        let bank = QuestionBank::load(&path).unwrap();
        assert!(!bank.is_empty());
        assert!(bank.all().iter().any(|q| q.axis == Axis::X));
        assert!(bank.all().iter().any(|q| q.axis == Axis::Y));
    }
}
