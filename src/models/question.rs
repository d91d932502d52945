// src/models/question.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 10;
pub const MAX_OPTION_LEN: usize = 500;

/// A persisted question, answer key included.
/// Only ever serialized for the quiz's creator or inside a graded result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub text: String,

    /// Display options in their authored order.
    pub options: Vec<String>,

    /// Text of the correct option. Always one of `options`.
    pub correct_answer: String,

    /// 1-based position within the quiz.
    pub order: i32,
}

/// DTO for sending a question to a quiz taker (excludes the answer key).
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub text: String,
    pub options: Vec<String>,
    pub order: i32,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            text: q.text.clone(),
            options: q.options.clone(),
            order: q.order,
        }
    }
}

/// The correct answer as sent by the authoring client.
/// Either the option text itself or a 0-based index into `options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Index(usize),
    Text(String),
}

impl AnswerKey {
    /// Resolves the key to the option text it designates, if any.
    pub fn resolve<'a>(&self, options: &'a [String]) -> Option<&'a str> {
        match self {
            AnswerKey::Index(idx) => options.get(*idx).map(String::as_str),
            AnswerKey::Text(text) => options.iter().find(|o| *o == text).map(String::as_str),
        }
    }
}

/// DTO for one question inside a create-quiz request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000, message = "Question text must be between 1 and 1000 characters."))]
    pub text: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    pub correct_answer: AnswerKey,
}

/// A validated question ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub order: i32,
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() < MIN_OPTIONS {
        return Err(validator::ValidationError::new("too_few_options"));
    }
    if options.len() > MAX_OPTIONS {
        return Err(validator::ValidationError::new("too_many_options"));
    }

    let mut seen = HashSet::new();
    for opt in options {
        if opt.trim().is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_blank"));
        }
        if opt.chars().count() > MAX_OPTION_LEN {
            return Err(validator::ValidationError::new("option_too_long"));
        }
        if !seen.insert(opt.as_str()) {
            return Err(validator::ValidationError::new("duplicate_option"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn answer_key_resolves_by_index_or_text() {
        let options = opts(&["Paris", "Rome"]);
        assert_eq!(AnswerKey::Index(1).resolve(&options), Some("Rome"));
        assert_eq!(AnswerKey::Text("Paris".into()).resolve(&options), Some("Paris"));
        assert_eq!(AnswerKey::Index(2).resolve(&options), None);
        assert_eq!(AnswerKey::Text("paris".into()).resolve(&options), None);
    }

    #[test]
    fn answer_key_deserializes_from_number_or_string() {
        let idx: AnswerKey = serde_json::from_str("0").unwrap();
        let text: AnswerKey = serde_json::from_str("\"4\"").unwrap();
        assert_eq!(idx, AnswerKey::Index(0));
        assert_eq!(text, AnswerKey::Text("4".into()));
        assert!(serde_json::from_str::<AnswerKey>("-1").is_err());
    }

    #[test]
    fn options_must_be_distinct_and_non_blank() {
        assert!(validate_options(&opts(&["A", "B"])).is_ok());
        assert!(validate_options(&opts(&["A"])).is_err());
        assert!(validate_options(&opts(&["A", "A"])).is_err());
        assert!(validate_options(&opts(&["A", "  "])).is_err());
    }

    #[test]
    fn public_question_has_no_answer_key() {
        let q = Question {
            id: 7,
            quiz_id: 1,
            text: "2+2?".into(),
            options: opts(&["3", "4"]),
            correct_answer: "4".into(),
            order: 1,
        };
        let value = serde_json::to_value(PublicQuestion::from(&q)).unwrap();
        assert!(value.get("correctAnswer").is_none());
        assert_eq!(value["id"], 7);
        assert_eq!(value["order"], 1);
    }
}
