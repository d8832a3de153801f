//! Quiz structures.
//!
//! A quiz component is exactly one question with exactly four answer choices,
//! exactly one of which is marked correct. Generated either from model text
//! (parsed from a line-oriented format) or from the deterministic template
//! when generation fails.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Answer choices per question.
pub const CHOICE_COUNT: usize = 4;

/// One answer choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizChoice {
    pub text: String,
    pub correct: bool,
}

/// A single-question quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub question: String,
    pub choices: Vec<QuizChoice>,
}

/// Why model-produced quiz text was rejected.
#[derive(Debug, Error)]
pub enum QuizParseError {
    #[error("no question line found")]
    NoQuestion,
    #[error("found {0} answer choices, expected {CHOICE_COUNT}")]
    BadChoiceCount(usize),
    #[error("found {0} correct markers, expected exactly 1")]
    BadCorrectCount(usize),
}

impl Quiz {
    /// Parses the line format requested from the provider:
    ///
    /// ```text
    /// Q: What is a cell?
    /// A) A unit of life *
    /// B) A kind of rock
    /// C) A planet
    /// D) A language
    /// ```
    ///
    /// The `*` suffix marks the correct choice. Exactly four choices and one
    /// marker are required; anything else is an error the caller answers
    /// with [`Quiz::template`].
    pub fn parse(text: &str) -> Result<Self, QuizParseError> {
        let mut question = None;
        let mut choices = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if let Some(q) = line.strip_prefix("Q:").or_else(|| line.strip_prefix("Question:")) {
                if question.is_none() {
                    question = Some(q.trim().to_string());
                }
            } else if line.len() > 2 && line.as_bytes()[1] == b')' {
                let body = line[2..].trim();
                let correct = body.ends_with('*');
                let text = body.trim_end_matches('*').trim().to_string();
                if !text.is_empty() {
                    choices.push(QuizChoice { text, correct });
                }
            }
        }

        let question = question.filter(|q| !q.is_empty()).ok_or(QuizParseError::NoQuestion)?;
        if choices.len() != CHOICE_COUNT {
            return Err(QuizParseError::BadChoiceCount(choices.len()));
        }
        let correct_count = choices.iter().filter(|c| c.correct).count();
        if correct_count != 1 {
            return Err(QuizParseError::BadCorrectCount(correct_count));
        }
        Ok(Self { question, choices })
    }

    /// Fixed-structure fallback quiz about `topic`.
    pub fn template(topic: &str) -> Self {
        let topic = if topic.trim().is_empty() {
            "this topic"
        } else {
            topic.trim()
        };
        Self {
            question: format!("Which statement about {} is most accurate?", topic),
            choices: vec![
                QuizChoice {
                    text: format!("{} is covered in detail on this page", topic),
                    correct: true,
                },
                QuizChoice {
                    text: format!("{} is unrelated to this course", topic),
                    correct: false,
                },
                QuizChoice {
                    text: format!("{} has no practical applications", topic),
                    correct: false,
                },
                QuizChoice {
                    text: format!("{} cannot be studied further", topic),
                    correct: false,
                },
            ],
        }
    }

    /// Renders the quiz as the HTML block appended to a page body.
    ///
    /// Single-line output; values are shell-escaped by the caller when the
    /// block is interpolated into a command.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"quiz\">");
        html.push_str(&format!("<p class=\"quiz-question\">{}</p><ol>", self.question));
        for choice in &self.choices {
            if choice.correct {
                html.push_str(&format!(
                    "<li data-correct=\"true\">{}</li>",
                    choice.text
                ));
            } else {
                html.push_str(&format!("<li>{}</li>", choice.text));
            }
        }
        html.push_str("</ol></div>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_marked_format() {
        let text = "Q: What is a cell?\nA) A unit of life *\nB) A rock\nC) A planet\nD) A language";
        let quiz = Quiz::parse(text).unwrap();
        assert_eq!(quiz.question, "What is a cell?");
        assert_eq!(quiz.choices.len(), CHOICE_COUNT);
        assert!(quiz.choices[0].correct);
        assert_eq!(quiz.choices.iter().filter(|c| c.correct).count(), 1);
    }

    #[test]
    fn rejects_missing_question() {
        let text = "A) one *\nB) two\nC) three\nD) four";
        assert!(matches!(Quiz::parse(text), Err(QuizParseError::NoQuestion)));
    }

    #[test]
    fn rejects_wrong_choice_count() {
        let text = "Q: hm?\nA) one *\nB) two";
        assert!(matches!(Quiz::parse(text), Err(QuizParseError::BadChoiceCount(2))));
    }

    #[test]
    fn rejects_multiple_correct_markers() {
        let text = "Q: hm?\nA) one *\nB) two *\nC) three\nD) four";
        assert!(matches!(Quiz::parse(text), Err(QuizParseError::BadCorrectCount(2))));
    }

    #[test]
    fn rejects_no_correct_marker() {
        let text = "Q: hm?\nA) one\nB) two\nC) three\nD) four";
        assert!(matches!(Quiz::parse(text), Err(QuizParseError::BadCorrectCount(0))));
    }

    #[test]
    fn template_has_four_choices_one_correct() {
        let quiz = Quiz::template("biology");
        assert_eq!(quiz.choices.len(), CHOICE_COUNT);
        assert_eq!(quiz.choices.iter().filter(|c| c.correct).count(), 1);
        assert!(quiz.question.contains("biology"));
    }

    #[test]
    fn template_handles_empty_topic() {
        let quiz = Quiz::template("  ");
        assert_eq!(quiz.choices.len(), CHOICE_COUNT);
        assert!(quiz.question.contains("this topic"));
    }

    #[test]
    fn html_marks_exactly_one_correct() {
        let html = Quiz::template("rust").to_html();
        assert_eq!(html.matches("data-correct=\"true\"").count(), 1);
        assert_eq!(html.matches("<li").count(), CHOICE_COUNT);
        assert!(html.starts_with("<div class=\"quiz\">"));
        assert!(!html.contains('\n'));
    }
}
