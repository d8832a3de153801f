//! Slidedeck outlines.
//!
//! A slidedeck is one parent/index page plus N child slide pages. The outline
//! comes from the generative provider as JSON-shaped text; when parsing
//! fails the deterministic fallback outline is substituted. Every title is
//! sanitized on construction because the
//! relationship-setting step matches slides by title string.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::extract::title_case;
use super::text::{sanitize_title, split_sentences};

/// Outline size bounds requested from the provider.
pub const MIN_SLIDES: usize = 6;
pub const MAX_SLIDES: usize = 12;

/// One slide of a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default, alias = "keyPoints")]
    pub key_points: Vec<String>,
}

/// A parsed deck outline: deck title plus ordered slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideOutline {
    pub title: String,
    pub slides: Vec<Slide>,
}

/// Why a model-produced outline was rejected.
#[derive(Debug, Error)]
pub enum OutlineParseError {
    #[error("no JSON object found in response")]
    NoJson,
    #[error("outline JSON malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("outline has {0} slides, expected 1 to {MAX_SLIDES}")]
    BadSlideCount(usize),
    #[error("outline has an empty deck or slide title")]
    EmptyTitle,
}

#[derive(Deserialize)]
struct OutlineJson {
    title: String,
    slides: Vec<Slide>,
}

impl SlideOutline {
    /// Parses an outline from model text.
    ///
    /// Scans for the outermost `{...}` so surrounding prose or code fences do
    /// not break parsing, then validates slide count and titles. Callers
    /// handle the error by building [`SlideOutline::fallback`]; the fallback
    /// path is explicit, never silent.
    pub fn parse(text: &str) -> Result<Self, OutlineParseError> {
        let start = text.find('{').ok_or(OutlineParseError::NoJson)?;
        let end = text.rfind('}').ok_or(OutlineParseError::NoJson)?;
        if end <= start {
            return Err(OutlineParseError::NoJson);
        }
        let raw: OutlineJson = serde_json::from_str(&text[start..=end])?;

        if raw.slides.is_empty() || raw.slides.len() > MAX_SLIDES {
            return Err(OutlineParseError::BadSlideCount(raw.slides.len()));
        }

        let title = sanitize_title(&raw.title);
        if title.is_empty() {
            return Err(OutlineParseError::EmptyTitle);
        }
        let mut slides = Vec::with_capacity(raw.slides.len());
        for slide in raw.slides {
            let slide_title = sanitize_title(&slide.title);
            if slide_title.is_empty() {
                return Err(OutlineParseError::EmptyTitle);
            }
            slides.push(Slide {
                title: slide_title,
                subtitle: slide.subtitle,
                key_points: slide.key_points,
            });
        }
        Ok(Self { title, slides })
    }

    /// Deterministic outline built from the topic string alone.
    ///
    /// Six slides with fixed section names; key points come from the topic's
    /// sentences when it has any.
    pub fn fallback(topic: &str) -> Self {
        let clean_topic = sanitize_title(topic);
        let display = if clean_topic.is_empty() {
            "the topic".to_string()
        } else {
            clean_topic.clone()
        };
        let deck_title = if clean_topic.is_empty() {
            "Presentation".to_string()
        } else {
            title_case(&clean_topic)
        };

        let sentences = split_sentences(topic);
        let key_points: Vec<String> = if sentences.is_empty() {
            vec![format!("Key facts about {}", display)]
        } else {
            sentences.iter().take(3).map(|s| sanitize_title(s)).collect()
        };

        let sections = [
            ("Introduction", format!("Getting started with {}", display)),
            ("Background", format!("Where {} comes from", display)),
            ("Key Concepts", format!("The core ideas behind {}", display)),
            ("In Practice", format!("How {} shows up in the real world", display)),
            ("Common Questions", format!("What people ask about {}", display)),
            ("Summary", format!("What to remember about {}", display)),
        ];

        let slides = sections
            .into_iter()
            .map(|(name, subtitle)| Slide {
                title: sanitize_title(name),
                subtitle,
                key_points: key_points.clone(),
            })
            .collect();

        Self {
            title: deck_title,
            slides,
        }
    }
}
