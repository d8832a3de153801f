//! Prose generation helpers with deterministic fallbacks.
//!
//! Every generative path here degrades to a deterministic result on provider
//! absence or failure; handlers never see an error from this module. The
//! returned flag says whether the content actually came from the model, so
//! plans can set `metadata.ai_generated` truthfully.

use crate::domain::text::split_sentences;
use crate::domain::{ComponentKind, Quiz, ResourceSummary, Slide, SlideOutline};
use crate::ports::{AiProvider, CompletionRequest, Message};

/// Paragraphs per generated page body.
pub const PARAGRAPH_COUNT: usize = 3;

const MAX_CONTENT_TOKENS: u32 = 1024;

/// Page body HTML for `topic`: exactly three paragraphs, model-written when
/// possible. Returns the HTML and whether the model produced it.
pub async fn page_content(
    provider: Option<&dyn AiProvider>,
    summary: &ResourceSummary,
    topic: &str,
) -> (String, bool) {
    let Some(provider) = provider else {
        return (three_paragraph_fallback(topic), false);
    };

    let prompt = format!(
        "Write exactly three short paragraphs of plain text about {}. \
         Separate the paragraphs with a blank line. \
         No headings, no lists, no HTML, no commentary.",
        topic
    );
    let mut request = CompletionRequest::new()
        .with_message(Message::user(prompt))
        .with_max_tokens(MAX_CONTENT_TOKENS);
    if !summary.is_empty() {
        request = request.with_system_prompt(format!(
            "Ground the writing in these course materials where relevant:\n{}",
            summary.as_prompt_block()
        ));
    }

    match provider.complete(request).await {
        Ok(response) => (into_three_paragraphs(&response.content, topic), true),
        Err(e) => {
            tracing::warn!(error = %e, "content generation failed, using fallback");
            (three_paragraph_fallback(topic), false)
        }
    }
}

/// Deterministic three-paragraph body built from the topic text alone.
pub fn three_paragraph_fallback(topic: &str) -> String {
    wrap_paragraphs(&fallback_paragraphs(topic))
}

fn fallback_paragraphs(topic: &str) -> Vec<String> {
    let display = if topic.trim().is_empty() {
        "this topic"
    } else {
        topic.trim()
    };
    let sentences = split_sentences(topic);

    let mut paragraphs: Vec<String> = if sentences.is_empty() {
        Vec::new()
    } else {
        // Spread the sentences over up to three chunks, in order.
        let chunk = sentences.len().div_ceil(PARAGRAPH_COUNT);
        sentences
            .chunks(chunk)
            .take(PARAGRAPH_COUNT)
            .map(|c| c.join(" "))
            .collect()
    };

    let padding = [
        format!("This page introduces {}.", display),
        format!("It collects the key ideas and details about {}.", display),
        format!("Use it as a starting point for exploring {} further.", display),
    ];
    for pad in padding {
        if paragraphs.len() >= PARAGRAPH_COUNT {
            break;
        }
        paragraphs.push(pad);
    }
    paragraphs.truncate(PARAGRAPH_COUNT);
    paragraphs
}

fn into_three_paragraphs(text: &str, topic: &str) -> String {
    let mut paragraphs: Vec<String> = text
        .replace("\r\n", "\n")
        .split("\n\n")
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.len() > PARAGRAPH_COUNT {
        paragraphs.truncate(PARAGRAPH_COUNT);
    } else if paragraphs.len() < PARAGRAPH_COUNT {
        for pad in fallback_paragraphs(topic) {
            if paragraphs.len() >= PARAGRAPH_COUNT {
                break;
            }
            paragraphs.push(pad);
        }
    }
    wrap_paragraphs(&paragraphs)
}

fn wrap_paragraphs(paragraphs: &[String]) -> String {
    paragraphs
        .iter()
        .map(|p| format!("<p>{}</p>", p))
        .collect::<Vec<_>>()
        .join("")
}

/// Quiz HTML grounded in `source` (page body text) when available, `topic`
/// otherwise. Falls back to the fixed template quiz.
pub async fn quiz_html(
    provider: Option<&dyn AiProvider>,
    source: &str,
    topic: &str,
) -> (String, bool) {
    let Some(provider) = provider else {
        return (Quiz::template(topic).to_html(), false);
    };

    let basis = if source.trim().is_empty() { topic } else { source };
    let prompt = format!(
        "Write one multiple-choice question about the following material. \
         Use exactly this format:\n\
         Q: <question>\n\
         A) <choice>\nB) <choice>\nC) <choice>\nD) <choice>\n\
         Mark the single correct choice with a trailing *.\n\n{}",
        basis
    );
    let request = CompletionRequest::new()
        .with_message(Message::user(prompt))
        .with_max_tokens(MAX_CONTENT_TOKENS);

    match provider.complete(request).await {
        Ok(response) => match Quiz::parse(&response.content) {
            Ok(quiz) => (quiz.to_html(), true),
            Err(e) => {
                tracing::warn!(error = %e, "generated quiz rejected, using template");
                (Quiz::template(topic).to_html(), false)
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "quiz generation failed, using template");
            (Quiz::template(topic).to_html(), false)
        }
    }
}

/// Requests a deck outline from the provider; `None` when the reply is unusable.
/// `None` when no provider is configured or the response is unusable; the
/// caller substitutes [`SlideOutline::fallback`].
pub async fn slide_outline(provider: Option<&dyn AiProvider>, topic: &str) -> Option<SlideOutline> {
    let provider = provider?;
    let prompt = format!(
        "Design a slide deck about {}. Respond with only a JSON object: \
         {{\"title\": \"...\", \"slides\": [{{\"title\": \"...\", \"subtitle\": \"...\", \
         \"key_points\": [\"...\"]}}]}}. Use 8 to 12 slides.",
        topic
    );
    let request = CompletionRequest::new()
        .with_message(Message::user(prompt))
        .with_max_tokens(2048);

    match provider.complete(request).await {
        Ok(response) => match SlideOutline::parse(&response.content) {
            Ok(outline) => Some(outline),
            Err(e) => {
                tracing::warn!(error = %e, "outline rejected, using fallback");
                None
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "outline generation failed, using fallback");
            None
        }
    }
}

/// Body HTML for one slide, wrapped in the fixed presentational template.
pub async fn slide_body(
    provider: Option<&dyn AiProvider>,
    deck_title: &str,
    slide: &Slide,
) -> (String, bool) {
    let Some(provider) = provider else {
        return (slide_template(slide, &fallback_slide_text(slide)), false);
    };

    let prompt = format!(
        "Write the body text for a presentation slide titled \"{}\" in a deck about {}. \
         The slide's angle: {}. Two to four plain sentences. \
         No markup, no headings, and do not mention the slide or the deck itself.",
        slide.title, deck_title, slide.subtitle
    );
    let request = CompletionRequest::new()
        .with_message(Message::user(prompt))
        .with_max_tokens(MAX_CONTENT_TOKENS);

    match provider.complete(request).await {
        Ok(response) => {
            let text = response.content.split_whitespace().collect::<Vec<_>>().join(" ");
            (slide_template(slide, &text), true)
        }
        Err(e) => {
            tracing::warn!(slide = %slide.title, error = %e, "slide generation failed, using fallback");
            (slide_template(slide, &fallback_slide_text(slide)), false)
        }
    }
}

fn fallback_slide_text(slide: &Slide) -> String {
    if slide.subtitle.trim().is_empty() {
        format!("This slide covers {}.", slide.title)
    } else {
        format!("{}.", slide.subtitle.trim_end_matches('.'))
    }
}

fn slide_template(slide: &Slide, body: &str) -> String {
    let mut html = format!(
        "<section class=\"slide\"><h1>{}</h1>",
        slide.title
    );
    if !slide.subtitle.trim().is_empty() {
        html.push_str(&format!("<h2>{}</h2>", slide.subtitle.trim()));
    }
    html.push_str(&format!("<div class=\"slide-body\"><p>{}</p></div>", body));
    if !slide.key_points.is_empty() {
        html.push_str("<ul class=\"key-points\">");
        for point in &slide.key_points {
            html.push_str(&format!("<li>{}</li>", point));
        }
        html.push_str("</ul>");
    }
    html.push_str("</section>");
    html
}

/// Fixed HTML skeleton for a non-quiz component.
pub fn component_skeleton(kind: ComponentKind, topic: &str) -> String {
    let topic = if topic.trim().is_empty() { "this page" } else { topic.trim() };
    match kind {
        ComponentKind::Quiz => Quiz::template(topic).to_html(),
        ComponentKind::Carousel => format!(
            "<div class=\"carousel\">\
             <div class=\"carousel-item\"><img src=\"\" alt=\"{t} image 1\"></div>\
             <div class=\"carousel-item\"><img src=\"\" alt=\"{t} image 2\"></div>\
             <div class=\"carousel-item\"><img src=\"\" alt=\"{t} image 3\"></div>\
             </div>",
            t = topic
        ),
        ComponentKind::Timeline => format!(
            "<ol class=\"timeline\">\
             <li><strong>Start</strong> Where {t} begins</li>\
             <li><strong>Development</strong> How {t} unfolds</li>\
             <li><strong>Today</strong> Where {t} stands now</li>\
             </ol>",
            t = topic
        ),
        ComponentKind::CodeSample => format!(
            "<pre class=\"code-sample\"><code>// Example for {}</code></pre>",
            topic
        ),
        ComponentKind::Quote => format!(
            "<blockquote class=\"quote\"><p>A notable thought on {}.</p>\
             <cite>Attribution</cite></blockquote>",
            topic
        ),
        ComponentKind::Generic => format!(
            "<div class=\"component\"><p>Content block about {}.</p></div>",
            topic
        ),
    }
}
