//! Parsing of generative fallback replies.
//!
//! The Unknown-intent fallback asks the model for a JSON envelope. Models do
//! not always comply, so parsing is staged: strict JSON first, then a
//! best-effort scan for command-shaped lines, then prose-only. Only lines
//! invoking the known CLIs are ever accepted as commands.

use serde::Deserialize;

/// Result of parsing a fallback reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFallback {
    pub explanation: String,
    pub commands: Vec<String>,
    pub next_steps: Option<String>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    commands: Vec<String>,
    #[serde(default)]
    next_steps: Option<String>,
}

/// True for a line invoking one of the external CLIs.
fn is_command_line(line: &str) -> bool {
    let rest_ok = |s: &str, tool: &str| {
        s == tool || s.strip_prefix(tool).is_some_and(|r| r.starts_with(' '))
    };
    rest_ok(line, "sitegen") || rest_ok(line, "deployctl")
}

fn strip_shell_decoration(line: &str) -> &str {
    line.trim()
        .trim_start_matches("$ ")
        .trim_start_matches("- ")
        .trim_matches('`')
        .trim()
}

/// Parses a fallback reply into explanation, commands, and next steps.
pub fn parse_fallback_response(text: &str) -> ParsedFallback {
    if let Some(parsed) = try_json_envelope(text) {
        return parsed;
    }
    scan_command_lines(text)
}

fn try_json_envelope(text: &str) -> Option<ParsedFallback> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    let envelope: Envelope = serde_json::from_str(&text[start..=end]).ok()?;

    let commands: Vec<String> = envelope
        .commands
        .into_iter()
        .map(|c| strip_shell_decoration(&c).to_string())
        .filter(|c| is_command_line(c))
        .collect();

    let explanation = if envelope.explanation.trim().is_empty() {
        "Here is what I suggest.".to_string()
    } else {
        envelope.explanation.trim().to_string()
    };

    Some(ParsedFallback {
        explanation,
        commands,
        next_steps: envelope.next_steps.filter(|s| !s.trim().is_empty()),
    })
}

fn scan_command_lines(text: &str) -> ParsedFallback {
    let mut commands = Vec::new();
    let mut prose = Vec::new();
    for line in text.lines() {
        let stripped = strip_shell_decoration(line);
        if stripped.starts_with("```") {
            continue;
        }
        if is_command_line(stripped) {
            commands.push(stripped.to_string());
        } else if !line.trim().is_empty() {
            prose.push(line.trim());
        }
    }

    let explanation = if prose.is_empty() {
        if commands.is_empty() {
            "I could not work out a concrete action for that request.".to_string()
        } else {
            "Here is what I suggest.".to_string()
        }
    } else {
        prose.join(" ")
    };

    ParsedFallback {
        explanation,
        commands,
        next_steps: None,
    }
}
