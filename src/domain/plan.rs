//! Command plans - the unit of output handed to the execution collaborator.
//!
//! A [`CommandPlan`] carries a human explanation, an ordered command list,
//! an action tag naming the workflow that produced it, and metadata the
//! executor needs (which site directory to run in, whether content was
//! AI-generated). Plans never execute anything; they are data.
//!
//! Invariant: a failed plan carries no commands. The engine never asks the
//! executor to run a plan it knows is incomplete or invalid. Constructors
//! enforce this: [`CommandPlan::failure`] takes no commands and
//! [`CommandPlan::with_command`] drops commands added to a failed plan.

use serde::{Serialize, Serializer};

use super::intent::Intent;
use super::text::sanitize_title;

/// One executable step in a plan.
///
/// Most steps are plain shell invocations of the site or deployment CLI. The
/// manifest-patch variant exists because the site CLI has no native "set
/// parent" operation: the step is a generated inline script that rewrites the
/// site's structural manifest. Keeping it structured here confines all shell
/// quoting to [`Command::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A complete single-line shell command string.
    ShellInvocation(String),
    /// Link `child_title` under `parent_title` in the site manifest.
    ManifestPatch {
        parent_title: String,
        child_title: String,
        depth: u8,
    },
}

impl Command {
    /// Shorthand for a shell invocation.
    pub fn shell(cmd: impl Into<String>) -> Self {
        Command::ShellInvocation(cmd.into())
    }

    /// Builds a manifest patch; both titles are sanitized on construction so
    /// the lookup inside the rendered script matches what the page-creation
    /// command wrote.
    pub fn manifest_patch(parent_title: &str, child_title: &str, depth: u8) -> Self {
        Command::ManifestPatch {
            parent_title: sanitize_title(parent_title),
            child_title: sanitize_title(child_title),
            depth,
        }
    }

    /// Serializes the command into a single shell-executable line.
    ///
    /// The manifest patch renders as an inline `node -e` script: load
    /// `manifest.json`, find parent and child by normalized title, set the
    /// child's `parent` and `indent` fields, write the file back. Sanitized
    /// titles contain only letters, digits, and spaces, so they are safe
    /// inside the single-quoted JS string literals.
    pub fn render(&self) -> String {
        match self {
            Command::ShellInvocation(cmd) => cmd.clone(),
            Command::ManifestPatch {
                parent_title,
                child_title,
                depth,
            } => {
                let parent = parent_title.to_lowercase();
                let child = child_title.to_lowercase();
                format!(
                    "node -e \"const fs=require('fs');\
const m=JSON.parse(fs.readFileSync('manifest.json','utf8'));\
const norm=s=>String(s).toLowerCase().replace(/[^a-z0-9 ]+/g,' ').replace(/ +/g,' ').trim();\
const p=m.pages.find(x=>norm(x.title)==='{parent}');\
const c=m.pages.find(x=>norm(x.title)==='{child}');\
if(p&&c){{c.parent=p.slug;c.indent={depth};}}\
fs.writeFileSync('manifest.json',JSON.stringify(m,null,2));\""
                )
            }
        }
    }
}

impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

/// Fields the executor uses to situate and report a plan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanMetadata {
    /// Site the commands target; the executor derives the working directory
    /// from this when `run_from_site_dir` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// True when any command carries model-generated content.
    pub ai_generated: bool,
    /// Run commands inside the site's directory rather than the storage root.
    pub run_from_site_dir: bool,
}

/// The ordered, escaped set of shell operations plus metadata returned by
/// the engine for an external executor to run.
#[derive(Debug, Clone, Serialize)]
pub struct CommandPlan {
    pub explanation: String,
    commands: Vec<Command>,
    success: bool,
    /// Tag naming the workflow that produced this plan.
    pub action: Intent,
    pub metadata: PlanMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<String>,
}

impl CommandPlan {
    /// A successful plan; commands are added with [`CommandPlan::with_command`].
    pub fn success(action: Intent, explanation: impl Into<String>) -> Self {
        Self {
            explanation: explanation.into(),
            commands: Vec::new(),
            success: true,
            action,
            metadata: PlanMetadata::default(),
            next_steps: None,
        }
    }

    /// A recoverable, user-facing failure. Carries no commands by
    /// construction.
    pub fn failure(action: Intent, explanation: impl Into<String>) -> Self {
        Self {
            explanation: explanation.into(),
            commands: Vec::new(),
            success: false,
            action,
            metadata: PlanMetadata::default(),
            next_steps: None,
        }
    }

    /// A normal conversational turn asking for missing information:
    /// successful, zero commands, example phrasings in `next_steps`.
    pub fn clarification(
        action: Intent,
        explanation: impl Into<String>,
        examples: impl Into<String>,
    ) -> Self {
        Self::success(action, explanation).with_next_steps(examples)
    }

    /// Appends a command. Dropped with a warning on failed plans; a failed
    /// plan never instructs the executor.
    pub fn with_command(mut self, command: Command) -> Self {
        if self.success {
            self.commands.push(command);
        } else {
            tracing::warn!(action = %self.action, "dropping command added to failed plan");
        }
        self
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.metadata.site_name = Some(site.into());
        self
    }

    pub fn with_page_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.page_title = Some(title.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.metadata.domain = Some(domain.into());
        self
    }

    pub fn with_ai_generated(mut self, ai: bool) -> Self {
        self.metadata.ai_generated = ai;
        self
    }

    pub fn run_from_site_dir(mut self, run: bool) -> Self {
        self.metadata.run_from_site_dir = run;
        self
    }

    pub fn with_next_steps(mut self, next: impl Into<String>) -> Self {
        self.next_steps = Some(next.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Commands serialized to the single-line strings the executor runs.
    pub fn rendered_commands(&self) -> Vec<String> {
        self.commands.iter().map(Command::render).collect()
    }
}
