//! MarkdownRenderer - the main entry point for tutor Markdown to HTML rendering.

use once_cell::sync::Lazy;
use regex::Regex;
use tutormark_core::{html, neutralize_tokens, Fragment, HtmlPolicy};

use crate::stages::{rewrite, Stage, Stages};
use crate::utilities::normalize_line_endings;

// Re-export options from core
pub use tutormark_core::{BlockWrapping, RenderOptions};

static RAW_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>").unwrap());

static PRE_BLOCK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<pre(?:\s[^<>]*)?>.*?</pre>").unwrap());

static DEFAULT_RENDERER: Lazy<MarkdownRenderer> = Lazy::new(MarkdownRenderer::new);

/// The main service for rendering tutor Markdown to HTML
pub struct MarkdownRenderer {
    options: RenderOptions,
    stages: Stages,
}

impl MarkdownRenderer {
    /// Create a new MarkdownRenderer with default options
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
            stages: Stages::new(),
        }
    }

    /// Create a MarkdownRenderer with custom options
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            stages: Stages::new(),
        }
    }

    /// Render Markdown to an HTML fragment
    ///
    /// Never fails: unmatched markers are left in the output as text.
    pub fn render(&self, text: &str) -> String {
        let mut fragment = self.prepare(text);

        for stage in self.stages.iter() {
            tracing::trace!(stage = %stage.name, "applying render stage");
            fragment = stage.run(fragment, &self.options);
        }

        let entries = fragment.entries().len();
        let html = fragment.finish();
        tracing::debug!(
            input_len = text.len(),
            output_len = html.len(),
            entries,
            "rendered markdown"
        );
        html
    }

    /// Add a custom stage
    pub fn add_stage(&mut self, key: &str, stage: Stage) -> &mut Self {
        self.stages.add(key, stage);
        self
    }

    /// Skip the stage with the given name
    pub fn disable(&mut self, name: &str) -> &mut Self {
        self.stages.disable(name);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Names of the active stages in execution order
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.names()
    }

    /// Get the current options
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    /// Turn raw input into the fragment the first stage sees
    fn prepare(&self, text: &str) -> Fragment {
        let text = neutralize_tokens(&normalize_line_endings(text));

        match self.options.html {
            HtmlPolicy::Escape => Fragment::new(html::escape(&text)),
            HtmlPolicy::PassThrough => {
                // Preformatted spans are kept whole so blank lines inside
                // them never start a paragraph.
                let fragment =
                    rewrite(Fragment::new(text), &PRE_BLOCK_PATTERN, |caps, fragment| {
                        fragment.block(&caps[0], &caps[0])
                    });
                rewrite(fragment, &RAW_TAG_PATTERN, |caps, fragment| {
                    fragment.raw(&caps[0])
                })
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render Markdown to HTML with default options
pub fn render(text: &str) -> String {
    DEFAULT_RENDERER.render(text)
}
