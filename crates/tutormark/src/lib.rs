//! # tutormark
//!
//! Render the Markdown subset used by AI-tutor answers to an HTML fragment.
//!
//! ## Design
//!
//! Rendering is a fixed sequence of stages, each a function from one
//! [`Fragment`] to the next:
//!
//! 1. fenced code blocks
//! 2. inline code spans
//! 3. bold (`**x**`, `__x__`)
//! 4. italic (`*x*`, `_x_`)
//! 5. links (`[label](url)`)
//! 6. unordered list items (`- item`)
//! 7. paragraphs
//!
//! Markup produced by a stage is replaced by an opaque token, so a later stage
//! can never match markers inside it. Input HTML is escaped unless the
//! renderer is configured with [`RenderOptions::trusted`].
//!
//! ## Example
//!
//! ```rust
//! use tutormark::render;
//!
//! let html = render("**Photosynthesis** turns *light* into energy.");
//! assert_eq!(
//!     html,
//!     "<p><strong>Photosynthesis</strong> turns <em>light</em> into energy.</p>"
//! );
//! ```
//!
//! ## Example (custom stage)
//!
//! ```rust
//! use once_cell::sync::Lazy;
//! use regex::Regex;
//! use tutormark::{MarkdownRenderer, Stage};
//!
//! static STRIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.+?)~~").unwrap());
//!
//! let mut renderer = MarkdownRenderer::new();
//! renderer.add_stage(
//!     "strike",
//!     Stage::for_pattern("strike", &STRIKE, |caps, fragment, _| {
//!         let open = fragment.inline("<del>", "~~");
//!         let close = fragment.inline("</del>", "~~");
//!         format!("{open}{}{close}", &caps[1])
//!     }),
//! );
//!
//! assert_eq!(renderer.render("~~wrong~~"), "<p><del>wrong</del></p>");
//! ```

pub mod palette;
pub mod stages;
mod service;
mod utilities;

pub use service::{render, BlockWrapping, MarkdownRenderer, RenderOptions};
pub use stages::{rewrite, Stage, Stages};
pub use tutormark_core::{Fragment, HtmlPolicy, Kind};
pub use utilities::*;

/// Error type for tutormark operations
#[derive(Debug, thiserror::Error)]
pub enum TutormarkError {
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, TutormarkError>;
