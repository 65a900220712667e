//! tutormark-core - token model and paragraph assembly
//!
//! This crate provides the data structures shared by the render stages of
//! `tutormark`. It has no knowledge of Markdown syntax itself.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────────────────────────┐
//! Tutor text ───▶ │ Fragment                     │
//!                 │   text:    markdown + tokens │ ──stage──▶ ... ──▶ HTML
//!                 │   entries: produced markup   │
//!                 └──────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use tutormark_core::{wrap_paragraphs, BlockWrapping, Fragment};
//!
//! let mut fragment = Fragment::new("");
//! let open = fragment.inline("<strong>", "**");
//! let close = fragment.inline("</strong>", "**");
//! let fragment = fragment.with_text(format!("{open}hi{close}"));
//!
//! let html = wrap_paragraphs(fragment, BlockWrapping::Segments).finish();
//! assert_eq!(html, "<p><strong>hi</strong></p>");
//! ```

mod assemble;
mod fragment;
pub mod html;
mod options;

pub use assemble::wrap_paragraphs;
pub use fragment::{
    neutralize_tokens, pieces, token, Entry, Fragment, Kind, Piece, TOKEN_CLOSE, TOKEN_OPEN,
};
pub use options::{BlockWrapping, HtmlPolicy, RenderOptions};
