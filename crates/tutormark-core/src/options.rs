//! Configuration options for rendering

/// How HTML already present in the input is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlPolicy {
    /// Escape `&`, `<`, `>` and `"` before any Markdown is matched
    #[default]
    Escape,
    /// Input is trusted: raw tags are passed through untouched
    PassThrough,
}

/// How paragraphs are formed around block-level output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockWrapping {
    /// Wrap only the inline runs between code blocks and lists
    #[default]
    Segments,
    /// Leave the whole text unwrapped as soon as a block is present
    SkipWhenBlocks,
}

/// Options for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Treatment of HTML in the input
    pub html: HtmlPolicy,

    /// Drop links whose scheme can execute script
    pub sanitize_urls: bool,

    /// Paragraph forming around blocks
    pub block_wrapping: BlockWrapping,

    /// Value of the `target` attribute on links, if any
    pub link_target: Option<String>,
}

impl RenderOptions {
    /// Options for input that was sanitised upstream
    pub fn trusted() -> Self {
        Self {
            html: HtmlPolicy::PassThrough,
            sanitize_urls: false,
            ..Default::default()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            html: HtmlPolicy::Escape,
            sanitize_urls: true,
            block_wrapping: BlockWrapping::Segments,
            link_target: Some("_blank".to_string()),
        }
    }
}
