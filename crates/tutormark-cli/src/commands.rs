//! Subcommand implementations.

use std::io::Read;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tutormark::palette::{chart_colors, hex_to_hsl};
use tutormark::{BlockWrapping, MarkdownRenderer, RenderOptions};

use crate::error::CliError;

/// Paragraph forming around code blocks and lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Wrap {
    /// Wrap only the text between blocks.
    Segments,
    /// Leave everything unwrapped when a block is present.
    SkipWhenBlocks,
}

impl From<Wrap> for BlockWrapping {
    fn from(wrap: Wrap) -> Self {
        match wrap {
            Wrap::Segments => BlockWrapping::Segments,
            Wrap::SkipWhenBlocks => BlockWrapping::SkipWhenBlocks,
        }
    }
}

/// Arguments for the `render` command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Markdown file to render; reads stdin when omitted.
    pub path: Option<PathBuf>,

    /// Treat the input as pre-sanitised: pass HTML through, keep all links.
    #[arg(long)]
    pub trusted: bool,

    /// How paragraphs are formed around blocks.
    #[arg(long, value_enum, default_value = "segments")]
    pub wrap: Wrap,

    /// Keep links with script-capable schemes.
    #[arg(long)]
    pub no_sanitize_urls: bool,
}

impl RenderArgs {
    pub fn options(&self) -> RenderOptions {
        let mut options = if self.trusted {
            RenderOptions::trusted()
        } else {
            RenderOptions::default()
        };
        options.block_wrapping = self.wrap.into();
        if self.no_sanitize_urls {
            options.sanitize_urls = false;
        }
        options
    }

    pub fn execute(&self) -> Result<String, CliError> {
        let input = match &self.path {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };

        tracing::debug!(path = ?self.path, bytes = input.len(), "rendering input");
        let renderer = MarkdownRenderer::with_options(self.options());
        Ok(renderer.render(&input))
    }
}

/// Arguments for the `palette` command.
#[derive(Debug, Args)]
pub struct PaletteArgs {
    /// Number of chart series to colour.
    pub count: usize,
}

impl PaletteArgs {
    pub fn execute(&self) -> Result<String, CliError> {
        Ok(chart_colors(self.count).join("\n"))
    }
}

/// Arguments for the `hsl` command.
#[derive(Debug, Args)]
pub struct HslArgs {
    /// Colour as `#rrggbb`.
    pub hex: String,
}

impl HslArgs {
    pub fn execute(&self) -> Result<String, CliError> {
        let hsl = hex_to_hsl(&self.hex)?;
        Ok(format!("{:.1} {:.1}% {:.1}%", hsl.h, hsl.s, hsl.l))
    }
}
