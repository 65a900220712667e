//! Paragraph assembly
//!
//! Turns the inline runs of a fragment into `<p>` elements while keeping
//! block markup (code blocks, lists) outside of any paragraph.

use crate::fragment::{pieces, token, Fragment, Kind, Piece};
use crate::html::starts_with_block_tag;
use crate::options::BlockWrapping;

enum Segment {
    Inline(String),
    Block(String),
}

/// Wrap the inline text of a fragment in paragraphs
pub fn wrap_paragraphs(fragment: Fragment, wrapping: BlockWrapping) -> Fragment {
    let segments = split_at_blocks(&fragment);
    let has_blocks = segments.iter().any(|s| matches!(s, Segment::Block(_)));

    if has_blocks && wrapping == BlockWrapping::SkipWhenBlocks {
        return fragment;
    }

    let mut fragment = fragment;
    let mut out = String::with_capacity(fragment.text().len() + 16);

    for (i, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Block(tok) => out.push_str(tok),
            Segment::Inline(run) => {
                let mut run = run.as_str();
                if i > 0 {
                    run = run.trim_start_matches('\n');
                }
                if i + 1 < segments.len() {
                    run = run.trim_end_matches('\n');
                }

                for part in run.split("\n\n") {
                    if fragment.expand(part).trim().is_empty() {
                        continue;
                    }
                    if starts_with_block_tag(&fragment.expand(part.trim_start())) {
                        out.push_str(part);
                    } else {
                        push_paragraph(&mut fragment, &mut out, part);
                    }
                }
            }
        }
    }

    if out.is_empty() {
        push_paragraph(&mut fragment, &mut out, "");
    }

    fragment.with_text(out)
}

fn push_paragraph(fragment: &mut Fragment, out: &mut String, content: &str) {
    let open = fragment.block("<p>", "");
    let close = fragment.block("</p>", "\n\n");
    out.push_str(&open);
    out.push_str(content);
    out.push_str(&close);
}

fn split_at_blocks(fragment: &Fragment) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for piece in pieces(fragment.text()) {
        match piece {
            Piece::Token(id) if fragment.kind_of(id) == Some(Kind::Block) => {
                if !current.is_empty() {
                    segments.push(Segment::Inline(std::mem::take(&mut current)));
                }
                segments.push(Segment::Block(token(id)));
            }
            Piece::Token(id) => current.push_str(&token(id)),
            Piece::Text(text) => current.push_str(text),
        }
    }

    if !current.is_empty() {
        segments.push(Segment::Inline(current));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn wrap(fragment: Fragment) -> String {
        wrap_paragraphs(fragment, BlockWrapping::Segments).finish()
    }

    #[test]
    fn test_single_paragraph() {
        assert_eq!(wrap(Fragment::new("hello")), "<p>hello</p>");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(wrap(Fragment::new("")), "<p></p>");
        assert_eq!(wrap(Fragment::new("  \n\t ")), "<p></p>");
    }

    #[test]
    fn test_blank_line_splits() {
        assert_eq!(wrap(Fragment::new("a\n\nb")), "<p>a</p><p>b</p>");
        assert_eq!(wrap(Fragment::new("a\n\n\n\nb")), "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_blocks_stay_outside_paragraphs() {
        let mut fragment = Fragment::new("");
        let code = fragment.block("<pre><code>x</code></pre>", "```x```");
        let fragment = fragment.with_text(format!("intro\n\n{code}\n\noutro"));
        assert_eq!(
            wrap(fragment),
            "<p>intro</p><pre><code>x</code></pre><p>outro</p>"
        );
    }

    #[test]
    fn test_inline_tokens_do_not_split() {
        let mut fragment = Fragment::new("");
        let open = fragment.inline("<em>", "*");
        let close = fragment.inline("</em>", "*");
        let fragment = fragment.with_text(format!("a {open}b{close} c"));
        assert_eq!(wrap(fragment), "<p>a <em>b</em> c</p>");
    }

    #[test]
    fn test_skip_when_blocks() {
        let mut fragment = Fragment::new("");
        let list = fragment.block("<ul><li>a</li></ul>", "- a");
        let fragment = fragment.with_text(format!("intro\n{list}"));
        let html = wrap_paragraphs(fragment, BlockWrapping::SkipWhenBlocks).finish();
        assert_eq!(html, "intro\n<ul><li>a</li></ul>");
    }

    #[test]
    fn test_raw_block_tag_is_not_wrapped() {
        let mut fragment = Fragment::new("");
        let open = fragment.raw("<p>");
        let close = fragment.raw("</p>");
        let fragment = fragment.with_text(format!("{open}done{close}"));
        assert_eq!(wrap(fragment), "<p>done</p>");
    }
}
