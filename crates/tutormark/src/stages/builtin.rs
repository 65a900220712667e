//! Built-in stages for the tutor Markdown subset.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tutormark_core::{wrap_paragraphs, Fragment, RenderOptions};

use super::Stage;
use crate::utilities::is_safe_url;

pub const FENCED_CODE: &str = "fenced_code";
pub const INLINE_CODE: &str = "inline_code";
pub const STRONG: &str = "strong";
pub const EMPHASIS: &str = "emphasis";
pub const LINK: &str = "link";
pub const LIST: &str = "list";
pub const PARAGRAPH: &str = "paragraph";

static FENCED_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:\w*\n)?((?s:.*?))```").unwrap());
static INLINE_CODE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static STRONG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").unwrap());
static EMPHASIS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*|_(.+?)_").unwrap());
static LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static LIST_ITEM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*-[ \t]+(\S.*)$").unwrap());

/// Stages that run before user stages, in order
pub fn inline_stages() -> Vec<Stage> {
    vec![
        fenced_code_stage(),
        inline_code_stage(),
        strong_stage(),
        emphasis_stage(),
        link_stage(),
    ]
}

/// Stages that run after user stages, in order
pub fn block_stages() -> Vec<Stage> {
    vec![list_stage(), paragraph_stage()]
}

fn fenced_code_stage() -> Stage {
    Stage::for_pattern(FENCED_CODE, &FENCED_CODE_PATTERN, |caps, fragment, _| {
        let html = format!("<pre><code>{}</code></pre>", &caps[1]);
        fragment.block(html, &caps[0])
    })
}

fn inline_code_stage() -> Stage {
    Stage::for_pattern(INLINE_CODE, &INLINE_CODE_PATTERN, |caps, fragment, _| {
        let html = format!("<code>{}</code>", &caps[1]);
        fragment.inline(html, &caps[0])
    })
}

fn strong_stage() -> Stage {
    Stage::for_pattern(STRONG, &STRONG_PATTERN, |caps, fragment, _| {
        wrap_delimited(caps, fragment, "strong", ["**", "__"])
    })
}

fn emphasis_stage() -> Stage {
    Stage::for_pattern(EMPHASIS, &EMPHASIS_PATTERN, |caps, fragment, _| {
        wrap_delimited(caps, fragment, "em", ["*", "_"])
    })
}

/// Wrap the content of a delimiter pair in `tag`, leaving the content open
/// to later stages. Group 1 holds the content for the first delimiter,
/// group 2 for the second. Content holding only one half of an earlier pair
/// stays literal so tags never cross.
fn wrap_delimited(
    caps: &Captures<'_>,
    fragment: &mut Fragment,
    tag: &str,
    delimiters: [&str; 2],
) -> String {
    let (content, delimiter) = match caps.get(1) {
        Some(m) => (m.as_str(), delimiters[0]),
        None => (caps.get(2).map_or("", |m| m.as_str()), delimiters[1]),
    };

    if !fragment.is_balanced(content) {
        return caps[0].to_string();
    }

    let (open, close) = fragment.pair(
        format!("<{tag}>"),
        format!("</{tag}>"),
        delimiter,
        delimiter,
    );
    format!("{open}{content}{close}")
}

fn link_stage() -> Stage {
    Stage::for_pattern(LINK, &LINK_PATTERN, |caps, fragment, options| {
        let label = &caps[1];
        let url = fragment.detach_source(&caps[2]);

        if options.sanitize_urls && !is_safe_url(&url) {
            tracing::debug!(url = %url, "dropping link with unsafe scheme");
            return label.to_string();
        }

        if !fragment.is_balanced(label) {
            return format!("[{label}]({url})");
        }

        let html = match &options.link_target {
            Some(target) => format!(r#"<a href="{url}" target="{target}">"#),
            None => format!(r#"<a href="{url}">"#),
        };
        let (open, close) = fragment.pair(html, "</a>", "[", format!("]({url})"));
        format!("{open}{label}{close}")
    })
}

fn list_stage() -> Stage {
    Stage::new(LIST, |fragment, _| {
        let text = fragment.text().to_string();
        let mut fragment = fragment;
        let mut lines: Vec<String> = Vec::new();
        let mut items: Vec<&str> = Vec::new();
        let mut sources: Vec<&str> = Vec::new();

        for line in text.split('\n') {
            if let Some(caps) = LIST_ITEM_PATTERN.captures(line) {
                if let Some(item) = caps.get(1) {
                    items.push(item.as_str());
                    sources.push(line);
                    continue;
                }
            }
            flush_list(&mut fragment, &mut lines, &mut items, &mut sources);
            lines.push(line.to_string());
        }
        flush_list(&mut fragment, &mut lines, &mut items, &mut sources);

        fragment.with_text(lines.join("\n"))
    })
}

/// Emit one `<ul>` for the pending run of consecutive item lines
fn flush_list(
    fragment: &mut Fragment,
    lines: &mut Vec<String>,
    items: &mut Vec<&str>,
    sources: &mut Vec<&str>,
) {
    if items.is_empty() {
        return;
    }

    let mut html = String::from("<ul>");
    for item in items.drain(..) {
        html.push_str("<li>");
        html.push_str(item);
        html.push_str("</li>");
    }
    html.push_str("</ul>");

    let source = sources.join("\n");
    sources.clear();
    lines.push(fragment.block(html, source));
}

fn paragraph_stage() -> Stage {
    Stage::new(PARAGRAPH, |fragment, options| {
        wrap_paragraphs(fragment, options.block_wrapping)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(stage: Stage, text: &str) -> String {
        let fragment = stage.run(Fragment::new(text), &RenderOptions::default());
        fragment.finish()
    }

    #[test]
    fn test_fenced_code_drops_language() {
        assert_eq!(
            run(fenced_code_stage(), "```rust\nfn main() {}\n```"),
            "<pre><code>fn main() {}\n</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_is_non_greedy() {
        assert_eq!(
            run(fenced_code_stage(), "```a``` mid ```b```"),
            "<pre><code>a</code></pre> mid <pre><code>b</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_freezes_content() {
        let fragment =
            fenced_code_stage().run(Fragment::new("```**x**```"), &RenderOptions::default());
        assert!(!fragment.text().contains("**"));
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(run(inline_code_stage(), "use `cargo`"), "use <code>cargo</code>");
        assert_eq!(run(inline_code_stage(), "``"), "``");
    }

    #[test]
    fn test_strong_markers_must_match() {
        assert_eq!(run(strong_stage(), "**a__"), "**a__");
        assert_eq!(run(strong_stage(), "__a__"), "<strong>a</strong>");
    }

    #[test]
    fn test_strong_is_non_greedy() {
        assert_eq!(
            run(strong_stage(), "**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn test_emphasis_does_not_cross_lines() {
        assert_eq!(run(emphasis_stage(), "*a\nb*"), "*a\nb*");
    }

    #[test]
    fn test_emphasis_does_not_split_strong() {
        let options = RenderOptions::default();
        let fragment = strong_stage().run(Fragment::new("*a **b* c**"), &options);
        let fragment = emphasis_stage().run(fragment, &options);
        assert_eq!(fragment.finish(), "*a <strong>b* c</strong>");
    }

    #[test]
    fn test_link_label_with_half_pair_stays_literal() {
        let options = RenderOptions::default();
        let fragment = emphasis_stage().run(Fragment::new("*a [b* c](u)"), &options);
        let fragment = link_stage().run(fragment, &options);
        assert_eq!(fragment.finish(), "<em>a [b</em> c](u)");
    }

    #[test]
    fn test_link_without_target() {
        let options = RenderOptions {
            link_target: None,
            ..Default::default()
        };
        let fragment = link_stage().run(Fragment::new("[a](b)"), &options);
        assert_eq!(fragment.finish(), r#"<a href="b">a</a>"#);
    }

    #[test]
    fn test_unsafe_link_keeps_label() {
        assert_eq!(run(link_stage(), "[x](javascript:alert(1)"), "x");
    }

    #[test]
    fn test_list_groups_consecutive_lines() {
        assert_eq!(
            run(list_stage(), "- a\n- b\n\n- c"),
            "<ul><li>a</li><li>b</li></ul>\n\n<ul><li>c</li></ul>"
        );
    }

    #[test]
    fn test_list_requires_text_after_dash() {
        assert_eq!(run(list_stage(), "-a\n- "), "-a\n- ");
        assert_eq!(run(list_stage(), "-  \n-\t "), "-  \n-\t ");
    }
}
