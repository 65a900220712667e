//! Fragment token model
//!
//! A [`Fragment`] is the value passed between render stages. Markup that a
//! stage has already produced is moved out of the text into an [`Entry`] and
//! replaced by a token, so later stages only ever see Markdown that is still
//! waiting to be matched.

/// Opens a token in fragment text
pub const TOKEN_OPEN: char = '\u{E000}';

/// Closes a token in fragment text
pub const TOKEN_CLOSE: char = '\u{E001}';

/// What kind of markup an entry holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Inline markup (`<code>`, `<strong>`, `<a>`, ...)
    Inline,
    /// Block markup that must not end up inside a paragraph (`<pre>`, `<ul>`)
    Block,
    /// A raw HTML tag taken over from trusted input
    Raw,
}

/// Produced markup together with the text it replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: Kind,
    pub html: String,
    pub source: String,
    /// The other half of an opening/closing pair
    pub partner: Option<usize>,
}

/// A piece of fragment text: either plain text or a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    Text(&'a str),
    Token(usize),
}

/// Text still open to matching plus the markup produced so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    entries: Vec<Entry>,
}

impl Fragment {
    /// Create a fragment with no produced markup yet
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entries: Vec::new(),
        }
    }

    /// The text still open to matching
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, keeping all entries
    pub fn with_text(self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entries: self.entries,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, id: usize) -> Option<&Entry> {
        self.entries.get(id)
    }

    /// Store markup and return the token that stands for it
    pub fn push(&mut self, kind: Kind, html: impl Into<String>, source: impl Into<String>) -> String {
        let id = self.entries.len();
        self.entries.push(Entry {
            kind,
            html: html.into(),
            source: source.into(),
            partner: None,
        });
        token(id)
    }

    /// Store an opening and a closing tag as a linked pair of inline
    /// entries and return both tokens
    pub fn pair(
        &mut self,
        open: impl Into<String>,
        close: impl Into<String>,
        open_source: impl Into<String>,
        close_source: impl Into<String>,
    ) -> (String, String) {
        let first = self.entries.len();
        let open = self.inline(open, open_source);
        let close = self.inline(close, close_source);
        self.entries[first].partner = Some(first + 1);
        self.entries[first + 1].partner = Some(first);
        (open, close)
    }

    pub fn inline(&mut self, html: impl Into<String>, source: impl Into<String>) -> String {
        self.push(Kind::Inline, html, source)
    }

    pub fn block(&mut self, html: impl Into<String>, source: impl Into<String>) -> String {
        self.push(Kind::Block, html, source)
    }

    pub fn raw(&mut self, html: impl Into<String>) -> String {
        let html = html.into();
        let source = html.clone();
        self.push(Kind::Raw, html, source)
    }

    /// Kind of the entry behind a token id, if any
    pub fn kind_of(&self, id: usize) -> Option<Kind> {
        self.entry(id).map(|e| e.kind)
    }

    /// Replace every token in `s` by the source text it stands for
    pub fn restore_source(&self, s: &str) -> String {
        self.substitute(s, self.entries.len(), |e| &e.source)
    }

    /// Whether every paired token in `s` has its partner in `s` as well
    pub fn is_balanced(&self, s: &str) -> bool {
        let ids = token_ids(s);
        ids.iter().all(|id| match self.entry(*id).and_then(|e| e.partner) {
            Some(partner) => ids.contains(&partner),
            None => true,
        })
    }

    /// Like [`Fragment::restore_source`], but a pair cut in half by the edge
    /// of `s` is undone on both sides: the half outside `s` renders as its
    /// source text from now on.
    pub fn detach_source(&mut self, s: &str) -> String {
        let ids = token_ids(s);
        for id in &ids {
            let Some(partner) = self.entry(*id).and_then(|e| e.partner) else {
                continue;
            };
            if ids.contains(&partner) {
                continue;
            }
            if let Some(entry) = self.entries.get_mut(partner) {
                entry.html = entry.source.clone();
                entry.partner = None;
            }
            if let Some(entry) = self.entries.get_mut(*id) {
                entry.partner = None;
            }
        }
        self.restore_source(s)
    }

    /// Replace every token in `s` by its HTML
    pub fn expand(&self, s: &str) -> String {
        self.substitute(s, self.entries.len(), |e| &e.html)
    }

    /// Expand the fragment's own text into the final HTML string
    pub fn finish(self) -> String {
        self.expand(&self.text)
    }

    // Entries only ever reference entries created before them, so `limit`
    // shrinks on every level and recursion terminates.
    fn substitute<F>(&self, s: &str, limit: usize, select: F) -> String
    where
        F: Fn(&Entry) -> &String + Copy,
    {
        let mut out = String::with_capacity(s.len());
        for piece in pieces(s) {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Token(id) if id < limit => {
                    if let Some(entry) = self.entries.get(id) {
                        out.push_str(&self.substitute(select(entry), id, select));
                    }
                }
                Piece::Token(_) => {}
            }
        }
        out
    }
}

/// Build the token for an entry id
pub fn token(id: usize) -> String {
    format!("{TOKEN_OPEN}{id}{TOKEN_CLOSE}")
}

/// Split text into plain runs and tokens
///
/// A malformed token (no closing delimiter or a non-numeric id) is returned
/// as plain text.
pub fn pieces(s: &str) -> Vec<Piece<'_>> {
    let mut result = Vec::new();
    let mut rest = s;

    while let Some(start) = rest.find(TOKEN_OPEN) {
        let after = &rest[start + TOKEN_OPEN.len_utf8()..];
        let parsed = after.find(TOKEN_CLOSE).and_then(|end| {
            after[..end]
                .parse::<usize>()
                .ok()
                .map(|id| (id, end + TOKEN_CLOSE.len_utf8()))
        });

        match parsed {
            Some((id, consumed)) => {
                if start > 0 {
                    result.push(Piece::Text(&rest[..start]));
                }
                result.push(Piece::Token(id));
                rest = &after[consumed..];
            }
            None => {
                let cut = start + TOKEN_OPEN.len_utf8();
                result.push(Piece::Text(&rest[..cut]));
                rest = &rest[cut..];
            }
        }
    }

    if !rest.is_empty() {
        result.push(Piece::Text(rest));
    }

    result
}

fn token_ids(s: &str) -> Vec<usize> {
    pieces(s)
        .into_iter()
        .filter_map(|p| match p {
            Piece::Token(id) => Some(id),
            Piece::Text(_) => None,
        })
        .collect()
}

/// Replace token delimiter characters so untrusted text cannot forge tokens
pub fn neutralize_tokens(s: &str) -> String {
    s.replace([TOKEN_OPEN, TOKEN_CLOSE], "\u{FFFD}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_returns_token() {
        let mut fragment = Fragment::new("x");
        let first = fragment.inline("<b>", "**");
        let second = fragment.block("<hr>", "---");
        assert_eq!(first, token(0));
        assert_eq!(second, token(1));
        assert_eq!(fragment.kind_of(1), Some(Kind::Block));
    }

    #[test]
    fn test_pieces_split_text_and_tokens() {
        let text = format!("a{}b{}", token(0), token(12));
        assert_eq!(
            pieces(&text),
            vec![
                Piece::Text("a"),
                Piece::Token(0),
                Piece::Text("b"),
                Piece::Token(12)
            ]
        );
    }

    #[test]
    fn test_pieces_malformed_token_is_text() {
        let text = format!("a{TOKEN_OPEN}xy");
        let joined: String = pieces(&text)
            .into_iter()
            .map(|p| match p {
                Piece::Text(t) => t.to_string(),
                Piece::Token(id) => format!("<{id}>"),
            })
            .collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_expand_nested_entries() {
        let mut fragment = Fragment::new("");
        let open = fragment.inline("<em>", "*");
        let close = fragment.inline("</em>", "*");
        let item = fragment.block(format!("<li>{open}x{close}</li>"), "- *x*");
        let fragment = fragment.with_text(format!("[{item}]"));
        assert_eq!(fragment.finish(), "[<li><em>x</em></li>]");
    }

    #[test]
    fn test_restore_source() {
        let mut fragment = Fragment::new("");
        let open = fragment.inline("<em>", "_");
        let close = fragment.inline("</em>", "_");
        let url = format!("http://a{open}b{close}c");
        assert_eq!(fragment.restore_source(&url), "http://a_b_c");
    }

    #[test]
    fn test_is_balanced() {
        let mut fragment = Fragment::new("");
        let (open, close) = fragment.pair("<em>", "</em>", "*", "*");
        let code = fragment.inline("<code>x</code>", "`x`");
        assert!(fragment.is_balanced(&format!("{open}a{close} {code}")));
        assert!(!fragment.is_balanced(&format!("a {open}b")));
        assert!(!fragment.is_balanced(&format!("b{close}")));
    }

    #[test]
    fn test_detach_source_undoes_both_halves() {
        let mut fragment = Fragment::new("");
        let (open, close) = fragment.pair("<em>", "</em>", "_", "_");
        let url = format!("http://a{close}b");
        assert_eq!(fragment.detach_source(&url), "http://a_b");
        let fragment = fragment.with_text(format!("my{open}label"));
        assert_eq!(fragment.finish(), "my_label");
    }

    #[test]
    fn test_detach_source_keeps_whole_pairs() {
        let mut fragment = Fragment::new("");
        let (open, close) = fragment.pair("<em>", "</em>", "_", "_");
        let url = format!("a{open}b{close}c");
        assert_eq!(fragment.detach_source(&url), "a_b_c");
        assert_eq!(fragment.entry(0).map(|e| e.html.as_str()), Some("<em>"));
    }

    #[test]
    fn test_self_reference_does_not_recurse() {
        let mut fragment = Fragment::new("");
        let tok = token(0);
        fragment.inline(format!("x{tok}"), "");
        assert_eq!(fragment.expand(&tok), "x");
    }

    #[test]
    fn test_neutralize_tokens() {
        let input = format!("a{}0{}b", TOKEN_OPEN, TOKEN_CLOSE);
        assert_eq!(neutralize_tokens(&input), "a\u{FFFD}0\u{FFFD}b");
    }
}
