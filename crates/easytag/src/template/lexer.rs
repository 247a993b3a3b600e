//! Splits template source into text and markup tokens.
//!
//! Recognized markup:
//!
//! - `{{ expr }}`: variable
//! - `{% name args %}`: block tag or marker
//! - `{# text #}`: comment
//!
//! Markup that is never closed is passed through as text.

/// Kinds of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Text,
    Variable,
    Block,
    Comment,
}

/// A token with the contents between its delimiters and its 1-based line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub contents: &'a str,
    pub line: usize,
}

pub(crate) struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    /// Finds the next opening delimiter at or after the cursor.
    fn next_open(&self) -> Option<(usize, TokenKind)> {
        let remaining = &self.input[self.pos..];
        remaining.match_indices('{').find_map(|(i, _)| {
            let kind = match remaining.as_bytes().get(i + 1)? {
                b'{' => TokenKind::Variable,
                b'%' => TokenKind::Block,
                b'#' => TokenKind::Comment,
                _ => return None,
            };
            Some((i, kind))
        })
    }

    /// Moves the cursor `len` bytes ahead, returning the skipped slice and the
    /// line it started on.
    fn advance(&mut self, len: usize) -> (&'a str, usize) {
        let slice = &self.input[self.pos..self.pos + len];
        let line = self.line;
        self.pos += len;
        self.line += slice.matches('\n').count();
        (slice, line)
    }

    fn text(&mut self, len: usize) -> Token<'a> {
        let (contents, line) = self.advance(len);
        Token {
            kind: TokenKind::Text,
            contents,
            line,
        }
    }
}

fn closer(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Variable => "}}",
        TokenKind::Block => "%}",
        TokenKind::Comment => "#}",
        TokenKind::Text => "",
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining_len = self.input.len() - self.pos;
        if remaining_len == 0 {
            return None;
        }

        let Some((start, kind)) = self.next_open() else {
            return Some(self.text(remaining_len));
        };
        if start > 0 {
            return Some(self.text(start));
        }

        // At an opening delimiter
        let body = &self.input[self.pos + 2..];
        match body.find(closer(kind)) {
            Some(end) => {
                let (full, line) = self.advance(end + 4);
                Some(Token {
                    kind,
                    contents: &full[2..full.len() - 2],
                    line,
                })
            }
            None => Some(self.text(remaining_len)),
        }
    }
}
