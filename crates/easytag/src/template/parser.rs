//! Builds node lists from lexer tokens.

use crate::error::CompileError;
use crate::tag::{Arg, MarkerToken, TokenStream};

use super::lexer::{Lexer, Token, TokenKind};
use super::library::Library;
use super::nodes::{NodeList, TextNode, VariableNode};

/// Cursor over the tokens of one template source.
///
/// Block tags found while parsing are compiled by the tag registered under
/// their name in the [`Library`]. The tag takes over the cursor until its end
/// marker, then parsing resumes after it.
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    library: &'a Library,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, library: &'a Library) -> Self {
        Self {
            tokens: Lexer::new(source).collect(),
            pos: 0,
            library,
        }
    }

    /// Parses nodes until a block token whose name is in `until`.
    ///
    /// The stopping token is left for [`next_marker`](TokenStream::next_marker).
    /// With an empty `until`, parses to the end of the source.
    pub fn parse(&mut self, until: &[String]) -> Result<NodeList, CompileError> {
        let library = self.library;
        let mut nodes = NodeList::new();

        while let Some(token) = self.tokens.get(self.pos).copied() {
            match token.kind {
                TokenKind::Text => nodes.push(TextNode(token.contents.to_string())),
                TokenKind::Comment => {}
                TokenKind::Variable => {
                    let expr = token.contents.trim();
                    let arg = Arg::parse(expr).ok_or_else(|| CompileError::InvalidVariable {
                        text: expr.to_string(),
                        line: token.line,
                    })?;
                    nodes.push(VariableNode(arg));
                }
                TokenKind::Block => {
                    let marker = MarkerToken::parse(token.contents, token.line)
                        .ok_or(CompileError::EmptyTag { line: token.line })?;
                    if until.contains(&marker.name) {
                        return Ok(nodes);
                    }

                    let compiler =
                        library
                            .get(&marker.name)
                            .ok_or_else(|| CompileError::InvalidBlockTag {
                                name: marker.name.clone(),
                                expected: until.to_vec(),
                                line: marker.line,
                            })?;
                    self.pos += 1;
                    nodes.push_boxed(compiler.compile(&marker, self)?);
                    continue;
                }
            }
            self.pos += 1;
        }

        Ok(nodes)
    }

    /// Whether every token has been consumed.
    pub fn is_finished(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

impl TokenStream for Parser<'_> {
    type Block = NodeList;

    fn parse_until(&mut self, markers: &[String]) -> Result<NodeList, CompileError> {
        self.parse(markers)
    }

    fn next_marker(&mut self) -> Option<MarkerToken> {
        let token = self.tokens.get(self.pos)?;
        if token.kind != TokenKind::Block {
            return None;
        }
        let marker = MarkerToken::parse(token.contents, token.line)?;
        self.pos += 1;
        Some(marker)
    }
}
