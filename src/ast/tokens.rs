//! Token-stream types shared by every grammar.
//!
//! Phase 10 of the analyzer pipeline (comment validation, §4.3) reads the
//! token stream rather than the syntax tree, so it needs a representation
//! that survives independently of how a given grammar shapes its AST.

use super::Span;

/// Comment style as lexed by any of the three grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// ...` to end of line.
    Line,
    /// `/* ... */`, possibly spanning multiple lines.
    Block,
}

/// A single comment token. Non-comment tokens are not modeled here since no
/// analyzer in this crate needs them; §6 only requires "a forward scan of
/// all comment tokens".
#[derive(Debug, Clone, PartialEq)]
pub struct CommentToken {
    pub style: CommentStyle,
    /// Text between the delimiters, not including `//`, `/*`, or `*/`.
    pub text: String,
    pub span: Span,
}

impl CommentToken {
    pub fn new(style: CommentStyle, text: impl Into<String>, span: Span) -> Self {
        CommentToken {
            style,
            text: text.into(),
            span,
        }
    }
}

/// Forward stream of comment tokens for one compilation unit, in source
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    pub comments: Vec<CommentToken>,
}

impl TokenStream {
    pub fn new() -> Self {
        TokenStream::default()
    }

    pub fn push_comment(&mut self, token: CommentToken) {
        self.comments.push(token);
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommentToken> {
        self.comments.iter()
    }
}
