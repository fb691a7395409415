//! Phase 10: comment validation. Unlike phases 1-9 this reads the token
//! stream directly rather than walking the parsed tree, and always runs —
//! a block comment containing a nested comment-start marker is just as
//! wrong whether or not earlier phases already failed.

use crate::ast::tokens::{CommentStyle, TokenStream};
use crate::context::CompilationContext;
use crate::diagnostics::SemaError;

pub fn check(tokens: &TokenStream, _context: &CompilationContext) -> Vec<SemaError> {
    let mut errors = Vec::new();
    for comment in tokens.iter() {
        if comment.style == CommentStyle::Block && comment.text.contains("/*") {
            errors.push(SemaError::new(
                "MISRA-3.1",
                comment.span,
                "block comment contains a nested comment-start marker",
            ));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::tokens::CommentToken;
    use crate::ast::Span;

    fn span() -> Span {
        Span::new(1, 1)
    }

    #[test]
    fn nested_block_comment_marker_is_flagged() {
        let mut tokens = TokenStream::new();
        tokens.push_comment(CommentToken::new(
            CommentStyle::Block,
            " outer /* inner */ ",
            span(),
        ));
        let ctx = CompilationContext::new();
        let errors = check(&tokens, &ctx);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "MISRA-3.1");
    }

    #[test]
    fn line_comment_is_never_flagged() {
        let mut tokens = TokenStream::new();
        tokens.push_comment(CommentToken::new(
            CommentStyle::Line,
            " contains /* but is a line comment",
            span(),
        ));
        let ctx = CompilationContext::new();
        assert!(check(&tokens, &ctx).is_empty());
    }

    #[test]
    fn ordinary_block_comment_is_fine() {
        let mut tokens = TokenStream::new();
        tokens.push_comment(CommentToken::new(CommentStyle::Block, " just a note ", span()));
        let ctx = CompilationContext::new();
        assert!(check(&tokens, &ctx).is_empty());
    }
}
