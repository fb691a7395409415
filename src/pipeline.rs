//! Runs the ten analyzers in a fixed order. Phases 1-9 walk the parse tree
//! and stop the pipeline the moment one of them reports an error, since
//! later phases assume the invariants the earlier ones check (a
//! define-before-use violation makes a division-by-zero report on the same
//! call nonsensical). Phase 10 reads the token stream rather than the
//! tree, so it runs unconditionally and its errors are always appended.

use crate::analyze::{
    array_index, comments, define_before_use, definite_init, div_by_zero, float_modulo,
    null_safety, param_naming, signed_shift, struct_field_naming,
};
use crate::ast::source::SourceUnit;
use crate::context::CompilationContext;
use crate::diagnostics::SemaError;

type Phase = fn(&SourceUnit, &CompilationContext) -> Vec<SemaError>;

const TREE_PHASES: &[Phase] = &[
    param_naming::check,
    struct_field_naming::check,
    definite_init::check,
    define_before_use::check,
    null_safety::check,
    div_by_zero::check,
    float_modulo::check,
    array_index::check,
    signed_shift::check,
];

pub fn run(unit: &SourceUnit, context: &CompilationContext) -> Vec<SemaError> {
    let mut errors = Vec::new();
    for phase in TREE_PHASES {
        let phase_errors = phase(unit, context);
        if !phase_errors.is_empty() {
            errors.extend(phase_errors);
            errors.extend(comments::check(&unit.tokens, context));
            return errors;
        }
    }
    errors.extend(comments::check(&unit.tokens, context));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::source::{Block, Decl, Expr, FunctionDecl, Literal, Stmt, Visibility};
    use crate::ast::tokens::{CommentStyle, CommentToken, TokenStream};
    use crate::ast::Span;

    fn span() -> Span {
        Span::new(1, 1)
    }

    #[test]
    fn earlier_phase_error_short_circuits_later_phases() {
        let mut tokens = TokenStream::new();
        tokens.push_comment(CommentToken::new(CommentStyle::Block, " x /* y */ ", span()));
        let unit = SourceUnit {
            file: "f.cn".to_string(),
            decls: vec![Decl::Function(FunctionDecl {
                name: "f".to_string(),
                return_type: "void".to_string(),
                params: vec![],
                body: Block {
                    stmts: vec![Stmt::Expr(Expr::Binary {
                        op: crate::ast::source::BinOp::Div,
                        lhs: Box::new(Expr::Literal(
                            Literal::Int { value: 1, is_unsigned: false },
                            span(),
                        )),
                        rhs: Box::new(Expr::Literal(
                            Literal::Int { value: 0, is_unsigned: false },
                            span(),
                        )),
                        span: span(),
                    })],
                },
                visibility: Visibility::Public,
                doc_comments: vec![],
                span: span(),
            })],
            tokens,
        };
        let context = CompilationContext::new();
        let errors = run(&unit, &context);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code, "E0800");
        assert_eq!(errors[1].code, "MISRA-3.1");
    }

    #[test]
    fn clean_unit_still_runs_comment_validation() {
        let mut tokens = TokenStream::new();
        tokens.push_comment(CommentToken::new(CommentStyle::Block, " fine ", span()));
        let unit = SourceUnit {
            file: "f.cn".to_string(),
            decls: vec![],
            tokens,
        };
        let context = CompilationContext::new();
        assert!(run(&unit, &context).is_empty());
    }
}
