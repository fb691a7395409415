//! Parameter-naming rules — reserved patterns checked against every
//! function parameter. Shares the reserved-name policy table with the
//! struct-field-naming analyzer and the collectors' field check
//! (currently empty), so in practice this analyzer never fires against
//! real input until the table gains entries.

use crate::context::CompilationContext;
use crate::diagnostics::SemaError;
use crate::types::is_reserved_field_name;

use super::collect_functions;
use crate::ast::source::SourceUnit;

pub fn check(unit: &SourceUnit, _context: &CompilationContext) -> Vec<SemaError> {
    let mut errors = Vec::new();
    for func in collect_functions(unit) {
        for param in &func.decl.params {
            if is_reserved_field_name(&param.name) {
                errors.push(
                    SemaError::new(
                        "E0355",
                        param.span,
                        format!("parameter `{}` uses a reserved name", param.name),
                    )
                    .with_related(func.qualified_name.clone()),
                );
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::source::{Block, Decl, FunctionDecl, Param, TypeRef, Visibility};
    use crate::ast::Span;

    fn span() -> Span {
        Span::new(1, 1)
    }

    #[test]
    fn no_reserved_names_means_no_errors() {
        let unit = SourceUnit {
            file: "f.cn".to_string(),
            decls: vec![Decl::Function(FunctionDecl {
                name: "update".to_string(),
                return_type: "void".to_string(),
                params: vec![Param {
                    name: "delta".to_string(),
                    ty: TypeRef::scalar("f32"),
                    span: span(),
                }],
                body: Block::default(),
                visibility: Visibility::Public,
                doc_comments: vec![],
                span: span(),
            })],
            tokens: Default::default(),
        };
        let ctx = CompilationContext::new();
        assert!(check(&unit, &ctx).is_empty());
    }
}
