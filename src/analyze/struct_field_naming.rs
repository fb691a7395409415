//! Struct-field naming rules — reserved identifiers within user structs,
//! via the same reserved-name policy as the parameter-naming analyzer and
//! the collectors' field check.

use crate::ast::source::{Decl, SourceUnit};
use crate::context::CompilationContext;
use crate::diagnostics::SemaError;
use crate::types::is_reserved_field_name;

pub fn check(unit: &SourceUnit, _context: &CompilationContext) -> Vec<SemaError> {
    let mut errors = Vec::new();
    for decl in &unit.decls {
        let Decl::Struct(s) = decl else { continue };
        for field in &s.fields {
            if is_reserved_field_name(&field.name) {
                errors.push(
                    SemaError::new(
                        "E0355",
                        field.span,
                        format!("field `{}` of `{}` uses a reserved name", field.name, s.name),
                    )
                    .with_related(s.name.clone()),
                );
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::source::{FieldDecl, StructDecl, TypeRef};
    use crate::ast::Span;

    #[test]
    fn empty_reserved_table_means_no_hits_yet() {
        let unit = SourceUnit {
            file: "f.cn".to_string(),
            decls: vec![Decl::Struct(StructDecl {
                name: "Config".to_string(),
                fields: vec![FieldDecl {
                    name: "baud".to_string(),
                    ty: TypeRef::scalar("u32"),
                    span: Span::new(1, 1),
                }],
                doc_comments: vec![],
                span: Span::new(1, 1),
            })],
            tokens: Default::default(),
        };
        let ctx = CompilationContext::new();
        assert!(check(&unit, &ctx).is_empty());
    }
}
