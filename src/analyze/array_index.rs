//! Array-index type. Indices must be unsigned. A direct signed integer
//! literal, or a local variable declared with a signed primitive type,
//! fires this check; an unsigned literal or unsigned-typed variable does
//! not.

use std::collections::HashMap;

use crate::ast::source::{Block, Decl, Expr, Literal, ScopeMember, SourceUnit, Stmt};
use crate::context::CompilationContext;
use crate::diagnostics::SemaError;

fn is_signed_type(name: &str) -> bool {
    matches!(name, "i8" | "i16" | "i32" | "i64")
}

pub fn check(unit: &SourceUnit, _context: &CompilationContext) -> Vec<SemaError> {
    let mut errors = Vec::new();
    for decl in &unit.decls {
        match decl {
            Decl::Function(f) => {
                let mut types = HashMap::new();
                for p in &f.params {
                    types.insert(p.name.clone(), p.ty.name.clone());
                }
                check_block(&f.body, &mut types, &mut errors);
            }
            Decl::Scope(s) => {
                for member in &s.members {
                    if let ScopeMember::Function(f) = member {
                        let mut types = HashMap::new();
                        for p in &f.params {
                            types.insert(p.name.clone(), p.ty.name.clone());
                        }
                        check_block(&f.body, &mut types, &mut errors);
                    }
                }
            }
            _ => {}
        }
    }
    errors
}

fn is_signed_operand(expr: &Expr, types: &HashMap<String, String>) -> bool {
    match expr.unwrap_paren() {
        Expr::Literal(Literal::Int { is_unsigned, .. }, _) => !*is_unsigned,
        Expr::Ident(name, _) => types.get(name).is_some_and(|t| is_signed_type(t)),
        _ => false,
    }
}

fn check_block(block: &Block, types: &mut HashMap<String, String>, errors: &mut Vec<SemaError>) {
    for stmt in &block.stmts {
        check_stmt(stmt, types, errors);
    }
}

fn check_stmt(stmt: &Stmt, types: &mut HashMap<String, String>, errors: &mut Vec<SemaError>) {
    match stmt {
        Stmt::Let(decl) => {
            if let Some(init) = &decl.initializer {
                check_expr(init, types, errors);
            }
            types.insert(decl.name.clone(), decl.ty.name.clone());
        }
        Stmt::Assign { target, value, .. } => {
            check_expr(target, types, errors);
            check_expr(value, types, errors);
        }
        Stmt::Expr(e) => check_expr(e, types, errors),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
            ..
        } => {
            check_expr(cond, types, errors);
            check_block(then_branch, types, errors);
            if let Some(b) = else_branch {
                check_block(b, types, errors);
            }
        }
        Stmt::While { cond, body, .. } => {
            check_expr(cond, types, errors);
            check_block(body, types, errors);
        }
        Stmt::Return { value, .. } => {
            if let Some(v) = value {
                check_expr(v, types, errors);
            }
        }
        Stmt::Block(b) => check_block(b, types, errors),
    }
}

fn check_expr(expr: &Expr, types: &HashMap<String, String>, errors: &mut Vec<SemaError>) {
    if let Expr::Index { base, index, span } = expr {
        if is_signed_operand(index, types) {
            errors.push(SemaError::new(
                "E0905",
                *span,
                "array index must be unsigned",
            ));
        }
        check_expr(base, types, errors);
        check_expr(index, types, errors);
        return;
    }
    match expr {
        Expr::Call { callee, args, .. } => {
            check_expr(callee, types, errors);
            for arg in args {
                check_expr(arg, types, errors);
            }
        }
        Expr::Binary { lhs, rhs, .. } => {
            check_expr(lhs, types, errors);
            check_expr(rhs, types, errors);
        }
        Expr::Unary { operand, .. } => check_expr(operand, types, errors),
        Expr::Paren(inner, _) => check_expr(inner, types, errors),
        Expr::Literal(..) | Expr::Ident(..) | Expr::ScopeAccess { .. } | Expr::Index { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::source::{FunctionDecl, Visibility};
    use crate::ast::Span;

    fn span() -> Span {
        Span::new(1, 1)
    }

    fn index_with(index: Expr) -> SourceUnit {
        SourceUnit {
            file: "f.cn".to_string(),
            decls: vec![Decl::Function(FunctionDecl {
                name: "f".to_string(),
                return_type: "void".to_string(),
                params: vec![],
                body: Block {
                    stmts: vec![Stmt::Expr(Expr::Index {
                        base: Box::new(Expr::Ident("buf".to_string(), span())),
                        index: Box::new(index),
                        span: span(),
                    })],
                },
                visibility: Visibility::Public,
                doc_comments: vec![],
                span: span(),
            })],
            tokens: Default::default(),
        }
    }

    #[test]
    fn signed_literal_index_fires() {
        let ctx = CompilationContext::new();
        let e = Expr::Literal(Literal::Int { value: 3, is_unsigned: false }, span());
        let errors = check(&index_with(e), &ctx);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "E0905");
    }

    #[test]
    fn unsigned_literal_index_does_not_fire() {
        let ctx = CompilationContext::new();
        let e = Expr::Literal(Literal::Int { value: 3, is_unsigned: true }, span());
        assert!(check(&index_with(e), &ctx).is_empty());
    }
}
