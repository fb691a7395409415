//! Float modulo. Any `%` whose either operand is statically floating-point
//! is an error. "Statically" means a direct float literal, or a local
//! variable whose declared type is `f32`/`f64` — narrower than full type
//! inference, but enough to catch the common case without it.

use std::collections::HashMap;

use crate::ast::source::{BinOp, Block, Decl, Expr, Literal, ScopeMember, SourceUnit, Stmt};
use crate::context::CompilationContext;
use crate::diagnostics::SemaError;

fn is_float_type(name: &str) -> bool {
    matches!(name, "f32" | "f64")
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

fn is_float_operand(expr: &Expr, types: &HashMap<String, String>) -> bool {
    match expr.unwrap_paren() {
        Expr::Literal(Literal::Float(_), _) => true,
        Expr::Ident(name, _) => types.get(name).is_some_and(|t| is_float_type(t)),
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
    if let Expr::Binary { op: BinOp::Mod, lhs, rhs, span } = expr {
        if is_float_operand(lhs, types) || is_float_operand(rhs, types) {
            errors.push(SemaError::new(
                "E0804",
                *span,
                "`%` is not defined for floating-point operands",
            ));
        }
        check_expr(lhs, types, errors);
        check_expr(rhs, types, errors);
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
        Expr::Index { base, index, .. } => {
            check_expr(base, types, errors);
            check_expr(index, types, errors);
        }
        Expr::Paren(inner, _) => check_expr(inner, types, errors),
        Expr::Literal(..) | Expr::Ident(..) | Expr::ScopeAccess { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::source::{FunctionDecl, TypeRef, Visibility, VariableDecl};
    use crate::ast::Span;

    fn span() -> Span {
        Span::new(1, 1)
    }

    #[test]
    fn float_literal_modulo_is_an_error() {
        let unit = SourceUnit {
            file: "f.cn".to_string(),
            decls: vec![Decl::Function(FunctionDecl {
                name: "f".to_string(),
                return_type: "void".to_string(),
                params: vec![],
                body: Block {
                    stmts: vec![Stmt::Expr(Expr::Binary {
                        op: BinOp::Mod,
                        lhs: Box::new(Expr::Literal(Literal::Float(1.5), span())),
                        rhs: Box::new(Expr::Literal(
                            Literal::Int { value: 2, is_unsigned: false },
                            span(),
                        )),
                        span: span(),
                    })],
                },
                visibility: Visibility::Public,
                doc_comments: vec![],
                span: span(),
            })],
            tokens: Default::default(),
        };
        let ctx = CompilationContext::new();
        let errors = check(&unit, &ctx);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "E0804");
    }

    #[test]
    fn integer_modulo_is_fine() {
        let unit = SourceUnit {
            file: "f.cn".to_string(),
            decls: vec![Decl::Function(FunctionDecl {
                name: "f".to_string(),
                return_type: "void".to_string(),
                params: vec![],
                body: Block {
                    stmts: vec![
                        Stmt::Let(VariableDecl {
                            name: "n".to_string(),
                            ty: TypeRef::scalar("i32"),
                            initializer: None,
                            doc_comments: vec![],
                            span: span(),
                        }),
                        Stmt::Expr(Expr::Binary {
                            op: BinOp::Mod,
                            lhs: Box::new(Expr::Ident("n".to_string(), span())),
                            rhs: Box::new(Expr::Literal(
                                Literal::Int { value: 2, is_unsigned: false },
                                span(),
                            )),
                            span: span(),
                        }),
                    ],
                },
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
