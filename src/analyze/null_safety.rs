//! Null-safety for C-stream interop.
//!
//! - A literal `NULL` may appear only as a direct operand of an equality
//!   comparison (`E0903` otherwise).
//! - A whitelisted stream function (`fgets`, `fputs`, `fgetc`, `fputc`,
//!   `gets`) must be called as a direct operand of such a comparison
//!   (`E0901` "missing null check" if called bare); its result may not be
//!   stored into a variable or used elsewhere (`E0904`).
//! - A blacklisted function (`fopen`, `malloc`, `strchr`, ...) is forbidden
//!   outright, each with its own reason string (`E0902`).

use crate::ast::source::{Block, Expr, Literal, SourceUnit, Stmt};
use crate::context::CompilationContext;
use crate::diagnostics::SemaError;
use crate::tables;

pub fn check(unit: &SourceUnit, _context: &CompilationContext) -> Vec<SemaError> {
    let mut errors = Vec::new();
    for decl in &unit.decls {
        if let crate::ast::source::Decl::Function(f) = decl {
            check_block(&f.body, &mut errors);
        }
        if let crate::ast::source::Decl::Scope(s) = decl {
            for member in &s.members {
                if let crate::ast::source::ScopeMember::Function(f) = member {
                    check_block(&f.body, &mut errors);
                }
            }
        }
    }
    errors
}

fn check_block(block: &Block, errors: &mut Vec<SemaError>) {
    for stmt in &block.stmts {
        check_stmt(stmt, errors);
    }
}

fn check_stmt(stmt: &Stmt, errors: &mut Vec<SemaError>) {
    match stmt {
        Stmt::Let(decl) => {
            if let Some(init) = &decl.initializer {
                check_stored_value(init, errors);
            }
        }
        Stmt::Assign { target, value, .. } => {
            check_stored_value(value, errors);
            check_expr(target, errors);
        }
        Stmt::Expr(e) => {
            // A bare call statement never satisfies the comparison
            // requirement, so a whitelisted stream call here is always a
            // missing null check — `check_expr`'s `Call` arm flags it.
            check_expr(e, errors);
        }
        Stmt::If {
            cond,
            then_branch,
            else_branch,
            ..
        } => {
            check_expr(cond, errors);
            check_block(then_branch, errors);
            if let Some(else_block) = else_branch {
                check_block(else_block, errors);
            }
        }
        Stmt::While { cond, body, .. } => {
            check_expr(cond, errors);
            check_block(body, errors);
        }
        Stmt::Return { value, .. } => {
            if let Some(v) = value {
                check_expr(v, errors);
            }
        }
        Stmt::Block(b) => check_block(b, errors),
    }
}

fn missing_null_check(expr: &Expr, name: &str) -> SemaError {
    SemaError::new(
        "E0901",
        expr.span(),
        format!("`{name}`'s result must be checked against NULL"),
    )
    .with_help(format!("wrap the call in `if ({name}(...) != NULL) {{ ... }}`"))
}

/// Flag a whitelisted stream call whose result is assigned/stored rather
/// than tested directly in a comparison. A stored call still has its
/// callee and arguments scanned, but not re-flagged by `check_expr`'s own
/// `Call` arm — storing wins over "missing check" for the same node.
fn check_stored_value(expr: &Expr, errors: &mut Vec<SemaError>) {
    if let Expr::Call { callee, args, .. } = expr.unwrap_paren() {
        if let Some(name) = expr.unwrap_paren().callee_name() {
            if tables::stream_whitelist_reason(&name).is_some() {
                errors.push(SemaError::new(
                    "E0904",
                    expr.span(),
                    format!("`{name}`'s result may not be stored; compare it directly"),
                ));
                check_expr(callee, errors);
                for arg in args {
                    check_expr(arg, errors);
                }
                return;
            }
        }
    }
    check_expr(expr, errors);
}

/// General recursive scan for bare `NULL` literals and blacklisted calls.
/// Equality-comparison operands get their own pass so a direct `NULL`
/// there is accepted.
fn check_expr(expr: &Expr, errors: &mut Vec<SemaError>) {
    match expr {
        Expr::Literal(Literal::Null, span) => {
            errors.push(SemaError::new(
                "E0903",
                *span,
                "`NULL` may only appear as an operand of an equality comparison",
            ));
        }
        Expr::Literal(..) | Expr::Ident(..) | Expr::ScopeAccess { .. } => {}
        Expr::Call { callee, args, .. } => {
            if let Some(name) = expr.callee_name() {
                if let Some(reason) = tables::forbidden_reason(&name) {
                    errors.push(
                        SemaError::new("E0902", expr.span(), format!("`{name}` is forbidden"))
                            .with_help(reason),
                    );
                } else if tables::stream_whitelist_reason(&name).is_some() {
                    // Reached outside a direct equality-comparison operand
                    // position (`check_comparison_operand` intercepts that
                    // case before it gets here): an argument, a non-equality
                    // operand, a bare condition, or any other nested spot.
                    errors.push(missing_null_check(expr, &name));
                }
            }
            check_expr(callee, errors);
            for arg in args {
                check_expr(arg, errors);
            }
        }
        Expr::Binary { op, lhs, rhs, .. } => {
            if op.is_equality() {
                check_comparison_operand(lhs, errors);
                check_comparison_operand(rhs, errors);
            } else {
                check_expr(lhs, errors);
                check_expr(rhs, errors);
            }
        }
        Expr::Unary { operand, .. } => check_expr(operand, errors),
        Expr::Index { base, index, .. } => {
            check_expr(base, errors);
            check_expr(index, errors);
        }
        Expr::Paren(inner, _) => check_expr(inner, errors),
    }
}

/// A direct operand of an equality comparison: a literal `NULL` here is
/// fine, and a whitelisted stream call here satisfies the null-check
/// requirement. Forbidden-call and nested-NULL checks still apply beneath
/// it.
fn check_comparison_operand(expr: &Expr, errors: &mut Vec<SemaError>) {
    match expr.unwrap_paren() {
        Expr::Literal(Literal::Null, _) => {}
        Expr::Call { callee, args, span } => {
            if let Some(name) = expr.unwrap_paren().callee_name() {
                if let Some(reason) = tables::forbidden_reason(&name) {
                    errors.push(
                        SemaError::new("E0902", *span, format!("`{name}` is forbidden"))
                            .with_help(reason),
                    );
                }
            }
            check_expr(callee, errors);
            for arg in args {
                check_expr(arg, errors);
            }
        }
        other => check_expr(other, errors),
    }
}
