//! Static division-by-zero. Any constant-folded divisor equal to zero is
//! an error. Folding is intentionally narrow — integer literals and
//! simple `+ - * /` combinations of them — rather than full constant
//! evaluation.

use crate::ast::source::{BinOp, Block, Decl, Expr, Literal, ScopeMember, SourceUnit, Stmt, UnOp};
use crate::context::CompilationContext;
use crate::diagnostics::SemaError;

pub fn check(unit: &SourceUnit, _context: &CompilationContext) -> Vec<SemaError> {
    let mut errors = Vec::new();
    for decl in &unit.decls {
        match decl {
            Decl::Function(f) => check_block(&f.body, &mut errors),
            Decl::Scope(s) => {
                for member in &s.members {
                    if let ScopeMember::Function(f) = member {
                        check_block(&f.body, &mut errors);
                    }
                }
            }
            _ => {}
        }
    }
    errors
}

/// Folds a narrow subset of integer arithmetic; returns `None` the moment
/// anything non-constant (an identifier, a call, a float) is encountered.
fn const_fold(expr: &Expr) -> Option<i64> {
    match expr {
        Expr::Literal(Literal::Int { value, .. }, _) => Some(*value),
        Expr::Unary { op: UnOp::Neg, operand, .. } => const_fold(operand).map(|v| -v),
        Expr::Binary { op, lhs, rhs, .. } => {
            let l = const_fold(lhs)?;
            let r = const_fold(rhs)?;
            match op {
                BinOp::Add => Some(l + r),
                BinOp::Sub => Some(l - r),
                BinOp::Mul => Some(l * r),
                BinOp::Div if r != 0 => Some(l / r),
                _ => None,
            }
        }
        Expr::Paren(inner, _) => const_fold(inner),
        _ => None,
    }
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
                check_expr(init, errors);
            }
        }
        Stmt::Assign { target, value, .. } => {
            check_expr(target, errors);
            check_expr(value, errors);
        }
        Stmt::Expr(e) => check_expr(e, errors),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
            ..
        } => {
            check_expr(cond, errors);
            check_block(then_branch, errors);
            if let Some(b) = else_branch {
                check_block(b, errors);
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

fn check_expr(expr: &Expr, errors: &mut Vec<SemaError>) {
    if let Expr::Binary { op: BinOp::Div, lhs, rhs, span } = expr {
        if const_fold(rhs) == Some(0) {
            errors.push(SemaError::new(
                "E0800",
                *span,
                "division by a constant-folded zero divisor",
            ));
        }
        check_expr(lhs, errors);
        check_expr(rhs, errors);
        return;
    }
    match expr {
        Expr::Call { callee, args, .. } => {
            check_expr(callee, errors);
            for arg in args {
                check_expr(arg, errors);
            }
        }
        Expr::Binary { lhs, rhs, .. } => {
            check_expr(lhs, errors);
            check_expr(rhs, errors);
        }
        Expr::Unary { operand, .. } => check_expr(operand, errors),
        Expr::Index { base, index, .. } => {
            check_expr(base, errors);
            check_expr(index, errors);
        }
        Expr::Paren(inner, _) => check_expr(inner, errors),
        Expr::Literal(..) | Expr::Ident(..) | Expr::ScopeAccess { .. } => {}
    }
}
