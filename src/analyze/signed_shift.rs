//! Signed-shift. Shift operators (`<<`, `>>`) with a signed operand are
//! errors, mirroring the array-index analyzer's signed/unsigned
//! recognition.

use std::collections::HashMap;

use crate::ast::source::{BinOp, Block, Decl, Expr, Literal, ScopeMember, SourceUnit, Stmt};
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
    if let Expr::Binary { op, lhs, rhs, span } = expr {
        if op.is_shift() && (is_signed_operand(lhs, types) || is_signed_operand(rhs, types)) {
            errors.push(SemaError::new(
                "E0906",
                *span,
                format!("{} is not defined for a signed operand", shift_text(*op)),
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
        Expr::Unary { operand, .. } => check_expr(operand, types, errors),
        Expr::Index { base, index, .. } => {
            check_expr(base, types, errors);
            check_expr(index, types, errors);
        }
        Expr::Paren(inner, _) => check_expr(inner, types, errors),
        Expr::Literal(..) | Expr::Ident(..) | Expr::ScopeAccess { .. } | Expr::Binary { .. } => {}
    }
}

fn shift_text(op: BinOp) -> &'static str {
    match op {
        BinOp::Shl => "`<<`",
        BinOp::Shr => "`>>`",
        _ => "shift",
    }
}
