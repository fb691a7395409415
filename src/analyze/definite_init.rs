//! Definite-initialization check, cross-language aware. C++ class/struct
//! variables are considered constructor-initialized and never flagged; C
//! structs and source-language structs are flagged if read before
//! assignment, same as any scalar.

use std::collections::HashMap;

use crate::ast::source::{Block, Expr, SourceUnit, Stmt};
use crate::context::CompilationContext;
use crate::diagnostics::SemaError;
use crate::symbol::{RecordKind, SourceLanguage, Symbol};

use super::collect_functions;

/// `true` once a variable's first write has been observed.
type InitState = HashMap<String, bool>;

fn is_constructor_initialized(context: &CompilationContext, type_name: &str) -> bool {
    matches!(
        context.symbols.get_first(type_name),
        Some(Symbol::Record(r))
            if r.header.source_language == SourceLanguage::Cpp
                && matches!(r.kind, RecordKind::Class | RecordKind::Struct)
    )
}

pub fn check(unit: &SourceUnit, context: &CompilationContext) -> Vec<SemaError> {
    let mut errors = Vec::new();
    for func in collect_functions(unit) {
        let mut state = InitState::new();
        for param in &func.decl.params {
            state.insert(param.name.clone(), true);
        }
        check_block(&func.decl.body, &mut state, context, &mut errors);
    }
    errors
}

fn check_block(
    block: &Block,
    state: &mut InitState,
    context: &CompilationContext,
    errors: &mut Vec<SemaError>,
) {
    for stmt in &block.stmts {
        check_stmt(stmt, state, context, errors);
    }
}

fn check_stmt(
    stmt: &Stmt,
    state: &mut InitState,
    context: &CompilationContext,
    errors: &mut Vec<SemaError>,
) {
    match stmt {
        Stmt::Let(decl) => {
            if let Some(init) = &decl.initializer {
                check_expr(init, state, errors);
            }
            let initialized =
                decl.initializer.is_some() || is_constructor_initialized(context, &decl.ty.name);
            state.insert(decl.name.clone(), initialized);
        }
        Stmt::Assign { target, value, .. } => {
            check_expr(value, state, errors);
            if let Expr::Ident(name, _) = target {
                state.insert(name.clone(), true);
            } else {
                check_expr(target, state, errors);
            }
        }
        Stmt::Expr(e) => check_expr(e, state, errors),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
            ..
        } => {
            check_expr(cond, state, errors);
            let mut then_state = state.clone();
            check_block(then_branch, &mut then_state, context, errors);
            match else_branch {
                Some(else_block) => {
                    let mut else_state = state.clone();
                    check_block(else_block, &mut else_state, context, errors);
                    // A variable is definitely initialized after the `if`
                    // only when both arms initialize it.
                    for (name, initialized) in state.iter_mut() {
                        let then_ok = then_state.get(name).copied().unwrap_or(*initialized);
                        let else_ok = else_state.get(name).copied().unwrap_or(*initialized);
                        *initialized = then_ok && else_ok;
                    }
                }
                None => {
                    // The `then` branch may not execute; nothing it
                    // initializes can be relied on afterward.
                }
            }
        }
        Stmt::While { cond, body, .. } => {
            check_expr(cond, state, errors);
            // The loop body may run zero times; check it against a copy so
            // its initializations don't leak to the outer flow.
            let mut body_state = state.clone();
            check_block(body, &mut body_state, context, errors);
        }
        Stmt::Return { value, .. } => {
            if let Some(v) = value {
                check_expr(v, state, errors);
            }
        }
        Stmt::Block(b) => check_block(b, state, context, errors),
    }
}

fn check_expr(expr: &Expr, state: &InitState, errors: &mut Vec<SemaError>) {
    match expr {
        Expr::Ident(name, span) => {
            if state.get(name) == Some(&false) {
                errors.push(SemaError::new(
                    "E0381",
                    *span,
                    format!("`{name}` used before being initialized"),
                ));
            }
        }
        Expr::Literal(..) | Expr::ScopeAccess { .. } => {}
        Expr::Call { callee, args, .. } => {
            check_expr(callee, state, errors);
            for arg in args {
                check_expr(arg, state, errors);
            }
        }
        Expr::Binary { lhs, rhs, .. } => {
            check_expr(lhs, state, errors);
            check_expr(rhs, state, errors);
        }
        Expr::Unary { operand, .. } => check_expr(operand, state, errors),
        Expr::Index { base, index, .. } => {
            check_expr(base, state, errors);
            check_expr(index, state, errors);
        }
        Expr::Paren(inner, _) => check_expr(inner, state, errors),
    }
}
