//! Define-before-use for function calls. Safe cases: (a) already defined
//! in the current translation unit, (b) a compiler intrinsic, (c) a
//! stdlib function of an included header, (d) a C/C++ function present in
//! the SymbolTable as an external symbol. Self-recursion is always an
//! error even if the function is defined.

use std::collections::HashSet;

use crate::ast::source::{Block, Expr, SourceUnit, Stmt};
use crate::context::CompilationContext;
use crate::diagnostics::SemaError;
use crate::symbol::{SourceLanguage, Symbol};
use crate::tables::{self, is_intrinsic};

use super::{collect_functions, FunctionCtx};

/// Case (c) approximates "of an included header": this crate's minimal AST
/// does not model `#include` directives, so any name present in the fixed
/// header-to-stdlib table is treated as reachable, regardless of which
/// header the translation unit actually names.
fn is_stdlib_call(name: &str) -> bool {
    tables::STDLIB_HEADERS
        .iter()
        .any(|(header, _)| tables::is_stdlib_function(header, name))
}

fn defined_externally(context: &CompilationContext, name: &str) -> bool {
    context
        .symbols
        .overloads(name)
        .iter()
        .any(|s| matches!(s.source_language(), SourceLanguage::C | SourceLanguage::Cpp) && s.is_function())
}

pub fn check(unit: &SourceUnit, context: &CompilationContext) -> Vec<SemaError> {
    let mut errors = Vec::new();
    let functions = collect_functions(unit);
    let defined_in_unit: HashSet<String> = functions
        .iter()
        .flat_map(|f| [f.bare_name.clone(), f.qualified_name.clone()])
        .collect();

    for func in &functions {
        check_block(&func.decl.body, func, &defined_in_unit, context, &mut errors);
    }
    errors
}

fn check_block(
    block: &Block,
    func: &FunctionCtx<'_>,
    defined_in_unit: &HashSet<String>,
    context: &CompilationContext,
    errors: &mut Vec<SemaError>,
) {
    for stmt in &block.stmts {
        check_stmt(stmt, func, defined_in_unit, context, errors);
    }
}

fn check_stmt(
    stmt: &Stmt,
    func: &FunctionCtx<'_>,
    defined_in_unit: &HashSet<String>,
    context: &CompilationContext,
    errors: &mut Vec<SemaError>,
) {
    match stmt {
        Stmt::Let(decl) => {
            if let Some(init) = &decl.initializer {
                check_expr(init, func, defined_in_unit, context, errors);
            }
        }
        Stmt::Assign { target, value, .. } => {
            check_expr(target, func, defined_in_unit, context, errors);
            check_expr(value, func, defined_in_unit, context, errors);
        }
        Stmt::Expr(e) => check_expr(e, func, defined_in_unit, context, errors),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
            ..
        } => {
            check_expr(cond, func, defined_in_unit, context, errors);
            check_block(then_branch, func, defined_in_unit, context, errors);
            if let Some(else_block) = else_branch {
                check_block(else_block, func, defined_in_unit, context, errors);
            }
        }
        Stmt::While { cond, body, .. } => {
            check_expr(cond, func, defined_in_unit, context, errors);
            check_block(body, func, defined_in_unit, context, errors);
        }
        Stmt::Return { value, .. } => {
            if let Some(v) = value {
                check_expr(v, func, defined_in_unit, context, errors);
            }
        }
        Stmt::Block(b) => check_block(b, func, defined_in_unit, context, errors),
    }
}

fn check_expr(
    expr: &Expr,
    func: &FunctionCtx<'_>,
    defined_in_unit: &HashSet<String>,
    context: &CompilationContext,
    errors: &mut Vec<SemaError>,
) {
    match expr {
        Expr::Call { callee, args, span } => {
            if let Some(name) = expr.callee_name() {
                if name == func.bare_name || name == func.qualified_name {
                    errors.push(SemaError::new(
                        "E0423",
                        *span,
                        format!("`{name}` calls itself recursively"),
                    ));
                } else if !(defined_in_unit.contains(&name)
                    || is_intrinsic(&name)
                    || is_stdlib_call(&name)
                    || defined_externally(context, &name))
                {
                    errors.push(SemaError::new(
                        "E0422",
                        *span,
                        format!("`{name}` is called before its definition"),
                    ));
                }
            }
            check_expr(callee, func, defined_in_unit, context, errors);
            for arg in args {
                check_expr(arg, func, defined_in_unit, context, errors);
            }
        }
        Expr::Binary { lhs, rhs, .. } => {
            check_expr(lhs, func, defined_in_unit, context, errors);
            check_expr(rhs, func, defined_in_unit, context, errors);
        }
        Expr::Unary { operand, .. } => check_expr(operand, func, defined_in_unit, context, errors),
        Expr::Index { base, index, .. } => {
            check_expr(base, func, defined_in_unit, context, errors);
            check_expr(index, func, defined_in_unit, context, errors);
        }
        Expr::Paren(inner, _) => check_expr(inner, func, defined_in_unit, context, errors),
        Expr::Literal(..) | Expr::Ident(..) | Expr::ScopeAccess { .. } => {}
    }
}
