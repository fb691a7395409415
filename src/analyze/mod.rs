//! The ten semantic analyzers: independent, pure rule passes over the
//! source-language parse tree, each `(parse_tree, context) ->
//! Vec<SemaError>`.

pub mod array_index;
pub mod comments;
pub mod define_before_use;
pub mod definite_init;
pub mod div_by_zero;
pub mod float_modulo;
pub mod null_safety;
pub mod param_naming;
pub mod signed_shift;
pub mod struct_field_naming;

use crate::ast::source::{Decl, FunctionDecl, ScopeMember, SourceUnit};

/// One function declaration together with both names a call site might use
/// to reach it: its bare declared name, and its scope-qualified name
/// (`<scope>_<name>`, matching what the collector emits and what
/// `Expr::callee_name` resolves a `Scope.member` call to).
pub(crate) struct FunctionCtx<'a> {
    pub bare_name: String,
    pub qualified_name: String,
    pub decl: &'a FunctionDecl,
}

fn qualify(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(p) => format!("{p}_{name}"),
        None => name.to_string(),
    }
}

/// Every function declared anywhere in the unit, recursing into scopes the
/// same way `collect::source::SourceCollector` does.
pub(crate) fn collect_functions(unit: &SourceUnit) -> Vec<FunctionCtx<'_>> {
    let mut out = Vec::new();
    for decl in &unit.decls {
        collect_from_decl(decl, None, &mut out);
    }
    out
}

fn collect_from_decl<'a>(decl: &'a Decl, prefix: Option<&str>, out: &mut Vec<FunctionCtx<'a>>) {
    match decl {
        Decl::Function(f) => out.push(FunctionCtx {
            bare_name: f.name.clone(),
            qualified_name: qualify(prefix, &f.name),
            decl: f,
        }),
        Decl::Scope(scope) => {
            let qualified_scope = qualify(prefix, &scope.name);
            for member in &scope.members {
                if let ScopeMember::Function(f) = member {
                    out.push(FunctionCtx {
                        bare_name: f.name.clone(),
                        qualified_name: qualify(Some(&qualified_scope), &f.name),
                        decl: f,
                    });
                }
            }
        }
        _ => {}
    }
}
