//! The source-language collector: walks top-level declarations in a
//! single pass, dispatching by declaration kind.

use std::collections::HashMap;

use crate::ast::source::{
    AccessModifier, BitmapDecl, Decl, FunctionDecl, RegisterDecl, ScopeDecl, ScopeMember,
    StructDecl, VariableDecl, Visibility as SourceVisibility,
};
use crate::symbol::{
    BitmapFieldSymbol, BitmapSymbol, FieldInfo, FunctionSymbol, NamespaceSymbol, ParamInfo,
    RecordKind, RecordSymbol, RegisterAccess, RegisterMemberSymbol, RegisterSymbol,
    SourceLanguage, Symbol, SymbolHeader, VariableSymbol, Visibility,
};
use crate::symtab::SymbolTable;
use crate::types::parse_dimension;

use super::{CollectState, Warning};

fn qualify(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(p) => format!("{p}_{name}"),
        None => name.to_string(),
    }
}

fn header(
    name: String,
    file: &str,
    line: u32,
    column: u32,
    is_exported: bool,
    is_declaration: bool,
    parent: Option<String>,
) -> SymbolHeader {
    SymbolHeader {
        name,
        source_file: file.to_string(),
        source_line: line,
        source_column: column,
        source_language: SourceLanguage::Source,
        is_exported,
        is_declaration,
        parent,
    }
}

/// One-shot walker over a `SourceUnit`. Known source-language constants,
/// for resolving array dimensions written as a macro/constant name, may be
/// supplied via `with_const_values`.
pub struct SourceCollector<'a> {
    state: CollectState<'a>,
    const_values: HashMap<String, i64>,
}

impl<'a> SourceCollector<'a> {
    pub fn new(file: impl Into<String>) -> Self {
        SourceCollector {
            state: CollectState::new(file),
            const_values: HashMap::new(),
        }
    }

    pub fn with_table(file: impl Into<String>, table: &'a mut SymbolTable) -> Self {
        SourceCollector {
            state: CollectState::with_table(file, table),
            const_values: HashMap::new(),
        }
    }

    pub fn with_const_values(mut self, const_values: HashMap<String, i64>) -> Self {
        self.const_values = const_values;
        self
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.state.symbols
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.state.warnings
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.state.symbols
    }

    pub fn collect(&mut self, unit: &crate::ast::source::SourceUnit) {
        let file = self.state.file.clone();
        for decl in &unit.decls {
            self.collect_decl(decl, &file, None);
        }
    }

    fn collect_decl(&mut self, decl: &Decl, file: &str, prefix: Option<&str>) {
        match decl {
            Decl::Scope(scope) => self.collect_scope(scope, file, prefix),
            Decl::Struct(s) => self.collect_struct(s, file),
            Decl::Register(r) => self.collect_register(r, file, prefix),
            Decl::Bitmap(b) => self.collect_bitmap(b, file, prefix),
            Decl::Function(f) => self.collect_function(f, file, prefix),
            Decl::Variable(v) => self.collect_variable(v, file, prefix),
        }
    }

    fn collect_scope(&mut self, scope: &ScopeDecl, file: &str, prefix: Option<&str>) {
        let qualified = qualify(prefix, &scope.name);
        self.state.push(Symbol::Namespace(NamespaceSymbol {
            header: header(
                qualified.clone(),
                file,
                scope.span.line,
                scope.span.column,
                true,
                false,
                prefix.map(str::to_string),
            ),
        }));
        for member in &scope.members {
            match member {
                ScopeMember::Function(f) => self.collect_function(f, file, Some(&qualified)),
                ScopeMember::Variable(v) => self.collect_variable(v, file, Some(&qualified)),
                ScopeMember::Bitmap(b) => self.collect_bitmap(b, file, Some(&qualified)),
                ScopeMember::Register(r) => self.collect_register(r, file, Some(&qualified)),
            }
        }
    }

    fn collect_struct(&mut self, decl: &StructDecl, file: &str) {
        let mut fields = Vec::new();
        for field in &decl.fields {
            let resolved_dims: Vec<_> = field
                .ty
                .dimension_texts
                .iter()
                .map(|t| parse_dimension(t.as_deref(), &self.const_values))
                .collect();
            let dims = if let Some(len) = field.ty.string_len {
                crate::types::append_string_terminator(resolved_dims, len)
            } else {
                resolved_dims
            };
            let is_array = !dims.is_empty();
            self.state.record_field(
                &decl.name,
                &field.name,
                &field.ty.name,
                dims.clone(),
                field.span,
            );
            fields.push((
                field.name.clone(),
                FieldInfo {
                    type_name: field.ty.name.clone(),
                    dimensions: dims,
                    is_array,
                    is_const: field.ty.is_const,
                },
            ));
        }
        self.state.push(Symbol::Record(RecordSymbol {
            header: header(
                decl.name.clone(),
                file,
                decl.span.line,
                decl.span.column,
                true,
                false,
                None,
            ),
            kind: RecordKind::Struct,
            fields,
        }));
    }

    fn collect_register(&mut self, decl: &RegisterDecl, file: &str, prefix: Option<&str>) {
        let qualified = qualify(prefix, &decl.name);
        self.state.push(Symbol::Register(RegisterSymbol {
            header: header(
                qualified.clone(),
                file,
                decl.span.line,
                decl.span.column,
                true,
                false,
                prefix.map(str::to_string),
            ),
        }));
        for member in &decl.members {
            let member_name = format!("{qualified}_{}", member.name);
            let access = match member.access {
                AccessModifier::ReadWrite => RegisterAccess::ReadWrite,
                AccessModifier::ReadOnly => RegisterAccess::ReadOnly,
                AccessModifier::WriteOnly => RegisterAccess::WriteOnly,
            };
            self.state.push(Symbol::RegisterMember(RegisterMemberSymbol {
                header: header(
                    member_name,
                    file,
                    member.span.line,
                    member.span.column,
                    true,
                    false,
                    Some(qualified.clone()),
                ),
                access,
                c_type: member.c_type.clone(),
            }));
        }
    }

    fn collect_bitmap(&mut self, decl: &BitmapDecl, file: &str, prefix: Option<&str>) {
        let qualified = qualify(prefix, &decl.name);
        self.state.push(Symbol::Bitmap(BitmapSymbol {
            header: header(
                qualified.clone(),
                file,
                decl.span.line,
                decl.span.column,
                true,
                false,
                prefix.map(str::to_string),
            ),
            backing_type: decl.backing_type.clone(),
        }));
        let mut bit_offset: u8 = 0;
        for field in &decl.fields {
            let width = field.width.unwrap_or(1);
            let derived_type = crate::types::bitmap_field_type(width).to_string();
            let signature = crate::types::bitmap_field_signature(bit_offset, width);
            let field_name = format!("{qualified}_{}", field.name);
            self.state.push(Symbol::BitmapField(BitmapFieldSymbol {
                header: header(
                    field_name,
                    file,
                    field.span.line,
                    field.span.column,
                    true,
                    false,
                    Some(qualified.clone()),
                ),
                bit_offset,
                width,
                derived_type,
                signature,
            }));
            bit_offset += width;
        }
    }

    fn collect_function(&mut self, decl: &FunctionDecl, file: &str, prefix: Option<&str>) {
        // Scope prefixing applies to the function name, not to parameter
        // names.
        let qualified = qualify(prefix, &decl.name);
        let params: Vec<ParamInfo> = decl
            .params
            .iter()
            .map(|p| ParamInfo {
                name: p.name.clone(),
                type_name: p.ty.name.clone(),
                is_const: p.ty.is_const,
                is_array: p.ty.is_array,
                dimensions: p
                    .ty
                    .dimension_texts
                    .iter()
                    .map(|t| parse_dimension(t.as_deref(), &self.const_values))
                    .collect(),
            })
            .collect();
        let param_types = params
            .iter()
            .map(|p| p.type_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let signature = format!("{} {}({})", decl.return_type, qualified, param_types);
        // Visibility defaults to private; top-level (unscoped) functions
        // are always public.
        let visibility = if prefix.is_none() {
            Visibility::Public
        } else {
            match decl.visibility {
                SourceVisibility::Public => Visibility::Public,
                SourceVisibility::Private => Visibility::Private,
            }
        };
        self.state.push(Symbol::Function(FunctionSymbol {
            header: header(
                qualified,
                file,
                decl.span.line,
                decl.span.column,
                matches!(visibility, Visibility::Public),
                false,
                prefix.map(str::to_string),
            ),
            return_type: decl.return_type.clone(),
            params,
            signature,
            visibility: Some(visibility),
        }));
    }

    fn collect_variable(&mut self, decl: &VariableDecl, file: &str, prefix: Option<&str>) {
        let qualified = qualify(prefix, &decl.name);
        let resolved_dims: Vec<_> = decl
            .ty
            .dimension_texts
            .iter()
            .map(|t| parse_dimension(t.as_deref(), &self.const_values))
            .collect();
        let dims = if let Some(len) = decl.ty.string_len {
            crate::types::append_string_terminator(resolved_dims, len)
        } else {
            resolved_dims
        };
        let initial_value = decl.initializer.as_ref().map(render_expr_verbatim);
        self.state.push(Symbol::Variable(VariableSymbol {
            header: header(
                qualified,
                file,
                decl.span.line,
                decl.span.column,
                prefix.is_none(),
                false,
                prefix.map(str::to_string),
            ),
            type_name: decl.ty.name.clone(),
            is_const: decl.ty.is_const,
            is_array: decl.ty.is_array || !dims.is_empty(),
            dimensions: dims,
            initial_value,
        }));
    }
}

/// Preserve the initializer verbatim for later const-inlining. This is a
/// best-effort textual rendering, not an evaluator: nothing in this crate
/// executes code.
fn render_expr_verbatim(expr: &crate::ast::source::Expr) -> String {
    use crate::ast::source::{BinOp, Expr, Literal, UnOp};
    match expr {
        Expr::Literal(Literal::Int { value, is_unsigned }, _) => {
            if *is_unsigned {
                format!("{value}u")
            } else {
                value.to_string()
            }
        }
        Expr::Literal(Literal::Float(n), _) => n.to_string(),
        Expr::Literal(Literal::Bool(b), _) => b.to_string(),
        Expr::Literal(Literal::Str(s), _) => format!("\"{s}\""),
        Expr::Literal(Literal::Null, _) => "NULL".to_string(),
        Expr::Ident(name, _) => name.clone(),
        Expr::ScopeAccess { scope, member, .. } => format!("{scope}.{member}"),
        Expr::Call { callee, args, .. } => format!(
            "{}({})",
            render_expr_verbatim(callee),
            args.iter().map(render_expr_verbatim).collect::<Vec<_>>().join(", ")
        ),
        Expr::Binary { op, lhs, rhs, .. } => {
            let sym = match op {
                BinOp::Add => "+",
                BinOp::Sub => "-",
                BinOp::Mul => "*",
                BinOp::Div => "/",
                BinOp::Mod => "%",
                BinOp::Eq => "==",
                BinOp::Ne => "!=",
                BinOp::Lt => "<",
                BinOp::Le => "<=",
                BinOp::Gt => ">",
                BinOp::Ge => ">=",
                BinOp::And => "&&",
                BinOp::Or => "||",
                BinOp::Shl => "<<",
                BinOp::Shr => ">>",
                BinOp::BitAnd => "&",
                BinOp::BitOr => "|",
                BinOp::BitXor => "^",
            };
            format!("{} {} {}", render_expr_verbatim(lhs), sym, render_expr_verbatim(rhs))
        }
        Expr::Unary { op, operand, .. } => {
            let sym = match op {
                UnOp::Neg => "-",
                UnOp::Not => "!",
                UnOp::BitNot => "~",
            };
            format!("{sym}{}", render_expr_verbatim(operand))
        }
        Expr::Index { base, index, .. } => {
            format!("{}[{}]", render_expr_verbatim(base), render_expr_verbatim(index))
        }
        Expr::Paren(inner, _) => format!("({})", render_expr_verbatim(inner)),
    }
}
