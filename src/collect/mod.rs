//! Symbol collectors: one per grammar, each a one-shot walker that turns
//! parse-tree declarations into `Symbol` records.
//!
//! All three share a small context object carrying the current source
//! file, the output symbol list, a warning list, and an optional
//! `SymbolTable` (passed only when field metadata must be recorded
//! side-table-wise). `CollectState` below is that object; each
//! grammar-specific collector (`source::SourceCollector`, `c::CCollector`,
//! `cpp::CppCollector`) owns one and drives it.

pub mod c;
pub mod cpp;
pub mod source;

use crate::ast::Span;
use crate::symbol::Symbol;
use crate::symtab::SymbolTable;

/// A non-blocking collector warning: currently produced only for
/// reserved-field-name matches. Always `warning` severity; never stops
/// collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
    pub struct_name: String,
    pub field_name: String,
    pub span: Span,
}

pub(crate) struct CollectState<'a> {
    pub file: String,
    pub symbols: Vec<Symbol>,
    pub warnings: Vec<Warning>,
    pub table: Option<&'a mut SymbolTable>,
}

impl<'a> CollectState<'a> {
    pub fn new(file: impl Into<String>) -> Self {
        CollectState {
            file: file.into(),
            symbols: Vec::new(),
            warnings: Vec::new(),
            table: None,
        }
    }

    pub fn with_table(file: impl Into<String>, table: &'a mut SymbolTable) -> Self {
        CollectState {
            file: file.into(),
            symbols: Vec::new(),
            warnings: Vec::new(),
            table: Some(table),
        }
    }

    pub fn push(&mut self, symbol: Symbol) {
        log::debug!("collect[{}]: {}", self.file, symbol.name());
        self.symbols.push(symbol);
    }

    pub fn warn(&mut self, struct_name: &str, field_name: &str, span: Span) {
        let message = format!("field `{field_name}` of `{struct_name}` uses a reserved name");
        log::warn!("collect[{}]: {message}", self.file);
        self.warnings.push(Warning {
            message,
            struct_name: struct_name.to_string(),
            field_name: field_name.to_string(),
            span,
        });
    }

    /// Record a struct field in the side table, if a `SymbolTable` was
    /// supplied, and check the reserved-field-name policy while at it — the
    /// same policy applies identically to every collector that records
    /// fields.
    pub fn record_field(
        &mut self,
        struct_name: &str,
        field_name: &str,
        type_name: &str,
        dimensions: Vec<crate::ast::DimensionExpr>,
        span: Span,
    ) {
        if crate::types::is_reserved_field_name(field_name) {
            self.warn(struct_name, field_name, span);
        }
        if let Some(table) = self.table.as_deref_mut() {
            table.add_struct_field(struct_name, field_name, type_name, dimensions);
        }
    }
}
