//! `CompilationContext`: an ordinary owned value, constructed once per
//! compilation and threaded by reference into every collector and
//! analyzer; there is no global or `static` anywhere in this crate.

use std::collections::{HashMap, HashSet};

use crate::symtab::SymbolTable;

/// `external_struct_name -> set<field_name>`, rebuilt from the
/// `SymbolTable`'s struct-field side table. Always a strict function of the
/// `SymbolTable`'s current contents — rebuilding twice with no intervening
/// mutation yields identical results.
pub type ExternalStructFields = HashMap<String, HashSet<String>>;

#[derive(Debug, Default)]
pub struct CompilationContext {
    pub symbols: SymbolTable,
    external_struct_fields: ExternalStructFields,
}

impl CompilationContext {
    pub fn new() -> Self {
        CompilationContext::default()
    }

    /// Clear everything, ready for the next compilation unit.
    pub fn reset(&mut self) {
        *self = CompilationContext::new();
    }

    /// Rebuild the external-struct-fields cache from the current
    /// `SymbolTable` contents.
    ///
    /// A field is "external" when its struct was collected by the C or C++
    /// collector rather than the source-language collector: those are the
    /// fields phase 3 (definite-initialization) must *not* flag, since their
    /// initialization happens in a constructor or translation unit this
    /// crate never sees.
    pub fn rebuild_external_struct_fields(&mut self) {
        self.external_struct_fields.clear();
        let external_structs: HashSet<String> = self
            .symbols
            .all()
            .filter(|s| {
                matches!(s.source_language(), crate::symbol::SourceLanguage::C | crate::symbol::SourceLanguage::Cpp)
            })
            .filter_map(|s| match s {
                crate::symbol::Symbol::Record(r) => Some(r.header.name.clone()),
                _ => None,
            })
            .collect();

        for struct_name in external_structs {
            if let Some(fields) = self.symbols.fields_of(&struct_name) {
                let names: HashSet<String> = fields.iter().map(|(name, _)| name.to_string()).collect();
                self.external_struct_fields.insert(struct_name, names);
            }
        }
    }

    pub fn is_external_struct_field(&self, struct_name: &str, field_name: &str) -> bool {
        self.external_struct_fields
            .get(struct_name)
            .is_some_and(|fields| fields.contains(field_name))
    }

    pub fn external_struct_fields(&self) -> &ExternalStructFields {
        &self.external_struct_fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{RecordKind, RecordSymbol, SourceLanguage, SymbolHeader};

    fn header(name: &str, lang: SourceLanguage) -> SymbolHeader {
        SymbolHeader {
            name: name.to_string(),
            source_file: "f".to_string(),
            source_line: 1,
            source_column: 1,
            source_language: lang,
            is_exported: true,
            is_declaration: false,
            parent: None,
        }
    }

    #[test]
    fn rebuild_is_a_pure_function_of_symbol_table_contents() {
        let mut ctx = CompilationContext::new();
        ctx.symbols.add(crate::symbol::Symbol::Record(RecordSymbol {
            header: header("Config", SourceLanguage::C),
            kind: RecordKind::Struct,
            fields: vec![],
        }));
        ctx.symbols.add_struct_field("Config", "baud", "uint32_t", vec![]);

        ctx.rebuild_external_struct_fields();
        assert!(ctx.is_external_struct_field("Config", "baud"));

        let first = ctx.external_struct_fields().clone();
        ctx.rebuild_external_struct_fields();
        assert_eq!(first, *ctx.external_struct_fields());
    }

    #[test]
    fn reset_clears_everything() {
        let mut ctx = CompilationContext::new();
        ctx.symbols.add(crate::symbol::Symbol::Record(RecordSymbol {
            header: header("Config", SourceLanguage::C),
            kind: RecordKind::Struct,
            fields: vec![],
        }));
        ctx.reset();
        assert!(ctx.symbols.all().next().is_none());
    }
}
