//! The `SymbolTable`: a name-indexed multi-map of symbol records, a
//! per-file index, struct-field and enum-width side tables, and the
//! conflict classifier.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::ast::DimensionExpr;
use crate::symbol::{FieldInfo, SourceLanguage, Symbol};

/// One definition's location, as listed in a conflict record: each
/// definition's `(language, file, line)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictLocation {
    pub language: SourceLanguage,
    pub file: String,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Conflict {
    CrossLanguage {
        name: String,
        locations: Vec<ConflictLocation>,
    },
    DuplicateSourceDefinition {
        name: String,
        locations: Vec<ConflictLocation>,
    },
}

impl Conflict {
    pub fn name(&self) -> &str {
        match self {
            Conflict::CrossLanguage { name, .. } => name,
            Conflict::DuplicateSourceDefinition { name, .. } => name,
        }
    }
}

/// An ordered `field_name -> FieldInfo` map with last-write-wins semantics:
/// re-adding the same field name overwrites the earlier entry in place. A
/// plain `Vec` keeps insertion order without pulling in an indexmap
/// dependency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedFieldMap {
    entries: Vec<(String, FieldInfo)>,
}

impl OrderedFieldMap {
    pub fn insert(&mut self, name: String, info: FieldInfo) {
        if let Some(existing) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = info;
        } else {
            self.entries.push((name, info));
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldInfo> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldInfo)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    by_name: HashMap<String, Vec<usize>>,
    by_file: HashMap<String, Vec<usize>>,
    struct_fields: HashMap<String, OrderedFieldMap>,
    enum_widths: HashMap<String, u8>,
    needs_struct_keyword: HashSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Append a symbol to the name-index and file-index lists. No
    /// deduplication at insertion; conflict judgement happens at query time
    /// in `conflicts()`.
    pub fn add(&mut self, symbol: Symbol) {
        let idx = self.symbols.len();
        let name = symbol.name().to_string();
        let file = symbol.header().source_file.clone();
        log::trace!("symtab: add {name} ({file}:{})", symbol.header().source_line);
        self.symbols.push(symbol);
        self.by_name.entry(name).or_default().push(idx);
        self.by_file.entry(file).or_default().push(idx);
    }

    pub fn get_first(&self, name: &str) -> Option<&Symbol> {
        self.by_name
            .get(name)
            .and_then(|idxs| idxs.first())
            .map(|&i| &self.symbols[i])
    }

    /// All records sharing `name`, in insertion order.
    pub fn overloads(&self, name: &str) -> Vec<&Symbol> {
        self.by_name
            .get(name)
            .map(|idxs| idxs.iter().map(|&i| &self.symbols[i]).collect())
            .unwrap_or_default()
    }

    pub fn by_file(&self, path: &str) -> Vec<&Symbol> {
        self.by_file
            .get(path)
            .map(|idxs| idxs.iter().map(|&i| &self.symbols[i]).collect())
            .unwrap_or_default()
    }

    pub fn by_language(&self, lang: SourceLanguage) -> Vec<&Symbol> {
        self.symbols
            .iter()
            .filter(|s| s.source_language() == lang)
            .collect()
    }

    pub fn all(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn add_struct_field(
        &mut self,
        struct_name: &str,
        field_name: &str,
        type_name: &str,
        dimensions: Vec<DimensionExpr>,
    ) {
        let is_array = !dimensions.is_empty();
        let info = FieldInfo {
            type_name: type_name.to_string(),
            dimensions,
            is_array,
            is_const: false,
        };
        self.struct_fields
            .entry(struct_name.to_string())
            .or_default()
            .insert(field_name.to_string(), info);
    }

    pub fn field_type(&self, struct_name: &str, field_name: &str) -> Option<&str> {
        self.struct_fields
            .get(struct_name)?
            .get(field_name)
            .map(|f| f.type_name.as_str())
    }

    pub fn fields_of(&self, struct_name: &str) -> Option<&OrderedFieldMap> {
        self.struct_fields.get(struct_name)
    }

    pub fn mark_needs_struct_keyword(&mut self, name: &str) {
        self.needs_struct_keyword.insert(name.to_string());
    }

    pub fn needs_struct_keyword(&self, name: &str) -> bool {
        self.needs_struct_keyword.contains(name)
    }

    pub fn add_enum_bit_width(&mut self, enum_name: &str, width: u8) {
        self.enum_widths.insert(enum_name.to_string(), width);
    }

    pub fn enum_bit_width(&self, enum_name: &str) -> Option<u8> {
        self.enum_widths.get(enum_name).copied()
    }

    /// The struct-field side table, for rebuilding the external-struct-field
    /// cache.
    pub fn struct_field_table(&self) -> &HashMap<String, OrderedFieldMap> {
        &self.struct_fields
    }

    /// Scan every name-list with more than one record and classify it.
    pub fn conflicts(&self) -> Vec<Conflict> {
        let mut conflicts = Vec::new();
        for (name, idxs) in &self.by_name {
            if idxs.len() <= 1 {
                continue;
            }
            let records: Vec<&Symbol> = idxs.iter().map(|&i| &self.symbols[i]).collect();
            if let Some(conflict) = classify(name, &records) {
                conflicts.push(conflict);
            }
        }
        conflicts
    }
}

/// The deterministic conflict classifier.
fn classify(name: &str, records: &[&Symbol]) -> Option<Conflict> {
    let definitions: Vec<&&Symbol> = records.iter().filter(|s| !s.is_declaration()).collect();

    // Step 1: <= 1 definition, no conflict.
    if definitions.len() <= 1 {
        return None;
    }

    // Step 2: valid C++ overload set (all definitions are C++ functions
    // with pairwise distinct signatures).
    let all_cpp_functions = definitions
        .iter()
        .all(|s| s.source_language() == SourceLanguage::Cpp && s.is_function());
    if all_cpp_functions {
        let mut signatures: Vec<&str> = definitions
            .iter()
            .filter_map(|s| s.signature())
            .collect();
        signatures.sort_unstable();
        let distinct = signatures.len() == definitions.len() && {
            signatures.dedup();
            signatures.len() == definitions.len()
        };
        if distinct {
            return None;
        }
    }

    let has_source_def = definitions
        .iter()
        .any(|s| s.source_language() == SourceLanguage::Source);
    let has_c_or_cpp_def = definitions
        .iter()
        .any(|s| matches!(s.source_language(), SourceLanguage::C | SourceLanguage::Cpp));

    // Step 3: cross-language conflict.
    if has_source_def && has_c_or_cpp_def {
        return Some(Conflict::CrossLanguage {
            name: name.to_string(),
            locations: definitions.iter().map(|s| location_of(s)).collect(),
        });
    }

    // Step 4: more than one source-language definition.
    let source_defs: Vec<&&Symbol> = definitions
        .iter()
        .filter(|s| s.source_language() == SourceLanguage::Source)
        .collect();
    if source_defs.len() > 1 {
        return Some(Conflict::DuplicateSourceDefinition {
            name: name.to_string(),
            locations: source_defs.iter().map(|s| location_of(s)).collect(),
        });
    }

    // Step 5: the only remaining overlap is C and C++ sharing a name —
    // accepted silently as interoperable declarations.
    None
}

fn location_of(symbol: &Symbol) -> ConflictLocation {
    let header = symbol.header();
    ConflictLocation {
        language: header.source_language,
        file: header.source_file.clone(),
        line: header.source_line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{FunctionSymbol, SymbolHeader};

    fn func(name: &str, lang: SourceLanguage, is_decl: bool, signature: &str) -> Symbol {
        Symbol::Function(FunctionSymbol {
            header: SymbolHeader {
                name: name.to_string(),
                source_file: "f".to_string(),
                source_line: 1,
                source_column: 1,
                source_language: lang,
                is_exported: true,
                is_declaration: is_decl,
                parent: None,
            },
            return_type: "void".to_string(),
            params: vec![],
            signature: signature.to_string(),
            visibility: None,
        })
    }

    #[test]
    fn get_first_preserves_header_fields() {
        let mut table = SymbolTable::new();
        table.add(func("update", SourceLanguage::Source, false, "void update()"));
        let got = table.get_first("update").unwrap();
        assert_eq!(got.name(), "update");
        assert_eq!(got.source_language(), SourceLanguage::Source);
    }

    #[test]
    fn overloads_preserve_insertion_order() {
        let mut table = SymbolTable::new();
        table.add(func("add", SourceLanguage::Cpp, false, "int add(int, int)"));
        table.add(func("add", SourceLanguage::Cpp, false, "float add(float, float)"));
        let names: Vec<&str> = table
            .overloads("add")
            .iter()
            .map(|s| s.signature().unwrap())
            .collect();
        assert_eq!(names, vec!["int add(int, int)", "float add(float, float)"]);
    }

    #[test]
    fn struct_field_round_trips() {
        let mut table = SymbolTable::new();
        table.add_struct_field("Point", "x", "i32", vec![]);
        assert_eq!(table.field_type("Point", "x"), Some("i32"));
    }

    #[test]
    fn cross_language_conflict_detected() {
        let mut table = SymbolTable::new();
        table.add(func("update", SourceLanguage::Source, false, "void update()"));
        table.add(func("update", SourceLanguage::C, false, "void update()"));
        let conflicts = table.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert!(matches!(conflicts[0], Conflict::CrossLanguage { .. }));
    }

    #[test]
    fn cpp_overload_set_is_not_a_conflict() {
        let mut table = SymbolTable::new();
        table.add(func("add", SourceLanguage::Cpp, false, "int add(int, int)"));
        table.add(func("add", SourceLanguage::Cpp, false, "float add(float, float)"));
        assert!(table.conflicts().is_empty());
    }

    #[test]
    fn duplicate_source_definitions_detected() {
        let mut table = SymbolTable::new();
        table.add(func("f", SourceLanguage::Source, false, "void f()"));
        table.add(func("f", SourceLanguage::Source, false, "void f()"));
        let conflicts = table.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert!(matches!(conflicts[0], Conflict::DuplicateSourceDefinition { .. }));
    }

    #[test]
    fn c_and_cpp_sharing_a_name_is_accepted() {
        let mut table = SymbolTable::new();
        table.add(func("helper", SourceLanguage::C, false, "void helper()"));
        table.add(func("helper", SourceLanguage::Cpp, false, "void helper()"));
        assert!(table.conflicts().is_empty());
    }

    #[test]
    fn classification_is_idempotent() {
        let mut table = SymbolTable::new();
        table.add(func("update", SourceLanguage::Source, false, "void update()"));
        table.add(func("update", SourceLanguage::C, false, "void update()"));
        assert_eq!(table.conflicts(), table.conflicts());
    }
}
