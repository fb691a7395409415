//! The C collector: walks external declarations, dispatching on storage
//! class and declarator shape.

use std::collections::HashMap;

use crate::ast::c::{
    Declaration, DirectDeclarator, ExternalDecl, ParamDecl, StorageClass, TranslationUnit,
    TypeSpecifier,
};
use crate::symbol::{
    EnumMemberSymbol, EnumSymbol, FieldInfo, FunctionSymbol, ParamInfo, RecordKind, RecordSymbol,
    SourceLanguage, Symbol, SymbolHeader, TypeSymbol, VariableSymbol,
};
use crate::symtab::SymbolTable;
use crate::types::parse_dimension;

use super::CollectState;

fn header(name: String, file: &str, is_exported: bool, is_declaration: bool) -> SymbolHeader {
    SymbolHeader {
        name,
        source_file: file.to_string(),
        // This AST threads `Span` on every node that has one, but a
        // handful of C declaration shapes (storage-class-only specifiers)
        // don't carry their own span in this minimal AST, so line/column
        // default to 0 there. A real grammar binding supplies real spans
        // throughout.
        source_line: 0,
        source_column: 0,
        source_language: SourceLanguage::C,
        is_exported,
        is_declaration,
        parent: None,
    }
}

fn pointer_suffix(type_text: &str, pointer_depth: u32) -> String {
    if pointer_depth == 0 {
        type_text.to_string()
    } else {
        format!("{type_text}{}", "*".repeat(pointer_depth as usize))
    }
}

fn params_from(params: &[ParamDecl]) -> Vec<ParamInfo> {
    params
        .iter()
        .map(|p| {
            let base_type = p.specifiers.type_text();
            let (name, dims, pointer_depth) = match &p.declarator {
                Some(d) => (
                    d.direct.ident().unwrap_or("").to_string(),
                    d.direct
                        .dimension_texts()
                        .iter()
                        .map(|t| parse_dimension(t.as_deref(), &HashMap::new()))
                        .collect(),
                    d.pointer_depth,
                ),
                None => (String::new(), Vec::new(), 0),
            };
            let is_array = !dims.is_empty();
            ParamInfo {
                name,
                type_name: pointer_suffix(&base_type, pointer_depth),
                is_const: false,
                is_array,
                dimensions: dims,
            }
        })
        .collect()
}

/// One-shot walker over a `TranslationUnit`.
pub struct CCollector<'a> {
    state: CollectState<'a>,
}

impl<'a> CCollector<'a> {
    pub fn new(file: impl Into<String>) -> Self {
        CCollector {
            state: CollectState::new(file),
        }
    }

    pub fn with_table(file: impl Into<String>, table: &'a mut SymbolTable) -> Self {
        CCollector {
            state: CollectState::with_table(file, table),
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.state.symbols
    }

    pub fn warnings(&self) -> &[super::Warning] {
        &self.state.warnings
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.state.symbols
    }

    pub fn collect(&mut self, unit: &TranslationUnit) {
        let file = self.state.file.clone();
        for decl in &unit.external_decls {
            self.collect_external(decl, &file);
        }
    }

    fn collect_external(&mut self, decl: &ExternalDecl, file: &str) {
        match decl {
            ExternalDecl::FunctionDefinition(def) => {
                let name = def.declarator.direct.ident().unwrap_or_default().to_string();
                let return_type =
                    pointer_suffix(&def.specifiers.type_text(), def.declarator.pointer_depth);
                let params = def
                    .declarator
                    .direct
                    .params()
                    .map(params_from)
                    .unwrap_or_default();
                let signature = format!(
                    "{return_type} {name}({})",
                    params.iter().map(|p| p.type_name.as_str()).collect::<Vec<_>>().join(", ")
                );
                self.state.push(Symbol::Function(FunctionSymbol {
                    header: header(name, file, true, false),
                    return_type,
                    params,
                    signature,
                    visibility: None,
                }));
            }
            ExternalDecl::Declaration(decl) => self.collect_declaration(decl, file),
        }
    }

    fn collect_declaration(&mut self, decl: &Declaration, file: &str) {
        // An enum specifier produces its Enum + EnumMember records
        // regardless of storage class or whether any declarator follows
        // (e.g. a bare `enum Color { RED, GREEN };`).
        for spec in &decl.specifiers.type_specifiers {
            if let TypeSpecifier::Enum(e) = spec {
                if let Some(name) = &e.name {
                    if !e.enumerators.is_empty() {
                        self.collect_enum(name, &e.enumerators, file);
                    }
                }
            }
        }

        // A struct/union specifier carrying a member list is a definition;
        // record its own tag name now. A named struct without a typedef
        // needs the `struct` keyword on every later reference, so mark it
        // whenever storage isn't typedef.
        let mut struct_tag: Option<(String, bool)> = None; // (name, is_union)
        for spec in &decl.specifiers.type_specifiers {
            let (sou, is_union) = match spec {
                TypeSpecifier::Struct(s) => (Some(s), false),
                TypeSpecifier::Union(s) => (Some(s), true),
                _ => (None, false),
            };
            if let Some(sou) = sou {
                if let (Some(name), Some(members)) = (&sou.name, &sou.members) {
                    self.collect_record(name, members, is_union, file);
                    struct_tag = Some((name.clone(), is_union));
                    if decl.specifiers.storage != StorageClass::Typedef {
                        if let Some(table) = self.state.table.as_deref_mut() {
                            table.mark_needs_struct_keyword(name);
                        }
                    }
                }
            }
        }

        match decl.specifiers.storage {
            StorageClass::Typedef => {
                for init in &decl.declarators {
                    let ident = init
                        .declarator
                        .direct
                        .ident()
                        .unwrap_or_default()
                        .to_string();
                    let base_type = match &struct_tag {
                        Some((tag, _)) => tag.clone(),
                        None => decl.specifiers.type_text(),
                    };
                    // Anonymous struct typedef'd under this identifier:
                    // emit both Struct and Type for the same name. A named
                    // tag equal to the typedef identifier was already
                    // emitted above as a Struct — suppress the duplicate.
                    // A named tag differing from the identifier emits only
                    // the Type alias here.
                    if struct_tag.is_none() {
                        for spec in &decl.specifiers.type_specifiers {
                            if let TypeSpecifier::Struct(s) = spec {
                                if s.name.is_none() {
                                    if let Some(members) = &s.members {
                                        self.collect_record(&ident, members, false, file);
                                    }
                                }
                            }
                        }
                    }
                    let tag_matches_ident = struct_tag
                        .as_ref()
                        .is_some_and(|(tag, _)| tag == &ident);
                    if !tag_matches_ident {
                        self.state.push(Symbol::Type(TypeSymbol {
                            header: header(ident, file, true, false),
                            aliased_type: pointer_suffix(&base_type, init.declarator.pointer_depth),
                        }));
                    }
                }
            }
            StorageClass::Extern => {
                for init in &decl.declarators {
                    let name = init
                        .declarator
                        .direct
                        .ident()
                        .unwrap_or_default()
                        .to_string();
                    let dims: Vec<_> = init
                        .declarator
                        .direct
                        .dimension_texts()
                        .iter()
                        .map(|t| parse_dimension(t.as_deref(), &HashMap::new()))
                        .collect();
                    self.state.push(Symbol::Variable(VariableSymbol {
                        header: header(name, file, false, true),
                        type_name: pointer_suffix(
                            &decl.specifiers.type_text(),
                            init.declarator.pointer_depth,
                        ),
                        is_const: false,
                        is_array: !dims.is_empty(),
                        dimensions: dims,
                        initial_value: None,
                    }));
                }
            }
            StorageClass::Static | StorageClass::None => {
                for init in &decl.declarators {
                    if init.declarator.direct.is_function() {
                        let name = init
                            .declarator
                            .direct
                            .ident()
                            .unwrap_or_default()
                            .to_string();
                        let params = init
                            .declarator
                            .direct
                            .params()
                            .map(params_from)
                            .unwrap_or_default();
                        let return_type = pointer_suffix(
                            &decl.specifiers.type_text(),
                            init.declarator.pointer_depth,
                        );
                        let signature = format!(
                            "{return_type} {name}({})",
                            params.iter().map(|p| p.type_name.as_str()).collect::<Vec<_>>().join(", ")
                        );
                        self.state.push(Symbol::Function(FunctionSymbol {
                            header: header(name, file, true, true),
                            return_type,
                            params,
                            signature,
                            visibility: None,
                        }));
                    } else if init.declarator.direct.ident().is_some() {
                        let name = init
                            .declarator
                            .direct
                            .ident()
                            .unwrap_or_default()
                            .to_string();
                        let dims: Vec<_> = init
                            .declarator
                            .direct
                            .dimension_texts()
                            .iter()
                            .map(|t| parse_dimension(t.as_deref(), &HashMap::new()))
                            .collect();
                        self.state.push(Symbol::Variable(VariableSymbol {
                            header: header(name, file, true, false),
                            type_name: pointer_suffix(
                                &decl.specifiers.type_text(),
                                init.declarator.pointer_depth,
                            ),
                            is_const: false,
                            is_array: !dims.is_empty(),
                            dimensions: dims,
                            initial_value: init.initializer.clone(),
                        }));
                    }
                }
            }
        }
    }

    fn collect_record(
        &mut self,
        name: &str,
        members: &[crate::ast::c::StructMember],
        is_union: bool,
        file: &str,
    ) {
        let mut fields = Vec::new();
        for member in members {
            // Struct fields that reference another struct are stored as
            // the plain identifier, never the concatenated
            // `struct<Name>` textual form.
            let field_type = match member.specifiers.type_specifiers.first() {
                Some(TypeSpecifier::Struct(s)) | Some(TypeSpecifier::Union(s)) => {
                    s.name.clone().unwrap_or_else(|| member.specifiers.type_text())
                }
                _ => member.specifiers.type_text(),
            };
            for declarator in &member.declarators {
                let Some(field_name) = declarator.direct.ident() else {
                    continue;
                };
                let dims: Vec<_> = declarator
                    .direct
                    .dimension_texts()
                    .iter()
                    .map(|t| parse_dimension(t.as_deref(), &HashMap::new()))
                    .collect();
                self.state
                    .record_field(name, field_name, &field_type, dims.clone(), member.span);
                fields.push((
                    field_name.to_string(),
                    FieldInfo {
                        type_name: field_type.clone(),
                        is_array: !dims.is_empty(),
                        dimensions: dims,
                        is_const: false,
                    },
                ));
            }
        }
        self.state.push(Symbol::Record(RecordSymbol {
            header: header(name.to_string(), file, true, false),
            kind: if is_union { RecordKind::Union } else { RecordKind::Struct },
            fields,
        }));
    }

    fn collect_enum(&mut self, name: &str, enumerators: &[String], file: &str) {
        self.state.push(Symbol::Enum(EnumSymbol {
            header: header(name.to_string(), file, true, false),
            bit_width: None,
        }));
        for member in enumerators {
            self.state.push(Symbol::EnumMember(EnumMemberSymbol {
                header: SymbolHeader {
                    parent: Some(name.to_string()),
                    ..header(member.clone(), file, true, false)
                },
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::c::{
        DeclSpecifiers, Declaration, Declarator, InitDeclarator, StructOrUnionSpecifier,
    };
    use crate::ast::Span;

    fn span() -> Span {
        Span::new(1, 1)
    }

    #[test]
    fn buf_8_extracts_name_and_dimension() {
        let direct = DirectDeclarator::Array {
            of: Box::new(DirectDeclarator::Ident("buf".to_string())),
            size_text: Some("8".to_string()),
        };
        assert_eq!(direct.ident(), Some("buf"));
        assert_eq!(direct.dimension_texts(), vec![Some("8".to_string())]);
    }

    #[test]
    fn empty_paren_declarator_is_a_function() {
        let direct = DirectDeclarator::Function {
            of: Box::new(DirectDeclarator::Ident("main".to_string())),
            params: Some(vec![]),
        };
        assert!(direct.is_function());
    }

    #[test]
    fn extern_declarator_is_declaration_not_exported() {
        let tu = TranslationUnit {
            file: "header.h".to_string(),
            external_decls: vec![ExternalDecl::Declaration(Declaration {
                specifiers: DeclSpecifiers {
                    storage: StorageClass::Extern,
                    type_specifiers: vec![TypeSpecifier::Named("int".to_string())],
                },
                declarators: vec![InitDeclarator {
                    declarator: Declarator {
                        pointer_depth: 0,
                        direct: DirectDeclarator::Ident("g_counter".to_string()),
                    },
                    initializer: None,
                    span: span(),
                }],
                span: span(),
            })],
        };
        let mut c = CCollector::new("header.h");
        c.collect(&tu);
        let Symbol::Variable(v) = &c.symbols()[0] else {
            panic!("expected variable symbol");
        };
        assert!(v.header.is_declaration);
        assert!(!v.header.is_exported);
    }

    #[test]
    fn typedef_struct_matching_tag_emits_struct_but_not_a_duplicate_type() {
        let tu = TranslationUnit {
            file: "header.h".to_string(),
            external_decls: vec![ExternalDecl::Declaration(Declaration {
                specifiers: DeclSpecifiers {
                    storage: StorageClass::Typedef,
                    type_specifiers: vec![TypeSpecifier::Struct(StructOrUnionSpecifier {
                        name: Some("Foo".to_string()),
                        members: Some(vec![]),
                        span: span(),
                    })],
                },
                declarators: vec![InitDeclarator {
                    declarator: Declarator {
                        pointer_depth: 0,
                        direct: DirectDeclarator::Ident("Foo".to_string()),
                    },
                    initializer: None,
                    span: span(),
                }],
                span: span(),
            })],
        };
        let mut c = CCollector::new("header.h");
        c.collect(&tu);
        let names: Vec<&str> = c.symbols().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Foo"]);
        assert!(matches!(c.symbols()[0], Symbol::Record(_)));
    }
}
