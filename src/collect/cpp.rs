//! The C++ collector: walks the declaration sequence recursively, carrying
//! a current namespace path joined with `::`.

use std::collections::HashMap;

use crate::ast::cpp::{ClassMember, Declaration, TranslationUnit};
use crate::symbol::{
    EnumMemberSymbol, EnumSymbol, FieldInfo, FunctionSymbol, NamespaceSymbol, ParamInfo,
    RecordKind, RecordSymbol, SourceLanguage, Symbol, SymbolHeader, TypeSymbol, VariableSymbol,
};
use crate::symtab::SymbolTable;
use crate::types::{enum_backing_width, parse_dimension};

use super::CollectState;

fn header(name: String, file: &str, is_exported: bool, is_declaration: bool) -> SymbolHeader {
    SymbolHeader {
        name,
        source_file: file.to_string(),
        source_line: 0,
        source_column: 0,
        source_language: SourceLanguage::Cpp,
        is_exported,
        is_declaration,
        parent: None,
    }
}

fn qualify(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}::{name}")
    }
}

/// Pointers are detected textually and appended as a `*` suffix.
fn pointer_suffix(type_text: &str, pointer_depth: u32) -> String {
    if pointer_depth == 0 {
        type_text.to_string()
    } else {
        format!("{type_text}{}", "*".repeat(pointer_depth as usize))
    }
}

fn params_from(params: &[crate::ast::c::ParamDecl]) -> Vec<ParamInfo> {
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

pub struct CppCollector<'a> {
    state: CollectState<'a>,
}

impl<'a> CppCollector<'a> {
    pub fn new(file: impl Into<String>) -> Self {
        CppCollector {
            state: CollectState::new(file),
        }
    }

    pub fn with_table(file: impl Into<String>, table: &'a mut SymbolTable) -> Self {
        CppCollector {
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
        for decl in &unit.decls {
            self.collect_decl(decl, &file, "");
        }
    }

    fn collect_decl(&mut self, decl: &Declaration, file: &str, path: &str) {
        match decl {
            Declaration::Namespace(ns) => {
                let qualified = qualify(path, &ns.name);
                self.state.push(Symbol::Namespace(NamespaceSymbol {
                    header: header(qualified.clone(), file, true, false),
                }));
                for inner in &ns.body {
                    self.collect_decl(inner, file, &qualified);
                }
            }
            Declaration::Class(class) => {
                // An anonymous `ClassSpecifier` with no trailing declarator
                // names nothing; it contributes no symbol on its own (the
                // typedef-name case arrives as `Declaration::Simple`
                // instead, see `collect_anonymous_record`).
                if let Some(name) = &class.name {
                    self.collect_class(name, class, file, path);
                }
            }
            Declaration::Enum(e) => {
                let Some(name) = &e.name else { return };
                let qualified = qualify(path, name);
                self.collect_enum(&qualified, e.backing_type.as_deref(), &e.enumerators, file);
            }
            Declaration::Alias(alias) => {
                let qualified = qualify(path, &alias.name);
                self.state.push(Symbol::Type(TypeSymbol {
                    header: header(qualified, file, true, false),
                    aliased_type: alias.aliased_type.clone(),
                }));
            }
            Declaration::Function(f) => {
                let qualified = qualify(path, &f.name);
                let params = params_from(&f.params);
                let signature = format!(
                    "{} {qualified}({})",
                    f.return_type,
                    params.iter().map(|p| p.type_name.as_str()).collect::<Vec<_>>().join(", ")
                );
                self.state.push(Symbol::Function(FunctionSymbol {
                    header: header(qualified, file, true, !f.has_body),
                    return_type: f.return_type.clone(),
                    params,
                    signature,
                    visibility: None,
                }));
            }
            Declaration::Simple(simple) => {
                // An anonymous class, backed here by the C-shaped struct/
                // union specifier it shares with `ast::c`, whose name comes
                // from the trailing declarator: `struct { ... } Name;`.
                let anonymous_record = simple.specifiers.type_specifiers.iter().find_map(|ts| {
                    match ts {
                        crate::ast::c::TypeSpecifier::Struct(s) if s.name.is_none() => {
                            s.members.as_ref().map(|m| (m, RecordKind::Struct))
                        }
                        crate::ast::c::TypeSpecifier::Union(s) if s.name.is_none() => {
                            s.members.as_ref().map(|m| (m, RecordKind::Union))
                        }
                        _ => None,
                    }
                });
                if let Some((members, kind)) = anonymous_record {
                    if let Some(ident) = simple.declarator.direct.ident() {
                        self.collect_anonymous_record(ident, members, kind, file, path);
                    }
                    return;
                }
                if let Some(ident) = simple.declarator.direct.ident() {
                    if simple.declarator.direct.is_function() {
                        let qualified = qualify(path, ident);
                        let params = simple
                            .declarator
                            .direct
                            .params()
                            .map(params_from)
                            .unwrap_or_default();
                        let return_type = pointer_suffix(
                            &simple.specifiers.type_text(),
                            simple.declarator.pointer_depth,
                        );
                        let signature = format!(
                            "{return_type} {qualified}({})",
                            params.iter().map(|p| p.type_name.as_str()).collect::<Vec<_>>().join(", ")
                        );
                        self.state.push(Symbol::Function(FunctionSymbol {
                            header: header(qualified, file, true, true),
                            return_type,
                            params,
                            signature,
                            visibility: None,
                        }));
                    } else {
                        let qualified = qualify(path, ident);
                        let dims: Vec<_> = simple
                            .declarator
                            .direct
                            .dimension_texts()
                            .iter()
                            .map(|t| parse_dimension(t.as_deref(), &HashMap::new()))
                            .collect();
                        self.state.push(Symbol::Variable(VariableSymbol {
                            header: header(qualified, file, true, false),
                            type_name: pointer_suffix(
                                &simple.specifiers.type_text(),
                                simple.declarator.pointer_depth,
                            ),
                            is_const: false,
                            is_array: !dims.is_empty(),
                            dimensions: dims,
                            initial_value: None,
                        }));
                    }
                }
            }
            Declaration::Template => {}
        }
    }

    fn collect_anonymous_record(
        &mut self,
        name: &str,
        members: &[crate::ast::c::StructMember],
        kind: RecordKind,
        file: &str,
        path: &str,
    ) {
        let qualified = qualify(path, name);
        let mut fields = Vec::new();
        for member in members {
            let field_type = member.specifiers.type_text();
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
                let type_name = pointer_suffix(&field_type, declarator.pointer_depth);
                self.state.record_field(
                    &qualified,
                    field_name,
                    &type_name,
                    dims.clone(),
                    member.span,
                );
                fields.push((
                    field_name.to_string(),
                    FieldInfo {
                        type_name,
                        is_array: !dims.is_empty(),
                        dimensions: dims,
                        is_const: false,
                    },
                ));
            }
        }
        self.state.push(Symbol::Record(RecordSymbol {
            header: header(qualified, file, true, false),
            kind,
            fields,
        }));
    }

    fn collect_class(
        &mut self,
        name: &str,
        class: &crate::ast::cpp::ClassSpecifier,
        file: &str,
        path: &str,
    ) {
        let qualified = qualify(path, name);
        let kind = match class.key {
            crate::ast::cpp::ClassKey::Class => RecordKind::Class,
            crate::ast::cpp::ClassKey::Struct => RecordKind::Struct,
        };
        let mut fields = Vec::new();
        for member in &class.members {
            match member {
                ClassMember::Function(f) => {
                    let member_name = format!("{qualified}::{}", f.name);
                    let params = params_from(&f.params);
                    let signature = format!(
                        "{} {member_name}({})",
                        f.return_type,
                        params.iter().map(|p| p.type_name.as_str()).collect::<Vec<_>>().join(", ")
                    );
                    self.state.push(Symbol::Function(FunctionSymbol {
                        header: SymbolHeader {
                            parent: Some(qualified.clone()),
                            ..header(member_name, file, true, !f.has_body)
                        },
                        return_type: f.return_type.clone(),
                        params,
                        signature,
                        visibility: None,
                    }));
                }
                ClassMember::Field(field) => {
                    let dims: Vec<_> = field
                        .declarator
                        .direct
                        .dimension_texts()
                        .iter()
                        .map(|t| parse_dimension(t.as_deref(), &HashMap::new()))
                        .collect();
                    let type_name =
                        pointer_suffix(&field.type_name, field.declarator.pointer_depth);
                    self.state.record_field(
                        &qualified,
                        &field.name,
                        &type_name,
                        dims.clone(),
                        field.span,
                    );
                    fields.push((
                        field.name.clone(),
                        FieldInfo {
                            type_name,
                            is_array: !dims.is_empty(),
                            dimensions: dims,
                            is_const: false,
                        },
                    ));
                }
            }
        }
        self.state.push(Symbol::Record(RecordSymbol {
            header: header(qualified, file, true, false),
            kind,
            fields,
        }));
    }

    fn collect_enum(&mut self, name: &str, backing_type: Option<&str>, enumerators: &[String], file: &str) {
        let bit_width = backing_type.and_then(enum_backing_width);
        if let (Some(width), Some(table)) = (bit_width, self.state.table.as_deref_mut()) {
            table.add_enum_bit_width(name, width);
        }
        self.state.push(Symbol::Enum(EnumSymbol {
            header: header(name.to_string(), file, true, false),
            bit_width,
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
    use crate::ast::cpp::{MemberFunction, ClassKey, ClassSpecifier, NamespaceDecl};
    use crate::ast::Span;

    fn span() -> Span {
        Span::new(1, 1)
    }

    #[test]
    fn namespace_member_function_is_qualified() {
        let tu = TranslationUnit {
            file: "motor.cpp".to_string(),
            decls: vec![Declaration::Namespace(NamespaceDecl {
                name: "Drivers".to_string(),
                body: vec![Declaration::Class(ClassSpecifier {
                    key: ClassKey::Class,
                    name: Some("Motor".to_string()),
                    members: vec![ClassMember::Function(MemberFunction {
                        name: "update".to_string(),
                        return_type: "void".to_string(),
                        params: vec![],
                        has_body: true,
                        span: span(),
                    })],
                    span: span(),
                })],
                span: span(),
            })],
        };
        let mut c = CppCollector::new("motor.cpp");
        c.collect(&tu);
        let names: Vec<&str> = c.symbols().iter().map(|s| s.name()).collect();
        assert!(names.contains(&"Drivers::Motor"));
        assert!(names.contains(&"Drivers::Motor::update"));
    }

    #[test]
    fn backed_enum_records_bit_width_in_side_table() {
        let mut table = SymbolTable::new();
        let tu = TranslationUnit {
            file: "f.cpp".to_string(),
            decls: vec![Declaration::Enum(crate::ast::cpp::EnumSpecifier {
                name: Some("Flags".to_string()),
                backing_type: Some("uint8_t".to_string()),
                enumerators: vec!["A".to_string(), "B".to_string()],
                span: span(),
            })],
        };
        let mut c = CppCollector::with_table("f.cpp", &mut table);
        c.collect(&tu);
        assert_eq!(table.enum_bit_width("Flags"), Some(8));
    }
}
