//! C parse-tree accessors:
//! `compilationUnit -> translationUnit -> externalDeclaration{*}`;
//! per external: function definition vs. declaration; declaration-specifier
//! iteration; typedef/extern detection; struct/union specifier with
//! optional identifier and member list; enum specifier with enumerator
//! list; declarator with nested direct-declarator, array brackets,
//! parameter type list, and identifier leaf.

use super::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    Typedef,
    Extern,
    Static,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpecifier {
    Named(String),
    Struct(StructOrUnionSpecifier),
    Union(StructOrUnionSpecifier),
    Enum(EnumSpecifier),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclSpecifiers {
    pub storage: StorageClass,
    pub type_specifiers: Vec<TypeSpecifier>,
}

impl DeclSpecifiers {
    /// The joined declaration-specifier text used as a function's
    /// `return_type` or a variable's `type`.
    pub fn type_text(&self) -> String {
        self.type_specifiers
            .iter()
            .map(|ts| match ts {
                TypeSpecifier::Named(n) => n.clone(),
                TypeSpecifier::Struct(s) => s.name.clone().unwrap_or_default(),
                TypeSpecifier::Union(s) => s.name.clone().unwrap_or_default(),
                TypeSpecifier::Enum(e) => e.name.clone().unwrap_or_default(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A direct-declarator, peeled recursively: pointer and array layers come
/// off one at a time, and the identifier is the innermost leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectDeclarator {
    Ident(String),
    /// `size_text` is the raw bracket content, unparsed: resolving it to a
    /// numeric or macro-symbolic dimension is the core's job, done by
    /// `crate::types::parse_dimension` during collection, not the
    /// grammar's.
    Array {
        of: Box<DirectDeclarator>,
        size_text: Option<String>,
    },
    /// `params = None` when there is no trailing parameter list at all
    /// (the declarator is not function-shaped at this level); `Some(vec![])`
    /// for an explicit empty-parameter-list pair of parentheses, which the
    /// walker still treats as a function.
    Function {
        of: Box<DirectDeclarator>,
        params: Option<Vec<ParamDecl>>,
    },
    /// A parenthesized, non-function declarator: `int (x);`. Carries no
    /// parameter list, so the function-shape test in §9 does not fire.
    Grouped(Box<Declarator>),
}

impl DirectDeclarator {
    /// The innermost identifier leaf.
    pub fn ident(&self) -> Option<&str> {
        match self {
            DirectDeclarator::Ident(name) => Some(name),
            DirectDeclarator::Array { of, .. } => of.ident(),
            DirectDeclarator::Function { of, .. } => of.ident(),
            DirectDeclarator::Grouped(decl) => decl.direct.ident(),
        }
    }

    /// True iff this direct-declarator (or one of its peeled layers) is
    /// function-shaped: carries a parameter type list, or an empty
    /// parameter-list pair of parentheses.
    pub fn is_function(&self) -> bool {
        match self {
            DirectDeclarator::Function { .. } => true,
            DirectDeclarator::Array { of, .. } => of.is_function(),
            _ => false,
        }
    }

    /// The raw bracket texts implied by any `Array` layers, outermost
    /// first, matching source-text order. `None` entries are `[]`
    /// (unbounded).
    pub fn dimension_texts(&self) -> Vec<Option<String>> {
        match self {
            DirectDeclarator::Array { of, size_text } => {
                let mut dims = of.dimension_texts();
                dims.push(size_text.clone());
                dims
            }
            _ => Vec::new(),
        }
    }

    pub fn params(&self) -> Option<&[ParamDecl]> {
        match self {
            DirectDeclarator::Function { params, .. } => params.as_deref(),
            DirectDeclarator::Array { of, .. } => of.params(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub pointer_depth: u32,
    pub direct: DirectDeclarator,
}

impl Declarator {
    pub fn is_pointer(&self) -> bool {
        self.pointer_depth > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub specifiers: DeclSpecifiers,
    pub declarator: Option<Declarator>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitDeclarator {
    pub declarator: Declarator,
    pub initializer: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructMember {
    pub specifiers: DeclSpecifiers,
    pub declarators: Vec<Declarator>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructOrUnionSpecifier {
    pub name: Option<String>,
    pub members: Option<Vec<StructMember>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumSpecifier {
    pub name: Option<String>,
    pub enumerators: Vec<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub specifiers: DeclSpecifiers,
    pub declarator: Declarator,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub specifiers: DeclSpecifiers,
    pub declarators: Vec<InitDeclarator>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExternalDecl {
    FunctionDefinition(FunctionDefinition),
    Declaration(Declaration),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationUnit {
    pub file: String,
    pub external_decls: Vec<ExternalDecl>,
}
