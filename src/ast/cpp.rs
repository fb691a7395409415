//! C++ parse-tree accessors:
//! `translationUnit -> declarationseq -> declaration{*}`; per declaration:
//! function definition, namespace definition (with nested declaration
//! sequence), template declaration (skipped), block declaration (simple
//! declarations and alias declarations); class specifiers with class-head
//! name and member-specification; enum specifier with optional backing
//! type; declarator decomposition mirroring C.

use super::c::{DeclSpecifiers, Declarator, ParamDecl};
use super::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub name: String,
    pub body: Vec<Declaration>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberFunction {
    pub name: String,
    pub return_type: String,
    pub params: Vec<ParamDecl>,
    /// `true` for an inline definition or out-of-class-body definition
    /// provided alongside the declaration; `false` for a bare prototype.
    pub has_body: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberField {
    pub name: String,
    pub type_name: String,
    pub declarator: Declarator,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Function(MemberFunction),
    Field(MemberField),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassKey {
    Class,
    Struct,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassSpecifier {
    pub key: ClassKey,
    /// The class-head name; `None` for an anonymous class, in which case a
    /// trailing declarator (see `Declaration::Simple`) supplies the name.
    pub name: Option<String>,
    pub members: Vec<ClassMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumSpecifier {
    pub name: Option<String>,
    /// The backing type named after `:` in `enum Foo : uint8_t { ... }`.
    pub backing_type: Option<String>,
    pub enumerators: Vec<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AliasDecl {
    pub name: String,
    pub aliased_type: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FreeFunction {
    pub name: String,
    pub return_type: String,
    pub params: Vec<ParamDecl>,
    pub has_body: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleDecl {
    pub specifiers: DeclSpecifiers,
    pub declarator: Declarator,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Namespace(NamespaceDecl),
    Class(ClassSpecifier),
    Enum(EnumSpecifier),
    Alias(AliasDecl),
    Function(FreeFunction),
    Simple(SimpleDecl),
    /// A template declaration; collected but never descended into.
    Template,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationUnit {
    pub file: String,
    pub decls: Vec<Declaration>,
}
