//! Source-language ("c-next") parse-tree accessors:
//! top-level declarations (function / variable / struct / register /
//! bitmap / scope); per-declaration identifier token, optional type,
//! optional parameter list, optional array-dimension expressions, optional
//! initializer expression, optional const modifier, scope-member iteration,
//! doc-comment iteration, and `start.line` / `start.column`.
//!
//! Function bodies carry a small statement/expression tree so that the
//! init-before-use, define-before-use, null-safety, div-by-zero,
//! float-modulo, array-index, and signed-shift analyzers have something
//! concrete to walk.

use super::Span;

/// A type as spelled in source text. Dimensions are carried as raw,
/// unresolved bracket text (`Some("8")`, `Some("BUF_SIZE")`, or `None` for
/// `[]`) exactly like the C/C++ declarator case: resolving them to a
/// `DimensionExpr` (decimal parse, then a `constValues` map, then verbatim)
/// is the collector's job via `crate::types::parse_dimension`, not the
/// grammar's.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub name: String,
    pub is_const: bool,
    pub is_array: bool,
    pub dimension_texts: Vec<Option<String>>,
    /// `string<N>` fields carry `Some(N)`; used by the collector to append
    /// the `N+1` terminator dimension (§3.3 invariant 5).
    pub string_len: Option<u64>,
}

impl TypeRef {
    pub fn scalar(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            is_const: false,
            is_array: false,
            dimension_texts: Vec::new(),
            string_len: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub return_type: String,
    pub params: Vec<Param>,
    pub body: Block,
    pub visibility: Visibility,
    pub doc_comments: Vec<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub name: String,
    pub ty: TypeRef,
    pub initializer: Option<Expr>,
    pub doc_comments: Vec<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeRef,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub doc_comments: Vec<String>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessModifier {
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterMemberDecl {
    pub name: String,
    pub access: AccessModifier,
    pub c_type: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterDecl {
    pub name: String,
    pub members: Vec<RegisterMemberDecl>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BitmapFieldDecl {
    pub name: String,
    /// Defaults to 1 bit when absent.
    pub width: Option<u8>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BitmapDecl {
    pub name: String,
    pub backing_type: String,
    pub fields: Vec<BitmapFieldDecl>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScopeMember {
    Function(FunctionDecl),
    Variable(VariableDecl),
    Bitmap(BitmapDecl),
    Register(RegisterDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopeDecl {
    pub name: String,
    pub members: Vec<ScopeMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Scope(ScopeDecl),
    Struct(StructDecl),
    Register(RegisterDecl),
    Bitmap(BitmapDecl),
    Function(FunctionDecl),
    Variable(VariableDecl),
}

impl Decl {
    pub fn span(&self) -> Span {
        match self {
            Decl::Scope(d) => d.span,
            Decl::Struct(d) => d.span,
            Decl::Register(d) => d.span,
            Decl::Bitmap(d) => d.span,
            Decl::Function(d) => d.span,
            Decl::Variable(d) => d.span,
        }
    }
}

/// A whole source-language compilation unit: an ordered list of top-level
/// declarations plus its token stream (for phase 10).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceUnit {
    pub file: String,
    pub decls: Vec<Decl>,
    pub tokens: super::tokens::TokenStream,
}

// --- statements and expressions (function bodies) ---------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(VariableDecl),
    Assign {
        target: Expr,
        value: Expr,
        span: Span,
    },
    Expr(Expr),
    If {
        cond: Expr,
        then_branch: Block,
        else_branch: Option<Block>,
        span: Span,
    },
    While {
        cond: Expr,
        body: Block,
        span: Span,
    },
    Return {
        value: Option<Expr>,
        span: Span,
    },
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `is_unsigned` reflects a `u` suffix or an unsigned-typed constant in
    /// source text (e.g. `0u`); plain decimal literals are signed. Phase 8
    /// (array-index type) reads this directly rather than inferring it.
    Int { value: i64, is_unsigned: bool },
    Float(f64),
    Bool(bool),
    Str(String),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Shl,
    Shr,
    BitAnd,
    BitOr,
    BitXor,
}

impl BinOp {
    pub fn is_equality(self) -> bool {
        matches!(self, BinOp::Eq | BinOp::Ne)
    }

    pub fn is_shift(self) -> bool {
        matches!(self, BinOp::Shl | BinOp::Shr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
    BitNot,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal, Span),
    Ident(String, Span),
    /// `Scope.member(...)` — a qualified reference into a named scope,
    /// resolved by the collector to `Scope_member`.
    ScopeAccess {
        scope: String,
        member: String,
        span: Span,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        span: Span,
    },
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
        span: Span,
    },
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
    Paren(Box<Expr>, Span),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(_, s)
            | Expr::Ident(_, s)
            | Expr::ScopeAccess { span: s, .. }
            | Expr::Call { span: s, .. }
            | Expr::Binary { span: s, .. }
            | Expr::Unary { span: s, .. }
            | Expr::Index { span: s, .. }
            | Expr::Paren(_, s) => *s,
        }
    }

    /// Strip parenthesization, the way every analyzer wants to see through
    /// it before pattern-matching on shape.
    pub fn unwrap_paren(&self) -> &Expr {
        match self {
            Expr::Paren(inner, _) => inner.unwrap_paren(),
            other => other,
        }
    }

    /// The textual name of a call's callee, resolving `Scope.member` to
    /// `Scope_member` the way the collector does, or a plain identifier
    /// call.
    pub fn callee_name(&self) -> Option<String> {
        match self.unwrap_paren() {
            Expr::Ident(name, _) => Some(name.clone()),
            Expr::ScopeAccess { scope, member, .. } => Some(format!("{scope}_{member}")),
            _ => None,
        }
    }
}
