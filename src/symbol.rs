//! The symbol model: a tagged-variant record shared by every collector
//! (`collect::source`, `collect::c`, `collect::cpp`) and read by every
//! analyzer and by `SymbolTable`.

use crate::ast::DimensionExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    Source,
    C,
    Cpp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamInfo {
    pub name: String,
    pub type_name: String,
    pub is_const: bool,
    pub is_array: bool,
    pub dimensions: Vec<DimensionExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub type_name: String,
    pub dimensions: Vec<DimensionExpr>,
    pub is_array: bool,
    pub is_const: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

/// Header shared by every symbol variant.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolHeader {
    pub name: String,
    pub source_file: String,
    pub source_line: u32,
    /// Filled in alongside `source_line` so diagnostics can point at a
    /// column, not just a line.
    pub source_column: u32,
    pub source_language: SourceLanguage,
    pub is_exported: bool,
    pub is_declaration: bool,
    pub parent: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSymbol {
    pub header: SymbolHeader,
    pub return_type: String,
    pub params: Vec<ParamInfo>,
    pub signature: String,
    pub visibility: Option<Visibility>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableSymbol {
    pub header: SymbolHeader,
    pub type_name: String,
    pub is_const: bool,
    pub is_array: bool,
    pub dimensions: Vec<DimensionExpr>,
    pub initial_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Struct,
    Union,
    Class,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordSymbol {
    pub header: SymbolHeader,
    pub kind: RecordKind,
    /// `field_name -> FieldInfo`, kept as a `Vec` of pairs rather than a
    /// `HashMap` so insertion order survives: downstream emission wants
    /// field order to match source order.
    pub fields: Vec<(String, FieldInfo)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSymbol {
    pub header: SymbolHeader,
    pub aliased_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumSymbol {
    pub header: SymbolHeader,
    pub bit_width: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMemberSymbol {
    pub header: SymbolHeader,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceSymbol {
    pub header: SymbolHeader,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterSymbol {
    pub header: SymbolHeader,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterMemberSymbol {
    pub header: SymbolHeader,
    pub access: RegisterAccess,
    pub c_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BitmapSymbol {
    pub header: SymbolHeader,
    pub backing_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BitmapFieldSymbol {
    pub header: SymbolHeader,
    pub bit_offset: u8,
    pub width: u8,
    pub derived_type: String,
    /// `"bit N"` or `"bits N-M"`.
    pub signature: String,
}

/// A tagged-variant symbol record.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Function(FunctionSymbol),
    Variable(VariableSymbol),
    Type(TypeSymbol),
    Record(RecordSymbol),
    Enum(EnumSymbol),
    EnumMember(EnumMemberSymbol),
    Namespace(NamespaceSymbol),
    Register(RegisterSymbol),
    RegisterMember(RegisterMemberSymbol),
    Bitmap(BitmapSymbol),
    BitmapField(BitmapFieldSymbol),
}

impl Symbol {
    pub fn header(&self) -> &SymbolHeader {
        match self {
            Symbol::Function(s) => &s.header,
            Symbol::Variable(s) => &s.header,
            Symbol::Type(s) => &s.header,
            Symbol::Record(s) => &s.header,
            Symbol::Enum(s) => &s.header,
            Symbol::EnumMember(s) => &s.header,
            Symbol::Namespace(s) => &s.header,
            Symbol::Register(s) => &s.header,
            Symbol::RegisterMember(s) => &s.header,
            Symbol::Bitmap(s) => &s.header,
            Symbol::BitmapField(s) => &s.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut SymbolHeader {
        match self {
            Symbol::Function(s) => &mut s.header,
            Symbol::Variable(s) => &mut s.header,
            Symbol::Type(s) => &mut s.header,
            Symbol::Record(s) => &mut s.header,
            Symbol::Enum(s) => &mut s.header,
            Symbol::EnumMember(s) => &mut s.header,
            Symbol::Namespace(s) => &mut s.header,
            Symbol::Register(s) => &mut s.header,
            Symbol::RegisterMember(s) => &mut s.header,
            Symbol::Bitmap(s) => &mut s.header,
            Symbol::BitmapField(s) => &mut s.header,
        }
    }

    pub fn name(&self) -> &str {
        &self.header().name
    }

    pub fn is_declaration(&self) -> bool {
        self.header().is_declaration
    }

    pub fn source_language(&self) -> SourceLanguage {
        self.header().source_language
    }

    /// The canonical function signature, when this is a function symbol.
    /// Used by the C++-overload branch of the conflict classifier to tell
    /// distinct overloads apart.
    pub fn signature(&self) -> Option<&str> {
        match self {
            Symbol::Function(f) => Some(&f.signature),
            _ => None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Symbol::Function(_))
    }
}
