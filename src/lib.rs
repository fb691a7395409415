//! Cross-language symbol resolution and semantic analysis for the c-next
//! source-to-C compiler front end.
//!
//! A compilation unit is one c-next source file plus whichever C and C++
//! headers it pulls symbols from. [`analyze_unit`] collects all three into
//! a shared [`CompilationContext`], resolves cross-language name conflicts,
//! and — if none remain — runs the ten-phase analyzer pipeline over the
//! c-next parse tree.

pub mod analyze;
pub mod ast;
pub mod collect;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod pipeline;
pub mod symbol;
pub mod symtab;
pub mod tables;
pub mod types;

use ast::c::TranslationUnit as CUnit;
use ast::cpp::TranslationUnit as CppUnit;
use ast::source::SourceUnit;
use collect::c::CCollector;
use collect::cpp::CppCollector;
use collect::source::SourceCollector;
use context::CompilationContext;
use diagnostics::SemaError;
use error::{CoreError, Result};
use symbol::Symbol;

/// A c-next source file plus the external headers it depends on. Each
/// header carries the file name it was parsed from, since collectors stamp
/// every symbol's `source_file` from that name rather than from the unit
/// itself.
#[derive(Debug, Default)]
pub struct CompilationInput<'a> {
    pub source: &'a SourceUnit,
    pub c_headers: Vec<(&'a str, &'a CUnit)>,
    pub cpp_headers: Vec<(&'a str, &'a CppUnit)>,
}

/// Collect every declared symbol, run the ten-phase analyzer pipeline, and
/// return both. Fails fast with [`CoreError::UnresolvedConflict`] if
/// collection leaves the symbol table with an unresolved name clash —
/// later phases only make sense once every name in scope means one thing.
pub fn analyze_unit(input: &CompilationInput<'_>) -> Result<(Vec<Symbol>, Vec<SemaError>)> {
    let mut context = CompilationContext::new();

    let mut source_collector =
        SourceCollector::with_table(input.source.file.clone(), &mut context.symbols);
    source_collector.collect(input.source);
    let mut symbols = source_collector.into_symbols();

    for (file, unit) in &input.c_headers {
        let mut collector = CCollector::with_table((*file).to_string(), &mut context.symbols);
        collector.collect(unit);
        symbols.extend(collector.into_symbols());
    }
    for (file, unit) in &input.cpp_headers {
        let mut collector = CppCollector::with_table((*file).to_string(), &mut context.symbols);
        collector.collect(unit);
        symbols.extend(collector.into_symbols());
    }

    let conflicts = context.symbols.conflicts();
    if !conflicts.is_empty() {
        return Err(CoreError::UnresolvedConflict(conflicts));
    }

    context.rebuild_external_struct_fields();
    let errors = pipeline::run(input.source, &context);
    Ok((symbols, errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::source::{Block, Decl, FunctionDecl, Visibility};
    use ast::tokens::TokenStream;
    use ast::Span;

    fn empty_unit() -> SourceUnit {
        SourceUnit {
            file: "f.cn".to_string(),
            decls: vec![Decl::Function(FunctionDecl {
                name: "main".to_string(),
                return_type: "void".to_string(),
                params: vec![],
                body: Block::default(),
                visibility: Visibility::Public,
                doc_comments: vec![],
                span: Span::new(1, 1),
            })],
            tokens: TokenStream::new(),
        }
    }

    #[test]
    fn clean_unit_collects_its_own_function_and_has_no_errors() {
        let unit = empty_unit();
        let input = CompilationInput {
            source: &unit,
            c_headers: vec![],
            cpp_headers: vec![],
        };
        let (symbols, errors) = analyze_unit(&input).expect("no conflicts");
        assert!(symbols.iter().any(|s| s.name() == "main"));
        assert!(errors.is_empty());
    }
}
