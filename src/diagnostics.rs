//! The semantic-error record and its `Severity`, used in place of a
//! boolean error/warning flag.

use crate::ast::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SemaError {
    pub code: &'static str,
    pub line: u32,
    pub column: u32,
    pub message: String,
    pub severity: Severity,
    pub rule: Option<&'static str>,
    pub help_text: Option<String>,
    pub related_symbol: Option<String>,
}

impl SemaError {
    pub fn new(code: &'static str, span: Span, message: impl Into<String>) -> Self {
        SemaError {
            code,
            line: span.line,
            column: span.column,
            message: message.into(),
            severity: Severity::Error,
            rule: None,
            help_text: None,
            related_symbol: None,
        }
    }

    pub fn warning(code: &'static str, span: Span, message: impl Into<String>) -> Self {
        SemaError {
            severity: Severity::Warning,
            ..SemaError::new(code, span, message)
        }
    }

    pub fn with_help(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn with_rule(mut self, rule: &'static str) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn with_related(mut self, name: impl Into<String>) -> Self {
        self.related_symbol = Some(name.into());
        self
    }
}
