//! Type utilities: primitive-to-C type mapping, declarator-text dimension
//! parsing, the reserved-field-name policy, and enum backing-type widths.
//! The lookup tables themselves live in `tables.rs`; this module is the
//! logic that consumes them.

use std::collections::HashMap;

use crate::ast::DimensionExpr;
use crate::tables;

/// Map a source-language primitive to its C spelling. Falls back to the
/// name itself for anything not in the primitive table (struct, class, and
/// typedef names pass through unchanged).
pub fn source_to_c_type(name: &str) -> String {
    tables::primitive_to_c(name)
        .map(str::to_string)
        .unwrap_or_else(|| name.to_string())
}

/// Applying the map twice equals applying it once.
#[cfg(test)]
mod idempotence {
    use super::*;

    #[test]
    fn primitive_map_is_idempotent() {
        for (src, _) in tables::PRIMITIVE_TO_C {
            let once = source_to_c_type(src);
            let twice = source_to_c_type(&once);
            assert_eq!(once, twice);
        }
    }
}

/// Resolve one declarator-text dimension to a `DimensionExpr`: (a) decimal
/// integer parse, then (b) a provided `constValues` map of known constants,
/// then (c) the verbatim textual expression if neither succeeds. An absent
/// bracket body (`[]`) is `Unbounded`.
pub fn parse_dimension(
    text: Option<&str>,
    const_values: &HashMap<String, i64>,
) -> DimensionExpr {
    let Some(text) = text else {
        return DimensionExpr::Unbounded;
    };
    let text = text.trim();
    if text.is_empty() {
        return DimensionExpr::Unbounded;
    }
    if let Ok(n) = text.parse::<u64>() {
        return DimensionExpr::Int(n);
    }
    if let Some(&value) = const_values.get(text) {
        if value >= 0 {
            return DimensionExpr::Int(value as u64);
        }
    }
    DimensionExpr::Ident(text.to_string())
}

/// `string<N>` fields append `N + 1` as a terminator dimension after any
/// preceding array dimensions, in source order.
pub fn append_string_terminator(mut dims: Vec<DimensionExpr>, len: u64) -> Vec<DimensionExpr> {
    dims.push(DimensionExpr::Int(len + 1));
    dims
}

pub fn is_reserved_field_name(name: &str) -> bool {
    tables::is_reserved_field_name(name)
}

pub fn enum_backing_width(type_name: &str) -> Option<u8> {
    tables::primitive_width(type_name)
}

/// The derived bitmap-field type for a given bit width: a single bit is
/// `bool`, otherwise the smallest `u{8|16|32}` that holds it.
pub fn bitmap_field_type(width: u8) -> &'static str {
    match width {
        0 | 1 => "bool",
        2..=8 => "u8",
        9..=16 => "u16",
        _ => "u32",
    }
}

/// `"bit N"` or `"bits N-M"`.
pub fn bitmap_field_signature(bit_offset: u8, width: u8) -> String {
    if width <= 1 {
        format!("bit {bit_offset}")
    } else {
        format!("bits {}-{}", bit_offset, bit_offset + width - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_dimension_parses_as_int() {
        let consts = HashMap::new();
        assert_eq!(parse_dimension(Some("8"), &consts), DimensionExpr::Int(8));
    }

    #[test]
    fn macro_dimension_falls_back_to_ident() {
        let consts = HashMap::new();
        assert_eq!(
            parse_dimension(Some("BUF_SIZE"), &consts),
            DimensionExpr::Ident("BUF_SIZE".to_string())
        );
    }

    #[test]
    fn const_values_resolve_before_verbatim_fallback() {
        let mut consts = HashMap::new();
        consts.insert("N".to_string(), 4);
        assert_eq!(parse_dimension(Some("N"), &consts), DimensionExpr::Int(4));
    }

    #[test]
    fn empty_brackets_are_unbounded() {
        let consts = HashMap::new();
        assert_eq!(parse_dimension(Some(""), &consts), DimensionExpr::Unbounded);
        assert_eq!(parse_dimension(None, &consts), DimensionExpr::Unbounded);
    }

    #[test]
    fn string_zero_stores_terminator_one() {
        let dims = append_string_terminator(vec![], 0);
        assert_eq!(dims, vec![DimensionExpr::Int(1)]);
    }
}
