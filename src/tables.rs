//! Fixed, data-driven tables the core consults. None of this is read from
//! disk — configuration loading is out of scope here — but the table
//! contents are part of the core's behavior, so they live here as plain
//! data rather than scattered through call sites.

/// Primitive source-language type -> C type.
pub const PRIMITIVE_TO_C: &[(&str, &str)] = &[
    ("u8", "uint8_t"),
    ("u16", "uint16_t"),
    ("u32", "uint32_t"),
    ("u64", "uint64_t"),
    ("i8", "int8_t"),
    ("i16", "int16_t"),
    ("i32", "int32_t"),
    ("i64", "int64_t"),
    ("f32", "float"),
    ("f64", "double"),
    ("bool", "bool"),
    ("void", "void"),
];

pub fn primitive_to_c(name: &str) -> Option<&'static str> {
    PRIMITIVE_TO_C
        .iter()
        .find(|(src, _)| *src == name)
        .map(|(_, c)| *c)
}

/// Primitive-to-width map for enum backing types.
pub const PRIMITIVE_WIDTH: &[(&str, u8)] = &[
    ("u8", 8),
    ("i8", 8),
    ("u16", 16),
    ("i16", 16),
    ("u32", 32),
    ("i32", 32),
    ("u64", 64),
    ("i64", 64),
    ("uint8_t", 8),
    ("int8_t", 8),
    ("uint16_t", 16),
    ("int16_t", 16),
    ("uint32_t", 32),
    ("int32_t", 32),
    ("uint64_t", 64),
    ("int64_t", 64),
];

pub fn primitive_width(name: &str) -> Option<u8> {
    PRIMITIVE_WIDTH
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, w)| *w)
}

/// Header -> recognized stdlib function names, for the define-before-use
/// analyzer's "known standard-library call" safe case.
pub const STDLIB_HEADERS: &[(&str, &[&str])] = &[
    (
        "stdio.h",
        &[
            "printf", "fprintf", "sprintf", "snprintf", "fgets", "fputs", "fgetc", "fputc",
            "gets", "fopen", "fclose", "fread", "fwrite", "fflush", "putchar", "getchar",
        ],
    ),
    (
        "stdlib.h",
        &[
            "malloc", "calloc", "realloc", "free", "atoi", "atof", "abs", "rand", "srand",
            "exit",
        ],
    ),
    (
        "string.h",
        &[
            "strlen", "strcpy", "strncpy", "strcmp", "strncmp", "strcat", "strncat", "strchr",
            "strstr", "memcpy", "memmove", "memset", "memcmp",
        ],
    ),
    (
        "math.h",
        &["sqrt", "pow", "fabs", "floor", "ceil", "sin", "cos", "tan", "fmod"],
    ),
    (
        "ctype.h",
        &[
            "isalpha", "isdigit", "isspace", "isupper", "islower", "toupper", "tolower",
        ],
    ),
    ("time.h", &["time", "clock", "difftime"]),
    ("assert.h", &["assert"]),
    (
        "platform.h",
        &["pinMode", "digitalWrite", "digitalRead", "analogWrite", "analogRead"],
    ),
];

pub fn is_stdlib_function(header: &str, function: &str) -> bool {
    STDLIB_HEADERS
        .iter()
        .find(|(h, _)| *h == header)
        .is_some_and(|(_, funcs)| funcs.contains(&function))
}

/// Stream-I/O functions whitelisted under the null-safety analyzer's
/// null-check rule, with the human-readable description of what a
/// NULL/failure result means.
pub const STREAM_WHITELIST: &[(&str, &str)] = &[
    ("fgets", "returns NULL on end-of-file or read error"),
    ("fputs", "returns EOF on write error"),
    ("fgetc", "returns EOF on end-of-file or read error"),
    ("fputc", "returns EOF on write error"),
    ("gets", "returns NULL on end-of-file or read error"),
];

pub fn stream_whitelist_reason(function: &str) -> Option<&'static str> {
    STREAM_WHITELIST
        .iter()
        .find(|(f, _)| *f == function)
        .map(|(_, reason)| *reason)
}

/// Functions that are entirely forbidden, with a reason.
pub const FORBIDDEN_FUNCTIONS: &[(&str, &str)] = &[
    ("fopen", "unbounded file handle lifetime is not permitted on this platform"),
    ("malloc", "dynamic heap allocation is forbidden in safety-constrained code"),
    ("calloc", "dynamic heap allocation is forbidden in safety-constrained code"),
    ("realloc", "dynamic heap allocation is forbidden in safety-constrained code"),
    ("free", "dynamic heap allocation is forbidden in safety-constrained code"),
    ("strchr", "unbounded pointer arithmetic on a search result is forbidden"),
    ("system", "shelling out to the OS is forbidden in embedded targets"),
];

pub fn forbidden_reason(function: &str) -> Option<&'static str> {
    FORBIDDEN_FUNCTIONS
        .iter()
        .find(|(f, _)| *f == function)
        .map(|(_, reason)| *reason)
}

/// Compiler intrinsics, always safe to call without a prior definition.
pub const COMPILER_INTRINSICS: &[&str] = &["safe_div", "safe_mod"];

pub fn is_intrinsic(name: &str) -> bool {
    COMPILER_INTRINSICS.contains(&name)
}

/// Reserved struct/parameter field names. Currently empty; kept as a real
/// table, not a special-cased no-op, so a future entry needs no code
/// change at any call site.
pub const RESERVED_FIELD_NAMES: &[&str] = &[];

pub fn is_reserved_field_name(name: &str) -> bool {
    RESERVED_FIELD_NAMES.contains(&name)
}
