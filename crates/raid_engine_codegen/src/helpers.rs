//! Helper functions for code generation.

use heck::ToPascalCase;
use proc_macro2::Literal;

/// Convert a key to a valid Rust identifier in PascalCase.
/// Handles keys starting with digits by prefixing with underscore.
pub fn to_valid_ident(key: &str) -> String {
    let pascal = key.to_pascal_case();
    if pascal.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false) {
        format!("_{}", pascal)
    } else {
        pascal
    }
}

/// Emit a JSON number as an `f32` literal.
///
/// The narrowing happens here, at build time, so the generated table holds
/// exactly the single-precision values the game client stores.
pub fn f32_literal(value: f64) -> Literal {
    Literal::f32_suffixed(value as f32)
}

/// Render an `f64` so that it always parses back as a float literal.
pub fn f64_source(value: f64) -> String {
    format!("{:?}f64", value)
}
