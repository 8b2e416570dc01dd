//! Type enum and type chart generation.

use crate::helpers::{f32_literal, to_valid_ident};
use crate::models::TypeChartEntry;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Multiplier for a super effective hit.
const SUPER_EFFECTIVE: f64 = 1.6;
/// Multiplier for a resisted hit.
const NOT_VERY_EFFECTIVE: f64 = 0.625;
/// Multiplier for a double-resisted hit (raids have no immunities).
const DOUBLE_RESISTED: f64 = 0.390625;

/// Generate Type enum and type chart
pub fn generate(out_dir: &Path, data_dir: &Path) {
    let json = fs::read_to_string(data_dir.join("typechart.json")).expect("typechart.json");
    let chart: BTreeMap<String, TypeChartEntry> =
        serde_json::from_str(&json).expect("parse typechart");

    // Canonical type order (alphabetical, matching JSON keys)
    let type_names: Vec<&str> = chart.keys().map(|s| s.as_str()).collect();
    let type_count = type_names.len();
    let index_of = |name: &str| -> usize {
        type_names
            .iter()
            .position(|t| *t == name)
            .unwrap_or_else(|| panic!("typechart references unknown type `{}`", name))
    };

    let idents: Vec<_> = type_names
        .iter()
        .map(|name| format_ident!("{}", to_valid_ident(name)))
        .collect();

    let variants: Vec<TokenStream> = idents
        .iter()
        .enumerate()
        .map(|(i, ident)| {
            let idx = i as u8;
            quote! { #ident = #idx }
        })
        .collect();

    let from_str_arms: Vec<TokenStream> = type_names
        .iter()
        .zip(&idents)
        .map(|(name, ident)| {
            let lower = name.to_lowercase();
            quote! { #lower => Some(Type::#ident) }
        })
        .collect();

    let name_arms: Vec<TokenStream> = idents
        .iter()
        .map(|ident| {
            let display = ident.to_string();
            quote! { Type::#ident => #display }
        })
        .collect();

    // Matrix[attacker][defender] = multiplier
    let mut matrix: Vec<Vec<f64>> = vec![vec![1.0; type_count]; type_count];
    for (atk_idx, atk_name) in type_names.iter().enumerate() {
        let entry = &chart[*atk_name];
        for def in &entry.super_effective {
            matrix[atk_idx][index_of(def)] = SUPER_EFFECTIVE;
        }
        for def in &entry.not_very_effective {
            matrix[atk_idx][index_of(def)] = NOT_VERY_EFFECTIVE;
        }
        for def in &entry.no_effect {
            matrix[atk_idx][index_of(def)] = DOUBLE_RESISTED;
        }
    }

    let matrix_rows: Vec<TokenStream> = matrix
        .iter()
        .map(|row| {
            let cells = row.iter().map(|&v| f32_literal(v));
            quote! { [#(#cells),*] }
        })
        .collect();

    let super_effective = f32_literal(SUPER_EFFECTIVE);

    let code = quote! {
        /// Elemental type of a move or species
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Type {
            #(#variants),*
        }

        impl Type {
            /// Total number of types
            pub const COUNT: usize = #type_count;

            /// Every type, in chart order
            pub const ALL: [Type; #type_count] = [#(Type::#idents),*];

            /// Parse type from string (case-insensitive)
            #[inline]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_lowercase().as_str() {
                    #(#from_str_arms,)*
                    _ => None,
                }
            }

            /// Display name
            pub const fn name(self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }

            /// Index into `TYPE_CHART` and `TypeMap`
            #[inline]
            pub const fn index(self) -> usize {
                self as usize
            }
        }

        /// Super effective multiplier as stored by the game client
        pub const SUPER_EFFECTIVE: f32 = #super_effective;

        /// Type chart: TYPE_CHART[attacker][defender] = multiplier
        pub static TYPE_CHART: [[f32; #type_count]; #type_count] = [
            #(#matrix_rows),*
        ];
    };

    let dest = out_dir.join("types.rs");
    fs::write(&dest, code.to_string()).expect("write types.rs");
}
