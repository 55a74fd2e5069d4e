//! Dynamic-programming comparators.
//!
//! Two different questions live here and must not be confused:
//! [`longest_common_subsequence`] (order preserving, gaps allowed) and
//! [`longest_common_substring`] (one unbroken run). Callers that can run
//! either carry a [`Variant`] so the choice is explicit per invocation.

pub mod subsequence;
pub mod substring;
pub mod table;

pub use self::subsequence::{
    lcs_str, longest_common_subsequence, resolve_cell, subsequence_table, traceback, CellWrite,
    Source, Traceback,
};
pub use self::substring::{longest_common_substring, substring_str, substring_table, SubstringFill};
pub use self::table::{Coord, DpTable};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Subsequence,
    Substring,
}

/// One optimal answer and its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<T> {
    pub symbols: Vec<T>,
    pub length: usize,
}

impl<T> Match<T> {
    pub fn empty() -> Self {
        Self {
            symbols: Vec::new(),
            length: 0,
        }
    }
}

impl Match<char> {
    pub fn as_string(&self) -> String {
        self.symbols.iter().collect()
    }

    pub fn into_pair(self) -> (String, usize) {
        (self.symbols.into_iter().collect(), self.length)
    }
}

/// Runs the DP form selected by `variant`.
pub fn run<T: PartialEq + Clone>(variant: Variant, a: &[T], b: &[T]) -> Match<T> {
    match variant {
        Variant::Subsequence => longest_common_subsequence(a, b),
        Variant::Substring => longest_common_substring(a, b),
    }
}

pub fn compare(variant: Variant, a: &str, b: &str) -> (String, usize) {
    match variant {
        Variant::Subsequence => lcs_str(a, b),
        Variant::Substring => substring_str(a, b),
    }
}

/// True when `needle` embeds in `haystack` in order (gaps allowed).
pub fn is_subsequence<T: PartialEq>(needle: &[T], haystack: &[T]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|n| rest.any(|h| h == n))
}

/// True when `needle` appears as one contiguous run of `haystack`.
pub fn is_substring<T: PartialEq>(needle: &[T], haystack: &[T]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}
