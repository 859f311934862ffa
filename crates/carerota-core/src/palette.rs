//! Deterministic carer-name coloring.
//!
//! Every client renders a carer in the same colors without any shared
//! registry: the name itself picks the palette entry. The fold must stay
//! bit-compatible with 32-bit two's-complement overflow arithmetic, or
//! existing rotas would recolor.

use serde::Serialize;

/// A background/text style pair from the fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorPair {
    pub bg: &'static str,
    pub text: &'static str,
}

/// Fixed, ordered palette. Order is part of the contract: the hash picks
/// by index, so reordering recolors every name.
pub const COLOR_PAIRS: [ColorPair; 12] = [
    ColorPair { bg: "bg-amber-200", text: "text-amber-800" },
    ColorPair { bg: "bg-cyan-200", text: "text-cyan-800" },
    ColorPair { bg: "bg-fuchsia-200", text: "text-fuchsia-800" },
    ColorPair { bg: "bg-emerald-200", text: "text-emerald-800" },
    ColorPair { bg: "bg-orange-200", text: "text-orange-800" },
    ColorPair { bg: "bg-violet-200", text: "text-violet-800" },
    ColorPair { bg: "bg-pink-200", text: "text-pink-800" },
    ColorPair { bg: "bg-lime-200", text: "text-lime-800" },
    ColorPair { bg: "bg-sky-200", text: "text-sky-800" },
    ColorPair { bg: "bg-rose-200", text: "text-rose-800" },
    ColorPair { bg: "bg-teal-200", text: "text-teal-800" },
    ColorPair { bg: "bg-indigo-200", text: "text-indigo-800" },
];

/// Style pair for an unassigned shift.
pub const UNASSIGNED: ColorPair = ColorPair { bg: "", text: "" };

/// Map a carer name to its palette entry.
///
/// Folds the UTF-16 code units of the lowercased name with
/// `hash = hash * 31 + code` in wrapping `i32` arithmetic, then indexes
/// the palette with `|hash| mod 12`. Empty names get [`UNASSIGNED`].
pub fn color_for(name: &str) -> ColorPair {
    if name.is_empty() {
        return UNASSIGNED;
    }

    let mut hash: i32 = 0;
    for code in name.to_lowercase().encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(code as i32);
    }
    // unsigned_abs: |i32::MIN| does not fit in i32
    COLOR_PAIRS[hash.unsigned_abs() as usize % COLOR_PAIRS.len()]
}
