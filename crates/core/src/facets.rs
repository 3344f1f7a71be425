//! Facet axes and their fixed value registries.
//!
//! This module provides:
//! - Stable value IDs per axis (colors, sizes)
//! - The `Facet` trait the search index is generic over
//! - Case-insensitive parsing of value names for frontends

#![forbid(unsafe_code)]

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------- Value IDs (stable) ----------------
// Colors
pub const COLOR_RED: u32 = 1_001;
pub const COLOR_BLUE: u32 = 1_002;
pub const COLOR_YELLOW: u32 = 1_003;
pub const COLOR_WHITE: u32 = 1_004;
pub const COLOR_BLACK: u32 = 1_005;

// Sizes
pub const SIZE_SMALL: u32 = 2_001;
pub const SIZE_MEDIUM: u32 = 2_002;
pub const SIZE_LARGE: u32 = 2_003;

/// A categorical axis with a closed, process-wide set of values.
///
/// `ALL` is the registry used to seed zero counts: facet breakdowns list every
/// entry of `ALL`, in that order. `ordinal` is the position of a value in `ALL`.
pub trait Facet: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Axis name used in logs and error messages.
    const AXIS: &'static str;
    const ALL: &'static [Self];

    fn id(self) -> u32;
    fn name(self) -> &'static str;
    fn ordinal(self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Yellow,
    White,
    Black,
}

impl Facet for Color {
    const AXIS: &'static str = "color";
    const ALL: &'static [Self] = &[Color::Red, Color::Blue, Color::Yellow, Color::White, Color::Black];

    fn id(self) -> u32 {
        match self {
            Color::Red => COLOR_RED,
            Color::Blue => COLOR_BLUE,
            Color::Yellow => COLOR_YELLOW,
            Color::White => COLOR_WHITE,
            Color::Black => COLOR_BLACK,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::White => "White",
            Color::Black => "Black",
        }
    }

    fn ordinal(self) -> usize { self as usize }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Facet for Size {
    const AXIS: &'static str = "size";
    const ALL: &'static [Self] = &[Size::Small, Size::Medium, Size::Large];

    fn id(self) -> u32 {
        match self {
            Size::Small => SIZE_SMALL,
            Size::Medium => SIZE_MEDIUM,
            Size::Large => SIZE_LARGE,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
        }
    }

    fn ordinal(self) -> usize { self as usize }
}

/// Returned when a value name is not part of an axis registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {axis} value: {value:?}")]
pub struct ParseFacetError {
    pub axis: &'static str,
    pub value: String,
}

fn parse_facet<F: Facet>(s: &str) -> Result<F, ParseFacetError> {
    let needle = s.trim();
    F::ALL
        .iter()
        .copied()
        .find(|v| v.name().eq_ignore_ascii_case(needle))
        .ok_or_else(|| ParseFacetError { axis: F::AXIS, value: s.to_string() })
}

impl FromStr for Color {
    type Err = ParseFacetError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { parse_facet(s) }
}

impl FromStr for Size {
    type Err = ParseFacetError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { parse_facet(s) }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad(self.name()) }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad(self.name()) }
}

/// Look up a value by its stable ID.
pub fn facet_by_id<F: Facet>(id: u32) -> Option<F> {
    F::ALL.iter().copied().find(|v| v.id() == id)
}
