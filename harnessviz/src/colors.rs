//! Wire Color Resolution
//!
//! Fixed lookup tables for the short two-letter wire color codes used in
//! cable descriptions, the named color-code palettes (DIN 47100, IEC 60757,
//! black/white), and the metric cross-section to AWG equivalence table.
//!
//! Every color code known to the crate has an entry in all three notations
//! (hex triple, English name, German abbreviation).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::HarnessError;

/// One row of the color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireColor {
    pub code: &'static str,
    pub hex: &'static str,
    pub name: &'static str,
    pub ger: &'static str,
}

pub const WIRE_COLORS: &[WireColor] = &[
    WireColor { code: "BK", hex: "#000000", name: "black", ger: "sw" },
    WireColor { code: "WH", hex: "#ffffff", name: "white", ger: "ws" },
    WireColor { code: "GY", hex: "#808080", name: "grey", ger: "gr" },
    WireColor { code: "PK", hex: "#ff80c0", name: "pink", ger: "rs" },
    WireColor { code: "RD", hex: "#ff0000", name: "red", ger: "rt" },
    WireColor { code: "OG", hex: "#ff8000", name: "orange", ger: "or" },
    WireColor { code: "YE", hex: "#ffff00", name: "yellow", ger: "ge" },
    WireColor { code: "GN", hex: "#00ff00", name: "green", ger: "gn" },
    WireColor { code: "TQ", hex: "#00ffff", name: "turquoise", ger: "tk" },
    WireColor { code: "BU", hex: "#0000ff", name: "blue", ger: "bl" },
    WireColor { code: "VT", hex: "#8000ff", name: "violet", ger: "vi" },
    WireColor { code: "BN", hex: "#666600", name: "brown", ger: "br" },
];

/// Hex triple used for edge borders.
pub const BLACK_HEX: &str = "#000000";

pub const DIN_PALETTE: &[&str] = &["WH", "BN", "GN", "YE", "GY", "PK", "BU", "RD", "BK", "VT"];
pub const IEC_PALETTE: &[&str] = &["BN", "RD", "OG", "YE", "GN", "BU", "VT", "GY", "WH", "BK"];
pub const BW_PALETTE: &[&str] = &["BK", "WH"];

/// Metric cross-section (mm²) to AWG, keyed by the textual cross-section.
pub const AWG_EQUIVALENTS: &[(&str, u32)] = &[
    ("0.09", 28),
    ("0.14", 26),
    ("0.25", 24),
    ("0.34", 22),
    ("0.5", 21),
    ("0.75", 20),
    ("1", 18),
    ("1.5", 16),
    ("2.5", 14),
    ("4", 12),
    ("6", 10),
    ("10", 8),
    ("16", 6),
    ("25", 4),
];

/// Look up a color table row by its short code.
pub fn lookup(code: &str) -> Option<&'static WireColor> {
    WIRE_COLORS.iter().find(|c| c.code == code)
}

/// Hex triple for a color code, if the code is known.
pub fn hex_for(code: &str) -> Option<&'static str> {
    lookup(code).map(|c| c.hex)
}

/// Named wire color-code palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorCode {
    Din,
    Iec,
    Bw,
}

impl ColorCode {
    pub const ALL: [ColorCode; 3] = [ColorCode::Din, ColorCode::Iec, ColorCode::Bw];

    /// Ordered color codes of this palette.
    pub fn palette(&self) -> &'static [&'static str] {
        match self {
            ColorCode::Din => DIN_PALETTE,
            ColorCode::Iec => IEC_PALETTE,
            ColorCode::Bw => BW_PALETTE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorCode::Din => "DIN",
            ColorCode::Iec => "IEC",
            ColorCode::Bw => "BW",
        }
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorCode {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorCode::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| HarnessError::UnknownColorCode(s.to_string()))
    }
}

impl TryFrom<String> for ColorCode {
    type Error = HarnessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorCode> for String {
    fn from(code: ColorCode) -> Self {
        code.as_str().to_string()
    }
}

/// How wire colors are printed inside cable labels.
///
/// Each mode picks a notation and a letter case; `Short` prints the code
/// itself, the others go through the color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorMode {
    /// `full`
    FullLower,
    /// `FULL`
    FullUpper,
    /// `hex`
    HexLower,
    /// `HEX`
    HexUpper,
    /// `ger`
    GerLower,
    /// `GER`
    GerUpper,
    /// `short`
    ShortLower,
    /// `SHORT`
    #[default]
    ShortUpper,
}

impl ColorMode {
    pub const ALL: [ColorMode; 8] = [
        ColorMode::FullLower,
        ColorMode::FullUpper,
        ColorMode::HexLower,
        ColorMode::HexUpper,
        ColorMode::GerLower,
        ColorMode::GerUpper,
        ColorMode::ShortLower,
        ColorMode::ShortUpper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::FullLower => "full",
            ColorMode::FullUpper => "FULL",
            ColorMode::HexLower => "hex",
            ColorMode::HexUpper => "HEX",
            ColorMode::GerLower => "ger",
            ColorMode::GerUpper => "GER",
            ColorMode::ShortLower => "short",
            ColorMode::ShortUpper => "SHORT",
        }
    }

    fn is_upper(&self) -> bool {
        matches!(
            self,
            ColorMode::FullUpper | ColorMode::HexUpper | ColorMode::GerUpper | ColorMode::ShortUpper
        )
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| HarnessError::UnknownDisplayMode(s.to_string()))
    }
}

impl TryFrom<String> for ColorMode {
    type Error = HarnessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorMode> for String {
    fn from(mode: ColorMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Translate a short color code into the notation selected by `mode`.
///
/// An empty code stays empty in every mode (unlabelled wires).
pub fn translate_color(code: &str, mode: ColorMode) -> Result<String, HarnessError> {
    if code.is_empty() {
        return Ok(String::new());
    }

    let resolve = |pick: fn(&WireColor) -> &'static str| {
        lookup(code)
            .map(pick)
            .ok_or_else(|| HarnessError::UnresolvedColor {
                code: code.to_string(),
                mode: mode.as_str(),
            })
    };

    let text = match mode {
        ColorMode::FullLower | ColorMode::FullUpper => resolve(|c| c.name)?,
        ColorMode::HexLower | ColorMode::HexUpper => resolve(|c| c.hex)?,
        ColorMode::GerLower | ColorMode::GerUpper => resolve(|c| c.ger)?,
        ColorMode::ShortLower | ColorMode::ShortUpper => code,
    };

    Ok(if mode.is_upper() {
        text.to_uppercase()
    } else {
        text.to_lowercase()
    })
}

/// AWG equivalent of a metric cross-section given in textual form (`"1.5"`).
///
/// Returns `None` when the cross-section is not tabulated.
pub fn awg_equivalent(mm2: &str) -> Option<u32> {
    AWG_EQUIVALENTS
        .iter()
        .find(|(key, _)| *key == mm2)
        .map(|(_, awg)| *awg)
}
