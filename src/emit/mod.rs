//! Theme document emission
//!
//! Serializes an expansion into the target theme-description format.
//! Emission is deterministic: identical rule sets produce byte-identical
//! output, so regenerated artifacts diff cleanly.

mod vscode;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::palette::PaletteTable;
use crate::rules::Expansion;

/// The requested output format is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported target format {0:?}")]
pub struct UnsupportedTargetError(pub String);

/// Supported theme-description formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetFormat {
    /// VS Code color theme JSON (`colors` + `tokenColors`)
    #[default]
    VsCode,
}

impl FromStr for TargetFormat {
    type Err = UnsupportedTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vscode" => Ok(TargetFormat::VsCode),
            other => Err(UnsupportedTargetError(other.to_string())),
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetFormat::VsCode => f.write_str("vscode"),
        }
    }
}

/// Serialize the expanded rule sets into `format`
pub fn emit(palette: &PaletteTable, expansion: &Expansion, format: TargetFormat) -> String {
    match format {
        TargetFormat::VsCode => vscode::emit(palette, expansion),
    }
}
