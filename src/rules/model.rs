//! Rule document model
//!
//! Document shape (unknown fields are rejected):
//!
//! ```json
//! {
//!   "tokens": [
//!     { "scope": "keyword", "colorName": "hot-magenta", "fontStyle": ["bold"] }
//!   ],
//!   "ui": [
//!     { "uiElement": "editor.background", "colorName": "deep-void" },
//!     { "uiElement": "editor.selectionBackground", "colorName": "hot-magenta", "alpha": 64 }
//!   ],
//!   "pairings": [
//!     { "foreground": "editor.foreground", "background": "editor.background" }
//!   ]
//! }
//! ```
//!
//! For `fontStyle`, an absent list means the scope inherits the editor
//! default; an empty list means "explicitly plain" and clears any inherited
//! styling when emitted.

use std::fmt;

use serde::Deserialize;

/// A single font-style flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFlag {
    Bold,
    Italic,
    Underline,
}

/// A resolved set of font-style flags
///
/// Invalid combinations are unrepresentable: "plain" is simply the empty
/// set, so it cannot be combined with anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl FontStyle {
    pub fn from_flags(flags: &[FontFlag]) -> Self {
        let mut style = Self::default();
        for flag in flags {
            match flag {
                FontFlag::Bold => style.bold = true,
                FontFlag::Italic => style.italic = true,
                FontFlag::Underline => style.underline = true,
            }
        }
        style
    }

    pub fn is_plain(self) -> bool {
        !(self.bold || self.italic || self.underline)
    }
}

impl fmt::Display for FontStyle {
    /// Space-joined flags in a fixed order; empty for the plain style
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for (on, word) in [
            (self.bold, "bold"),
            (self.italic, "italic"),
            (self.underline, "underline"),
        ] {
            if on {
                write!(f, "{sep}{word}")?;
                sep = " ";
            }
        }
        Ok(())
    }
}

/// Style assignment for a syntax category
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TokenSpec {
    pub scope: String,
    pub color_name: String,
    #[serde(default)]
    pub font_style: Option<Vec<FontFlag>>,
}

/// Style assignment for a host-application interface element
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UiSpec {
    pub ui_element: String,
    pub color_name: String,
    /// Blend level overriding the palette entry's own alpha channel
    #[serde(default)]
    pub alpha: Option<u8>,
}

/// A foreground element read over a background element
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PairingSpec {
    pub foreground: String,
    pub background: String,
}

/// The full rule-specification document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDoc {
    #[serde(default)]
    pub tokens: Vec<TokenSpec>,
    #[serde(default)]
    pub ui: Vec<UiSpec>,
    #[serde(default)]
    pub pairings: Vec<PairingSpec>,
}

impl RuleDoc {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
