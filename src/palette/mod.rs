//! Palette table - the authoritative named-color mapping
//!
//! A palette document declares the semantic colors a theme is built from.
//! Loading validates the document up front (duplicate names, malformed hex,
//! unrecognized family tags) so every later stage can trust the table.
//!
//! Document shape:
//!
//! ```json
//! {
//!   "name": "neon-dusk",
//!   "kind": "dark",
//!   "colors": [
//!     { "name": "deep-void", "hex": "#130d1a", "family": "purple", "role": "editor background" }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::color::{ParseColorError, Rgba};

/// Errors raised while loading a palette document
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document is not valid JSON or has the wrong shape
    #[error("palette document is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries share a name
    #[error("duplicate palette entry {0:?}")]
    DuplicateName(String),

    /// An entry's hex literal does not parse
    #[error("palette entry {name:?} has a malformed color: {source}")]
    MalformedColor {
        name: String,
        source: ParseColorError,
    },

    /// An entry's family tag is not one of the recognized families
    #[error("palette entry {name:?} has unrecognized family {family:?}")]
    UnknownFamily { name: String, family: String },
}

/// Lookup failure for a name absent from the table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown palette color {0:?}")]
pub struct UnknownColorError(pub String);

/// Hue family a palette entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFamily {
    Purple,
    Pink,
    Cyan,
    Green,
    Yellow,
    Red,
}

impl ColorFamily {
    pub const ALL: [ColorFamily; 6] = [
        ColorFamily::Purple,
        ColorFamily::Pink,
        ColorFamily::Cyan,
        ColorFamily::Green,
        ColorFamily::Yellow,
        ColorFamily::Red,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorFamily::Purple => "purple",
            ColorFamily::Pink => "pink",
            ColorFamily::Cyan => "cyan",
            ColorFamily::Green => "green",
            ColorFamily::Yellow => "yellow",
            ColorFamily::Red => "red",
        }
    }
}

impl FromStr for ColorFamily {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorFamily::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for ColorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the theme targets a dark or light editor chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, reusable color definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: String,
    pub rgba: Rgba,
    pub family: ColorFamily,
    /// Free-text usage note
    pub role: String,
}

/// Raw document shapes; validated into [`PaletteTable`] by `load`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPaletteDoc {
    name: String,
    #[serde(default)]
    kind: ThemeKind,
    colors: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    name: String,
    hex: String,
    family: String,
    #[serde(default)]
    role: String,
}

/// The validated palette: entries in declaration order plus a name index
#[derive(Debug, Clone)]
pub struct PaletteTable {
    name: String,
    kind: ThemeKind,
    entries: Vec<PaletteEntry>,
    index: HashMap<String, usize>,
}

impl PaletteTable {
    /// Parse and validate a palette document
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let raw: RawPaletteDoc = serde_json::from_str(json)?;
        Self::load(raw)
    }

    fn load(raw: RawPaletteDoc) -> Result<Self, SchemaError> {
        let mut entries = Vec::with_capacity(raw.colors.len());
        let mut index = HashMap::with_capacity(raw.colors.len());

        for entry in raw.colors {
            if index.contains_key(&entry.name) {
                return Err(SchemaError::DuplicateName(entry.name));
            }

            let rgba =
                Rgba::parse_hex(&entry.hex).map_err(|source| SchemaError::MalformedColor {
                    name: entry.name.clone(),
                    source,
                })?;

            let family =
                entry
                    .family
                    .parse::<ColorFamily>()
                    .map_err(|()| SchemaError::UnknownFamily {
                        name: entry.name.clone(),
                        family: entry.family.clone(),
                    })?;

            index.insert(entry.name.clone(), entries.len());
            entries.push(PaletteEntry {
                name: entry.name,
                rgba,
                family,
                role: entry.role,
            });
        }

        debug!(theme = %raw.name, entries = entries.len(), "loaded palette");

        Ok(Self {
            name: raw.name,
            kind: raw.kind,
            entries,
            index,
        })
    }

    /// Resolve a palette entry by name
    pub fn lookup(&self, name: &str) -> Result<&PaletteEntry, UnknownColorError> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| UnknownColorError(name.to_string()))
    }

    /// Theme name carried on the document
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ThemeKind {
        self.kind
    }

    /// Entries in declaration order
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
