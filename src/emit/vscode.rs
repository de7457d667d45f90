//! VS Code color theme emitter
//!
//! Produces the `colors` + `tokenColors` document VS Code loads. Ordering
//! is canonical: workbench colors alphabetical, token rules sorted by
//! scope. Duplicate UI elements keep the first occurrence.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::palette::PaletteTable;
use crate::rules::Expansion;

#[derive(Serialize)]
struct VsCodeTheme<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    colors: BTreeMap<&'a str, String>,
    #[serde(rename = "tokenColors")]
    token_colors: Vec<VsCodeTokenRule<'a>>,
}

#[derive(Serialize)]
struct VsCodeTokenRule<'a> {
    scope: &'a str,
    settings: VsCodeTokenSettings,
}

#[derive(Serialize)]
struct VsCodeTokenSettings {
    foreground: String,
    #[serde(rename = "fontStyle", skip_serializing_if = "Option::is_none")]
    font_style: Option<String>,
}

pub fn emit(palette: &PaletteTable, expansion: &Expansion) -> String {
    let mut colors = BTreeMap::new();
    for rule in &expansion.ui_rules {
        if colors.contains_key(rule.element.as_str()) {
            warn!(element = %rule.element, "duplicate ui element, keeping first occurrence");
            continue;
        }
        colors.insert(rule.element.as_str(), rule.color.to_hex());
    }

    let mut token_colors: Vec<_> = expansion
        .token_rules
        .iter()
        .map(|rule| VsCodeTokenRule {
            scope: rule.scope.as_str(),
            settings: VsCodeTokenSettings {
                foreground: rule.color.to_hex(),
                font_style: rule.font_style.map(|style| style.to_string()),
            },
        })
        .collect();
    token_colors.sort_by(|a, b| a.scope.cmp(&b.scope));

    let theme = VsCodeTheme {
        name: palette.name(),
        kind: palette.kind().as_str(),
        colors,
        token_colors,
    };

    // BTreeMap keys and the scope sort make this byte-stable across runs.
    let mut out = serde_json::to_string_pretty(&theme)
        .expect("vscode theme document serializes");
    out.push('\n');
    out
}
