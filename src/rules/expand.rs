//! Rule expansion
//!
//! Resolves a [`RuleDoc`] against a [`PaletteTable`] into the derived rule
//! sets. Pure and deterministic: the same inputs always produce the same
//! output, ordered by declaration order so regenerated artifacts diff
//! cleanly.

use thiserror::Error;
use tracing::debug;

use crate::color::Rgba;
use crate::palette::PaletteTable;

use super::model::{FontStyle, RuleDoc};

/// A rule references something that does not exist
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnresolvedReferenceError {
    #[error("token rule {scope:?} references unknown palette color {color:?}")]
    Token { scope: String, color: String },

    #[error("ui rule {element:?} references unknown palette color {color:?}")]
    Ui { element: String, color: String },

    #[error("pairing references {element:?}, which is not a declared ui element")]
    Pairing { element: String },
}

/// Resolved style assignment for a syntax category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRule {
    pub scope: String,
    pub color: Rgba,
    /// `None` inherits the editor default; `Some` with an empty set clears it
    pub font_style: Option<FontStyle>,
}

/// Resolved style assignment for a UI element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiRule {
    pub element: String,
    pub color: Rgba,
}

/// A pairing with both endpoints resolved to their expanded colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPairing {
    pub foreground: String,
    pub background: String,
    pub fg: Rgba,
    pub bg: Rgba,
}

/// The expander's output, in declaration order throughout
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    pub token_rules: Vec<TokenRule>,
    pub ui_rules: Vec<UiRule>,
    pub pairings: Vec<ResolvedPairing>,
}

/// Expand a rule document against the palette
///
/// Every `colorName` must resolve to a palette entry and every pairing
/// endpoint must name a declared UI element; the first unresolved reference
/// aborts the whole expansion.
pub fn expand(palette: &PaletteTable, doc: &RuleDoc) -> Result<Expansion, UnresolvedReferenceError> {
    let mut token_rules = Vec::with_capacity(doc.tokens.len());
    for spec in &doc.tokens {
        let entry = palette.lookup(&spec.color_name).map_err(|_| {
            UnresolvedReferenceError::Token {
                scope: spec.scope.clone(),
                color: spec.color_name.clone(),
            }
        })?;
        token_rules.push(TokenRule {
            scope: spec.scope.clone(),
            color: entry.rgba,
            font_style: spec.font_style.as_deref().map(FontStyle::from_flags),
        });
    }

    let mut ui_rules = Vec::with_capacity(doc.ui.len());
    for spec in &doc.ui {
        let entry = palette.lookup(&spec.color_name).map_err(|_| {
            UnresolvedReferenceError::Ui {
                element: spec.ui_element.clone(),
                color: spec.color_name.clone(),
            }
        })?;
        let color = match spec.alpha {
            Some(alpha) => entry.rgba.with_alpha(alpha),
            None => entry.rgba,
        };
        ui_rules.push(UiRule {
            element: spec.ui_element.clone(),
            color,
        });
    }

    let resolve_element = |element: &str| {
        ui_rules
            .iter()
            .find(|rule| rule.element == element)
            .map(|rule| rule.color)
            .ok_or_else(|| UnresolvedReferenceError::Pairing {
                element: element.to_string(),
            })
    };

    let mut pairings = Vec::with_capacity(doc.pairings.len());
    for spec in &doc.pairings {
        let fg = resolve_element(&spec.foreground)?;
        let bg = resolve_element(&spec.background)?;
        pairings.push(ResolvedPairing {
            foreground: spec.foreground.clone(),
            background: spec.background.clone(),
            fg,
            bg,
        });
    }

    debug!(
        tokens = token_rules.len(),
        ui = ui_rules.len(),
        pairings = pairings.len(),
        "expanded rule document"
    );

    Ok(Expansion {
        token_rules,
        ui_rules,
        pairings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteTable;
    use crate::rules::model::RuleDoc;

    fn palette() -> PaletteTable {
        PaletteTable::from_json(
            r##"{
                "name": "neon-dusk",
                "colors": [
                    { "name": "deep-void", "hex": "#130d1a", "family": "purple" },
                    { "name": "bone", "hex": "#ded2cd", "family": "yellow" },
                    { "name": "hot-magenta", "hex": "#ff019a", "family": "pink" }
                ]
            }"##,
        )
        .unwrap()
    }

    fn rules() -> RuleDoc {
        RuleDoc::from_json(
            r#"{
                "tokens": [
                    { "scope": "keyword", "colorName": "hot-magenta", "fontStyle": ["bold"] },
                    { "scope": "comment", "colorName": "bone", "fontStyle": ["italic"] }
                ],
                "ui": [
                    { "uiElement": "editor.background", "colorName": "deep-void" },
                    { "uiElement": "editor.foreground", "colorName": "bone" },
                    { "uiElement": "editor.selectionBackground", "colorName": "hot-magenta", "alpha": 64 }
                ],
                "pairings": [
                    { "foreground": "editor.foreground", "background": "editor.background" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn expansion_preserves_declaration_order() {
        let expansion = expand(&palette(), &rules()).unwrap();

        let scopes: Vec<_> = expansion.token_rules.iter().map(|r| r.scope.as_str()).collect();
        assert_eq!(scopes, ["keyword", "comment"]);

        let elements: Vec<_> = expansion.ui_rules.iter().map(|r| r.element.as_str()).collect();
        assert_eq!(
            elements,
            [
                "editor.background",
                "editor.foreground",
                "editor.selectionBackground"
            ]
        );
    }

    #[test]
    fn expansion_is_deterministic() {
        let palette = palette();
        let doc = rules();
        let first = expand(&palette, &doc).unwrap();
        let second = expand(&palette, &doc).unwrap();
        assert_eq!(first.token_rules, second.token_rules);
        assert_eq!(first.ui_rules, second.ui_rules);
        assert_eq!(first.pairings, second.pairings);
    }

    #[test]
    fn alpha_override_is_applied() {
        let expansion = expand(&palette(), &rules()).unwrap();
        let selection = &expansion.ui_rules[2];
        assert_eq!(selection.color.to_hex(), "#ff019a40");
    }

    #[test]
    fn pairings_resolve_to_expanded_colors() {
        let expansion = expand(&palette(), &rules()).unwrap();
        let pairing = &expansion.pairings[0];
        assert_eq!(pairing.fg.to_hex(), "#ded2cd");
        assert_eq!(pairing.bg.to_hex(), "#130d1a");
    }

    #[test]
    fn unknown_token_color_fails() {
        let doc = RuleDoc::from_json(
            r#"{ "tokens": [ { "scope": "keyword", "colorName": "ghost" } ] }"#,
        )
        .unwrap();
        let err = expand(&palette(), &doc).unwrap_err();
        assert_eq!(
            err,
            UnresolvedReferenceError::Token {
                scope: "keyword".to_string(),
                color: "ghost".to_string(),
            }
        );
    }

    #[test]
    fn unknown_ui_color_fails() {
        let doc = RuleDoc::from_json(
            r#"{ "ui": [ { "uiElement": "editor.background", "colorName": "ghost" } ] }"#,
        )
        .unwrap();
        let err = expand(&palette(), &doc).unwrap_err();
        assert!(matches!(err, UnresolvedReferenceError::Ui { color, .. } if color == "ghost"));
    }

    #[test]
    fn pairing_over_undeclared_element_fails() {
        let doc = RuleDoc::from_json(
            r#"{
                "ui": [ { "uiElement": "editor.background", "colorName": "deep-void" } ],
                "pairings": [
                    { "foreground": "statusBar.foreground", "background": "editor.background" }
                ]
            }"#,
        )
        .unwrap();
        let err = expand(&palette(), &doc).unwrap_err();
        assert_eq!(
            err,
            UnresolvedReferenceError::Pairing {
                element: "statusBar.foreground".to_string(),
            }
        );
    }
}
