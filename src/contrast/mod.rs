//! WCAG contrast validation
//!
//! Computes the relative-luminance contrast ratio for every declared
//! foreground/background pairing and grades it against the WCAG bands.
//! Validation never fails the build by itself: every pairing yields a
//! report, passing ones included, and escalation is caller policy.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::color::Rgba;
use crate::rules::ResolvedPairing;

/// WCAG AA minimum for normal text
pub const WCAG_AA: f64 = 4.5;
/// WCAG AAA minimum for normal text
pub const WCAG_AAA: f64 = 7.0;
/// WCAG AA minimum for large text
pub const WCAG_AA_LARGE: f64 = 3.0;

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance of a color (alpha ignored)
pub fn relative_luminance(color: Rgba) -> f64 {
    let r = srgb_to_linear(f64::from(color.r) / 255.0);
    let g = srgb_to_linear(f64::from(color.g) / 255.0);
    let b = srgb_to_linear(f64::from(color.b) / 255.0);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Contrast ratio between two colors, in `[1.0, 21.0]`
pub fn contrast_ratio(a: Rgba, b: Rgba) -> f64 {
    let lum_a = relative_luminance(a);
    let lum_b = relative_luminance(b);
    let lighter = lum_a.max(lum_b);
    let darker = lum_a.min(lum_b);
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG conformance band for a measured ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grade {
    Aaa,
    Aa,
    AaLarge,
    Fail,
}

impl Grade {
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio >= WCAG_AAA {
            Grade::Aaa
        } else if ratio >= WCAG_AA {
            Grade::Aa
        } else if ratio >= WCAG_AA_LARGE {
            Grade::AaLarge
        } else {
            Grade::Fail
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::Aaa => "AAA",
            Grade::Aa => "AA",
            Grade::AaLarge => "AA-large",
            Grade::Fail => "fail",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measured contrast for one pairing
///
/// Recomputed on every build; never persisted as a source of truth.
#[derive(Debug, Clone, Serialize)]
pub struct ContrastReport {
    /// `"<foreground> over <background>"`
    pub pair_id: String,
    pub foreground: String,
    pub background: String,
    pub fg: Rgba,
    pub bg: Rgba,
    pub ratio: f64,
    pub passes: bool,
}

impl ContrastReport {
    pub fn grade(&self) -> Grade {
        Grade::for_ratio(self.ratio)
    }
}

/// Measure every pairing against `min_ratio`
///
/// A translucent foreground is composited over the background (treated as
/// opaque) first, so alpha-blended colors are graded by what is actually
/// rendered. Reports come back in pairing declaration order.
pub fn validate(pairings: &[ResolvedPairing], min_ratio: f64) -> Vec<ContrastReport> {
    pairings
        .iter()
        .map(|pairing| {
            let bg = pairing.bg.with_alpha(0xff);
            let fg = pairing.fg.over(bg);
            let ratio = contrast_ratio(fg, bg);
            let passes = ratio >= min_ratio;

            if !passes {
                warn!(
                    pair = %pairing.foreground,
                    over = %pairing.background,
                    ratio,
                    min = min_ratio,
                    "contrast below minimum"
                );
            }

            ContrastReport {
                pair_id: format!("{} over {}", pairing.foreground, pairing.background),
                foreground: pairing.foreground.clone(),
                background: pairing.background.clone(),
                fg,
                bg,
                ratio,
                passes,
            }
        })
        .collect()
}

/// Render the human-readable contrast-report artifact
pub fn render_report(reports: &[ContrastReport], min_ratio: f64) -> String {
    let passing = reports.iter().filter(|r| r.passes).count();
    let mut out = format!(
        "contrast report: {} pairings, {} pass, {} fail (minimum {:.2})\n",
        reports.len(),
        passing,
        reports.len() - passing,
        min_ratio,
    );

    for report in reports {
        let status = if report.passes { "PASS" } else { "FAIL" };
        out.push_str(&format!(
            "  {status}  {ratio:>5.2}  {grade:<8}  {pair}  ({fg} on {bg})\n",
            ratio = report.ratio,
            grade = report.grade(),
            pair = report.pair_id,
            fg = report.fg,
            bg = report.bg,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn pairing(name: &str, fg: Rgba, bg: Rgba) -> ResolvedPairing {
        ResolvedPairing {
            foreground: format!("{name}.foreground"),
            background: format!("{name}.background"),
            fg,
            bg,
        }
    }

    #[test]
    fn bone_on_deep_void_is_aaa() {
        let ratio = contrast_ratio(
            Rgba::opaque(0xde, 0xd2, 0xcd),
            Rgba::opaque(0x13, 0x0d, 0x1a),
        );
        assert!((ratio - 12.91).abs() < 0.1, "got {ratio}");
        assert_eq!(Grade::for_ratio(ratio), Grade::Aaa);
    }

    #[test]
    fn slate_blue_on_deep_void_fails_aa() {
        let ratio = contrast_ratio(
            Rgba::opaque(0x49, 0x54, 0x95),
            Rgba::opaque(0x13, 0x0d, 0x1a),
        );
        assert!((ratio - 2.71).abs() < 0.1, "got {ratio}");
        assert_eq!(Grade::for_ratio(ratio), Grade::Fail);
    }

    #[test]
    fn black_on_white_is_maximal() {
        let ratio = contrast_ratio(Rgba::opaque(0, 0, 0), Rgba::opaque(255, 255, 255));
        assert!((ratio - 21.0).abs() < 1e-9);
    }

    #[test]
    fn validate_reports_passing_and_failing_pairs() {
        let pairings = [
            pairing(
                "editor",
                Rgba::opaque(0xde, 0xd2, 0xcd),
                Rgba::opaque(0x13, 0x0d, 0x1a),
            ),
            pairing(
                "statusBar",
                Rgba::opaque(0x49, 0x54, 0x95),
                Rgba::opaque(0x13, 0x0d, 0x1a),
            ),
        ];

        let reports = validate(&pairings, WCAG_AA);
        assert_eq!(reports.len(), 2);
        assert!(reports[0].passes);
        assert!(!reports[1].passes);
        assert_eq!(reports[0].pair_id, "editor.foreground over editor.background");
    }

    #[test]
    fn translucent_foreground_is_composited_before_measuring() {
        let solid = pairing(
            "a",
            Rgba::opaque(0xde, 0xd2, 0xcd),
            Rgba::opaque(0x13, 0x0d, 0x1a),
        );
        let faded = pairing(
            "b",
            Rgba::new(0xde, 0xd2, 0xcd, 0x40),
            Rgba::opaque(0x13, 0x0d, 0x1a),
        );

        let reports = validate(&[solid, faded], WCAG_AA);
        assert!(reports[1].ratio < reports[0].ratio);
        assert!(reports[1].fg.is_opaque());
    }

    #[test]
    fn render_report_includes_every_pairing() {
        let pairings = [pairing(
            "editor",
            Rgba::opaque(0xde, 0xd2, 0xcd),
            Rgba::opaque(0x13, 0x0d, 0x1a),
        )];
        let rendered = render_report(&validate(&pairings, WCAG_AA), WCAG_AA);

        assert!(rendered.starts_with("contrast report: 1 pairings, 1 pass, 0 fail"));
        assert!(rendered.contains("PASS"));
        assert!(rendered.contains("AAA"));
        assert!(rendered.contains("#ded2cd on #130d1a"));
    }

    proptest! {
        #[test]
        fn ratio_is_symmetric_and_bounded(ar: u8, ag: u8, ab: u8, br: u8, bg: u8, bb: u8) {
            let a = Rgba::opaque(ar, ag, ab);
            let b = Rgba::opaque(br, bg, bb);
            let forward = contrast_ratio(a, b);
            let backward = contrast_ratio(b, a);
            prop_assert!((forward - backward).abs() < 1e-12);
            prop_assert!(forward >= 1.0);
            prop_assert!(forward <= 21.0 + 1e-9);
        }
    }
}
