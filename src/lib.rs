//! Chroma - a deterministic palette compiler for editor color themes
//!
//! Chroma takes a semantic palette definition and a rule-specification
//! document and expands them into a complete theme: UI-element colors and
//! syntax-token styles, contrast-checked against WCAG and serialized with
//! canonical ordering so regenerated themes diff cleanly.
//!
//! The pipeline is four pure stages:
//! palette → expansion → contrast validation → emission.

pub mod color;
pub mod contrast;
pub mod emit;
pub mod palette;
pub mod pipeline;
pub mod rules;

pub use color::Rgba;
pub use palette::PaletteTable;
pub use pipeline::{build, Options};
