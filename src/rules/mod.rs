//! Rule specifications and expansion
//!
//! A rule document maps syntax scopes and UI elements onto palette entries.
//! Expansion resolves every reference against the palette and produces the
//! derived rule sets in declaration order.

pub mod expand;
pub mod model;

// Re-exports
pub use expand::{expand, Expansion, ResolvedPairing, TokenRule, UiRule, UnresolvedReferenceError};
pub use model::{FontFlag, FontStyle, PairingSpec, RuleDoc, TokenSpec, UiSpec};
