//! Response Structuring
//!
//! Pure functions that turn an arbitrary raw model reply into a
//! [`StructuredRecord`](crate::contracts::StructuredRecord). Both are total:
//! there is no input for which they fail.
//!
//! - [`sanitize`]: character-level normalization so the text survives a
//!   strict JSON parser.
//! - [`extract`]: JSON-span isolation, strict parse, and synthesized
//!   fallback.

pub mod extract;
pub mod sanitize;

pub use extract::{extract, FALLBACK_THOUGHTS};
pub use sanitize::sanitize;
