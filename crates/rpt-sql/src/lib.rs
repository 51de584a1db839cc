//! SQL normalization for report design datasets.
//!
//! [`normalize`] rewrites generator SQL into the quoting and placeholder
//! conventions of the JDBC connector and returns the ordered parameter
//! names. [`sanitize`] holds optional repairs for a few recognizable
//! broken queries; they are off unless explicitly enabled.

pub mod normalize;
pub mod sanitize;

pub use normalize::{
    NormalizedSql, PLACEHOLDER_SENTINEL, POSITIONAL_PLACEHOLDER, QuoteStyle, extract_named_params,
    is_cjk, is_placeholder_query, normalize, normalize_with, requote_identifiers,
};
pub use sanitize::{
    FALLBACK_QUERY, SanitizeOptions, SanitizePass, Sanitized, is_constant_select,
    lint_optional_bindings, sanitize,
};
