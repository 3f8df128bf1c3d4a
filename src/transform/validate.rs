// src/transform/validate.rs

//! Article body schema validation.
//!
//! Bodies are persisted as opaque JSON and come back from storage or
//! from editorial clients as untrusted values. Validation is a recursive
//! structural check against the body model that fails closed: any shape
//! mismatch at any nesting depth yields no value, never a partial
//! document.

use serde_json::Value;

use crate::models::ArticleBody;

/// Validate a candidate JSON value against the article body shape.
///
/// Returns the parsed body on success, None on any mismatch. Callers
/// must treat None as "content unavailable" and refuse to render or
/// publish.
pub fn validate(candidate: &Value) -> Option<ArticleBody> {
    serde_json::from_value(candidate.clone()).ok()
}
