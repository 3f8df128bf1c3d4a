// src/transform/style.rs

//! Inline `style` attribute reading.
//!
//! The editor export carries all formatting as inline CSS declarations.
//! This is a declaration splitter, not a CSS parser: values are returned
//! verbatim and only pixel lengths get numeric extraction.

use regex::Regex;

/// Parsed `style="..."` attribute with case-insensitive property lookup.
#[derive(Debug, Clone, Default)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Parse a raw style attribute value.
    ///
    /// Declarations are split on `;`, properties on the first `:`.
    /// Malformed declarations are skipped.
    pub fn parse(raw: &str) -> Self {
        let declarations = raw
            .split(';')
            .filter_map(|decl| {
                let (property, value) = decl.split_once(':')?;
                let property = property.trim().to_lowercase();
                let value = value.trim().to_string();
                if property.is_empty() {
                    None
                } else {
                    Some((property, value))
                }
            })
            .collect();
        Self { declarations }
    }

    /// Parse the style attribute of an element, empty when absent.
    pub fn of(element: &scraper::ElementRef<'_>) -> Self {
        element
            .value()
            .attr("style")
            .map(Self::parse)
            .unwrap_or_default()
    }

    /// Get a property value; absent or empty values return None.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Get a property value verbatim, falling back to a default when the
    /// property is absent or empty.
    pub fn get_or<'a>(&'a self, property: &str, default: &'a str) -> &'a str {
        self.get(property).unwrap_or(default)
    }

    /// Read a pixel length as a float (e.g. `"100px"` → 100.0).
    pub fn px(&self, property: &str) -> Option<f64> {
        self.get(property).and_then(parse_px)
    }
}

/// Extract the leading floating-point number from a CSS length value.
///
/// Mirrors the source's numeric coercion: `"100px"` → 100.0,
/// `"33.5px"` → 33.5, `"auto"` → None.
pub fn parse_px(value: &str) -> Option<f64> {
    let re = Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)").ok()?;
    re.find(value.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
