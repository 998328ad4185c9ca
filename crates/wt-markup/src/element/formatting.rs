//! Directive parameter list parsing.
//!
//! Parses the bracketed parameter list of a directive such as
//! `image:sunset.jpg[Skyline,100,title="Evening"]`. Parameters are separated
//! by commas and are either `key="value"` pairs or bare positional values.
//!
//! Commas are not escapable: a quoted value containing a comma is split at
//! that comma.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static KEY_VALUE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(.*)="(.*)""#).unwrap());

/// Key/value properties parsed from a directive parameter list.
///
/// # Example
///
/// ```
/// use wt_markup::element::FormattingProperties;
///
/// let props = FormattingProperties::parse(r#"Skyline,title="Dusk",100"#, &["alt", "width", "height"]);
/// assert_eq!(props.get("alt"), Some("Skyline"));
/// assert_eq!(props.get("width"), Some("100"));
/// assert_eq!(props.get("title"), Some("Dusk"));
/// assert_eq!(props.get("height"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormattingProperties {
    values: HashMap<String, String>,
}

impl FormattingProperties {
    /// Parse a raw parameter list.
    ///
    /// Segments shaped like `key="value"` are recorded as-is and do not consume
    /// a positional slot. Any other segment is assigned, trimmed, to the next
    /// unused name in `positional`; once those run out, remaining bare
    /// segments are dropped.
    #[must_use]
    pub fn parse(raw: &str, positional: &[&str]) -> Self {
        let mut values = HashMap::new();
        let mut next_positional = positional.iter();

        for segment in raw.split(',') {
            let segment = segment.trim();
            if let Some(caps) = KEY_VALUE_PATTERN.captures(segment) {
                values.insert(caps[1].to_owned(), caps[2].to_owned());
            } else if let Some(key) = next_positional.next() {
                values.insert((*key).to_owned(), segment.to_owned());
            } else {
                tracing::trace!(segment, "Dropping parameter with no positional slot left");
            }
        }

        Self { values }
    }

    /// Value of `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}
