//! Inline CSS declaration parsing.
//!
//! Parses the contents of a `style` attribute (`color: red; font-size: 12px`)
//! into an ordered sequence of [`CssRule`]s.

/// A single `name: value` declaration.
///
/// Borrows from the style string it was parsed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CssRule<'a> {
    /// Property name, trimmed.
    pub name: &'a str,
    /// Property value, trimmed.
    pub value: &'a str,
}

/// Lazy iterator over the declarations of a style string.
///
/// Declarations are yielded in source order. Duplicates are kept; callers that
/// care about CSS precedence pick the last occurrence themselves. Declarations
/// without a colon or with an empty name are skipped.
///
/// # Example
///
/// ```
/// use wt_markup::css::{CssRule, parse_declarations};
///
/// let rules: Vec<_> = parse_declarations("color: red; font-size: 12px").collect();
/// assert_eq!(rules, vec![
///     CssRule { name: "color", value: "red" },
///     CssRule { name: "font-size", value: "12px" },
/// ]);
/// ```
#[derive(Clone, Debug)]
pub struct CssRules<'a> {
    declarations: std::str::Split<'a, char>,
}

/// Parse a style string into its declarations.
pub fn parse_declarations(style: &str) -> CssRules<'_> {
    CssRules {
        declarations: style.split(';'),
    }
}

impl<'a> Iterator for CssRules<'a> {
    type Item = CssRule<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.declarations.by_ref().find_map(|declaration| {
            let (name, value) = declaration.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(CssRule {
                name,
                value: value.trim(),
            })
        })
    }
}
