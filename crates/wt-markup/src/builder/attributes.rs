//! Presentational attributes attached to structural events.

/// Generic presentational attributes for blocks, spans and links.
///
/// Every property is optional; an unset property is absent from output rather
/// than rendered as an empty value.
///
/// # Example
///
/// ```
/// use wt_markup::Attributes;
///
/// let attrs = Attributes::new().with_css_class("imageblock");
/// assert_eq!(attrs.css_class.as_deref(), Some("imageblock"));
/// assert!(attrs.css_style.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attributes {
    /// Element identifier.
    pub id: Option<String>,
    /// CSS class list, space separated.
    pub css_class: Option<String>,
    /// Inline CSS declarations.
    pub css_style: Option<String>,
    /// Content language.
    pub language: Option<String>,
    /// Advisory title.
    pub title: Option<String>,
}

impl Attributes {
    /// Create empty attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the CSS class.
    #[must_use]
    pub fn with_css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Set the inline CSS style.
    #[must_use]
    pub fn with_css_style(mut self, style: impl Into<String>) -> Self {
        self.css_style = Some(style.into());
        self
    }

    /// Set the content language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the advisory title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attribute name/value pairs in output order, skipping unset properties.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("id", self.id.as_deref()),
            ("class", self.css_class.as_deref()),
            ("style", self.css_style.as_deref()),
            ("lang", self.language.as_deref()),
            ("title", self.title.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}

/// Attributes of an image event.
///
/// `alt` is always populated by the time an image is emitted; image directives
/// derive it from the source reference when the markup omits it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImageAttributes {
    /// Generic presentational attributes.
    pub attributes: Attributes,
    /// Alternative text.
    pub alt: String,
    /// Width in pixels.
    pub width: Option<i32>,
    /// Height in pixels.
    pub height: Option<i32>,
}

impl ImageAttributes {
    /// Create image attributes with the given alternative text.
    #[must_use]
    pub fn new(alt: impl Into<String>) -> Self {
        Self {
            alt: alt.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let attrs = Attributes::new();
        assert_eq!(attrs.pairs().count(), 0);
    }

    #[test]
    fn test_pairs_order_skips_unset() {
        let attrs = Attributes::new()
            .with_title("Caption")
            .with_css_class("image")
            .with_id("fig-1");
        let pairs: Vec<_> = attrs.pairs().collect();
        assert_eq!(
            pairs,
            vec![("id", "fig-1"), ("class", "image"), ("title", "Caption")]
        );
    }

    #[test]
    fn test_empty_string_is_still_set() {
        let attrs = Attributes::new().with_language("");
        assert_eq!(attrs.pairs().collect::<Vec<_>>(), vec![("lang", "")]);
    }

    #[test]
    fn test_image_attributes_new() {
        let attrs = ImageAttributes::new("sunset");
        assert_eq!(attrs.alt, "sunset");
        assert_eq!(attrs.width, None);
        assert_eq!(attrs.height, None);
        assert_eq!(attrs.attributes, Attributes::default());
    }
}
