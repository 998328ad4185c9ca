//! HTML event sink.
//!
//! Serializes structural events to an HTML fragment and exposes
//! [`NativeAuthoring`] so rendering strategies can write HTML elements that
//! have no generic event counterpart.

use std::fmt::Write;

use crate::builder::{
    Attributes, BlockType, DocumentBuilder, ImageAttributes, NativeAuthoring, SpanType,
};
use crate::error::{ElementCategory, NestingError};

/// Escape text for use in HTML content and double-quoted attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn block_tag(kind: BlockType) -> &'static str {
    match kind {
        BlockType::Div => "div",
        BlockType::Paragraph => "p",
        BlockType::Quote => "blockquote",
        BlockType::Preformatted => "pre",
    }
}

fn span_tag(kind: SpanType) -> &'static str {
    match kind {
        SpanType::Span => "span",
        SpanType::Emphasis => "em",
        SpanType::Strong => "strong",
        SpanType::Code => "code",
    }
}

/// HTML document builder.
///
/// Produces an HTML fragment (no `<html>`/`<body>` wrapper). Void elements are
/// written in XML form (`<img ... />`) unless disabled with
/// [`with_xhtml`](Self::with_xhtml).
///
/// # Example
///
/// ```
/// use wt_markup::{Attributes, DocumentBuilder, HtmlDocumentBuilder, ImageAttributes, SpanType};
///
/// let mut builder = HtmlDocumentBuilder::new();
/// builder.begin_span(SpanType::Span, &Attributes::new().with_css_class("image"));
/// builder.image(&ImageAttributes::new("sunset"), "sunset.jpg");
/// builder.end_span();
///
/// assert_eq!(
///     builder.finish().unwrap(),
///     r#"<span class="image"><img src="sunset.jpg" alt="sunset"/></span>"#
/// );
/// ```
#[derive(Debug)]
pub struct HtmlDocumentBuilder {
    out: String,
    xhtml: bool,
    open: Vec<(ElementCategory, String)>,
    violation: Option<NestingError>,
}

impl Default for HtmlDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlDocumentBuilder {
    /// Create a builder writing XML-style void elements.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(1024),
            xhtml: true,
            open: Vec::new(),
            violation: None,
        }
    }

    /// Choose between `<img ... />` (true) and `<img ...>` (false).
    #[must_use]
    pub fn with_xhtml(mut self, xhtml: bool) -> Self {
        self.xhtml = xhtml;
        self
    }

    /// HTML written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Finish the document, returning the HTML if nesting was balanced.
    pub fn finish(self) -> Result<String, NestingError> {
        if let Some(violation) = self.violation {
            return Err(violation);
        }
        if !self.open.is_empty() {
            return Err(NestingError::Unclosed {
                count: self.open.len(),
            });
        }
        Ok(self.out)
    }

    fn start_tag<'a, 'b>(
        &mut self,
        name: &str,
        attributes: impl IntoIterator<Item = (&'a str, &'b str)>,
    ) {
        self.out.push('<');
        self.out.push_str(name);
        self.write_attributes(attributes);
        self.out.push('>');
    }

    fn write_attributes<'a, 'b>(
        &mut self,
        attributes: impl IntoIterator<Item = (&'a str, &'b str)>,
    ) {
        for (name, value) in attributes {
            write!(self.out, r#" {name}="{}""#, escape_html(value)).unwrap();
        }
    }

    fn open_element(&mut self, category: ElementCategory, tag: &str, attributes: &Attributes) {
        self.start_tag(tag, attributes.pairs());
        self.open.push((category, tag.to_owned()));
    }

    fn close(&mut self, found: ElementCategory) {
        match self.open.last().map(|(category, _)| *category) {
            Some(expected) if expected == found => {
                if let Some((_, tag)) = self.open.pop() {
                    write!(self.out, "</{tag}>").unwrap();
                }
            }
            Some(expected) => self.record_violation(NestingError::Mismatched { expected, found }),
            None => self.record_violation(NestingError::Unopened { found }),
        }
    }

    fn record_violation(&mut self, violation: NestingError) {
        tracing::warn!(%violation, "Unbalanced document events");
        self.violation.get_or_insert(violation);
    }

    fn write_image(&mut self, attributes: &ImageAttributes, src: &str) {
        let width = attributes.width.map(|w| w.to_string());
        let height = attributes.height.map(|h| h.to_string());
        let image_pairs = [
            ("src", Some(src)),
            ("alt", Some(attributes.alt.as_str())),
            ("width", width.as_deref()),
            ("height", height.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)));

        self.out.push_str("<img");
        self.write_attributes(image_pairs.chain(attributes.attributes.pairs()));
        self.out.push_str(if self.xhtml { "/>" } else { ">" });
    }
}

impl DocumentBuilder for HtmlDocumentBuilder {
    fn begin_block(&mut self, kind: BlockType, attributes: &Attributes) {
        self.open_element(ElementCategory::Block, block_tag(kind), attributes);
    }

    fn end_block(&mut self) {
        self.close(ElementCategory::Block);
    }

    fn begin_span(&mut self, kind: SpanType, attributes: &Attributes) {
        self.open_element(ElementCategory::Span, span_tag(kind), attributes);
    }

    fn end_span(&mut self) {
        self.close(ElementCategory::Span);
    }

    fn characters(&mut self, text: &str) {
        self.out.push_str(&escape_html(text));
    }

    fn image(&mut self, attributes: &ImageAttributes, src: &str) {
        self.write_image(attributes, src);
    }

    fn image_link(
        &mut self,
        link_attributes: &Attributes,
        image_attributes: &ImageAttributes,
        href: &str,
        src: &str,
    ) {
        self.start_tag("a", std::iter::once(("href", href)).chain(link_attributes.pairs()));
        self.write_image(image_attributes, src);
        self.out.push_str("</a>");
    }

    fn native_authoring(&mut self) -> Option<&mut dyn NativeAuthoring> {
        Some(self)
    }
}

impl NativeAuthoring for HtmlDocumentBuilder {
    fn start_element(&mut self, name: &str, attributes: &[(&str, &str)]) {
        self.start_tag(name, attributes.iter().copied());
        self.open.push((ElementCategory::Native, name.to_owned()));
    }

    fn end_element(&mut self) {
        self.close(ElementCategory::Native);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"a < b & "c" > d"#),
            "a &lt; b &amp; &quot;c&quot; &gt; d"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_nested_blocks() {
        let mut builder = HtmlDocumentBuilder::new();
        builder.begin_block(BlockType::Div, &Attributes::new().with_css_class("outer"));
        builder.begin_block(BlockType::Paragraph, &Attributes::new());
        builder.characters("a < b");
        assert_eq!(builder.as_str(), r#"<div class="outer"><p>a &lt; b"#);
        builder.end_block();
        builder.end_block();

        assert_eq!(
            builder.finish().unwrap(),
            r#"<div class="outer"><p>a &lt; b</p></div>"#
        );
    }

    #[test]
    fn test_span_tags() {
        let mut builder = HtmlDocumentBuilder::new();
        for kind in [SpanType::Emphasis, SpanType::Strong, SpanType::Code] {
            builder.begin_span(kind, &Attributes::new());
            builder.end_span();
        }
        assert_eq!(
            builder.finish().unwrap(),
            "<em></em><strong></strong><code></code>"
        );
    }

    #[test]
    fn test_image_with_dimensions() {
        let mut builder = HtmlDocumentBuilder::new().with_xhtml(false);
        let attributes = ImageAttributes {
            width: Some(100),
            height: Some(200),
            ..ImageAttributes::new("Sky \"line\"")
        };
        builder.image(&attributes, "a/b.jpg");

        assert_eq!(
            builder.finish().unwrap(),
            r#"<img src="a/b.jpg" alt="Sky &quot;line&quot;" width="100" height="200">"#
        );
    }

    #[test]
    fn test_image_link() {
        let mut builder = HtmlDocumentBuilder::new();
        builder.image_link(
            &Attributes::new().with_css_class("image"),
            &ImageAttributes::new("Logo"),
            "https://example.com/?a=1&b=2",
            "logo.png",
        );

        assert_eq!(
            builder.finish().unwrap(),
            r#"<a href="https://example.com/?a=1&amp;b=2" class="image"><img src="logo.png" alt="Logo"/></a>"#
        );
    }

    #[test]
    fn test_native_element() {
        let mut builder = HtmlDocumentBuilder::new();
        let native = builder.native_authoring().unwrap();
        native.start_element("font", &[("color", "red")]);
        native.end_element();

        assert_eq!(builder.finish().unwrap(), r#"<font color="red"></font>"#);
    }

    #[test]
    fn test_mismatched_close_reported() {
        let mut builder = HtmlDocumentBuilder::new();
        builder.begin_span(SpanType::Span, &Attributes::new());
        builder.end_block();
        builder.end_span();

        assert_eq!(
            builder.finish(),
            Err(NestingError::Mismatched {
                expected: ElementCategory::Span,
                found: ElementCategory::Block,
            })
        );
    }

    #[test]
    fn test_unclosed_reported() {
        let mut builder = HtmlDocumentBuilder::new();
        builder.begin_block(BlockType::Quote, &Attributes::new());

        assert_eq!(builder.finish(), Err(NestingError::Unclosed { count: 1 }));
    }

    #[test]
    fn test_unopened_reported() {
        let mut builder = HtmlDocumentBuilder::new();
        builder.native_authoring().unwrap().end_element();

        assert_eq!(
            builder.finish(),
            Err(NestingError::Unopened {
                found: ElementCategory::Native,
            })
        );
    }
}
