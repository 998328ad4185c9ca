//! Native `<font>` rendering of styled spans.

use std::collections::BTreeMap;

use crate::builder::{Attributes, DocumentBuilder, SpanType};
use crate::css::parse_declarations;

use super::{ElementKind, ElementMatcher, ElementStrategy};

/// Map a CSS property to the matching `<font>` attribute.
fn font_attribute(property: &str) -> Option<&'static str> {
    match property {
        "color" => Some("color"),
        "font-size" => Some("size"),
        "font-family" => Some("face"),
        _ => None,
    }
}

/// Matches generic spans whose style sets a color, font size or font family.
#[derive(Debug, Default)]
pub struct FontElementMatcher;

impl ElementMatcher for FontElementMatcher {
    fn matches(&self, kind: ElementKind, attributes: &Attributes) -> bool {
        kind == ElementKind::Span(SpanType::Span)
            && attributes.css_style.as_deref().is_some_and(|style| {
                parse_declarations(style).any(|rule| font_attribute(rule.name).is_some())
            })
    }
}

/// Emits a styled span as a native `<font>` element.
///
/// Only the recognized properties are carried over, as `color`, `size` and
/// `face` attributes in name order; the generic span is suppressed. When the
/// sink cannot author native elements, or no property is recognized, the span
/// is emitted generically instead.
#[derive(Debug, Default)]
pub struct FontSpanStrategy {
    element_opened: bool,
}

impl FontSpanStrategy {
    /// Factory for [`ElementStrategies`](super::ElementStrategies) registration.
    pub fn boxed() -> Box<dyn ElementStrategy> {
        Box::new(Self::default())
    }
}

impl ElementStrategy for FontSpanStrategy {
    fn begin(
        &mut self,
        builder: &mut dyn DocumentBuilder,
        kind: ElementKind,
        attributes: &Attributes,
    ) {
        let mut font_attributes = BTreeMap::new();
        if let Some(style) = attributes.css_style.as_deref() {
            for rule in parse_declarations(style) {
                if let Some(name) = font_attribute(rule.name) {
                    font_attributes.insert(name, rule.value);
                }
            }
        }

        if !font_attributes.is_empty()
            && let Some(native) = builder.native_authoring()
        {
            let pairs: Vec<(&str, &str)> = font_attributes.into_iter().collect();
            native.start_element("font", &pairs);
            self.element_opened = true;
            return;
        }

        let span = match kind {
            ElementKind::Span(span) => span,
            ElementKind::Block(_) => SpanType::Span,
        };
        builder.begin_span(span, attributes);
    }

    fn end(&mut self, builder: &mut dyn DocumentBuilder) {
        if !self.element_opened {
            builder.end_span();
        } else if let Some(native) = builder.native_authoring() {
            native.end_element();
        }
    }
}
