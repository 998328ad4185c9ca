//! Rendering strategies.
//!
//! A rendering strategy intercepts the generic begin/end events of a block or
//! span and may re-express the element as a native construct of the output
//! format (for example a styled span as an HTML `<font>` element).
//!
//! # Architecture
//!
//! - [`ElementMatcher`] decides whether a strategy applies to an element.
//! - [`ElementStrategy`] performs the emission for one element instance.
//! - [`ElementStrategies`] is the lookup table of `(category, matcher, factory)`
//!   entries; the first matching entry wins.
//! - [`StrategyBuilder`] wraps any [`DocumentBuilder`] and routes events
//!   through the table.
//!
//! Strategies reach format-specific output only through
//! [`DocumentBuilder::native_authoring`]; against a sink without that
//! capability they fall back to generic events.
//!
//! # Example
//!
//! ```
//! use wt_markup::strategy::{ElementStrategies, StrategyBuilder};
//! use wt_markup::{Attributes, DocumentBuilder, HtmlDocumentBuilder, SpanType};
//!
//! let mut builder = StrategyBuilder::new(HtmlDocumentBuilder::new(), ElementStrategies::html());
//! builder.begin_span(SpanType::Span, &Attributes::new().with_css_style("color: red"));
//! builder.characters("alert");
//! builder.end_span();
//!
//! let html = builder.into_inner().finish().unwrap();
//! assert_eq!(html, r#"<font color="red">alert</font>"#);
//! ```

mod font;

pub use font::{FontElementMatcher, FontSpanStrategy};

use crate::builder::{
    Attributes, BlockType, DocumentBuilder, ImageAttributes, NativeAuthoring, SpanType,
};
use crate::error::ElementCategory;

/// An element about to be opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// A block element.
    Block(BlockType),
    /// An inline element.
    Span(SpanType),
}

impl ElementKind {
    /// Whether this is a block or a span.
    #[must_use]
    pub fn category(self) -> ElementCategory {
        match self {
            Self::Block(_) => ElementCategory::Block,
            Self::Span(_) => ElementCategory::Span,
        }
    }
}

/// Predicate selecting the elements a strategy applies to.
pub trait ElementMatcher: Send + Sync {
    /// Whether the strategy applies to `kind` with `attributes`.
    fn matches(&self, kind: ElementKind, attributes: &Attributes) -> bool;
}

/// Emission of one matched element.
///
/// A fresh instance is created for every matched element, so implementations
/// may keep per-element state between [`begin`](Self::begin) and
/// [`end`](Self::end).
pub trait ElementStrategy {
    /// Open the element.
    fn begin(
        &mut self,
        builder: &mut dyn DocumentBuilder,
        kind: ElementKind,
        attributes: &Attributes,
    );

    /// Close the element opened by [`begin`](Self::begin).
    fn end(&mut self, builder: &mut dyn DocumentBuilder);
}

/// Creates a strategy instance for a matched element.
pub type StrategyFactory = fn() -> Box<dyn ElementStrategy>;

struct StrategyEntry {
    category: ElementCategory,
    matcher: Box<dyn ElementMatcher>,
    factory: StrategyFactory,
}

/// Lookup table of rendering strategies.
#[derive(Default)]
pub struct ElementStrategies {
    entries: Vec<StrategyEntry>,
}

impl ElementStrategies {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the strategies for HTML output.
    #[must_use]
    pub fn html() -> Self {
        Self::new().with_span(FontElementMatcher, FontSpanStrategy::boxed)
    }

    /// Register a strategy for block elements.
    #[must_use]
    pub fn with_block<M: ElementMatcher + 'static>(
        mut self,
        matcher: M,
        factory: StrategyFactory,
    ) -> Self {
        self.register(ElementCategory::Block, Box::new(matcher), factory);
        self
    }

    /// Register a strategy for inline elements.
    #[must_use]
    pub fn with_span<M: ElementMatcher + 'static>(
        mut self,
        matcher: M,
        factory: StrategyFactory,
    ) -> Self {
        self.register(ElementCategory::Span, Box::new(matcher), factory);
        self
    }

    fn register(
        &mut self,
        category: ElementCategory,
        matcher: Box<dyn ElementMatcher>,
        factory: StrategyFactory,
    ) {
        self.entries.push(StrategyEntry {
            category,
            matcher,
            factory,
        });
    }

    /// Create the strategy for an element, if any entry matches.
    #[must_use]
    pub fn strategy_for(
        &self,
        kind: ElementKind,
        attributes: &Attributes,
    ) -> Option<Box<dyn ElementStrategy>> {
        self.entries
            .iter()
            .find(|entry| {
                entry.category == kind.category() && entry.matcher.matches(kind, attributes)
            })
            .map(|entry| (entry.factory)())
    }
}

/// A [`DocumentBuilder`] that routes block and span events through a strategy table.
///
/// Every open element remembers the strategy that opened it (if any), so the
/// matching end event is delivered to the same strategy instance.
pub struct StrategyBuilder<B> {
    inner: B,
    strategies: ElementStrategies,
    open: Vec<(ElementCategory, Option<Box<dyn ElementStrategy>>)>,
}

impl<B: DocumentBuilder> StrategyBuilder<B> {
    /// Wrap `inner` with the given strategies.
    #[must_use]
    pub fn new(inner: B, strategies: ElementStrategies) -> Self {
        Self {
            inner,
            strategies,
            open: Vec::new(),
        }
    }

    /// The wrapped sink.
    #[must_use]
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Unwrap the sink.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.inner
    }

    fn begin(&mut self, kind: ElementKind, attributes: &Attributes) {
        let strategy = self
            .strategies
            .strategy_for(kind, attributes)
            .map(|mut strategy| {
                strategy.begin(&mut self.inner, kind, attributes);
                strategy
            });
        if strategy.is_none() {
            match kind {
                ElementKind::Block(block) => self.inner.begin_block(block, attributes),
                ElementKind::Span(span) => self.inner.begin_span(span, attributes),
            }
        }
        self.open.push((kind.category(), strategy));
    }

    fn end(&mut self, category: ElementCategory) {
        // A mismatched end is passed through untouched so the sink reports it.
        let owns_top = self.open.last().is_some_and(|(open, _)| *open == category);
        let strategy = if owns_top {
            self.open.pop().and_then(|(_, strategy)| strategy)
        } else {
            None
        };
        match (strategy, category) {
            (Some(mut strategy), _) => strategy.end(&mut self.inner),
            (None, ElementCategory::Block) => self.inner.end_block(),
            (None, _) => self.inner.end_span(),
        }
    }
}

impl<B: DocumentBuilder> DocumentBuilder for StrategyBuilder<B> {
    fn begin_block(&mut self, kind: BlockType, attributes: &Attributes) {
        self.begin(ElementKind::Block(kind), attributes);
    }

    fn end_block(&mut self) {
        self.end(ElementCategory::Block);
    }

    fn begin_span(&mut self, kind: SpanType, attributes: &Attributes) {
        self.begin(ElementKind::Span(kind), attributes);
    }

    fn end_span(&mut self) {
        self.end(ElementCategory::Span);
    }

    fn characters(&mut self, text: &str) {
        self.inner.characters(text);
    }

    fn image(&mut self, attributes: &ImageAttributes, src: &str) {
        self.inner.image(attributes, src);
    }

    fn image_link(
        &mut self,
        link_attributes: &Attributes,
        image_attributes: &ImageAttributes,
        href: &str,
        src: &str,
    ) {
        self.inner.image_link(link_attributes, image_attributes, href, src);
    }

    fn native_authoring(&mut self) -> Option<&mut dyn NativeAuthoring> {
        self.inner.native_authoring()
    }
}
