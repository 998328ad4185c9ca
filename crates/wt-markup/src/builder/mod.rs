//! Structural event sink contract.
//!
//! Processors never write output directly. They call the methods of a
//! [`DocumentBuilder`], which turns the event stream into a concrete format.
//!
//! # Nesting
//!
//! `begin_block`/`end_block` and `begin_span`/`end_span` must be called in
//! strict LIFO order. Sinks report violations as [`NestingError`](crate::NestingError)
//! when the document is finished.
//!
//! # Native Authoring
//!
//! A sink may expose [`NativeAuthoring`] through
//! [`DocumentBuilder::native_authoring`]. Rendering strategies use it to write
//! format-specific elements directly; sinks that return `None` only ever
//! receive generic events.

mod attributes;
mod recording;

pub use attributes::{Attributes, ImageAttributes};
pub use recording::{DocumentEvent, RecordingBuilder};

/// Kind of a block-level element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BlockType {
    /// Generic division.
    Div,
    /// Paragraph.
    Paragraph,
    /// Quotation.
    Quote,
    /// Preformatted text.
    Preformatted,
}

/// Kind of an inline element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SpanType {
    /// Generic inline container.
    Span,
    /// Emphasized text.
    Emphasis,
    /// Strongly emphasized text.
    Strong,
    /// Inline code.
    Code,
}

/// Receiver of structural document events.
///
/// # Example
///
/// ```
/// use wt_markup::{Attributes, BlockType, DocumentBuilder, DocumentEvent, RecordingBuilder};
///
/// let mut builder = RecordingBuilder::new();
/// builder.begin_block(BlockType::Div, &Attributes::new().with_css_class("note"));
/// builder.characters("hello");
/// builder.end_block();
///
/// let events = builder.finish().unwrap();
/// assert_eq!(events.len(), 3);
/// assert_eq!(events[1], DocumentEvent::Characters("hello".to_owned()));
/// ```
pub trait DocumentBuilder {
    /// Open a block element.
    fn begin_block(&mut self, kind: BlockType, attributes: &Attributes);

    /// Close the innermost block element.
    fn end_block(&mut self);

    /// Open an inline element.
    fn begin_span(&mut self, kind: SpanType, attributes: &Attributes);

    /// Close the innermost inline element.
    fn end_span(&mut self);

    /// Emit literal text. Escaping is the sink's responsibility.
    fn characters(&mut self, text: &str);

    /// Emit an image.
    fn image(&mut self, attributes: &ImageAttributes, src: &str);

    /// Emit an image wrapped in a hyperlink to `href`.
    fn image_link(
        &mut self,
        link_attributes: &Attributes,
        image_attributes: &ImageAttributes,
        href: &str,
        src: &str,
    );

    /// Native element authoring capability, if this sink has one.
    fn native_authoring(&mut self) -> Option<&mut dyn NativeAuthoring> {
        None
    }
}

/// Direct authoring of format-specific elements.
///
/// Elements opened here nest with blocks and spans like any other element.
pub trait NativeAuthoring {
    /// Open a native element with the given attributes, in order.
    fn start_element(&mut self, name: &str, attributes: &[(&str, &str)]);

    /// Close the innermost native element.
    fn end_element(&mut self);
}
