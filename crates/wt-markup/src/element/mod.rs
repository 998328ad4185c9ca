//! Pattern-based markup elements.
//!
//! An element recognizes one markup construct with a regular-expression
//! fragment. For every match the scanner asks the element for a fresh
//! processor, fills the processor's capture store, and lets it emit
//! structural events.
//!
//! # Lifecycle
//!
//! 1. [`PatternBasedElement::new_processor`] creates a processor for one match.
//! 2. The scanner calls [`set_group`](PatternBasedElementProcessor::set_group)
//!    for group 0 and every participating group.
//! 3. [`emit`](PatternBasedElementProcessor::emit) consumes the processor.
//!
//! Because `emit` takes `self: Box<Self>`, a processor cannot be reused for a
//! second match.
//!
//! # Example
//!
//! ```
//! use wt_markup::element::{
//!     CaptureStore, PatternBasedElement, PatternBasedElementProcessor,
//! };
//! use wt_markup::{Attributes, DocumentBuilder, RecordingBuilder, SpanType};
//!
//! struct KbdElement;
//!
//! impl PatternBasedElement for KbdElement {
//!     fn name(&self) -> &str { "kbd" }
//!     fn pattern(&self, _group_offset: usize) -> String { r"kbd:\[(.*?)\]".to_owned() }
//!     fn group_count(&self) -> usize { 1 }
//!     fn new_processor(&self) -> Box<dyn PatternBasedElementProcessor> {
//!         Box::new(KbdProcessor { captures: CaptureStore::with_group_count(1) })
//!     }
//! }
//!
//! struct KbdProcessor { captures: CaptureStore }
//!
//! impl PatternBasedElementProcessor for KbdProcessor {
//!     fn captures(&self) -> &CaptureStore { &self.captures }
//!     fn captures_mut(&mut self) -> &mut CaptureStore { &mut self.captures }
//!     fn emit(self: Box<Self>, builder: &mut dyn DocumentBuilder) {
//!         builder.begin_span(SpanType::Code, &Attributes::new());
//!         builder.characters(self.group(1).unwrap_or_default());
//!         builder.end_span();
//!     }
//! }
//!
//! let mut processor = KbdElement.new_processor();
//! processor.set_group(0, "kbd:[Ctrl]", 0, 10);
//! processor.set_group(1, "Ctrl", 5, 9);
//!
//! let mut builder = RecordingBuilder::new();
//! processor.emit(&mut builder);
//! assert_eq!(builder.finish().unwrap().len(), 3);
//! ```

mod formatting;
mod group;
mod image;
mod scanner;

pub use formatting::FormattingProperties;
pub use group::{CaptureStore, Group};
pub use image::ImageElement;
pub use scanner::PhraseScanner;

use crate::builder::DocumentBuilder;

/// A markup construct recognized by a regular expression.
///
/// Implementations are stateless; all per-match state lives in the processors
/// they create.
pub trait PatternBasedElement: Send + Sync {
    /// Element name, used in configuration and diagnostics.
    fn name(&self) -> &str;

    /// Regular-expression fragment recognizing the element.
    ///
    /// `group_offset` is the number of capturing groups that precede this
    /// fragment's first group in the combined pattern, for fragments that
    /// need to refer to their own groups by absolute number.
    fn pattern(&self, group_offset: usize) -> String;

    /// Number of capturing groups the fragment introduces.
    fn group_count(&self) -> usize;

    /// Create a processor for a single match.
    fn new_processor(&self) -> Box<dyn PatternBasedElementProcessor>;
}

/// Translates one match of a [`PatternBasedElement`] into structural events.
pub trait PatternBasedElementProcessor {
    /// Captured groups of this processor's match.
    fn captures(&self) -> &CaptureStore;

    /// Mutable access to the captured groups.
    fn captures_mut(&mut self) -> &mut CaptureStore;

    /// Emit the content of the element, consuming the processor.
    fn emit(self: Box<Self>, builder: &mut dyn DocumentBuilder);

    /// Set the captured text and offsets of group `index` (0 is the whole match).
    fn set_group(&mut self, index: usize, text: &str, start: usize, end: usize) {
        self.captures_mut().set(index, Group::new(text, start, end));
    }

    /// Captured text of group `index`, or `None` if it did not participate.
    fn group(&self, index: usize) -> Option<&str> {
        self.captures().text(index)
    }

    /// Start offset of group `index`, or `None` if it did not participate.
    fn start(&self, index: usize) -> Option<usize> {
        self.captures().start(index)
    }

    /// End offset of group `index`, or `None` if it did not participate.
    fn end(&self, index: usize) -> Option<usize> {
        self.captures().end(index)
    }

    /// Record the offsets of the whole match within its line.
    fn set_line_offsets(&mut self, start: usize, end: usize) {
        self.captures_mut().set_line_offsets(start, end);
    }

    /// Offset within the line at which the match started.
    fn line_start_offset(&self) -> usize {
        self.captures().line_start_offset()
    }

    /// Offset within the line at which the match ended.
    fn line_end_offset(&self) -> usize {
        self.captures().line_end_offset()
    }
}
