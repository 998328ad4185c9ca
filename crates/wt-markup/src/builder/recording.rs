//! Event sink that records every call and validates nesting.

use crate::error::{ElementCategory, NestingError};

use super::{Attributes, BlockType, DocumentBuilder, ImageAttributes, SpanType};

/// A recorded structural event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DocumentEvent {
    /// `begin_block`
    BeginBlock {
        kind: BlockType,
        attributes: Attributes,
    },
    /// `end_block`
    EndBlock,
    /// `begin_span`
    BeginSpan {
        kind: SpanType,
        attributes: Attributes,
    },
    /// `end_span`
    EndSpan,
    /// `characters`
    Characters(String),
    /// `image`
    Image {
        attributes: ImageAttributes,
        src: String,
    },
    /// `image_link`
    ImageLink {
        link_attributes: Attributes,
        image_attributes: ImageAttributes,
        href: String,
        src: String,
    },
}

/// Records structural events in order.
///
/// Has no native authoring capability, so rendering strategies always fall
/// back to generic events when wrapping it. The first nesting violation is
/// kept and reported by [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct RecordingBuilder {
    events: Vec<DocumentEvent>,
    open: Vec<ElementCategory>,
    violation: Option<NestingError>,
}

impl RecordingBuilder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[DocumentEvent] {
        &self.events
    }

    /// Number of elements currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Finish recording, returning the events if nesting was balanced.
    pub fn finish(self) -> Result<Vec<DocumentEvent>, NestingError> {
        if let Some(violation) = self.violation {
            return Err(violation);
        }
        if !self.open.is_empty() {
            return Err(NestingError::Unclosed {
                count: self.open.len(),
            });
        }
        Ok(self.events)
    }

    fn close(&mut self, found: ElementCategory) {
        match self.open.last().copied() {
            Some(expected) if expected == found => {
                self.open.pop();
            }
            Some(expected) => self.record_violation(NestingError::Mismatched { expected, found }),
            None => self.record_violation(NestingError::Unopened { found }),
        }
    }

    fn record_violation(&mut self, violation: NestingError) {
        tracing::warn!(%violation, "Unbalanced document events");
        self.violation.get_or_insert(violation);
    }
}

impl DocumentBuilder for RecordingBuilder {
    fn begin_block(&mut self, kind: BlockType, attributes: &Attributes) {
        self.open.push(ElementCategory::Block);
        self.events.push(DocumentEvent::BeginBlock {
            kind,
            attributes: attributes.clone(),
        });
    }

    fn end_block(&mut self) {
        self.close(ElementCategory::Block);
        self.events.push(DocumentEvent::EndBlock);
    }

    fn begin_span(&mut self, kind: SpanType, attributes: &Attributes) {
        self.open.push(ElementCategory::Span);
        self.events.push(DocumentEvent::BeginSpan {
            kind,
            attributes: attributes.clone(),
        });
    }

    fn end_span(&mut self) {
        self.close(ElementCategory::Span);
        self.events.push(DocumentEvent::EndSpan);
    }

    fn characters(&mut self, text: &str) {
        self.events.push(DocumentEvent::Characters(text.to_owned()));
    }

    fn image(&mut self, attributes: &ImageAttributes, src: &str) {
        self.events.push(DocumentEvent::Image {
            attributes: attributes.clone(),
            src: src.to_owned(),
        });
    }

    fn image_link(
        &mut self,
        link_attributes: &Attributes,
        image_attributes: &ImageAttributes,
        href: &str,
        src: &str,
    ) {
        self.events.push(DocumentEvent::ImageLink {
            link_attributes: link_attributes.clone(),
            image_attributes: image_attributes.clone(),
            href: href.to_owned(),
            src: src.to_owned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_sequence() {
        let mut builder = RecordingBuilder::new();
        builder.begin_block(BlockType::Div, &Attributes::new());
        builder.begin_span(SpanType::Span, &Attributes::new());
        assert_eq!(builder.depth(), 2);
        assert_eq!(builder.events().len(), 2);
        builder.end_span();
        builder.end_block();

        let events = builder.finish().unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[3], DocumentEvent::EndBlock);
    }

    #[test]
    fn test_mismatched_end() {
        let mut builder = RecordingBuilder::new();
        builder.begin_block(BlockType::Div, &Attributes::new());
        builder.end_span();

        assert_eq!(
            builder.finish(),
            Err(NestingError::Mismatched {
                expected: ElementCategory::Block,
                found: ElementCategory::Span,
            })
        );
    }

    #[test]
    fn test_unopened_end() {
        let mut builder = RecordingBuilder::new();
        builder.end_block();

        assert_eq!(
            builder.finish(),
            Err(NestingError::Unopened {
                found: ElementCategory::Block,
            })
        );
    }

    #[test]
    fn test_unclosed_elements() {
        let mut builder = RecordingBuilder::new();
        builder.begin_span(SpanType::Strong, &Attributes::new());

        assert_eq!(builder.finish(), Err(NestingError::Unclosed { count: 1 }));
    }

    #[test]
    fn test_first_violation_wins() {
        let mut builder = RecordingBuilder::new();
        builder.end_span();
        builder.end_block();

        assert_eq!(
            builder.finish(),
            Err(NestingError::Unopened {
                found: ElementCategory::Span,
            })
        );
    }

    #[test]
    fn test_no_native_authoring() {
        let mut builder = RecordingBuilder::new();
        assert!(builder.native_authoring().is_none());
    }
}
