//! Phrase scanner driving pattern-based elements.
//!
//! Composes the patterns of all registered elements into one alternation,
//! `(p1)|(p2)|...`, and feeds every match to a fresh processor of the element
//! that matched. Text between matches is emitted as characters.

use regex::{Captures, Regex};

use crate::builder::DocumentBuilder;
use crate::error::ScanError;

use super::PatternBasedElement;

/// An element together with the index of its wrapping group in the combined pattern.
struct Registered {
    element: Box<dyn PatternBasedElement>,
    /// Group number of `(pattern)` in the combined regex; the element's own
    /// groups follow it directly.
    offset: usize,
}

/// Scans lines of text for pattern-based elements.
///
/// Elements are tried in registration order; at any position the first
/// element whose pattern matches wins.
///
/// # Example
///
/// ```
/// use wt_markup::element::{ImageElement, PhraseScanner};
/// use wt_markup::{DocumentEvent, RecordingBuilder};
///
/// let scanner = PhraseScanner::new(vec![Box::new(ImageElement)]).unwrap();
/// let mut builder = RecordingBuilder::new();
/// scanner.scan_line("See image:logo.png[] here", &mut builder);
///
/// let events = builder.finish().unwrap();
/// assert_eq!(events.first(), Some(&DocumentEvent::Characters("See ".to_owned())));
/// assert_eq!(events.last(), Some(&DocumentEvent::Characters(" here".to_owned())));
/// ```
pub struct PhraseScanner {
    elements: Vec<Registered>,
    combined: Option<Regex>,
}

impl PhraseScanner {
    /// Compose a scanner from elements in priority order.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if an element's pattern does not compile or
    /// declares a group count that differs from its pattern.
    pub fn new(elements: Vec<Box<dyn PatternBasedElement>>) -> Result<Self, ScanError> {
        let mut registered = Vec::with_capacity(elements.len());
        let mut alternatives = Vec::with_capacity(elements.len());
        let mut group_count = 0;

        for element in elements {
            let offset = group_count + 1;
            let pattern = element.pattern(offset);
            validate_group_count(element.as_ref(), &pattern)?;

            alternatives.push(format!("({pattern})"));
            group_count = offset + element.group_count();
            registered.push(Registered { element, offset });
        }

        let combined = if alternatives.is_empty() {
            None
        } else {
            Some(Regex::new(&alternatives.join("|"))?)
        };

        tracing::debug!(
            elements = registered.len(),
            groups = group_count,
            "Composed phrase scanner"
        );

        Ok(Self {
            elements: registered,
            combined,
        })
    }

    /// Names of the registered elements, in priority order.
    pub fn element_names(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|r| r.element.name())
    }

    /// Scan multi-line text, separating lines with `"\n"` characters.
    ///
    /// Line breaks are preserved as written, including a trailing one; a
    /// `\r` before a break is dropped.
    pub fn scan(&self, text: &str, builder: &mut dyn DocumentBuilder) {
        for (idx, line) in text.split('\n').enumerate() {
            if idx > 0 {
                builder.characters("\n");
            }
            self.scan_line(line.strip_suffix('\r').unwrap_or(line), builder);
        }
    }

    /// Scan a single line.
    pub fn scan_line(&self, line: &str, builder: &mut dyn DocumentBuilder) {
        let Some(combined) = &self.combined else {
            emit_text(line, builder);
            return;
        };

        let mut last_end = 0;
        for caps in combined.captures_iter(line) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            emit_text(&line[last_end..whole.start()], builder);
            self.dispatch(&caps, builder);
            last_end = whole.end();
        }
        emit_text(&line[last_end..], builder);
    }

    fn dispatch(&self, caps: &Captures<'_>, builder: &mut dyn DocumentBuilder) {
        let Some((registered, whole)) = self
            .elements
            .iter()
            .find_map(|r| caps.get(r.offset).map(|whole| (r, whole)))
        else {
            return;
        };

        tracing::trace!(
            element = registered.element.name(),
            start = whole.start(),
            end = whole.end(),
            "Matched element"
        );

        let mut processor = registered.element.new_processor();
        processor.set_line_offsets(whole.start(), whole.end());
        processor.set_group(0, whole.as_str(), whole.start(), whole.end());
        for index in 1..=registered.element.group_count() {
            if let Some(group) = caps.get(registered.offset + index) {
                processor.set_group(index, group.as_str(), group.start(), group.end());
            }
        }
        processor.emit(builder);
    }
}

fn emit_text(text: &str, builder: &mut dyn DocumentBuilder) {
    if !text.is_empty() {
        builder.characters(text);
    }
}

fn validate_group_count(element: &dyn PatternBasedElement, pattern: &str) -> Result<(), ScanError> {
    let regex = Regex::new(pattern).map_err(|source| ScanError::Pattern {
        name: element.name().to_owned(),
        source,
    })?;
    // captures_len includes the implicit whole-match group
    let actual = regex.captures_len() - 1;
    if actual != element.group_count() {
        return Err(ScanError::GroupCount {
            name: element.name().to_owned(),
            declared: element.group_count(),
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::builder::{Attributes, DocumentEvent, ImageAttributes, RecordingBuilder, SpanType};
    use crate::element::{CaptureStore, ImageElement, PatternBasedElementProcessor};

    /// `*text*` rendered as a strong span, recording its line offsets in the id.
    struct StrongElement;

    struct StrongProcessor {
        captures: CaptureStore,
    }

    impl PatternBasedElement for StrongElement {
        fn name(&self) -> &'static str {
            "strong"
        }

        fn pattern(&self, _group_offset: usize) -> String {
            r"\*(\w+)\*".to_owned()
        }

        fn group_count(&self) -> usize {
            1
        }

        fn new_processor(&self) -> Box<dyn PatternBasedElementProcessor> {
            Box::new(StrongProcessor {
                captures: CaptureStore::with_group_count(1),
            })
        }
    }

    impl PatternBasedElementProcessor for StrongProcessor {
        fn captures(&self) -> &CaptureStore {
            &self.captures
        }

        fn captures_mut(&mut self) -> &mut CaptureStore {
            &mut self.captures
        }

        fn emit(self: Box<Self>, builder: &mut dyn DocumentBuilder) {
            let id = format!("{}-{}", self.line_start_offset(), self.line_end_offset());
            builder.begin_span(SpanType::Strong, &Attributes::new().with_id(id));
            builder.characters(self.group(1).unwrap_or_default());
            builder.end_span();
        }
    }

    struct MiscountedElement;

    impl PatternBasedElement for MiscountedElement {
        fn name(&self) -> &'static str {
            "miscounted"
        }

        fn pattern(&self, _group_offset: usize) -> String {
            r"(a)(b)".to_owned()
        }

        fn group_count(&self) -> usize {
            1
        }

        fn new_processor(&self) -> Box<dyn PatternBasedElementProcessor> {
            Box::new(StrongProcessor {
                captures: CaptureStore::with_group_count(1),
            })
        }
    }

    fn scan(scanner: &PhraseScanner, text: &str) -> Vec<DocumentEvent> {
        let mut builder = RecordingBuilder::new();
        scanner.scan(text, &mut builder);
        builder.finish().unwrap()
    }

    fn chars(text: &str) -> DocumentEvent {
        DocumentEvent::Characters(text.to_owned())
    }

    #[test]
    fn test_plain_text_passes_through() {
        let scanner = PhraseScanner::new(vec![Box::new(ImageElement)]).unwrap();
        assert_eq!(scan(&scanner, "no markup here"), vec![chars("no markup here")]);
    }

    #[test]
    fn test_empty_scanner() {
        let scanner = PhraseScanner::new(Vec::new()).unwrap();
        assert_eq!(scanner.element_names().count(), 0);
        assert_eq!(scan(&scanner, "image:a.png[]"), vec![chars("image:a.png[]")]);
    }

    #[test]
    fn test_inline_image_in_text() {
        let scanner = PhraseScanner::new(vec![Box::new(ImageElement)]).unwrap();
        let events = scan(&scanner, "A image:sunset.jpg[] B");
        assert_eq!(
            events,
            vec![
                chars("A "),
                DocumentEvent::BeginSpan {
                    kind: SpanType::Span,
                    attributes: Attributes::new().with_css_class("image"),
                },
                DocumentEvent::Image {
                    attributes: ImageAttributes::new("sunset"),
                    src: "sunset.jpg".to_owned(),
                },
                DocumentEvent::EndSpan,
                chars(" B"),
            ]
        );
    }

    #[test]
    fn test_group_offsets_for_second_element() {
        let scanner =
            PhraseScanner::new(vec![Box::new(ImageElement), Box::new(StrongElement)]).unwrap();
        let events = scan(&scanner, "x *bold* image:a.png[]");

        assert_eq!(
            events[1],
            DocumentEvent::BeginSpan {
                kind: SpanType::Strong,
                attributes: Attributes::new().with_id("2-8"),
            }
        );
        assert_eq!(events[2], chars("bold"));
        assert_eq!(events[4], chars(" "));
        assert!(matches!(
            &events[6],
            DocumentEvent::Image { src, .. } if src == "a.png"
        ));
    }

    #[test]
    fn test_multiline_scan() {
        let scanner = PhraseScanner::new(vec![Box::new(StrongElement)]).unwrap();
        let events = scan(&scanner, "*a*\n*b*");
        assert_eq!(events.len(), 7);
        assert_eq!(events[3], chars("\n"));
        assert_eq!(
            events[4],
            DocumentEvent::BeginSpan {
                kind: SpanType::Strong,
                attributes: Attributes::new().with_id("0-3"),
            }
        );
    }

    #[test]
    fn test_trailing_newline_preserved() {
        let scanner = PhraseScanner::new(vec![Box::new(StrongElement)]).unwrap();
        assert_eq!(scan(&scanner, "a\n"), vec![chars("a"), chars("\n")]);
        assert_eq!(
            scan(&scanner, "a\r\n\nb"),
            vec![chars("a"), chars("\n"), chars("\n"), chars("b")]
        );
        assert_eq!(scan(&scanner, ""), Vec::new());
    }

    #[test]
    fn test_element_names() {
        let scanner =
            PhraseScanner::new(vec![Box::new(ImageElement), Box::new(StrongElement)]).unwrap();
        assert_eq!(scanner.element_names().collect::<Vec<_>>(), vec!["image", "strong"]);
    }

    #[test]
    fn test_group_count_mismatch_rejected() {
        let err = PhraseScanner::new(vec![Box::new(MiscountedElement)])
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ScanError::GroupCount {
                declared: 1,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        struct Broken;

        impl PatternBasedElement for Broken {
            fn name(&self) -> &'static str {
                "broken"
            }

            fn pattern(&self, _group_offset: usize) -> String {
                "(unclosed".to_owned()
            }

            fn group_count(&self) -> usize {
                1
            }

            fn new_processor(&self) -> Box<dyn PatternBasedElementProcessor> {
                unreachable!("never matched")
            }
        }

        let err = PhraseScanner::new(vec![Box::new(Broken)]).err().unwrap();
        assert!(matches!(err, ScanError::Pattern { ref name, .. } if name == "broken"));
    }

    static_assertions::assert_impl_all!(PhraseScanner: Send, Sync);
}
