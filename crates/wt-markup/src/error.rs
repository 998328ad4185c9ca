//! Error types for scanning, event nesting, and rendering.

use std::fmt;

/// Category of an open element, used to report nesting violations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ElementCategory {
    /// Opened by `begin_block`.
    Block,
    /// Opened by `begin_span`.
    Span,
    /// Opened through [`NativeAuthoring`](crate::NativeAuthoring).
    Native,
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Block => "block",
            Self::Span => "span",
            Self::Native => "native element",
        })
    }
}

/// Unbalanced begin/end sequence detected by an event sink.
///
/// Processors must emit begin/end pairs in strict LIFO order. A sink that sees
/// anything else reports it here instead of producing malformed output.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NestingError {
    /// An end event arrived with nothing open.
    #[error("end of {found} with no open element")]
    Unopened {
        /// Category of the end event.
        found: ElementCategory,
    },
    /// An end event does not match the innermost open element.
    #[error("end of {found} while a {expected} is open")]
    Mismatched {
        /// Category of the innermost open element.
        expected: ElementCategory,
        /// Category of the end event.
        found: ElementCategory,
    },
    /// The document finished with elements still open.
    #[error("{count} element(s) left open at end of document")]
    Unclosed {
        /// Number of open elements.
        count: usize,
    },
}

/// Failure to compose element patterns into a scanner.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// An element pattern is not a valid regular expression.
    #[error("invalid pattern for element {name}: {source}")]
    Pattern {
        /// Element name.
        name: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
    /// An element's declared group count disagrees with its pattern.
    #[error("element {name} declares {declared} group(s) but its pattern has {actual}")]
    GroupCount {
        /// Element name.
        name: String,
        /// Value of `group_count()`.
        declared: usize,
        /// Capturing groups found in the pattern.
        actual: usize,
    },
    /// The combined pattern could not be compiled.
    #[error("invalid combined pattern: {0}")]
    Combined(#[from] regex::Error),
}

/// Rendering error.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Configuration names a directive this engine does not provide.
    #[error("unknown directive: {0}")]
    UnknownDirective(String),
    /// Scanner construction failed.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// A processor emitted an unbalanced event sequence.
    #[error("unbalanced document events: {0}")]
    Nesting(#[from] NestingError),
}
