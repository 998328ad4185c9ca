//! Pattern-based markup recognition emitting structural document events.
//!
//! This crate recognizes inline markup directives such as `image:SRC[PARAMS]`
//! with regular expressions and translates every match into a strictly nested
//! sequence of structural events on a [`DocumentBuilder`].
//!
//! # Architecture
//!
//! - [`element`]: pattern-based elements, their per-match processors, and the
//!   [`PhraseScanner`](element::PhraseScanner) that drives them
//! - [`strategy`]: rendering strategies that may re-express generic events as
//!   native constructs of the output format
//! - [`css`]: inline style declaration parsing
//! - [`HtmlDocumentBuilder`] and [`RecordingBuilder`]: event sinks
//!
//! [`MarkupRenderer`] wires these together from a [`wt_config::Config`].
//!
//! # Example
//!
//! ```
//! use wt_markup::MarkupRenderer;
//!
//! let renderer = MarkupRenderer::new().unwrap();
//! let html = renderer.render("Logo: image:img/logo.png[]").unwrap();
//!
//! assert_eq!(
//!     html,
//!     r#"Logo: <span class="image"><img src="img/logo.png" alt="logo"/></span>"#
//! );
//! ```

mod builder;
pub mod css;
pub mod element;
mod error;
mod html;
mod renderer;
pub mod strategy;

pub use builder::{
    Attributes, BlockType, DocumentBuilder, DocumentEvent, ImageAttributes, NativeAuthoring,
    RecordingBuilder, SpanType,
};
pub use error::{ElementCategory, NestingError, RenderError, ScanError};
pub use html::{HtmlDocumentBuilder, escape_html};
pub use renderer::MarkupRenderer;
