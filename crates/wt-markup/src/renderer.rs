//! Markup-to-HTML rendering facade.

use wt_config::Config;

use crate::element::{ImageElement, PatternBasedElement, PhraseScanner};
use crate::error::RenderError;
use crate::html::HtmlDocumentBuilder;
use crate::strategy::{ElementStrategies, StrategyBuilder};

/// Create the built-in element registered under `name`.
fn builtin_element(name: &str) -> Option<Box<dyn PatternBasedElement>> {
    match name {
        "image" => Some(Box::new(ImageElement)),
        _ => None,
    }
}

/// Renders markup text to an HTML fragment.
///
/// Holds a composed [`PhraseScanner`] and the output options. Every call to
/// [`render`](Self::render) uses a fresh sink, so a renderer can be shared
/// between threads.
pub struct MarkupRenderer {
    scanner: PhraseScanner,
    native_font: bool,
    xhtml: bool,
}

impl MarkupRenderer {
    /// Create a renderer with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the built-in elements fail to compose.
    pub fn new() -> Result<Self, RenderError> {
        Self::from_config(&Config::default())
    }

    /// Create a renderer from configuration.
    ///
    /// Directives are registered in the order listed in `[markup] directives`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownDirective`] for a directive name without a
    /// built-in element, or [`RenderError::Scan`] if composition fails.
    pub fn from_config(config: &Config) -> Result<Self, RenderError> {
        let elements = config
            .markup
            .directives
            .iter()
            .map(|name| {
                builtin_element(name).ok_or_else(|| RenderError::UnknownDirective(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            directives = ?config.markup.directives,
            xhtml = config.html.xhtml,
            native_font = config.html.native_font,
            "Creating markup renderer"
        );

        Ok(Self::with_elements(elements)?
            .with_xhtml(config.html.xhtml)
            .with_native_font(config.html.native_font))
    }

    /// Create a renderer for custom elements, in priority order.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Scan`] if an element pattern is invalid.
    pub fn with_elements(elements: Vec<Box<dyn PatternBasedElement>>) -> Result<Self, RenderError> {
        Ok(Self {
            scanner: PhraseScanner::new(elements)?,
            native_font: true,
            xhtml: true,
        })
    }

    /// Write void elements in XML form (`<img/>`).
    #[must_use]
    pub fn with_xhtml(mut self, xhtml: bool) -> Self {
        self.xhtml = xhtml;
        self
    }

    /// Render styled spans as native `<font>` elements.
    #[must_use]
    pub fn with_native_font(mut self, native_font: bool) -> Self {
        self.native_font = native_font;
        self
    }

    /// The scanner driving this renderer.
    #[must_use]
    pub fn scanner(&self) -> &PhraseScanner {
        &self.scanner
    }

    /// Render `text` to an HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Nesting`] if an element emitted an unbalanced
    /// event sequence.
    pub fn render(&self, text: &str) -> Result<String, RenderError> {
        let strategies = if self.native_font {
            ElementStrategies::html()
        } else {
            ElementStrategies::new()
        };
        let mut builder =
            StrategyBuilder::new(HtmlDocumentBuilder::new().with_xhtml(self.xhtml), strategies);
        self.scanner.scan(text, &mut builder);
        Ok(builder.into_inner().finish()?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wt_config::{HtmlConfig, MarkupConfig};

    use super::*;
    use crate::builder::{Attributes, DocumentBuilder, SpanType};
    use crate::element::{CaptureStore, PatternBasedElementProcessor};

    /// `color:NAME[text]` emitted as a styled span.
    struct ColorElement;

    struct ColorProcessor {
        captures: CaptureStore,
    }

    impl PatternBasedElement for ColorElement {
        fn name(&self) -> &'static str {
            "color"
        }

        fn pattern(&self, _group_offset: usize) -> String {
            r"color:(\w+)\[(.*?)\]".to_owned()
        }

        fn group_count(&self) -> usize {
            2
        }

        fn new_processor(&self) -> Box<dyn PatternBasedElementProcessor> {
            Box::new(ColorProcessor {
                captures: CaptureStore::with_group_count(2),
            })
        }
    }

    impl PatternBasedElementProcessor for ColorProcessor {
        fn captures(&self) -> &CaptureStore {
            &self.captures
        }

        fn captures_mut(&mut self) -> &mut CaptureStore {
            &mut self.captures
        }

        fn emit(self: Box<Self>, builder: &mut dyn DocumentBuilder) {
            let style = format!("color: {}", self.group(1).unwrap_or_default());
            builder.begin_span(SpanType::Span, &Attributes::new().with_css_style(style));
            builder.characters(self.group(2).unwrap_or_default());
            builder.end_span();
        }
    }

    fn color_renderer() -> MarkupRenderer {
        MarkupRenderer::with_elements(vec![Box::new(ColorElement)]).unwrap()
    }

    #[test]
    fn test_render_inline_image() {
        let renderer = MarkupRenderer::new().unwrap();
        assert_eq!(
            renderer.render("A & image:sunset.jpg[Sun,10] B").unwrap(),
            r#"A &amp; <span class="image"><img src="sunset.jpg" alt="Sun" width="10"/></span> B"#
        );
    }

    #[test]
    fn test_render_block_image() {
        let renderer = MarkupRenderer::new().unwrap();
        assert_eq!(
            renderer
                .render(r#"image::map.png[title="Harbour",caption="Fig 1: "]"#)
                .unwrap(),
            concat!(
                r#"<div class="imageblock"><div class="content">"#,
                r#"<img src="map.png" alt="map"/></div>"#,
                r#"<div class="title">Fig 1: Harbour</div></div>"#
            )
        );
    }

    #[test]
    fn test_render_multiline() {
        let renderer = MarkupRenderer::new().unwrap();
        assert_eq!(renderer.render("one\ntwo").unwrap(), "one\ntwo");
        assert_eq!(renderer.render("one\n").unwrap(), "one\n");
    }

    #[test]
    fn test_from_config_html_options() {
        let config = Config {
            html: HtmlConfig {
                xhtml: false,
                native_font: true,
            },
            ..Config::default()
        };
        let renderer = MarkupRenderer::from_config(&config).unwrap();
        assert_eq!(
            renderer.render("image:a.png[]").unwrap(),
            r#"<span class="image"><img src="a.png" alt="a"></span>"#
        );
    }

    #[test]
    fn test_from_config_unknown_directive() {
        let config = Config {
            markup: MarkupConfig {
                directives: vec!["image".to_owned(), "video".to_owned()],
            },
            ..Config::default()
        };
        let err = MarkupRenderer::from_config(&config).err().unwrap();
        assert!(matches!(err, RenderError::UnknownDirective(ref name) if name == "video"));
    }

    #[test]
    fn test_from_config_no_directives() {
        let config = Config {
            markup: MarkupConfig {
                directives: Vec::new(),
            },
            ..Config::default()
        };
        let renderer = MarkupRenderer::from_config(&config).unwrap();
        assert_eq!(renderer.scanner().element_names().count(), 0);
        assert_eq!(renderer.render("image:a.png[]").unwrap(), "image:a.png[]");
    }

    #[test]
    fn test_native_font_enabled() {
        assert_eq!(
            color_renderer().render("color:red[alert]").unwrap(),
            r#"<font color="red">alert</font>"#
        );
    }

    #[test]
    fn test_native_font_disabled() {
        let renderer = color_renderer().with_native_font(false);
        assert_eq!(
            renderer.render("color:red[alert]").unwrap(),
            r#"<span style="color: red">alert</span>"#
        );
    }

    static_assertions::assert_impl_all!(MarkupRenderer: Send, Sync);
}
