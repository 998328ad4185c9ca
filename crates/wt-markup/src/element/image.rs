//! Image directive: `image:SRC[PARAMS]` (inline) and `image::SRC[PARAMS]` (block).
//!
//! Parameters mix positional values (`alt`, `width`, `height`, in that order)
//! with `key="value"` pairs. Recognized keys besides the positional ones are
//! `title`, `caption` (block form only) and `link`.
//!
//! Block form output:
//!
//! ```text
//! <div class="imageblock">
//!   <div class="content"><img/></div>
//!   <div class="title">{caption}{title}</div>   (only with a title)
//! </div>
//! ```
//!
//! Inline form output: `<span class="image"><img/></span>`.

use crate::builder::{Attributes, BlockType, DocumentBuilder, ImageAttributes, SpanType};

use super::{CaptureStore, FormattingProperties, PatternBasedElement, PatternBasedElementProcessor};

const ALT: &str = "alt";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const TITLE: &str = "title";
const CAPTION: &str = "caption";
const LINK: &str = "link";
const IMAGE: &str = "image";

const POSITIONAL: &[&str] = &[ALT, WIDTH, HEIGHT];

const BLOCK_PREFIX: &str = "image::";

/// Recognizes inline and block image directives.
#[derive(Debug, Default)]
pub struct ImageElement;

impl PatternBasedElement for ImageElement {
    fn name(&self) -> &str {
        IMAGE
    }

    fn pattern(&self, _group_offset: usize) -> String {
        r"image::?(.*?)\[(.*?)\]".to_owned()
    }

    fn group_count(&self) -> usize {
        2
    }

    fn new_processor(&self) -> Box<dyn PatternBasedElementProcessor> {
        Box::new(ImageProcessor {
            captures: CaptureStore::with_group_count(self.group_count()),
        })
    }
}

struct ImageProcessor {
    captures: CaptureStore,
}

impl PatternBasedElementProcessor for ImageProcessor {
    fn captures(&self) -> &CaptureStore {
        &self.captures
    }

    fn captures_mut(&mut self) -> &mut CaptureStore {
        &mut self.captures
    }

    fn emit(self: Box<Self>, builder: &mut dyn DocumentBuilder) {
        let src = self.group(1).unwrap_or_default();
        let formatting = self.group(2).unwrap_or_default();

        let mut properties = FormattingProperties::parse(formatting, POSITIONAL);
        if properties.get(ALT).is_none_or(str::is_empty) {
            properties.insert(ALT, derive_alt(src));
        }

        let block = self
            .group(0)
            .is_some_and(|whole| whole.starts_with(BLOCK_PREFIX));

        if block {
            builder.begin_block(BlockType::Div, &Attributes::new().with_css_class("imageblock"));

            builder.begin_block(BlockType::Div, &Attributes::new().with_css_class("content"));
            emit_image(builder, src, &properties);
            builder.end_block();

            if let Some(title) = properties.get(TITLE) {
                builder.begin_block(BlockType::Div, &Attributes::new().with_css_class(TITLE));
                if let Some(caption) = properties.get(CAPTION) {
                    builder.characters(caption);
                }
                builder.characters(title);
                builder.end_block();
            }

            builder.end_block();
        } else {
            builder.begin_span(SpanType::Span, &Attributes::new().with_css_class(IMAGE));
            emit_image(builder, src, &properties);
            builder.end_span();
        }
    }
}

/// Derive alternative text from an image source reference.
///
/// `dir/sunset.jpg` becomes `sunset`. A reference without any `.` is used
/// unchanged, directory prefix included.
fn derive_alt(src: &str) -> &str {
    match src.rfind('.') {
        Some(dot) => {
            let stem = &src[..dot];
            stem.rfind('/').map_or(stem, |slash| &stem[slash + 1..])
        }
        None => src,
    }
}

fn emit_image(builder: &mut dyn DocumentBuilder, src: &str, properties: &FormattingProperties) {
    let mut attributes = ImageAttributes::new(properties.get(ALT).unwrap_or_default());
    attributes.height = parse_dimension(properties, HEIGHT);
    attributes.width = parse_dimension(properties, WIDTH);

    if let Some(link) = properties.get(LINK) {
        let link_attributes = Attributes::new().with_css_class(IMAGE);
        builder.image_link(&link_attributes, &attributes, link, src);
    } else {
        builder.image(&attributes, src);
    }
}

fn parse_dimension(properties: &FormattingProperties, key: &str) -> Option<i32> {
    let raw = properties.get(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::trace!(key, value = raw, error = %e, "Ignoring invalid image dimension");
            None
        }
    }
}
