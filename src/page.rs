use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::FontFace;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::PDFError;
use id_arena::{Arena, Id};
use pdf_writer::{Content, Filter, Finish, Name, Pdf};

/// Which registered font a span is set in, and at what size
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<FontFace>,
    pub size: Pt,
}

/// A run of text placed with its baseline origin at `coords` (PDF user space,
/// bottom-left origin)
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    RawContent(Vec<u8>),
}

/// A single fixed-size page
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Drawing operations, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: (Pt, Pt)) -> Page {
        Page {
            media_box: Rect::sized(size.0, size.1),
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    /// Add a span of text to the page. Spans added back to back share one text run.
    pub fn add_span(&mut self, span: SpanLayout) {
        match self.contents.last_mut() {
            Some(PageContents::Text(spans)) => spans.push(span),
            _ => self.contents.push(PageContents::Text(vec![span])),
        }
    }

    /// Add vector drawing operations (rectangles, rules, fills) to the page
    pub fn add_content(&mut self, content: Content) {
        self.contents.push(PageContents::RawContent(content.finish()));
    }

    /// Iterate over every span of text on the page, in painting order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().flat_map(|c| {
            let spans: &[SpanLayout] = match c {
                PageContents::Text(spans) => spans,
                PageContents::RawContent(_) => &[],
            };
            spans.iter()
        })
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<FontFace>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.require(RefType::Page(page_index))?;
        let parent = refs.require(RefType::PageTree)?;
        let font_refs = fonts
            .iter()
            .map(|(font_id, _)| {
                refs.require(RefType::Font(font_id.index()))
                    .map(|r| (font_id.index(), r))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(parent);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (index, font_ref) in font_refs {
            resource_fonts.pair(Name(format!("F{index}").as_bytes()), font_ref);
        }
        resource_fonts.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            rendered.as_slice(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use crate::font::BuiltinFont;

    #[test]
    fn consecutive_spans_share_a_text_run() {
        let mut fonts: Arena<FontFace> = Arena::new();
        let id = fonts.alloc(BuiltinFont::Helvetica.into());
        let span = |text: &str| SpanLayout {
            text: text.into(),
            font: SpanFont { id, size: Pt(16.0) },
            colour: colours::BLACK,
            coords: (Pt(0.0), Pt(0.0)),
        };

        let mut page = Page::new((Pt(100.0), Pt(100.0)));
        page.add_span(span("a"));
        page.add_span(span("b"));
        page.add_content(Content::new());
        page.add_span(span("c"));

        assert_eq!(page.contents.len(), 3);
        assert!(matches!(&page.contents[0], PageContents::Text(spans) if spans.len() == 2));
        assert!(matches!(&page.contents[2], PageContents::Text(spans) if spans.len() == 1));
        assert_eq!(page.spans().map(|s| s.text.as_str()).collect::<Vec<_>>(), ["a", "b", "c"]);
    }
}
