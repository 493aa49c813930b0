//! Page contents to content-stream operators.
//!
//! Every content item is wrapped in its own `q`/`Q` pair, so the line widths and
//! colours set by one rule or fill never leak into the next.

use crate::colour::Colour;
use crate::font::FontFace;
use crate::page::{PageContents, SpanFont, SpanLayout};
use id_arena::Arena;
use std::io::{self, Write};

pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<FontFace>,
) -> io::Result<Vec<u8>> {
    let mut stream: Vec<u8> = Vec::new();

    for item in contents {
        writeln!(stream, "q")?;
        match item {
            PageContents::Text(spans) => write_spans(&mut stream, spans, fonts)?,
            PageContents::RawContent(ops) => {
                stream.write_all(ops)?;
                writeln!(stream)?;
            }
        }
        writeln!(stream, "Q")?;
    }

    Ok(stream)
}

/// Font and colour are only re-selected when they change between spans
fn write_spans(
    stream: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<FontFace>,
) -> io::Result<()> {
    let mut font: Option<SpanFont> = None;
    let mut colour: Option<Colour> = None;

    for span in spans {
        if font != Some(span.font) {
            writeln!(stream, "/F{} {} Tf", span.font.id.index(), span.font.size)?;
            font = Some(span.font);
        }
        if colour != Some(span.colour) {
            write_fill(stream, span.colour)?;
            colour = Some(span.colour);
        }

        let (x, y) = span.coords;
        let glyphs = fonts[span.font.id].encode(&span.text);
        writeln!(stream, "BT\n{x} {y} Td\n<{glyphs}> Tj\nET")?;
    }

    Ok(())
}

fn write_fill(stream: &mut Vec<u8>, colour: Colour) -> io::Result<()> {
    let Colour::RGB { r, g, b } = colour;
    writeln!(stream, "{r} {g} {b} rg")
}
