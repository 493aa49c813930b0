use crate::{
    refs::{ObjectReferences, RefType},
    PDFError,
};
use derive_more::Display;
use owned_ttf_parser::{AsFaceRef, Face, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;
use std::fmt::Write as _;

/// The two weights a label is typeset in
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
pub enum Weight {
    #[display("regular")]
    Regular,
    #[display("bold")]
    Bold,
}

/// A parsed TrueType / OpenType face. Faces are embedded in their entirety as a
/// CIDFontType2 font with Identity-H encoding, which is what lets CJK text through;
/// a full CJK face adds several megabytes to the generated PDF.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn name_entry(&self, name_id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The PostScript name of the face, if it carries one
    pub fn postscript_name(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::POST_SCRIPT_NAME)
    }

    /// The family name of the face, if it carries one
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}').or_else(|| self.glyph_id('?'))
    }

    fn glyph_ids(&self) -> HashMap<u16, char> {
        let mut map: HashMap<u16, char> = HashMap::new();

        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                    {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }

        map
    }

    /// <glyph id, (advance, height)> in font units
    fn glyph_metrics(&self, ids: &HashMap<u16, char>) -> HashMap<u16, (u16, i16)> {
        let face = self.face();
        ids.values()
            .filter_map(|&ch| {
                let gid = face.glyph_index(ch)?;
                let advance = face.glyph_hor_advance(gid)?;
                let height = face
                    .glyph_bounding_box(gid)
                    .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                    .unwrap_or(1000);
                Some((gid.0, (advance, height)))
            })
            .collect()
    }

    fn scaling(&self) -> f32 {
        1000.0 / self.face().units_per_em() as f32
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        metrics: &HashMap<u16, (u16, i16)>,
        writer: &mut Pdf,
    ) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, metrics, writer);
        let scaling = self.scaling();

        let id = refs.gen(RefType::CidFont(font_index));
        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        // the most common advance becomes the default width
        let mut width_counts: HashMap<u16, usize> = HashMap::new();
        for &(advance, _) in metrics.values() {
            *width_counts.entry(advance).or_insert(0) += 1;
        }
        let default_width = width_counts
            .iter()
            .max_by_key(|&(_, count)| *count)
            .map(|(&advance, _)| advance as f32 * scaling)
            .unwrap_or(1000.0);

        let mut id_widths: Vec<(u16, f32)> = metrics
            .iter()
            .map(|(&gid, &(advance, _))| (gid, advance as f32 * scaling))
            .collect();
        id_widths.sort_by_key(|&(gid, _)| gid);

        let mut widths = cid_font.widths();
        let mut runs = id_widths.into_iter();
        if let Some((first_gid, first_width)) = runs.next() {
            let mut start_gid = first_gid;
            let mut run: Vec<f32> = vec![first_width];
            for (gid, width) in runs {
                if (gid - start_gid) as usize > run.len() {
                    widths.consecutive(start_gid, run.drain(..));
                    start_gid = gid;
                }
                run.push(width);
            }
            widths.consecutive(start_gid, run);
        }
        widths.finish();

        cid_font.default_width(default_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        metrics: &HashMap<u16, (u16, i16)>,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(font_data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face();
        let scaling = self.scaling();

        let max_width = metrics.values().map(|&(w, _)| w).max().unwrap_or_default();
        let max_height = metrics.values().map(|&(_, h)| h).max().unwrap_or_default();
        let avg_width = if metrics.is_empty() {
            0.0
        } else {
            metrics.values().map(|&(w, _)| w as f32).sum::<f32>() / metrics.len() as f32
        };

        let name = self
            .postscript_name()
            .unwrap_or_else(|| format!("F{font_index}"));
        let family = self.family().unwrap_or_else(|| name.clone());

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: (bbox.y_max.max(max_height)) as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(
            face.x_height()
                .or_else(|| face.capital_height())
                .unwrap_or_default() as f32
                * scaling,
        );
        // ttf faces carry no stem width; 80 is the conventional regular-weight guess
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);
        descriptor.font_file2(font_data_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        ids: &HashMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let mut ids: Vec<(u16, char)> = ids.iter().map(|(&gid, &ch)| (gid, ch)).collect();
        ids.sort_by_key(|&(gid, _)| gid);

        // bfchar blocks hold at most 100 entries and share a common high byte
        let mut blocks: Vec<Vec<(u16, char)>> = Vec::new();
        let mut current: Vec<(u16, char)> = Vec::new();
        let mut high_byte: u8 = 0;
        for (gid, ch) in ids {
            if (gid >> 8) as u8 != high_byte || current.len() >= 100 {
                if !current.is_empty() {
                    blocks.push(std::mem::take(&mut current));
                }
                high_byte = (gid >> 8) as u8;
            }
            current.push((gid, ch));
        }
        if !current.is_empty() {
            blocks.push(current);
        }

        for block in blocks {
            let _ = writeln!(map, "{} beginbfchar", block.len());
            for (gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let units: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                let _ = writeln!(map, "<{gid:04x}> <{units}>");
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        id
    }

    fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));

        let ids = self.glyph_ids();
        let metrics = self.glyph_metrics(&ids);
        let cid_font_id = self.write_cid(refs, font_index, &metrics, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, &ids, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

/// Base-14 fonts every PDF viewer ships. They only cover WinAnsi text, so they serve
/// as the substitute when no CJK face could be loaded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

impl BuiltinFont {
    pub fn for_weight(weight: Weight) -> BuiltinFont {
        match weight {
            Weight::Regular => BuiltinFont::Helvetica,
            Weight::Bold => BuiltinFont::HelveticaBold,
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));
        writer
            .type1_font(font_id)
            .base_font(Name(self.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}

/// A font registered with a [crate::Document]
pub enum FontFace {
    Embedded(Font),
    Builtin(BuiltinFont),
}

impl FontFace {
    /// Encode `text` as the hex string operand of a `Tj` operator
    pub fn encode(&self, text: &str) -> String {
        let mut hex = String::with_capacity(text.len() * 4);
        match self {
            FontFace::Embedded(font) => {
                for ch in text.chars() {
                    let gid = font
                        .glyph_id(ch)
                        .or_else(|| font.replacement_glyph_id())
                        .unwrap_or(0);
                    let _ = write!(hex, "{gid:04x}");
                }
            }
            FontFace::Builtin(_) => {
                for ch in text.chars() {
                    let byte = if (' '..='~').contains(&ch) { ch as u8 } else { b'?' };
                    let _ = write!(hex, "{byte:02x}");
                }
            }
        }
        hex
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, FontFace::Builtin(_))
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        match self {
            FontFace::Embedded(font) => font.write(refs, font_index, writer),
            FontFace::Builtin(builtin) => builtin.write(refs, font_index, writer),
        }
    }
}

impl From<Font> for FontFace {
    fn from(font: Font) -> Self {
        FontFace::Embedded(font)
    }
}

impl From<BuiltinFont> for FontFace {
    fn from(font: BuiltinFont) -> Self {
        FontFace::Builtin(font)
    }
}
