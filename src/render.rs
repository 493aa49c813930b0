//! The fixed 100mm × 100mm label layout.
//!
//! Coordinates below are millimetres from the top-left corner of the label, the way
//! the template was drawn up; text coordinates are baseline origins. They are only
//! converted to PDF user space (points, bottom-left origin) when drawn.

use crate::fonts::FontSource;
use crate::output::{OutputPolicy, Saved};
use crate::timestamp::format_chinese_timestamp;
use crate::{
    colours, BuiltinFont, Colour, Document, Font, FontFace, Info, LabelData, LabelError, Mm,
    Page, Pt, SpanFont, SpanLayout, Weight,
};
use chrono::{DateTime, Local};
use id_arena::Id;
use pdf_writer::Content;
use std::path::PathBuf;

pub const PAGE_WIDTH: Mm = Mm(100.0);
pub const PAGE_HEIGHT: Mm = Mm(100.0);
pub const STROKE_WIDTH: Mm = Mm(0.5);
pub const TITLE: &str = "TEMU物流单";

/// Rules of the item table: five horizontal, one vertical
const TABLE_ROWS: [f32; 5] = [40.0, 50.0, 60.0, 70.0, 80.0];
const TABLE_LEFT: f32 = 5.0;
const TABLE_RIGHT: f32 = 95.0;
const TABLE_DIVIDER: f32 = 50.0;

/// One drawing operation of the label, in top-left millimetre coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    StrokeRect {
        x: Mm,
        y: Mm,
        width: Mm,
        height: Mm,
    },
    FillRect {
        x: Mm,
        y: Mm,
        width: Mm,
        height: Mm,
        colour: Colour,
    },
    Line {
        from: (Mm, Mm),
        to: (Mm, Mm),
    },
    Text {
        x: Mm,
        y: Mm,
        text: String,
        weight: Weight,
        size: Pt,
        colour: Colour,
    },
}

fn text(x: f32, y: f32, text: impl Into<String>, weight: Weight, size: f32) -> Element {
    Element::Text {
        x: Mm(x),
        y: Mm(y),
        text: text.into(),
        weight,
        size: Pt(size),
        colour: colours::BLACK,
    }
}

fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Element {
    Element::Line {
        from: (Mm(x1), Mm(y1)),
        to: (Mm(x2), Mm(y2)),
    }
}

/// Lay out a label, in painting order
pub fn label_layout(data: &LabelData) -> Vec<Element> {
    use Weight::*;

    let mut elements = vec![
        Element::StrokeRect {
            x: Mm(5.0),
            y: Mm(5.0),
            width: Mm(90.0),
            height: Mm(90.0),
        },
        Element::FillRect {
            x: Mm(30.0),
            y: Mm(8.0),
            width: Mm(40.0),
            height: Mm(10.0),
            colour: colours::BLACK,
        },
        Element::Text {
            x: Mm(32.0),
            y: Mm(15.0),
            text: TITLE.to_string(),
            weight: Bold,
            size: Pt(16.0),
            colour: colours::WHITE,
        },
        text(15.0, 25.0, data.service_type.as_str(), Bold, 16.0),
        text(25.0, 35.0, data.phone_number.as_str(), Regular, 22.0),
    ];

    elements.push(line(TABLE_LEFT, TABLE_ROWS[0], TABLE_RIGHT, TABLE_ROWS[0]));
    elements.push(line(
        TABLE_DIVIDER,
        TABLE_ROWS[0],
        TABLE_DIVIDER,
        TABLE_ROWS[TABLE_ROWS.len() - 1],
    ));
    for y in &TABLE_ROWS[1..] {
        elements.push(line(TABLE_LEFT, *y, TABLE_RIGHT, *y));
    }

    elements.extend([
        text(20.0, 46.0, "货号", Regular, 16.0),
        text(70.0, 46.0, "数量/双", Regular, 16.0),
        text(20.0, 57.0, data.item_number.as_str(), Bold, 18.0),
        text(70.0, 57.0, data.quantity.to_string(), Bold, 18.0),
        text(8.0, 76.0, format!("共{}件", data.total_items), Bold, 16.0),
        text(74.0, 76.0, data.warehouse.as_str(), Regular, 16.0),
        text(12.0, 86.0, format!("收货仓: {}", data.shipping_crate), Regular, 14.0),
        text(10.0, 93.0, data.current_time.as_str(), Regular, 14.0),
    ]);

    elements
}

/// Convert a top-left millimetre position into PDF user space
fn to_user_space(x: Mm, y: Mm) -> (Pt, Pt) {
    (x.into(), (PAGE_HEIGHT - y).into())
}

/// Something the renderer had to work around; the label was still produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    /// The CJK face for `weight` couldn't be used; `substitute` was drawn instead
    FontSubstituted {
        weight: Weight,
        substitute: String,
        reason: String,
    },
    /// The preferred output directory failed, the label went to the fallback
    SavedToFallback { reason: String },
}

impl std::fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderWarning::FontSubstituted {
                weight,
                substitute,
                reason,
            } => write!(
                f,
                "{weight} font unavailable ({reason}), used {substitute}; CJK text may not display"
            ),
            RenderWarning::SavedToFallback { reason } => {
                write!(f, "output directory unusable ({reason}), saved to fallback")
            }
        }
    }
}

/// A label written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLabel {
    pub path: PathBuf,
    pub warnings: Vec<RenderWarning>,
}

struct LabelFonts {
    regular: Id<FontFace>,
    bold: Id<FontFace>,
}

impl LabelFonts {
    fn for_weight(&self, weight: Weight) -> Id<FontFace> {
        match weight {
            Weight::Regular => self.regular,
            Weight::Bold => self.bold,
        }
    }
}

/// Renders [LabelData] into PDF labels
pub struct LabelRenderer<F> {
    fonts: F,
    output: OutputPolicy,
}

impl<F: FontSource> LabelRenderer<F> {
    pub fn new(fonts: F, output: OutputPolicy) -> Self {
        LabelRenderer { fonts, output }
    }

    pub fn output(&self) -> &OutputPolicy {
        &self.output
    }

    /// Render and save a label stamped with the current time
    pub fn render(&self, data: LabelData) -> Result<RenderedLabel, LabelError> {
        self.render_at(data, Local::now())
    }

    /// Render and save a label as if it were `now`. Whatever `current_time` the
    /// caller supplied is replaced.
    pub fn render_at(
        &self,
        mut data: LabelData,
        now: DateTime<Local>,
    ) -> Result<RenderedLabel, LabelError> {
        data.current_time = format_chinese_timestamp(&now);

        let mut warnings = Vec::new();
        let mut doc = self.build_document(&data, &mut warnings);
        let mut info = Info::new();
        info.title(TITLE).subject(&data.item_number).created(now);
        doc.set_info(info);

        let bytes = doc.to_bytes()?;
        let path = match self.output.save(&bytes, &now)? {
            Saved::Preferred(path) => path,
            Saved::Fallback { path, reason } => {
                warnings.push(RenderWarning::SavedToFallback { reason });
                path
            }
        };

        Ok(RenderedLabel { path, warnings })
    }

    /// Lay the label out on a single page without saving it. `data` is drawn as
    /// given, including its `current_time`.
    pub fn build_document(&self, data: &LabelData, warnings: &mut Vec<RenderWarning>) -> Document {
        let mut doc = Document::default();
        let fonts = self.register_fonts(&mut doc, warnings);

        let mut page = Page::new((PAGE_WIDTH.into(), PAGE_HEIGHT.into()));
        for element in label_layout(data) {
            draw(&mut page, &fonts, element);
        }
        doc.add_page(page);
        doc
    }

    fn load_face(&self, weight: Weight) -> Result<Font, LabelError> {
        let bytes = self.fonts.load(weight)?;
        Ok(Font::load(bytes)?)
    }

    /// Register regular and bold faces before anything is drawn. A missing bold
    /// face reuses the regular one; a missing regular face drops both weights to
    /// the built-in Helvetica pair.
    fn register_fonts(&self, doc: &mut Document, warnings: &mut Vec<RenderWarning>) -> LabelFonts {
        let mut note_substitution = |weight: Weight, substitute: String, err: LabelError| {
            tracing::warn!(%weight, %substitute, error = %err, "label font unavailable");
            warnings.push(RenderWarning::FontSubstituted {
                weight,
                substitute,
                reason: err.to_string(),
            });
        };

        match self.load_face(Weight::Regular) {
            Ok(regular) => {
                let regular = doc.add_font(regular);
                let bold = match self.load_face(Weight::Bold) {
                    Ok(bold) => doc.add_font(bold),
                    Err(err) => {
                        note_substitution(Weight::Bold, "regular weight".into(), err);
                        regular
                    }
                };
                LabelFonts { regular, bold }
            }
            Err(err) => {
                for weight in [Weight::Regular, Weight::Bold] {
                    let reason = LabelError::FontUnavailable {
                        weight,
                        reason: err.to_string(),
                    };
                    let builtin = BuiltinFont::for_weight(weight);
                    note_substitution(weight, builtin.base_font().to_string(), reason);
                }
                LabelFonts {
                    regular: doc.add_font(BuiltinFont::Helvetica),
                    bold: doc.add_font(BuiltinFont::HelveticaBold),
                }
            }
        }
    }
}

fn draw(page: &mut Page, fonts: &LabelFonts, element: Element) {
    match element {
        Element::StrokeRect {
            x,
            y,
            width,
            height,
        } => {
            let (x, y) = to_user_space(x, y + height);
            let mut content = Content::new();
            content.set_line_width(Pt::from(STROKE_WIDTH).0);
            colours::BLACK.set_stroke(&mut content);
            content.rect(x.0, y.0, Pt::from(width).0, Pt::from(height).0);
            content.stroke();
            page.add_content(content);
        }
        Element::FillRect {
            x,
            y,
            width,
            height,
            colour,
        } => {
            let (x, y) = to_user_space(x, y + height);
            let mut content = Content::new();
            colour.set_fill(&mut content);
            content.rect(x.0, y.0, Pt::from(width).0, Pt::from(height).0);
            content.fill_nonzero();
            page.add_content(content);
        }
        Element::Line { from, to } => {
            let (x1, y1) = to_user_space(from.0, from.1);
            let (x2, y2) = to_user_space(to.0, to.1);
            let mut content = Content::new();
            content.set_line_width(Pt::from(STROKE_WIDTH).0);
            colours::BLACK.set_stroke(&mut content);
            content.move_to(x1.0, y1.0);
            content.line_to(x2.0, y2.0);
            content.stroke();
            page.add_content(content);
        }
        Element::Text {
            x,
            y,
            text,
            weight,
            size,
            colour,
        } => {
            if text.is_empty() {
                return;
            }
            page.add_span(SpanLayout {
                text,
                font: SpanFont {
                    id: fonts.for_weight(weight),
                    size,
                },
                colour,
                coords: to_user_space(x, y),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontBytes;
    use pretty_assertions::assert_eq;

    fn sample() -> LabelData {
        LabelData {
            service_type: "邮政特快专递".into(),
            phone_number: "13616578186xx".into(),
            item_number: "8559".into(),
            quantity: 8,
            total_items: 1,
            warehouse: "建闽店".into(),
            shipping_crate: "三水一产25号子仓".into(),
            current_time: "2025年3月17日, 星期一 下午 2:05".into(),
        }
    }

    fn texts(elements: &[Element]) -> Vec<(f32, f32, String, Weight, f32, Colour)> {
        elements
            .iter()
            .filter_map(|e| match e {
                Element::Text {
                    x,
                    y,
                    text,
                    weight,
                    size,
                    colour,
                } => Some((x.0, y.0, text.clone(), *weight, size.0, *colour)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn text_is_placed_at_fixed_positions() {
        use Weight::*;
        let black = colours::BLACK;
        assert_eq!(
            texts(&label_layout(&sample())),
            vec![
                (32.0, 15.0, "TEMU物流单".to_string(), Bold, 16.0, colours::WHITE),
                (15.0, 25.0, "邮政特快专递".to_string(), Bold, 16.0, black),
                (25.0, 35.0, "13616578186xx".to_string(), Regular, 22.0, black),
                (20.0, 46.0, "货号".to_string(), Regular, 16.0, black),
                (70.0, 46.0, "数量/双".to_string(), Regular, 16.0, black),
                (20.0, 57.0, "8559".to_string(), Bold, 18.0, black),
                (70.0, 57.0, "8".to_string(), Bold, 18.0, black),
                (8.0, 76.0, "共1件".to_string(), Bold, 16.0, black),
                (74.0, 76.0, "建闽店".to_string(), Regular, 16.0, black),
                (12.0, 86.0, "收货仓: 三水一产25号子仓".to_string(), Regular, 14.0, black),
                (10.0, 93.0, "2025年3月17日, 星期一 下午 2:05".to_string(), Regular, 14.0, black),
            ]
        );
    }

    #[test]
    fn frame_banner_and_table_rules() {
        let elements = label_layout(&sample());
        assert_eq!(
            elements[0],
            Element::StrokeRect {
                x: Mm(5.0),
                y: Mm(5.0),
                width: Mm(90.0),
                height: Mm(90.0)
            }
        );
        assert_eq!(
            elements[1],
            Element::FillRect {
                x: Mm(30.0),
                y: Mm(8.0),
                width: Mm(40.0),
                height: Mm(10.0),
                colour: colours::BLACK
            }
        );

        let lines: Vec<((f32, f32), (f32, f32))> = elements
            .iter()
            .filter_map(|e| match e {
                Element::Line { from, to } => Some(((from.0 .0, from.1 .0), (to.0 .0, to.1 .0))),
                _ => None,
            })
            .collect();
        assert_eq!(
            lines,
            vec![
                ((5.0, 40.0), (95.0, 40.0)),
                ((50.0, 40.0), (50.0, 80.0)),
                ((5.0, 50.0), (95.0, 50.0)),
                ((5.0, 60.0), (95.0, 60.0)),
                ((5.0, 70.0), (95.0, 70.0)),
                ((5.0, 80.0), (95.0, 80.0)),
            ]
        );
    }

    #[test]
    fn empty_record_still_lays_out_the_template() {
        let elements = label_layout(&LabelData::default());
        let texts = texts(&elements);
        assert_eq!(texts[6].2, "0");
        assert_eq!(texts[7].2, "共0件");
        assert_eq!(texts[9].2, "收货仓: ");
    }

    #[test]
    fn top_left_millimetres_map_to_pdf_points() {
        let (x, y) = to_user_space(Mm(0.0), Mm(0.0));
        assert_eq!(x, Pt(0.0));
        assert!((y.0 - 283.4646).abs() < 1e-3);

        let (_, y) = to_user_space(Mm(0.0), PAGE_HEIGHT);
        assert_eq!(y, Pt(0.0));
    }

    #[test]
    fn missing_fonts_fall_back_to_builtin_faces() {
        let renderer = LabelRenderer::new(FontBytes::none(), OutputPolicy::new("unused"));
        let mut warnings = Vec::new();
        let doc = renderer.build_document(&sample(), &mut warnings);

        assert_eq!(doc.fonts.len(), 2);
        assert!(doc.fonts.iter().all(|(_, face)| face.is_builtin()));
        assert_eq!(warnings.len(), 2);
        assert!(matches!(
            &warnings[0],
            RenderWarning::FontSubstituted { weight: Weight::Regular, substitute, .. }
                if substitute == "Helvetica"
        ));

        let page = doc.pages().next().expect("one page");
        assert!((page.width().0 - 283.4646).abs() < 1e-3);
        assert!((page.height().0 - 283.4646).abs() < 1e-3);
        assert_eq!(page.spans().count(), 11);
    }

    #[test]
    fn unparsable_font_bytes_are_a_warning_not_an_error() {
        let renderer = LabelRenderer::new(
            FontBytes::new(b"not a font".to_vec(), b"nor this".to_vec()),
            OutputPolicy::new("unused"),
        );
        let mut warnings = Vec::new();
        let doc = renderer.build_document(&sample(), &mut warnings);
        assert!(doc.fonts.iter().all(|(_, face)| face.is_builtin()));
        assert!(!warnings.is_empty());
        assert!(doc.to_bytes().unwrap().starts_with(b"%PDF-"));
    }

    #[test]
    fn empty_fields_draw_no_text() {
        let renderer = LabelRenderer::new(FontBytes::none(), OutputPolicy::new("unused"));
        let doc = renderer.build_document(&LabelData::default(), &mut Vec::new());
        let page = doc.pages().next().unwrap();
        // service, phone, item, warehouse and timestamp are empty
        assert_eq!(page.spans().count(), 6);
    }
}
