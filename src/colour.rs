/// A fill or stroke colour
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space from 0-255 channel values, the way
    /// label templates are usually written down
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub(crate) fn set_fill(&self, content: &mut pdf_writer::Content) {
        let Colour::RGB { r, g, b } = *self;
        content.set_fill_rgb(r, g, b);
    }

    pub(crate) fn set_stroke(&self, content: &mut pdf_writer::Content) {
        let Colour::RGB { r, g, b } = *self;
        content.set_stroke_rgb(r, g, b);
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from(c: (u8, u8, u8)) -> Self {
        Colour::new_rgb_bytes(c.0, c.1, c.2)
    }
}

/// Pre-defined colours used on labels
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Colour = Colour::RGB {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
}
