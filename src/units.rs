use derive_more::{Add, AddAssign, Display, Div, From, Into, Mul, MulAssign, Sub, SubAssign, Sum};

/// PostScript points (1/72 of an inch), the native unit of PDF user space
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Div,
    Sum,
    From,
    Into,
    Display,
)]
pub struct Pt(pub f32);

/// Millimetres. Label layouts are specified in these.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Div,
    Sum,
    From,
    Into,
    Display,
)]
pub struct Mm(pub f32);

const MM_PER_INCH: f32 = 25.4;
const PT_PER_INCH: f32 = 72.0;

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Pt {
        Pt(mm.0 * PT_PER_INCH / MM_PER_INCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_millimetres_in_points() {
        let pt: Pt = Mm(100.0).into();
        assert!((pt.0 - 283.4646).abs() < 1e-3);
    }

    #[test]
    fn arithmetic_stays_in_unit() {
        let width = Mm(95.0) - Mm(5.0);
        assert_eq!(width, Mm(90.0));
        assert_eq!(Pt(8.0) * 2.0, Pt(16.0));
        assert_eq!(Pt(9.0) / 3.0, Pt(3.0));
    }
}
