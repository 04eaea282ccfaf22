//! Paragraph styles and page setup.

use genpdf::{Alignment, Margins, Mm, Size, style};

use crate::block::Block;

/// Millimetres per point.
const MM_PER_PT: f64 = 25.4 / 72.0;

pub(crate) fn mm(points: f32) -> Mm {
    Mm::from(f64::from(points) * MM_PER_PT)
}

/// An 8-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// CSS `darkblue` (#00008B).
    pub const DARK_BLUE: Self = Self::new(0, 0, 139);
    /// CSS `darkred` (#8B0000).
    pub const DARK_RED: Self = Self::new(139, 0, 0);

    /// Creates a colour from its components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for style::Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// Horizontal alignment of a paragraph within the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    /// Flush with the left margin.
    #[default]
    Left,
    /// Centered between the margins.
    Center,
}

impl From<Align> for Alignment {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => Self::Left,
            Align::Center => Self::Center,
        }
    }
}

/// Typography of one kind of block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    /// Font size in points.
    pub font_size: u8,
    /// Baseline-to-baseline distance in points.
    pub leading: f32,
    /// Text colour.
    pub color: Rgb,
    /// Paragraph alignment.
    pub align: Align,
    /// Bold face.
    pub bold: bool,
    /// Space above the block in points.
    pub space_before: f32,
    /// Space below the block in points.
    pub space_after: f32,
}

impl Style {
    /// Leading as a multiple of the font size.
    #[must_use]
    pub fn line_spacing(&self) -> f64 {
        f64::from(self.leading) / f64::from(self.font_size.max(1))
    }

    /// Character style handed to the layout engine.
    pub(crate) fn text_style(&self) -> style::Style {
        let text = style::Style::new()
            .with_font_size(self.font_size)
            .with_line_spacing(self.line_spacing())
            .with_color(self.color.into());
        if self.bold { text.bold() } else { text }
    }

    /// Vertical padding around the block.
    pub(crate) fn padding(&self) -> Margins {
        Margins::trbl(mm(self.space_before), mm(0.0), mm(self.space_after), mm(0.0))
    }
}

/// Styles for every text block kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stylesheet {
    /// Document title.
    pub title: Style,
    /// Section headings.
    pub heading: Style,
    /// Body text, line groups and bullets.
    pub body: Style,
}

impl Stylesheet {
    /// Style applied to `block`, or `None` for spacers and page breaks.
    #[must_use]
    pub const fn style_for(&self, block: &Block) -> Option<&Style> {
        match block {
            Block::Title(_) => Some(&self.title),
            Block::Heading(_) => Some(&self.heading),
            Block::Body(_) | Block::Lines(_) | Block::Bullet(_) => Some(&self.body),
            Block::Spacer(_) | Block::PageBreak => None,
        }
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            title: Style {
                font_size: 18,
                leading: 22.0,
                color: Rgb::DARK_BLUE,
                align: Align::Center,
                bold: true,
                space_before: 10.0,
                space_after: 30.0,
            },
            heading: Style {
                font_size: 14,
                leading: 18.0,
                color: Rgb::DARK_RED,
                align: Align::Left,
                bold: true,
                space_before: 12.0,
                space_after: 12.0,
            },
            body: Style {
                font_size: 10,
                leading: 12.0,
                color: Rgb::BLACK,
                align: Align::Left,
                bold: false,
                space_before: 6.0,
                space_after: 0.0,
            },
        }
    }
}

/// Page size and margins in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
    /// Left margin.
    pub margin_left: f32,
    /// Right margin.
    pub margin_right: f32,
    /// Top margin.
    pub margin_top: f32,
    /// Bottom margin.
    pub margin_bottom: f32,
}

impl PageGeometry {
    /// US letter with one-inch side and top margins and a quarter-inch
    /// bottom margin.
    #[must_use]
    pub const fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin_left: 72.0,
            margin_right: 72.0,
            margin_top: 72.0,
            margin_bottom: 18.0,
        }
    }

    pub(crate) fn size(&self) -> Size {
        Size::new(mm(self.width), mm(self.height))
    }

    pub(crate) fn margins(&self) -> Margins {
        Margins::trbl(
            mm(self.margin_top),
            mm(self.margin_right),
            mm(self.margin_bottom),
            mm(self.margin_left),
        )
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}
