//! Font registry, typefaces and native font matching

mod manager;
mod registry;
mod style;
mod typeface;

pub use manager::{FontManager, LazyFontManager, SystemFontManager};
pub use registry::{FontInfo, FontRegistry};
pub use style::{parse_font_style, ParsedStyle};
pub use typeface::{CustomGlyph, CustomTypeface, CustomTypefaceBuilder, Typeface, TypefaceKind};

/// Font weight (100-1000)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const THIN: FontWeight = FontWeight(100);
    pub const EXTRA_LIGHT: FontWeight = FontWeight(200);
    pub const LIGHT: FontWeight = FontWeight(300);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const SEMI_BOLD: FontWeight = FontWeight(600);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const EXTRA_BOLD: FontWeight = FontWeight(800);
    pub const BLACK: FontWeight = FontWeight(900);
    pub const EXTRA_BLACK: FontWeight = FontWeight(1000);
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::NORMAL
    }
}

impl From<u16> for FontWeight {
    fn from(value: u16) -> Self {
        FontWeight(value.clamp(100, 1000))
    }
}

/// Font slant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontSlant {
    #[default]
    Upright,
    Italic,
    Oblique,
}

impl From<fontdb::Style> for FontSlant {
    fn from(style: fontdb::Style) -> Self {
        match style {
            fontdb::Style::Normal => FontSlant::Upright,
            fontdb::Style::Italic => FontSlant::Italic,
            fontdb::Style::Oblique => FontSlant::Oblique,
        }
    }
}

impl From<FontSlant> for fontdb::Style {
    fn from(slant: FontSlant) -> Self {
        match slant {
            FontSlant::Upright => fontdb::Style::Normal,
            FontSlant::Italic => fontdb::Style::Italic,
            FontSlant::Oblique => fontdb::Style::Oblique,
        }
    }
}

/// Font width. Style labels never encode a width, so parsing yields `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWidth {
    Condensed,
    #[default]
    Normal,
    Expanded,
}

impl From<FontWidth> for fontdb::Stretch {
    fn from(width: FontWidth) -> Self {
        match width {
            FontWidth::Condensed => fontdb::Stretch::Condensed,
            FontWidth::Normal => fontdb::Stretch::Normal,
            FontWidth::Expanded => fontdb::Stretch::Expanded,
        }
    }
}

/// Style descriptor: weight, width and slant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontStyle {
    pub weight: FontWeight,
    pub width: FontWidth,
    pub slant: FontSlant,
}

impl FontStyle {
    pub const fn new(weight: FontWeight, width: FontWidth, slant: FontSlant) -> Self {
        Self { weight, width, slant }
    }

    /// Normal width with the given weight and slant
    pub const fn with(weight: FontWeight, slant: FontSlant) -> Self {
        Self::new(weight, FontWidth::Normal, slant)
    }

    pub fn bold_italic() -> Self {
        Self::with(FontWeight::BOLD, FontSlant::Italic)
    }
}
