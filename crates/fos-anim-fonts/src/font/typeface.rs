//! Resolved typefaces
//!
//! A [`Typeface`] is either backed by real font data (embedder bytes or a
//! system font) or synthesized from glyph outlines embedded in the document.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, RwLock};

use ttf_parser::{name_id, Face};

use super::{FontSlant, FontStyle, FontWeight};
use crate::glyph::Outline;
use crate::{FontError, Result};

/// Resolved, renderable font resource
#[derive(Debug)]
pub struct Typeface {
    family: String,
    style: FontStyle,
    kind: TypefaceKind,
    /// cmap and hmtx lookups of native faces, by character
    glyph_cache: RwLock<HashMap<char, Option<NativeGlyph>>>,
}

#[derive(Debug, Clone, Copy)]
struct NativeGlyph {
    id: u16,
    advance: Option<u16>,
}

/// Backing store of a typeface
pub enum TypefaceKind {
    /// Parsed font file
    Native {
        data: Arc<Vec<u8>>,
        index: u32,
        units_per_em: u16,
        glyph_count: u16,
    },
    /// Glyph table built from embedded outlines
    Custom(CustomTypeface),
}

impl fmt::Debug for TypefaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypefaceKind::Native { data, index, units_per_em, glyph_count } => f
                .debug_struct("Native")
                .field("bytes", &data.len())
                .field("index", index)
                .field("units_per_em", units_per_em)
                .field("glyph_count", glyph_count)
                .finish(),
            TypefaceKind::Custom(custom) => f.debug_tuple("Custom").field(custom).finish(),
        }
    }
}

impl Typeface {
    /// Parse font data, returning `None` if it is not a usable font
    pub fn from_data(data: Arc<Vec<u8>>, index: u32) -> Option<Self> {
        let (family, style, units_per_em, glyph_count) = {
            let face = Face::parse(&data, index).ok()?;
            let family = face
                .names()
                .into_iter()
                .filter(|name| name.name_id == name_id::FAMILY)
                .find_map(|name| name.to_string())
                .unwrap_or_default();
            let slant = if face.is_italic() {
                FontSlant::Italic
            } else if face.is_oblique() {
                FontSlant::Oblique
            } else {
                FontSlant::Upright
            };
            let style = FontStyle::with(FontWeight::from(face.weight().to_number()), slant);
            (family, style, face.units_per_em(), face.number_of_glyphs())
        };

        Some(Self {
            family,
            style,
            kind: TypefaceKind::Native { data, index, units_per_em, glyph_count },
            glyph_cache: RwLock::new(HashMap::new()),
        })
    }

    /// Wrap a finished custom glyph table
    pub fn custom(family: &str, style: FontStyle, glyphs: CustomTypeface) -> Self {
        Self {
            family: family.to_string(),
            style,
            kind: TypefaceKind::Custom(glyphs),
            glyph_cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn kind(&self) -> &TypefaceKind {
        &self.kind
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.kind, TypefaceKind::Custom(_))
    }

    /// Number of glyphs
    pub fn glyph_count(&self) -> usize {
        match &self.kind {
            TypefaceKind::Native { glyph_count, .. } => *glyph_count as usize,
            TypefaceKind::Custom(custom) => custom.len(),
        }
    }

    /// Horizontal advance of `c` for a 1pt font
    pub fn advance(&self, c: char) -> Option<f32> {
        match &self.kind {
            TypefaceKind::Native { units_per_em, .. } => {
                let advance = self.native_glyph(c)?.advance?;
                Some(advance as f32 / *units_per_em as f32)
            }
            TypefaceKind::Custom(custom) => {
                let id = u16::try_from(c as u32).ok()?;
                custom.glyph(id).map(|g| g.advance)
            }
        }
    }

    /// Whether the typeface can draw `c`
    pub fn has_char(&self, c: char) -> bool {
        match &self.kind {
            TypefaceKind::Native { .. } => self.native_glyph(c).is_some_and(|g| g.id != 0),
            TypefaceKind::Custom(custom) => u16::try_from(c as u32)
                .ok()
                .is_some_and(|id| custom.glyph(id).is_some()),
        }
    }

    /// Number of characters looked up in the font data so far
    pub fn cached_glyphs(&self) -> usize {
        self.glyph_cache.read().map_or(0, |cache| cache.len())
    }

    /// Glyph lookup for native faces, parsing the font data once per character
    fn native_glyph(&self, c: char) -> Option<NativeGlyph> {
        let TypefaceKind::Native { data, index, .. } = &self.kind else {
            return None;
        };
        if let Some(hit) = self.glyph_cache.read().ok().and_then(|cache| cache.get(&c).copied()) {
            return hit;
        }

        let found = Face::parse(data, *index).ok().and_then(|face| {
            let glyph = face.glyph_index(c)?;
            Some(NativeGlyph {
                id: glyph.0,
                advance: face.glyph_hor_advance(glyph),
            })
        });
        if let Ok(mut cache) = self.glyph_cache.write() {
            cache.insert(c, found);
        }
        found
    }
}

/// One embedded glyph, normalized to a 1pt em
#[derive(Debug, Clone)]
pub struct CustomGlyph {
    pub advance: f32,
    pub outline: Outline,
}

/// Glyph table of a synthesized typeface, keyed by glyph ID
#[derive(Debug, Clone, Default)]
pub struct CustomTypeface {
    glyphs: BTreeMap<u16, CustomGlyph>,
}

impl CustomTypeface {
    pub fn glyph(&self, id: u16) -> Option<&CustomGlyph> {
        self.glyphs.get(&id)
    }

    pub fn glyphs(&self) -> impl Iterator<Item = (u16, &CustomGlyph)> {
        self.glyphs.iter().map(|(id, glyph)| (*id, glyph))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Accumulates embedded glyphs until the typeface is finished
#[derive(Debug, Default)]
pub struct CustomTypefaceBuilder {
    glyphs: BTreeMap<u16, CustomGlyph>,
}

impl CustomTypefaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a glyph
    pub fn set_glyph(&mut self, id: u16, advance: f32, outline: Outline) {
        self.glyphs.insert(id, CustomGlyph { advance, outline });
    }

    pub fn glyph(&self, id: u16) -> Option<&CustomGlyph> {
        self.glyphs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Consume the builder into a typeface. Fails when no glyph was added.
    pub fn finish(self, family: &str, style: FontStyle) -> Result<Typeface> {
        if self.glyphs.is_empty() {
            return Err(FontError::EmptyTypeface);
        }
        Ok(Typeface::custom(family, style, CustomTypeface { glyphs: self.glyphs }))
    }
}
