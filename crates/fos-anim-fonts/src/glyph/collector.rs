//! Embedded glyph collection
//!
//! Documents may carry their own glyph outlines:
//!
//! ```text
//! "chars": [
//!     { "ch": "t", "fFamily": "Roboto", "style": "Regular", "w": 32.67,
//!       "data": { "shapes": [..] } },
//!     ..
//! ]
//! ```
//!
//! Glyphs reference their font by (family, style) rather than by name. Each
//! accepted glyph goes into the owning font's custom typeface builder.

use serde_json::Value;

use super::{extract_glyph_path, GlyphError};
use crate::font::{parse_font_style, FontRegistry};
use crate::logger::{LogLevel, Logger};
use crate::shape::PathAttacher;
use crate::FontError;

/// Glyph outlines and advances are authored in percent of the em; this
/// normalizes them to a 1pt font.
pub const GLYPH_SCALE: f32 = 0.01;

/// Counters for one collection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphStats {
    pub accepted: usize,
    pub skipped: usize,
}

/// Groups embedded glyphs into per-font builders
pub struct GlyphCollector<'a> {
    logger: &'a dyn Logger,
    attacher: &'a dyn PathAttacher,
    /// Name of the font matched by the previous glyph
    current_font: Option<String>,
    stats: GlyphStats,
}

impl<'a> GlyphCollector<'a> {
    pub fn new(logger: &'a dyn Logger, attacher: &'a dyn PathAttacher) -> Self {
        Self {
            logger,
            attacher,
            current_font: None,
            stats: GlyphStats::default(),
        }
    }

    pub fn stats(&self) -> GlyphStats {
        self.stats
    }

    /// Collect all glyphs, then commit builders of unresolved fonts.
    ///
    /// Returns `true` when every font in the registry ends up with a typeface.
    pub fn resolve(&mut self, registry: &mut FontRegistry, chars: &[Value]) -> bool {
        self.collect(registry, chars);
        self.commit(registry)
    }

    /// Add every valid glyph in `chars` to its font's builder
    pub fn collect(&mut self, registry: &mut FontRegistry, chars: &[Value]) -> GlyphStats {
        for jchar in chars {
            if self.add_glyph(registry, jchar) {
                self.stats.accepted += 1;
            } else {
                self.stats.skipped += 1;
            }
        }
        self.stats
    }

    fn add_glyph(&mut self, registry: &mut FontRegistry, jchar: &Value) -> bool {
        if !jchar.is_object() {
            return false;
        }
        let Some(ch) = jchar.get("ch").and_then(Value::as_str) else {
            return false;
        };

        let family = jchar.get("fFamily").and_then(Value::as_str);
        // Glyphs use "style", fonts use "fStyle".
        let style = jchar.get("style").and_then(Value::as_str);

        let mut chars = ch.chars();
        let (Some(family), Some(style), Some(c), None) = (family, style, chars.next(), chars.next())
        else {
            self.logger.log(LogLevel::Error, Some(jchar), "Invalid glyph.");
            return false;
        };

        // Custom typefaces map code points directly to glyph IDs.
        let Ok(glyph_id) = u16::try_from(c as u32) else {
            self.logger.log(LogLevel::Error, Some(jchar), "Unsupported glyph ID.");
            return false;
        };

        let Some(name) = self.locate_font(registry, family, style) else {
            self.logger.log(
                LogLevel::Error,
                None,
                &format!("Font not found for codepoint ({}, {}, {}).", c as u32, family, style),
            );
            return false;
        };

        let outline = match extract_glyph_path(jchar.get("data"), self.attacher)
            .and_then(|outline| outline.scale(GLYPH_SCALE).ok_or(GlyphError::Unparsable))
        {
            Ok(outline) => outline,
            Err(e) => {
                tracing::debug!("Skipping glyph {:?} of {}|{}: {}", c, family, style, e);
                return false;
            }
        };

        let advance = jchar.get("w").and_then(Value::as_f64).unwrap_or(0.0) as f32;

        let Some(builder) = registry.get_mut(&name).and_then(|info| info.custom_builder_mut()) else {
            return false;
        };
        builder.set_glyph(glyph_id, advance * GLYPH_SCALE, outline);
        true
    }

    /// Name of the font owning (family, style), reusing the previous match
    fn locate_font(&mut self, registry: &FontRegistry, family: &str, style: &str) -> Option<String> {
        let cached = self
            .current_font
            .as_deref()
            .and_then(|name| registry.get(name))
            .is_some_and(|info| info.matches(family, style));

        if !cached {
            self.current_font = registry.find_by_family_style(family, style).map(str::to_string);
        }
        self.current_font.clone()
    }

    /// Turn the builders of all unresolved fonts into typefaces.
    ///
    /// Returns `true` when every font ends up with a typeface.
    pub fn commit(&self, registry: &mut FontRegistry) -> bool {
        let mut has_unresolved = false;

        for (name, info) in registry.iter_mut() {
            if info.is_resolved() {
                continue;
            }

            if info.custom_builder_mut().is_some_and(|builder| builder.is_empty()) {
                tracing::debug!("No embedded glyphs for {}", name);
                has_unresolved = true;
                continue;
            }

            let style = parse_font_style(&info.style, self.logger).style;
            match info.detach_custom_typeface(style) {
                Ok(typeface) => {
                    tracing::debug!("Resolved {} from {} embedded glyphs", name, typeface.glyph_count());
                    info.set_typeface(typeface);
                }
                Err(FontError::EmptyTypeface) => {
                    tracing::debug!("No embedded glyphs for {}", name);
                    has_unresolved = true;
                }
                Err(e) => {
                    self.logger.log(LogLevel::Error, None, &e.to_string());
                    has_unresolved = true;
                }
            }
        }

        !has_unresolved
    }
}
