//! Font registry
//!
//! One [`FontInfo`] per font name declared in the document. Text layers look
//! fonts up by name; embedded glyphs look them up by (family, style).

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use super::{CustomTypefaceBuilder, FontStyle, Typeface};
use crate::logger::{LogLevel, Logger};
use crate::{FontError, Result};

/// A declared font and its resolution state
#[derive(Debug)]
pub struct FontInfo {
    /// Declared family
    pub family: String,
    /// Raw style label, e.g. "BoldItalic"
    pub style: String,
    /// External resource locator, empty when not declared
    pub path: String,
    /// Ascent metric (0 when not declared)
    pub ascent: f32,
    typeface: Option<Arc<Typeface>>,
    custom_builder: Option<CustomTypefaceBuilder>,
}

impl FontInfo {
    pub fn new(family: &str, style: &str, path: &str, ascent: f32) -> Self {
        Self {
            family: family.to_string(),
            style: style.to_string(),
            path: path.to_string(),
            ascent,
            typeface: None,
            custom_builder: Some(CustomTypefaceBuilder::new()),
        }
    }

    /// Exact (family, raw style) comparison
    pub fn matches(&self, family: &str, style: &str) -> bool {
        self.family == family && self.style == style
    }

    pub fn typeface(&self) -> Option<&Arc<Typeface>> {
        self.typeface.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.typeface.is_some()
    }

    /// Store a typeface unless one is already set. Returns whether it was stored.
    pub fn set_typeface(&mut self, typeface: Arc<Typeface>) -> bool {
        if self.typeface.is_some() {
            return false;
        }
        self.typeface = Some(typeface);
        true
    }

    /// Builder for embedded glyphs, `None` once detached
    pub fn custom_builder_mut(&mut self) -> Option<&mut CustomTypefaceBuilder> {
        self.custom_builder.as_mut()
    }

    /// Finish the embedded glyph builder into a typeface.
    ///
    /// The builder is consumed even when it holds no glyphs; a second call
    /// fails with [`FontError::BuilderConsumed`].
    pub fn detach_custom_typeface(&mut self, style: FontStyle) -> Result<Arc<Typeface>> {
        let builder = self
            .custom_builder
            .take()
            .ok_or_else(|| FontError::BuilderConsumed(format!("{}|{}", self.family, self.style)))?;
        builder.finish(&self.family, style).map(Arc::new)
    }
}

/// Fonts declared by one document, keyed by name
#[derive(Debug, Default)]
pub struct FontRegistry {
    fonts: BTreeMap<String, FontInfo>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the fonts of a document `fonts` node (`{"list": [..]}`).
    ///
    /// Invalid descriptors are logged and skipped; a repeated name replaces the
    /// earlier entry. Returns the number of descriptors inserted.
    pub fn populate(&mut self, fonts: Option<&Value>, logger: &dyn Logger) -> usize {
        let Some(list) = fonts.and_then(|f| f.get("list")).and_then(Value::as_array) else {
            return 0;
        };

        let mut inserted = 0;
        for jfont in list {
            if !jfont.is_object() {
                continue;
            }

            let non_empty = |key: &str| jfont.get(key).and_then(Value::as_str).filter(|s| !s.is_empty());
            let (Some(name), Some(family), Some(style)) =
                (non_empty("fName"), non_empty("fFamily"), non_empty("fStyle"))
            else {
                logger.log(LogLevel::Error, Some(jfont), "Invalid font.");
                continue;
            };

            let path = jfont.get("fPath").and_then(Value::as_str).unwrap_or_default();
            let ascent = jfont.get("ascent").and_then(Value::as_f64).unwrap_or(0.0) as f32;

            self.insert(name, FontInfo::new(family, style, path, ascent));
            inserted += 1;
        }
        inserted
    }

    /// Insert or replace a font
    pub fn insert(&mut self, name: &str, info: FontInfo) -> Option<FontInfo> {
        self.fonts.insert(name.to_string(), info)
    }

    pub fn get(&self, name: &str) -> Option<&FontInfo> {
        self.fonts.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FontInfo> {
        self.fonts.get_mut(name)
    }

    /// Name of the font declared with `family` and raw `style`.
    ///
    /// Linear scan: documents declare a handful of fonts, and the glyph
    /// collector caches the last hit.
    pub fn find_by_family_style(&self, family: &str, style: &str) -> Option<&str> {
        self.fonts
            .iter()
            .find(|(_, info)| info.matches(family, style))
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FontInfo)> {
        self.fonts.iter().map(|(name, info)| (name.as_str(), info))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut FontInfo)> {
        self.fonts.iter_mut().map(|(name, info)| (name.as_str(), info))
    }

    /// Names of fonts still lacking a typeface
    pub fn unresolved(&self) -> Vec<&str> {
        self.iter().filter(|(_, info)| !info.is_resolved()).map(|(name, _)| name).collect()
    }

    pub fn all_resolved(&self) -> bool {
        self.fonts.values().all(FontInfo::is_resolved)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::Outline;
    use crate::logger::MemoryLogger;
    use serde_json::json;

    #[test]
    fn test_populate() {
        let logger = MemoryLogger::new();
        let mut registry = FontRegistry::new();
        let fonts = json!({
            "list": [
                {
                    "fName": "Roboto-Regular",
                    "fFamily": "Roboto",
                    "fStyle": "Regular",
                    "fPath": "fonts/Roboto-Regular.ttf",
                    "ascent": 75
                },
                { "fName": "Robo-BI", "fFamily": "Robo", "fStyle": "BoldItalic" }
            ]
        });

        assert_eq!(registry.populate(Some(&fonts), &logger), 2);
        assert!(logger.is_empty());

        let font = registry.get("Roboto-Regular").unwrap();
        assert_eq!(font.family, "Roboto");
        assert_eq!(font.style, "Regular");
        assert_eq!(font.path, "fonts/Roboto-Regular.ttf");
        assert_eq!(font.ascent, 75.0);
        assert!(!font.is_resolved());

        let font = registry.get("Robo-BI").unwrap();
        assert_eq!(font.path, "");
        assert_eq!(font.ascent, 0.0);
    }

    #[test]
    fn test_populate_skips_invalid() {
        let logger = MemoryLogger::new();
        let mut registry = FontRegistry::new();
        let fonts = json!({
            "list": [
                { "fName": "", "fFamily": "Roboto", "fStyle": "Regular" },
                { "fName": "A", "fStyle": "Regular" },
                { "fName": "B", "fFamily": "Roboto", "fStyle": 3 },
                null,
                { "fName": "C", "fFamily": "Roboto", "fStyle": "Bold", "ascent": "tall" }
            ]
        });

        assert_eq!(registry.populate(Some(&fonts), &logger), 1);
        assert_eq!(logger.count(LogLevel::Error), 3);
        assert_eq!(logger.entries()[0].message, "Invalid font.");
        assert_eq!(registry.get("C").unwrap().ascent, 0.0);
    }

    #[test]
    fn test_populate_missing_list() {
        let logger = MemoryLogger::new();
        let mut registry = FontRegistry::new();
        assert_eq!(registry.populate(None, &logger), 0);
        assert_eq!(registry.populate(Some(&json!({})), &logger), 0);
        assert_eq!(registry.populate(Some(&json!({ "list": {} })), &logger), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let logger = MemoryLogger::new();
        let mut registry = FontRegistry::new();
        let fonts = json!({
            "list": [
                { "fName": "F", "fFamily": "First", "fStyle": "Regular" },
                { "fName": "F", "fFamily": "Second", "fStyle": "Bold" }
            ]
        });

        registry.populate(Some(&fonts), &logger);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("F").unwrap().family, "Second");
        assert!(logger.is_empty());
    }

    #[test]
    fn test_find_by_family_style() {
        let mut registry = FontRegistry::new();
        registry.insert("a", FontInfo::new("Robo", "Regular", "", 0.0));
        registry.insert("b", FontInfo::new("Robo", "Bold", "", 0.0));

        assert_eq!(registry.find_by_family_style("Robo", "Bold"), Some("b"));
        assert_eq!(registry.find_by_family_style("Robo", "bold"), None);
        assert_eq!(registry.find_by_family_style("Roboto", "Regular"), None);
    }

    #[test]
    fn test_set_typeface_once() {
        let mut info = FontInfo::new("Robo", "Regular", "", 0.0);
        info.custom_builder_mut().unwrap().set_glyph(65, 0.5, Outline::empty());
        let first = info.detach_custom_typeface(FontStyle::default()).unwrap();
        assert!(info.set_typeface(first.clone()));

        let mut other = FontInfo::new("Robo", "Regular", "", 0.0);
        other.custom_builder_mut().unwrap().set_glyph(66, 0.5, Outline::empty());
        let second = other.detach_custom_typeface(FontStyle::default()).unwrap();
        assert!(!info.set_typeface(second));
        assert!(Arc::ptr_eq(info.typeface().unwrap(), &first));
    }

    #[test]
    fn test_detach_twice_fails() {
        let mut info = FontInfo::new("Robo", "Regular", "", 0.0);
        info.custom_builder_mut().unwrap().set_glyph(65, 0.5, Outline::empty());

        assert!(info.detach_custom_typeface(FontStyle::default()).is_ok());
        assert!(info.custom_builder_mut().is_none());
        assert!(matches!(
            info.detach_custom_typeface(FontStyle::default()),
            Err(FontError::BuilderConsumed(key)) if key == "Robo|Regular"
        ));
    }

    #[test]
    fn test_unresolved() {
        let mut registry = FontRegistry::new();
        registry.insert("a", FontInfo::new("Robo", "Regular", "", 0.0));
        registry.insert("b", FontInfo::new("Robo", "Bold", "", 0.0));
        assert_eq!(registry.unresolved(), vec!["a", "b"]);
        assert!(!registry.all_resolved());
    }
}
