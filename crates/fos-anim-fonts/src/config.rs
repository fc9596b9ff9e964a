//! Resolver Configuration

use serde::Deserialize;

use crate::Result;

/// Embedder options for font resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    /// Try the glyph outlines embedded in the document before native fonts.
    ///
    /// When every font resolves from embedded glyphs the native font manager
    /// is never instantiated.
    pub prefer_embedded_fonts: bool,
}

impl Config {
    /// Parse a configuration from JSON, defaulting missing keys
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the embedded-first preference
    pub fn prefer_embedded_fonts(mut self, prefer: bool) -> Self {
        self.prefer_embedded_fonts = prefer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefers_native() {
        assert!(!Config::default().prefer_embedded_fonts);
    }

    #[test]
    fn test_from_json() {
        let config = Config::from_json(r#"{ "prefer_embedded_fonts": true }"#).unwrap();
        assert!(config.prefer_embedded_fonts);

        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Config::from_json("prefer_embedded_fonts").is_err());
    }
}
