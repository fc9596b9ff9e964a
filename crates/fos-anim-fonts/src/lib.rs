//! fOS Anim Fonts - Font Resolution for Vector Animations
//!
//! This crate resolves the fonts referenced by an animation document:
//! - Font registry populated from the document font list
//! - Native resolution (embedder bytes, system family/style match, default)
//! - Embedded resolution from custom glyph outlines in the document
//! - Style label parsing ("BoldItalic" -> weight + slant)
//! - Static glyph path extraction from shape-layer geometry
//!
//! # Example
//! ```rust,ignore
//! use fos_anim_fonts::{Config, FontResolver};
//!
//! let mut resolver = FontResolver::new(Config::default().prefer_embedded_fonts(true));
//! let report = resolver.parse_document(&document);
//! let font = resolver.find_font("Roboto-Regular");
//! ```

pub mod config;
pub mod font;
pub mod glyph;
pub mod logger;
pub mod resolver;
pub mod resource;
pub mod shape;

pub use config::Config;
pub use font::{
    parse_font_style, CustomGlyph, CustomTypeface, CustomTypefaceBuilder, FontInfo,
    FontManager, FontRegistry, FontSlant, FontStyle, FontWeight, FontWidth, LazyFontManager,
    ParsedStyle, SystemFontManager, Typeface, TypefaceKind,
};
pub use glyph::{extract_glyph_path, GlyphCollector, GlyphError, GlyphStats, Outline, GLYPH_SCALE};
pub use logger::{LogEntry, LogLevel, Logger, MemoryLogger, TracingLogger};
pub use resolver::{FontResolver, ResolutionReport, ResolutionStatus};
pub use resource::{
    FileResourceProvider, MemoryResourceProvider, NullResourceProvider, ResourceProvider,
};
pub use shape::{AnimatorScope, PathAnimator, PathAttacher, ShapeData, ShapePathAttacher};

/// Font resolution error types
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("Custom typeface has no glyphs")]
    EmptyTypeface,

    #[error("Custom typeface builder already consumed for {0}")]
    BuilderConsumed(String),

    #[error("Failed to read font resource: {0}")]
    Resource(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FontError>;
