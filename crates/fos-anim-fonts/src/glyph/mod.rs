//! Embedded glyph geometry

mod collector;
mod outline;
mod path;

pub use collector::{GlyphCollector, GlyphStats, GLYPH_SCALE};
pub use outline::Outline;
pub use path::extract_glyph_path;

/// Reasons a glyph's geometry cannot be used
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GlyphError {
    #[error("Glyph has no geometry")]
    MissingGeometry,

    #[error("Malformed glyph geometry: {0}")]
    Malformed(&'static str),

    #[error("Glyph path could not be parsed")]
    Unparsable,

    #[error("Glyph path is animated ({0} animators)")]
    Animated(usize),
}
