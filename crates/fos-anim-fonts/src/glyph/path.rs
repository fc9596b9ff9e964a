//! Glyph geometry extraction
//!
//! Embedded glyphs follow the shape-layer format:
//!
//! ```text
//! "data": {
//!     "shapes": [
//!         { "ty": "gr", "it": [ { "ty": "sh", "ks": <animatable path> }, .. ] },
//!         ..
//!     ]
//! }
//! ```
//!
//! The paths are encoded as animatable properties but must be static.

use serde_json::Value;

use super::{GlyphError, Outline};
use crate::shape::{AnimatorScope, PathAttacher};

/// Flatten a glyph's geometry into one static outline.
///
/// A geometry object without `shapes` is an intentionally empty glyph (space).
pub fn extract_glyph_path(
    geometry: Option<&Value>,
    attacher: &dyn PathAttacher,
) -> Result<Outline, GlyphError> {
    let geometry = geometry
        .and_then(Value::as_object)
        .ok_or(GlyphError::MissingGeometry)?;

    let Some(groups) = geometry.get("shapes").and_then(Value::as_array) else {
        return Ok(Outline::empty());
    };

    let mut outline = Outline::empty();
    for group in groups {
        let group = group
            .as_object()
            .ok_or(GlyphError::Malformed("shape group is not an object"))?;
        let items = group
            .get("it")
            .and_then(Value::as_array)
            .ok_or(GlyphError::Malformed("shape group has no items"))?;

        for item in items {
            let item = item
                .as_object()
                .ok_or(GlyphError::Malformed("shape item is not an object"))?;

            let mut scope = AnimatorScope::new();
            let path = attacher.attach_path(item.get("ks"), &mut scope);
            let animators = scope.release();

            if !animators.is_empty() {
                return Err(GlyphError::Animated(animators.len()));
            }
            outline.append(&path.ok_or(GlyphError::Unparsable)?);
        }
    }

    Ok(outline)
}
