//! Glyph outlines
//!
//! `tiny_skia::Path` cannot be empty, but space glyphs have no geometry, so
//! outlines wrap an optional path.

use tiny_skia::{Path, PathBuilder, Rect, Transform};

/// Owned glyph geometry, possibly empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    path: Option<Path>,
}

impl Outline {
    /// Outline with no geometry
    pub fn empty() -> Self {
        Self { path: None }
    }

    pub fn from_path(path: Path) -> Self {
        Self { path: Some(path) }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_none()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn into_path(self) -> Option<Path> {
        self.path
    }

    /// Bounding box, `None` when empty
    pub fn bounds(&self) -> Option<Rect> {
        self.path.as_ref().map(|p| p.bounds())
    }

    /// Number of path verbs
    pub fn verb_count(&self) -> usize {
        self.path.as_ref().map_or(0, |p| p.len())
    }

    /// Append the contours of `other`
    pub fn append(&mut self, other: &Outline) {
        let Some(other) = other.path.as_ref() else {
            return;
        };
        self.path = match self.path.take() {
            Some(path) => {
                let mut builder = PathBuilder::new();
                builder.push_path(&path);
                builder.push_path(other);
                builder.finish()
            }
            None => Some(other.clone()),
        };
    }

    /// Scale uniformly about the origin.
    ///
    /// Returns `None` when a non-empty outline does not survive the
    /// transform (zero or non-finite factor, overflow).
    pub fn scale(self, factor: f32) -> Option<Self> {
        match self.path {
            Some(path) => path
                .transform(Transform::from_scale(factor, factor))
                .map(Self::from_path),
            None => Some(Self::empty()),
        }
    }
}

impl From<Path> for Outline {
    fn from(path: Path) -> Self {
        Self::from_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Outline {
        Outline::from_path(PathBuilder::from_rect(Rect::from_xywh(x, y, w, h).unwrap()))
    }

    #[test]
    fn test_empty() {
        let outline = Outline::empty();
        assert!(outline.is_empty());
        assert!(outline.bounds().is_none());
        assert_eq!(outline.verb_count(), 0);
    }

    #[test]
    fn test_append() {
        let mut outline = Outline::empty();
        outline.append(&rect(0.0, 0.0, 10.0, 10.0));
        let single = outline.verb_count();
        outline.append(&rect(20.0, 0.0, 10.0, 10.0));
        outline.append(&Outline::empty());

        assert_eq!(outline.verb_count(), single * 2);
        let bounds = outline.bounds().unwrap();
        assert_eq!(bounds.left(), 0.0);
        assert_eq!(bounds.right(), 30.0);
    }

    #[test]
    fn test_scale() {
        let outline = rect(0.0, -70.0, 50.0, 70.0).scale(0.01).unwrap();
        let bounds = outline.bounds().unwrap();
        assert!((bounds.width() - 0.5).abs() < 1e-6);
        assert!((bounds.top() + 0.7).abs() < 1e-6);

        assert!(Outline::empty().scale(0.01).unwrap().is_empty());
        assert!(Outline::empty().scale(0.0).unwrap().is_empty());
    }

    #[test]
    fn test_scale_collapse_fails() {
        assert!(rect(0.0, 0.0, 10.0, 10.0).scale(f32::INFINITY).is_none());
        assert!(rect(0.0, 0.0, 10.0, 10.0).scale(f32::NAN).is_none());
    }
}
