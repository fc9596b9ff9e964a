//! Native font management
//!
//! The native tier asks a [`FontManager`] to turn embedder bytes into a
//! typeface or to find an installed font by family and style.

use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

use fontdb::{Database, Family, Query, ID};

use super::{FontStyle, Typeface};

/// Source of native typefaces
pub trait FontManager {
    /// Build a typeface from font file bytes
    fn make_from_data(&self, data: Arc<Vec<u8>>) -> Option<Arc<Typeface>>;

    /// Find an installed font by family name and style
    fn match_family_style(&self, family: &str, style: FontStyle) -> Option<Arc<Typeface>>;

    /// Last-resort default face for a style
    fn legacy_default(&self, style: FontStyle) -> Option<Arc<Typeface>>;
}

/// Font manager over a `fontdb` database
pub struct SystemFontManager {
    db: Database,
}

impl SystemFontManager {
    /// Create a manager with no fonts
    pub fn new() -> Self {
        Self { db: Database::new() }
    }

    /// Create a manager with the system fonts loaded
    pub fn with_system_fonts() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", db.len());
        Self { db }
    }

    /// Add a font file held in memory
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Number of faces in the database
    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    fn query(&self, family: Family<'_>, style: FontStyle) -> Option<ID> {
        self.db.query(&Query {
            families: &[family],
            weight: fontdb::Weight(style.weight.0),
            stretch: style.width.into(),
            style: style.slant.into(),
        })
    }

    fn load(&self, id: ID) -> Option<Arc<Typeface>> {
        let (data, index) = self.db.with_face_data(id, |data, index| (data.to_vec(), index))?;
        Typeface::from_data(Arc::new(data), index).map(Arc::new)
    }
}

impl Default for SystemFontManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SystemFontManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemFontManager").field("faces", &self.db.len()).finish()
    }
}

impl FontManager for SystemFontManager {
    fn make_from_data(&self, data: Arc<Vec<u8>>) -> Option<Arc<Typeface>> {
        Typeface::from_data(data, 0).map(Arc::new)
    }

    fn match_family_style(&self, family: &str, style: FontStyle) -> Option<Arc<Typeface>> {
        self.query(Family::Name(family), style).and_then(|id| self.load(id))
    }

    fn legacy_default(&self, style: FontStyle) -> Option<Arc<Typeface>> {
        let id = self
            .query(Family::SansSerif, style)
            .or_else(|| self.db.faces().next().map(|face| face.id))?;
        self.load(id)
    }
}

/// Font manager created on first use.
///
/// Loading system fonts is expensive, and documents whose fonts all resolve
/// from embedded glyphs never need it.
pub struct LazyFontManager {
    factory: Box<dyn Fn() -> Arc<dyn FontManager>>,
    manager: OnceCell<Arc<dyn FontManager>>,
}

impl LazyFontManager {
    pub fn new(factory: impl Fn() -> Arc<dyn FontManager> + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            manager: OnceCell::new(),
        }
    }

    /// Wrap an already created manager
    pub fn ready(manager: Arc<dyn FontManager>) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(manager.clone());
        Self {
            factory: Box::new(move || manager.clone()),
            manager: cell,
        }
    }

    /// The manager, creating it if needed
    pub fn get(&self) -> &dyn FontManager {
        &**self.manager.get_or_init(|| (self.factory)())
    }

    pub fn is_initialized(&self) -> bool {
        self.manager.get().is_some()
    }
}

impl Default for LazyFontManager {
    fn default() -> Self {
        Self::new(|| Arc::new(SystemFontManager::with_system_fonts()))
    }
}

impl fmt::Debug for LazyFontManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyFontManager")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_empty_manager() {
        let manager = SystemFontManager::new();
        assert!(manager.is_empty());
        assert!(manager.match_family_style("Arial", FontStyle::default()).is_none());
        assert!(manager.legacy_default(FontStyle::default()).is_none());
        assert!(manager.make_from_data(Arc::new(vec![1, 2, 3])).is_none());
    }

    #[test]
    fn test_system_fonts_default() {
        let manager = SystemFontManager::with_system_fonts();
        if manager.is_empty() {
            // Skip on systems without fonts
            return;
        }
        let typeface = manager.legacy_default(FontStyle::default());
        assert!(typeface.is_some());
    }

    #[test]
    fn test_lazy_creates_once() {
        let created = Rc::new(Cell::new(0));
        let counter = created.clone();
        let lazy = LazyFontManager::new(move || {
            counter.set(counter.get() + 1);
            Arc::new(SystemFontManager::new())
        });

        assert!(!lazy.is_initialized());
        let _ = lazy.get().legacy_default(FontStyle::default());
        let _ = lazy.get().legacy_default(FontStyle::default());
        assert!(lazy.is_initialized());
        assert_eq!(created.get(), 1);
    }

    #[test]
    fn test_ready() {
        let lazy = LazyFontManager::ready(Arc::new(SystemFontManager::new()));
        assert!(lazy.is_initialized());
    }
}
