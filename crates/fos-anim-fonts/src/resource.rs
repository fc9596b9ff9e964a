//! Font resource providers
//!
//! Embedders hand font bytes to the native tier through [`ResourceProvider`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::Result;

/// Source of externally provided font data
pub trait ResourceProvider {
    /// Load the bytes for font `name`, declared with locator `path` (may be empty)
    fn load_font_bytes(&self, name: &str, path: &str) -> Option<Arc<Vec<u8>>>;
}

/// Provider that never has any data
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResourceProvider;

impl ResourceProvider for NullResourceProvider {
    fn load_font_bytes(&self, _name: &str, _path: &str) -> Option<Arc<Vec<u8>>> {
        None
    }
}

/// Provider serving preloaded fonts keyed by font name
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceProvider {
    fonts: HashMap<String, Arc<Vec<u8>>>,
}

impl MemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register data for a font name
    pub fn insert(&mut self, name: &str, data: Vec<u8>) {
        self.fonts.insert(name.to_string(), Arc::new(data));
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl ResourceProvider for MemoryResourceProvider {
    fn load_font_bytes(&self, name: &str, _path: &str) -> Option<Arc<Vec<u8>>> {
        self.fonts.get(name).cloned()
    }
}

/// Provider reading font files relative to a base directory
///
/// Remote locators (`http://`, `https://`) are ignored; the animation format
/// commonly points those at web font CSS rather than font files.
#[derive(Debug, Clone)]
pub struct FileResourceProvider {
    base_dir: PathBuf,
}

impl FileResourceProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    /// Base directory for relative locators
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a locator to a file path, if it names a local file
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        if path.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
            return None;
        }
        let path = Path::new(path);
        Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        })
    }

    /// Read the file behind a locator
    pub fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        match self.resolve(path) {
            Some(file) => Ok(Some(std::fs::read(file)?)),
            None => Ok(None),
        }
    }
}

impl ResourceProvider for FileResourceProvider {
    fn load_font_bytes(&self, name: &str, path: &str) -> Option<Arc<Vec<u8>>> {
        match self.read(path) {
            Ok(data) => data.map(Arc::new),
            Err(e) => {
                tracing::debug!("No font file for {} at {:?}: {}", name, path, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_provider() {
        assert!(NullResourceProvider.load_font_bytes("Roboto", "").is_none());
    }

    #[test]
    fn test_memory_provider() {
        let mut provider = MemoryResourceProvider::new();
        provider.insert("Roboto-Regular", vec![1, 2, 3]);

        let data = provider.load_font_bytes("Roboto-Regular", "ignored").unwrap();
        assert_eq!(data.as_slice(), &[1, 2, 3]);
        assert!(provider.load_font_bytes("Roboto-Bold", "").is_none());
    }

    #[test]
    fn test_file_provider_skips_remote() {
        let provider = FileResourceProvider::new("/fonts");
        assert!(provider.resolve("https://fonts.googleapis.com/css?family=Roboto").is_none());
        assert!(provider.resolve("").is_none());
        assert_eq!(provider.resolve("a.ttf"), Some(PathBuf::from("/fonts/a.ttf")));
    }

    #[test]
    fn test_file_provider_reads() {
        let dir = std::env::temp_dir()
            .join(format!("fos-anim-fonts-{}-file-provider-reads", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("font.bin"), b"font").unwrap();

        let provider = FileResourceProvider::new(&dir);
        let data = provider.load_font_bytes("Test", "font.bin");
        assert_eq!(data.unwrap().as_slice(), b"font");
        assert!(provider.load_font_bytes("Test", "does-not-exist.ttf").is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
