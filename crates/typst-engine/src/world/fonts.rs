//! Font loading and caching
//!
//! Embedded fonts from typst-assets are always available. Hebrew legal
//! documents are normally typeset in a system font (David, Noto Serif
//! Hebrew), so system font directories are scanned as well, together with
//! the directory named by `CLAIM_FONT_DIR` when set.

use std::path::Path;
use std::sync::OnceLock;

use typst::foundations::Bytes;
use typst::text::{Font, FontBook};

/// Extra font directory read at cache initialization
pub const FONT_DIR_ENV: &str = "CLAIM_FONT_DIR";

const SYSTEM_FONT_DIRS: [&str; 4] = [
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
];

static FONT_CACHE: OnceLock<FontCache> = OnceLock::new();

/// Process-wide font cache, loaded on first use
pub fn global_font_cache() -> &'static FontCache {
    FONT_CACHE.get_or_init(FontCache::new)
}

#[derive(Debug)]
pub struct FontCache {
    book: FontBook,
    fonts: Vec<Font>,
}

impl FontCache {
    pub fn new() -> Self {
        let mut cache = Self::embedded();

        for dir in SYSTEM_FONT_DIRS {
            cache.scan_dir(Path::new(dir));
        }
        if let Ok(dir) = std::env::var(FONT_DIR_ENV) {
            cache.scan_dir(Path::new(&dir));
        }

        tracing::info!("Font cache initialized with {} fonts", cache.fonts.len());
        cache
    }

    /// Only the fonts bundled with typst-assets
    pub fn embedded() -> Self {
        let mut cache = Self {
            book: FontBook::new(),
            fonts: Vec::new(),
        };
        for data in typst_assets::fonts() {
            cache.push_all(Bytes::from_static(data));
        }
        cache
    }

    fn push_all(&mut self, buffer: Bytes) {
        for font in Font::iter(buffer) {
            self.book.push(font.info().clone());
            self.fonts.push(font);
        }
    }

    fn scan_dir(&mut self, dir: &Path) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                self.scan_dir(&path);
                continue;
            }
            let is_font = path
                .extension()
                .map(|ext| {
                    matches!(
                        ext.to_string_lossy().to_lowercase().as_str(),
                        "ttf" | "otf" | "ttc" | "otc"
                    )
                })
                .unwrap_or(false);
            if is_font {
                if let Ok(data) = std::fs::read(&path) {
                    self.push_all(Bytes::from(data));
                }
            }
        }
    }

    pub fn book(&self) -> &FontBook {
        &self.book
    }

    pub fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Case-insensitive family lookup
    pub fn has_family(&self, family: &str) -> bool {
        self.fonts
            .iter()
            .any(|font| font.info().family.eq_ignore_ascii_case(family))
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_fonts_present() {
        let cache = FontCache::embedded();
        assert!(!cache.is_empty());
        assert!(cache.has_family("libertinus serif"));
        assert!(!cache.has_family("No Such Family"));
    }

    #[test]
    fn test_global_cache_singleton() {
        assert!(std::ptr::eq(global_font_cache(), global_font_cache()));
    }
}
