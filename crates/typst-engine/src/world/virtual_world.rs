//! [`World`] implementation over a [`VirtualFilesystem`]

use chrono::{Datelike, Timelike, Utc};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, World};

use super::fonts::{global_font_cache, FontCache};
use super::virtual_fs::VirtualFilesystem;
use crate::compiler::errors::RenderError;
use crate::compiler::markup::TypstMarkup;

pub struct VirtualWorld {
    filesystem: VirtualFilesystem,
    main: FileId,
    font_cache: &'static FontCache,
    time: chrono::DateTime<Utc>,
    library: LazyHash<Library>,
}

impl VirtualWorld {
    /// Mount the generated source and every referenced image
    pub fn new(markup: TypstMarkup) -> Result<Self, RenderError> {
        let mut filesystem = VirtualFilesystem::new();
        let main = filesystem.mount_main(markup.source);
        for (path, content) in markup.assets {
            filesystem.mount_file(&path, content)?;
        }

        Ok(Self {
            filesystem,
            main,
            font_cache: global_font_cache(),
            time: Utc::now(),
            library: LazyHash::new(Library::builder().build()),
        })
    }

    pub fn filesystem(&self) -> &VirtualFilesystem {
        &self.filesystem
    }
}

impl World for VirtualWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        // The font cache is process-wide, so its book can be hashed once
        static BOOK: std::sync::OnceLock<LazyHash<FontBook>> = std::sync::OnceLock::new();
        BOOK.get_or_init(|| LazyHash::new(self.font_cache.book().clone()))
    }

    fn main(&self) -> FileId {
        self.main
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        self.filesystem
            .get_source(id)
            .ok_or_else(|| FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        self.filesystem
            .get_file(id)
            .cloned()
            .ok_or_else(|| FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.font_cache.font(index)
    }

    fn today(&self, offset: Option<i64>) -> Option<Datetime> {
        let adjusted = self.time + chrono::Duration::hours(offset.unwrap_or(0));
        Datetime::from_ymd_hms(
            adjusted.year(),
            adjusted.month() as u8,
            adjusted.day() as u8,
            adjusted.hour() as u8,
            adjusted.minute() as u8,
            adjusted.second() as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_world_mounts_source_and_assets() {
        let mut assets = HashMap::new();
        assets.insert("assets/img-0.png".to_string(), Bytes::from(vec![0x89u8, b'P']));
        let world = VirtualWorld::new(TypstMarkup {
            source: "#text(\"שלום\")".to_string(),
            assets,
        })
        .unwrap();

        assert!(world.source(world.main()).is_ok());
        assert_eq!(world.filesystem().len(), 2);
        assert!(world.today(None).is_some());
    }

    #[test]
    fn test_traversal_asset_rejected() {
        let mut assets = HashMap::new();
        assets.insert("../secret".to_string(), Bytes::from(vec![1u8]));
        let result = VirtualWorld::new(TypstMarkup {
            source: String::new(),
            assets,
        });
        assert!(matches!(result, Err(RenderError::PathSecurityViolation(_))));
    }
}
