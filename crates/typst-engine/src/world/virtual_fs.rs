//! Sandboxed file store for one compilation

use std::collections::HashMap;
use std::path::Path;

use typst::foundations::Bytes;
use typst::syntax::{FileId, Source, VirtualPath};

use crate::compiler::errors::RenderError;

const MAIN_PATH: &str = "/main.typ";

#[derive(Debug, Default)]
pub struct VirtualFilesystem {
    files: HashMap<FileId, Bytes>,
}

impl VirtualFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the generated source as `/main.typ`
    pub fn mount_main(&mut self, content: String) -> FileId {
        let id = FileId::new(None, VirtualPath::new(MAIN_PATH));
        self.files.insert(id, Bytes::from(content.into_bytes()));
        id
    }

    /// Mount an image referenced by the source
    pub fn mount_file(&mut self, path: &str, content: Bytes) -> Result<FileId, RenderError> {
        validate_path(path)?;
        let id = FileId::new(None, VirtualPath::new(&normalize_path(path)));
        self.files.insert(id, content);
        Ok(id)
    }

    pub fn get_source(&self, id: FileId) -> Option<Source> {
        let text = std::str::from_utf8(self.files.get(&id)?).ok()?;
        Some(Source::new(id, text.to_string()))
    }

    pub fn get_file(&self, id: FileId) -> Option<&Bytes> {
        self.files.get(&id)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn validate_path(path: &str) -> Result<(), RenderError> {
    if path.contains("..") {
        return Err(RenderError::PathSecurityViolation(format!(
            "'..' is not allowed in '{}'",
            path
        )));
    }
    if Path::new(path).is_absolute() && !path.starts_with('/') {
        return Err(RenderError::PathSecurityViolation(format!(
            "filesystem path '{}' is not allowed",
            path
        )));
    }
    Ok(())
}

fn normalize_path(path: &str) -> String {
    let mut normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    while normalized.contains("//") {
        normalized = normalized.replace("//", "/");
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_main() {
        let mut fs = VirtualFilesystem::new();
        let id = fs.mount_main("= כותרת".to_string());
        let source = fs.get_source(id).unwrap();
        assert!(source.text().contains("כותרת"));
    }

    #[test]
    fn test_path_traversal_blocked() {
        let mut fs = VirtualFilesystem::new();
        let result = fs.mount_file("../../../etc/passwd", Bytes::from_static(&[]));
        assert!(matches!(result, Err(RenderError::PathSecurityViolation(_))));
    }

    #[test]
    fn test_relative_and_absolute_asset_paths_match() {
        let mut fs = VirtualFilesystem::new();
        let content = Bytes::from(vec![0x89u8, 0x50, 0x4E, 0x47]);
        let id = fs.mount_file("assets//img-0.png", content.clone()).unwrap();
        let expected = FileId::new(None, VirtualPath::new("/assets/img-0.png"));
        assert_eq!(id, expected);
        assert_eq!(fs.get_file(expected), Some(&content));
    }
}
