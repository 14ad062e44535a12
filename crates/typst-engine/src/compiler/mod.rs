//! Typst-backed document serializer

pub mod errors;
pub mod markup;
pub mod output;
pub mod render;

pub use errors::{CompileError, ErrorSeverity, RenderError};
pub use markup::{to_markup, TypstMarkup};
pub use output::{OutputFormat, RenderOptions, RenderedDocument};
#[cfg(feature = "server")]
pub use render::compile_document;
pub use render::{render_document, render_markup, validate_syntax};

use shared_types::{Document, DocumentSerializer};

/// [`DocumentSerializer`] producing PDF, SVG or PNG through Typst
#[derive(Debug, Clone, Copy, Default)]
pub struct TypstSerializer {
    options: RenderOptions,
}

impl TypstSerializer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            options: RenderOptions::new(format),
        }
    }

    pub fn with_ppi(mut self, ppi: u32) -> Self {
        self.options.ppi = Some(ppi);
        self
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// The generated Typst source, for inspection
    pub fn source(&self, document: &Document) -> String {
        to_markup(document).source
    }
}

impl DocumentSerializer for TypstSerializer {
    type Error = RenderError;

    fn mime_type(&self) -> &'static str {
        self.options.format.mime_type()
    }

    fn serialize(&self, document: &Document) -> Result<Vec<u8>, Self::Error> {
        render_document(document, self.options).map(|rendered| rendered.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Node, Paragraph, Run, StyleConfig};

    #[test]
    fn test_serializer_produces_pdf() {
        let mut doc = Document::new("בדיקה", StyleConfig::default());
        doc.push(Node::Paragraph(Paragraph::new(vec![Run::plain("שלום")])));

        let serializer = TypstSerializer::default();
        assert_eq!(serializer.mime_type(), "application/pdf");
        let bytes = serializer.serialize(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(serializer.source(&doc).contains("\"שלום\""));
    }

    #[test]
    fn test_png_mime_type() {
        let serializer = TypstSerializer::new(OutputFormat::Png).with_ppi(72);
        assert_eq!(serializer.mime_type(), "image/png");
        assert_eq!(serializer.options().ppi, Some(72));
    }
}
