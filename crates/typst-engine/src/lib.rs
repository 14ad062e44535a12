//! Typst rendering for composed legal documents
//!
//! Turns a [`shared_types::Document`] into Typst markup, compiles it inside
//! an in-memory [`world::VirtualWorld`] and exports PDF, SVG or PNG.

pub mod compiler;
pub mod world;

#[cfg(feature = "server")]
pub use compiler::compile_document;
pub use compiler::{
    render_document, to_markup, CompileError, OutputFormat, RenderError, RenderOptions,
    RenderedDocument, TypstMarkup, TypstSerializer,
};
