//! Compilation and export
//!
//! [`render_document`] runs synchronously. With the `server` feature,
//! [`compile_document`] runs the same pipeline on the blocking pool under a
//! timeout.

use typst::diag::{Severity, SourceDiagnostic};
use typst::model::Document as TypstDocument;
use tracing::{debug, warn};

use shared_types::Document;

use super::errors::{CompileError, RenderError};
use super::markup::{to_markup, TypstMarkup};
use super::output::{OutputFormat, RenderOptions, RenderedDocument};
use crate::world::{global_font_cache, VirtualWorld};

const DEFAULT_PPI: u32 = 144;

/// Render a composed document
pub fn render_document(
    document: &Document,
    options: RenderOptions,
) -> Result<RenderedDocument, RenderError> {
    let world = prepare(document)?;
    finish(&world, options)
}

/// Render a composed document on the blocking pool, giving up after
/// `timeout_ms`
#[cfg(feature = "server")]
pub async fn compile_document(
    document: &Document,
    options: RenderOptions,
    timeout_ms: u64,
) -> Result<RenderedDocument, RenderError> {
    use std::time::Duration;

    let world = prepare(document)?;
    let result = tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        tokio::task::spawn_blocking(move || finish(&world, options)),
    )
    .await;

    match result {
        Ok(Ok(rendered)) => rendered,
        Ok(Err(join_error)) => Err(RenderError::CompileFailed(vec![CompileError::new(
            format!("Compilation task panicked: {}", join_error),
        )])),
        Err(_elapsed) => Err(RenderError::Timeout(timeout_ms)),
    }
}

/// Render hand-written or previously generated markup
pub fn render_markup(
    markup: TypstMarkup,
    options: RenderOptions,
) -> Result<RenderedDocument, RenderError> {
    let world = VirtualWorld::new(markup)?;
    finish(&world, options)
}

/// Parse-level check of a Typst source
pub fn validate_syntax(source: &str) -> Vec<CompileError> {
    typst::syntax::parse(source)
        .errors()
        .into_iter()
        .map(|error| CompileError::new(error.message.to_string()))
        .collect()
}

fn prepare(document: &Document) -> Result<VirtualWorld, RenderError> {
    if document.nodes.is_empty() {
        return Err(RenderError::EmptyDocument);
    }
    if !global_font_cache().has_family(&document.style.font_family) {
        warn!(
            family = %document.style.font_family,
            "Configured font not installed, using fallback fonts"
        );
    }

    let markup = to_markup(document);
    debug!(
        bytes = markup.source.len(),
        assets = markup.assets.len(),
        "Generated Typst markup"
    );
    VirtualWorld::new(markup)
}

fn finish(world: &VirtualWorld, options: RenderOptions) -> Result<RenderedDocument, RenderError> {
    let warned = typst::compile(world);
    let (_, warnings) = categorize_diagnostics(&warned.warnings);

    match warned.output {
        Ok(document) => {
            let bytes = export(&document, options)?;
            debug!(
                pages = document.pages.len(),
                format = %options.format,
                "Document rendered"
            );
            Ok(RenderedDocument {
                bytes,
                format: options.format,
                page_count: document.pages.len(),
                warnings,
            })
        }
        Err(diagnostics) => {
            let (mut errors, _) = categorize_diagnostics(&diagnostics);
            if errors.is_empty() {
                errors.push(CompileError::new("Compilation failed with unknown error"));
            }
            Err(RenderError::CompileFailed(errors))
        }
    }
}

fn export(document: &TypstDocument, options: RenderOptions) -> Result<Vec<u8>, RenderError> {
    match options.format {
        OutputFormat::Pdf => typst_pdf::pdf(document, &typst_pdf::PdfOptions::default())
            .map_err(|e| RenderError::Export(format!("PDF export failed: {:?}", e))),
        OutputFormat::Svg => {
            let page = document.pages.first().ok_or(RenderError::EmptyDocument)?;
            Ok(typst_svg::svg(page).into_bytes())
        }
        OutputFormat::Png => {
            let page = document.pages.first().ok_or(RenderError::EmptyDocument)?;
            let pixels_per_point = options.ppi.unwrap_or(DEFAULT_PPI) as f32 / 72.0;
            typst_render::render(page, pixels_per_point)
                .encode_png()
                .map_err(|e| RenderError::Export(format!("PNG encoding failed: {}", e)))
        }
    }
}

fn categorize_diagnostics(
    diagnostics: &[SourceDiagnostic],
) -> (Vec<CompileError>, Vec<CompileError>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for diag in diagnostics {
        let mut compile_error = CompileError::new(diag.message.to_string());
        if !diag.hints.is_empty() {
            let hint = diag
                .hints
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            compile_error = compile_error.with_hint(hint);
        }

        match diag.severity {
            Severity::Error => errors.push(compile_error),
            Severity::Warning => warnings.push(compile_error.as_warning()),
        }
    }

    (errors, warnings)
}
