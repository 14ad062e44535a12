//! Claim composition binary
//!
//! Reads a case record, composes the selected claims and writes one rendered
//! file per claim. All file I/O of the system happens here.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use claim_composer::{ClaimEngine, EngineConfig};
use shared_types::{CaseRecord, ClaimType, Document};
use typst_engine::{compile_document, to_markup, OutputFormat, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "compose-claim")]
#[command(version, about = "Compose family-court claim documents from a case record")]
struct Args {
    /// Case record JSON file
    #[arg(short, long)]
    case: PathBuf,

    /// Claim type to compose (repeatable); defaults to the case's selection
    #[arg(long = "claim")]
    claims: Vec<ClaimType>,

    /// Engine configuration TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Output format: pdf, svg or png
    #[arg(short, long, default_value = "pdf")]
    format: OutputFormat,

    /// Pixels per inch for PNG output
    #[arg(long)]
    ppi: Option<u32>,

    /// Also write the Q&A backup document
    #[arg(long)]
    backup: bool,

    /// Also write the generated Typst source next to each output
    #[arg(long)]
    emit_source: bool,

    /// Rendering timeout per document in milliseconds
    #[arg(long, default_value = "30000")]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout stays free for the list of written files
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("compose-claim v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let engine = ClaimEngine::new(config)?;

    let json = std::fs::read_to_string(&args.case)
        .with_context(|| format!("Failed to read case file: {}", args.case.display()))?;
    let mut case = CaseRecord::from_json(&json)
        .with_context(|| format!("Failed to parse case file: {}", args.case.display()))?;
    if !args.claims.is_empty() {
        case.claim_types = args.claims.clone();
    }
    if case.claim_types.is_empty() && !args.backup {
        bail!("No claim type selected; pass --claim or set claimTypes in the case file");
    }

    std::fs::create_dir_all(&args.out_dir).with_context(|| {
        format!("Failed to create output directory: {}", args.out_dir.display())
    })?;

    let stem = file_stem(&case);
    let mut outputs = Vec::new();
    for (claim, document) in engine.compose_case(&case).await? {
        outputs.push((format!("{}-{}", stem, claim.key()), document));
    }
    if args.backup {
        outputs.push((format!("{}-backup", stem), engine.compose_backup(&case)?));
    }

    let options = RenderOptions {
        format: args.format,
        ppi: args.ppi,
    };
    for (name, document) in &outputs {
        let path = write_document(&args, options, name, document).await?;
        println!("{}", path.display());
    }

    Ok(())
}

async fn write_document(
    args: &Args,
    options: RenderOptions,
    name: &str,
    document: &Document,
) -> anyhow::Result<PathBuf> {
    if args.emit_source {
        let source_path = output_path(&args.out_dir, name, "typ");
        std::fs::write(&source_path, to_markup(document).source)
            .with_context(|| format!("Failed to write {}", source_path.display()))?;
    }

    let rendered = compile_document(document, options, args.timeout_ms)
        .await
        .with_context(|| format!("Failed to render {}", name))?;
    for warning in &rendered.warnings {
        tracing::warn!(document = name, "{}", warning.message);
    }

    let path = output_path(&args.out_dir, name, options.format.extension());
    std::fs::write(&path, &rendered.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        pages = rendered.page_count,
        "Document written"
    );
    Ok(path)
}

/// Case id when it is usable as a file name, otherwise "case"
fn file_stem(case: &CaseRecord) -> String {
    let id = case.id.as_deref().unwrap_or("").trim();
    let sanitized: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "case".to_string()
    } else {
        sanitized
    }
}

fn output_path(dir: &Path, name: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_stem_sanitizes_case_id() {
        let mut case = CaseRecord::default();
        assert_eq!(file_stem(&case), "case");

        case.id = Some("2024/17 א".to_string());
        assert_eq!(file_stem(&case), "2024_17__");

        case.id = Some("  ".to_string());
        assert_eq!(file_stem(&case), "case");
    }

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("out"), "case-property", "pdf");
        assert_eq!(path, PathBuf::from("out/case-property.pdf"));
    }

    #[test]
    fn test_demo_inputs_load() {
        let case = CaseRecord::from_json(include_str!("../../../demos/case-cohen.json")).unwrap();
        assert_eq!(
            case.claim_types,
            vec![ClaimType::Property, ClaimType::Alimony, ClaimType::Custody]
        );
        assert_eq!(file_stem(&case), "case-001");

        let config = EngineConfig::from_toml_str(include_str!("../../../demos/engine.toml")).unwrap();
        assert_eq!(config.transform_timeout_ms, 15000);
    }

    #[test]
    fn test_args_parse_repeated_claims() {
        let args = Args::parse_from([
            "compose-claim",
            "--case",
            "case.json",
            "--claim",
            "property",
            "--claim",
            "divorce",
            "--format",
            "svg",
        ]);
        assert_eq!(args.claims, vec![ClaimType::Property, ClaimType::Divorce]);
        assert_eq!(args.format, OutputFormat::Svg);
        assert!(!args.backup);
    }
}
