use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use doxtract::{CropRect, DocxProcessor, ProcessingConfig};

/// Extract structured content from .docx files
#[derive(Parser)]
#[command(name = "doxtract", version, about)]
struct Cli {
    /// Path to the .docx file to process
    file: PathBuf,

    /// Output directory for extracted artifacts
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Generate content.html alongside the JSON artifacts
    #[arg(long)]
    html: bool,

    /// Convert the document to PDF (requires LibreOffice)
    #[arg(long)]
    pdf: bool,

    /// Skip table-of-contents generation
    #[arg(long)]
    no_toc: bool,

    /// Skip header/footer extraction
    #[arg(long)]
    no_headers_footers: bool,

    /// Skip endnote extraction
    #[arg(long)]
    no_endnotes: bool,

    /// Crop extracted images: left,top,right,bottom percentages
    #[arg(long, value_name = "L,T,R,B")]
    crop: Option<String>,

    /// Load configuration from an explicit TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the full result as JSON to stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ProcessingConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ProcessingConfig::load()?,
    };

    if let Some(output) = cli.output {
        config.output_dir = Some(output);
    }
    if cli.html {
        config.generate_html = true;
    }
    if cli.pdf {
        config.convert_to_pdf = true;
    }
    if cli.no_toc {
        config.extract_toc = false;
    }
    if cli.no_headers_footers {
        config.include_headers_footers = false;
    }
    if cli.no_endnotes {
        config.extract_endnotes = false;
    }
    if let Some(crop) = &cli.crop {
        config.image_crop = parse_crop(crop)?;
    }

    let processor = DocxProcessor::new(config)?;
    let result = processor.process_file(&cli.file)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Extracted {} sections, {} tables, {} images from {} in {:.2}s",
            result.sections.len(),
            result.tables.len(),
            result.images.len(),
            cli.file.display(),
            result.processing_time_seconds
        );
        for warning in &result.warnings {
            println!("warning: {warning}");
        }
        for error in &result.errors {
            println!("error: {error}");
        }
        if let Some(paths) = result.output_paths.get("content") {
            println!("Content written to {}", paths.display());
        }
    }

    Ok(())
}

fn parse_crop(value: &str) -> Result<CropRect> {
    let edges: Vec<f32> = value
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("invalid crop specification: {value}"))?;
    anyhow::ensure!(
        edges.len() == 4,
        "crop expects four comma-separated percentages, got {}",
        edges.len()
    );
    Ok(CropRect::new(edges[0], edges[1], edges[2], edges[3]))
}
