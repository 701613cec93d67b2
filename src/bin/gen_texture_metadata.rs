//! Texture Metadata Generator
//!
//! Writes a `.yaml` texture descriptor next to every image in a directory
//! that does not have one yet. Existing descriptors are left alone, so the
//! tool can be re-run after dropping new textures into the folder.
//!
//! Example:
//!   cargo run --bin gen_texture_metadata -- \
//!       --dir assets/models/test_scenes/sponza/textures \
//!       --virtual-root data:models/test_scenes/sponza/textures \
//!       --report-json target/texture_meta_report.json

use std::{fs, path::PathBuf};
use anyhow::{Context, Result};
use clap::Parser;
use texture_meta::{logging, DiskStore, GeneratorConfig};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate texture metadata sidecars for a directory of images",
    long_about = None
)]
struct Args {
    /// Directory to scan (immediate entries only).
    #[arg(long)] dir: Option<PathBuf>,
    /// Prefix for the `faces` path, e.g. `data:models/sponza/textures`.
    #[arg(long)] virtual_root: Option<String>,
    /// RON config layer; repeat to layer several (later wins).
    #[arg(long = "config")] configs: Vec<PathBuf>,
    /// Template file replacing the built-in texture descriptor.
    #[arg(long)] template: Option<PathBuf>,
    /// Image extension to accept (case-sensitive); repeat for several.
    /// Replaces the configured list.
    #[arg(long = "ext")] extensions: Vec<String>,
    /// Log what would be written without touching the filesystem.
    #[arg(long)] dry_run: bool,
    /// Process entries in directory listing order instead of sorting by name.
    #[arg(long)] unsorted: bool,
    /// Write a JSON summary of the run to this path.
    #[arg(long)] report_json: Option<PathBuf>,
    #[arg(short, long)] verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let cfg = resolve_config(&args)?;
    for w in cfg.validate() {
        warn!("config: {w}");
    }
    let dir = cfg
        .source_directory
        .clone()
        .context("no source directory; pass --dir or set source_directory in a config layer")?;
    let template = cfg.template()?;
    for missing in template.missing_required() {
        warn!("template has no {{{{{missing}}}}} placeholder; it will not be filled");
    }
    let generator = cfg.generator_with(template);

    let report = generator.run(&DiskStore, &dir)?;
    info!(
        "Done: scanned={} written={} existing={} ignored={}{}",
        report.scanned,
        report.written.len(),
        report.skipped_existing.len(),
        report.ineligible.len(),
        if report.dry_run { " (dry run)" } else { "" }
    );

    if let Some(out) = &args.report_json {
        let json_str = serde_json::to_string_pretty(&report)?;
        if let Some(parent) = out.parent() { fs::create_dir_all(parent)?; }
        fs::write(out, json_str).with_context(|| format!("write {:?}", out))?;
        info!("Wrote {}", out.display());
    }
    Ok(())
}

/// Config layers first, then command line flags on top.
fn resolve_config(args: &Args) -> Result<GeneratorConfig> {
    let mut cfg = if args.configs.is_empty() {
        GeneratorConfig::default()
    } else {
        let (cfg, used, errors) = GeneratorConfig::load_layered(&args.configs);
        if !errors.is_empty() {
            anyhow::bail!("config errors:\n  {}", errors.join("\n  "));
        }
        info!("Loaded config layers: {}", used.join(", "));
        cfg
    };
    if let Some(dir) = &args.dir { cfg.source_directory = Some(dir.clone()); }
    if let Some(root) = &args.virtual_root { cfg.virtual_root = root.clone(); }
    if let Some(template) = &args.template { cfg.template_path = Some(template.clone()); }
    if !args.extensions.is_empty() { cfg.extensions = args.extensions.clone(); }
    if args.dry_run { cfg.dry_run = true; }
    if args.unsorted { cfg.sorted = false; }
    Ok(cfg)
}
