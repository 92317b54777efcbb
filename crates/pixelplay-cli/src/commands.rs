//! Subcommand implementations.
//!
//! Each command receives everything it needs as arguments; nothing is kept
//! between invocations except what the collection store persists.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context as _};
use pixelplay_core::decode::{decode_image, PixelBuffer};
use pixelplay_core::encode::{encode, OutputFormat};
use pixelplay_core::store::CollectionStore;
use pixelplay_core::transform::TransformOp;
use tracing::{debug, info};

use crate::cli::{Cli, Command, ExportArgs, SaveArgs, TransformArgs};
use crate::config::AppConfig;

pub fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let db = cli.db.as_deref();

    match cli.cmd {
        Command::Transform(args) => transform(&config, args, out),
        Command::Save(args) => save(&open_store(&config, db)?, args, out),
        Command::List => list(&open_store(&config, db)?, out),
        Command::Export(args) => export(&config, &open_store(&config, db)?, args, out),
        Command::Delete { id } => delete(&open_store(&config, db)?, id, out),
        Command::Count => {
            let count = open_store(&config, db)?.count()?;
            writeln!(out, "{count}")?;
            Ok(())
        }
    }
}

fn open_store(config: &AppConfig, flag: Option<&Path>) -> anyhow::Result<CollectionStore> {
    let path = config.database_path(flag);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    CollectionStore::initialize(&path)
        .with_context(|| format!("Failed to open collection {}", path.display()))
}

fn load_input(path: &Path) -> anyhow::Result<PixelBuffer> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let image =
        decode_image(&bytes).with_context(|| format!("Failed to decode {}", path.display()))?;
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        layout = ?image.layout(),
        "loaded image"
    );
    Ok(image)
}

/// Apply `ops` in order. The first failing op aborts the chain.
fn apply_ops(image: PixelBuffer, ops: &[TransformOp]) -> anyhow::Result<PixelBuffer> {
    ops.iter().try_fold(image, |current, op| {
        let next = op
            .apply(&current)
            .with_context(|| format!("Transform {op} failed"))?;
        debug!(%op, width = next.width(), height = next.height(), "applied transform");
        Ok(next)
    })
}

/// Pick the download format: `--format`, then a recognized output extension, then config.
fn download_format(
    config: &AppConfig,
    flag: Option<&str>,
    out_path: &Path,
) -> anyhow::Result<OutputFormat> {
    let from_extension = out_path
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.parse::<OutputFormat>().is_ok());
    config.download_format(flag.or(from_extension))
}

fn write_download(
    config: &AppConfig,
    image: &PixelBuffer,
    flag: Option<&str>,
    out_path: &Path,
) -> anyhow::Result<OutputFormat> {
    let format = download_format(config, flag, out_path)?;
    let bytes = encode(image, format)?;
    fs::write(out_path, bytes)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    Ok(format)
}

fn transform(config: &AppConfig, args: TransformArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let image = apply_ops(load_input(&args.input)?, &args.ops)?;
    let format = write_download(config, &image, args.format.as_deref(), &args.out)?;
    writeln!(
        out,
        "Wrote {}x{} {} to {}",
        image.width(),
        image.height(),
        format,
        args.out.display()
    )?;
    Ok(())
}

fn save(store: &CollectionStore, args: SaveArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let image = apply_ops(load_input(&args.input)?, &args.ops)?;
    let id = store.save(&image, &args.caption)?;
    info!(id, caption = %args.caption, "saved to collection");
    writeln!(out, "{id}")?;
    Ok(())
}

fn list(store: &CollectionStore, out: &mut impl Write) -> anyhow::Result<()> {
    let report = store.load_all_lossy()?;
    for entry in &report.entries {
        writeln!(
            out,
            "{}\t{}\t{}x{}\t{}",
            entry.id,
            entry.created_at.format("%Y-%m-%d %H:%M:%S"),
            entry.image.width(),
            entry.image.height(),
            entry.caption
        )?;
    }
    if !report.is_complete() {
        let ids: Vec<String> = report.corrupt.iter().map(|s| s.id.to_string()).collect();
        writeln!(out, "skipped corrupt entries: {}", ids.join(", "))?;
    }
    Ok(())
}

fn export(
    config: &AppConfig,
    store: &CollectionStore,
    args: ExportArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let Some(entry) = store.get(args.id)? else {
        bail!("No saved image with id {}", args.id);
    };
    let format = write_download(config, &entry.image, args.format.as_deref(), &args.out)?;
    writeln!(out, "Wrote {} as {} to {}", entry.id, format, args.out.display())?;
    Ok(())
}

fn delete(store: &CollectionStore, id: i64, out: &mut impl Write) -> anyhow::Result<()> {
    if store.delete(id)? {
        writeln!(out, "Deleted {id}")?;
    } else {
        writeln!(out, "No image with id {id}; nothing deleted")?;
    }
    Ok(())
}
