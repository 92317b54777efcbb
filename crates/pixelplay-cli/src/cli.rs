use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use pixelplay_core::transform::TransformOp;

#[derive(Parser, Debug)]
#[command(name = "pixelplay", version, about = "Stretch, rotate and flip images, then keep them in a captioned collection")]
pub struct Cli {
    /// Collection database file (overrides `store.path` in the config).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to pixelplay.toml in the platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply transforms to an image file and write the result.
    Transform(TransformArgs),
    /// Save an image (optionally transformed) into the collection.
    Save(SaveArgs),
    /// List saved images, most recent first.
    List,
    /// Write a saved image to a file.
    Export(ExportArgs),
    /// Delete a saved image. Deleting an unknown id does nothing.
    Delete {
        /// Entry id.
        id: i64,
    },
    /// Print the number of saved images.
    Count,
}

#[derive(Parser, Debug)]
pub struct TransformArgs {
    /// Input PNG or JPEG.
    pub input: PathBuf,

    /// Transform to apply, in order: stretch-v=N, stretch-h=N, rotate=cw|ccw, flip-v, flip-h.
    #[arg(long = "op", required = true)]
    pub ops: Vec<TransformOp>,

    /// Output file.
    #[arg(long)]
    pub out: PathBuf,

    /// Output format (png or jpeg). Defaults to the output extension, then the config.
    #[arg(long)]
    pub format: Option<String>,
}

#[derive(Parser, Debug)]
pub struct SaveArgs {
    /// Input PNG or JPEG.
    pub input: PathBuf,

    /// Caption stored with the image.
    #[arg(long, default_value = "")]
    pub caption: String,

    /// Transforms to apply before saving.
    #[arg(long = "op")]
    pub ops: Vec<TransformOp>,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Entry id.
    pub id: i64,

    /// Output file.
    #[arg(long)]
    pub out: PathBuf,

    /// Output format (png or jpeg). Defaults to the output extension, then the config.
    #[arg(long)]
    pub format: Option<String>,
}
