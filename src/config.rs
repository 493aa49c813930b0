//! Command-line and environment configuration

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use temu_label::OutputPolicy;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render and print TEMU logistics labels")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Directory labels are saved to [default: ~/Documents/TEMU-Labels]
    #[arg(long, global = true, env = "TEMU_LABEL_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory holding NotoSansSC-Regular.ttf and NotoSansSC-Bold.ttf
    #[arg(long, global = true, env = "TEMU_LABEL_FONT_DIR", default_value = "fonts")]
    pub font_dir: PathBuf,

    /// Store name printed when none is given
    #[arg(long, global = true, env = "TEMU_LABEL_WAREHOUSE", default_value = "建闽店")]
    pub default_warehouse: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract label fields from pasted logistics text and print them as JSON
    Extract {
        /// Read the text from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Render a label, optionally sending it to the printer
    Render(RenderArgs),
    /// Send an existing label PDF to the system printer
    Print {
        path: PathBuf,
    },
    /// Open an existing label PDF in the default viewer
    Open {
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// JSON file with label fields (camelCase keys)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// File of pasted logistics text to extract fields from ("-" for stdin)
    #[arg(long)]
    pub from_text: Option<PathBuf>,

    /// Carrier / service name
    #[arg(long)]
    pub service_type: Option<String>,

    /// Tracking or contact number
    #[arg(long)]
    pub phone_number: Option<String>,

    /// Product code
    #[arg(long)]
    pub item_number: Option<String>,

    /// Unit count
    #[arg(long)]
    pub quantity: Option<u32>,

    /// Package count [default: 1]
    #[arg(long)]
    pub total_items: Option<u32>,

    /// Store name
    #[arg(long)]
    pub warehouse: Option<String>,

    /// Receiving warehouse / bin
    #[arg(long)]
    pub shipping_crate: Option<String>,

    /// Send the label to the system printer after rendering
    #[arg(long)]
    pub print: bool,

    /// Render even when required fields are empty
    #[arg(long)]
    pub allow_incomplete: bool,
}

/// Settings shared by every subcommand
#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    pub font_dir: PathBuf,
    pub default_warehouse: String,
}

impl Config {
    pub fn from_args(args: &GlobalArgs) -> Self {
        Config {
            output_dir: args
                .output_dir
                .clone()
                .unwrap_or_else(OutputPolicy::default_dir),
            font_dir: args.font_dir.clone(),
            default_warehouse: args.default_warehouse.clone(),
        }
    }
}
