//! Command-line front-end for rendering and printing labels
//!
//! - `extract`: pasted logistics text → JSON label fields
//! - `render`: label fields → PDF label, optionally printed
//! - `print`: existing PDF → system printer
//! - `open`: existing PDF → default viewer
//!
//! A label that was rendered but could not be printed exits with status 2.

mod config;

use anyhow::{bail, Context};
use clap::Parser;
use config::{Cli, Command, Config, RenderArgs};
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use temu_label::print::{system_printer, system_viewer, Printer};
use temu_label::{extract_fields, FontDir, LabelData, LabelRenderer, OutputPolicy, PrintError};

/// Exit status of `render --print` when the label was saved but printing failed
const PRINT_FAILED: u8 = 2;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "temu_label=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_args(&cli.global);

    match cli.command {
        Command::Extract { input } => {
            let text = read_text(input.as_deref())?;
            let fields = extract_fields(&text);
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
        Command::Render(args) => return render(&config, args),
        Command::Print { path } => print(&path)?,
        Command::Open { path } => open(&path)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn read_text(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Defaults, then the JSON file, then extracted text, then explicit flags
fn collect_label(config: &Config, args: &RenderArgs) -> anyhow::Result<LabelData> {
    let mut data = match &args.data {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<LabelData>(&json)
                .with_context(|| format!("{} is not valid label JSON", path.display()))?
        }
        None => LabelData::with_defaults(config.default_warehouse.as_str(), 1),
    };
    if data.warehouse.is_empty() {
        data.warehouse = config.default_warehouse.clone();
    }

    if let Some(path) = &args.from_text {
        let text = read_text(Some(path.as_path()))?;
        data.apply(extract_fields(&text));
    }

    let overrides = [
        (&mut data.service_type, &args.service_type),
        (&mut data.phone_number, &args.phone_number),
        (&mut data.item_number, &args.item_number),
        (&mut data.warehouse, &args.warehouse),
        (&mut data.shipping_crate, &args.shipping_crate),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            *field = value.clone();
        }
    }
    if let Some(quantity) = args.quantity {
        data.quantity = quantity;
    }
    if let Some(total_items) = args.total_items {
        data.total_items = total_items;
    }

    Ok(data)
}

fn render(config: &Config, args: RenderArgs) -> anyhow::Result<ExitCode> {
    let data = collect_label(config, &args)?;

    let missing = data.missing_fields();
    if !missing.is_empty() && !args.allow_incomplete {
        bail!(
            "missing label fields: {} (pass --allow-incomplete to render anyway)",
            missing.join(", ")
        );
    }

    let renderer = LabelRenderer::new(
        FontDir::new(&config.font_dir),
        OutputPolicy::new(&config.output_dir),
    );
    let label = renderer.render(data).context("failed to render label")?;
    for warning in &label.warnings {
        eprintln!("warning: {warning}");
    }
    println!("标签已生成: {}", label.path.display());

    if args.print {
        return Ok(ExitCode::from(print_rendered(system_printer(), &label.path)));
    }

    Ok(ExitCode::SUCCESS)
}

/// Print a freshly rendered label; the label is already saved, so a failure here
/// is reported through the exit status instead of as an error
fn print_rendered<P: Printer>(printer: Result<P, PrintError>, path: &Path) -> u8 {
    match printer.and_then(|printer| printer.print(path)) {
        Ok(()) => {
            println!("标签已发送到打印机");
            0
        }
        Err(err) => {
            eprintln!("打印失败: {err}");
            PRINT_FAILED
        }
    }
}

fn print(path: &Path) -> anyhow::Result<()> {
    let printer = system_printer()?;
    printer
        .print(path)
        .with_context(|| format!("failed to print {}", path.display()))
}

fn open(path: &Path) -> anyhow::Result<()> {
    let viewer = system_viewer()?;
    viewer
        .print(path)
        .with_context(|| format!("failed to open {}", path.display()))
}
