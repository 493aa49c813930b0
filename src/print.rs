//! Hands rendered labels to the operating system's print spooler.
//!
//! Supports:
//! - Windows: SumatraPDF, then Adobe Reader, then the shell's HTML print verb
//! - Linux and macOS: CUPS `lpr`
//!
//! Opening a label for viewing goes through the same command runner.

use crate::PrintError;
use std::path::Path;
use std::process::Command;

/// Trait for print strategies
pub trait Printer {
    /// Send a finished PDF file to the printer
    fn print(&self, path: &Path) -> Result<(), PrintError>;
}

/// Runs one external program with the PDF path appended to its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPrinter {
    program: String,
    args: Vec<String>,
}

impl CommandPrinter {
    pub fn new<S: Into<String>>(program: S) -> Self {
        CommandPrinter {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Printer for CommandPrinter {
    fn print(&self, path: &Path) -> Result<(), PrintError> {
        tracing::info!(program = %self.program, path = %path.display(), "running label command");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|source| PrintError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(PrintError::Failed {
                program: self.program.clone(),
                status,
            })
        }
    }
}

/// Tries each printer in turn until one succeeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPrinter {
    chain: Vec<CommandPrinter>,
}

impl FallbackPrinter {
    pub fn new(chain: Vec<CommandPrinter>) -> Self {
        FallbackPrinter { chain }
    }

    pub fn chain(&self) -> &[CommandPrinter] {
        &self.chain
    }
}

impl Printer for FallbackPrinter {
    fn print(&self, path: &Path) -> Result<(), PrintError> {
        let mut last_error = PrintError::NoCommands;
        for printer in &self.chain {
            match printer.print(path) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    tracing::warn!(program = %printer.program, error = %err, "print command failed");
                    last_error = err;
                }
            }
        }
        Err(last_error)
    }
}

/// Pick the print strategy for an operating system name as reported by
/// [std::env::consts::OS]
pub fn system_printer_for(os: &str) -> Result<FallbackPrinter, PrintError> {
    let chain = match os {
        "windows" => vec![
            CommandPrinter::new("SumatraPDF.exe")
                .arg("-print-to-default")
                .arg("-silent"),
            CommandPrinter::new("AcroRd32.exe").arg("/t"),
            CommandPrinter::new("rundll32.exe").arg("mshtml.dll,PrintHTML"),
        ],
        "linux" | "macos" => vec![CommandPrinter::new("lpr")],
        other => return Err(PrintError::UnsupportedPlatform(other.to_string())),
    };
    Ok(FallbackPrinter::new(chain))
}

/// The print strategy for the host this binary runs on
pub fn system_printer() -> Result<FallbackPrinter, PrintError> {
    system_printer_for(std::env::consts::OS)
}

/// The command that opens a file in the desktop's default PDF viewer. Viewers
/// are launched, not waited on, so success only means the launcher started.
pub fn system_viewer_for(os: &str) -> Result<CommandPrinter, PrintError> {
    match os {
        "windows" => Ok(CommandPrinter::new("cmd").arg("/C").arg("start").arg("")),
        "macos" => Ok(CommandPrinter::new("open")),
        "linux" | "freebsd" | "openbsd" | "netbsd" => Ok(CommandPrinter::new("xdg-open")),
        other => Err(PrintError::UnsupportedPlatform(other.to_string())),
    }
}

pub fn system_viewer() -> Result<CommandPrinter, PrintError> {
    system_viewer_for(std::env::consts::OS)
}
