//! Output Rendering
//!
//! Turns a deploy report, a fatal error or configuration warnings into the
//! text printed at the end of a run. Progress lines go through `tracing`;
//! only the final summary is rendered here.

use std::fmt::Write as _;

use crossterm::style::Stylize;
use is_terminal::IsTerminal;

use crate::application::DeployReport;
use crate::config::ConfigWarning;
use crate::error::{ErrorKind, UpsshError};

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    write: &'static str,
    warn: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            write: "→",
            warn: "⚠",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            write: "->",
            warn: "[!]",
        }
    }
}

/// Text renderer for the end-of-run summary
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    /// Whether to use colors
    pub color: bool,
    /// Whether to use unicode
    pub unicode: bool,
    /// Verbosity level; above 0 every uploaded file is listed
    pub verbose: u8,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            color: true,
            unicode: true,
            verbose: 0,
        }
    }
}

impl TextRenderer {
    /// Renderer for stdout: styled only on a terminal without `NO_COLOR`.
    pub fn for_stdout(verbose: u8) -> Self {
        let tty = std::io::stdout().is_terminal();
        Self {
            color: tty && std::env::var_os("NO_COLOR").is_none(),
            unicode: tty,
            verbose,
        }
    }

    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }

    fn green(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn red(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn yellow(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    /// Summary of a successful run
    pub fn render_report(&self, report: &DeployReport) -> String {
        let icons = self.icons();
        let mut out = String::new();

        let _ = writeln!(out, "{} Deploy Complete: {}", self.green(icons.check), report.name);
        let _ = writeln!(out);
        if let Some(home) = &report.backup_home {
            let _ = writeln!(out, "  Backup home: {}", home);
        }

        for task in &report.tasks {
            let _ = writeln!(
                out,
                "  Task ({}): {} {} {}",
                task.index,
                task.source.display(),
                icons.write,
                task.target
            );
            match &task.backup {
                Some(backup) => {
                    let _ = writeln!(out, "    backup: {}", backup);
                }
                None => {
                    let _ = writeln!(out, "    backup: none (target was absent)");
                }
            }
            let _ = writeln!(
                out,
                "    {} files uploaded, {} directories created, {} ignored",
                task.sync.upload_count(),
                task.sync.created_dirs.len(),
                task.sync.ignored.len()
            );
            if self.verbose > 0 {
                for upload in &task.sync.uploads {
                    let _ = writeln!(out, "      {} {}", icons.write, upload.remote);
                }
            }
            for path in &task.sync.unsupported {
                let _ = writeln!(
                    out,
                    "    {} skipped unsupported entry {}",
                    self.yellow(icons.warn),
                    path.display()
                );
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  {} tasks, {} files uploaded, {} directories created, {} ignored",
            report.tasks.len(),
            report.upload_count(),
            report.created_dir_count(),
            report.ignored_count()
        );
        if report.unsupported_count() > 0 {
            let _ = writeln!(
                out,
                "  {} {} unsupported entries skipped",
                self.yellow(icons.warn),
                report.unsupported_count()
            );
        }
        out
    }

    /// Message for a fatal error
    pub fn render_error(&self, err: &UpsshError) -> String {
        let label = match err.kind() {
            ErrorKind::Configuration => "Configuration error",
            ErrorKind::Validation => "Validation error",
            ErrorKind::RemoteOperation => "Remote operation failed",
            ErrorKind::LocalIo => "Local I/O error",
        };
        format!("{} {}: {}\n", self.red(self.icons().cross), label, err)
    }

    /// One line per unknown play-file key
    pub fn render_warnings(&self, warnings: &[ConfigWarning]) -> String {
        let icons = self.icons();
        warnings
            .iter()
            .map(|w| format!("{} {}\n", self.yellow(icons.warn), w))
            .collect()
    }
}
