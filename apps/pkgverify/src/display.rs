//! Output rendering and formatting

use console::{Style, Term};
use pkgv_guard::{EntryReport, EntryStatus, VerificationReport};
use pkgv_types::{ColorChoice, OutputFormat};
use std::io::{self, Write};

/// Output renderer for verification reports
#[derive(Debug, Clone)]
pub struct OutputRenderer {
    format: OutputFormat,
    colors: bool,
    /// 0 prints failing entries, 1 and above adds passing entries
    verbosity: u8,
    quiet: bool,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat, color_choice: ColorChoice, verbosity: u8, quiet: bool) -> Self {
        let colors = format == OutputFormat::Tty && colors_enabled(color_choice);
        Self {
            format,
            colors,
            verbosity,
            quiet,
        }
    }

    /// Render the finished report to stdout
    pub fn render_report(&self, report: &VerificationReport) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let stdout = io::stdout();
        let mut out = stdout.lock();
        if self.format == OutputFormat::Json {
            let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
            writeln!(out, "{json}")?;
        } else {
            self.render_lines(&mut out, report)?;
        }
        out.flush()?;

        if self.format == OutputFormat::Tty {
            self.render_summary(report)?;
        }
        Ok(())
    }

    fn render_lines(&self, out: &mut impl Write, report: &VerificationReport) -> io::Result<()> {
        for entry in &report.entries {
            if entry.is_pass() && self.verbosity == 0 {
                continue;
            }
            writeln!(out, "{}", self.format_entry(entry))?;
        }
        Ok(())
    }

    /// Totals go to stderr so stdout only ever holds entry lines
    fn render_summary(&self, report: &VerificationReport) -> io::Result<()> {
        let status = if report.is_valid() {
            self.style(Style::new().green().bold(), "OK")
        } else {
            self.style(Style::new().red().bold(), "FAILED")
        };
        Term::stderr().write_line(&format!(
            "{status} {}: {} entries, {} passed, {} failed, {} missing",
            report.scope.label(),
            report.total,
            report.passed,
            report.failed,
            report.missing
        ))
    }

    /// The `<sigil>  <path>` line, with the sigil colored by status
    pub fn format_entry(&self, entry: &EntryReport) -> String {
        let style = match entry.status {
            EntryStatus::Passed => Style::new().dim(),
            EntryStatus::Failed => Style::new().red(),
            EntryStatus::Missing => Style::new().yellow(),
            EntryStatus::Unreadable => Style::new().magenta(),
        };
        format!("{}  {}", self.style(style, &entry.sigil), entry.path.display())
    }

    fn style(&self, style: Style, text: &str) -> String {
        if self.colors {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Resolve a color choice against the attached terminal
pub fn colors_enabled(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => Term::stdout().features().colors_supported(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgv_events::GuardScope;
    use std::path::PathBuf;

    fn entry(status: EntryStatus, sigil: &str) -> EntryReport {
        EntryReport {
            path: PathBuf::from("/usr/bin/tool"),
            status,
            sigil: sigil.to_string(),
            failed_checks: Vec::new(),
            message: None,
        }
    }

    fn report() -> VerificationReport {
        VerificationReport::new(
            "op".to_string(),
            GuardScope::Manifest {
                path: "mtree".to_string(),
            },
            vec![
                entry(EntryStatus::Passed, "........."),
                entry(EntryStatus::Failed, "S.......P"),
                entry(EntryStatus::Missing, "---------"),
            ],
            3,
        )
    }

    #[test]
    fn test_plain_lines_skip_passing_entries() {
        let renderer = OutputRenderer::new(OutputFormat::Plain, ColorChoice::Always, 0, false);
        let mut out = Vec::new();
        renderer.render_lines(&mut out, &report()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "S.......P  /usr/bin/tool\n---------  /usr/bin/tool\n"
        );
    }

    #[test]
    fn test_verbose_lines_include_passing_entries() {
        let renderer = OutputRenderer::new(OutputFormat::Plain, ColorChoice::Never, 1, false);
        let mut out = Vec::new();
        renderer.render_lines(&mut out, &report()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_colored_sigil() {
        let renderer = OutputRenderer::new(OutputFormat::Tty, ColorChoice::Always, 0, false);
        let line = renderer.format_entry(&entry(EntryStatus::Failed, "S........"));
        assert!(line.contains("\u{1b}["), "{line:?}");
        assert!(line.ends_with("  /usr/bin/tool"));
        assert_eq!(console::strip_ansi_codes(&line), "S........  /usr/bin/tool");
    }
}
