//! Command line interface definition

use clap::{ArgAction, ArgGroup, Parser};
use pkgv_types::{ColorChoice, StatErrorPolicy};
use std::path::PathBuf;

/// pkgverify - Verify installed package files against their mtree manifest
#[derive(Parser, Debug)]
#[command(name = "pkgverify")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Verify installed package files against their mtree manifest")]
#[command(long_about = None)]
#[command(group(ArgGroup::new("target").required(true).args(["package", "mtree"])))]
pub struct Cli {
    /// Installed package to verify, resolved through pacman
    #[arg(value_name = "PACKAGE")]
    pub package: Option<String>,

    /// Verify this manifest file instead of an installed package
    #[arg(long, value_name = "FILE")]
    pub mtree: Option<PathBuf>,

    /// Alternate root prefixed to every manifest path
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Do not compare modification times of directories
    #[arg(long)]
    pub ignore_dir_mtime: bool,

    /// Number of entries verified concurrently (0=auto)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// What to do with paths that exist but cannot be inspected
    #[arg(long, value_enum, value_name = "POLICY")]
    pub stat_errors: Option<StatErrorPolicy>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Output and configuration flags
#[derive(Parser, Debug)]
pub struct GlobalArgs {
    /// Print passing entries too; twice enables debug logging
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Print nothing, only set the exit status
    #[arg(short, long)]
    pub quiet: bool,

    /// Output the verification report as JSON
    #[arg(long)]
    pub json: bool,

    /// Color output control
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// Whether debug logging was requested
    pub fn debug(&self) -> bool {
        self.verbose >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_package_or_mtree_required() {
        assert!(Cli::try_parse_from(["pkgverify"]).is_err());
        assert!(Cli::try_parse_from(["pkgverify", "bash", "--mtree", "mtree"]).is_err());

        let cli = Cli::try_parse_from(["pkgverify", "--mtree", "/tmp/mtree", "-r", "/mnt"]).unwrap();
        assert_eq!(cli.mtree, Some(PathBuf::from("/tmp/mtree")));
        assert_eq!(cli.root, Some(PathBuf::from("/mnt")));
        assert!(cli.package.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "pkgverify",
            "bash",
            "-vv",
            "--jobs",
            "8",
            "--stat-errors",
            "report",
            "--color",
            "never",
            "--ignore-dir-mtime",
        ])
        .unwrap();
        assert_eq!(cli.package.as_deref(), Some("bash"));
        assert!(cli.global.debug());
        assert_eq!(cli.jobs, Some(8));
        assert_eq!(cli.stat_errors, Some(StatErrorPolicy::Report));
        assert_eq!(cli.global.color, Some(ColorChoice::Never));
        assert!(cli.ignore_dir_mtime);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["pkgverify", "bash", "-q", "-v"]).is_err());
    }
}
