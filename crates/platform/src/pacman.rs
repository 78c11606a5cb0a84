//! Resolving installed pacman packages to their mtree manifests

use crate::core::PlatformContext;
use crate::process::{HostProcessOperations, PlatformCommand, ProcessOperations};
use pkgv_errors::{Error, PlatformError};
use pkgv_events::{AppEvent, EventEmitter, PlatformEvent};
use std::fmt;
use std::path::{Path, PathBuf};

/// Name and version of an installed package as reported by `pacman -Q`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
}

impl InstalledPackage {
    /// Location of the package's manifest inside the local database
    #[must_use]
    pub fn mtree_path(&self, db_path: &Path) -> PathBuf {
        db_path
            .join("local")
            .join(format!("{}-{}", self.name, self.version))
            .join("mtree")
    }
}

impl fmt::Display for InstalledPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Parse the `<name> <version>` line printed by `pacman -Q <name>`
///
/// # Errors
/// Returns `PlatformError::QueryFailed` if the output is not a single
/// name/version pair.
pub fn parse_query_output(command: &str, stdout: &str) -> Result<InstalledPackage, PlatformError> {
    let failed = || PlatformError::QueryFailed {
        command: command.to_string(),
        output: stdout.trim().to_string(),
    };

    let line = stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(failed)?;

    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(name), Some(version), None) => Ok(InstalledPackage {
            name: name.to_string(),
            version: version.to_string(),
        }),
        _ => Err(failed()),
    }
}

/// Client for the pacman binary and its local database
pub struct Pacman {
    binary: PathBuf,
    db_path: PathBuf,
    process: Box<dyn ProcessOperations>,
}

impl Pacman {
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>, db_path: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            db_path: db_path.into(),
            process: Box::new(HostProcessOperations),
        }
    }

    /// Run commands through `process` instead of the host
    #[must_use]
    pub fn with_process_operations(mut self, process: Box<dyn ProcessOperations>) -> Self {
        self.process = process;
        self
    }

    /// Look up the installed version of `name`
    ///
    /// # Errors
    /// Returns an error if pacman cannot be run, reports the package as not
    /// installed, or prints something other than a name/version pair.
    pub async fn query(
        &self,
        ctx: &PlatformContext,
        name: &str,
    ) -> Result<InstalledPackage, Error> {
        let mut cmd = PlatformCommand::new(&self.binary);
        cmd.args(["-Q", "--", name]).env("LC_ALL", "C");
        let command = cmd.display();

        let output = self.process.execute_command(ctx, cmd).await?;
        if !output.status.success() {
            tracing::debug!(
                command = %command,
                stderr = %output.stderr_str().trim(),
                "package query failed"
            );
            return Err(PlatformError::PackageNotInstalled {
                package: name.to_string(),
            }
            .into());
        }

        Ok(parse_query_output(&command, &output.stdout_str())?)
    }

    /// Resolve `name` to its installed version and manifest path
    ///
    /// # Errors
    /// Returns an error if the package query fails.
    pub async fn resolve_manifest(
        &self,
        ctx: &PlatformContext,
        name: &str,
    ) -> Result<(InstalledPackage, PathBuf), Error> {
        let package = self.query(ctx, name).await?;
        let manifest = package.mtree_path(&self.db_path);

        ctx.emit(AppEvent::Platform(PlatformEvent::PackageResolved {
            package: package.name.clone(),
            version: package.version.clone(),
            manifest: manifest.display().to_string(),
        }));

        Ok((package, manifest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_output() {
        let package = parse_query_output("pacman -Q bash", "bash 5.2.037-1\n").unwrap();
        assert_eq!(
            package,
            InstalledPackage {
                name: "bash".to_string(),
                version: "5.2.037-1".to_string()
            }
        );
        assert_eq!(package.to_string(), "bash 5.2.037-1");
    }

    #[test]
    fn test_parse_query_output_rejects_garbage() {
        for output in ["", "\n\n", "bash\n", "bash 5.2 extra\n"] {
            let err = parse_query_output("pacman -Q bash", output).unwrap_err();
            assert!(matches!(err, PlatformError::QueryFailed { .. }), "{output:?}");
        }
    }

    #[test]
    fn test_mtree_path() {
        let package = InstalledPackage {
            name: "linux-firmware".to_string(),
            version: "20250109.7673dffd-1".to_string(),
        };
        assert_eq!(
            package.mtree_path(Path::new("/var/lib/pacman")),
            PathBuf::from("/var/lib/pacman/local/linux-firmware-20250109.7673dffd-1/mtree")
        );
    }
}
