//! Manifest entries and their normalized attributes

use crate::defaults::Attributes;
use pkgv_errors::ManifestError;
use pkgv_hash::DigestAlgorithm;
use pkgv_types::{FileKind, Timestamp};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Highest value a recorded `mode=` may take
const MAX_MODE: u32 = 0o7777;

/// Per-run options applied to every entry of a manifest
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Prefix for every entry path instead of the manifest-relative path
    pub root: Option<PathBuf>,
    /// Skip the mtime comparison for directories
    pub ignore_dir_mtime: bool,
}

impl ParseOptions {
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    #[must_use]
    pub fn ignore_dir_mtime(mut self, ignore: bool) -> Self {
        self.ignore_dir_mtime = ignore;
        self
    }
}

/// A recorded digest, resolved against the algorithm registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExpectedDigest {
    Supported {
        algorithm: DigestAlgorithm,
        hex: String,
    },
    /// A `*digest` keyword naming an algorithm outside the registry
    Unsupported { key: String, hex: String },
}

impl ExpectedDigest {
    fn from_keyword(key: &str, hex: &str) -> Self {
        match DigestAlgorithm::from_key(key) {
            Some(algorithm) => Self::Supported {
                algorithm,
                hex: hex.to_ascii_lowercase(),
            },
            None => Self::Unsupported {
                key: key.to_string(),
                hex: hex.to_string(),
            },
        }
    }
}

/// One recorded path with the attributes it is expected to have
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// Path relative to the manifest root, `./` stripped and escapes decoded
    pub relative: PathBuf,
    /// Path that is inspected on disk
    pub path: PathBuf,
    pub kind: FileKind,
    /// Permission bits only, never the type bits
    pub mode: Option<u32>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub size: Option<u64>,
    pub mtime: Option<Timestamp>,
    pub digests: Vec<ExpectedDigest>,
    /// Keywords that are carried along but not compared (`link`, `nlink`, ...)
    pub extra: BTreeMap<String, String>,
    pub ignore_dir_mtime: bool,
}

impl Entry {
    /// Build an entry from fully resolved attributes
    ///
    /// `attrs` must already contain the defaults overlay; `line` is only used
    /// for error reporting.
    ///
    /// # Errors
    /// Returns an error for an unknown `type=` value or a numeric keyword
    /// whose value does not parse.
    pub fn from_attributes(
        relative: PathBuf,
        attrs: &Attributes,
        options: &ParseOptions,
        line: usize,
    ) -> Result<Self, ManifestError> {
        let kind = match attrs.get("type") {
            Some(value) => FileKind::from_str(value).map_err(|_| ManifestError::UnknownType {
                line,
                value: value.clone(),
            })?,
            None => FileKind::File,
        };

        let mut entry = Self {
            path: resolve_path(&relative, options.root.as_deref()),
            relative,
            kind,
            mode: None,
            uid: None,
            gid: None,
            size: None,
            mtime: None,
            digests: Vec::new(),
            extra: BTreeMap::new(),
            ignore_dir_mtime: options.ignore_dir_mtime,
        };

        for (key, value) in attrs {
            let invalid = || ManifestError::InvalidValue {
                line,
                key: key.clone(),
                value: value.clone(),
            };

            match key.as_str() {
                "type" => {}
                // Unsigned fields take bare digits only, no `+` or whitespace
                "mode" | "uid" | "gid" | "size"
                    if !value.starts_with(|c: char| c.is_ascii_digit()) =>
                {
                    return Err(invalid());
                }
                "mode" => {
                    let mode = u32::from_str_radix(value, 8).map_err(|_| invalid())?;
                    if mode > MAX_MODE {
                        return Err(invalid());
                    }
                    entry.mode = Some(mode);
                }
                "uid" => entry.uid = Some(value.parse().map_err(|_| invalid())?),
                "gid" => entry.gid = Some(value.parse().map_err(|_| invalid())?),
                "size" => entry.size = Some(value.parse().map_err(|_| invalid())?),
                "time" => entry.mtime = Some(value.parse().map_err(|_| invalid())?),
                k if DigestAlgorithm::is_digest_key(k) => {
                    entry.digests.push(ExpectedDigest::from_keyword(k, value));
                }
                _ => {
                    entry.extra.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(entry)
    }

    /// Recorded type and permission bits merged the way `st_mode` holds them
    #[must_use]
    pub fn expected_mode_bits(&self) -> u32 {
        self.kind.mode_bits() | self.mode.unwrap_or(0)
    }
}

fn resolve_path(relative: &Path, root: Option<&Path>) -> PathBuf {
    match root {
        Some(root) => root.join(relative),
        None => relative.to_path_buf(),
    }
}
