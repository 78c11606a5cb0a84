//! File types recorded in mtree manifests
//!
//! The set is closed: an mtree `type=` value either resolves through
//! [`FileKind::from_str`] or the manifest is rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Mask selecting the file-type bits of `st_mode`
pub const S_IFMT: u32 = 0o170_000;

/// File type of a manifest entry, backed by the `st_mode` type bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Dir,
    Char,
    Block,
    File,
    Fifo,
    Link,
    Socket,
}

/// An mtree `type=` value outside the fixed table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown file type: {0}")]
pub struct UnknownFileKind(pub String);

impl FileKind {
    /// All kinds, in the order mtree documents them
    pub const ALL: [FileKind; 7] = [
        Self::Dir,
        Self::Char,
        Self::Block,
        Self::File,
        Self::Fifo,
        Self::Link,
        Self::Socket,
    ];

    /// The `S_IF*` bits this kind occupies in `st_mode`
    #[must_use]
    pub const fn mode_bits(self) -> u32 {
        match self {
            Self::Fifo => 0o010_000,
            Self::Char => 0o020_000,
            Self::Dir => 0o040_000,
            Self::Block => 0o060_000,
            Self::File => 0o100_000,
            Self::Link => 0o120_000,
            Self::Socket => 0o140_000,
        }
    }

    /// Classify a raw `st_mode`; `None` when the type bits match no known kind
    #[must_use]
    pub fn from_mode(mode: u32) -> Option<Self> {
        let bits = mode & S_IFMT;
        Self::ALL.into_iter().find(|kind| kind.mode_bits() == bits)
    }

    /// Keyword used for this kind in mtree files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dir => "dir",
            Self::Char => "char",
            Self::Block => "block",
            Self::File => "file",
            Self::Fifo => "fifo",
            Self::Link => "link",
            Self::Socket => "socket",
        }
    }
}

impl FromStr for FileKind {
    type Err = UnknownFileKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownFileKind(s.to_string()))
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_table() {
        assert_eq!("dir".parse::<FileKind>().unwrap(), FileKind::Dir);
        assert_eq!("file".parse::<FileKind>().unwrap(), FileKind::File);
        assert_eq!("link".parse::<FileKind>().unwrap().mode_bits(), 0o120_000);
        assert!("Dir".parse::<FileKind>().is_err());
        assert!("door".parse::<FileKind>().is_err());
    }

    #[test]
    fn test_from_mode() {
        assert_eq!(FileKind::from_mode(0o100_644), Some(FileKind::File));
        assert_eq!(FileKind::from_mode(0o040_755), Some(FileKind::Dir));
        assert_eq!(FileKind::from_mode(0o120_777), Some(FileKind::Link));
        assert_eq!(FileKind::from_mode(0o000_644), None);
    }

    #[test]
    fn test_kind_bits_are_distinct() {
        for a in FileKind::ALL {
            for b in FileKind::ALL {
                if a != b {
                    assert_ne!(a.mode_bits(), b.mode_bits());
                }
            }
            assert_eq!(a.mode_bits() & !S_IFMT, 0);
        }
    }
}
