//! Per-entry comparison of recorded attributes against the live filesystem

use crate::sigil::{Check, Sigil};
use pkgv_errors::GuardError;
use pkgv_hash::{hash_file_multi, DigestAlgorithm};
use pkgv_manifest::{Entry, ExpectedDigest};
use pkgv_types::{FileKind, Timestamp, S_IFMT};
use std::fs::Metadata;
use std::future::Future;
use std::io::ErrorKind;
use std::os::unix::fs::MetadataExt;

/// Permission, setuid, setgid and sticky bits
const PERMISSION_BITS: u32 = 0o7777;

/// Result of verifying one entry
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The path was inspected; the sigil says which checks failed
    Verified(Sigil),
    /// Nothing exists at the recorded path
    PathAbsent,
    /// The path could not be inspected for another reason
    StatError(GuardError),
}

impl Outcome {
    /// Whether the entry passed every check
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Verified(sigil) if sigil.is_pass())
    }
}

/// Verification of a manifest entry against the live filesystem
pub trait Verify {
    /// Inspect the entry's path and compare it with the recorded attributes
    ///
    /// Never fails: a missing path and a failed `lstat` are both part of the
    /// returned [`Outcome`]. Nothing on disk is modified.
    fn verify(&self) -> impl Future<Output = Outcome> + Send;
}

impl Verify for Entry {
    async fn verify(&self) -> Outcome {
        let metadata = match tokio::fs::symlink_metadata(&self.path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Outcome::PathAbsent,
            Err(e) => {
                return Outcome::StatError(GuardError::StatFailed {
                    path: self.path.display().to_string(),
                    message: e.to_string(),
                });
            }
        };

        let mut sigil = Sigil::pass();
        sigil.record(Check::Size, size_matches(self, &metadata));
        sigil.record(Check::Mode, mode_matches(self, &metadata));
        sigil.record(Check::Digest, digests_match(self, &metadata).await);
        sigil.record(Check::User, self.uid.is_none_or(|uid| uid == metadata.uid()));
        sigil.record(Check::Group, self.gid.is_none_or(|gid| gid == metadata.gid()));
        sigil.record(Check::Mtime, mtime_matches(self, &metadata));
        // Device, link target and capabilities are not compared

        Outcome::Verified(sigil)
    }
}

fn size_matches(entry: &Entry, metadata: &Metadata) -> bool {
    entry.kind != FileKind::File || entry.size.is_none_or(|size| size == metadata.size())
}

fn mode_matches(entry: &Entry, metadata: &Metadata) -> bool {
    let live = metadata.mode();
    match entry.mode {
        Some(_) => live & (S_IFMT | PERMISSION_BITS) == entry.expected_mode_bits(),
        None => live & S_IFMT == entry.kind.mode_bits(),
    }
}

fn mtime_matches(entry: &Entry, metadata: &Metadata) -> bool {
    if entry.kind == FileKind::Dir && entry.ignore_dir_mtime {
        return true;
    }
    entry.mtime.is_none_or(|recorded| {
        recorded == Timestamp::from_stat(metadata.mtime(), metadata.mtime_nsec())
    })
}

/// Recompute every recorded digest in one pass over the file
///
/// Unsupported algorithms and unreadable files count as a mismatch. Only a
/// live regular file is ever opened; devices and fifos could block forever.
async fn digests_match(entry: &Entry, metadata: &Metadata) -> bool {
    if entry.digests.is_empty() {
        return true;
    }
    if FileKind::from_mode(metadata.mode()) != Some(FileKind::File) {
        tracing::debug!(path = %entry.path.display(), "not a regular file, digest not computed");
        return false;
    }

    let mut expected: Vec<(DigestAlgorithm, &str)> = Vec::with_capacity(entry.digests.len());
    for digest in &entry.digests {
        match digest {
            ExpectedDigest::Supported { algorithm, hex } => expected.push((*algorithm, hex.as_str())),
            ExpectedDigest::Unsupported { key, .. } => {
                tracing::debug!(path = %entry.path.display(), key = %key, "unsupported digest");
                return false;
            }
        }
    }

    let algorithms: Vec<_> = expected.iter().map(|(algorithm, _)| *algorithm).collect();
    match hash_file_multi(&entry.path, &algorithms).await {
        Ok(actual) => actual
            .iter()
            .zip(&expected)
            .all(|(digest, (_, hex))| digest.matches_hex(hex)),
        Err(e) => {
            tracing::debug!(path = %entry.path.display(), error = %e, "cannot hash file");
            false
        }
    }
}
