#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Content digests for pkgverify
//!
//! This crate maps mtree digest keywords (`md5digest`, `sha256digest`, ...)
//! onto a closed set of hash algorithms and computes file digests by
//! streaming the content through the algorithm's incremental hasher.

mod file_hasher;

pub use file_hasher::{hash_file_multi, CHUNK_SIZE};

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest as _, Sha256, Sha384, Sha512};
use std::fmt;

/// Suffix shared by every mtree digest keyword
pub const DIGEST_KEY_SUFFIX: &str = "digest";

/// Hash algorithms understood by the verifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// Every supported algorithm
    pub const ALL: [DigestAlgorithm; 5] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
    ];

    /// Short algorithm name (`sha256`)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Length of the digest in bytes
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Resolve an mtree digest keyword such as `sha256digest`
    ///
    /// Returns `None` for keys that are not digest keywords and for digest
    /// keywords naming an algorithm outside the registry (`rmd160digest`).
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let name = key.strip_suffix(DIGEST_KEY_SUFFIX)?;
        Self::ALL.into_iter().find(|alg| alg.name() == name)
    }

    /// Whether `key` is an mtree digest keyword, supported or not
    #[must_use]
    pub fn is_digest_key(key: &str) -> bool {
        key.len() > DIGEST_KEY_SUFFIX.len() && key.ends_with(DIGEST_KEY_SUFFIX)
    }

    /// Fresh incremental hasher for this algorithm
    #[must_use]
    pub fn hasher(self) -> Hasher {
        match self {
            Self::Md5 => Hasher::Md5(Md5::new()),
            Self::Sha1 => Hasher::Sha1(Sha1::new()),
            Self::Sha256 => Hasher::Sha256(Sha256::new()),
            Self::Sha384 => Hasher::Sha384(Sha384::new()),
            Self::Sha512 => Hasher::Sha512(Sha512::new()),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Incremental hasher for one registry algorithm
#[derive(Clone)]
pub enum Hasher {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
}

impl Hasher {
    /// Feed a block of data
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(h) => h.update(data),
            Self::Sha1(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
            Self::Sha384(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
        }
    }

    /// Consume the hasher and produce the digest
    #[must_use]
    pub fn finalize(self) -> Digest {
        let (algorithm, bytes) = match self {
            Self::Md5(h) => (DigestAlgorithm::Md5, h.finalize().to_vec()),
            Self::Sha1(h) => (DigestAlgorithm::Sha1, h.finalize().to_vec()),
            Self::Sha256(h) => (DigestAlgorithm::Sha256, h.finalize().to_vec()),
            Self::Sha384(h) => (DigestAlgorithm::Sha384, h.finalize().to_vec()),
            Self::Sha512(h) => (DigestAlgorithm::Sha512, h.finalize().to_vec()),
        };
        Digest { algorithm, bytes }
    }
}

/// A computed digest together with the algorithm that produced it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    algorithm: DigestAlgorithm,
    bytes: Vec<u8>,
}

impl Digest {
    /// Compute the digest of a byte slice
    #[must_use]
    pub fn from_data(algorithm: DigestAlgorithm, data: &[u8]) -> Self {
        let mut hasher = algorithm.hasher();
        hasher.update(data);
        hasher.finalize()
    }

    /// Algorithm used
    #[must_use]
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Get the raw bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Convert to lowercase hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Compare against a recorded hex string
    ///
    /// mtree writes lowercase hex; uppercase input is accepted as well.
    #[must_use]
    pub fn matches_hex(&self, expected: &str) -> bool {
        expected.len() == self.algorithm.output_len() * 2
            && self.to_hex().eq_ignore_ascii_case(expected)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests;
