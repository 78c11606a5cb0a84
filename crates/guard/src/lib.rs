#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Installed-file verification for pkgverify
//!
//! Each manifest [`Entry`](pkgv_manifest::Entry) is compared with the live
//! filesystem through the [`Verify`] trait, producing a nine-character
//! [`Sigil`]:
//!
//! ```text
//! SM5SLUGTP
//! ||||||||`- capabilities (never compared)
//! |||||||`-- mtime
//! ||||||`--- group
//! |||||`---- user
//! ||||`----- link target (never compared)
//! |||`------ device (never compared)
//! ||`------- content digests
//! |`-------- mode and file type
//! `--------- size
//! ```
//!
//! [`Verifier`] runs the checks for a whole manifest with bounded
//! concurrency and aggregates them into a [`VerificationReport`].

mod check;
mod report;
mod sigil;
mod verifier;

pub use check::{Outcome, Verify};
pub use report::{EntryReport, EntryStatus, VerificationReport, MISSING_SIGIL, STAT_ERROR_SIGIL};
pub use sigil::{Check, Sigil, SIGIL_WIDTH};
pub use verifier::{Verifier, VerifierConfig};
