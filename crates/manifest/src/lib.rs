#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! mtree manifest handling for pkgverify
//!
//! This crate reads the `mtree` file a package manager records for every
//! installed package and turns it into an ordered list of [`Entry`] values,
//! each holding the normalized attributes the live file is expected to have.
//!
//! The format is line oriented:
//!
//! ```text
//! #mtree
//! /set type=file uid=0 gid=0 mode=644
//! ./usr/bin/tool time=1695042345.0 mode=755 size=18432 sha256digest=...
//! /unset mode
//! ```
//!
//! `/set` and `/unset` directives update [`AttributeDefaults`], which seed the
//! attributes of every following data line.

mod defaults;
mod entry;
mod escape;
mod parser;
mod reader;

pub use defaults::{AttributeDefaults, Attributes};
pub use entry::{Entry, ExpectedDigest, ParseOptions};
pub use parser::{parse_manifest, EXCLUDED_PATHS};
pub use reader::{decode_manifest, load_manifest, read_manifest, GZIP_MAGIC};
