//! Host package manager integration for pkgverify
//!
//! This crate resolves an installed package to the mtree manifest recorded
//! for it. Commands run through the [`ProcessOperations`] seam so that every
//! execution emits platform events and tests can substitute canned output.

pub mod core;
pub mod pacman;
pub mod process;

pub use core::PlatformContext;
pub use pacman::{parse_query_output, InstalledPackage, Pacman};
pub use process::{CommandOutput, HostProcessOperations, PlatformCommand, ProcessOperations};
