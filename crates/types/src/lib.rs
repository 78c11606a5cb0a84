#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for pkgverify
//!
//! This crate provides the value types shared by the manifest parser, the
//! verification engine and the CLI.

pub mod kind;
pub mod time;

// Re-export commonly used types
pub use kind::{FileKind, UnknownFileKind, S_IFMT};
pub use time::{InvalidTimestamp, Timestamp};

use serde::{Deserialize, Serialize};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Tty,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Tty
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}

// Implement clap::ValueEnum for ColorChoice
impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::Auto
    }
}

/// What to do when a recorded path exists but cannot be inspected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatErrorPolicy {
    /// Stop the whole run with an error
    Abort,
    /// Report the entry as failed and keep going
    Report,
}

impl clap::ValueEnum for StatErrorPolicy {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Abort, Self::Report]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Abort => clap::builder::PossibleValue::new("abort"),
            Self::Report => clap::builder::PossibleValue::new("report"),
        })
    }
}

impl Default for StatErrorPolicy {
    fn default() -> Self {
        Self::Abort
    }
}

impl std::str::FromStr for StatErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(Self::Abort),
            "report" => Ok(Self::Report),
            other => Err(format!("unknown stat error policy: {other}")),
        }
    }
}
