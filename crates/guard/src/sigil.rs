//! Fixed-width pass/fail codes

use serde::{Serialize, Serializer};
use std::fmt;

/// Number of checks, and characters, in a sigil
pub const SIGIL_WIDTH: usize = 9;

const PASS: u8 = b'.';

/// One position of the sigil, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    Size,
    Mode,
    Digest,
    Device,
    LinkTarget,
    User,
    Group,
    Mtime,
    Capabilities,
}

impl Check {
    pub const ALL: [Check; SIGIL_WIDTH] = [
        Self::Size,
        Self::Mode,
        Self::Digest,
        Self::Device,
        Self::LinkTarget,
        Self::User,
        Self::Group,
        Self::Mtime,
        Self::Capabilities,
    ];

    /// Zero-based column of this check
    #[must_use]
    pub const fn position(self) -> usize {
        self as usize
    }

    /// Character written when the check fails
    #[must_use]
    pub fn code(self) -> char {
        char::from(self.code_byte())
    }

    const fn code_byte(self) -> u8 {
        match self {
            // Device shares the size code
            Self::Size | Self::Device => b'S',
            Self::Mode => b'M',
            Self::Digest => b'5',
            Self::LinkTarget => b'L',
            Self::User => b'U',
            Self::Group => b'G',
            Self::Mtime => b'T',
            Self::Capabilities => b'P',
        }
    }
}

/// Nine-character verification result, `.` for every passing check
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sigil([u8; SIGIL_WIDTH]);

impl Sigil {
    /// Every check passing: `.........`
    #[must_use]
    pub const fn pass() -> Self {
        Self([PASS; SIGIL_WIDTH])
    }

    /// Mark `check` as failed
    pub fn fail(&mut self, check: Check) {
        self.0[check.position()] = check.code_byte();
    }

    /// Record the result of `check`
    pub fn record(&mut self, check: Check, passed: bool) {
        if !passed {
            self.fail(check);
        }
    }

    #[must_use]
    pub fn failed(&self, check: Check) -> bool {
        self.0[check.position()] != PASS
    }

    /// Every failed check in output order
    #[must_use]
    pub fn failed_checks(&self) -> Vec<Check> {
        Check::ALL
            .into_iter()
            .filter(|check| self.failed(*check))
            .collect()
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.0.iter().all(|&c| c == PASS)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only `.` and the ASCII check codes are ever stored
        std::str::from_utf8(&self.0).unwrap_or("?????????")
    }
}

impl Default for Sigil {
    fn default() -> Self {
        Self::pass()
    }
}

impl fmt::Display for Sigil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Sigil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sigil({})", self.as_str())
    }
}

impl Serialize for Sigil {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
