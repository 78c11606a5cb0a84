//! Decoding of the escape sequences mtree uses in path names
//!
//! Writers encode whitespace, `#` and non-printable bytes so that a path is
//! always a single token, e.g. `./usr/share/My\040File`.

use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;
use std::path::PathBuf;

/// Decode an mtree-escaped path token into a filesystem path
pub(crate) fn unescape_path(raw: &str) -> PathBuf {
    PathBuf::from(OsString::from_vec(unescape_bytes(raw.as_bytes())))
}

fn unescape_bytes(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        if raw[i] != b'\\' || i + 1 == raw.len() {
            out.push(raw[i]);
            i += 1;
            continue;
        }

        let next = raw[i + 1];
        if let Some(byte) = octal_triplet(&raw[i + 1..]) {
            out.push(byte);
            i += 4;
            continue;
        }

        let decoded = match next {
            b's' => Some(b' '),
            b't' => Some(b'\t'),
            b'n' => Some(b'\n'),
            b'r' => Some(b'\r'),
            b'\\' => Some(b'\\'),
            b'#' => Some(b'#'),
            _ => None,
        };
        match decoded {
            Some(byte) => {
                out.push(byte);
                i += 2;
            }
            None => {
                // Unknown escape, keep it verbatim
                out.push(b'\\');
                i += 1;
            }
        }
    }

    out
}

/// Three octal digits encoding one byte
fn octal_triplet(bytes: &[u8]) -> Option<u8> {
    let digits = bytes.get(..3)?;
    if !digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
        return None;
    }
    let value = digits
        .iter()
        .fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
    u8::try_from(value).ok()
}

/// Byte offset of the first `#` that is not escaped with a backslash
pub(crate) fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\\' if !escaped => escaped = true,
            b'#' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_unchanged() {
        assert_eq!(unescape_path("usr/bin/ls"), PathBuf::from("usr/bin/ls"));
    }

    #[test]
    fn test_octal_escapes() {
        assert_eq!(
            unescape_path("usr/share/My\\040File"),
            PathBuf::from("usr/share/My File")
        );
        assert_eq!(unescape_path("a\\043b"), PathBuf::from("a#b"));
    }

    #[test]
    fn test_named_escapes() {
        assert_eq!(unescape_path("a\\sb"), PathBuf::from("a b"));
        assert_eq!(unescape_path("a\\\\b"), PathBuf::from("a\\b"));
        assert_eq!(unescape_path("a\\qb"), PathBuf::from("a\\qb"));
        assert_eq!(unescape_path("trailing\\"), PathBuf::from("trailing\\"));
    }

    #[test]
    fn test_octal_out_of_range_kept() {
        // \777 does not fit in a byte
        assert_eq!(unescape_path("x\\777"), PathBuf::from("x\\777"));
    }

    #[test]
    fn test_comment_start() {
        assert_eq!(comment_start("#mtree"), Some(0));
        assert_eq!(comment_start("./a mode=644 # note"), Some(13));
        assert_eq!(comment_start("./a\\#b mode=644"), None);
        assert_eq!(comment_start("./a\\\\#b"), Some(5));
        assert_eq!(comment_start("./plain"), None);
    }
}
