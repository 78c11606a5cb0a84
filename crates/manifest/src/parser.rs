//! Single-pass interpreter for mtree manifest text

use crate::defaults::{split_token, AttributeDefaults, Attributes};
use crate::entry::{Entry, ParseOptions};
use crate::escape::{comment_start, unescape_path};
use pkgv_errors::ManifestError;

/// Data paths describing the package itself rather than installed files
pub const EXCLUDED_PATHS: [&str; 4] = ["./.BUILDINFO", "./.PKGINFO", "./.INSTALL", "./.CHANGELOG"];

const PATH_PREFIX: &str = "./";

/// Parse manifest text into entries in declaration order
///
/// Directives never appear in the output and excluded metadata paths are
/// dropped. The defaults live only for the duration of this call.
///
/// # Errors
/// Returns the first structural problem found: a malformed `key=value`
/// token, an unknown directive, a path outside `./`, an unknown `type=`
/// or an attribute value that does not parse. Errors carry the 1-based
/// line number.
pub fn parse_manifest(text: &str, options: &ParseOptions) -> Result<Vec<Entry>, ManifestError> {
    let mut defaults = AttributeDefaults::new();
    let mut entries = Vec::new();
    let mut excluded = 0usize;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = match comment_start(raw) {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();

        if content.is_empty() {
            continue;
        }

        if content.starts_with('/') {
            apply_directive(&mut defaults, content, line)?;
            continue;
        }

        let (path, attr_string) = match content.split_once(char::is_whitespace) {
            Some((path, rest)) => (path, rest),
            None => (content, ""),
        };

        let Some(relative) = path.strip_prefix(PATH_PREFIX) else {
            return Err(ManifestError::InvalidPath {
                line,
                path: path.to_string(),
            });
        };

        if EXCLUDED_PATHS.contains(&path) {
            excluded += 1;
            continue;
        }

        let attrs = resolve_attributes(&defaults, attr_string, line)?;
        entries.push(Entry::from_attributes(
            unescape_path(relative),
            &attrs,
            options,
            line,
        )?);
    }

    tracing::debug!(
        entries = entries.len(),
        excluded,
        "parsed manifest"
    );

    Ok(entries)
}

fn apply_directive(
    defaults: &mut AttributeDefaults,
    content: &str,
    line: usize,
) -> Result<(), ManifestError> {
    let mut tokens = content.split_whitespace();
    match tokens.next() {
        Some("/set") => defaults.apply_set(tokens, line),
        Some("/unset") => {
            defaults.apply_unset(tokens);
            Ok(())
        }
        other => Err(ManifestError::UnknownDirective {
            line,
            directive: other.unwrap_or(content).to_string(),
        }),
    }
}

fn resolve_attributes(
    defaults: &AttributeDefaults,
    attr_string: &str,
    line: usize,
) -> Result<Attributes, ManifestError> {
    let mut explicit = Attributes::new();
    if !defaults.contains("type") {
        explicit.insert("type".to_string(), "file".to_string());
    }
    for token in attr_string.split_whitespace() {
        let (key, value) = split_token(token, line)?;
        explicit.insert(key.to_string(), value.to_string());
    }
    Ok(defaults.overlay(explicit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgv_types::FileKind;
    use std::path::PathBuf;

    fn parse(text: &str) -> Result<Vec<Entry>, ManifestError> {
        parse_manifest(text, &ParseOptions::default())
    }

    #[test]
    fn test_empty_manifest() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("#mtree\n\n   # nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_directives_produce_no_entries() {
        let entries = parse("/set type=file mode=644\n/unset mode\n").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_path_without_attributes() {
        let entries = parse("./etc/motd\n").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].relative, PathBuf::from("etc/motd"));
        assert_eq!(entries[0].kind, FileKind::File);
        assert_eq!(entries[0].mode, None);
    }

    #[test]
    fn test_inline_comment_stripped() {
        let entries = parse("./etc/motd mode=600 # size=99\n").unwrap();
        assert_eq!(entries[0].mode, Some(0o600));
        assert_eq!(entries[0].size, None);
    }

    #[test]
    fn test_defaults_supply_type() {
        let entries = parse("/set type=dir\n./usr\n/unset type\n./usr/file\n").unwrap();
        assert_eq!(entries[0].kind, FileKind::Dir);
        assert_eq!(entries[1].kind, FileKind::File);
    }

    #[test]
    fn test_relative_path_rejected() {
        let err = parse("#mtree\nusr/bin/tool mode=755\n").unwrap_err();
        assert_eq!(
            err,
            ManifestError::InvalidPath {
                line: 2,
                path: "usr/bin/tool".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_directive() {
        let err = parse("/set uid=0\n/frobnicate x\n").unwrap_err();
        assert_eq!(
            err,
            ManifestError::UnknownDirective {
                line: 2,
                directive: "/frobnicate".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_data_token() {
        let err = parse("./a mode=644 bogus\n").unwrap_err();
        assert_eq!(
            err,
            ManifestError::MalformedToken {
                line: 1,
                token: "bogus".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_set_token() {
        let err = parse("/set mode\n").unwrap_err();
        assert!(matches!(err, ManifestError::MalformedToken { line: 1, .. }));
    }

    #[test]
    fn test_escaped_path() {
        let entries = parse("./usr/share/My\\040File.txt size=1\n").unwrap();
        assert_eq!(entries[0].relative, PathBuf::from("usr/share/My File.txt"));
    }

    #[test]
    fn test_order_preserved() {
        let entries = parse("./c\n./a\n./b\n").unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.relative.clone()).collect();
        assert_eq!(
            names,
            vec![PathBuf::from("c"), PathBuf::from("a"), PathBuf::from("b")]
        );
    }
}
