//! Loading manifest files from disk

use crate::entry::{Entry, ParseOptions};
use crate::parser::parse_manifest;
use flate2::read::MultiGzDecoder;
use pkgv_errors::{Error, ManifestError, StorageError};
use std::io::Read;
use std::path::Path;

/// Leading bytes of a gzip stream
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Turn raw manifest bytes into text, inflating gzip input
///
/// `origin` names the source in error messages.
///
/// # Errors
/// Returns an error if the gzip stream is corrupt or the content is not
/// valid UTF-8.
pub fn decode_manifest(bytes: Vec<u8>, origin: &str) -> Result<String, ManifestError> {
    let raw = if bytes.starts_with(&GZIP_MAGIC) {
        let mut inflated = Vec::new();
        MultiGzDecoder::new(bytes.as_slice())
            .read_to_end(&mut inflated)
            .map_err(|e| ManifestError::Decompress {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        inflated
    } else {
        bytes
    };

    String::from_utf8(raw).map_err(|e| ManifestError::InvalidUtf8 {
        path: origin.to_string(),
        message: e.to_string(),
    })
}

/// Read a manifest file, plain or gzip-compressed
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
pub async fn read_manifest(path: &Path) -> Result<String, Error> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| StorageError::from_io_with_path(&e, path))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read manifest");
    Ok(decode_manifest(bytes, &path.display().to_string())?)
}

/// Read and parse a manifest file
///
/// # Errors
/// Returns an error if the file cannot be read, decoded or parsed.
pub async fn load_manifest(path: &Path, options: &ParseOptions) -> Result<Vec<Entry>, Error> {
    let text = read_manifest(path).await?;
    Ok(parse_manifest(&text, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_plain_passthrough() {
        let text = decode_manifest(b"#mtree\n".to_vec(), "mem").unwrap();
        assert_eq!(text, "#mtree\n");
    }

    #[test]
    fn test_gzip_inflated() {
        let text = decode_manifest(gzip(b"#mtree\n./a\n"), "mem").unwrap();
        assert_eq!(text, "#mtree\n./a\n");
    }

    #[test]
    fn test_corrupt_gzip() {
        let mut bytes = gzip(b"#mtree\n./a size=1\n");
        bytes.truncate(12);
        let err = decode_manifest(bytes, "mem").unwrap_err();
        assert!(matches!(err, ManifestError::Decompress { .. }));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = decode_manifest(vec![b'.', b'/', 0xff, b'\n'], "mem").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidUtf8 { ref path, .. } if path == "mem"));
    }
}
