//! Integration tests for error types

#[cfg(test)]
mod tests {
    use pkgv_errors::*;

    #[test]
    fn test_error_conversion() {
        let manifest_err = ManifestError::UnknownType {
            line: 3,
            value: "door".into(),
        };
        let err: Error = manifest_err.into();
        assert!(matches!(err, Error::Manifest(_)));
        assert_eq!(err.user_code(), Some("manifest.unknown_type"));
    }

    #[test]
    fn test_error_display() {
        let err = ManifestError::MalformedToken {
            line: 12,
            token: "mode".into(),
        };
        assert_eq!(
            err.to_string(),
            "line 12: malformed attribute token `mode` (expected key=value)"
        );
        assert_eq!(err.line(), Some(12));
    }

    #[test]
    fn test_error_clone() {
        let err = GuardError::StatFailed {
            path: "/usr/bin/loop".into(),
            message: "Too many levels of symbolic links".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let storage_err =
            StorageError::from_io_with_path(&io_err, std::path::Path::new("/var/lib/pacman"));
        assert!(matches!(storage_err, StorageError::PermissionDenied { .. }));
        assert!(storage_err.user_hint().is_some());
        assert_eq!(storage_err.path(), "/var/lib/pacman");

        let io_err = std::io::Error::from(std::io::ErrorKind::IsADirectory);
        let storage_err = StorageError::from_io_with_path(&io_err, std::path::Path::new("/tmp"));
        assert_eq!(storage_err.user_code(), Some("storage.is_directory"));

        let io_err = std::io::Error::other("disk on fire");
        let storage_err = StorageError::from_io_with_path(&io_err, std::path::Path::new("/tmp/m"));
        assert!(storage_err.is_retryable());
        assert_eq!(storage_err.to_string(), "failed to read /tmp/m: disk on fire");
    }

    #[test]
    fn test_platform_hint() {
        let err: Error = PlatformError::PackageNotInstalled {
            package: "bash".into(),
        }
        .into();
        assert_eq!(err.user_message(), "package not installed: bash");
        assert!(err.user_hint().is_some());
        assert!(!err.is_retryable());
    }
}
