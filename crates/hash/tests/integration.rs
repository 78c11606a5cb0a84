//! Integration tests for hash crate

#[cfg(test)]
mod tests {
    use pkgv_hash::*;
    use tempfile::tempdir;
    use tokio::fs;

    #[tokio::test]
    async fn test_hash_file_matches_recorded_hex() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");

        let data = b"verify this content";
        fs::write(&file_path, data).await.unwrap();

        let expected = Digest::from_data(DigestAlgorithm::Sha256, data);
        let actual = hash_file_multi(&file_path, &[DigestAlgorithm::Sha256])
            .await
            .unwrap()
            .remove(0);
        assert!(actual.matches_hex(&expected.to_hex()));
        assert!(actual.matches_hex(&expected.to_hex().to_uppercase()));

        let wrong = Digest::from_data(DigestAlgorithm::Sha256, b"different content");
        assert!(!actual.matches_hex(&wrong.to_hex()));
        // A digest of the wrong length never matches
        assert!(!actual.matches_hex(&expected.to_hex()[..32]));
    }

    #[test]
    fn test_digest_serialization() {
        let digest = Digest::from_data(DigestAlgorithm::Md5, b"hello");
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, r#""md5:5d41402abc4b2a76b9719d911017c592""#);
    }
}
