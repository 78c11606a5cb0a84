//! Tests for the digest registry and streaming hasher

use super::*;
use tempfile::TempDir;
use tokio::fs;

const HELLO_MD5: &str = "5d41402abc4b2a76b9719d911017c592";
const HELLO_SHA1: &str = "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d";
const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

async fn hash_one(
    path: &std::path::Path,
    algorithm: DigestAlgorithm,
) -> Result<Digest, pkgv_errors::Error> {
    let mut digests = hash_file_multi(path, &[algorithm]).await?;
    Ok(digests.remove(0))
}

#[test]
fn test_known_vectors() {
    assert_eq!(
        Digest::from_data(DigestAlgorithm::Md5, b"hello").to_hex(),
        HELLO_MD5
    );
    assert_eq!(
        Digest::from_data(DigestAlgorithm::Sha1, b"hello").to_hex(),
        HELLO_SHA1
    );
    assert_eq!(
        Digest::from_data(DigestAlgorithm::Sha256, b"hello").to_hex(),
        HELLO_SHA256
    );
}

#[test]
fn test_output_lengths() {
    for alg in DigestAlgorithm::ALL {
        let digest = Digest::from_data(alg, b"");
        assert_eq!(digest.as_bytes().len(), alg.output_len());
        assert_eq!(digest.algorithm(), alg);
    }
}

#[test]
fn test_registry_keys() {
    assert_eq!(
        DigestAlgorithm::from_key("md5digest"),
        Some(DigestAlgorithm::Md5)
    );
    assert_eq!(
        DigestAlgorithm::from_key("sha256digest"),
        Some(DigestAlgorithm::Sha256)
    );
    assert_eq!(
        DigestAlgorithm::from_key("sha512digest"),
        Some(DigestAlgorithm::Sha512)
    );
    assert_eq!(DigestAlgorithm::from_key("rmd160digest"), None);
    assert_eq!(DigestAlgorithm::from_key("sha256"), None);

    assert!(DigestAlgorithm::is_digest_key("rmd160digest"));
    assert!(!DigestAlgorithm::is_digest_key("digest"));
    assert!(!DigestAlgorithm::is_digest_key("size"));
}

#[test]
fn test_matches_hex() {
    let digest = Digest::from_data(DigestAlgorithm::Sha256, b"hello");
    assert!(digest.matches_hex(HELLO_SHA256));
    assert!(digest.matches_hex(&HELLO_SHA256.to_uppercase()));
    assert!(!digest.matches_hex(HELLO_MD5));
    assert!(!digest.matches_hex(""));
}

#[tokio::test]
async fn test_hash_file_is_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hello");
    fs::write(&path, b"hello").await.unwrap();

    let first = hash_one(&path, DigestAlgorithm::Sha256).await.unwrap();
    let second = hash_one(&path, DigestAlgorithm::Sha256).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_hex(), HELLO_SHA256);

    fs::write(&path, b"hellp").await.unwrap();
    let changed = hash_one(&path, DigestAlgorithm::Sha256).await.unwrap();
    assert_ne!(first, changed);
}

#[tokio::test]
async fn test_hash_file_multi_single_pass() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hello");
    fs::write(&path, b"hello").await.unwrap();

    let digests = hash_file_multi(&path, &[DigestAlgorithm::Md5, DigestAlgorithm::Sha256])
        .await
        .unwrap();
    assert_eq!(digests.len(), 2);
    assert_eq!(digests[0].to_hex(), HELLO_MD5);
    assert_eq!(digests[1].to_hex(), HELLO_SHA256);
}

#[tokio::test]
async fn test_hash_spans_multiple_chunks() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("large");
    let data: Vec<u8> = (0..CHUNK_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
    fs::write(&path, &data).await.unwrap();

    let streamed = hash_one(&path, DigestAlgorithm::Sha512).await.unwrap();
    assert_eq!(streamed, Digest::from_data(DigestAlgorithm::Sha512, &data));
}

#[tokio::test]
async fn test_missing_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = hash_one(&temp_dir.path().join("absent"), DigestAlgorithm::Md5).await;
    assert!(matches!(
        result,
        Err(pkgv_errors::Error::Storage(
            pkgv_errors::StorageError::PathNotFound { .. }
        ))
    ));
}
