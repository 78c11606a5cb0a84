//! Streaming file digests
//!
//! Files are read in fixed-size blocks so memory use does not depend on the
//! size of the file being verified. The handle lives only for the duration of
//! one call and is dropped on every return path.

use crate::{Digest, DigestAlgorithm};
use pkgv_errors::{Error, StorageError};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Size of chunks for streaming hash computation
pub const CHUNK_SIZE: usize = 64 * 1024; // 64KB

/// Compute several digests of a file in a single pass
///
/// The returned digests are in the same order as `algorithms`.
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub async fn hash_file_multi(
    path: &Path,
    algorithms: &[DigestAlgorithm],
) -> Result<Vec<Digest>, Error> {
    let mut file = File::open(path)
        .await
        .map_err(|e| StorageError::from_io_with_path(&e, path))?;

    let mut hashers: Vec<_> = algorithms.iter().map(|alg| alg.hasher()).collect();
    let mut buffer = vec![0; CHUNK_SIZE];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .map_err(|e| StorageError::from_io_with_path(&e, path))?;
        if n == 0 {
            break;
        }
        for hasher in &mut hashers {
            hasher.update(&buffer[..n]);
        }
    }

    Ok(hashers.into_iter().map(crate::Hasher::finalize).collect())
}
