use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::MintError;
use crate::state::PhotoAsset;
use crate::util::constants::DEFAULT_CONTENT_TYPE;

/// Read a captured photo into memory.
///
/// Accepts plain paths and the `file://` URIs camera collaborators hand
/// back. Missing, unreadable and empty files are all `AssetRead` errors.
pub async fn read_photo(location: &Path) -> Result<PhotoAsset, MintError> {
    let path = normalize_location(location);
    let shown = path.display().to_string();

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| MintError::asset_read(shown.clone(), e))?;
    if bytes.is_empty() {
        return Err(MintError::asset_read(shown, "file is empty"));
    }

    let digest = hex::encode(Sha256::digest(&bytes));
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());
    let content_type = content_type_for(&path);

    debug!(path = %shown, size = bytes.len(), %digest, content_type, "photo read");

    Ok(PhotoAsset {
        path,
        file_name,
        content_type,
        bytes,
        digest,
    })
}

fn normalize_location(location: &Path) -> PathBuf {
    match location.to_str().and_then(|s| s.strip_prefix("file://")) {
        Some(stripped) => PathBuf::from(stripped),
        None => location.to_path_buf(),
    }
}

/// MIME type by extension; camera captures default to JPEG.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("latitude-mint-{}-{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn reads_bytes_and_digest() {
        let path = scratch_path("photo.JPG");
        tokio::fs::write(&path, b"jpeg bytes").await.unwrap();

        let asset = read_photo(&path).await.unwrap();
        assert_eq!(asset.bytes, b"jpeg bytes");
        assert_eq!(asset.content_type, "image/jpeg");
        assert_eq!(asset.digest, hex::encode(Sha256::digest(b"jpeg bytes")));
        assert!(asset.file_name.ends_with("photo.JPG"));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn accepts_file_uri() {
        let path = scratch_path("uri.png");
        tokio::fs::write(&path, [1u8, 2, 3]).await.unwrap();
        let uri = PathBuf::from(format!("file://{}", path.display()));

        let asset = read_photo(&uri).await.unwrap();
        assert_eq!(asset.path, path);
        assert_eq!(asset.content_type, "image/png");

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_asset_error() {
        let err = read_photo(Path::new("/definitely/not/here.jpg")).await.unwrap_err();
        assert!(matches!(err, MintError::AssetRead { .. }));
    }

    #[tokio::test]
    async fn empty_file_is_asset_error() {
        let path = scratch_path("empty.jpg");
        tokio::fs::write(&path, b"").await.unwrap();

        let err = read_photo(&path).await.unwrap_err();
        assert!(matches!(err, MintError::AssetRead { ref reason, .. } if reason == "file is empty"));

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
