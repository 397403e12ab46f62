use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::{error::Result, models::ImageUpload};

/// Filesystem store for uploaded product images.
///
/// Files live under `<root>/produits/` with a generated name; the relative
/// path is what gets persisted on the record and resolved by the `/media`
/// mount.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(self.root.join("produits")).await?;
        Ok(())
    }

    /// Writes the upload to disk and returns its stored relative path.
    pub async fn store(&self, upload: &ImageUpload) -> Result<String> {
        let extension = extension_for(upload.content_type.as_deref());
        let relative = format!("produits/{}.{}", Uuid::new_v4(), extension);

        fs::write(self.root.join(&relative), &upload.data).await?;

        Ok(relative)
    }

    /// Removes a stored file. A path that is already gone is logged and
    /// treated as removed.
    pub async fn remove(&self, relative: &str) -> Result<()> {
        match fs::remove_file(self.root.join(relative)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Media file {} was already gone", relative);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn extension_for(content_type: Option<&str>) -> &'static str {
    match content_type {
        Some("image/jpeg") | Some("image/jpg") => "jpg",
        Some("image/png") => "png",
        Some("image/webp") => "webp",
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use tempfile::TempDir;

    #[test]
    fn maps_known_content_types() {
        assert_eq!(extension_for(Some("image/png")), "png");
        assert_eq!(extension_for(Some("image/jpeg")), "jpg");
        assert_eq!(extension_for(Some("image/webp")), "webp");
        assert_eq!(extension_for(Some("application/pdf")), "jpg");
        assert_eq!(extension_for(None), "jpg");
    }

    #[tokio::test]
    async fn stores_and_removes_uploads() {
        let dir = TempDir::new().unwrap();
        let store = MediaStore::new(dir.path());
        store.init().await.unwrap();

        let upload = ImageUpload {
            content_type: Some("image/png".to_string()),
            data: Bytes::from_static(b"not really a png"),
        };

        let relative = store.store(&upload).await.unwrap();
        assert!(relative.starts_with("produits/"));
        assert!(relative.ends_with(".png"));

        let on_disk = dir.path().join(&relative);
        assert_eq!(std::fs::read(&on_disk).unwrap(), b"not really a png");

        store.remove(&relative).await.unwrap();
        assert!(!on_disk.exists());

        // Removing twice is not an error.
        store.remove(&relative).await.unwrap();
    }
}
