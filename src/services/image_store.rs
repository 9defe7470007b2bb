use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::{fs, io::AsyncWriteExt};

use crate::error::{AppError, Result};

const MAX_NAME_ATTEMPTS: usize = 8;

/// Reduces an uploaded filename to a single safe path component.
///
/// Path separators are treated as word breaks, whitespace runs collapse to
/// `_`, anything outside ASCII `[A-Za-z0-9_.-]` is dropped, and leading or
/// trailing `.`/`_` are trimmed. The result may be empty.
pub fn sanitize_filename(raw: &str) -> String {
    let spaced: String = raw
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Filesystem directory holding product images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        let name = Path::new(filename)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        self.root.join(name)
    }

    /// Writes `bytes` under the sanitized form of `desired` and returns the
    /// name actually used. An existing file is never overwritten; a random
    /// suffix is added to the stem instead.
    pub async fn save(&self, bytes: &[u8], desired: &str) -> Result<String> {
        let base = sanitize_filename(desired);
        if base.is_empty() {
            return Err(AppError::BadRequest("Invalid image filename".to_string()));
        }

        self.ensure_root().await?;

        let mut candidate = base.clone();
        for _ in 0..MAX_NAME_ATTEMPTS {
            let path = self.root.join(&candidate);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(bytes).await?;
                    file.flush().await?;
                    tracing::info!("Stored image {} ({} bytes)", candidate, bytes.len());
                    return Ok(candidate);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    candidate = with_suffix(&base);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::InternalError(format!(
            "Could not find a free filename for {}",
            base
        )))
    }

    pub async fn delete(&self, filename: &str) -> Result<()> {
        match fs::remove_file(self.path_of(filename)).await {
            Ok(()) => {
                tracing::info!("Removed image {}", filename);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn with_suffix(name: &str) -> String {
    let tag = uuid::Uuid::new_v4().simple().to_string();
    let tag = &tag[..8];

    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}-{}.{}", stem, tag, ext),
        _ => format!("{}-{}", name, tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sanitize_strips_traversal_segments() {
        let cleaned = sanitize_filename("../../etc/x.png");
        assert_eq!(cleaned, "etc_x.png");
        assert!(!cleaned.contains('/'));
        assert!(!cleaned.contains(".."));
    }

    #[test]
    fn sanitize_handles_spaces_and_unicode() {
        assert_eq!(sanitize_filename("my cool  photo.jpg"), "my_cool_photo.jpg");
        assert_eq!(sanitize_filename("café.png"), "caf.png");
        assert_eq!(sanitize_filename(r"C:\Users\bob\pic.gif"), "C_Users_bob_pic.gif");
    }

    #[test]
    fn sanitize_can_yield_empty() {
        assert_eq!(sanitize_filename("../.."), "");
        assert_eq!(sanitize_filename("日本"), "");
    }

    #[test]
    fn suffix_goes_before_extension() {
        let renamed = with_suffix("x.png");
        assert!(renamed.starts_with("x-"));
        assert!(renamed.ends_with(".png"));
        assert_eq!(renamed.len(), "x-".len() + 8 + ".png".len());
    }

    #[tokio::test]
    async fn save_creates_root_and_keeps_bytes() {
        let dir = tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path().join("images"));

        let stored = store.save(b"\x89PNG fake", "../../etc/x.png").await.expect("save");

        assert_eq!(stored, "etc_x.png");
        let on_disk = std::fs::read(store.root().join(&stored)).expect("read back");
        assert_eq!(on_disk, b"\x89PNG fake");
    }

    #[tokio::test]
    async fn save_never_overwrites_existing_file() {
        let dir = tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path());

        let first = store.save(b"first", "x.png").await.expect("first save");
        let second = store.save(b"second", "x.png").await.expect("second save");

        assert_eq!(first, "x.png");
        assert_ne!(first, second);
        assert_eq!(std::fs::read(dir.path().join(&first)).expect("first"), b"first");
        assert_eq!(std::fs::read(dir.path().join(&second)).expect("second"), b"second");
    }

    #[tokio::test]
    async fn save_rejects_unusable_names() {
        let dir = tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path());

        let err = store.save(b"data", "..").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path());

        let stored = store.save(b"data", "gone.png").await.expect("save");
        store.delete(&stored).await.expect("first delete");
        assert!(!dir.path().join(&stored).exists());

        store.delete(&stored).await.expect("second delete");
    }

    #[test]
    fn path_of_ignores_directory_components() {
        let store = ImageStore::new("/srv/images");
        assert_eq!(store.path_of("../secret.txt"), PathBuf::from("/srv/images/secret.txt"));
    }
}
