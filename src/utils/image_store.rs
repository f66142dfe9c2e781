use std::io;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Prefix of every stored image path, also the URL segment they are served under.
pub const PUBLIC_PREFIX: &str = "uploads";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("Image file is empty")]
    Empty,
    #[error("Image exceeds the {0} byte limit")]
    TooLarge(usize),
    #[error("Only jpg/png files are allowed")]
    UnsupportedType,
}

/// Uploaded images on local disk, one file per blob.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    max_bytes: usize,
}

impl ImageStore {
    /// Creates `root` if it does not exist yet.
    pub async fn open(root: impl Into<PathBuf>, max_bytes: usize) -> io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        log::info!("Storing uploaded images in {}", root.display());
        Ok(ImageStore { root, max_bytes })
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Checks size and sniffs the magic bytes; the client's declared type is ignored.
    pub fn inspect(&self, bytes: &[u8]) -> Result<ImageKind, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if bytes.len() > self.max_bytes {
            return Err(ImageError::TooLarge(self.max_bytes));
        }

        match infer::get(bytes).map(|t| t.mime_type()) {
            Some("image/jpeg") => Ok(ImageKind::Jpeg),
            Some("image/png") => Ok(ImageKind::Png),
            _ => Err(ImageError::UnsupportedType),
        }
    }

    /// Writes the blob under a fresh UUID name and returns its relative path,
    /// e.g. `uploads/6f1c....png`.
    pub async fn save(&self, bytes: &[u8], kind: ImageKind) -> io::Result<String> {
        let file_name = format!("{}.{}", Uuid::new_v4(), kind.extension());
        tokio::fs::write(self.root.join(&file_name), bytes).await?;
        log::debug!("Stored image {} ({} bytes)", file_name, bytes.len());
        Ok(format!("{}/{}", PUBLIC_PREFIX, file_name))
    }

    /// Reads a stored blob back. Returns `None` for unknown names and for
    /// anything that is not a plain file name.
    pub async fn read(&self, file_name: &str) -> io::Result<Option<(Vec<u8>, &'static str)>> {
        let mut components = Path::new(file_name).components();
        let plain = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !plain {
            return Ok(None);
        }

        match tokio::fs::read(self.root.join(file_name)).await {
            Ok(bytes) => {
                let mime = infer::get(&bytes)
                    .map(|t| t.mime_type())
                    .unwrap_or("application/octet-stream");
                Ok(Some((bytes, mime)))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}
