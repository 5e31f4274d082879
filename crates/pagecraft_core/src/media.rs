//! Media upload boundary.
//!
//! # Responsibility
//! - Store uploaded images/videos with a storage collaborator.
//! - Return the public URL that editors write into item settings.
//!
//! # Invariants
//! - Only URL strings ever enter page documents; bytes stay in storage.
//! - Stored names are unique and contain no path separators.

use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

static UNSAFE_NAME_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid media name regex"));

/// Accepted upload extensions.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "mp4", "webm",
];
/// Upload size cap in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug)]
pub enum MediaError {
    EmptyFile,
    TooLarge { size: usize, limit: usize },
    UnsupportedType(String),
    Io(std::io::Error),
}

impl Display for MediaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFile => write!(f, "uploaded file is empty"),
            Self::TooLarge { size, limit } => {
                write!(f, "uploaded file is {size} bytes; limit is {limit}")
            }
            Self::UnsupportedType(name) => write!(f, "unsupported media type for `{name}`"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MediaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MediaError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// File storage collaborator.
pub trait MediaStorage {
    /// Stores `bytes` and returns the public URL of the stored object.
    fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<String, MediaError>;
}

/// Stores uploads in a local directory served under `public_base_url`.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MediaStorage for LocalMediaStorage {
    fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<String, MediaError> {
        let stored_name = stored_name(file_name, bytes.len())?;
        let target = self.root.join(&stored_name);

        if let Err(err) = fs::create_dir_all(&self.root).and_then(|()| fs::write(&target, bytes)) {
            error!(
                "event=media_upload module=media status=error file={} error={}",
                stored_name, err
            );
            return Err(err.into());
        }

        info!(
            "event=media_upload module=media status=ok file={} bytes={}",
            stored_name,
            bytes.len()
        );
        Ok(format!("{}/{}", self.public_base_url, stored_name))
    }
}

/// Validates an upload and derives its unique stored name.
pub fn stored_name(file_name: &str, size: usize) -> Result<String, MediaError> {
    if size == 0 {
        return Err(MediaError::EmptyFile);
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(MediaError::TooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let base = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let extension = Path::new(base)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| MediaError::UnsupportedType(file_name.to_string()))?;

    let stem = Path::new(base)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    let cleaned = UNSAFE_NAME_CHARS_RE.replace_all(stem, "-");
    let cleaned = cleaned.trim_matches('-');
    let id = Uuid::new_v4().simple().to_string();

    if cleaned.is_empty() {
        Ok(format!("{id}.{extension}"))
    } else {
        Ok(format!("{id}-{cleaned}.{extension}"))
    }
}

#[cfg(test)]
mod tests {
    use super::{stored_name, LocalMediaStorage, MediaError, MediaStorage, MAX_UPLOAD_BYTES};

    #[test]
    fn stored_name_strips_paths_and_unsafe_chars() {
        let name = stored_name("../../etc/My Photo!.PNG", 10).unwrap();
        assert!(name.ends_with("-My-Photo.png"), "{name}");
        assert!(!name.contains('/'));
    }

    #[test]
    fn rejects_empty_oversized_and_unknown_types() {
        assert!(matches!(stored_name("a.png", 0), Err(MediaError::EmptyFile)));
        assert!(matches!(
            stored_name("a.png", MAX_UPLOAD_BYTES + 1),
            Err(MediaError::TooLarge { .. })
        ));
        assert!(matches!(
            stored_name("script.exe", 10),
            Err(MediaError::UnsupportedType(_))
        ));
    }

    #[test]
    fn local_upload_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let storage =
            LocalMediaStorage::new(dir.path().join("uploads"), "https://cdn.example.com/lp/");
        let url = storage.upload("hero.jpg", b"fake-jpeg").unwrap();

        assert!(url.starts_with("https://cdn.example.com/lp/"));
        let stored = url.rsplit('/').next().unwrap();
        let bytes = std::fs::read(storage.root().join(stored)).unwrap();
        assert_eq!(bytes, b"fake-jpeg");
    }
}
