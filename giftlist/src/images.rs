//! Storage for uploaded gift images.
//!
//! Files land in a single directory under generated names of the form
//! `<unix-millis>-<random><.ext>`, so concurrent uploads of files with the
//! same original name never collide. The contents are stored as received.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Attempts at finding an unused file name before giving up.
const NAME_ATTEMPTS: usize = 4;

/// A file written by [`ImageStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Generated file name, relative to the images directory.
    pub file_name: String,
    /// Full path of the written file.
    pub path: PathBuf,
}

/// Directory of uploaded images.
///
/// # Examples
///
/// ```
/// use giftlist::ImageStore;
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = ImageStore::new(dir.path());
/// let stored = store.save(Some("Photo.JPG"), b"jpeg bytes").unwrap();
/// assert!(stored.file_name.ends_with(".jpg"));
/// assert!(stored.path.exists());
/// ```
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Creates a store rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the images directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the images directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Writes `contents` under a freshly generated name.
    ///
    /// The extension of `original_name` is kept (lowercased) when it is a
    /// short alphanumeric one.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be written.
    pub fn save(&self, original_name: Option<&str>, contents: &[u8]) -> Result<StoredImage> {
        self.ensure_dir()?;
        let extension = original_name.map(extension_of).unwrap_or_default();

        let mut attempt = 0;
        loop {
            attempt += 1;
            let file_name = generate_name(&extension);
            let path = self.dir.join(&file_name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(contents)?;
                    file.sync_all()?;
                    log::debug!("stored {} bytes at {}", contents.len(), path.display());
                    return Ok(StoredImage { file_name, path });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists && attempt < NAME_ATTEMPTS => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}

fn generate_name(extension: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = rand::random::<u32>() % 1_000_000_000;
    format!("{millis}-{suffix}{extension}")
}

/// Returns `.ext` for a usable extension of `name`, or an empty string.
fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 10)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("cat.PNG"), ".png");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("noext"), "");
        assert_eq!(extension_of("weird.p$g"), "");
        assert_eq!(extension_of(".hidden"), "");
        assert_eq!(extension_of("../../etc/passwd.txt"), ".txt");
    }

    #[test]
    fn test_save_writes_contents() {
        let dir = tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("images"));

        let stored = store.save(Some("blender.png"), b"png").unwrap();
        assert!(stored.file_name.ends_with(".png"));
        assert_eq!(stored.path.parent().unwrap(), store.dir());
        assert_eq!(std::fs::read(&stored.path).unwrap(), b"png");
    }

    #[test]
    fn test_save_never_overwrites() {
        let dir = tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        let a = store.save(Some("same.png"), b"a").unwrap();
        let b = store.save(Some("same.png"), b"b").unwrap();
        assert_ne!(a.file_name, b.file_name);
        assert_eq!(std::fs::read(&a.path).unwrap(), b"a");
        assert_eq!(std::fs::read(&b.path).unwrap(), b"b");
    }

    #[test]
    fn test_generated_name_shape() {
        let name = generate_name(".jpg");
        let (millis, rest) = name.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert!(rest.ends_with(".jpg"));
        assert!(!name.contains('/'));
    }
}
