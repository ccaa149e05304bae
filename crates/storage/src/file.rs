use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::repository::{BankSource, StorageError};

/// Bank read from a UTF-8 text file on every fetch.
#[derive(Debug, Clone)]
pub struct FileBank {
    path: PathBuf,
}

impl FileBank {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BankSource for FileBank {
    async fn fetch(&self) -> Result<String, StorageError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound {
                location: self.describe(),
            },
            _ => StorageError::Io(e.to_string()),
        })?;
        let text = String::from_utf8(bytes).map_err(|e| StorageError::Encoding(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), bytes = text.len(), "read question bank");

        // Editors on some platforms prepend a byte-order mark.
        Ok(match text.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_owned(),
            None => text,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
