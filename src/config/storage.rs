use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Reads import files from the local filesystem. Absolute paths pass
/// through untouched; relative paths resolve against the base.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reads_relative_and_absolute_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        let file_path = dir.path().join("leads.csv");
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(b"Phone\n89001234567\n").unwrap();

        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
        let data = storage.read_file("leads.csv").await.unwrap();
        assert_eq!(data, b"Phone\n89001234567\n");

        let storage = LocalStorage::new(".".to_string());
        let data = storage
            .read_file(file_path.to_str().unwrap())
            .await
            .unwrap();
        assert!(!data.is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let storage = LocalStorage::new(".".to_string());
        let err = storage.read_file("definitely_missing.csv").await.unwrap_err();
        assert!(matches!(err, crate::utils::error::ImportError::IoError(_)));
    }
}
