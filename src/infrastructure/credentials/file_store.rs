//! File Credential Store - JSON 文件凭据存储
//!
//! 相当于浏览器端的 localStorage：token 写入本地文件，
//! 进程内缓存一份，避免每个请求都读盘。

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::application::ports::{CredentialError, CredentialStorePort};
use crate::domain::Credentials;

pub struct FileCredentialStore {
    path: PathBuf,
    cache: RwLock<Option<Credentials>>,
}

impl FileCredentialStore {
    /// 打开凭据文件；文件不存在视为未登录，内容损坏时记录警告并视为未登录
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let cached = Self::read_file(&path);
        Self {
            path,
            cache: RwLock::new(cached),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(path: &Path) -> Option<Credentials> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read credentials file");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(credentials) => Some(credentials),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed credentials file");
                None
            }
        }
    }
}

impl CredentialStorePort for FileCredentialStore {
    fn load(&self) -> Option<Credentials> {
        self.cache.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save(&self, credentials: &Credentials) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CredentialError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(credentials)
            .map_err(|e| CredentialError::SerializationError(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| CredentialError::IoError(e.to_string()))?;

        *self.cache.write().unwrap_or_else(|e| e.into_inner()) = Some(credentials.clone());
        tracing::debug!(path = %self.path.display(), "Credentials saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        *self.cache.write().unwrap_or_else(|e| e.into_inner()) = None;

        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Credentials cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CredentialError::IoError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Admin;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_means_logged_out() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::open(dir.path().join("credentials.json"));
        assert!(store.load().is_none());
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_save_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/credentials.json");

        let store = FileCredentialStore::open(&path);
        let admin = Admin {
            id: "a1".to_string(),
            name: "Root".to_string(),
            email: "root@example.com".to_string(),
            role: None,
        };
        store
            .save(&Credentials::new("t1").with_admin(admin))
            .unwrap();

        let reopened = FileCredentialStore::open(&path);
        let loaded = reopened.load().unwrap();
        assert_eq!(loaded.token, "t1");
        assert_eq!(loaded.admin.unwrap().email, "root@example.com");
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        let store = FileCredentialStore::open(&path);
        store.save(&Credentials::new("t1")).unwrap();

        store.clear().unwrap();
        assert!(store.token().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_malformed_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "not json").unwrap();

        assert!(FileCredentialStore::open(&path).load().is_none());
    }
}
