use crate::Result;
use std::path::{Path, PathBuf};

const TOKEN_FILE: &str = "token";

/// Persistent bearer-token storage.
///
/// The token file may contain the raw token or a JSON-quoted string (some
/// login tooling writes the serialized form); `token()` unwraps either.
/// Any 401 clears the store, which is the logout broadcast of this tier.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(TOKEN_FILE),
        }
    }

    pub fn token(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = unwrap_quoted(raw.trim());
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token.trim())?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }
}

fn unwrap_quoted(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        raw[1..raw.len() - 1].to_string()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_read_token() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path());

        assert!(!store.is_logged_in());
        store.save("abc.def.ghi").unwrap();
        assert_eq!(store.token().unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_json_quoted_token_is_unwrapped() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path());

        store.save("\"abc.def.ghi\"").unwrap();
        assert_eq!(store.token().unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path());

        store.save("tok").unwrap();
        store.clear().unwrap();
        assert!(store.token().is_none());
        // Clearing again must not fail
        store.clear().unwrap();
    }

    #[test]
    fn test_blank_file_counts_as_logged_out() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path());

        store.save("   ").unwrap();
        assert!(store.token().is_none());
    }
}
