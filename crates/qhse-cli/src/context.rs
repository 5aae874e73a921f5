use anyhow::Result;
use once_cell::sync::OnceCell;
use qhse_client::{resolve_data_dir, Client, Config, SessionStore};
use std::path::{Path, PathBuf};

/// Lazily-initialized per-invocation state: data directory, config, session
/// store, API client. Nothing is touched until a handler asks for it.
pub struct ExecutionContext {
    data_dir: PathBuf,
    api_url_override: Option<String>,
    config: OnceCell<Config>,
    client: OnceCell<Client>,
}

impl ExecutionContext {
    pub fn new(data_dir: Option<&str>, api_url_override: Option<String>) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir)?;
        Ok(Self {
            data_dir,
            api_url_override,
            config: OnceCell::new(),
            client: OnceCell::new(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    pub fn config(&self) -> Result<&Config> {
        self.config.get_or_try_init(|| {
            let mut config = Config::load_from(&self.config_path())?;
            if let Some(url) = &self.api_url_override {
                config.api_base_url = url.clone();
            }
            Ok(config)
        })
    }

    pub fn session(&self) -> SessionStore {
        SessionStore::new(&self.data_dir)
    }

    pub fn client(&self) -> Result<&Client> {
        self.client.get_or_try_init(|| {
            let config = self.config()?;
            Ok(Client::connect(config, self.session())?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_context() -> (TempDir, ExecutionContext) {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().to_str().unwrap().to_string();

        std::fs::write(
            temp_dir.path().join("config.toml"),
            "api_base_url = \"http://qhse.test\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let ctx = ExecutionContext::new(Some(&data_dir), None).unwrap();
        (temp_dir, ctx)
    }

    #[test]
    fn test_lazy_loading() {
        let (_temp_dir, ctx) = setup_test_context();

        assert!(ctx.config.get().is_none(), "config loads on first access");
        let config = ctx.config().unwrap();
        assert_eq!(config.api_base_url, "http://qhse.test");
        assert!(ctx.config.get().is_some());
    }

    #[test]
    fn test_api_url_override_wins() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().to_str().unwrap().to_string();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "api_base_url = \"http://configured\"\n",
        )
        .unwrap();

        let ctx =
            ExecutionContext::new(Some(&data_dir), Some("http://flag".to_string())).unwrap();
        assert_eq!(ctx.config().unwrap().api_base_url, "http://flag");
    }

    #[test]
    fn test_session_store_lives_in_data_dir() {
        let (_temp_dir, ctx) = setup_test_context();
        let store = ctx.session();
        store.save("tok").unwrap();
        assert!(ctx.data_dir().join("token").exists());
    }
}
