use crate::{Config, HttpClient, Result, SessionStore};
use qhse_types::{Module, ModuleStats, Periode};
use serde_json::Value;
use std::sync::Arc;

/// Entry point for everything that talks to the API. One `Client` per
/// process; per-module services share the underlying HTTP client.
#[derive(Clone)]
pub struct Client {
    http: Arc<HttpClient>,
}

impl Client {
    pub fn connect(config: &Config, session: SessionStore) -> Result<Self> {
        Ok(Self {
            http: Arc::new(HttpClient::new(config, session)?),
        })
    }

    pub fn module(&self, module: Module) -> EntityService {
        EntityService {
            http: self.http.clone(),
            module,
        }
    }

    pub fn session(&self) -> &SessionStore {
        self.http.session()
    }
}

/// One set of the five collection calls plus aggregate stats, bound to a
/// module. Bodies stay opaque `serde_json::Value`s: their shape belongs to
/// the backend, this tier only validates what its own forms declare.
#[derive(Clone)]
pub struct EntityService {
    http: Arc<HttpClient>,
    module: Module,
}

impl EntityService {
    pub fn module(&self) -> Module {
        self.module
    }

    fn collection_path(&self) -> String {
        format!(
            "/api/{}/{}",
            self.module.path_segment(),
            self.module.collection_segment()
        )
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.collection_path(), id)
    }

    /// `GET /api/<module>/<plural>` with optional query filters
    /// (statut, zone, search terms — passed through untouched).
    pub fn list(&self, filters: &[(&str, String)]) -> Result<Vec<Value>> {
        let body = self.http.get(&self.collection_path(), filters)?;
        Ok(match body {
            Value::Array(rows) => rows,
            // Some endpoints wrap the collection
            Value::Object(mut map) => map
                .remove("data")
                .and_then(|v| v.as_array().cloned())
                .unwrap_or_default(),
            _ => Vec::new(),
        })
    }

    /// `GET /api/<module>/<plural>/:id`
    pub fn get(&self, id: &str) -> Result<Value> {
        self.http.get(&self.item_path(id), &[])
    }

    /// `POST /api/<module>/<plural>` — returns the server's copy of the
    /// created entity (with its assigned id).
    pub fn create(&self, payload: &Value) -> Result<Value> {
        self.http.post(&self.collection_path(), payload)
    }

    /// `PUT /api/<module>/<plural>/:id`
    pub fn update(&self, id: &str, payload: &Value) -> Result<Value> {
        self.http.put(&self.item_path(id), payload)
    }

    /// `DELETE /api/<module>/<plural>/:id`
    pub fn delete(&self, id: &str) -> Result<()> {
        self.http.delete(&self.item_path(id))?;
        Ok(())
    }

    /// `GET /api/<module>/stats?periode=<token>`
    pub fn stats(&self, periode: Periode) -> Result<ModuleStats> {
        let path = format!("/api/{}/stats", self.module.path_segment());
        let body = self
            .http
            .get(&path, &[("periode", periode.token().to_string())])?;
        serde_json::from_value(body)
            .map_err(|_| crate::Error::MalformedResponse("stats payload".to_string()))
    }
}
