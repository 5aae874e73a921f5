use crate::{Config, Error, Result, SessionStore};
use reqwest::blocking::Response;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Thin wrapper over a blocking reqwest client.
///
/// Attaches the stored bearer token to every request, enforces the
/// configured timeout, and maps every non-2xx response into the error
/// taxonomy. A 401 clears the session store before surfacing.
pub struct HttpClient {
    base_url: String,
    http: reqwest::blocking::Client,
    session: SessionStore,
}

impl HttpClient {
    pub fn new(config: &Config, session: SessionStore) -> Result<Self> {
        let base_url = config.api_base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Config("api_base_url is not set".to_string()));
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;
        Ok(Self {
            base_url,
            http,
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.request(Method::GET, path, query, None)
    }

    pub fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::POST, path, &[], Some(body))
    }

    pub fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::PUT, path, &[], Some(body))
    }

    pub fn delete(&self, path: &str) -> Result<Value> {
        self.request(Method::DELETE, path, &[], None)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, &url);

        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        self.read_response(response)
    }

    fn read_response(&self, response: Response) -> Result<Value> {
        let status = response.status();
        let text = response.text()?;

        if status == StatusCode::UNAUTHORIZED {
            // Logout broadcast: credentials are gone before the caller
            // sees the error, so no screen can render partial data with a
            // dead session.
            let _ = self.session.clear();
            return Err(Error::Unauthorized);
        }

        if looks_like_html(&text) {
            return Err(Error::MalformedResponse(format!("HTTP {}", status.as_u16())));
        }

        if !status.is_success() {
            return Err(parse_api_error(status.as_u16(), &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|_| Error::MalformedResponse(format!("HTTP {}", status.as_u16())))
    }
}

/// Heuristic for proxies and crashed backends that answer HTML where JSON
/// was expected.
pub fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    head.get(..9)
        .map(|prefix| prefix.eq_ignore_ascii_case("<!doctype"))
        .unwrap_or(false)
}

/// Parse a structured `{message, details[], error}` rejection body,
/// flattening each detail into a `field: message` string. Falls back to a
/// generic message when the body is not the expected shape.
pub fn parse_api_error(status: u16, body: &str) -> Error {
    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => {
            return Error::Api {
                status,
                message: format!("request failed with status {}", status),
                details: Vec::new(),
            }
        }
    };

    let message = parsed
        .get("message")
        .or_else(|| parsed.get("error"))
        .and_then(Value::as_str)
        .unwrap_or("request rejected by the server")
        .to_string();

    Error::Api {
        status,
        message,
        details: flatten_details(parsed.get("details")),
    }
}

fn flatten_details(details: Option<&Value>) -> Vec<String> {
    let Some(items) = details.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| match (item.get("field"), item.get("message")) {
            (Some(Value::String(field)), Some(Value::String(message))) => {
                format!("{}: {}", field, message)
            }
            _ => match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doctype_sniff() {
        assert!(looks_like_html("<!DOCTYPE html><html>...</html>"));
        assert!(looks_like_html("  <!doctype html>"));
        assert!(!looks_like_html("{\"message\": \"ok\"}"));
        assert!(!looks_like_html(""));
    }

    #[test]
    fn test_parse_structured_rejection() {
        let body = r#"{
            "message": "Validation failed",
            "error": "Bad Request",
            "details": [
                {"field": "titre", "message": "must not be empty"},
                {"field": "dateIncident", "message": "must be a date"}
            ]
        }"#;
        let err = parse_api_error(400, body);
        match err {
            Error::Api {
                status,
                message,
                details,
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Validation failed");
                assert_eq!(
                    details,
                    vec![
                        "titre: must not be empty".to_string(),
                        "dateIncident: must be a date".to_string()
                    ]
                );
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unstructured_rejection() {
        let err = parse_api_error(500, "boom");
        match err {
            Error::Api {
                status, details, ..
            } => {
                assert_eq!(status, 500);
                assert!(details.is_empty());
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_messages_prefer_details() {
        let err = Error::Api {
            status: 422,
            message: "Validation failed".to_string(),
            details: vec!["zone: unknown zone".to_string()],
        };
        assert_eq!(err.validation_messages(), vec!["zone: unknown zone"]);

        let bare = Error::Api {
            status: 422,
            message: "Validation failed".to_string(),
            details: vec![],
        };
        assert_eq!(bare.validation_messages(), vec!["Validation failed"]);
    }
}
