//! Background API worker.
//!
//! The draw loop must never block on the network, so a dedicated thread
//! owns the blocking client and exchanges messages with the UI over
//! channels. Fetches carry a generation number; the UI drops any response
//! whose generation is older than its latest request, so a slow fetch can
//! never overwrite the rows of a newer one.

use qhse_client::{Client, Error};
use qhse_types::{Module, ModuleStats, Periode};
use serde_json::Value;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

#[derive(Debug)]
pub enum ApiRequest {
    FetchList {
        generation: u64,
        module: Module,
        statut: Option<String>,
    },
    FetchStats {
        generation: u64,
        module: Module,
        periode: Periode,
    },
    Create {
        module: Module,
        payload: Value,
    },
    Update {
        module: Module,
        id: String,
        payload: Value,
    },
    Delete {
        module: Module,
        id: String,
    },
}

/// Thread-safe rendition of a client error, pre-digested for display.
#[derive(Debug, Clone)]
pub struct ApiFailure {
    pub unauthorized: bool,
    pub messages: Vec<String>,
}

impl From<Error> for ApiFailure {
    fn from(err: Error) -> Self {
        let unauthorized = matches!(err, Error::Unauthorized);
        let messages = match &err {
            Error::Api { .. } => err.validation_messages(),
            _ => vec![err.to_string()],
        };
        Self {
            unauthorized,
            messages,
        }
    }
}

impl ApiFailure {
    pub fn summary(&self) -> String {
        self.messages
            .first()
            .cloned()
            .unwrap_or_else(|| "request failed".to_string())
    }
}

#[derive(Debug)]
pub enum ApiResponse {
    List {
        generation: u64,
        module: Module,
        result: Result<Vec<Value>, ApiFailure>,
    },
    Stats {
        generation: u64,
        module: Module,
        result: Result<ModuleStats, ApiFailure>,
    },
    Created {
        module: Module,
        result: Result<Value, ApiFailure>,
    },
    Updated {
        module: Module,
        id: String,
        result: Result<Value, ApiFailure>,
    },
    Deleted {
        module: Module,
        id: String,
        result: Result<(), ApiFailure>,
    },
}

/// Spawn the worker thread. It exits when the request sender is dropped.
pub fn spawn(client: Client) -> (Sender<ApiRequest>, Receiver<ApiResponse>) {
    let (req_tx, req_rx) = mpsc::channel::<ApiRequest>();
    let (resp_tx, resp_rx) = mpsc::channel::<ApiResponse>();

    thread::spawn(move || {
        while let Ok(request) = req_rx.recv() {
            let response = execute(&client, request);
            if resp_tx.send(response).is_err() {
                break;
            }
        }
    });

    (req_tx, resp_rx)
}

fn execute(client: &Client, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::FetchList {
            generation,
            module,
            statut,
        } => {
            let filters: Vec<(&str, String)> = statut
                .into_iter()
                .map(|value| ("statut", value))
                .collect();
            ApiResponse::List {
                generation,
                module,
                result: client.module(module).list(&filters).map_err(Into::into),
            }
        }
        ApiRequest::FetchStats {
            generation,
            module,
            periode,
        } => ApiResponse::Stats {
            generation,
            module,
            result: client.module(module).stats(periode).map_err(Into::into),
        },
        ApiRequest::Create { module, payload } => ApiResponse::Created {
            module,
            result: client.module(module).create(&payload).map_err(Into::into),
        },
        ApiRequest::Update {
            module,
            id,
            payload,
        } => {
            let result = client
                .module(module)
                .update(&id, &payload)
                .map_err(Into::into);
            ApiResponse::Updated { module, id, result }
        }
        ApiRequest::Delete { module, id } => {
            let result = client.module(module).delete(&id).map_err(Into::into);
            ApiResponse::Deleted { module, id, result }
        }
    }
}
