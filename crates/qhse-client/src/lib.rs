pub mod config;
pub mod error;
pub mod http;
pub mod services;
pub mod session;

pub use config::{resolve_data_dir, Config};
pub use error::{Error, Result};
pub use http::HttpClient;
pub use services::{Client, EntityService};
pub use session::SessionStore;
