use std::fmt;

/// Result type for qhse-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the service layer.
///
/// Everything here is terminal at the screen/handler level: callers report
/// and stop, nothing bubbles into a global failure path.
#[derive(Debug)]
pub enum Error {
    /// Configuration error (missing/invalid config file, bad base URL)
    Config(String),

    /// IO operation failed (token store, config file)
    Io(std::io::Error),

    /// Transport-level failure (connection refused, timeout, TLS)
    Http(reqwest::Error),

    /// The stored token was rejected; credentials have been cleared
    Unauthorized,

    /// Structured rejection from the API, details flattened to
    /// `field: message` strings
    Api {
        status: u16,
        message: String,
        details: Vec<String>,
    },

    /// The server answered with something that is not JSON (typically an
    /// HTML error page)
    MalformedResponse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Http(err) => write!(f, "Request failed: {}", err),
            Error::Unauthorized => write!(f, "Session expired, please log in again"),
            Error::Api {
                status, message, ..
            } => write!(f, "API error ({}): {}", status, message),
            Error::MalformedResponse(msg) => write!(f, "Server returned a non-JSON response: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl Error {
    /// Validation-style messages to append to a form's error list. Client
    /// and server violations are deliberately indistinguishable there.
    pub fn validation_messages(&self) -> Vec<String> {
        match self {
            Error::Api {
                message, details, ..
            } => {
                if details.is_empty() {
                    vec![message.clone()]
                } else {
                    details.clone()
                }
            }
            other => vec![other.to_string()],
        }
    }
}
