use std::fmt;

/// Result type for qhse-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// A scale label did not match any known value
    UnknownScale { scale: &'static str, value: String },

    /// A periode token did not match any known range
    UnknownPeriode(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownScale { scale, value } => {
                write!(f, "Unknown {} value: '{}'", scale, value)
            }
            Error::UnknownPeriode(token) => write!(f, "Unknown periode token: '{}'", token),
        }
    }
}

impl std::error::Error for Error {}
