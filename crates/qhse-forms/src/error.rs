use std::fmt;

/// Result type for qhse-forms operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the form engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Edit path has more than the supported two levels of nesting
    PathTooDeep(String),

    /// Edit path addresses a repeatable group item that does not exist
    IndexOutOfRange {
        group: String,
        index: usize,
        len: usize,
    },

    /// Edit path names a group that is not an array in the draft
    NotAGroup(String),

    /// A numeric field received a value that does not parse as a number
    InvalidNumber { field: String, raw: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PathTooDeep(path) => {
                write!(f, "Edit path '{}' exceeds two levels of nesting", path)
            }
            Error::IndexOutOfRange { group, index, len } => write!(
                f,
                "Index {} is out of range for group '{}' (len {})",
                index, group, len
            ),
            Error::NotAGroup(name) => write!(f, "Field '{}' is not a repeatable group", name),
            Error::InvalidNumber { field, raw } => {
                write!(f, "Field '{}' expects a number, got '{}'", field, raw)
            }
        }
    }
}

impl std::error::Error for Error {}
