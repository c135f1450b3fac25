use std::fmt;

/// Errors that stop the function before it serves any invocation.
///
/// These are returned from `main` so the runtime records them and the
/// process exits. They never become HTTP responses.
#[derive(Debug, PartialEq, Eq)]
pub enum StartupError {
    MissingTableName,
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::MissingTableName => {
                write!(f, "DYNAMODB_TABLE_NAME environment variable is not set")
            }
        }
    }
}

impl std::error::Error for StartupError {}

/// Storage failures scoped to a single invocation.
///
/// The handler logs these and answers with a 500; the message text stays
/// server-side.
#[derive(Debug)]
pub enum StoreError {
    Put(String),
    Scan(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Put(msg) => write!(f, "Put failed: {msg}"),
            StoreError::Scan(msg) => write!(f, "Scan failed: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
