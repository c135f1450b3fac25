use std::env;

use crate::error::StartupError;

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Dynamo,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_name: String,
    pub backend: Backend,
}

impl Config {
    /// Resolve configuration from `DYNAMODB_TABLE_NAME` and `DATABASE_BACKEND`.
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_vars(
            env::var("DYNAMODB_TABLE_NAME").ok(),
            env::var("DATABASE_BACKEND").ok(),
        )
    }

    pub fn from_vars(
        table_name: Option<String>,
        backend: Option<String>,
    ) -> Result<Self, StartupError> {
        let table_name = match table_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(StartupError::MissingTableName),
        };

        let backend = match backend.as_deref() {
            Some("memory") => Backend::Memory,
            _ => Backend::Dynamo,
        };

        Ok(Self {
            table_name,
            backend,
        })
    }
}
