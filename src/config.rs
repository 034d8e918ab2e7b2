use std::path::PathBuf;

use tonic::Status;

pub const CURSOR_BUFFER_DEFAULT: usize = 1;

pub const ENV_CURSOR_BUFFER: &str = "ENV_CURSOR_BUFFER";
pub const ENV_BOOK_CATALOG: &str = "ENV_BOOK_CATALOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Capacity of the channel between a cursor and its producer.
    pub cursor_buffer: usize,

    /// JSON lines catalog imported by `initLedger` after the built-in seed.
    pub catalog: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cursor_buffer: CURSOR_BUFFER_DEFAULT,
            catalog: None,
        }
    }
}

impl StoreConfig {
    /// Creates a config from a lookup function(e.g, [`std::env::var`]).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Status>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cursor_buffer: usize = match lookup(ENV_CURSOR_BUFFER) {
            None => CURSOR_BUFFER_DEFAULT,
            Some(s) => str::parse(s.trim())
                .map_err(|e| Status::invalid_argument(format!("invalid cursor buffer: {e}")))?,
        };
        if 0 == cursor_buffer {
            return Err(Status::invalid_argument("cursor buffer must be positive"));
        }
        let catalog: Option<PathBuf> = lookup(ENV_BOOK_CATALOG)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        Ok(Self {
            cursor_buffer,
            catalog,
        })
    }

    pub fn new_env() -> Result<Self, Status> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}
