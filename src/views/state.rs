use std::fmt::Display;
use tracing::{debug, warn};

/// What a view currently has to show for one fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Loading,
    /// User-facing message for a failed fetch
    Failed(String),
    Loaded(T),
}

impl<T> LoadState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Identifies one in-flight request against a [`ResultSlot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Load state guarded by a generation counter.
///
/// Every `begin` supersedes earlier requests; a response carrying an
/// older token is dropped instead of overwriting newer data.
#[derive(Debug, Clone)]
pub struct ResultSlot<T> {
    state: LoadState<T>,
    generation: u64,
    failure_message: String,
}

impl<T> ResultSlot<T> {
    pub fn new(failure_message: impl Into<String>) -> Self {
        Self {
            state: LoadState::Loading,
            generation: 0,
            failure_message: failure_message.into(),
        }
    }

    pub fn begin(&mut self) -> RequestToken {
        self.generation += 1;
        self.state = LoadState::Loading;
        RequestToken(self.generation)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.generation
    }

    /// Store the outcome of the request `token` was issued for.
    /// Returns `false` when the response was stale and got discarded.
    pub fn complete<E: Display>(&mut self, token: RequestToken, result: Result<T, E>) -> bool {
        if !self.is_current(token) {
            debug!(
                "Discarding stale response (generation {}, current {})",
                token.0, self.generation
            );
            return false;
        }
        self.state = match result {
            Ok(value) => LoadState::Loaded(value),
            Err(err) => {
                warn!("{}: {}", self.failure_message, err);
                LoadState::Failed(self.failure_message.clone())
            }
        };
        true
    }

    /// Overwrite with already-known data, cancelling anything in flight
    pub fn set(&mut self, value: T) {
        self.generation += 1;
        self.state = LoadState::Loaded(value);
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn loaded(&self) -> Option<&T> {
        self.state.loaded()
    }
}
