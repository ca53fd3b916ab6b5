//! Application state.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use crate::config::ServerConfig;

/// Application state shared across handlers.
///
/// Read-only; every request builds its own random source from it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Random source for one request: the configured seed, or fresh entropy.
    pub fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
