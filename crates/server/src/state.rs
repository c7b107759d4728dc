use std::sync::Arc;

use service::UserRepository;

/// Shared handler context built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}
