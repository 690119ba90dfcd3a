//! Shared application state for axum handlers.

use std::sync::Arc;

use hello_app::ports::UserRepository;
use hello_app::services::user_service::UserService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not need to
/// be `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<UR> {
    /// User CRUD service.
    pub user_service: Arc<UserService<UR>>,
}

impl<UR> Clone for AppState<UR> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
        }
    }
}

impl<UR> AppState<UR>
where
    UR: UserRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(user_service: UserService<UR>) -> Self {
        Self {
            user_service: Arc::new(user_service),
        }
    }
}
