//! Storage port: repository trait for persisting users.

use std::future::Future;

use hello_domain::error::HelloError;
use hello_domain::id::UserId;
use hello_domain::user::User;

/// Repository for persisting and querying [`User`]s.
pub trait UserRepository {
    /// Get every stored user. Ordering is up to the implementation.
    fn find_all(&self) -> impl Future<Output = Result<Vec<User>, HelloError>> + Send;

    /// Get a user by its identifier, or `None` if no such user exists.
    fn find_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, HelloError>> + Send;

    /// Persist a user and return the stored record.
    ///
    /// A user without an id is inserted and comes back with a freshly
    /// assigned one. A user with an id replaces the stored row with that id,
    /// or is inserted under that id when no such row exists.
    fn save(&self, user: User) -> impl Future<Output = Result<User, HelloError>> + Send;
}
