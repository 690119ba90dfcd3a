//! User service: use-cases for listing, looking up and saving users.

use hello_domain::error::HelloError;
use hello_domain::id::UserId;
use hello_domain::user::User;

use crate::ports::UserRepository;

/// Application service for user CRUD operations.
///
/// Stateless: every call goes straight to the repository and its errors are
/// returned unchanged.
pub struct UserService<R> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<User>, HelloError> {
        self.repo.find_all().await
    }

    /// Look up a user by id. A missing user is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, HelloError> {
        self.repo.find_by_id(id).await
    }

    /// Persist a user, inserting it when it has no id and upserting otherwise.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, user), fields(user_id = ?user.id))]
    pub async fn save(&self, user: User) -> Result<User, HelloError> {
        self.repo.save(user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet};
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryUserRepo {
        store: Mutex<BTreeMap<UserId, User>>,
    }

    impl UserRepository for InMemoryUserRepo {
        fn find_all(&self) -> impl Future<Output = Result<Vec<User>, HelloError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<User> = store.values().cloned().collect();
            async { Ok(result) }
        }

        fn find_by_id(
            &self,
            id: UserId,
        ) -> impl Future<Output = Result<Option<User>, HelloError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(&id).cloned();
            async { Ok(result) }
        }

        fn save(&self, user: User) -> impl Future<Output = Result<User, HelloError>> + Send {
            let mut store = self.store.lock().unwrap();
            let id = user.id.unwrap_or_else(|| {
                let next = store.keys().next_back().map_or(1, |last| last.get() + 1);
                UserId::new(next)
            });
            let saved = user.with_id(id);
            store.insert(id, saved.clone());
            async { Ok(saved) }
        }
    }

    struct FailingUserRepo;

    impl UserRepository for FailingUserRepo {
        async fn find_all(&self) -> Result<Vec<User>, HelloError> {
            Err(HelloError::Storage(Box::new(std::io::Error::other(
                "storage unavailable",
            ))))
        }

        async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, HelloError> {
            Err(HelloError::Storage(Box::new(std::io::Error::other(
                "storage unavailable",
            ))))
        }

        async fn save(&self, _user: User) -> Result<User, HelloError> {
            Err(HelloError::Storage(Box::new(std::io::Error::other(
                "storage unavailable",
            ))))
        }
    }

    fn make_service() -> UserService<InMemoryUserRepo> {
        UserService::new(InMemoryUserRepo::default())
    }

    #[tokio::test]
    async fn should_return_empty_list_when_repository_is_empty() {
        let svc = make_service();
        let all = svc.get_all().await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn should_return_saved_user_when_looked_up_by_explicit_id() {
        let svc = make_service();
        let alice = User::builder().id(UserId::new(1)).name("Alice").build();

        svc.save(alice.clone()).await.unwrap();

        let fetched = svc.get_by_id(UserId::new(1)).await.unwrap();
        assert_eq!(fetched, Some(alice));
    }

    #[tokio::test]
    async fn should_assign_id_when_saving_unidentified_user() {
        let svc = make_service();

        let saved = svc
            .save(User::builder().name("Bob").build())
            .await
            .unwrap();

        let id = saved.id.expect("repository should assign an id");
        let fetched = svc.get_by_id(id).await.unwrap();
        assert_eq!(fetched, Some(saved));
    }

    #[tokio::test]
    async fn should_return_none_when_user_missing() {
        let svc = make_service();
        let result = svc.get_by_id(UserId::new(404)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_exactly_the_saved_users() {
        let svc = make_service();
        let mut expected = HashSet::new();
        for name in ["Alice", "Bob", "Carol"] {
            let saved = svc.save(User::builder().name(name).build()).await.unwrap();
            expected.insert(saved.id);
        }

        let all = svc.get_all().await.unwrap();
        let ids: HashSet<_> = all.iter().map(|u| u.id).collect();
        assert_eq!(all.len(), 3);
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn should_overwrite_user_when_saving_with_existing_id() {
        let svc = make_service();
        let saved = svc
            .save(User::builder().name("Alice").build())
            .await
            .unwrap();

        let mut renamed = saved.clone();
        renamed.name = "Alicia".to_string();
        svc.save(renamed).await.unwrap();

        let all = svc.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Alicia");
        assert_eq!(all[0].id, saved.id);
    }

    #[tokio::test]
    async fn should_propagate_storage_error_unchanged() {
        let svc = UserService::new(FailingUserRepo);

        assert!(matches!(svc.get_all().await, Err(HelloError::Storage(_))));
        assert!(matches!(
            svc.get_by_id(UserId::new(1)).await,
            Err(HelloError::Storage(_))
        ));
        assert!(matches!(
            svc.save(User::builder().name("Alice").build()).await,
            Err(HelloError::Storage(_))
        ));
    }
}
