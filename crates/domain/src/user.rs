//! User: the single persisted record managed by hello-service.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// A persisted user record.
///
/// `id` is `None` until the record has been saved; the repository assigns
/// it on first insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<UserId>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Create a builder for constructing a [`User`].
    #[must_use]
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }

    /// Return a copy of this user carrying `id`.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Step-by-step builder for [`User`].
#[derive(Debug, Default)]
pub struct UserBuilder {
    id: Option<UserId>,
    name: Option<String>,
    email: Option<String>,
}

impl UserBuilder {
    #[must_use]
    pub fn id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Consume the builder and return a [`User`].
    #[must_use]
    pub fn build(self) -> User {
        User {
            id: self.id,
            name: self.name.unwrap_or_default(),
            email: self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_unsaved_user_when_no_id_given() {
        let user = User::builder().name("Alice").build();
        assert_eq!(user.name, "Alice");
        assert!(user.id.is_none());
    }

    #[test]
    fn should_attach_id_with_with_id() {
        let user = User::builder().name("Bob").build().with_id(UserId::new(3));
        assert_eq!(user.id, Some(UserId::new(3)));
        assert_eq!(user.name, "Bob");
    }

    #[test]
    fn should_deserialize_without_id_or_email() {
        let user: User = serde_json::from_str(r#"{"name":"Carol"}"#).unwrap();
        assert_eq!(user, User::builder().name("Carol").build());
    }

    #[test]
    fn should_serialize_id_as_number() {
        let user = User::builder()
            .id(UserId::new(1))
            .name("Alice")
            .email("alice@example.com")
            .build();
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["name"], "Alice");
        assert_eq!(value["email"], "alice@example.com");
    }
}
