//! User Repository Module
//!
//! Persistence port for user records. The two-factor service only needs to
//! look a user up and write it back; storage technology stays behind the trait.

use super::error::UserError;
use super::models::User;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Repository trait defining operations for user data persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by their unique ID
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, UserError>;

    /// Finds a user by their email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Stores a new user
    async fn create(&self, user: &User) -> Result<(), UserError>;

    /// Writes back an existing user's record
    async fn update(&self, user: &User) -> Result<(), UserError>;
}

/// In-process repository backed by a locked map
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), UserError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(UserError::EmailTaken);
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), UserError> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            },
            None => Err(UserError::UserNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("jane@example.com");
        repo.create(&user).await.unwrap();

        assert_eq!(repo.find_by_id(&user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(repo.find_by_email("JANE@example.com").await.unwrap(), Some(user));
        assert_eq!(repo.find_by_id(&Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(&User::new("jane@example.com")).await.unwrap();

        let result = repo.create(&User::new("jane@example.com")).await;
        assert!(matches!(result, Err(UserError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_update_existing_and_missing() {
        let repo = InMemoryUserRepository::new();
        let mut user = User::new("jane@example.com");
        repo.create(&user).await.unwrap();

        user.enable_two_factor("JBSWY3DPEHPK3PXP");
        repo.update(&user).await.unwrap();
        let stored = repo.find_by_id(&user.id).await.unwrap().unwrap();
        assert!(stored.two_factor_enabled);

        let stranger = User::new("ghost@example.com");
        assert!(matches!(repo.update(&stranger).await, Err(UserError::UserNotFound)));
    }
}
