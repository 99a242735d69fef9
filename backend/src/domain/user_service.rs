//! User directory domain service.
//!
//! Implements the [`UserDirectory`] driving port: draft normalisation,
//! friendship rules, and the user repository.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{UserDirectory, UserRepository, UserStoreError};
use crate::domain::user::{FriendshipStatus, User, UserDraft};
use crate::domain::Error;

fn map_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserStoreError::Query { message } => Error::internal(format!("user store error: {message}")),
        UserStoreError::Duplicate { message } => Error::conflict(message),
    }
}

fn user_not_found(id: i64) -> Error {
    Error::not_found(format!("user with id = {id} not found"))
}

/// User directory service over a user repository.
#[derive(Clone)]
pub struct UserDirectoryService<U> {
    users: Arc<U>,
}

impl<U> UserDirectoryService<U> {
    /// Create a new service over the user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> UserDirectoryService<U>
where
    U: UserRepository,
{
    async fn require_user(&self, id: i64) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn require_exists(&self, id: i64) -> Result<(), Error> {
        let exists = self.users.exists(id).await.map_err(map_store_error)?;
        if exists {
            Ok(())
        } else {
            Err(user_not_found(id))
        }
    }
}

#[async_trait]
impl<U> UserDirectory for UserDirectoryService<U>
where
    U: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_store_error)
    }

    async fn get_user(&self, id: i64) -> Result<User, Error> {
        self.require_user(id).await
    }

    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        let user = draft
            .normalised()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let id = self.users.create(&user).await.map_err(map_store_error)?;
        info!(user_id = id, login = %user.login, "user created");
        self.require_user(id).await
    }

    async fn update_user(&self, id: i64, draft: UserDraft) -> Result<User, Error> {
        let user = draft
            .normalised()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let updated = self.users.update(id, &user).await.map_err(map_store_error)?;
        if !updated {
            return Err(user_not_found(id));
        }
        info!(user_id = id, "user updated");
        self.require_user(id).await
    }

    async fn delete_user(&self, id: i64) -> Result<(), Error> {
        let deleted = self.users.delete(id).await.map_err(map_store_error)?;
        if !deleted {
            return Err(user_not_found(id));
        }
        info!(user_id = id, "user deleted");
        Ok(())
    }

    async fn add_friend(&self, id: i64, friend_id: i64) -> Result<User, Error> {
        if id == friend_id {
            return Err(
                Error::invalid_request(format!("user {id} cannot befriend itself"))
                    .with_details(json!({ "field": "friendId", "value": friend_id })),
            );
        }
        self.require_exists(id).await?;
        self.require_exists(friend_id).await?;

        self.users
            .add_friend(id, friend_id, FriendshipStatus::Unconfirmed)
            .await
            .map_err(map_store_error)?;
        debug!(user_id = id, friend_id, "friendship edge added");
        self.require_user(friend_id).await
    }

    async fn remove_friend(&self, id: i64, friend_id: i64) -> Result<(), Error> {
        self.require_exists(id).await?;
        self.require_exists(friend_id).await?;

        // Removing an absent edge is not an error.
        self.users
            .remove_friend(id, friend_id)
            .await
            .map_err(map_store_error)?;
        debug!(user_id = id, friend_id, "friendship edge removed");
        Ok(())
    }

    async fn friends_of(&self, id: i64) -> Result<Vec<User>, Error> {
        self.require_exists(id).await?;
        self.users.list_friends(id).await.map_err(map_store_error)
    }

    async fn common_friends(&self, id: i64, other_id: i64) -> Result<Vec<User>, Error> {
        self.require_exists(id).await?;
        self.require_exists(other_id).await?;
        self.users
            .list_common_friends(id, other_id)
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
