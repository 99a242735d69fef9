//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! User scalar columns live in `users`; directed friendship edges live in
//! `friendships`. Reads batch-fetch the edges keyed by the selected user ids
//! and merge them in memory.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::{debug, warn};

use crate::domain::ports::{UserRepository, UserStoreError};
use crate::domain::user::{Friendship, FriendshipStatus, User, ValidatedUser};

use super::diesel_error_mapping::{map_pool_error, map_read_diesel_error, map_write_diesel_error};
use super::models::{FriendshipRow, NewFriendshipRow, NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{friendships, users};

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserStoreError {
    map_pool_error(error, |message| UserStoreError::connection(message))
}

fn map_read(error: diesel::result::Error) -> UserStoreError {
    map_read_diesel_error(
        error,
        |message| UserStoreError::query(message),
        |message| UserStoreError::connection(message),
    )
}

fn map_write(error: diesel::result::Error) -> UserStoreError {
    map_write_diesel_error(
        error,
        |message| UserStoreError::query(message),
        |message| UserStoreError::connection(message),
        |message| UserStoreError::duplicate(message),
    )
}

fn row_to_friendship(row: FriendshipRow) -> Friendship {
    let status = row.status.parse().unwrap_or_else(|_| {
        warn!(
            user_id = row.user_id,
            friend_id = row.friend_id,
            value = %row.status,
            "unrecognised friendship status, defaulting to unconfirmed"
        );
        FriendshipStatus::Unconfirmed
    });
    Friendship {
        friend_id: row.friend_id,
        status,
    }
}

/// Merge outgoing friendship edges into the user rows, preserving order.
async fn load_users(
    conn: &mut AsyncPgConnection,
    user_rows: Vec<UserRow>,
) -> Result<Vec<User>, diesel::result::Error> {
    if user_rows.is_empty() {
        return Ok(Vec::new());
    }

    let user_ids: Vec<i64> = user_rows.iter().map(|row| row.id).collect();
    let edge_rows: Vec<FriendshipRow> = friendships::table
        .filter(friendships::user_id.eq_any(&user_ids))
        .order((friendships::user_id, friendships::friend_id))
        .select(FriendshipRow::as_select())
        .load(conn)
        .await?;

    let mut edges_by_user: HashMap<i64, Vec<Friendship>> = HashMap::new();
    for row in edge_rows {
        let owner = row.user_id;
        edges_by_user
            .entry(owner)
            .or_default()
            .push(row_to_friendship(row));
    }

    Ok(user_rows
        .into_iter()
        .map(|row| User {
            id: row.id,
            email: row.email,
            login: row.login,
            name: row.name,
            birthday: row.birthday,
            friends: edges_by_user.remove(&row.id).unwrap_or_default(),
        })
        .collect())
}

/// Friend ids of `id`, counting both edge directions.
async fn friend_id_set(
    conn: &mut AsyncPgConnection,
    id: i64,
) -> Result<Vec<i64>, diesel::result::Error> {
    let edges: Vec<(i64, i64)> = friendships::table
        .filter(friendships::user_id.eq(id).or(friendships::friend_id.eq(id)))
        .select((friendships::user_id, friendships::friend_id))
        .load(conn)
        .await?;

    let mut set: Vec<i64> = edges
        .into_iter()
        .map(|(owner, friend)| if owner == id { friend } else { owner })
        .collect();
    set.sort_unstable();
    set.dedup();
    Ok(set)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order_by(users::id)
            .load(&mut conn)
            .await
            .map_err(map_read)?;

        load_users(&mut conn, rows).await.map_err(map_read)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<UserRow> = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut loaded = load_users(&mut conn, vec![row]).await.map_err(map_read)?;
        Ok(loaded.pop())
    }

    async fn exists(&self, id: i64) -> Result<bool, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::select(diesel::dsl::exists(users::table.find(id)))
            .get_result(&mut conn)
            .await
            .map_err(map_read)
    }

    async fn create(&self, user: &ValidatedUser) -> Result<i64, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewUserRow {
            email: &user.email,
            login: &user.login,
            name: &user.name,
            birthday: user.birthday,
        };
        let id: i64 = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(map_write)?;

        debug!(user_id = id, "user row inserted");
        Ok(id)
    }

    async fn update(&self, id: i64, user: &ValidatedUser) -> Result<bool, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let changeset = UserChangeset {
            email: &user.email,
            login: &user.login,
            name: &user.name,
            birthday: user.birthday,
        };
        let updated = diesel::update(users::table.find(id))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_write)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Friendship and like rows cascade with the user row.
        let deleted = diesel::delete(users::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_write)?;
        Ok(deleted > 0)
    }

    async fn add_friend(
        &self,
        user_id: i64,
        friend_id: i64,
        status: FriendshipStatus,
    ) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(friendships::table)
            .values(&NewFriendshipRow {
                user_id,
                friend_id,
                status: status.as_str(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_write)?;
        debug!(user_id, friend_id, "friendship row inserted");
        Ok(())
    }

    async fn remove_friend(&self, user_id: i64, friend_id: i64) -> Result<bool, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(
            friendships::table
                .filter(friendships::user_id.eq(user_id))
                .filter(friendships::friend_id.eq(friend_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_write)?;
        Ok(deleted > 0)
    }

    async fn list_friends(&self, user_id: i64) -> Result<Vec<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let friend_ids = friendships::table
            .filter(friendships::user_id.eq(user_id))
            .select(friendships::friend_id);
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(friend_ids))
            .select(UserRow::as_select())
            .order_by(users::id)
            .load(&mut conn)
            .await
            .map_err(map_read)?;

        load_users(&mut conn, rows).await.map_err(map_read)
    }

    async fn list_common_friends(
        &self,
        id: i64,
        other_id: i64,
    ) -> Result<Vec<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let mine = friend_id_set(&mut conn, id).await.map_err(map_read)?;
        let theirs = friend_id_set(&mut conn, other_id).await.map_err(map_read)?;
        let shared: Vec<i64> = mine
            .into_iter()
            .filter(|candidate| theirs.binary_search(candidate).is_ok())
            .collect();
        if shared.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(&shared))
            .select(UserRow::as_select())
            .order_by(users::id)
            .load(&mut conn)
            .await
            .map_err(map_read)?;

        load_users(&mut conn, rows).await.map_err(map_read)
    }
}
