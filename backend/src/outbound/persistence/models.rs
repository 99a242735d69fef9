//! Diesel row structs used by the repository adapters.
//!
//! These types mirror the `schema.rs` tables and stay private to the
//! persistence layer; adapters convert them into domain aggregates.

use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::{film_genres, film_likes, films, friendships, genres, mpa_ratings, users};

/// Queryable row for MPA ratings.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mpa_ratings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MpaRow {
    pub id: i32,
    pub name: String,
}

/// Queryable row for genres.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = genres)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GenreRow {
    pub id: i32,
    pub name: String,
}

/// Queryable row for films, without associations.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = films)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FilmRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa_id: i32,
}

/// Insertable film row.
#[derive(Debug, Insertable)]
#[diesel(table_name = films)]
pub(crate) struct NewFilmRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa_id: i32,
}

/// Full-replace changeset for films.
///
/// `treat_none_as_null` makes an absent description clear the column
/// instead of being skipped.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = films)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct FilmChangeset<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa_id: i32,
}

/// Film-to-genre association row, used for both reads and batch inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = film_genres)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FilmGenreRow {
    pub film_id: i64,
    pub genre_id: i32,
}

/// Like row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = film_likes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FilmLikeRow {
    pub film_id: i64,
    pub user_id: i64,
}

/// Queryable row for users, without friendship edges.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
}

/// Insertable user row.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub login: &'a str,
    pub name: &'a str,
    pub birthday: NaiveDate,
}

/// Full-replace changeset for users.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub email: &'a str,
    pub login: &'a str,
    pub name: &'a str,
    pub birthday: NaiveDate,
}

/// Queryable friendship edge.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = friendships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FriendshipRow {
    pub user_id: i64,
    pub friend_id: i64,
    pub status: String,
}

/// Insertable friendship edge.
#[derive(Debug, Insertable)]
#[diesel(table_name = friendships)]
pub(crate) struct NewFriendshipRow<'a> {
    pub user_id: i64,
    pub friend_id: i64,
    pub status: &'a str,
}
