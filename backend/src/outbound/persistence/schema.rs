//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation. When
//! a migration changes the schema, update this file to match (or regenerate
//! it with `diesel print-schema`).

diesel::table! {
    /// MPA rating reference table, seeded by the migrations.
    mpa_ratings (id) {
        id -> Int4,
        /// Rating code, e.g. `G` or `PG-13`.
        name -> Varchar,
    }
}

diesel::table! {
    /// Genre reference table, seeded by the migrations.
    genres (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Film catalog entries.
    films (id) {
        id -> Int8,
        name -> Varchar,
        /// Optional synopsis, at most 200 characters.
        description -> Nullable<Varchar>,
        release_date -> Date,
        /// Running time in minutes.
        duration -> Int4,
        mpa_id -> Int4,
    }
}

diesel::table! {
    /// Film-to-genre association rows.
    film_genres (film_id, genre_id) {
        film_id -> Int8,
        genre_id -> Int4,
    }
}

diesel::table! {
    /// One row per user like of a film.
    film_likes (film_id, user_id) {
        film_id -> Int8,
        user_id -> Int8,
    }
}

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Int8,
        email -> Varchar,
        login -> Varchar,
        name -> Varchar,
        birthday -> Date,
    }
}

diesel::table! {
    /// Directed friendship edges between users.
    friendships (user_id, friend_id) {
        user_id -> Int8,
        friend_id -> Int8,
        /// `unconfirmed` or `confirmed`.
        status -> Varchar,
    }
}

diesel::joinable!(films -> mpa_ratings (mpa_id));
diesel::joinable!(film_genres -> films (film_id));
diesel::joinable!(film_genres -> genres (genre_id));
diesel::joinable!(film_likes -> films (film_id));
diesel::joinable!(film_likes -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    mpa_ratings,
    genres,
    films,
    film_genres,
    film_likes,
    users,
    friendships,
);
