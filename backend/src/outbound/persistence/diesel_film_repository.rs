//! PostgreSQL-backed `FilmRepository` implementation using Diesel ORM.
//!
//! Films are stored across three tables: the scalar columns in `films`,
//! genre associations in `film_genres`, and likes in `film_likes`. Reads
//! batch-fetch the association tables keyed by the selected film ids and
//! merge them in memory; writes touching more than one table run inside a
//! transaction.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::film::{Film, FilmDraft, Genre, MpaRating};
use crate::domain::ports::{FilmRepository, FilmStoreError};

use super::diesel_error_mapping::{map_pool_error, map_read_diesel_error, map_write_diesel_error};
use super::models::{FilmChangeset, FilmGenreRow, FilmLikeRow, FilmRow, GenreRow, MpaRow, NewFilmRow};
use super::pool::{DbPool, PoolError};
use super::schema::{film_genres, film_likes, films, genres, mpa_ratings};

/// Diesel-backed implementation of the `FilmRepository` port.
#[derive(Clone)]
pub struct DieselFilmRepository {
    pool: DbPool,
}

impl DieselFilmRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> FilmStoreError {
    map_pool_error(error, |message| FilmStoreError::connection(message))
}

fn map_read(error: diesel::result::Error) -> FilmStoreError {
    map_read_diesel_error(
        error,
        |message| FilmStoreError::query(message),
        |message| FilmStoreError::connection(message),
    )
}

fn map_write(error: diesel::result::Error) -> FilmStoreError {
    map_write_diesel_error(
        error,
        |message| FilmStoreError::query(message),
        |message| FilmStoreError::connection(message),
        |message| FilmStoreError::duplicate(message),
    )
}

fn genre_rows_for(film_id: i64, genre_ids: &[i32]) -> Vec<FilmGenreRow> {
    genre_ids
        .iter()
        .map(|genre_id| FilmGenreRow {
            film_id,
            genre_id: *genre_id,
        })
        .collect()
}

/// Merge association rows into the film rows, preserving the input order.
async fn load_films(
    conn: &mut AsyncPgConnection,
    film_rows: Vec<FilmRow>,
) -> Result<Vec<Film>, diesel::result::Error> {
    if film_rows.is_empty() {
        return Ok(Vec::new());
    }

    let film_ids: Vec<i64> = film_rows.iter().map(|row| row.id).collect();
    let mut mpa_ids: Vec<i32> = film_rows.iter().map(|row| row.mpa_id).collect();
    mpa_ids.sort_unstable();
    mpa_ids.dedup();

    let rating_rows: Vec<MpaRow> = mpa_ratings::table
        .filter(mpa_ratings::id.eq_any(&mpa_ids))
        .select(MpaRow::as_select())
        .load(conn)
        .await?;
    let ratings_by_id: HashMap<i32, String> = rating_rows
        .into_iter()
        .map(|row| (row.id, row.name))
        .collect();

    let genre_rows: Vec<(i64, GenreRow)> = film_genres::table
        .inner_join(genres::table)
        .filter(film_genres::film_id.eq_any(&film_ids))
        .order((film_genres::film_id, genres::id))
        .select((film_genres::film_id, GenreRow::as_select()))
        .load(conn)
        .await?;
    let mut genres_by_film: HashMap<i64, Vec<Genre>> = HashMap::new();
    for (film_id, row) in genre_rows {
        genres_by_film.entry(film_id).or_default().push(Genre {
            id: row.id,
            name: row.name,
        });
    }

    let like_rows: Vec<FilmLikeRow> = film_likes::table
        .filter(film_likes::film_id.eq_any(&film_ids))
        .select(FilmLikeRow::as_select())
        .load(conn)
        .await?;
    let mut likes_by_film: HashMap<i64, BTreeSet<i64>> = HashMap::new();
    for row in like_rows {
        likes_by_film
            .entry(row.film_id)
            .or_default()
            .insert(row.user_id);
    }

    film_rows
        .into_iter()
        .map(|row| {
            // The FK guarantees the rating row exists; a miss means the
            // snapshot is inconsistent.
            let name = ratings_by_id
                .get(&row.mpa_id)
                .cloned()
                .ok_or(diesel::result::Error::NotFound)?;
            Ok(Film {
                id: row.id,
                name: row.name,
                description: row.description,
                release_date: row.release_date,
                duration: row.duration,
                mpa: MpaRating {
                    id: row.mpa_id,
                    name,
                },
                genres: genres_by_film.remove(&row.id).unwrap_or_default(),
                likes: likes_by_film.remove(&row.id).unwrap_or_default(),
            })
        })
        .collect()
}

#[async_trait]
impl FilmRepository for DieselFilmRepository {
    async fn list(&self) -> Result<Vec<Film>, FilmStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<FilmRow> = films::table
            .select(FilmRow::as_select())
            .order_by(films::id)
            .load(&mut conn)
            .await
            .map_err(map_read)?;

        load_films(&mut conn, rows).await.map_err(map_read)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Film>, FilmStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<FilmRow> = films::table
            .find(id)
            .select(FilmRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut loaded = load_films(&mut conn, vec![row]).await.map_err(map_read)?;
        Ok(loaded.pop())
    }

    async fn create(&self, draft: &FilmDraft) -> Result<i64, FilmStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewFilmRow {
            name: &draft.name,
            description: draft.description.as_deref(),
            release_date: draft.release_date,
            duration: draft.duration,
            mpa_id: draft.mpa_id,
        };
        let genre_ids = &draft.genre_ids;

        let id = conn
            .transaction(|conn| {
                async move {
                    let id: i64 = diesel::insert_into(films::table)
                        .values(&new_row)
                        .returning(films::id)
                        .get_result(conn)
                        .await?;

                    let associations = genre_rows_for(id, genre_ids);
                    if !associations.is_empty() {
                        diesel::insert_into(film_genres::table)
                            .values(&associations)
                            .execute(conn)
                            .await?;
                    }
                    Ok::<i64, diesel::result::Error>(id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_write)?;

        debug!(film_id = id, "film row inserted");
        Ok(id)
    }

    async fn update(&self, id: i64, draft: &FilmDraft) -> Result<bool, FilmStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let changeset = FilmChangeset {
            name: &draft.name,
            description: draft.description.as_deref(),
            release_date: draft.release_date,
            duration: draft.duration,
            mpa_id: draft.mpa_id,
        };
        let genre_ids = &draft.genre_ids;

        conn.transaction(|conn| {
            async move {
                let updated = diesel::update(films::table.find(id))
                    .set(&changeset)
                    .execute(conn)
                    .await?;
                if updated == 0 {
                    return Ok(false);
                }

                diesel::delete(film_genres::table.filter(film_genres::film_id.eq(id)))
                    .execute(conn)
                    .await?;
                let associations = genre_rows_for(id, genre_ids);
                if !associations.is_empty() {
                    diesel::insert_into(film_genres::table)
                        .values(&associations)
                        .execute(conn)
                        .await?;
                }
                Ok::<bool, diesel::result::Error>(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_write)
    }

    async fn delete(&self, id: i64) -> Result<bool, FilmStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Association rows cascade with the film row.
        let deleted = diesel::delete(films::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_write)?;
        Ok(deleted > 0)
    }

    async fn add_like(&self, film_id: i64, user_id: i64) -> Result<(), FilmStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(film_likes::table)
            .values(&FilmLikeRow { film_id, user_id })
            .execute(&mut conn)
            .await
            .map_err(map_write)?;
        debug!(film_id, user_id, "like row inserted");
        Ok(())
    }

    async fn remove_like(&self, film_id: i64, user_id: i64) -> Result<bool, FilmStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(
            film_likes::table
                .filter(film_likes::film_id.eq(film_id))
                .filter(film_likes::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_write)?;
        Ok(deleted > 0)
    }

    async fn list_popular(
        &self,
        limit: i64,
        genre_id: Option<i32>,
        year: Option<i32>,
    ) -> Result<Vec<Film>, FilmStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let mut candidates = films::table.select(films::id).into_boxed();
        if let Some(genre) = genre_id {
            let with_genre = film_genres::table
                .filter(film_genres::genre_id.eq(genre))
                .select(film_genres::film_id);
            candidates = candidates.filter(films::id.eq_any(with_genre));
        }
        if let Some(year) = year {
            let Some(start) = NaiveDate::from_ymd_opt(year, 1, 1) else {
                return Ok(Vec::new());
            };
            let Some(end) = NaiveDate::from_ymd_opt(year + 1, 1, 1) else {
                return Ok(Vec::new());
            };
            candidates = candidates
                .filter(films::release_date.ge(start))
                .filter(films::release_date.lt(end));
        }
        let candidate_ids: Vec<i64> = candidates.load(&mut conn).await.map_err(map_read)?;
        if candidate_ids.is_empty() {
            return Ok(Vec::new());
        }

        let count_rows: Vec<(i64, i64)> = film_likes::table
            .filter(film_likes::film_id.eq_any(&candidate_ids))
            .group_by(film_likes::film_id)
            .select((film_likes::film_id, diesel::dsl::count_star()))
            .load(&mut conn)
            .await
            .map_err(map_read)?;
        let likes_by_film: HashMap<i64, i64> = count_rows.into_iter().collect();

        let mut ranked = candidate_ids;
        ranked.sort_by(|a, b| {
            let likes_a = likes_by_film.get(a).copied().unwrap_or(0);
            let likes_b = likes_by_film.get(b).copied().unwrap_or(0);
            likes_b.cmp(&likes_a).then_with(|| a.cmp(b))
        });
        ranked.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        let rows: Vec<FilmRow> = films::table
            .filter(films::id.eq_any(&ranked))
            .select(FilmRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read)?;
        let mut rows_by_id: HashMap<i64, FilmRow> =
            rows.into_iter().map(|row| (row.id, row)).collect();
        let ordered: Vec<FilmRow> = ranked
            .iter()
            .filter_map(|id| rows_by_id.remove(id))
            .collect();

        load_films(&mut conn, ordered).await.map_err(map_read)
    }
}
