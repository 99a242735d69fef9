//! Film catalog HTTP handlers.
//!
//! ```text
//! GET    /api/v1/films
//! POST   /api/v1/films
//! PUT    /api/v1/films
//! GET    /api/v1/films/popular
//! GET    /api/v1/films/{id}
//! DELETE /api/v1/films/{id}
//! PUT    /api/v1/films/{id}/like/{user_id}
//! DELETE /api/v1/films/{id}/like/{user_id}
//! ```
//!
//! `PUT /films` follows the legacy contract: the target id travels in the
//! request body, not the path.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::film::{Film, FilmDraft, Genre, MpaRating};
use crate::domain::Error;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// MPA rating reference in film payloads; only the id is read.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MpaRefPayload {
    pub id: i32,
}

/// Genre reference in film payloads; only the id is read.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GenreRefPayload {
    pub id: i32,
}

/// Request payload for creating or replacing a film.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilmPayload {
    /// Target film id; required for `PUT /films`, ignored on create.
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    /// Running time in minutes.
    pub duration: i32,
    pub mpa: MpaRefPayload,
    #[serde(default)]
    pub genres: Option<Vec<GenreRefPayload>>,
}

/// MPA rating in film responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct MpaResponse {
    pub id: i32,
    pub name: String,
}

impl From<MpaRating> for MpaResponse {
    fn from(value: MpaRating) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

/// Genre in film responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenreResponse {
    pub id: i32,
    pub name: String,
}

impl From<Genre> for GenreResponse {
    fn from(value: Genre) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

/// Response payload for a film with its associations.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilmResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa: MpaResponse,
    pub genres: Vec<GenreResponse>,
    /// Ids of users who liked the film, ascending.
    pub likes: Vec<i64>,
}

impl From<Film> for FilmResponse {
    fn from(value: Film) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            release_date: value.release_date,
            duration: value.duration,
            mpa: value.mpa.into(),
            genres: value.genres.into_iter().map(Into::into).collect(),
            likes: value.likes.into_iter().collect(),
        }
    }
}

/// Query parameters for the popularity ranking.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PopularQuery {
    /// Maximum number of films to return; defaults to 10.
    pub count: Option<i64>,
    /// Restrict the ranking to films carrying this genre.
    pub genre_id: Option<i32>,
    /// Restrict the ranking to films released in this year.
    pub year: Option<i32>,
}

const DEFAULT_POPULAR_COUNT: i64 = 10;

fn draft_from_payload(payload: FilmPayload) -> FilmDraft {
    FilmDraft {
        name: payload.name,
        description: payload.description,
        release_date: payload.release_date,
        duration: payload.duration,
        mpa_id: payload.mpa.id,
        genre_ids: payload
            .genres
            .unwrap_or_default()
            .into_iter()
            .map(|genre| genre.id)
            .collect(),
    }
}

/// List every film.
#[utoipa::path(
    get,
    path = "/api/v1/films",
    responses(
        (status = 200, description = "All films", body = [FilmResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["films"],
    operation_id = "listFilms"
)]
#[get("/films")]
pub async fn list_films(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<FilmResponse>>> {
    let films = state.films.list_films().await?;
    Ok(web::Json(films.into_iter().map(Into::into).collect()))
}

/// Films ranked by like count.
#[utoipa::path(
    get,
    path = "/api/v1/films/popular",
    params(PopularQuery),
    responses(
        (status = 200, description = "Most liked films first", body = [FilmResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["films"],
    operation_id = "popularFilms"
)]
#[get("/films/popular")]
pub async fn popular_films(
    state: web::Data<HttpState>,
    query: web::Query<PopularQuery>,
) -> ApiResult<web::Json<Vec<FilmResponse>>> {
    let query = query.into_inner();
    let count = query.count.unwrap_or(DEFAULT_POPULAR_COUNT);
    let films = state
        .films
        .popular_films(count, query.genre_id, query.year)
        .await?;
    Ok(web::Json(films.into_iter().map(Into::into).collect()))
}

/// Fetch one film by id.
#[utoipa::path(
    get,
    path = "/api/v1/films/{id}",
    params(("id" = i64, Path, description = "Film id")),
    responses(
        (status = 200, description = "The film", body = FilmResponse),
        (status = 404, description = "Unknown film", body = ErrorSchema)
    ),
    tags = ["films"],
    operation_id = "getFilm"
)]
#[get("/films/{id}")]
pub async fn get_film(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<FilmResponse>> {
    let film = state.films.get_film(path.into_inner()).await?;
    Ok(web::Json(film.into()))
}

/// Create a film.
#[utoipa::path(
    post,
    path = "/api/v1/films",
    request_body = FilmPayload,
    responses(
        (status = 200, description = "Created film", body = FilmResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["films"],
    operation_id = "createFilm"
)]
#[post("/films")]
pub async fn create_film(
    state: web::Data<HttpState>,
    payload: web::Json<FilmPayload>,
) -> ApiResult<web::Json<FilmResponse>> {
    let film = state
        .films
        .create_film(draft_from_payload(payload.into_inner()))
        .await?;
    Ok(web::Json(film.into()))
}

/// Replace a film; the target id travels in the body.
#[utoipa::path(
    put,
    path = "/api/v1/films",
    request_body = FilmPayload,
    responses(
        (status = 200, description = "Updated film", body = FilmResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown film", body = ErrorSchema)
    ),
    tags = ["films"],
    operation_id = "updateFilm"
)]
#[put("/films")]
pub async fn update_film(
    state: web::Data<HttpState>,
    payload: web::Json<FilmPayload>,
) -> ApiResult<web::Json<FilmResponse>> {
    let payload = payload.into_inner();
    let id = payload
        .id
        .ok_or_else(|| Error::not_found("film id must be provided"))?;
    let film = state
        .films
        .update_film(id, draft_from_payload(payload))
        .await?;
    Ok(web::Json(film.into()))
}

/// Delete a film.
#[utoipa::path(
    delete,
    path = "/api/v1/films/{id}",
    params(("id" = i64, Path, description = "Film id")),
    responses(
        (status = 204, description = "Film deleted"),
        (status = 404, description = "Unknown film", body = ErrorSchema)
    ),
    tags = ["films"],
    operation_id = "deleteFilm"
)]
#[delete("/films/{id}")]
pub async fn delete_film(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.films.delete_film(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Record a like and return the refreshed film.
#[utoipa::path(
    put,
    path = "/api/v1/films/{id}/like/{user_id}",
    params(
        ("id" = i64, Path, description = "Film id"),
        ("user_id" = i64, Path, description = "Liking user id")
    ),
    responses(
        (status = 200, description = "Refreshed film", body = FilmResponse),
        (status = 404, description = "Unknown film or user", body = ErrorSchema),
        (status = 409, description = "Like already recorded", body = ErrorSchema)
    ),
    tags = ["films"],
    operation_id = "addLike"
)]
#[put("/films/{id}/like/{user_id}")]
pub async fn add_like(
    state: web::Data<HttpState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<web::Json<FilmResponse>> {
    let (film_id, user_id) = path.into_inner();
    let film = state.films.add_like(film_id, user_id).await?;
    Ok(web::Json(film.into()))
}

/// Remove a like and return the refreshed film.
#[utoipa::path(
    delete,
    path = "/api/v1/films/{id}/like/{user_id}",
    params(
        ("id" = i64, Path, description = "Film id"),
        ("user_id" = i64, Path, description = "Liking user id")
    ),
    responses(
        (status = 200, description = "Refreshed film", body = FilmResponse),
        (status = 404, description = "Unknown film or user", body = ErrorSchema)
    ),
    tags = ["films"],
    operation_id = "removeLike"
)]
#[delete("/films/{id}/like/{user_id}")]
pub async fn remove_like(
    state: web::Data<HttpState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<web::Json<FilmResponse>> {
    let (film_id, user_id) = path.into_inner();
    let film = state.films.remove_like(film_id, user_id).await?;
    Ok(web::Json(film.into()))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use std::collections::BTreeSet;

    fn payload() -> FilmPayload {
        FilmPayload {
            id: None,
            name: "Film1".into(),
            description: Some("A film".into()),
            release_date: NaiveDate::from_ymd_opt(2004, 3, 15).expect("valid date"),
            duration: 88,
            mpa: MpaRefPayload { id: 1 },
            genres: Some(vec![GenreRefPayload { id: 2 }, GenreRefPayload { id: 1 }]),
        }
    }

    #[rstest]
    fn draft_keeps_payload_genre_order() {
        let draft = draft_from_payload(payload());
        // Deduplication and ordering happen in domain validation.
        assert_eq!(draft.genre_ids, vec![2, 1]);
        assert_eq!(draft.mpa_id, 1);
    }

    #[rstest]
    fn missing_genres_become_empty() {
        let mut p = payload();
        p.genres = None;
        let draft = draft_from_payload(p);
        assert!(draft.genre_ids.is_empty());
    }

    #[rstest]
    fn response_serialises_likes_ascending() {
        let film = Film {
            id: 5,
            name: "Film1".into(),
            description: None,
            release_date: NaiveDate::from_ymd_opt(2004, 3, 15).expect("valid date"),
            duration: 88,
            mpa: MpaRating {
                id: 1,
                name: "G".into(),
            },
            genres: Vec::new(),
            likes: BTreeSet::from([9, 3, 7]),
        };

        let response = FilmResponse::from(film);
        assert_eq!(response.likes, vec![3, 7, 9]);

        let json = serde_json::to_value(&response).expect("serialises");
        assert_eq!(json["releaseDate"], "2004-03-15");
        assert_eq!(json["mpa"]["name"], "G");
    }

    #[rstest]
    fn payload_parses_camel_case_fields() {
        let parsed: FilmPayload = serde_json::from_value(serde_json::json!({
            "name": "Film1",
            "releaseDate": "1999-05-01",
            "duration": 120,
            "mpa": { "id": 3 }
        }))
        .expect("parses");
        assert_eq!(parsed.duration, 120);
        assert_eq!(parsed.mpa.id, 3);
        assert!(parsed.genres.is_none());
    }
}
