//! Genre reference HTTP handlers.
//!
//! ```text
//! GET /api/v1/genres
//! GET /api/v1/genres/{id}
//! ```

use actix_web::{get, web};

use crate::inbound::http::films::GenreResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List every genre, ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/genres",
    responses(
        (status = 200, description = "All genres", body = [GenreResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["genres"],
    operation_id = "listGenres"
)]
#[get("/genres")]
pub async fn list_genres(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<GenreResponse>>> {
    let genres = state.genres.list_genres().await?;
    Ok(web::Json(genres.into_iter().map(Into::into).collect()))
}

/// Fetch one genre by id.
#[utoipa::path(
    get,
    path = "/api/v1/genres/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "The genre", body = GenreResponse),
        (status = 404, description = "Unknown genre", body = ErrorSchema)
    ),
    tags = ["genres"],
    operation_id = "getGenre"
)]
#[get("/genres/{id}")]
pub async fn get_genre(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<GenreResponse>> {
    let genre = state.genres.get_genre(path.into_inner()).await?;
    Ok(web::Json(genre.into()))
}
