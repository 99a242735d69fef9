//! MPA rating reference HTTP handlers.
//!
//! ```text
//! GET /api/v1/mpa
//! GET /api/v1/mpa/{id}
//! ```

use actix_web::{get, web};

use crate::inbound::http::films::MpaResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List every rating, ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/mpa",
    responses(
        (status = 200, description = "All MPA ratings", body = [MpaResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["mpa"],
    operation_id = "listMpaRatings"
)]
#[get("/mpa")]
pub async fn list_ratings(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<MpaResponse>>> {
    let ratings = state.mpa.list_ratings().await?;
    Ok(web::Json(ratings.into_iter().map(Into::into).collect()))
}

/// Fetch one rating by id.
#[utoipa::path(
    get,
    path = "/api/v1/mpa/{id}",
    params(("id" = i32, Path, description = "Rating id")),
    responses(
        (status = 200, description = "The rating", body = MpaResponse),
        (status = 404, description = "Unknown rating", body = ErrorSchema)
    ),
    tags = ["mpa"],
    operation_id = "getMpaRating"
)]
#[get("/mpa/{id}")]
pub async fn get_rating(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MpaResponse>> {
    let rating = state.mpa.get_rating(path.into_inner()).await?;
    Ok(web::Json(rating.into()))
}
