//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every HTTP endpoint from the inbound layer plus the schema
//! wrappers that keep domain types decoupled from utoipa. The generated
//! specification backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::films::{
    FilmPayload, FilmResponse, GenreRefPayload, GenreResponse, MpaRefPayload, MpaResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{FriendshipResponse, UserPayload, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Film catalog backend API",
        description = "HTTP interface for the film catalog: films, likes, \
                       users, friendships, and reference data.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::films::list_films,
        crate::inbound::http::films::popular_films,
        crate::inbound::http::films::get_film,
        crate::inbound::http::films::create_film,
        crate::inbound::http::films::update_film,
        crate::inbound::http::films::delete_film,
        crate::inbound::http::films::add_like,
        crate::inbound::http::films::remove_like,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::list_friends,
        crate::inbound::http::users::common_friends,
        crate::inbound::http::users::add_friend,
        crate::inbound::http::users::remove_friend,
        crate::inbound::http::genres::list_genres,
        crate::inbound::http::genres::get_genre,
        crate::inbound::http::mpa::list_ratings,
        crate::inbound::http::mpa::get_rating,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        FilmPayload,
        FilmResponse,
        MpaRefPayload,
        MpaResponse,
        GenreRefPayload,
        GenreResponse,
        UserPayload,
        UserResponse,
        FriendshipResponse,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "films", description = "Film catalog and likes"),
        (name = "users", description = "User directory and friendships"),
        (name = "genres", description = "Genre reference data"),
        (name = "mpa", description = "MPA rating reference data"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
