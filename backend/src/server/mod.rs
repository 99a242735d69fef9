//! Server construction: state wiring, route registration, and startup.

mod config;

pub use config::{ConfigError, ServerConfig};

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use diesel::pg::PgConnection;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{
    FilmCatalogService, GenreQueryService, MpaQueryService, UserDirectoryService,
};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{films, genres, mpa, users};
use crate::outbound::persistence::{
    DbPool, DieselFilmRepository, DieselGenreRepository, DieselMpaRepository,
    DieselUserRepository, PoolConfig,
};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply pending embedded migrations over a synchronous connection.
///
/// Runs once at startup, before the async pool is built; `diesel-async`
/// cannot drive the migration harness.
pub fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut connection = PgConnection::establish(database_url)
        .map_err(|err| std::io::Error::other(format!("database connection failed: {err}")))?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
    info!(count = applied.len(), "migrations applied");
    Ok(())
}

/// Wire the Diesel repositories into the domain services.
pub fn build_http_state(pool: DbPool) -> HttpState {
    let film_repo = Arc::new(DieselFilmRepository::new(pool.clone()));
    let user_repo = Arc::new(DieselUserRepository::new(pool.clone()));
    let genre_repo = Arc::new(DieselGenreRepository::new(pool.clone()));
    let mpa_repo = Arc::new(DieselMpaRepository::new(pool));

    HttpState::new(
        Arc::new(FilmCatalogService::new(
            film_repo,
            user_repo.clone(),
            genre_repo.clone(),
            mpa_repo.clone(),
        )),
        Arc::new(UserDirectoryService::new(user_repo)),
        Arc::new(GenreQueryService::new(genre_repo)),
        Arc::new(MpaQueryService::new(mpa_repo)),
    )
}

/// Register the REST endpoints under `/api/v1`.
///
/// `popular_films` must precede `get_film`: both match two segments under
/// `/films` and actix resolves them in registration order.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(films::list_films)
            .service(films::popular_films)
            .service(films::create_film)
            .service(films::update_film)
            .service(films::get_film)
            .service(films::delete_film)
            .service(films::add_like)
            .service(films::remove_like)
            .service(users::list_users)
            .service(users::create_user)
            .service(users::update_user)
            .service(users::get_user)
            .service(users::delete_user)
            .service(users::list_friends)
            .service(users::common_friends)
            .service(users::add_friend)
            .service(users::remove_friend)
            .service(genres::list_genres)
            .service(genres::get_genre)
            .service(mpa::list_ratings)
            .service(mpa::get_rating),
    );
}

/// Run migrations, build the pool and state, and serve until shutdown.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    run_migrations(&config.database_url)?;

    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let http_state = web::Data::new(build_http_state(pool));
    let health_state = web::Data::new(HealthState::new());

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .configure(routes)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    info!(addr = %config.bind_addr, "server listening");
    server.run().await
}
