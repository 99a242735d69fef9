//! Integration coverage for the REST surface.
//!
//! Exercises the real Actix handlers and domain services over an in-memory
//! store, so routing, payload shapes, and status codes are tested end to end
//! without a database.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use actix_rt::System;
use actix_web::{test as actix_test, web, App};
use async_trait::async_trait;
use chrono::NaiveDate;
use rstest::rstest;
use serde_json::{json, Value};

use backend::domain::film::{Film, FilmDraft, Genre, MpaRating};
use backend::domain::ports::{
    FilmRepository, FilmStoreError, GenreRepository, MpaRepository, ReferenceStoreError,
    UserRepository, UserStoreError,
};
use backend::domain::user::{Friendship, FriendshipStatus, User, ValidatedUser};
use backend::domain::{
    FilmCatalogService, GenreQueryService, MpaQueryService, UserDirectoryService,
};
use backend::inbound::http::state::HttpState;
use backend::server::routes;

// -----------------------------------------------------------------------------
// In-memory store implementing the driven ports
// -----------------------------------------------------------------------------

#[derive(Clone)]
struct StoredUser {
    email: String,
    login: String,
    name: String,
    birthday: NaiveDate,
}

#[derive(Default)]
struct InMemoryStore {
    films: Mutex<HashMap<i64, Film>>,
    next_film_id: AtomicI64,
    users: Mutex<HashMap<i64, StoredUser>>,
    next_user_id: AtomicI64,
    edges: Mutex<BTreeMap<(i64, i64), FriendshipStatus>>,
    genres: Vec<Genre>,
    mpa: Vec<MpaRating>,
}

impl InMemoryStore {
    fn new() -> Self {
        Self {
            next_film_id: AtomicI64::new(1),
            next_user_id: AtomicI64::new(1),
            genres: vec![
                Genre {
                    id: 1,
                    name: "Comedy".into(),
                },
                Genre {
                    id: 2,
                    name: "Drama".into(),
                },
                Genre {
                    id: 3,
                    name: "Cartoon".into(),
                },
            ],
            mpa: vec![
                MpaRating {
                    id: 1,
                    name: "G".into(),
                },
                MpaRating {
                    id: 2,
                    name: "PG".into(),
                },
            ],
            ..Self::default()
        }
    }

    fn assemble_film(&self, draft: &FilmDraft, id: i64) -> Film {
        let mpa = self
            .mpa
            .iter()
            .find(|rating| rating.id == draft.mpa_id)
            .cloned()
            .expect("reference checks ran before create");
        let genres = self
            .genres
            .iter()
            .filter(|genre| draft.genre_ids.contains(&genre.id))
            .cloned()
            .collect();
        Film {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            release_date: draft.release_date,
            duration: draft.duration,
            mpa,
            genres,
            likes: BTreeSet::new(),
        }
    }

    fn assemble_user(&self, id: i64, stored: &StoredUser) -> User {
        let edges = self.edges.lock().expect("store poisoned");
        let friends = edges
            .iter()
            .filter(|((owner, _), _)| *owner == id)
            .map(|((_, friend_id), status)| Friendship {
                friend_id: *friend_id,
                status: *status,
            })
            .collect();
        User {
            id,
            email: stored.email.clone(),
            login: stored.login.clone(),
            name: stored.name.clone(),
            birthday: stored.birthday,
            friends,
        }
    }

    fn friend_set(&self, id: i64) -> Vec<i64> {
        let edges = self.edges.lock().expect("store poisoned");
        let mut set: Vec<i64> = edges
            .keys()
            .filter_map(|(a, b)| {
                if *a == id {
                    Some(*b)
                } else if *b == id {
                    Some(*a)
                } else {
                    None
                }
            })
            .collect();
        set.sort_unstable();
        set.dedup();
        set
    }

    fn load_users(&self, ids: &[i64]) -> Vec<User> {
        let users = self.users.lock().expect("store poisoned");
        ids.iter()
            .filter_map(|id| users.get(id).map(|stored| (*id, stored.clone())))
            .map(|(id, stored)| self.assemble_user(id, &stored))
            .collect()
    }
}

#[async_trait]
impl FilmRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Film>, FilmStoreError> {
        let films = self.films.lock().expect("store poisoned");
        let mut all: Vec<Film> = films.values().cloned().collect();
        all.sort_by_key(|film| film.id);
        Ok(all)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Film>, FilmStoreError> {
        Ok(self.films.lock().expect("store poisoned").get(&id).cloned())
    }

    async fn create(&self, draft: &FilmDraft) -> Result<i64, FilmStoreError> {
        let id = self.next_film_id.fetch_add(1, Ordering::SeqCst);
        let film = self.assemble_film(draft, id);
        self.films.lock().expect("store poisoned").insert(id, film);
        Ok(id)
    }

    async fn update(&self, id: i64, draft: &FilmDraft) -> Result<bool, FilmStoreError> {
        let mut films = self.films.lock().expect("store poisoned");
        let Some(existing) = films.get(&id) else {
            return Ok(false);
        };
        let mut film = self.assemble_film(draft, id);
        film.likes = existing.likes.clone();
        films.insert(id, film);
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, FilmStoreError> {
        Ok(self
            .films
            .lock()
            .expect("store poisoned")
            .remove(&id)
            .is_some())
    }

    async fn add_like(&self, film_id: i64, user_id: i64) -> Result<(), FilmStoreError> {
        let mut films = self.films.lock().expect("store poisoned");
        let film = films
            .get_mut(&film_id)
            .ok_or_else(|| FilmStoreError::query("film row vanished"))?;
        if !film.likes.insert(user_id) {
            return Err(FilmStoreError::duplicate(format!(
                "like ({film_id}, {user_id}) already exists"
            )));
        }
        Ok(())
    }

    async fn remove_like(&self, film_id: i64, user_id: i64) -> Result<bool, FilmStoreError> {
        let mut films = self.films.lock().expect("store poisoned");
        let film = films
            .get_mut(&film_id)
            .ok_or_else(|| FilmStoreError::query("film row vanished"))?;
        Ok(film.likes.remove(&user_id))
    }

    async fn list_popular(
        &self,
        limit: i64,
        genre_id: Option<i32>,
        year: Option<i32>,
    ) -> Result<Vec<Film>, FilmStoreError> {
        use chrono::Datelike;

        let films = self.films.lock().expect("store poisoned");
        let mut ranked: Vec<Film> = films
            .values()
            .filter(|film| {
                genre_id.is_none_or(|g| film.genres.iter().any(|genre| genre.id == g))
                    && year.is_none_or(|y| film.release_date.year() == y)
            })
            .cloned()
            .collect();
        ranked.sort_by(|a, b| {
            b.like_count()
                .cmp(&a.like_count())
                .then_with(|| a.id.cmp(&b.id))
        });
        ranked.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(ranked)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<User>, UserStoreError> {
        let ids: Vec<i64> = {
            let users = self.users.lock().expect("store poisoned");
            let mut ids: Vec<i64> = users.keys().copied().collect();
            ids.sort_unstable();
            ids
        };
        Ok(self.load_users(&ids))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserStoreError> {
        Ok(self.load_users(&[id]).pop())
    }

    async fn exists(&self, id: i64) -> Result<bool, UserStoreError> {
        Ok(self.users.lock().expect("store poisoned").contains_key(&id))
    }

    async fn create(&self, user: &ValidatedUser) -> Result<i64, UserStoreError> {
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        self.users.lock().expect("store poisoned").insert(
            id,
            StoredUser {
                email: user.email.clone(),
                login: user.login.clone(),
                name: user.name.clone(),
                birthday: user.birthday,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, user: &ValidatedUser) -> Result<bool, UserStoreError> {
        let mut users = self.users.lock().expect("store poisoned");
        let Some(stored) = users.get_mut(&id) else {
            return Ok(false);
        };
        stored.email = user.email.clone();
        stored.login = user.login.clone();
        stored.name = user.name.clone();
        stored.birthday = user.birthday;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, UserStoreError> {
        let removed = self
            .users
            .lock()
            .expect("store poisoned")
            .remove(&id)
            .is_some();
        if removed {
            self.edges
                .lock()
                .expect("store poisoned")
                .retain(|(a, b), _| *a != id && *b != id);
        }
        Ok(removed)
    }

    async fn add_friend(
        &self,
        user_id: i64,
        friend_id: i64,
        status: FriendshipStatus,
    ) -> Result<(), UserStoreError> {
        let mut edges = self.edges.lock().expect("store poisoned");
        if edges.insert((user_id, friend_id), status).is_some() {
            return Err(UserStoreError::duplicate(format!(
                "friendship ({user_id}, {friend_id}) already exists"
            )));
        }
        Ok(())
    }

    async fn remove_friend(&self, user_id: i64, friend_id: i64) -> Result<bool, UserStoreError> {
        let mut edges = self.edges.lock().expect("store poisoned");
        Ok(edges.remove(&(user_id, friend_id)).is_some())
    }

    async fn list_friends(&self, user_id: i64) -> Result<Vec<User>, UserStoreError> {
        let friend_ids: Vec<i64> = {
            let edges = self.edges.lock().expect("store poisoned");
            edges
                .keys()
                .filter(|(owner, _)| *owner == user_id)
                .map(|(_, friend_id)| *friend_id)
                .collect()
        };
        Ok(self.load_users(&friend_ids))
    }

    async fn list_common_friends(
        &self,
        id: i64,
        other_id: i64,
    ) -> Result<Vec<User>, UserStoreError> {
        let mine = self.friend_set(id);
        let theirs = self.friend_set(other_id);
        let shared: Vec<i64> = mine
            .into_iter()
            .filter(|candidate| theirs.contains(candidate))
            .collect();
        Ok(self.load_users(&shared))
    }
}

#[async_trait]
impl GenreRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Genre>, ReferenceStoreError> {
        Ok(self.genres.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, ReferenceStoreError> {
        Ok(self.genres.iter().find(|genre| genre.id == id).cloned())
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ReferenceStoreError> {
        Ok(ids
            .iter()
            .copied()
            .filter(|id| self.genres.iter().any(|genre| genre.id == *id))
            .collect())
    }
}

#[async_trait]
impl MpaRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<MpaRating>, ReferenceStoreError> {
        Ok(self.mpa.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<MpaRating>, ReferenceStoreError> {
        Ok(self.mpa.iter().find(|rating| rating.id == id).cloned())
    }

    async fn exists(&self, id: i32) -> Result<bool, ReferenceStoreError> {
        Ok(self.mpa.iter().any(|rating| rating.id == id))
    }
}

// -----------------------------------------------------------------------------
// Harness
// -----------------------------------------------------------------------------

fn http_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    HttpState::new(
        Arc::new(FilmCatalogService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        )),
        Arc::new(UserDirectoryService::new(store.clone())),
        Arc::new(GenreQueryService::new(store.clone())),
        Arc::new(MpaQueryService::new(store)),
    )
}

macro_rules! service {
    () => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new(http_state()))
                .configure(routes),
        )
        .await
    };
}

async fn post_json(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    path: &str,
    body: Value,
) -> (u16, Value) {
    let request = actix_test::TestRequest::post()
        .uri(path)
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    let status = response.status().as_u16();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

async fn get_json(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    path: &str,
) -> (u16, Value) {
    let request = actix_test::TestRequest::get().uri(path).to_request();
    let response = actix_test::call_service(app, request).await;
    let status = response.status().as_u16();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

fn film_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "A film",
        "releaseDate": "2004-03-15",
        "duration": 88,
        "mpa": { "id": 1 },
        "genres": [{ "id": 2 }, { "id": 1 }]
    })
}

fn user_body(login: &str) -> Value {
    json!({
        "email": format!("{login}@example.com"),
        "login": login,
        "name": format!("{login} name"),
        "birthday": "1990-06-01"
    })
}

// -----------------------------------------------------------------------------
// Films
// -----------------------------------------------------------------------------

#[rstest]
fn film_crud_round_trip() {
    System::new().block_on(async {
        let app = service!();

        let (status, created) = post_json(&app, "/api/v1/films", film_body("Film1")).await;
        assert_eq!(status, 200);
        let id = created["id"].as_i64().expect("id assigned");
        assert_eq!(created["mpa"]["name"], "G");
        // Duplicated or unordered genre ids come back sorted and unique.
        assert_eq!(created["genres"][0]["id"], 1);
        assert_eq!(created["genres"][1]["id"], 2);

        let (status, fetched) = get_json(&app, &format!("/api/v1/films/{id}")).await;
        assert_eq!(status, 200);
        assert_eq!(fetched["name"], "Film1");

        let request = actix_test::TestRequest::put()
            .uri("/api/v1/films")
            .set_json(json!({
                "id": id,
                "name": "Film1 redux",
                "releaseDate": "2004-03-15",
                "duration": 90,
                "mpa": { "id": 2 },
                "genres": [{ "id": 3 }]
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status().as_u16(), 200);
        let updated: Value = actix_test::read_body_json(response).await;
        assert_eq!(updated["name"], "Film1 redux");
        assert_eq!(updated["description"], Value::Null);
        assert_eq!(updated["mpa"]["id"], 2);

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/films/{id}"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status().as_u16(), 204);

        let (status, body) = get_json(&app, &format!("/api/v1/films/{id}")).await;
        assert_eq!(status, 404);
        assert_eq!(body["code"], "not_found");
    });
}

#[rstest]
fn film_update_without_id_is_not_found() {
    System::new().block_on(async {
        let app = service!();

        let request = actix_test::TestRequest::put()
            .uri("/api/v1/films")
            .set_json(film_body("No id"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status().as_u16(), 404);
    });
}

#[rstest]
fn film_validation_failures_are_bad_requests() {
    System::new().block_on(async {
        let app = service!();

        let mut body = film_body("Too early");
        body["releaseDate"] = json!("1895-12-27");
        let (status, error) = post_json(&app, "/api/v1/films", body).await;
        assert_eq!(status, 400);
        assert_eq!(error["code"], "invalid_request");

        let mut body = film_body("Unknown genre");
        body["genres"] = json!([{ "id": 99 }]);
        let (status, error) = post_json(&app, "/api/v1/films", body).await;
        assert_eq!(status, 400);
        assert_eq!(error["details"]["id"], 99);

        let mut body = film_body("Bad duration");
        body["duration"] = json!(0);
        let (status, _) = post_json(&app, "/api/v1/films", body).await;
        assert_eq!(status, 400);
    });
}

#[rstest]
fn likes_update_the_film_and_reject_duplicates() {
    System::new().block_on(async {
        let app = service!();

        let (_, user) = post_json(&app, "/api/v1/users", user_body("ada")).await;
        let user_id = user["id"].as_i64().expect("user id");
        let (_, film) = post_json(&app, "/api/v1/films", film_body("Film1")).await;
        let film_id = film["id"].as_i64().expect("film id");

        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/films/{film_id}/like/{user_id}"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status().as_u16(), 200);
        let liked: Value = actix_test::read_body_json(response).await;
        assert_eq!(liked["likes"], json!([user_id]));

        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/films/{film_id}/like/{user_id}"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status().as_u16(), 409);

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/films/{film_id}/like/{user_id}"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status().as_u16(), 200);
        let unliked: Value = actix_test::read_body_json(response).await;
        assert_eq!(unliked["likes"], json!([]));
    });
}

#[rstest]
fn popular_ranks_films_and_honours_filters() {
    System::new().block_on(async {
        let app = service!();

        let (_, ada) = post_json(&app, "/api/v1/users", user_body("ada")).await;
        let (_, bob) = post_json(&app, "/api/v1/users", user_body("bob")).await;
        let ada_id = ada["id"].as_i64().expect("id");
        let bob_id = bob["id"].as_i64().expect("id");

        let (_, quiet) = post_json(&app, "/api/v1/films", film_body("Quiet")).await;
        let mut hit_body = film_body("Hit");
        hit_body["genres"] = json!([{ "id": 3 }]);
        hit_body["releaseDate"] = json!("1999-05-01");
        let (_, hit) = post_json(&app, "/api/v1/films", hit_body).await;
        let quiet_id = quiet["id"].as_i64().expect("id");
        let hit_id = hit["id"].as_i64().expect("id");

        for user in [ada_id, bob_id] {
            let request = actix_test::TestRequest::put()
                .uri(&format!("/api/v1/films/{hit_id}/like/{user}"))
                .to_request();
            actix_test::call_service(&app, request).await;
        }

        let (status, ranked) = get_json(&app, "/api/v1/films/popular").await;
        assert_eq!(status, 200);
        assert_eq!(ranked[0]["id"], hit_id);
        assert_eq!(ranked[1]["id"], quiet_id);

        let (_, top_one) = get_json(&app, "/api/v1/films/popular?count=1").await;
        assert_eq!(top_one.as_array().map(Vec::len), Some(1));

        let (_, cartoons) = get_json(&app, "/api/v1/films/popular?genreId=3").await;
        assert_eq!(cartoons.as_array().map(Vec::len), Some(1));
        assert_eq!(cartoons[0]["id"], hit_id);

        let (_, from_1999) = get_json(&app, "/api/v1/films/popular?year=1999").await;
        assert_eq!(from_1999.as_array().map(Vec::len), Some(1));

        let (status, error) = get_json(&app, "/api/v1/films/popular?count=0").await;
        assert_eq!(status, 400);
        assert_eq!(error["code"], "invalid_request");
    });
}

// -----------------------------------------------------------------------------
// Users and friendships
// -----------------------------------------------------------------------------

#[rstest]
fn user_crud_round_trip_with_name_fallback() {
    System::new().block_on(async {
        let app = service!();

        let (status, created) = post_json(
            &app,
            "/api/v1/users",
            json!({
                "email": "ada@example.com",
                "login": "ada",
                "birthday": "1990-06-01"
            }),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(created["name"], "ada");
        let id = created["id"].as_i64().expect("id");

        let request = actix_test::TestRequest::put()
            .uri("/api/v1/users")
            .set_json(json!({
                "id": id,
                "email": "ada@example.org",
                "login": "ada",
                "name": "Ada Lovelace",
                "birthday": "1990-06-01"
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status().as_u16(), 200);
        let updated: Value = actix_test::read_body_json(response).await;
        assert_eq!(updated["email"], "ada@example.org");
        assert_eq!(updated["name"], "Ada Lovelace");

        let (status, error) = post_json(
            &app,
            "/api/v1/users",
            json!({
                "email": "not-an-email",
                "login": "eve",
                "birthday": "1990-06-01"
            }),
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(error["code"], "invalid_request");

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/users/{id}"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status().as_u16(), 204);
    });
}

#[rstest]
fn friendship_flow_is_directed_and_unconfirmed() {
    System::new().block_on(async {
        let app = service!();

        let (_, ada) = post_json(&app, "/api/v1/users", user_body("ada")).await;
        let (_, bob) = post_json(&app, "/api/v1/users", user_body("bob")).await;
        let (_, carol) = post_json(&app, "/api/v1/users", user_body("carol")).await;
        let ada_id = ada["id"].as_i64().expect("id");
        let bob_id = bob["id"].as_i64().expect("id");
        let carol_id = carol["id"].as_i64().expect("id");

        // ada -> carol, carol -> bob: carol sits in both friend sets.
        for (a, b) in [(ada_id, carol_id), (carol_id, bob_id)] {
            let request = actix_test::TestRequest::put()
                .uri(&format!("/api/v1/users/{a}/friends/{b}"))
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status().as_u16(), 200);
        }

        let (status, friends) = get_json(&app, &format!("/api/v1/users/{ada_id}/friends")).await;
        assert_eq!(status, 200);
        assert_eq!(friends.as_array().map(Vec::len), Some(1));
        assert_eq!(friends[0]["id"], carol_id);
        assert_eq!(friends[0]["friends"][0]["status"], "unconfirmed");

        // bob has no outgoing edges.
        let (_, bob_friends) = get_json(&app, &format!("/api/v1/users/{bob_id}/friends")).await;
        assert_eq!(bob_friends.as_array().map(Vec::len), Some(0));

        let (status, shared) = get_json(
            &app,
            &format!("/api/v1/users/{ada_id}/friends/common/{bob_id}"),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(shared.as_array().map(Vec::len), Some(1));
        assert_eq!(shared[0]["id"], carol_id);

        // Self-friendship and duplicate edges are rejected.
        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/users/{ada_id}/friends/{ada_id}"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status().as_u16(), 400);

        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/users/{ada_id}/friends/{carol_id}"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status().as_u16(), 409);

        // Removal is idempotent.
        for _ in 0..2 {
            let request = actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/users/{ada_id}/friends/{carol_id}"))
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status().as_u16(), 204);
        }
    });
}

// -----------------------------------------------------------------------------
// Reference data
// -----------------------------------------------------------------------------

#[rstest]
fn reference_endpoints_serve_seeded_rows() {
    System::new().block_on(async {
        let app = service!();

        let (status, genres) = get_json(&app, "/api/v1/genres").await;
        assert_eq!(status, 200);
        assert_eq!(genres[0], json!({ "id": 1, "name": "Comedy" }));

        let (status, genre) = get_json(&app, "/api/v1/genres/2").await;
        assert_eq!(status, 200);
        assert_eq!(genre["name"], "Drama");

        let (status, _) = get_json(&app, "/api/v1/genres/99").await;
        assert_eq!(status, 404);

        let (status, ratings) = get_json(&app, "/api/v1/mpa").await;
        assert_eq!(status, 200);
        assert_eq!(ratings.as_array().map(Vec::len), Some(2));

        let (status, error) = get_json(&app, "/api/v1/mpa/42").await;
        assert_eq!(status, 404);
        assert_eq!(error["code"], "not_found");
    });
}
