//! Fixture route surface.
//!
//! Plain CRUD plumbing around the two interesting pieces: the schema
//! downgrade (served once, cached) and the auth gate (consulted before every
//! mutating operation touches the store).

use crate::auth::{self, AuthSecrets};
use crate::error::ApiError;
use crate::openapi;
use crate::store::{Owner, Pet, PetCreate, PetList, PetStatus, PetUpdate, Store};
use axum::{
    Extension, Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, OnceLock};

pub struct FixtureState {
    pub secrets: AuthSecrets,
    store: RwLock<Store>,
    openapi: OnceLock<Arc<Value>>,
}

impl FixtureState {
    #[must_use]
    pub fn new(secrets: AuthSecrets) -> Self {
        Self {
            secrets,
            store: RwLock::new(Store::seeded()),
            openapi: OnceLock::new(),
        }
    }

    /// The downgraded `OpenAPI` document, computed on first access and
    /// reused for the process lifetime.
    pub fn openapi_document(&self) -> Arc<Value> {
        Arc::clone(
            self.openapi
                .get_or_init(|| Arc::new(openapi::downgraded_document())),
        )
    }
}

pub fn router(state: Arc<FixtureState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_document))
        .route("/reset", post(reset_data))
        .route("/pets", get(list_pets).post(create_pet))
        .route(
            "/pets/{pet_id}",
            get(get_pet).put(update_pet).delete(delete_pet),
        )
        .route("/owners", get(list_owners))
        .route("/owners/{owner_id}/pets", get(list_owner_pets))
        .layer(Extension(state))
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
}

async fn health() -> impl IntoResponse {
    Json(StatusResponse { status: "ok" })
}

async fn openapi_document(Extension(state): Extension<Arc<FixtureState>>) -> impl IntoResponse {
    Json(state.openapi_document().as_ref().clone())
}

async fn reset_data(Extension(state): Extension<Arc<FixtureState>>) -> impl IntoResponse {
    *state.store.write() = Store::seeded();
    Json(StatusResponse { status: "ok" })
}

#[derive(Debug, Default, Deserialize)]
struct ListPetsQuery {
    limit: Option<usize>,
    status: Option<PetStatus>,
}

async fn list_pets(
    Extension(state): Extension<Arc<FixtureState>>,
    Query(query): Query<ListPetsQuery>,
) -> Json<PetList> {
    let mut pets = state.store.read().pets();
    if let Some(status) = query.status {
        pets.retain(|p| p.status == status);
    }
    // total counts the filtered set; limit only truncates the page.
    let total = pets.len();
    if let Some(limit) = query.limit {
        pets.truncate(limit);
    }
    Json(PetList { items: pets, total })
}

async fn create_pet(
    Extension(state): Extension<Arc<FixtureState>>,
    headers: HeaderMap,
    Json(body): Json<PetCreate>,
) -> Result<impl IntoResponse, ApiError> {
    auth::require_auth(&state.secrets, &headers)?;
    let pet = state.store.write().insert_pet(body);
    Ok((StatusCode::CREATED, Json(pet)))
}

async fn get_pet(
    Extension(state): Extension<Arc<FixtureState>>,
    Path(pet_id): Path<u64>,
) -> Result<Json<Pet>, ApiError> {
    state
        .store
        .read()
        .pet(pet_id)
        .map(Json)
        .ok_or(ApiError::NotFound("Pet"))
}

async fn update_pet(
    Extension(state): Extension<Arc<FixtureState>>,
    Path(pet_id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<PetUpdate>,
) -> Result<Json<Pet>, ApiError> {
    auth::require_auth(&state.secrets, &headers)?;
    state
        .store
        .write()
        .update_pet(pet_id, body)
        .map(Json)
        .ok_or(ApiError::NotFound("Pet"))
}

async fn delete_pet(
    Extension(state): Extension<Arc<FixtureState>>,
    Path(pet_id): Path<u64>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>, ApiError> {
    auth::require_auth(&state.secrets, &headers)?;
    if state.store.write().remove_pet(pet_id) {
        Ok(Json(StatusResponse { status: "deleted" }))
    } else {
        Err(ApiError::NotFound("Pet"))
    }
}

async fn list_owners(Extension(state): Extension<Arc<FixtureState>>) -> Json<Vec<Owner>> {
    Json(state.store.read().owners())
}

async fn list_owner_pets(
    Extension(state): Extension<Arc<FixtureState>>,
    Path(owner_id): Path<u64>,
) -> Result<Json<Vec<Pet>>, ApiError> {
    let store = state.store.read();
    if !store.contains_owner(owner_id) {
        return Err(ApiError::NotFound("Owner"));
    }
    Ok(Json(store.owner_pets(owner_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_is_computed_once_and_shared() {
        let state = FixtureState::new(AuthSecrets::default());
        let first = state.openapi_document();
        let second = state.openapi_document();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
