//! Resource handlers shared by every entity.
//!
//! Each handler is generic over an [`EntityStore`] and is instantiated once
//! per resource in [`crate::routes::entity::router`]. A handler runs inside
//! one transaction: every store call goes through `&mut *tx`, and the
//! transaction commits only once the whole operation has succeeded. An early
//! `?` return drops it, which rolls it back.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use easytask_core::error::CoreError;
use easytask_core::identity::{ensure_exists, ensure_matches, ensure_new};
use easytask_core::pagination::PageRequest;
use easytask_db::models::Entity;
use easytask_db::repositories::{EntityStore, IdOf};
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, AppResult};
use crate::middleware::alert::Alert;
use crate::query::ListParams;
use crate::state::AppState;

/// Header carrying the unpaginated row count of a paged list.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

fn validate(payload: &impl Validate) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(validation_message(&e))))
}

/// `refProjet: length; datedebut: required`, keyed by wire (camelCase) names.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let codes = errs
                .iter()
                .map(|e| &*e.code)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {codes}", camel_case(&field))
        })
        .collect();
    fields.sort();
    fields.join("; ")
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// POST /api/{resource}
///
/// Rejects a payload that already carries an identity (`idexists`).
/// Responds 201 with the stored entity and its `Location`.
pub async fn create<S: EntityStore>(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(entity): Json<S::Entity>,
) -> AppResult<Response> {
    let name = <S::Entity as Entity>::NAME;
    tracing::debug!(entity = name, "REST request to save");

    ensure_new(name, entity.id().as_ref())?;
    validate(&entity)?;

    let mut tx = state.pool.begin().await?;
    let saved = S::save(&mut *tx, &entity).await?;
    tx.commit().await?;

    let id = saved
        .id()
        .ok_or_else(|| AppError::InternalError(format!("{name} saved without an identity")))?;
    let location = format!("{}/{id}", uri.path().trim_end_matches('/'));
    let location = HeaderValue::try_from(location)
        .map_err(|e| AppError::InternalError(format!("Invalid Location header: {e}")))?;

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Extension(Alert::created(name, id)),
        Json(saved),
    )
        .into_response())
}

/// PUT /api/{resource}/{id}
///
/// Replaces every mutable field of the stored entity.
pub async fn update<S: EntityStore>(
    State(state): State<AppState>,
    Path(id): Path<IdOf<S>>,
    Json(entity): Json<S::Entity>,
) -> AppResult<Response> {
    let name = <S::Entity as Entity>::NAME;
    tracing::debug!(entity = name, %id, "REST request to update");

    ensure_matches(name, &id, entity.id().as_ref())?;
    validate(&entity)?;

    let mut tx = state.pool.begin().await?;
    ensure_exists(name, S::exists_by_id(&mut *tx, id).await?)?;
    let saved = S::save(&mut *tx, &entity).await?;
    tx.commit().await?;

    Ok((Extension(Alert::updated(name, id)), Json(saved)).into_response())
}

/// PATCH /api/{resource}/{id}
///
/// Accepts `application/json` and `application/merge-patch+json`. Fields
/// absent from the payload, or sent as `null`, keep their stored value.
pub async fn partial_update<S: EntityStore>(
    State(state): State<AppState>,
    Path(id): Path<IdOf<S>>,
    Json(patch): Json<<S::Entity as Entity>::Patch>,
) -> AppResult<Response> {
    let name = <S::Entity as Entity>::NAME;
    tracing::debug!(entity = name, %id, "REST request to partially update");

    ensure_matches(name, &id, <S::Entity as Entity>::patch_id(&patch).as_ref())?;
    validate(&patch)?;

    let mut tx = state.pool.begin().await?;
    ensure_exists(name, S::exists_by_id(&mut *tx, id).await?)?;

    // The row can vanish between the existence check and this read.
    let mut existing = S::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| CoreError::not_found(name, id))?;
    existing.merge(patch);

    let saved = S::save(&mut *tx, &existing).await?;
    tx.commit().await?;

    Ok((Extension(Alert::updated(name, id)), Json(saved)).into_response())
}

/// GET /api/{resource}?eagerload=&limit=&offset=
///
/// Paged when `limit` or `offset` is supplied; the unpaginated count is
/// returned in `X-Total-Count`.
pub async fn list<S: EntityStore>(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let name = <S::Entity as Entity>::NAME;
    tracing::debug!(entity = name, eagerload = params.eagerload, "REST request to get all");

    let mut tx = state.pool.begin().await?;

    let response = if params.is_paged() {
        let page = PageRequest::new(params.limit, params.offset);
        let page = if params.eagerload {
            S::find_all_eager_page(&mut *tx, page).await?
        } else {
            S::find_all_page(&mut *tx, page).await?
        };
        (
            [(
                HeaderName::from_static(TOTAL_COUNT_HEADER),
                HeaderValue::from(page.total),
            )],
            Json(page.items),
        )
            .into_response()
    } else {
        let items = if params.eagerload {
            S::find_all_eager(&mut *tx).await?
        } else {
            S::find_all(&mut *tx).await?
        };
        Json(items).into_response()
    };

    tx.commit().await?;
    Ok(response)
}

/// GET /api/{resource}/{id}
///
/// Returns the entity with its singular references resolved.
pub async fn get_by_id<S: EntityStore>(
    State(state): State<AppState>,
    Path(id): Path<IdOf<S>>,
) -> AppResult<Json<S::Entity>> {
    let name = <S::Entity as Entity>::NAME;
    tracing::debug!(entity = name, %id, "REST request to get");

    let mut tx = state.pool.begin().await?;
    let entity = S::find_by_id_eager(&mut *tx, id)
        .await?
        .ok_or_else(|| CoreError::not_found(name, id))?;
    tx.commit().await?;

    Ok(Json(entity))
}

/// DELETE /api/{resource}/{id}
///
/// Responds 204 whether or not the entity existed.
pub async fn delete<S: EntityStore>(
    State(state): State<AppState>,
    Path(id): Path<IdOf<S>>,
) -> AppResult<Response> {
    let name = <S::Entity as Entity>::NAME;
    tracing::debug!(entity = name, %id, "REST request to delete");

    let mut tx = state.pool.begin().await?;
    S::delete_by_id(&mut *tx, id).await?;
    tx.commit().await?;

    Ok((StatusCode::NO_CONTENT, Extension(Alert::deleted(name, id))).into_response())
}
