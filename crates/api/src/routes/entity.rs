//! Route definitions shared by every entity resource.

use axum::routing::get;
use axum::Router;
use easytask_db::repositories::EntityStore;

use crate::handlers::crud;
use crate::state::AppState;

/// Routes mounted at `/{resource}` for the entity stored by `S`.
///
/// ```text
/// GET    /        -> list (?eagerload=&limit=&offset=)
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> partial_update
/// DELETE /{id}    -> delete
/// ```
pub fn router<S: EntityStore>() -> Router<AppState> {
    Router::new()
        .route("/", get(crud::list::<S>).post(crud::create::<S>))
        .route(
            "/{id}",
            get(crud::get_by_id::<S>)
                .put(crud::update::<S>)
                .patch(crud::partial_update::<S>)
                .delete(crud::delete::<S>),
        )
}
