pub mod entity;
pub mod health;

use axum::Router;
use easytask_db::repositories::{
    ActiviteRepo, ChargeJournaliereRepo, ClientRepo, EstimationRepo, LivrableRepo,
    MaintenanceRepo, ProjetRepo, RessourceRepo,
};

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Every resource exposes the same five operations (see [`entity::router`]):
///
/// ```text
/// /clients                     sequential ids
/// /projets                     sequential ids
/// /livrables                   sequential ids
/// /activites                   sequential ids
/// /estimations                 uuid ids
/// /ressources                  uuid ids
/// /maintenances                uuid ids
/// /charge-journalieres         uuid ids
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/clients", entity::router::<ClientRepo>())
        .nest("/projets", entity::router::<ProjetRepo>())
        .nest("/livrables", entity::router::<LivrableRepo>())
        .nest("/activites", entity::router::<ActiviteRepo>())
        .nest("/estimations", entity::router::<EstimationRepo>())
        .nest("/ressources", entity::router::<RessourceRepo>())
        .nest("/maintenances", entity::router::<MaintenanceRepo>())
        .nest(
            "/charge-journalieres",
            entity::router::<ChargeJournaliereRepo>(),
        )
}
