//! Repository for the `estimation` table.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgConnection;

use easytask_core::types::DbId;

use crate::models::enums::TypeEntite;
use crate::models::{reference_id, Activite, Estimation, Livrable, Projet};
use crate::repositories::store::{decode, find_children, save_statement, EagerJoin, EntityStore};

/// Columns written by `save`, in bind order.
const WRITABLE: &[&str] = &[
    "date",
    "valeur_jour",
    "valeur_heure",
    "prise_en_charge",
    "type",
    "activite_id",
    "projet_id",
    "livrable_id",
];

/// Provides CRUD operations for estimations.
pub struct EstimationRepo;

#[async_trait]
impl EntityStore for EstimationRepo {
    type Entity = Estimation;

    const EAGER_JOINS: &'static [EagerJoin] = &[
        EagerJoin::of::<Activite>("activite"),
        EagerJoin::of::<Projet>("projet"),
        EagerJoin::of::<Livrable>("livrable"),
    ];

    async fn save(
        conn: &mut PgConnection,
        entity: &Estimation,
    ) -> Result<Estimation, sqlx::Error> {
        let query = save_statement::<Estimation>(WRITABLE, entity.id.is_some());
        let mut q = sqlx::query(&query)
            .bind(entity.date)
            .bind(entity.valeur_jour)
            .bind(entity.valeur_heure)
            .bind(entity.prise_en_charge)
            .bind(entity.type_entite.map(TypeEntite::as_str))
            .bind(reference_id(&entity.activite))
            .bind(reference_id(&entity.projet))
            .bind(reference_id(&entity.livrable));
        if let Some(id) = entity.id {
            q = q.bind(id);
        }
        let row = q
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        decode(&row)
    }
}

impl EstimationRepo {
    /// Estimations attached to a project.
    pub async fn find_by_projet(
        conn: &mut PgConnection,
        projet_id: DbId,
    ) -> Result<HashSet<Estimation>, sqlx::Error> {
        find_children(conn, "projet_id", projet_id).await
    }
}
