//! Repository for the `activite` table.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgConnection;

use easytask_core::types::DbId;

use crate::models::enums::Etat;
use crate::models::{reference_id, Activite, Livrable};
use crate::repositories::store::{decode, find_children, save_statement, EagerJoin, EntityStore};

/// Columns written by `save`, in bind order.
const WRITABLE: &[&str] = &[
    "ref_act",
    "description",
    "date_debut",
    "date_fin",
    "raf",
    "etat",
    "livrable_id",
];

/// Provides CRUD operations for activities.
pub struct ActiviteRepo;

#[async_trait]
impl EntityStore for ActiviteRepo {
    type Entity = Activite;

    const EAGER_JOINS: &'static [EagerJoin] = &[EagerJoin::of::<Livrable>("livrable")];

    async fn save(conn: &mut PgConnection, entity: &Activite) -> Result<Activite, sqlx::Error> {
        let query = save_statement::<Activite>(WRITABLE, entity.id.is_some());
        let mut q = sqlx::query(&query)
            .bind(&entity.ref_act)
            .bind(&entity.description)
            .bind(entity.date_debut)
            .bind(entity.date_fin)
            .bind(&entity.raf)
            .bind(entity.etat.map(Etat::as_str))
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

impl ActiviteRepo {
    /// Activities contributing to a deliverable.
    pub async fn find_by_livrable(
        conn: &mut PgConnection,
        livrable_id: DbId,
    ) -> Result<HashSet<Activite>, sqlx::Error> {
        find_children(conn, "livrable_id", livrable_id).await
    }
}
