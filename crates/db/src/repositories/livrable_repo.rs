//! Repository for the `livrable` table.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgConnection;

use easytask_core::types::DbId;

use crate::models::enums::Etat;
use crate::models::{reference_id, Livrable, Projet};
use crate::repositories::store::{decode, find_children, save_statement, EagerJoin, EntityStore};

/// Columns written by `save`, in bind order.
const WRITABLE: &[&str] = &[
    "ref_livrable",
    "date_debut",
    "date_fin",
    "description",
    "etat",
    "projet_id",
];

/// Provides CRUD operations for deliverables.
pub struct LivrableRepo;

#[async_trait]
impl EntityStore for LivrableRepo {
    type Entity = Livrable;

    const EAGER_JOINS: &'static [EagerJoin] = &[EagerJoin::of::<Projet>("projet")];

    async fn save(conn: &mut PgConnection, entity: &Livrable) -> Result<Livrable, sqlx::Error> {
        let query = save_statement::<Livrable>(WRITABLE, entity.id.is_some());
        let mut q = sqlx::query(&query)
            .bind(&entity.ref_livrable)
            .bind(entity.date_debut)
            .bind(entity.date_fin)
            .bind(&entity.description)
            .bind(entity.etat.map(Etat::as_str))
            .bind(reference_id(&entity.projet));
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

impl LivrableRepo {
    /// Deliverables of a project.
    pub async fn find_by_projet(
        conn: &mut PgConnection,
        projet_id: DbId,
    ) -> Result<HashSet<Livrable>, sqlx::Error> {
        find_children(conn, "projet_id", projet_id).await
    }
}
