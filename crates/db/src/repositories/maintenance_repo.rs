//! Repository for the `maintenance` table.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgConnection;

use easytask_core::types::Uuid;

use crate::models::enums::Etat;
use crate::models::{reference_id, Maintenance, Ressource};
use crate::repositories::store::{decode, find_children, save_statement, EagerJoin, EntityStore};

/// Columns written by `save`, in bind order.
const WRITABLE: &[&str] = &[
    "description",
    "produit",
    "solution",
    "etat",
    "date_debut",
    "date_fin",
    "duree",
    "ressource_id",
];

/// Provides CRUD operations for maintenance records.
pub struct MaintenanceRepo;

#[async_trait]
impl EntityStore for MaintenanceRepo {
    type Entity = Maintenance;

    const EAGER_JOINS: &'static [EagerJoin] = &[EagerJoin::of::<Ressource>("ressource")];

    async fn save(
        conn: &mut PgConnection,
        entity: &Maintenance,
    ) -> Result<Maintenance, sqlx::Error> {
        let query = save_statement::<Maintenance>(WRITABLE, entity.id.is_some());
        let mut q = sqlx::query(&query)
            .bind(&entity.description)
            .bind(&entity.produit)
            .bind(&entity.solution)
            .bind(entity.etat.map(Etat::as_str))
            .bind(entity.date_debut)
            .bind(entity.date_fin)
            .bind(entity.duree)
            .bind(reference_id(&entity.ressource));
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

impl MaintenanceRepo {
    /// Maintenance records booked to a resource.
    pub async fn find_by_ressource(
        conn: &mut PgConnection,
        ressource_id: Uuid,
    ) -> Result<HashSet<Maintenance>, sqlx::Error> {
        find_children(conn, "ressource_id", ressource_id).await
    }
}
