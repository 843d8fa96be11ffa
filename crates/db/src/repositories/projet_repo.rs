//! Repository for the `projet` table.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgConnection;

use easytask_core::types::DbId;

use crate::models::enums::{Etat, TypeProjet};
use crate::models::{reference_id, Client, Projet};
use crate::repositories::store::{decode, find_children, save_statement, EagerJoin, EntityStore};

/// Columns written by `save`, in bind order.
const WRITABLE: &[&str] = &[
    "ref_projet",
    "type",
    "description",
    "datedebut",
    "datefin",
    "etat",
    "client_id",
];

/// Provides CRUD operations for projects.
pub struct ProjetRepo;

#[async_trait]
impl EntityStore for ProjetRepo {
    type Entity = Projet;

    const EAGER_JOINS: &'static [EagerJoin] = &[EagerJoin::of::<Client>("client")];

    /// Fails with a unique violation on a duplicate `ref_projet` and a
    /// not-null violation when the client is missing.
    async fn save(conn: &mut PgConnection, entity: &Projet) -> Result<Projet, sqlx::Error> {
        let query = save_statement::<Projet>(WRITABLE, entity.id.is_some());
        let mut q = sqlx::query(&query)
            .bind(&entity.ref_projet)
            .bind(entity.type_projet.map(TypeProjet::as_str))
            .bind(&entity.description)
            .bind(entity.datedebut)
            .bind(entity.datefin)
            .bind(entity.etat.map(Etat::as_str))
            .bind(reference_id(&entity.client));
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

impl ProjetRepo {
    /// Projects owned by a client.
    pub async fn find_by_client(
        conn: &mut PgConnection,
        client_id: DbId,
    ) -> Result<HashSet<Projet>, sqlx::Error> {
        find_children(conn, "client_id", client_id).await
    }
}
