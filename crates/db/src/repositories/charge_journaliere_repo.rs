//! Repository for the `charge_journaliere` table.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgConnection;

use easytask_core::types::Uuid;

use crate::models::enums::TypeCharge;
use crate::models::{reference_id, ChargeJournaliere, Ressource};
use crate::repositories::store::{decode, find_children, save_statement, EagerJoin, EntityStore};

/// Columns written by `save`, in bind order.
const WRITABLE: &[&str] = &["date", "type", "duree", "description", "ressource_id"];

/// Provides CRUD operations for daily load entries.
pub struct ChargeJournaliereRepo;

#[async_trait]
impl EntityStore for ChargeJournaliereRepo {
    type Entity = ChargeJournaliere;

    const EAGER_JOINS: &'static [EagerJoin] = &[EagerJoin::of::<Ressource>("ressource")];

    async fn save(
        conn: &mut PgConnection,
        entity: &ChargeJournaliere,
    ) -> Result<ChargeJournaliere, sqlx::Error> {
        let query = save_statement::<ChargeJournaliere>(WRITABLE, entity.id.is_some());
        let mut q = sqlx::query(&query)
            .bind(entity.date)
            .bind(entity.type_charge.map(TypeCharge::as_str))
            .bind(entity.duree)
            .bind(&entity.description)
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

impl ChargeJournaliereRepo {
    /// Daily load entries booked to a resource.
    pub async fn find_by_ressource(
        conn: &mut PgConnection,
        ressource_id: Uuid,
    ) -> Result<HashSet<ChargeJournaliere>, sqlx::Error> {
        find_children(conn, "ressource_id", ressource_id).await
    }
}
