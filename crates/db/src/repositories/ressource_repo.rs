//! Repository for the `ressource` table.

use async_trait::async_trait;
use sqlx::PgConnection;

use crate::models::Ressource;
use crate::repositories::store::{decode, save_statement, EntityStore};

/// Columns written by `save`, in bind order.
const WRITABLE: &[&str] = &["nom", "prenom"];

/// Provides CRUD operations for resources.
pub struct RessourceRepo;

#[async_trait]
impl EntityStore for RessourceRepo {
    type Entity = Ressource;

    async fn save(conn: &mut PgConnection, entity: &Ressource) -> Result<Ressource, sqlx::Error> {
        let query = save_statement::<Ressource>(WRITABLE, entity.id.is_some());
        let mut q = sqlx::query(&query).bind(&entity.nom).bind(&entity.prenom);
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
