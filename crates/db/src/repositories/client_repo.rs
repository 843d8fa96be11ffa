//! Repository for the `client` table.

use async_trait::async_trait;
use sqlx::PgConnection;

use crate::models::Client;
use crate::repositories::store::{decode, save_statement, EntityStore};

/// Columns written by `save`, in bind order.
const WRITABLE: &[&str] = &["ref_client", "nom", "prenom", "contact"];

/// Provides CRUD operations for clients.
pub struct ClientRepo;

#[async_trait]
impl EntityStore for ClientRepo {
    type Entity = Client;

    async fn save(conn: &mut PgConnection, entity: &Client) -> Result<Client, sqlx::Error> {
        let query = save_statement::<Client>(WRITABLE, entity.id.is_some());
        let mut q = sqlx::query(&query)
            .bind(&entity.ref_client)
            .bind(&entity.nom)
            .bind(&entity.prenom)
            .bind(&entity.contact);
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
