//! The persistence gateway shared by every entity store.
//!
//! Reads and deletes are identical across entities once the table, its
//! columns and its singular references are known, so they live here as
//! provided methods. Each store only writes its own `save`.
//!
//! Every operation takes `&mut PgConnection` so the caller owns the
//! transaction: pass `&mut *tx` to run a sequence of calls atomically.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgConnection;

use easytask_core::pagination::{Page, PageRequest};

use crate::models::{Entity, EntityId};

/// Identity type of a store's entity.
pub type IdOf<S> = <<S as EntityStore>::Entity as Entity>::Id;

/// A singular reference resolved by the eager read variants.
#[derive(Debug, Clone, Copy)]
pub struct EagerJoin {
    /// Reference name; the foreign key column is `<reference>_id`.
    pub reference: &'static str,
    pub table: &'static str,
    pub columns: &'static [&'static str],
}

impl EagerJoin {
    pub const fn of<R: Entity>(reference: &'static str) -> Self {
        Self {
            reference,
            table: R::TABLE,
            columns: R::COLUMNS,
        }
    }
}

#[async_trait]
pub trait EntityStore: Send + Sync + 'static {
    type Entity: Entity;

    /// Singular references joined by the `*_eager` reads.
    const EAGER_JOINS: &'static [EagerJoin] = &[];

    /// Insert when the entity has no identity, otherwise replace every
    /// mutable column of the stored row.
    ///
    /// Updating an identity with no stored row fails with `RowNotFound`.
    async fn save(
        conn: &mut PgConnection,
        entity: &Self::Entity,
    ) -> Result<Self::Entity, sqlx::Error>;

    async fn find_by_id(
        conn: &mut PgConnection,
        id: IdOf<Self>,
    ) -> Result<Option<Self::Entity>, sqlx::Error> {
        let query = format!("{} WHERE e.id = $1", select_plain::<Self::Entity>());
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        row.map(|r| decode::<Self::Entity>(&r)).transpose()
    }

    async fn exists_by_id(conn: &mut PgConnection, id: IdOf<Self>) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)",
            Self::Entity::TABLE
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    /// All rows, references left as identity-only stubs.
    async fn find_all(conn: &mut PgConnection) -> Result<Vec<Self::Entity>, sqlx::Error> {
        let query = format!("{} ORDER BY e.id", select_plain::<Self::Entity>());
        let rows = sqlx::query(&query).fetch_all(&mut *conn).await?;
        decode_all::<Self::Entity>(&rows)
    }

    async fn find_all_page(
        conn: &mut PgConnection,
        page: PageRequest,
    ) -> Result<Page<Self::Entity>, sqlx::Error> {
        let query = format!(
            "{} ORDER BY e.id LIMIT $1 OFFSET $2",
            select_plain::<Self::Entity>()
        );
        let rows = sqlx::query(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&mut *conn)
            .await?;
        let items = decode_all::<Self::Entity>(&rows)?;
        let total = count::<Self::Entity>(conn).await?;
        Ok(Page { items, total })
    }

    /// All rows with every singular reference resolved in the same read.
    async fn find_all_eager(conn: &mut PgConnection) -> Result<Vec<Self::Entity>, sqlx::Error> {
        let query = format!(
            "{} ORDER BY e.id",
            select_eager::<Self::Entity>(Self::EAGER_JOINS)
        );
        let rows = sqlx::query(&query).fetch_all(&mut *conn).await?;
        decode_all::<Self::Entity>(&rows)
    }

    async fn find_all_eager_page(
        conn: &mut PgConnection,
        page: PageRequest,
    ) -> Result<Page<Self::Entity>, sqlx::Error> {
        let query = format!(
            "{} ORDER BY e.id LIMIT $1 OFFSET $2",
            select_eager::<Self::Entity>(Self::EAGER_JOINS)
        );
        let rows = sqlx::query(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&mut *conn)
            .await?;
        let items = decode_all::<Self::Entity>(&rows)?;
        let total = count::<Self::Entity>(conn).await?;
        Ok(Page { items, total })
    }

    async fn find_by_id_eager(
        conn: &mut PgConnection,
        id: IdOf<Self>,
    ) -> Result<Option<Self::Entity>, sqlx::Error> {
        let query = format!(
            "{} WHERE e.id = $1",
            select_eager::<Self::Entity>(Self::EAGER_JOINS)
        );
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        row.map(|r| decode::<Self::Entity>(&r)).transpose()
    }

    /// Delete the row if present. Deleting an absent identity is not an error.
    async fn delete_by_id(conn: &mut PgConnection, id: IdOf<Self>) -> Result<(), sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", Self::Entity::TABLE);
        sqlx::query(&query).bind(id).execute(&mut *conn).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Statement builders
// ---------------------------------------------------------------------------

fn qualified(alias: &str, columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("{alias}.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn select_plain<E: Entity>() -> String {
    format!("SELECT {} FROM {} e", qualified("e", E::COLUMNS), E::TABLE)
}

/// `SELECT e.*, j0.col AS <ref>__col, ... FROM t e LEFT JOIN ...`
///
/// A left join per singular reference never multiplies rows, so the result
/// holds one row per entity.
fn select_eager<E: Entity>(joins: &[EagerJoin]) -> String {
    let mut select = qualified("e", E::COLUMNS);
    let mut from = format!("{} e", E::TABLE);

    for (i, join) in joins.iter().enumerate() {
        let alias = format!("j{i}");
        for column in join.columns {
            select.push_str(&format!(
                ", {alias}.{column} AS {}__{column}",
                join.reference
            ));
        }
        from.push_str(&format!(
            " LEFT JOIN {} {alias} ON {alias}.id = e.{}_id",
            join.table, join.reference
        ));
    }

    format!("SELECT {select} FROM {from}")
}

/// `INSERT ... RETURNING` when `updating` is false, otherwise
/// `UPDATE ... WHERE id = $n RETURNING` with the identity bound last.
///
/// `writable` lists the columns bound, in order, as `$1..$n`.
pub(crate) fn save_statement<E: Entity>(writable: &[&str], updating: bool) -> String {
    let returning = E::COLUMNS.join(", ");
    if updating {
        let assignments = writable
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{c} = ${}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE {} SET {assignments} WHERE id = ${} RETURNING {returning}",
            E::TABLE,
            writable.len() + 1
        )
    } else {
        let placeholders = (1..=writable.len())
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({placeholders}) RETURNING {returning}",
            E::TABLE,
            writable.join(", ")
        )
    }
}

/// Rows of `E` whose `fk_column` points at `parent_id`.
pub(crate) async fn find_children<E, P>(
    conn: &mut PgConnection,
    fk_column: &str,
    parent_id: P,
) -> Result<HashSet<E>, sqlx::Error>
where
    E: Entity + Eq + std::hash::Hash,
    P: EntityId,
{
    let query = format!("{} WHERE e.{fk_column} = $1", select_plain::<E>());
    let rows = sqlx::query(&query)
        .bind(parent_id)
        .fetch_all(&mut *conn)
        .await?;
    rows.iter().map(decode::<E>).collect()
}

pub(crate) fn decode<E: Entity>(row: &PgRow) -> Result<E, sqlx::Error> {
    E::from_prefixed_row(row, "")
}

fn decode_all<E: Entity>(rows: &[PgRow]) -> Result<Vec<E>, sqlx::Error> {
    rows.iter().map(decode::<E>).collect()
}

async fn count<E: Entity>(conn: &mut PgConnection) -> Result<i64, sqlx::Error> {
    let query = format!("SELECT COUNT(*) FROM {}", E::TABLE);
    sqlx::query_scalar::<_, i64>(&query)
        .fetch_one(&mut *conn)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Maintenance, Ressource};

    #[test]
    fn eager_select_aliases_joined_columns() {
        let sql = select_eager::<Maintenance>(&[EagerJoin::of::<Ressource>("ressource")]);
        assert!(sql.starts_with("SELECT e.id, e.description"));
        assert!(sql.contains("j0.nom AS ressource__nom"));
        assert!(sql.ends_with("FROM maintenance e LEFT JOIN ressource j0 ON j0.id = e.ressource_id"));
    }

    #[test]
    fn insert_statement_numbers_placeholders() {
        let sql = save_statement::<Ressource>(&["nom", "prenom"], false);
        assert_eq!(
            sql,
            "INSERT INTO ressource (nom, prenom) VALUES ($1, $2) RETURNING id, nom, prenom"
        );
    }

    #[test]
    fn update_statement_binds_id_last() {
        let sql = save_statement::<Ressource>(&["nom", "prenom"], true);
        assert_eq!(
            sql,
            "UPDATE ressource SET nom = $1, prenom = $2 WHERE id = $3 RETURNING id, nom, prenom"
        );
    }
}
