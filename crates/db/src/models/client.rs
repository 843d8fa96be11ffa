//! Client entity and merge-patch payload.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use validator::Validate;

use easytask_core::types::DbId;

use super::{column, Entity};

/// A row from the `client` table. Owns zero or more projects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Option<DbId>,
    #[validate(required)]
    pub ref_client: Option<String>,
    #[validate(required)]
    pub nom: Option<String>,
    #[validate(required)]
    pub prenom: Option<String>,
    pub contact: Option<String>,
}

/// Merge-patch payload for a client.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatch {
    pub id: Option<DbId>,
    pub ref_client: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub contact: Option<String>,
}

impl Entity for Client {
    type Id = DbId;
    type Patch = ClientPatch;

    const NAME: &'static str = "client";
    const TABLE: &'static str = "client";
    const COLUMNS: &'static [&'static str] = &["id", "ref_client", "nom", "prenom", "contact"];

    fn id(&self) -> Option<DbId> {
        self.id
    }

    fn patch_id(patch: &ClientPatch) -> Option<DbId> {
        patch.id
    }

    fn merge(&mut self, patch: ClientPatch) {
        merge_present!(self, patch, ref_client, nom, prenom, contact);
    }

    fn stub(id: DbId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    fn from_prefixed_row(row: &PgRow, prefix: &str) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: column(row, prefix, "id")?,
            ref_client: column(row, prefix, "ref_client")?,
            nom: column(row, prefix, "nom")?,
            prenom: column(row, prefix, "prenom")?,
            contact: column(row, prefix, "contact")?,
        })
    }
}
