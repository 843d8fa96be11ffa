//! Projet entity and merge-patch payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use validator::Validate;

use easytask_core::types::DbId;

use super::enums::{Etat, TypeProjet};
use super::{column, enum_column, reference, Client, Entity};

/// A row from the `projet` table.
///
/// `ref_projet` is unique across projects. Every project belongs to exactly
/// one client; the store rejects a project saved without one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Projet {
    pub id: Option<DbId>,
    #[validate(required, length(max = 20))]
    pub ref_projet: Option<String>,
    #[serde(rename = "type")]
    #[validate(required)]
    pub type_projet: Option<TypeProjet>,
    #[validate(required)]
    pub description: Option<String>,
    #[validate(required)]
    pub datedebut: Option<NaiveDate>,
    pub datefin: Option<NaiveDate>,
    pub etat: Option<Etat>,
    pub client: Option<Client>,
}

/// Merge-patch payload for a project. The client reference is not patchable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjetPatch {
    pub id: Option<DbId>,
    #[validate(length(max = 20))]
    pub ref_projet: Option<String>,
    #[serde(rename = "type")]
    pub type_projet: Option<TypeProjet>,
    pub description: Option<String>,
    pub datedebut: Option<NaiveDate>,
    pub datefin: Option<NaiveDate>,
    pub etat: Option<Etat>,
}

impl Entity for Projet {
    type Id = DbId;
    type Patch = ProjetPatch;

    const NAME: &'static str = "projet";
    const TABLE: &'static str = "projet";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "ref_projet",
        "type",
        "description",
        "datedebut",
        "datefin",
        "etat",
        "client_id",
    ];

    fn id(&self) -> Option<DbId> {
        self.id
    }

    fn patch_id(patch: &ProjetPatch) -> Option<DbId> {
        patch.id
    }

    fn merge(&mut self, patch: ProjetPatch) {
        merge_present!(
            self,
            patch,
            ref_projet,
            type_projet,
            description,
            datedebut,
            datefin,
            etat,
        );
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
            ref_projet: column(row, prefix, "ref_projet")?,
            type_projet: enum_column(row, prefix, "type")?,
            description: column(row, prefix, "description")?,
            datedebut: column(row, prefix, "datedebut")?,
            datefin: column(row, prefix, "datefin")?,
            etat: enum_column(row, prefix, "etat")?,
            client: reference(row, prefix, "client")?,
        })
    }
}
