//! Livrable entity and merge-patch payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use validator::Validate;

use easytask_core::types::DbId;

use super::enums::Etat;
use super::{column, enum_column, reference, Entity, Projet};

/// A row from the `livrable` table: a deliverable of a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Livrable {
    pub id: Option<DbId>,
    #[validate(required, length(max = 20))]
    pub ref_livrable: Option<String>,
    #[validate(required)]
    pub date_debut: Option<NaiveDate>,
    pub date_fin: Option<NaiveDate>,
    #[validate(required)]
    pub description: Option<String>,
    pub etat: Option<Etat>,
    pub projet: Option<Projet>,
}

/// Merge-patch payload for a deliverable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LivrablePatch {
    pub id: Option<DbId>,
    #[validate(length(max = 20))]
    pub ref_livrable: Option<String>,
    pub date_debut: Option<NaiveDate>,
    pub date_fin: Option<NaiveDate>,
    pub description: Option<String>,
    pub etat: Option<Etat>,
}

impl Entity for Livrable {
    type Id = DbId;
    type Patch = LivrablePatch;

    const NAME: &'static str = "livrable";
    const TABLE: &'static str = "livrable";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "ref_livrable",
        "date_debut",
        "date_fin",
        "description",
        "etat",
        "projet_id",
    ];

    fn id(&self) -> Option<DbId> {
        self.id
    }

    fn patch_id(patch: &LivrablePatch) -> Option<DbId> {
        patch.id
    }

    fn merge(&mut self, patch: LivrablePatch) {
        merge_present!(
            self,
            patch,
            ref_livrable,
            date_debut,
            date_fin,
            description,
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
            ref_livrable: column(row, prefix, "ref_livrable")?,
            date_debut: column(row, prefix, "date_debut")?,
            date_fin: column(row, prefix, "date_fin")?,
            description: column(row, prefix, "description")?,
            etat: enum_column(row, prefix, "etat")?,
            projet: reference(row, prefix, "projet")?,
        })
    }
}
