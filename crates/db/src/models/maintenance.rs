//! Maintenance entity and merge-patch payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use validator::Validate;

use easytask_core::types::Uuid;

use super::enums::Etat;
use super::{column, enum_column, reference, Entity, Ressource};

/// A row from the `maintenance` table. Always booked to one resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    pub id: Option<Uuid>,
    #[validate(required)]
    pub description: Option<String>,
    pub produit: Option<String>,
    pub solution: Option<String>,
    pub etat: Option<Etat>,
    #[validate(required)]
    pub date_debut: Option<NaiveDate>,
    pub date_fin: Option<NaiveDate>,
    pub duree: Option<f64>,
    pub ressource: Option<Ressource>,
}

/// Merge-patch payload for a maintenance record.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaintenancePatch {
    pub id: Option<Uuid>,
    pub description: Option<String>,
    pub produit: Option<String>,
    pub solution: Option<String>,
    pub etat: Option<Etat>,
    pub date_debut: Option<NaiveDate>,
    pub date_fin: Option<NaiveDate>,
    pub duree: Option<f64>,
}

impl Entity for Maintenance {
    type Id = Uuid;
    type Patch = MaintenancePatch;

    const NAME: &'static str = "maintenance";
    const TABLE: &'static str = "maintenance";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "description",
        "produit",
        "solution",
        "etat",
        "date_debut",
        "date_fin",
        "duree",
        "ressource_id",
    ];

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn patch_id(patch: &MaintenancePatch) -> Option<Uuid> {
        patch.id
    }

    fn merge(&mut self, patch: MaintenancePatch) {
        merge_present!(
            self,
            patch,
            description,
            produit,
            solution,
            etat,
            date_debut,
            date_fin,
            duree,
        );
    }

    fn stub(id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    fn from_prefixed_row(row: &PgRow, prefix: &str) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: column(row, prefix, "id")?,
            description: column(row, prefix, "description")?,
            produit: column(row, prefix, "produit")?,
            solution: column(row, prefix, "solution")?,
            etat: enum_column(row, prefix, "etat")?,
            date_debut: column(row, prefix, "date_debut")?,
            date_fin: column(row, prefix, "date_fin")?,
            duree: column(row, prefix, "duree")?,
            ressource: reference(row, prefix, "ressource")?,
        })
    }
}
