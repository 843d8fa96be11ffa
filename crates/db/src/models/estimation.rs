//! Estimation entity and merge-patch payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use validator::Validate;

use easytask_core::types::Uuid;

use super::enums::TypeEntite;
use super::{column, enum_column, reference, Activite, Entity, Livrable, Projet};

/// A row from the `estimation` table.
///
/// `type_entite` says which of the three references the estimate is for.
/// Nothing checks that exactly that reference is the one populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Estimation {
    pub id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub valeur_jour: Option<f64>,
    pub valeur_heure: Option<f64>,
    pub prise_en_charge: Option<bool>,
    #[serde(rename = "type")]
    pub type_entite: Option<TypeEntite>,
    pub activite: Option<Activite>,
    pub projet: Option<Projet>,
    pub livrable: Option<Livrable>,
}

/// Merge-patch payload for an estimation. References are not patchable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EstimationPatch {
    pub id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub valeur_jour: Option<f64>,
    pub valeur_heure: Option<f64>,
    pub prise_en_charge: Option<bool>,
    #[serde(rename = "type")]
    pub type_entite: Option<TypeEntite>,
}

impl Entity for Estimation {
    type Id = Uuid;
    type Patch = EstimationPatch;

    const NAME: &'static str = "estimation";
    const TABLE: &'static str = "estimation";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "date",
        "valeur_jour",
        "valeur_heure",
        "prise_en_charge",
        "type",
        "activite_id",
        "projet_id",
        "livrable_id",
    ];

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn patch_id(patch: &EstimationPatch) -> Option<Uuid> {
        patch.id
    }

    fn merge(&mut self, patch: EstimationPatch) {
        merge_present!(
            self,
            patch,
            date,
            valeur_jour,
            valeur_heure,
            prise_en_charge,
            type_entite,
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
            date: column(row, prefix, "date")?,
            valeur_jour: column(row, prefix, "valeur_jour")?,
            valeur_heure: column(row, prefix, "valeur_heure")?,
            prise_en_charge: column(row, prefix, "prise_en_charge")?,
            type_entite: enum_column(row, prefix, "type")?,
            activite: reference(row, prefix, "activite")?,
            projet: reference(row, prefix, "projet")?,
            livrable: reference(row, prefix, "livrable")?,
        })
    }
}
