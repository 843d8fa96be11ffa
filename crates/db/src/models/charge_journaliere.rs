//! ChargeJournaliere entity and merge-patch payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use validator::Validate;

use easytask_core::types::Uuid;

use super::enums::TypeCharge;
use super::{column, enum_column, reference, Entity, Ressource};

/// A row from the `charge_journaliere` table: one day's load booked to a
/// resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChargeJournaliere {
    pub id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub type_charge: Option<TypeCharge>,
    pub duree: Option<f64>,
    pub description: Option<String>,
    pub ressource: Option<Ressource>,
}

/// Merge-patch payload for a daily load entry.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChargeJournalierePatch {
    pub id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub type_charge: Option<TypeCharge>,
    pub duree: Option<f64>,
    pub description: Option<String>,
}

impl Entity for ChargeJournaliere {
    type Id = Uuid;
    type Patch = ChargeJournalierePatch;

    const NAME: &'static str = "chargeJournaliere";
    const TABLE: &'static str = "charge_journaliere";
    const COLUMNS: &'static [&'static str] =
        &["id", "date", "type", "duree", "description", "ressource_id"];

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn patch_id(patch: &ChargeJournalierePatch) -> Option<Uuid> {
        patch.id
    }

    fn merge(&mut self, patch: ChargeJournalierePatch) {
        merge_present!(self, patch, date, type_charge, duree, description);
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
            type_charge: enum_column(row, prefix, "type")?,
            duree: column(row, prefix, "duree")?,
            description: column(row, prefix, "description")?,
            ressource: reference(row, prefix, "ressource")?,
        })
    }
}
