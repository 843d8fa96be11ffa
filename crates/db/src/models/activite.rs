//! Activite entity and merge-patch payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use validator::Validate;

use easytask_core::types::DbId;

use super::enums::Etat;
use super::{column, enum_column, reference, Entity, Livrable};

/// A row from the `activite` table: a unit of work towards a deliverable.
///
/// `raf` ("reste à faire") is the free-form remaining-work indicator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Activite {
    pub id: Option<DbId>,
    #[validate(required, length(max = 20))]
    pub ref_act: Option<String>,
    #[validate(required)]
    pub description: Option<String>,
    #[validate(required)]
    pub date_debut: Option<NaiveDate>,
    pub date_fin: Option<NaiveDate>,
    pub raf: Option<String>,
    pub etat: Option<Etat>,
    pub livrable: Option<Livrable>,
}

/// Merge-patch payload for an activity.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActivitePatch {
    pub id: Option<DbId>,
    #[validate(length(max = 20))]
    pub ref_act: Option<String>,
    pub description: Option<String>,
    pub date_debut: Option<NaiveDate>,
    pub date_fin: Option<NaiveDate>,
    pub raf: Option<String>,
    pub etat: Option<Etat>,
}

impl Entity for Activite {
    type Id = DbId;
    type Patch = ActivitePatch;

    const NAME: &'static str = "activite";
    const TABLE: &'static str = "activite";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "ref_act",
        "description",
        "date_debut",
        "date_fin",
        "raf",
        "etat",
        "livrable_id",
    ];

    fn id(&self) -> Option<DbId> {
        self.id
    }

    fn patch_id(patch: &ActivitePatch) -> Option<DbId> {
        patch.id
    }

    fn merge(&mut self, patch: ActivitePatch) {
        merge_present!(
            self,
            patch,
            ref_act,
            description,
            date_debut,
            date_fin,
            raf,
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
            ref_act: column(row, prefix, "ref_act")?,
            description: column(row, prefix, "description")?,
            date_debut: column(row, prefix, "date_debut")?,
            date_fin: column(row, prefix, "date_fin")?,
            raf: column(row, prefix, "raf")?,
            etat: enum_column(row, prefix, "etat")?,
            livrable: reference(row, prefix, "livrable")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut activite = Activite {
            id: Some(5),
            ref_act: Some("ACT-1".into()),
            description: Some("A".into()),
            raf: Some("2j".into()),
            etat: Some(Etat::Planifier),
            ..Activite::default()
        };
        activite.merge(ActivitePatch {
            id: Some(5),
            raf: Some("1j".into()),
            etat: Some(Etat::EnCours),
            ..ActivitePatch::default()
        });

        assert_eq!(activite.raf.as_deref(), Some("1j"));
        assert_eq!(activite.etat, Some(Etat::EnCours));
        assert_eq!(activite.ref_act.as_deref(), Some("ACT-1"));
        assert_eq!(activite.description.as_deref(), Some("A"));
    }
}
