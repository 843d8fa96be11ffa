//! Ressource entity and merge-patch payload.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use validator::Validate;

use easytask_core::types::Uuid;

use super::{column, Entity};

/// A row from the `ressource` table: a person to whom maintenance and daily
/// load entries are booked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Ressource {
    pub id: Option<Uuid>,
    #[validate(required)]
    pub nom: Option<String>,
    #[validate(required)]
    pub prenom: Option<String>,
}

/// Merge-patch payload for a resource.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RessourcePatch {
    pub id: Option<Uuid>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
}

impl Entity for Ressource {
    type Id = Uuid;
    type Patch = RessourcePatch;

    const NAME: &'static str = "ressource";
    const TABLE: &'static str = "ressource";
    const COLUMNS: &'static [&'static str] = &["id", "nom", "prenom"];

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn patch_id(patch: &RessourcePatch) -> Option<Uuid> {
        patch.id
    }

    fn merge(&mut self, patch: RessourcePatch) {
        merge_present!(self, patch, nom, prenom);
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
            nom: column(row, prefix, "nom")?,
            prenom: column(row, prefix, "prenom")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn equality_is_by_identity() {
        let ressource1 = Ressource::stub(Uuid::new_v4());
        let ressource2 = Ressource {
            nom: Some("Ben Salah".into()),
            ..ressource1.clone()
        };
        assert_eq!(ressource1, ressource2);

        let ressource3 = Ressource::stub(Uuid::new_v4());
        assert_ne!(ressource1, ressource3);
    }

    #[test]
    fn sets_deduplicate_by_identity() {
        let id = Uuid::new_v4();
        let set: HashSet<Ressource> = [
            Ressource::stub(id),
            Ressource {
                prenom: Some("Amine".into()),
                ..Ressource::stub(id)
            },
            Ressource::stub(Uuid::new_v4()),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }
}
