//! Entity records and partial-update payloads.
//!
//! Each submodule contains:
//! - An entity struct with every column as an `Option`, so that the same type
//!   serves as a stored row, a request payload, and an identity-only stub
//!   standing in for an unresolved reference
//! - A `*Patch` struct for merge-patch requests (absent and `null` fields are
//!   both `None` and never applied)
//! - The [`Entity`] impl tying the two to their table
//!
//! Entities compare and hash by identity only (`impl_identity_eq!`).

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};
use validator::Validate;

/// Identity-based equality and hashing.
///
/// An instance always equals itself. Two distinct instances are equal only
/// when both identities are set and match; an instance without an identity
/// equals nothing else.
macro_rules! impl_identity_eq {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    std::ptr::eq(self, other) || (self.id.is_some() && self.id == other.id)
                }
            }

            impl Eq for $ty {}

            impl std::hash::Hash for $ty {
                fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                    self.id.hash(state);
                }
            }
        )+
    };
}

/// Copy every field that is `Some` in the patch onto the target.
macro_rules! merge_present {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = Some(value);
            }
        )+
    };
}

pub mod activite;
pub mod charge_journaliere;
pub mod client;
pub mod enums;
pub mod estimation;
pub mod livrable;
pub mod maintenance;
pub mod projet;
pub mod ressource;

pub use activite::{Activite, ActivitePatch};
pub use charge_journaliere::{ChargeJournaliere, ChargeJournalierePatch};
pub use client::{Client, ClientPatch};
pub use estimation::{Estimation, EstimationPatch};
pub use livrable::{Livrable, LivrablePatch};
pub use maintenance::{Maintenance, MaintenancePatch};
pub use projet::{Projet, ProjetPatch};
pub use ressource::{Ressource, RessourcePatch};

/// Primary key types: `i64` for BIGSERIAL tables, `Uuid` for the others.
pub trait EntityId:
    Copy
    + Eq
    + Hash
    + fmt::Display
    + fmt::Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + Unpin
    + 'static
    + sqlx::Type<Postgres>
    + for<'q> sqlx::Encode<'q, Postgres>
    + for<'r> sqlx::Decode<'r, Postgres>
{
}

impl EntityId for easytask_core::types::DbId {}
impl EntityId for easytask_core::types::Uuid {}

/// A persisted record with a store-assigned identity.
pub trait Entity:
    Serialize + DeserializeOwned + Validate + Clone + Default + Send + Sync + Unpin + 'static
{
    type Id: EntityId;

    /// Sparse merge-patch payload.
    type Patch: DeserializeOwned + Validate + Send + 'static;

    /// Entity name reported in alerts and errors (`maintenance`, `chargeJournaliere`).
    const NAME: &'static str;

    /// Table name.
    const TABLE: &'static str;

    /// Every column, identity first, in select order.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> Option<Self::Id>;

    fn patch_id(patch: &Self::Patch) -> Option<Self::Id>;

    /// Overwrite the fields present in `patch`; leave the rest untouched.
    fn merge(&mut self, patch: Self::Patch);

    /// An identity-only value standing in for an unresolved reference.
    fn stub(id: Self::Id) -> Self;

    /// Decode from a row whose columns for this entity carry `prefix`.
    ///
    /// The empty prefix reads a plain row; eager reads alias the columns of a
    /// joined reference as `<reference>__<column>`.
    fn from_prefixed_row(row: &PgRow, prefix: &str) -> Result<Self, sqlx::Error>;
}

/// Error raised when a stored enum value matches no variant.
#[derive(Debug, thiserror::Error)]
#[error("unknown {enum_name} value: {value}")]
pub struct UnknownVariant {
    pub enum_name: &'static str,
    pub value: String,
}

pub(crate) fn column<T>(row: &PgRow, prefix: &str, name: &str) -> Result<T, sqlx::Error>
where
    T: for<'r> sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(format!("{prefix}{name}").as_str())
}

pub(crate) fn enum_column<E>(row: &PgRow, prefix: &str, name: &str) -> Result<Option<E>, sqlx::Error>
where
    E: FromStr<Err = UnknownVariant>,
{
    let raw: Option<String> = column(row, prefix, name)?;
    raw.map(|value| value.parse::<E>())
        .transpose()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: format!("{prefix}{name}"),
            source: Box::new(e),
        })
}

/// Read the singular reference `name` from its `<name>_id` foreign key.
///
/// When the row also carries the joined columns (`<name>__id`, ...), the
/// reference is decoded in full; otherwise it is an identity-only stub.
pub(crate) fn reference<R: Entity>(
    row: &PgRow,
    prefix: &str,
    name: &str,
) -> Result<Option<R>, sqlx::Error> {
    let fk: Option<R::Id> = column(row, prefix, &format!("{name}_id"))?;
    let Some(fk) = fk else {
        return Ok(None);
    };

    let joined = format!("{prefix}{name}__");
    if row.try_column(format!("{joined}id").as_str()).is_ok() {
        R::from_prefixed_row(row, &joined).map(Some)
    } else {
        Ok(Some(R::stub(fk)))
    }
}

/// Identity of a reference, as bound into its foreign-key column.
pub(crate) fn reference_id<R: Entity>(reference: &Option<R>) -> Option<R::Id> {
    reference.as_ref().and_then(|r| r.id())
}

impl_identity_eq!(
    Activite,
    ChargeJournaliere,
    Client,
    Estimation,
    Livrable,
    Maintenance,
    Projet,
    Ressource,
);
