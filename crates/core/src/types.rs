/// Sequential primary keys (PostgreSQL BIGSERIAL): Client, Projet, Livrable, Activite.
pub type DbId = i64;

/// Opaque primary keys assigned with `gen_random_uuid()`: Estimation,
/// Ressource, Maintenance, ChargeJournaliere.
pub use uuid::Uuid;
