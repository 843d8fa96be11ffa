//! Repository layer.
//!
//! Each repository is a zero-sized struct implementing [`EntityStore`] for
//! one entity. Reads and deletes come from the trait; the repository
//! supplies `save`, its eager joins, and lookups of the children it owns.

pub mod activite_repo;
pub mod charge_journaliere_repo;
pub mod client_repo;
pub mod estimation_repo;
pub mod livrable_repo;
pub mod maintenance_repo;
pub mod projet_repo;
pub mod ressource_repo;
pub mod store;

pub use activite_repo::ActiviteRepo;
pub use charge_journaliere_repo::ChargeJournaliereRepo;
pub use client_repo::ClientRepo;
pub use estimation_repo::EstimationRepo;
pub use livrable_repo::LivrableRepo;
pub use maintenance_repo::MaintenanceRepo;
pub use projet_repo::ProjetRepo;
pub use ressource_repo::RessourceRepo;
pub use store::{EagerJoin, EntityStore, IdOf};
