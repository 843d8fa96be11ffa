//! Domain rules shared by the persistence and HTTP layers.
//!
//! Nothing in this crate performs I/O: it holds the error taxonomy, the
//! identity checks every resource handler runs before touching the store,
//! and the pagination bounds used by list endpoints.

pub mod error;
pub mod identity;
pub mod pagination;
pub mod types;
