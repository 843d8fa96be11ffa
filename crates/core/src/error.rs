use std::fmt;

/// Identity-protocol violations reported back to the caller as `error.<key>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKey {
    /// A create payload already carries an identity.
    IdExists,
    /// An update payload carries no identity.
    IdNull,
    /// The payload identity differs from the path identity.
    IdInvalid,
    /// No stored entity has the payload identity.
    IdNotFound,
}

impl ErrorKey {
    /// Wire name of the key (`idexists`, `idnull`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKey::IdExists => "idexists",
            ErrorKey::IdNull => "idnull",
            ErrorKey::IdInvalid => "idinvalid",
            ErrorKey::IdNotFound => "idnotfound",
        }
    }

    /// Human-readable title sent alongside the key.
    pub fn title(self) -> &'static str {
        match self {
            ErrorKey::IdExists => "A new entity cannot already have an ID",
            ErrorKey::IdNull => "Invalid id",
            ErrorKey::IdInvalid => "Invalid ID",
            ErrorKey::IdNotFound => "Entity not found",
        }
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Bad request on {entity}: {error_key}")]
    BadRequestAlert {
        entity: &'static str,
        error_key: ErrorKey,
    },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn bad_request(entity: &'static str, error_key: ErrorKey) -> Self {
        CoreError::BadRequestAlert { entity, error_key }
    }

    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
