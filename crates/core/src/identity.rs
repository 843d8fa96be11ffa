//! Identity checks run by every resource handler before a write.
//!
//! Identities are assigned by the store exactly once, on insert. A create
//! payload must therefore arrive without one, and an update payload must
//! carry the identity named in the request path.

use crate::error::{CoreError, ErrorKey};

/// Reject a create payload that already carries an identity (`idexists`).
pub fn ensure_new<Id>(entity: &'static str, body_id: Option<&Id>) -> Result<(), CoreError> {
    match body_id {
        Some(_) => Err(CoreError::bad_request(entity, ErrorKey::IdExists)),
        None => Ok(()),
    }
}

/// Check an update payload identity against the path identity.
///
/// Fails with `idnull` when the payload has no identity and `idinvalid`
/// when it names a different one.
pub fn ensure_matches<Id: PartialEq>(
    entity: &'static str,
    path_id: &Id,
    body_id: Option<&Id>,
) -> Result<(), CoreError> {
    let body_id = body_id.ok_or(CoreError::bad_request(entity, ErrorKey::IdNull))?;
    if body_id != path_id {
        return Err(CoreError::bad_request(entity, ErrorKey::IdInvalid));
    }
    Ok(())
}

/// Fail with `idnotfound` when the store has no row for the identity.
pub fn ensure_exists(entity: &'static str, exists: bool) -> Result<(), CoreError> {
    if exists {
        Ok(())
    } else {
        Err(CoreError::bad_request(entity, ErrorKey::IdNotFound))
    }
}
