//! Pure role-set authorization predicate.
//!
//! Token verification (the authentication step) happens in the API layer
//! before this runs; by the time `authorize` is called the caller's role
//! comes from a validated token. This function only answers "is this role
//! allowed here".

use crate::error::CoreError;
use crate::roles::Role;

/// Check a caller's role against an allowed set.
///
/// An empty `allowed` slice means "any authenticated caller" and always
/// passes. A non-empty slice rejects with [`CoreError::Forbidden`] unless
/// it contains the caller's role.
pub fn authorize(role: Role, allowed: &[Role]) -> Result<(), CoreError> {
    if allowed.is_empty() || allowed.contains(&role) {
        return Ok(());
    }
    Err(CoreError::Forbidden(format!(
        "Role {role} is not permitted for this operation"
    )))
}
