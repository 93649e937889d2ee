//! The ownership guard. The storage layer resolves any entity's root owner
//! by joining up the chain (Card → List → Board → User); this module is the
//! single place that owner is compared against the acting identity.

use crate::error::ApiError;
use crate::middleware::CurrentUser;

/// Pure predicate, no side effects.
pub fn is_owner(user: &CurrentUser, owner_id: i64) -> bool {
    user.id == owner_id
}

/// Abort with [`ApiError::Unauthorized`] unless the acting user owns the
/// entity. Applied before every mutating or detail-view operation on a
/// board, list, or card.
pub fn require_owner(user: &CurrentUser, owner_id: i64) -> Result<(), ApiError> {
    if is_owner(user, owner_id) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}
