// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// - registration: the account-opening workflow (state machine + expiry)
// - validation:   per-field constraint checks shared by the API
//
// Persistence and scheduling are supplied from outside through traits.
//
// ============================================================================

pub mod registration;
pub mod validation;
