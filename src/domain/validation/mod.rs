// ============================================================================
// Field Validation
// ============================================================================
//
// - Field table (name → kind + constraints), no runtime reflection
// - Constraints (size, pattern, email, past, adult, decimal minimum)
// - FieldValidator (single field or whole request body)
//
// ============================================================================

pub mod constraints;
pub mod errors;
pub mod fields;
pub mod validator;

pub use errors::*;
pub use validator::FieldValidator;
