// ============================================================================
// Registration Domain - account-opening workflow
// ============================================================================
//
// - Value objects (Address, AccountType, RegistrationStatus)
// - Commands (RegistrationDetails, RegistrationCommand)
// - Errors (RegistrationError)
// - Aggregate (CustomerRegistration with the guarded transitions)
// - Command Handler (start / pause / resume / get over the store)
// - Expiry (periodic PAUSED → EXPIRED sweep)
//
// ============================================================================

pub mod value_objects;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod command_handler;
pub mod expiry;

pub use value_objects::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use command_handler::*;
pub use expiry::*;
