// ============================================================================
// Actors Module
// ============================================================================
//
// Actor-based infrastructure for background work.
//
// Note: Registration logic uses the command handler, NOT actors.
//       Actors are reserved for scheduling concerns only.
//
// ============================================================================

mod expiry_scheduler;

pub use expiry_scheduler::ExpiryScheduler;
