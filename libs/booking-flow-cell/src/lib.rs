// =====================================================================================
// BOOKING FLOW CELL - PATIENT APPOINTMENT BOOKING WIZARD
// =====================================================================================
//
// Drives the four-step booking wizard (hospital -> doctor -> date -> slot):
// - Reducer applying selection events and cascading invalidations
// - Per-session controller with step gating and confirmation
// - In-memory session store and HTTP routes
//
// =====================================================================================

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::BookingFlowError;
pub use models::*;
pub use services::*;
pub use router::create_booking_flow_router;
