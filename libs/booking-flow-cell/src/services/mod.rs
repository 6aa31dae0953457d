pub mod controller;
pub mod session;
pub mod sink;
pub mod transition;

pub use controller::BookingFlowController;
pub use session::BookingSessionStore;
pub use sink::AppointmentSink;
pub use transition::{can_advance, confirm_selection, reduce, seed_selection, Transition};
