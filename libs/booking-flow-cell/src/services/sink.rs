use uuid::Uuid;

use crate::models::ConfirmedBooking;

/// Receives every successfully confirmed booking.
///
/// Returns the id under which the booking was recorded.
#[cfg_attr(test, mockall::automock)]
pub trait AppointmentSink: Send + Sync {
    fn record_booking(&self, booking: &ConfirmedBooking) -> Uuid;
}
