use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::BookingStep;

#[derive(Error, Debug, PartialEq)]
pub enum BookingFlowError {
    #[error("Incomplete selection: no {missing} selected")]
    IncompleteSelection { missing: BookingStep },

    #[error("Cannot confirm from the {step} step, finish the time slot step first")]
    ConfirmBeforeFinalStep { step: BookingStep },

    #[error("Booking is already confirmed and can no longer change")]
    AlreadyConfirmed,

    #[error("Booking session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Too many open booking sessions (limit {limit})")]
    SessionLimitReached { limit: usize },
}

impl From<BookingFlowError> for AppError {
    fn from(err: BookingFlowError) -> Self {
        match err {
            BookingFlowError::IncompleteSelection { .. } | BookingFlowError::ConfirmBeforeFinalStep { .. } => {
                AppError::ValidationError(err.to_string())
            }
            BookingFlowError::AlreadyConfirmed => AppError::Conflict(err.to_string()),
            BookingFlowError::SessionNotFound(_) => AppError::NotFound(err.to_string()),
            BookingFlowError::SessionLimitReached { .. } => AppError::Conflict(err.to_string()),
        }
    }
}
