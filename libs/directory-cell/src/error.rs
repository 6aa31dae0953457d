use shared_models::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Hospital not found: {0}")]
    HospitalNotFound(String),

    #[error("Doctor not found: {0}")]
    DoctorNotFound(String),

    #[error("Failed to read directory seed {path}: {source}")]
    SeedIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse directory seed: {0}")]
    SeedParse(#[from] serde_json::Error),

    #[error("Invalid directory seed: {0}")]
    InvalidSeed(String),
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::HospitalNotFound(_) | DirectoryError::DoctorNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            _ => AppError::Internal(err.to_string()),
        }
    }
}
